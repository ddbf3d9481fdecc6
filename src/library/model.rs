use std::path::PathBuf;

use super::locator::Locator;

/// One playlist entry. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Track {
    pub title: String,
    pub source: Locator,
}

impl Track {
    pub fn new(title: impl Into<String>, source: Locator) -> Self {
        Self {
            title: title.into(),
            source,
        }
    }
}

/// A file picked by the user, before it has a locator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadedFile {
    /// File name including extension; becomes the track title. Names that
    /// are not UTF-8 are shown lossily.
    pub name: String,
    pub path: PathBuf,
}
