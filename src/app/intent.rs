use crate::library::UploadedFile;

/// A user request forwarded from the view to the controller.
#[derive(Clone, Debug, PartialEq)]
pub enum Intent {
    TogglePlay,
    Next,
    Previous,
    /// Jump to a position on the 0–100 seek scale.
    Seek(f64),
    /// Set the volume on the 0–1 scale.
    SetVolume(f32),
    UploadFiles(Vec<UploadedFile>),
}
