use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::UploadedFile;

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn expand_home(raw: &str) -> PathBuf {
    if let Some(rest) = raw.strip_prefix("~/") {
        if let Some(home) = env::var_os("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }
    PathBuf::from(raw)
}

/// Typed text is trimmed and may start with `~/`; anything that is not
/// UTF-8 came from the OS and is taken as is.
fn selection_root(raw: &OsStr) -> Option<PathBuf> {
    match raw.to_str() {
        Some(text) => {
            let text = text.trim();
            (!text.is_empty()).then(|| expand_home(text))
        }
        None => Some(PathBuf::from(raw)),
    }
}

fn uploaded(path: &Path) -> Option<UploadedFile> {
    let name = path.file_name()?.to_string_lossy().into_owned();
    Some(UploadedFile {
        name,
        path: path.to_path_buf(),
    })
}

/// Turn a user selection (a file or a folder) into the audio files it holds.
///
/// Anything that is missing, unreadable or not audio yields an empty list.
/// Folder contents are ordered by file name, case-insensitively.
pub fn collect_uploads(raw: impl AsRef<OsStr>, settings: &LibrarySettings) -> Vec<UploadedFile> {
    let Some(root) = selection_root(raw.as_ref()) else {
        return Vec::new();
    };

    if root.is_file() {
        return if is_audio_file(&root, settings) {
            uploaded(&root).into_iter().collect()
        } else {
            debug!(path = %root.display(), "upload rejected: not an audio file");
            Vec::new()
        };
    }
    if !root.is_dir() {
        debug!(path = %root.display(), "upload rejected: no such file or directory");
        return Vec::new();
    }

    let mut walker = WalkDir::new(&root).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    let mut files: Vec<UploadedFile> = walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file() || (settings.follow_links && e.path().is_file()))
        .filter(|e| is_audio_file(e.path(), settings))
        .filter_map(|e| uploaded(e.path()))
        .collect();

    files.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    debug!(root = %root.display(), count = files.len(), "collected folder upload");
    files
}
