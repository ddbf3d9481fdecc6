use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Failures from the playback layer.
///
/// Calls on a `PlaybackHandle` only fail synchronously when the command
/// could not be delivered; decode and device problems arrive later as
/// `AudioEvent::Failed`.
#[derive(Debug, thiserror::Error)]
pub enum PlaybackError {
    #[error("audio thread is not running")]
    Disconnected,
    #[error("cannot open {path}: {source}")]
    Open { path: PathBuf, source: io::Error },
    #[error("cannot decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },
    #[error("no audio output device: {0}")]
    OutputDevice(String),
    #[error("no source loaded")]
    NothingLoaded,
    #[error("{0} has been revoked")]
    LocatorRevoked(String),
}

/// The one loaded, controllable audio stream.
pub trait PlaybackHandle {
    /// Switch to a new source. Readiness is signalled asynchronously.
    fn load(&mut self, source: &Path) -> Result<(), PlaybackError>;
    fn play(&mut self) -> Result<(), PlaybackError>;
    fn pause(&mut self) -> Result<(), PlaybackError>;
    fn seek(&mut self, position: Duration) -> Result<(), PlaybackError>;
    fn set_volume(&mut self, volume: f32) -> Result<(), PlaybackError>;
    /// Length of the loaded source, when known.
    fn duration(&self) -> Option<Duration>;
    fn current_time(&self) -> Duration;
    /// Stop for good, fading out over `fade_out`.
    fn stop(&mut self, fade_out: Duration);
}
