//! Messages and shared state passed between the audio thread and the
//! rest of the player.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug)]
pub enum AudioCmd {
    /// Decode the file and make it the current source, paused at 0.
    Load(PathBuf),
    /// Start or resume the current source.
    Play,
    /// Pause the current source.
    Pause,
    /// Jump to an absolute position in the current source.
    Seek(Duration),
    /// Set the output volume (0.0 to 1.0).
    SetVolume(f32),
    /// Quit the audio thread, optionally fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

/// Notifications from the audio thread, in the order they happened.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioEvent {
    /// The last loaded source decoded and can be played.
    SourceReady,
    /// The playback position moved.
    Position,
    /// The current source played to its end.
    Ended,
    /// A load, play or seek could not be carried out.
    Failed(String),
}

#[derive(Debug, Clone, Default)]
/// Runtime playback information shared with the controller.
pub struct PlaybackInfo {
    /// Elapsed playback time for the current source.
    pub elapsed: Duration,
    /// Total length of the current source, when known.
    pub duration: Option<Duration>,
}

pub type SharedPlayback = Arc<Mutex<PlaybackInfo>>;
