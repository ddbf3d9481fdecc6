/// Everything the view needs to know about playback, owned by the
/// `Controller`.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaybackState {
    /// Index into the playlist; always valid because the playlist only grows.
    pub current_index: usize,
    pub is_playing: bool,
    /// Seek bar position, 0 to 100.
    pub progress_percent: f64,
    /// Output volume, 0 to 1.
    pub volume: f32,
    /// Last non-fatal problem or info message worth showing the user.
    pub notice: Option<String>,
}

impl PlaybackState {
    pub fn new(volume: f32) -> Self {
        Self {
            current_index: 0,
            is_playing: false,
            progress_percent: 0.0,
            volume: volume.clamp(0.0, 1.0),
            notice: None,
        }
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new(1.0)
    }
}
