use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/playcard/config.toml` or `~/.config/playcard/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `PLAYCARD__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub ui: UiSettings,
    pub controls: ControlsSettings,
    pub library: LibrarySettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Start the first track as soon as it is ready.
    pub autoplay: bool,
    /// Volume at startup, 0.0 to 1.0.
    pub initial_volume: f32,
    /// How often the audio thread reports the playback position (milliseconds).
    pub tick_ms: u64,
    /// Fade-out duration when quitting (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            autoplay: true,
            initial_volume: 1.0,
            tick_ms: 250,
            quit_fade_out_ms: 300,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Separator between elapsed and total time.
    pub time_separator: String,
    /// Whether the playlist panel is rendered under the card.
    pub show_playlist: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ now playing ~ ".to_string(),
            time_separator: " / ".to_string(),
            show_playlist: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Percentage of the track to jump when pressing `H` / `L`.
    pub seek_step_percent: f64,
    /// Volume change per `+` / `-` press.
    pub volume_step: f32,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            seek_step_percent: 5.0,
            volume_step: 0.05,
        }
    }
}

/// A built-in playlist entry, resolved against `LibrarySettings::seed_dir`.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedTrack {
    pub title: String,
    pub file: String,
}

impl SeedTrack {
    fn new(title: &str, file: &str) -> Self {
        Self {
            title: title.to_string(),
            file: file.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Directory holding the seed tracks.
    pub seed_dir: PathBuf,
    /// The playlist every session starts with. Must not be empty.
    pub seed_tracks: Vec<SeedTrack>,
    /// File extensions accepted as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks when uploading a folder.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            seed_dir: PathBuf::from("songs"),
            seed_tracks: vec![
                SeedTrack::new("Blinding Lights", "Blinding Lights.mp3"),
                SeedTrack::new(
                    "Lose Yourself to Dance",
                    "Lose Yourself to Dance (feat. Pharrell Williams).mp3",
                ),
                SeedTrack::new("Popular", "Popular(PagalNew.Com.Se).mp3"),
                SeedTrack::new("Seven Nation Army", "Seven Nation Army.mp3"),
            ],
            extensions: vec![
                "mp3".into(),
                "flac".into(),
                "wav".into(),
                "ogg".into(),
                "m4a".into(),
            ],
            follow_links: true,
            include_hidden: false,
            recursive: true,
            max_depth: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub enabled: bool,
    /// `tracing` filter directive, e.g. `info` or `playcard=debug`.
    /// `RUST_LOG` wins when set.
    pub level: String,
    /// Log file; defaults to `playcard.log` in the system temp dir.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            level: "info".to_string(),
            file: None,
        }
    }
}
