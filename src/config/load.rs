use std::env;
use std::path::{Path, PathBuf};

use ::config::{Config, ConfigError, Environment, File};

use super::schema::Settings;

const ENV_PREFIX: &str = "PLAYCARD";
const CONFIG_PATH_VAR: &str = "PLAYCARD_CONFIG_PATH";

/// Where the config file is looked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLocation {
    pub path: PathBuf,
    /// Named through `PLAYCARD_CONFIG_PATH`, so it has to exist.
    pub explicit: bool,
}

/// `PLAYCARD_CONFIG_PATH` when set, else the XDG location.
pub fn locate_config() -> Option<ConfigLocation> {
    if let Some(p) = env::var_os(CONFIG_PATH_VAR) {
        return Some(ConfigLocation {
            path: PathBuf::from(p),
            explicit: true,
        });
    }
    xdg_config_path().map(|path| ConfigLocation {
        path,
        explicit: false,
    })
}

/// `$XDG_CONFIG_HOME/playcard/config.toml`, or under `~/.config` without it.
pub fn xdg_config_path() -> Option<PathBuf> {
    env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("HOME").map(|home| Path::new(&home).join(".config")))
        .map(|dir| dir.join("playcard").join("config.toml"))
}

impl Settings {
    /// Defaults, overlaid by the config file, overlaid by `PLAYCARD__*`
    /// environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(locate_config().as_ref())
    }

    pub fn load_from(location: Option<&ConfigLocation>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(loc) = location {
            builder = builder.add_source(File::from(loc.path.as_path()).required(loc.explicit));
        }
        builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Check value ranges. Reports every problem at once.
    pub fn validate(&self) -> Result<(), String> {
        let mut problems = Vec::new();
        if !(0.0..=1.0).contains(&self.audio.initial_volume) {
            problems.push("audio.initial_volume must be within 0.0..=1.0");
        }
        if self.audio.tick_ms == 0 {
            problems.push("audio.tick_ms must be >= 1");
        }
        if !(self.controls.seek_step_percent > 0.0 && self.controls.seek_step_percent <= 100.0) {
            problems.push("controls.seek_step_percent must be within (0, 100]");
        }
        if !(self.controls.volume_step > 0.0 && self.controls.volume_step <= 1.0) {
            problems.push("controls.volume_step must be within (0, 1]");
        }
        if self.library.seed_tracks.is_empty() {
            problems.push("library.seed_tracks must list at least one track");
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems.join("; "))
        }
    }
}
