//! TOML configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::eyre::WrapErr;
use directories::ProjectDirs;
use log::{debug, warn};
use mote_core::{DEFAULT_PARTICLE_COUNT, Theme};
use serde::{Deserialize, Serialize};

/// Default frame cap for the render loop.
const DEFAULT_FPS: u32 = 60;

/// User configuration, stored as `config.toml` in the platform config dir.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Persisted theme key ("dark" or "light"). Kept as a raw string so that
    /// an unknown value degrades to the default theme instead of failing the
    /// whole file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    /// Replace the animation with a single static fill.
    pub reduced_motion: bool,
    /// Upper bound on rendered frames per second.
    pub fps: u32,
    /// Number of particles in the field.
    pub particle_count: usize,
    /// Treat the pointer as gone after this many idle milliseconds (0 = never).
    pub pointer_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: None,
            reduced_motion: false,
            fps: DEFAULT_FPS,
            particle_count: DEFAULT_PARTICLE_COUNT,
            pointer_timeout_ms: 0,
        }
    }
}

impl Config {
    /// Location of the config file, if the platform has a config directory.
    pub fn path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "mote").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Read the config at `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> color_eyre::Result<Self> {
        if !path.exists() {
            debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&text).wrap_err_with(|| format!("failed to parse {}", path.display()))
    }

    /// Read the config at `path`, logging and falling back to the defaults on
    /// any error.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match Self::load_from(path) {
            Ok(config) => config,
            Err(err) => {
                warn!("{err:#}; using default configuration");
                Self::default()
            }
        }
    }

    /// Write the config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> color_eyre::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .wrap_err_with(|| format!("failed to create {}", parent.display()))?;
        }
        let text = toml::to_string_pretty(self).wrap_err("failed to serialize config")?;
        fs::write(path, text).wrap_err_with(|| format!("failed to write {}", path.display()))
    }

    /// Theme preference, defaulting to dark when unset or invalid.
    pub fn theme(&self) -> Theme {
        Theme::from_preference(self.theme.as_deref())
    }

    /// Frame budget in milliseconds derived from [`Config::fps`].
    pub fn frame_budget_ms(&self) -> u64 {
        1000 / u64::from(self.fps.clamp(1, 240))
    }
}
