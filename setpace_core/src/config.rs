//! Configuration file support for Setpace.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/setpace/config.toml`.

use crate::presets::{find_preset, TimerPreset};
use crate::timer::{TimerConfig, DEFAULT_REST_WARN_SECS, DEFAULT_WARN_SECS};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerSettings,

    #[serde(default, rename = "preset")]
    pub presets: Vec<CustomPreset>,
}

/// Timer defaults configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TimerSettings {
    /// Warning window for interval phases, in seconds.
    #[serde(default = "default_warn_secs")]
    pub warn_secs: u32,

    /// Warning window for standalone rest countdowns, in seconds.
    #[serde(default = "default_rest_warn_secs")]
    pub rest_warn_secs: u32,

    /// Rest countdown length started after completing a set.
    #[serde(default = "default_rest_secs")]
    pub default_rest_secs: u32,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            warn_secs: default_warn_secs(),
            rest_warn_secs: default_rest_warn_secs(),
            default_rest_secs: default_rest_secs(),
        }
    }
}

/// User-defined interval preset
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CustomPreset {
    pub id: String,
    pub name: String,
    pub work_secs: u32,

    #[serde(default)]
    pub rest_secs: Option<u32>,

    #[serde(default = "default_rounds")]
    pub rounds: u32,

    /// Overrides the section-level warning window when set.
    #[serde(default)]
    pub warn_secs: Option<u32>,
}

impl CustomPreset {
    /// Materialize into a runnable preset, filling warning defaults from
    /// the timer settings: rest-only presets get the longer rest window.
    pub fn to_preset(&self, settings: &TimerSettings) -> TimerPreset {
        let single_phase = self.rest_secs.unwrap_or(0) == 0;
        let warn_secs = self.warn_secs.unwrap_or(if single_phase {
            settings.rest_warn_secs
        } else {
            settings.warn_secs
        });
        TimerPreset {
            id: self.id.clone(),
            name: self.name.clone(),
            config: TimerConfig {
                work_secs: self.work_secs,
                rest_secs: self.rest_secs,
                rounds: self.rounds,
                warn_secs,
            },
        }
    }
}

// Default value functions
fn default_warn_secs() -> u32 {
    DEFAULT_WARN_SECS
}

fn default_rest_warn_secs() -> u32 {
    DEFAULT_REST_WARN_SECS
}

fn default_rest_secs() -> u32 {
    90
}

fn default_rounds() -> u32 {
    1
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME")
                .expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
        base.join("setpace").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Resolve a preset id against custom presets first, then built-ins.
    pub fn resolve_preset(&self, id: &str) -> Option<TimerPreset> {
        self.presets
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.to_preset(&self.timer))
            .or_else(|| find_preset(id).cloned())
    }
}
