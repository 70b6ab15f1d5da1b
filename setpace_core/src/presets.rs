//! Built-in timer presets.
//!
//! The interval configurations the app ships with, covering the common
//! gym protocols plus standalone rest countdowns. User-defined presets
//! come from the config file and are merged in by the presentation layer.

use crate::timer::TimerConfig;
use once_cell::sync::Lazy;

/// A named, ready-to-run timer configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimerPreset {
    pub id: String,
    pub name: String,
    pub config: TimerConfig,
}

impl TimerPreset {
    fn new(id: &str, name: &str, config: TimerConfig) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            config,
        }
    }
}

/// Cached built-in presets - built once and reused across all operations
static DEFAULT_PRESETS: Lazy<Vec<TimerPreset>> = Lazy::new(build_default_presets);

/// Get the cached built-in presets.
pub fn get_default_presets() -> &'static [TimerPreset] {
    &DEFAULT_PRESETS
}

/// Find a built-in preset by id.
pub fn find_preset(id: &str) -> Option<&'static TimerPreset> {
    get_default_presets().iter().find(|p| p.id == id)
}

/// Build the built-in preset list.
///
/// **Note**: prefer `get_default_presets()` which returns a cached slice.
/// This function is retained for testing and custom preset construction.
pub fn build_default_presets() -> Vec<TimerPreset> {
    vec![
        TimerPreset::new("tabata", "Tabata (20s on / 10s off x 8)", TimerConfig::intervals(20, 10, 8)),
        TimerPreset::new(
            "hiit_30_15",
            "HIIT (30s on / 15s off x 5)",
            TimerConfig::intervals(30, 15, 5),
        ),
        TimerPreset::new(
            "emom_10",
            "EMOM (every minute x 10)",
            TimerConfig {
                work_secs: 60,
                rest_secs: None,
                rounds: 10,
                warn_secs: 3,
            },
        ),
        TimerPreset::new("rest_60", "Rest 1:00", TimerConfig::rest_only(60)),
        TimerPreset::new("rest_90", "Rest 1:30", TimerConfig::rest_only(90)),
        TimerPreset::new("rest_180", "Rest 3:00", TimerConfig::rest_only(180)),
    ]
}
