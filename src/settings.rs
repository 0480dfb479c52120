//! Game settings and preferences
//!
//! Persisted as JSON next to the game; missing or corrupt files fall back to
//! defaults with a logged warning, never an error surfaced to the player.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{CONNECTOR_STROKE_WIDTH, LIVE_STROKE_ALPHA, LIVE_STROKE_WIDTH};

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Stroke width for committed connectors
    pub connector_stroke_width: f32,
    /// Stroke width for the in-progress line
    pub live_stroke_width: f32,
    /// Alpha for the in-progress line
    pub live_stroke_alpha: f32,
    /// Highlight the pair partner of the shape being dragged
    pub show_hints: bool,
    /// Skip drag highlight scaling and other motion flourishes
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            connector_stroke_width: CONNECTOR_STROKE_WIDTH,
            live_stroke_width: LIVE_STROKE_WIDTH,
            live_stroke_alpha: LIVE_STROKE_ALPHA,
            show_hints: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, falling back to defaults.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Settings file {} is corrupt ({e}); using defaults", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No settings at {}; using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Save settings as JSON. Failures are logged, not surfaced.
    pub fn save(&self, path: &Path) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(path, json) {
                    log::warn!("Failed to save settings to {}: {e}", path.display());
                } else {
                    log::info!("Settings saved to {}", path.display());
                }
            }
            Err(e) => log::warn!("Failed to serialize settings: {e}"),
        }
    }
}
