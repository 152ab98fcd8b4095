//! Overlay settings and their JSON persistence.

use crate::error::OverlayResult;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the settings file inside the config directory.
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// User-facing overlay options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OverlaySettings {
    /// Only a stylus draws. Finger touches scroll the document, and the
    /// surface turns interactive per contact type.
    pub pen_only_mode: bool,
    /// Erase all strokes when a finger scroll is detected.
    pub clear_on_scroll: bool,
}

impl OverlaySettings {
    /// Whether a detected scroll should clear the strokes.
    ///
    /// `clear_on_scroll` only has meaning in pen-only mode.
    pub fn clears_on_scroll(&self) -> bool {
        self.pen_only_mode && self.clear_on_scroll
    }

    /// Parse settings, filling missing fields with defaults.
    pub fn from_json(json: &str) -> OverlayResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> OverlayResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from `path`.
    pub fn load(path: &Path) -> OverlayResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings from `path`, falling back to defaults if the file is
    /// missing or unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring settings at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write settings to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> OverlayResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        log::debug!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Default settings location in the platform config directory.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("scrawl").join(SETTINGS_FILE_NAME))
    }

    #[cfg(target_arch = "wasm32")]
    pub fn default_path() -> Option<PathBuf> {
        None
    }
}
