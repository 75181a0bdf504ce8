// SPDX-License-Identifier: MIT OR Apache-2.0
//! Player settings.
//!
//! Settings live in a RON file next to where the game is started:
//! - Starting level
//! - External level catalog (optional)
//! - Cell spacing for world positions in JSON snapshots
//! - Log filter
//! - Board display options

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Current settings format version
pub const SETTINGS_FORMAT_VERSION: u32 = 1;

/// Default settings file name
pub const SETTINGS_FILE_NAME: &str = "circuit_flow.ron";

/// Distance between cell centers in world units
pub const DEFAULT_SPACING: f32 = 1.6;

/// Default tracing filter directives
pub const DEFAULT_LOG_FILTER: &str = "circuit_flow_app=info,circuit_flow_graph=info";

/// Persistent game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Format version
    pub version: u32,
    /// Level loaded at startup
    pub start_level: u32,
    /// Level catalog file replacing the built-in levels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,
    /// Distance between cell centers
    pub spacing: f32,
    /// Tracing filter used when `RUST_LOG` is unset
    pub log_filter: String,
    /// Show unrotated ports next to the effective ones
    pub show_base_ports: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            version: SETTINGS_FORMAT_VERSION,
            start_level: 1,
            catalog: None,
            spacing: DEFAULT_SPACING,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            show_base_ports: false,
        }
    }
}

impl GameSettings {
    /// Load settings from a file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        let settings: GameSettings = ron::from_str(&content)?;

        if settings.version > SETTINGS_FORMAT_VERSION {
            return Err(SettingsError::UnsupportedVersion {
                found: settings.version,
                supported: SETTINGS_FORMAT_VERSION,
            });
        }

        Ok(settings)
    }

    /// Load settings, falling back to defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, SettingsError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save settings to a file
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let config = ron::ser::PrettyConfig::default()
            .struct_names(true)
            .enumerate_arrays(false);

        let content = ron::ser::to_string_pretty(self, config)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Error reading or writing settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// File could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// RON syntax or shape error
    #[error("Settings parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// RON serialization error
    #[error("Settings serialization error: {0}")]
    Serialize(#[from] ron::Error),

    /// File written by a newer version
    #[error("Settings version {found} is newer than supported version {supported}")]
    UnsupportedVersion {
        /// Version in the file
        found: u32,
        /// Highest version understood
        supported: u32,
    },
}
