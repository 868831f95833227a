//! Overlay configuration.
//!
//! Layer settings and color overrides share one INI file. Loading is
//! optional: every setting has a default, and hosts that manage their own
//! settings can build [`OverlayConfig`] and [`IniColorScheme`] directly.

mod colors;
mod keybind;
mod parser;
mod settings;

pub use colors::{IniColorScheme, COLOR_SECTION_PREFIX};
pub use keybind::KeybindList;
pub use parser::LAYER_SECTION_PREFIX;
pub use settings::{
    LayerConfig, OverlayConfig, DEFAULT_UPDATES_PER_SECOND, DEFAULT_UPDATE_WHEN_VIEW_CHANGES,
    TICKS_PER_SECOND,
};

use std::path::{Path, PathBuf};

use ini::Ini;

use crate::error::{OverlayError, OverlayResult};

/// Config file name inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.ini";

/// Default location of the config file (`~/.config/tilelayers/config.ini` on Linux).
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tilelayers").join(CONFIG_FILE_NAME))
}

impl OverlayConfig {
    /// Parse layer settings from INI text.
    pub fn from_ini_str(text: &str) -> OverlayResult<Self> {
        let ini = Ini::load_from_str(text).map_err(|e| OverlayError::Ini(e.to_string()))?;
        parser::parse_ini(&ini)
    }

    /// Load layer settings and color overrides from an INI file.
    pub fn load(path: &Path) -> OverlayResult<(Self, IniColorScheme)> {
        let ini = Ini::load_from_file(path)?;
        let config = parser::parse_ini(&ini)?;
        let colors = IniColorScheme::from_ini(&ini);
        tracing::debug!(
            path = %path.display(),
            layers = config.layers.len(),
            colors = colors.len(),
            "Loaded overlay config"
        );
        Ok((config, colors))
    }
}
