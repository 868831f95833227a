//! INI-backed color scheme.
//!
//! Color overrides live in `[colors.<LayerId>]` sections:
//!
//! ```ini
//! [colors.ScarecrowCoverage]
//! Covered = #00FF00
//! NotCovered = red
//! Selected = #0000FFCC
//! ```

use std::collections::HashMap;

use ini::Ini;

use crate::color::Color;
use crate::error::{OverlayError, OverlayResult};
use crate::legend::ColorScheme;

/// Section prefix for color overrides.
pub const COLOR_SECTION_PREFIX: &str = "colors.";

/// Color overrides read from an INI document.
///
/// Values are kept as text and parsed on lookup, so one malformed color
/// only fails the layer that asks for it.
#[derive(Debug, Clone, Default)]
pub struct IniColorScheme {
    values: HashMap<(String, String), String>,
}

impl IniColorScheme {
    /// Create an empty scheme (every lookup returns the default).
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect color overrides from `[colors.*]` sections.
    pub fn from_ini(ini: &Ini) -> Self {
        let mut values = HashMap::new();
        for (name, section) in ini.iter() {
            let Some(layer_id) = name.and_then(|n| n.strip_prefix(COLOR_SECTION_PREFIX)) else {
                continue;
            };
            for (key, value) in section.iter() {
                values.insert(
                    (layer_id.to_string(), key.to_ascii_lowercase()),
                    value.to_string(),
                );
            }
        }
        Self { values }
    }

    /// Parse a scheme from INI text.
    pub fn from_ini_str(text: &str) -> OverlayResult<Self> {
        let ini = Ini::load_from_str(text).map_err(|e| OverlayError::Ini(e.to_string()))?;
        Ok(Self::from_ini(&ini))
    }

    /// Set an override directly.
    pub fn set(&mut self, layer_id: &str, key: &str, value: impl Into<String>) {
        self.values.insert(
            (layer_id.to_string(), key.to_ascii_lowercase()),
            value.into(),
        );
    }

    /// Number of overrides.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the scheme has no overrides.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl ColorScheme for IniColorScheme {
    fn get(&self, layer_id: &str, key: &str, default: Color) -> OverlayResult<Color> {
        match self
            .values
            .get(&(layer_id.to_string(), key.to_ascii_lowercase()))
        {
            None => Ok(default),
            Some(raw) => raw.parse::<Color>().map_err(|e| {
                OverlayError::config(layer_id, format!("color '{}': {}", key, e))
            }),
        }
    }
}
