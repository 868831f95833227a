//! Legend entries and the color scheme they are resolved from.
//!
//! Each layer owns a small, fixed list of [`LegendEntry`] values created
//! once at construction. Tiles refer to an entry through a shared
//! [`Arc`], so many tiles can carry the same classification without copying
//! it and renderers can draw the key straight from the layer.

use std::fmt;
use std::sync::Arc;

use crate::color::Color;
use crate::error::{OverlayError, OverlayResult};

/// A named, colored classification bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LegendEntry {
    /// Translation key for the display name (e.g. `scarecrows.protected`).
    pub key: String,
    /// Tile color for this classification.
    pub color: Color,
}

impl LegendEntry {
    /// Create a legend entry.
    ///
    /// Fails with a configuration error when the key is blank, since the
    /// renderer would have nothing to show in the key.
    pub fn new(key: impl Into<String>, color: Color) -> OverlayResult<Arc<Self>> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(OverlayError::config("legend", "legend key must not be empty"));
        }
        Ok(Arc::new(Self { key, color }))
    }

    /// Create a legend entry whose color comes from the color scheme.
    ///
    /// # Arguments
    ///
    /// * `colors` - The color scheme to consult
    /// * `layer_id` - The layer section to look in
    /// * `color_key` - The color name within the layer section
    /// * `key` - Translation key for the display name
    /// * `default` - Color to use if the scheme doesn't override it
    pub fn from_scheme(
        colors: &dyn ColorScheme,
        layer_id: &str,
        color_key: &str,
        key: impl Into<String>,
        default: Color,
    ) -> OverlayResult<Arc<Self>> {
        let color = colors.get(layer_id, color_key, default)?;
        Self::new(key, color)
    }
}

impl fmt::Display for LegendEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.key, self.color)
    }
}

/// Source of user color overrides, consulted only while constructing layers.
///
/// Implementations return `default` when they have no value for the key,
/// so a missing override never prevents a layer from being built. A value
/// that is present but unusable is reported as a configuration error.
pub trait ColorScheme {
    /// Get the color for `key` in the given layer.
    fn get(&self, layer_id: &str, key: &str, default: Color) -> OverlayResult<Color>;
}

/// Color scheme without overrides; every lookup returns the default.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultColorScheme;

impl ColorScheme for DefaultColorScheme {
    fn get(&self, _layer_id: &str, _key: &str, default: Color) -> OverlayResult<Color> {
        Ok(default)
    }
}
