//! Per-layer settings.

use std::collections::BTreeMap;

use super::keybind::KeybindList;

/// Host ticks per second; cadence settings are expressed against this.
pub const TICKS_PER_SECOND: u32 = 60;

/// Default layer recompute rate.
pub const DEFAULT_UPDATES_PER_SECOND: f64 = 60.0;

/// Default for recomputing when the visible tiles change.
pub const DEFAULT_UPDATE_WHEN_VIEW_CHANGES: bool = true;

/// Settings for a single data layer.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerConfig {
    /// Whether the layer is offered at all.
    pub enabled: bool,

    /// How often to recompute the layer while it's shown.
    ///
    /// Between 0 (exclusive) and [`TICKS_PER_SECOND`]. Default: 60.
    pub updates_per_second: f64,

    /// Whether to recompute as soon as the visible tiles change.
    ///
    /// Default: true.
    pub update_when_view_changes: bool,

    /// Keys that switch straight to this layer.
    pub shortcut: KeybindList,

    /// Whether to draw the tile grid whenever this layer is active.
    pub always_show_grid: bool,
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            updates_per_second: DEFAULT_UPDATES_PER_SECOND,
            update_when_view_changes: DEFAULT_UPDATE_WHEN_VIEW_CHANGES,
            shortcut: KeybindList::none(),
            always_show_grid: false,
        }
    }
}

impl LayerConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ticks between forced recomputes, never less than one.
    pub fn update_tick_rate(&self) -> u32 {
        let rate = (TICKS_PER_SECOND as f64 / self.updates_per_second).round();
        if rate.is_finite() && rate >= 1.0 {
            rate as u32
        } else {
            1
        }
    }

    /// Set the update frequency.
    pub fn with_updates_per_second(mut self, updates_per_second: f64) -> Self {
        self.updates_per_second = updates_per_second;
        self
    }

    /// Set whether view changes trigger a recompute.
    pub fn with_update_when_view_changes(mut self, enabled: bool) -> Self {
        self.update_when_view_changes = enabled;
        self
    }

    /// Set the activation shortcut.
    pub fn with_shortcut(mut self, shortcut: KeybindList) -> Self {
        self.shortcut = shortcut;
        self
    }

    /// Enable or disable the layer.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Settings for every known layer, keyed by layer id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayConfig {
    /// Explicit per-layer settings.
    pub layers: BTreeMap<String, LayerConfig>,
}

impl OverlayConfig {
    /// Create an empty configuration; every layer uses defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings for a layer, falling back to defaults.
    pub fn layer(&self, id: &str) -> LayerConfig {
        self.layers.get(id).cloned().unwrap_or_default()
    }

    /// Builder-style setter for one layer's settings.
    pub fn with_layer(mut self, id: impl Into<String>, config: LayerConfig) -> Self {
        self.layers.insert(id.into(), config);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_config_default() {
        let config = LayerConfig::default();
        assert!(config.enabled);
        assert_eq!(config.updates_per_second, DEFAULT_UPDATES_PER_SECOND);
        assert!(config.update_when_view_changes);
        assert!(config.shortcut.is_empty());
        assert!(!config.always_show_grid);
    }

    #[test]
    fn test_update_tick_rate() {
        assert_eq!(LayerConfig::new().update_tick_rate(), 1);
        assert_eq!(
            LayerConfig::new().with_updates_per_second(2.0).update_tick_rate(),
            30
        );
        assert_eq!(
            LayerConfig::new().with_updates_per_second(0.5).update_tick_rate(),
            120
        );
    }

    #[test]
    fn test_update_tick_rate_never_zero() {
        assert_eq!(
            LayerConfig::new().with_updates_per_second(1000.0).update_tick_rate(),
            1
        );
        assert_eq!(
            LayerConfig::new().with_updates_per_second(0.0).update_tick_rate(),
            1
        );
    }

    #[test]
    fn test_overlay_config_fallback() {
        let config = OverlayConfig::new().with_layer(
            "ScarecrowCoverage",
            LayerConfig::new().with_enabled(false),
        );
        assert!(!config.layer("ScarecrowCoverage").enabled);
        assert!(config.layer("CropHarvest").enabled);
    }
}
