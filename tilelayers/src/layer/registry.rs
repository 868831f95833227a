//! Layer registry mapping ids to constructors.

use crate::config::{LayerConfig, OverlayConfig};
use crate::error::OverlayResult;
use crate::legend::ColorScheme;

use super::{coverage, crops, CropHarvestLayer, Layer, ScarecrowLayer};

/// Builds a layer from its settings and the color scheme.
pub type LayerFactory = fn(&LayerConfig, &dyn ColorScheme) -> OverlayResult<Box<dyn Layer>>;

/// Known layer types, in the order they are offered to the player.
#[derive(Clone, Default)]
pub struct LayerRegistry {
    factories: Vec<(String, LayerFactory)>,
}

impl std::fmt::Debug for LayerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayerRegistry")
            .field("ids", &self.ids().collect::<Vec<_>>())
            .finish()
    }
}

impl LayerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in layers.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(coverage::SCARECROW_LAYER_ID, |config, colors| {
            Ok(Box::new(ScarecrowLayer::new(config, colors)?))
        });
        registry.register(crops::LAYER_ID, |config, colors| {
            Ok(Box::new(CropHarvestLayer::new(config, colors)?))
        });
        registry
    }

    /// Register a layer type, replacing any previous factory with the same id.
    pub fn register(&mut self, id: impl Into<String>, factory: LayerFactory) {
        let id = id.into();
        if let Some(slot) = self.factories.iter_mut().find(|(known, _)| *known == id) {
            slot.1 = factory;
        } else {
            self.factories.push((id, factory));
        }
    }

    /// Registered layer ids, in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.factories.iter().map(|(id, _)| id.as_str())
    }

    /// Build a single layer by id, or `None` if the id isn't registered.
    pub fn build(
        &self,
        id: &str,
        config: &LayerConfig,
        colors: &dyn ColorScheme,
    ) -> Option<OverlayResult<Box<dyn Layer>>> {
        self.factories
            .iter()
            .find(|(known, _)| known == id)
            .map(|(_, factory)| factory(config, colors))
    }

    /// Build every enabled layer.
    ///
    /// A layer that fails to build is logged and left out; the others are
    /// still returned.
    pub fn build_all(&self, config: &OverlayConfig, colors: &dyn ColorScheme) -> Vec<Box<dyn Layer>> {
        let mut layers = Vec::with_capacity(self.factories.len());
        for (id, factory) in &self.factories {
            let layer_config = config.layer(id);
            if !layer_config.enabled {
                tracing::debug!(layer = %id, "Layer disabled in config");
                continue;
            }
            match factory(&layer_config, colors) {
                Ok(layer) => {
                    tracing::debug!(layer = %id, tick_rate = layer.update_tick_rate(), "Layer registered");
                    layers.push(layer);
                }
                Err(e) => {
                    tracing::warn!(layer = %id, error = %e, "Skipping layer that failed to build");
                }
            }
        }
        layers
    }
}
