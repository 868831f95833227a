//! Data layer contract.
//!
//! A data layer classifies the visible tiles for one overlay mode. Every
//! layer carries the same metadata ([`LayerMeta`]) and implements one
//! operation, [`Layer::update`], which turns the current view of the grid
//! into a list of [`TileGroup`]s.
//!
//! # Contract
//!
//! - Only entities and terrain that can affect the visible area are read;
//!   layers never scan the whole grid.
//! - `update` is a pure function of its inputs: the same grid snapshot and
//!   view produce equivalent groups.
//! - Nothing of interest on screen yields an empty list, not an error.
//!
//! # Available Layers
//!
//! - [`ScarecrowLayer`]: scarecrow coverage and exposed crops
//! - [`CropHarvestLayer`]: crop readiness

mod context;
pub mod coverage;
pub mod crops;
mod registry;

pub use context::UpdateContext;
pub use coverage::ScarecrowLayer;
pub use crops::CropHarvestLayer;
pub use registry::{LayerFactory, LayerRegistry};

use std::sync::Arc;

use crate::config::{KeybindList, LayerConfig};
use crate::error::OverlayResult;
use crate::legend::LegendEntry;
use crate::tile::TileGroup;

/// Metadata shared by every layer.
#[derive(Debug, Clone)]
pub struct LayerMeta {
    /// Unique layer id (also the config and color section name).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Ticks between forced recomputes.
    pub update_tick_rate: u32,
    /// Whether a change in visible tiles forces a recompute.
    pub update_when_visible_tiles_change: bool,
    /// Legend entries, in display order.
    pub legend: Vec<Arc<LegendEntry>>,
    /// Keys which activate the layer.
    pub shortcut: KeybindList,
    /// Whether to always show the tile grid.
    pub always_show_grid: bool,
}

impl LayerMeta {
    /// Build layer metadata from its settings.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        config: &LayerConfig,
        legend: Vec<Arc<LegendEntry>>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            update_tick_rate: config.update_tick_rate(),
            update_when_visible_tiles_change: config.update_when_view_changes,
            legend,
            shortcut: config.shortcut.clone(),
            always_show_grid: config.always_show_grid,
        }
    }
}

/// A pluggable tile classification algorithm.
///
/// Implementors provide [`meta`](Layer::meta) and [`update`](Layer::update);
/// the accessors are derived from the metadata.
pub trait Layer {
    /// The layer's metadata.
    fn meta(&self) -> &LayerMeta;

    /// Compute the tile groups for the current view.
    ///
    /// # Errors
    ///
    /// Returns the grid's [`QueryFailure`](crate::error::OverlayError::QueryFailure)
    /// when the world can't be read. Invalid entity data is skipped, not returned.
    fn update(&self, ctx: &UpdateContext<'_>) -> OverlayResult<Vec<TileGroup>>;

    /// Unique layer id.
    fn id(&self) -> &str {
        &self.meta().id
    }

    /// Display name.
    fn name(&self) -> &str {
        &self.meta().name
    }

    /// Ticks between forced recomputes.
    fn update_tick_rate(&self) -> u32 {
        self.meta().update_tick_rate
    }

    /// Whether a change in visible tiles forces a recompute.
    fn update_when_visible_tiles_change(&self) -> bool {
        self.meta().update_when_visible_tiles_change
    }

    /// Legend entries to display.
    fn legend(&self) -> &[Arc<LegendEntry>] {
        &self.meta().legend
    }

    /// Keys which activate the layer.
    fn shortcut(&self) -> &KeybindList {
        &self.meta().shortcut
    }

    /// Whether to always show the tile grid.
    fn always_show_grid(&self) -> bool {
        self.meta().always_show_grid
    }
}
