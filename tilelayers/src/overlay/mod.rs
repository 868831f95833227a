//! Overlay coordinator.
//!
//! The coordinator owns the registered layers and shows one of them at a
//! time. Each host tick it:
//!
//! 1. reads the visible area, visible tiles and cursor from the [`Viewport`]
//! 2. asks the [`UpdateScheduler`] whether the active layer is due
//! 3. runs the layer's update against the grid and caches the groups
//!
//! The renderer draws [`current_groups`](OverlayCoordinator::current_groups)
//! and [`active_legend`](OverlayCoordinator::active_legend) between ticks.
//!
//! # Failure handling
//!
//! A layer whose update fails (typically a grid [`QueryFailure`]) shows no
//! groups until its next due tick; the overlay keeps running. Layers that
//! fail to build are dropped by the [`LayerRegistry`] before they get here.
//!
//! [`QueryFailure`]: crate::error::OverlayError::QueryFailure

mod view;

pub use view::{StaticViewport, Viewport};

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::OverlayConfig;
use crate::coord::{TileArea, TilePosition};
use crate::export::{export_layer, LayerExport};
use crate::grid::{Grid, HeldItem};
use crate::layer::{Layer, LayerRegistry, UpdateContext};
use crate::legend::{ColorScheme, LegendEntry};
use crate::scheduler::{UpdateReason, UpdateScheduler};
use crate::tile::TileGroup;

/// Per-layer update counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayerStats {
    /// Updates that produced groups.
    pub updates: u64,
    /// Updates that failed and were replaced by an empty result.
    pub failures: u64,
}

impl LayerStats {
    /// Total number of update attempts.
    pub fn attempts(&self) -> u64 {
        self.updates + self.failures
    }
}

/// Drives the active layer and caches its output for rendering.
pub struct OverlayCoordinator {
    layers: Vec<Box<dyn Layer>>,
    active: Option<usize>,
    scheduler: UpdateScheduler,
    visible_area: TileArea,
    visible_tiles: HashSet<TilePosition>,
    cursor_tile: TilePosition,
    groups: HashMap<String, Vec<TileGroup>>,
    grid_overrides: HashMap<String, bool>,
    stats: HashMap<String, LayerStats>,
    location: Option<String>,
}

impl OverlayCoordinator {
    /// Create a coordinator; the first layer (if any) starts active.
    pub fn new(layers: Vec<Box<dyn Layer>>) -> Self {
        let active = if layers.is_empty() { None } else { Some(0) };
        info!(
            layers = layers.len(),
            active = active.map(|i| layers[i].id()).unwrap_or("none"),
            "Overlay opened"
        );
        Self {
            layers,
            active,
            scheduler: UpdateScheduler::new(),
            visible_area: TileArea::default(),
            visible_tiles: HashSet::new(),
            cursor_tile: TilePosition::new(0, 0),
            groups: HashMap::new(),
            grid_overrides: HashMap::new(),
            stats: HashMap::new(),
            location: None,
        }
    }

    /// Build every enabled layer in `registry` and create a coordinator for them.
    pub fn from_registry(
        registry: &LayerRegistry,
        config: &OverlayConfig,
        colors: &dyn ColorScheme,
    ) -> Self {
        Self::new(registry.build_all(config, colors))
    }

    /// Run one host tick.
    ///
    /// Returns why the active layer was recomputed, or `None` if it wasn't
    /// (not due, or no active layer).
    pub fn tick(
        &mut self,
        tick: u64,
        viewport: &dyn Viewport,
        grid: &dyn Grid,
        held_item: Option<&HeldItem>,
    ) -> Option<UpdateReason> {
        let visible_tiles = viewport.visible_tiles();
        let visible_tiles_changed = visible_tiles != self.visible_tiles;
        if visible_tiles_changed {
            self.visible_tiles = visible_tiles;
        }
        self.visible_area = viewport.visible_area();
        self.cursor_tile = viewport.cursor_tile();

        let layer = self.layers.get(self.active?)?;
        let reason = self
            .scheduler
            .check(layer.as_ref(), tick, visible_tiles_changed)?;

        let ctx = UpdateContext::new(grid, self.visible_area, &self.visible_tiles, self.cursor_tile)
            .with_held_item(held_item);
        let stats = self.stats.entry(layer.id().to_string()).or_default();

        let groups = match layer.update(&ctx) {
            Ok(groups) => {
                stats.updates += 1;
                debug!(
                    layer = layer.id(),
                    tick,
                    reason = %reason,
                    groups = groups.len(),
                    "Layer recomputed"
                );
                groups
            }
            Err(e) => {
                stats.failures += 1;
                warn!(layer = layer.id(), tick, error = %e, "Layer update failed, showing no groups");
                Vec::new()
            }
        };

        self.groups.insert(layer.id().to_string(), groups);
        self.scheduler.mark_updated(layer.id(), tick);
        Some(reason)
    }

    /// Registered layers, in display order.
    pub fn layers(&self) -> impl Iterator<Item = &dyn Layer> {
        self.layers.iter().map(|l| l.as_ref())
    }

    /// Number of registered layers.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// The layer currently shown.
    pub fn active_layer(&self) -> Option<&dyn Layer> {
        self.active.and_then(|i| self.layers.get(i)).map(|l| l.as_ref())
    }

    /// Id of the layer currently shown.
    pub fn active_id(&self) -> Option<&str> {
        self.active_layer().map(|l| l.id())
    }

    /// Show the layer with `id`.
    ///
    /// Cached groups are dropped and the next tick recomputes the layer
    /// regardless of cadence. Returns `false` if no such layer is registered.
    pub fn activate(&mut self, id: &str) -> bool {
        match self.layers.iter().position(|l| l.id() == id) {
            Some(index) => {
                self.activate_index(index);
                true
            }
            None => false,
        }
    }

    /// Hide the overlay without unregistering any layer.
    pub fn deactivate(&mut self) {
        self.active = None;
        self.invalidate();
    }

    /// Switch to the next layer, wrapping around.
    pub fn next_layer(&mut self) -> Option<&str> {
        let count = self.layers.len();
        if count == 0 {
            return None;
        }
        let index = self.active.map_or(0, |i| (i + 1) % count);
        self.activate_index(index);
        Some(self.layers[index].id())
    }

    /// Switch to the previous layer, wrapping around.
    pub fn previous_layer(&mut self) -> Option<&str> {
        let count = self.layers.len();
        if count == 0 {
            return None;
        }
        let index = self.active.map_or(count - 1, |i| (i + count - 1) % count);
        self.activate_index(index);
        Some(self.layers[index].id())
    }

    /// Switch to the first layer whose shortcut is held in `pressed`.
    ///
    /// Returns the matched layer's id. Matching the already active layer
    /// leaves its cache alone.
    pub fn activate_by_shortcut<S: AsRef<str>>(&mut self, pressed: &[S]) -> Option<&str> {
        let index = self
            .layers
            .iter()
            .position(|l| l.shortcut().is_down(pressed))?;
        if self.active != Some(index) {
            self.activate_index(index);
        }
        Some(self.layers[index].id())
    }

    /// Re-sync with the world location being shown.
    ///
    /// Moving to a different location drops every cached result.
    pub fn set_location(&mut self, location_id: &str) {
        if self.location.as_deref() == Some(location_id) {
            return;
        }
        info!(
            from = self.location.as_deref().unwrap_or("none"),
            to = location_id,
            "Overlay location changed"
        );
        self.location = Some(location_id.to_string());
        self.invalidate();
    }

    /// Current world location, if one was set.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Latest groups for the active layer.
    ///
    /// Empty until the layer's first update, and after a failed update.
    pub fn current_groups(&self) -> &[TileGroup] {
        self.active_id()
            .and_then(|id| self.groups.get(id))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Legend entries of the active layer.
    pub fn active_legend(&self) -> &[Arc<LegendEntry>] {
        self.active_layer().map(|l| l.legend()).unwrap_or(&[])
    }

    /// Whether the tile grid should be drawn for the active layer.
    pub fn shows_grid(&self) -> bool {
        self.active_layer().is_some_and(|layer| {
            self.grid_overrides
                .get(layer.id())
                .copied()
                .unwrap_or_else(|| layer.always_show_grid())
        })
    }

    /// Flip grid display for the active layer and return the new state.
    pub fn toggle_grid(&mut self) -> bool {
        let Some(id) = self.active_id().map(str::to_string) else {
            return false;
        };
        let show = !self.shows_grid();
        debug!(layer = %id, show, "Grid toggled");
        self.grid_overrides.insert(id, show);
        show
    }

    /// Update counters for `layer_id`.
    pub fn stats(&self, layer_id: &str) -> LayerStats {
        self.stats.get(layer_id).copied().unwrap_or_default()
    }

    /// Visible area as of the last tick.
    pub fn visible_area(&self) -> TileArea {
        self.visible_area
    }

    /// Cursor tile as of the last tick.
    pub fn cursor_tile(&self) -> TilePosition {
        self.cursor_tile
    }

    /// Export the active layer's current groups.
    pub fn export(&self) -> Option<LayerExport> {
        self.active_layer()
            .map(|layer| export_layer(layer, self.current_groups()))
    }

    fn activate_index(&mut self, index: usize) {
        self.active = Some(index);
        self.invalidate();
        info!(layer = self.layers[index].id(), "Active layer switched");
    }

    fn invalidate(&mut self) {
        self.groups.clear();
        self.scheduler.invalidate_all();
    }
}

impl fmt::Debug for OverlayCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayCoordinator")
            .field("layers", &self.layers.iter().map(|l| l.id()).collect::<Vec<_>>())
            .field("active", &self.active_id())
            .field("visible_area", &self.visible_area)
            .field("cursor_tile", &self.cursor_tile)
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}
