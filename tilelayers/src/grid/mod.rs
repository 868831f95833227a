//! Host world query interface.
//!
//! Layers never own the world: they read it through the [`Grid`] trait,
//! which the host implements over its own tile storage. Queries are
//! synchronous, in-memory and read-only.
//!
//! [`InMemoryGrid`] is a simple map-backed implementation used by tests and
//! by hosts that snapshot their world into plain data.

mod memory;
mod model;

pub use memory::InMemoryGrid;
pub use model::{CropState, Entity, EntityKind, HeldItem, TerrainFeature};

use crate::coord::TilePosition;
use crate::error::OverlayResult;

/// Read-only view of the world grid.
///
/// # Errors
///
/// Implementations return [`OverlayError::QueryFailure`] when a tile can't
/// be queried, and [`OverlayError::InvalidEntityData`] when an entity is
/// present but can't be described.
///
/// [`OverlayError::QueryFailure`]: crate::error::OverlayError::QueryFailure
/// [`OverlayError::InvalidEntityData`]: crate::error::OverlayError::InvalidEntityData
pub trait Grid {
    /// Get the entity occupying a tile, if any.
    fn entity_at(&self, tile: TilePosition) -> OverlayResult<Option<Entity>>;

    /// Get the terrain feature on a tile, if any.
    fn terrain_feature_at(&self, tile: TilePosition) -> OverlayResult<Option<TerrainFeature>>;
}

impl<G: Grid + ?Sized> Grid for &G {
    fn entity_at(&self, tile: TilePosition) -> OverlayResult<Option<Entity>> {
        (**self).entity_at(tile)
    }

    fn terrain_feature_at(&self, tile: TilePosition) -> OverlayResult<Option<TerrainFeature>> {
        (**self).terrain_feature_at(tile)
    }
}
