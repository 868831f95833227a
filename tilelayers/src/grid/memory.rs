//! Map-backed grid snapshot.

use std::collections::HashMap;

use super::{Entity, Grid, TerrainFeature};
use crate::coord::TilePosition;
use crate::error::OverlayResult;

/// A world grid held entirely in memory.
///
/// Entities are indexed by their origin tile. Lookups outside the populated
/// tiles simply return `None`, so negative and out-of-map positions are safe.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGrid {
    entities: HashMap<TilePosition, Entity>,
    terrain: HashMap<TilePosition, TerrainFeature>,
}

impl InMemoryGrid {
    /// Create an empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Place an entity at its origin, replacing whatever was there.
    pub fn place_entity(&mut self, entity: Entity) {
        self.entities.insert(entity.origin, entity);
    }

    /// Set the terrain feature on a tile.
    pub fn set_terrain(&mut self, tile: TilePosition, feature: TerrainFeature) {
        self.terrain.insert(tile, feature);
    }

    /// Remove the entity at a tile.
    pub fn remove_entity(&mut self, tile: TilePosition) -> Option<Entity> {
        self.entities.remove(&tile)
    }

    /// Builder-style [`place_entity`](Self::place_entity).
    pub fn with_entity(mut self, entity: Entity) -> Self {
        self.place_entity(entity);
        self
    }

    /// Builder-style [`set_terrain`](Self::set_terrain).
    pub fn with_terrain(mut self, tile: TilePosition, feature: TerrainFeature) -> Self {
        self.set_terrain(tile, feature);
        self
    }

    /// Number of entities on the grid.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }
}

impl Grid for InMemoryGrid {
    fn entity_at(&self, tile: TilePosition) -> OverlayResult<Option<Entity>> {
        Ok(self.entities.get(&tile).cloned())
    }

    fn terrain_feature_at(&self, tile: TilePosition) -> OverlayResult<Option<TerrainFeature>> {
        Ok(self.terrain.get(&tile).copied())
    }
}
