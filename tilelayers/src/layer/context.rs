//! Inputs passed to a layer update.

use std::collections::HashSet;

use crate::coord::{TileArea, TilePosition};
use crate::grid::{Grid, HeldItem};

/// Everything a layer may read during one update.
///
/// Host state that would otherwise be global (the held item, the cursor)
/// is passed in explicitly so updates stay a function of their inputs.
#[derive(Clone, Copy)]
pub struct UpdateContext<'a> {
    /// Read-only world grid.
    pub grid: &'a dyn Grid,
    /// Tile area currently visible on screen.
    pub visible_area: TileArea,
    /// Tile positions currently visible on screen.
    pub visible_tiles: &'a HashSet<TilePosition>,
    /// Tile under the cursor.
    pub cursor_tile: TilePosition,
    /// Item the player is holding, if any.
    pub held_item: Option<&'a HeldItem>,
}

impl<'a> UpdateContext<'a> {
    /// Create a context with no held item.
    pub fn new(
        grid: &'a dyn Grid,
        visible_area: TileArea,
        visible_tiles: &'a HashSet<TilePosition>,
        cursor_tile: TilePosition,
    ) -> Self {
        Self {
            grid,
            visible_area,
            visible_tiles,
            cursor_tile,
            held_item: None,
        }
    }

    /// Set the held item.
    pub fn with_held_item(mut self, held_item: Option<&'a HeldItem>) -> Self {
        self.held_item = held_item;
        self
    }

    /// Visible tiles in row-major order.
    ///
    /// The visible set is unordered; layers iterate this instead so their
    /// output is reproducible.
    pub fn sorted_visible_tiles(&self) -> Vec<TilePosition> {
        let mut tiles: Vec<TilePosition> = self.visible_tiles.iter().copied().collect();
        tiles.sort_unstable_by_key(TilePosition::row_major_key);
        tiles
    }
}

impl std::fmt::Debug for UpdateContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateContext")
            .field("visible_area", &self.visible_area)
            .field("visible_tiles", &self.visible_tiles.len())
            .field("cursor_tile", &self.cursor_tile)
            .field("held_item", &self.held_item)
            .finish_non_exhaustive()
    }
}
