//! Viewport interface.

use std::collections::HashSet;

use crate::coord::{TileArea, TilePosition};

/// The host's view of the world, read once per tick.
pub trait Viewport {
    /// Tile area currently visible on screen.
    fn visible_area(&self) -> TileArea;

    /// Tile under the cursor.
    fn cursor_tile(&self) -> TilePosition;

    /// Tile positions currently visible on screen.
    ///
    /// Defaults to every tile in [`visible_area`](Viewport::visible_area);
    /// hosts with irregular views (zoomed UI, partially covered screens)
    /// can narrow it.
    fn visible_tiles(&self) -> HashSet<TilePosition> {
        self.visible_area().tiles().collect()
    }
}

/// A viewport with a fixed area and cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticViewport {
    /// Visible tile area.
    pub area: TileArea,
    /// Tile under the cursor.
    pub cursor: TilePosition,
}

impl StaticViewport {
    /// Create a viewport.
    pub fn new(area: TileArea, cursor: TilePosition) -> Self {
        Self { area, cursor }
    }

    /// The same view scrolled by `(dx, dy)` tiles; the cursor moves with it.
    pub fn scrolled(&self, dx: i32, dy: i32) -> Self {
        Self {
            area: TileArea::new(self.area.x + dx, self.area.y + dy, self.area.width, self.area.height),
            cursor: TilePosition::new(self.cursor.x + dx, self.cursor.y + dy),
        }
    }

    /// The same view with the cursor on another tile.
    pub fn with_cursor(&self, cursor: TilePosition) -> Self {
        Self { cursor, ..*self }
    }
}

impl Viewport for StaticViewport {
    fn visible_area(&self) -> TileArea {
        self.area
    }

    fn cursor_tile(&self) -> TilePosition {
        self.cursor
    }
}
