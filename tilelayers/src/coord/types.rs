//! Tile position and area value types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A tile position on the world grid.
///
/// Positions are plain integer cell coordinates. Negative values are valid:
/// expanded search areas routinely reach past the map edge and callers
/// tolerate lookups there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TilePosition {
    /// Column (X coordinate, grows east)
    pub x: i32,
    /// Row (Y coordinate, grows south)
    pub y: i32,
}

impl TilePosition {
    /// Create a new tile position.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another tile, in tiles.
    ///
    /// Computed in single precision so radius checks agree with the host's
    /// own coverage rule.
    #[inline]
    pub fn distance(&self, other: &TilePosition) -> f32 {
        let dx = (i64::from(self.x) - i64::from(other.x)) as f32;
        let dy = (i64::from(self.y) - i64::from(other.y)) as f32;
        (dx * dx + dy * dy).sqrt()
    }

    /// Key used to iterate positions in row-major order.
    #[inline]
    pub fn row_major_key(&self) -> (i32, i32) {
        (self.y, self.x)
    }
}

impl fmt::Display for TilePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for TilePosition {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle of tiles.
///
/// The area covers columns `x..x + width` and rows `y..y + height`.
/// Width and height are never negative; a zero-sized area contains no tiles.
/// [`TileArea::new`] also keeps `x + width` and `y + height` within `i32`,
/// so column and row `i32::MAX` are never part of an area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TileArea {
    /// Left column
    pub x: i32,
    /// Top row
    pub y: i32,
    /// Width in tiles
    pub width: i32,
    /// Height in tiles
    pub height: i32,
}

impl TileArea {
    /// Create a new tile area.
    ///
    /// Negative sizes are clamped to zero, and sizes reaching past
    /// `i32::MAX` are cut at that edge.
    #[inline]
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width: clamp_extent(x, width),
            height: clamp_extent(y, height),
        }
    }

    /// The square area of side `2 * radius + 1` centred on `origin`.
    ///
    /// A non-positive radius yields an empty area anchored at the origin.
    pub fn around(origin: TilePosition, radius: i32) -> Self {
        if radius <= 0 {
            return Self::new(origin.x, origin.y, 0, 0);
        }
        let side = radius.saturating_mul(2).saturating_add(1);
        Self::new(
            origin.x.saturating_sub(radius),
            origin.y.saturating_sub(radius),
            side,
            side,
        )
    }

    /// Column just past the right edge.
    #[inline]
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Row just past the bottom edge.
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Number of tiles in the area.
    #[inline]
    pub fn tile_count(&self) -> usize {
        self.width.max(0) as usize * self.height.max(0) as usize
    }

    /// Whether the area contains no tiles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Whether the tile lies inside the area.
    #[inline]
    pub fn contains(&self, tile: &TilePosition) -> bool {
        tile.x >= self.x && tile.x < self.right() && tile.y >= self.y && tile.y < self.bottom()
    }

    /// Grow the area by `margin` tiles on every side.
    ///
    /// The result is not clipped to any world bounds. A negative margin
    /// shrinks the area, never below zero size.
    pub fn expand(&self, margin: i32) -> Self {
        Self::new(
            self.x.saturating_sub(margin),
            self.y.saturating_sub(margin),
            self.width.saturating_add(margin.saturating_mul(2)),
            self.height.saturating_add(margin.saturating_mul(2)),
        )
    }

    /// Overlap of two areas, or an empty area when they don't intersect.
    pub fn intersect(&self, other: &TileArea) -> Self {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= left || bottom <= top {
            return Self::new(left, top, 0, 0);
        }
        Self::new(
            left,
            top,
            clamp_extent(left, span(left, right)),
            clamp_extent(top, span(top, bottom)),
        )
    }

    /// Iterate every tile in the area.
    ///
    /// Tiles are yielded in row-major order (row `y` columns left to right,
    /// then row `y + 1`, ...). The iterator is cheap to clone, so the
    /// sequence can be restarted without materialising it.
    #[inline]
    pub fn tiles(&self) -> TileAreaIterator {
        TileAreaIterator {
            area: Self::new(self.x, self.y, self.width, self.height),
            current: 0,
        }
    }
}

/// Largest size not below zero that keeps `start + size` within `i32`.
fn clamp_extent(start: i32, size: i32) -> i32 {
    let room = i64::from(i32::MAX) - i64::from(start);
    i64::from(size).clamp(0, room.min(i64::from(i32::MAX))) as i32
}

/// Distance from `start` to `end`, saturated to `i32`.
fn span(start: i32, end: i32) -> i32 {
    (i64::from(end) - i64::from(start)).clamp(0, i64::from(i32::MAX)) as i32
}

impl fmt::Display for TileArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{}@({}, {})",
            self.width, self.height, self.x, self.y
        )
    }
}

impl IntoIterator for TileArea {
    type Item = TilePosition;
    type IntoIter = TileAreaIterator;

    fn into_iter(self) -> Self::IntoIter {
        self.tiles()
    }
}

/// Iterator over all tiles in a [`TileArea`].
#[derive(Debug, Clone)]
pub struct TileAreaIterator {
    area: TileArea,
    current: usize,
}

impl Iterator for TileAreaIterator {
    type Item = TilePosition;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current >= self.area.tile_count() {
            return None;
        }

        let width = self.area.width as usize;
        let row = (self.current / width) as i32;
        let col = (self.current % width) as i32;

        self.current += 1;

        Some(TilePosition::new(self.area.x + col, self.area.y + row))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.area.tile_count() - self.current;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for TileAreaIterator {
    fn len(&self) -> usize {
        self.area.tile_count() - self.current
    }
}
