//! Spatial primitives
//!
//! Provides the tile position and tile area value types used everywhere in
//! the overlay, plus the radius queries coverage layers are built on.
//!
//! # Coverage rule
//!
//! A tile is covered by an emitter when its Euclidean distance to the
//! emitter's origin is **strictly less** than the radius. Tiles at exactly
//! `radius` are outside. See [`radius_coverage`].

mod types;

pub use types::{TileArea, TileAreaIterator, TilePosition};

/// Euclidean distance between two tiles.
#[inline]
pub fn distance(a: &TilePosition, b: &TilePosition) -> f32 {
    a.distance(b)
}

/// Whether `tile` lies within `radius` of `origin`.
///
/// Boundary tiles (distance exactly equal to `radius`) are excluded.
#[inline]
pub fn is_within_radius(tile: &TilePosition, origin: &TilePosition, radius: i32) -> bool {
    tile.distance(origin) < radius as f32
}

/// Tiles covered by an emitter at `origin` with the given radius.
///
/// Scans the square [`TileArea::around`] the origin and keeps tiles strictly
/// inside the radius. A radius of zero or less covers nothing.
pub fn radius_coverage(
    origin: TilePosition,
    radius: i32,
) -> impl Iterator<Item = TilePosition> + Clone {
    TileArea::around(origin, radius)
        .tiles()
        .filter(move |tile| is_within_radius(tile, &origin, radius))
}

/// Like [`radius_coverage`], but clipped to `visible_area`.
///
/// Layers only emit tiles the player can see, so this is what they use;
/// the cost is bounded by the visible area rather than the radius.
pub fn visible_radius_coverage(
    origin: TilePosition,
    radius: i32,
    visible_area: &TileArea,
) -> impl Iterator<Item = TilePosition> + Clone {
    TileArea::around(origin, radius)
        .intersect(visible_area)
        .tiles()
        .filter(move |tile| is_within_radius(tile, &origin, radius))
}
