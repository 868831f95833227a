//! Radius coverage layers.
//!
//! Coverage layers find every radius-emitting entity that could reach the
//! visible area, compute the tiles each one covers, and report the target
//! tiles no emitter reaches.
//!
//! # Search bound
//!
//! Emitters are searched for in the visible area expanded by a fixed
//! maximum radius. An emitter whose radius exceeds that bound and whose
//! origin lies further off-screen is not found; this keeps the search cost
//! proportional to the view, not the world.

mod scarecrow;

pub use scarecrow::{ScarecrowLayer, LAYER_ID as SCARECROW_LAYER_ID, MAX_SEARCH_RADIUS};

use crate::coord::TileArea;
use crate::error::OverlayResult;
use crate::grid::{Entity, Grid};

/// Entities in `search_area` accepted by `filter`, in row-major order.
///
/// Entities the grid reports as invalid are logged and skipped; query
/// failures abort the scan.
pub(crate) fn find_emitters(
    grid: &dyn Grid,
    search_area: TileArea,
    layer_id: &str,
    filter: impl Fn(&Entity) -> bool,
) -> OverlayResult<Vec<Entity>> {
    let mut found = Vec::new();
    for tile in search_area.tiles() {
        match grid.entity_at(tile) {
            Ok(Some(entity)) if filter(&entity) => found.push(entity),
            Ok(_) => {}
            Err(e) if e.is_skippable() => {
                tracing::warn!(layer = layer_id, error = %e, "Skipping invalid entity");
            }
            Err(e) => return Err(e),
        }
    }
    Ok(found)
}
