//! Scarecrow coverage layer.

use std::collections::HashSet;
use std::sync::Arc;

use super::find_emitters;
use crate::color::Color;
use crate::config::LayerConfig;
use crate::coord::{visible_radius_coverage, TilePosition};
use crate::error::OverlayResult;
use crate::layer::{Layer, LayerMeta, UpdateContext};
use crate::legend::{ColorScheme, LegendEntry};
use crate::tile::{TileData, TileGroup};

/// Layer id, also used as the config and color section name.
pub const LAYER_ID: &str = "ScarecrowCoverage";

/// Maximum number of tiles beyond the visible area to search for scarecrows.
///
/// Scarecrows with a larger radius standing further off-screen are missed.
pub const MAX_SEARCH_RADIUS: i32 = 20;

/// Opacity factor applied to the placement preview.
pub const PREVIEW_OPACITY: f32 = 0.75;

/// Shows the tiles each scarecrow protects and the crops left exposed.
///
/// Each update yields, in order:
///
/// 1. One group per scarecrow found near the view, bordered in the selected
///    color when the scarecrow is under the cursor. A scarecrow covering no
///    visible tiles still gets an (empty) group.
/// 2. One group of exposed crops (visible crops outside every scarecrow's
///    coverage), which may be empty.
/// 3. A faded, non-exportable preview of the held scarecrow's coverage
///    around the cursor, when the player is holding one.
#[derive(Debug)]
pub struct ScarecrowLayer {
    meta: LayerMeta,
    covered: Arc<LegendEntry>,
    exposed: Arc<LegendEntry>,
    selected_color: Color,
}

impl ScarecrowLayer {
    /// Construct the layer.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the color scheme holds a malformed
    /// override for one of this layer's colors.
    pub fn new(config: &LayerConfig, colors: &dyn ColorScheme) -> OverlayResult<Self> {
        let selected_color = colors.get(LAYER_ID, "Selected", Color::BLUE)?;
        let covered = LegendEntry::from_scheme(
            colors,
            LAYER_ID,
            "Covered",
            "scarecrows.protected",
            Color::GREEN,
        )?;
        let exposed = LegendEntry::from_scheme(
            colors,
            LAYER_ID,
            "NotCovered",
            "scarecrows.exposed",
            Color::RED,
        )?;

        let meta = LayerMeta::new(
            LAYER_ID,
            "Scarecrows",
            config,
            vec![Arc::clone(&covered), Arc::clone(&exposed)],
        );

        Ok(Self {
            meta,
            covered,
            exposed,
            selected_color,
        })
    }

    /// Border color used for the scarecrow under the cursor and the preview.
    pub fn selected_color(&self) -> Color {
        self.selected_color
    }

    /// Visible crop tiles not in `covered`, in row-major order.
    fn exposed_crops(
        &self,
        ctx: &UpdateContext<'_>,
        covered: &HashSet<TilePosition>,
    ) -> OverlayResult<Vec<TilePosition>> {
        let mut exposed = Vec::new();
        for tile in ctx.sorted_visible_tiles() {
            if covered.contains(&tile) {
                continue;
            }
            if ctx
                .grid
                .terrain_feature_at(tile)?
                .is_some_and(|terrain| terrain.is_crop())
            {
                exposed.push(tile);
            }
        }
        Ok(exposed)
    }
}

impl Layer for ScarecrowLayer {
    fn meta(&self) -> &LayerMeta {
        &self.meta
    }

    fn update(&self, ctx: &UpdateContext<'_>) -> OverlayResult<Vec<TileGroup>> {
        let search_area = ctx.visible_area.expand(MAX_SEARCH_RADIUS);
        let scarecrows = find_emitters(ctx.grid, search_area, LAYER_ID, |e| {
            e.kind.is_scarecrow()
        })?;

        // scarecrow coverage
        let mut covered = HashSet::new();
        let mut groups = Vec::with_capacity(scarecrows.len() + 2);
        for scarecrow in &scarecrows {
            let tiles: Vec<TileData> =
                visible_radius_coverage(scarecrow.origin, scarecrow.radius, &ctx.visible_area)
                    .map(|pos| TileData::new(pos, &self.covered))
                    .collect();
            covered.extend(tiles.iter().map(|t| t.position));

            let border = if scarecrow.origin == ctx.cursor_tile {
                self.selected_color
            } else {
                self.covered.color
            };
            groups.push(TileGroup::new(tiles, Some(border)));
        }

        // exposed crops
        let exposed: Vec<TileData> = self
            .exposed_crops(ctx, &covered)?
            .into_iter()
            .map(|pos| TileData::new(pos, &self.exposed))
            .collect();

        // scarecrow being placed
        let preview = ctx
            .held_item
            .filter(|item| item.kind.is_scarecrow())
            .map(|held| {
                let placed = held.placed_at(ctx.cursor_tile);
                let faded = self.covered.color.scale(PREVIEW_OPACITY);
                let tiles = visible_radius_coverage(placed.origin, placed.radius, &ctx.visible_area)
                    .map(|pos| TileData::with_color(pos, &self.covered, faded));
                TileGroup::transient(tiles, Some(self.selected_color))
            });

        if scarecrows.is_empty() && exposed.is_empty() && preview.is_none() {
            return Ok(Vec::new());
        }
        groups.push(TileGroup::new(exposed, Some(self.exposed.color)));
        groups.extend(preview);

        tracing::trace!(
            layer = LAYER_ID,
            scarecrows = scarecrows.len(),
            covered = covered.len(),
            groups = groups.len(),
            "Scarecrow coverage computed"
        );

        Ok(groups)
    }
}
