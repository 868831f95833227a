//! Crop readiness layer.

use std::sync::Arc;

use crate::color::Color;
use crate::config::LayerConfig;
use crate::error::OverlayResult;
use crate::grid::CropState;
use crate::layer::{Layer, LayerMeta, UpdateContext};
use crate::legend::{ColorScheme, LegendEntry};
use crate::tile::{TileData, TileGroup};

/// Layer id, also used as the config and color section name.
pub const LAYER_ID: &str = "CropHarvest";

/// Shows which visible crops are ready to harvest, still growing, or dead.
///
/// Emits one group per non-empty classification, in legend order.
#[derive(Debug)]
pub struct CropHarvestLayer {
    meta: LayerMeta,
    ready: Arc<LegendEntry>,
    not_ready: Arc<LegendEntry>,
    dead: Arc<LegendEntry>,
}

impl CropHarvestLayer {
    /// Construct the layer.
    pub fn new(config: &LayerConfig, colors: &dyn ColorScheme) -> OverlayResult<Self> {
        let ready =
            LegendEntry::from_scheme(colors, LAYER_ID, "Ready", "crop-harvest.ready", Color::GREEN)?;
        let not_ready = LegendEntry::from_scheme(
            colors,
            LAYER_ID,
            "NotReady",
            "crop-harvest.not-ready",
            Color::YELLOW,
        )?;
        let dead =
            LegendEntry::from_scheme(colors, LAYER_ID, "Dead", "crop-harvest.dead", Color::RED)?;

        let meta = LayerMeta::new(
            LAYER_ID,
            "Crops: ready to harvest",
            config,
            vec![Arc::clone(&ready), Arc::clone(&not_ready), Arc::clone(&dead)],
        );

        Ok(Self {
            meta,
            ready,
            not_ready,
            dead,
        })
    }

    fn legend_for(&self, state: CropState) -> &Arc<LegendEntry> {
        match state {
            CropState::Ready => &self.ready,
            CropState::Growing => &self.not_ready,
            CropState::Dead => &self.dead,
        }
    }
}

impl Layer for CropHarvestLayer {
    fn meta(&self) -> &LayerMeta {
        &self.meta
    }

    fn update(&self, ctx: &UpdateContext<'_>) -> OverlayResult<Vec<TileGroup>> {
        let mut ready = Vec::new();
        let mut not_ready = Vec::new();
        let mut dead = Vec::new();

        for tile in ctx.sorted_visible_tiles() {
            let Some(state) = ctx
                .grid
                .terrain_feature_at(tile)?
                .and_then(|t| t.crop_state())
            else {
                continue;
            };
            let data = TileData::new(tile, self.legend_for(state));
            match state {
                CropState::Ready => ready.push(data),
                CropState::Growing => not_ready.push(data),
                CropState::Dead => dead.push(data),
            }
        }

        Ok([
            (ready, &self.ready),
            (not_ready, &self.not_ready),
            (dead, &self.dead),
        ]
        .into_iter()
        .filter(|(tiles, _)| !tiles.is_empty())
        .map(|(tiles, legend)| TileGroup::new(tiles, Some(legend.color)))
        .collect())
    }
}
