//! Export of layer data for reports and snapshots.
//!
//! Only exportable groups are written; placement previews and other
//! transient groups are drawn live but never saved.

use serde::{Deserialize, Serialize};

use crate::error::OverlayResult;
use crate::layer::Layer;
use crate::tile::TileGroup;

/// A legend entry as written to an export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedLegend {
    /// Translation key of the entry.
    pub key: String,
    /// Entry color as `#RRGGBB` or `#RRGGBBAA`.
    pub color: String,
}

/// A classified tile as written to an export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedTile {
    /// Tile column.
    pub x: i32,
    /// Tile row.
    pub y: i32,
    /// Legend key the tile is classified under.
    pub legend: String,
    /// Color the tile is drawn in, overrides included.
    pub color: String,
}

/// A tile group as written to an export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedGroup {
    /// Outer border color, if the group has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    /// Tiles in emission order.
    pub tiles: Vec<ExportedTile>,
}

/// Snapshot of one layer's current data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerExport {
    /// Id of the exported layer.
    pub layer_id: String,
    /// Display name of the exported layer.
    pub layer_name: String,
    /// Legend entries in display order.
    pub legend: Vec<ExportedLegend>,
    /// Exportable groups in emission order.
    pub groups: Vec<ExportedGroup>,
}

impl LayerExport {
    /// Render the export as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> OverlayResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Total number of exported tiles.
    pub fn tile_count(&self) -> usize {
        self.groups.iter().map(|g| g.tiles.len()).sum()
    }
}

/// Build an export of `groups` for `layer`, leaving out non-exportable groups.
pub fn export_layer(layer: &dyn Layer, groups: &[TileGroup]) -> LayerExport {
    let legend = layer
        .legend()
        .iter()
        .map(|entry| ExportedLegend {
            key: entry.key.clone(),
            color: entry.color.to_string(),
        })
        .collect();

    let groups = groups
        .iter()
        .filter(|group| group.exportable)
        .map(|group| ExportedGroup {
            border_color: group.outer_border_color.map(|c| c.to_string()),
            tiles: group
                .tiles
                .iter()
                .map(|tile| ExportedTile {
                    x: tile.position.x,
                    y: tile.position.y,
                    legend: tile.legend.key.clone(),
                    color: tile.color().to_string(),
                })
                .collect(),
        })
        .collect();

    LayerExport {
        layer_id: layer.id().to_string(),
        layer_name: layer.name().to_string(),
        legend,
        groups,
    }
}
