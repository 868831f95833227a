//! Classified tiles and the groups layers emit them in.

use std::sync::Arc;

use crate::color::Color;
use crate::coord::TilePosition;
use crate::legend::LegendEntry;

/// One classified tile.
#[derive(Debug, Clone, PartialEq)]
pub struct TileData {
    /// The tile position.
    pub position: TilePosition,
    /// The classification this tile belongs to.
    pub legend: Arc<LegendEntry>,
    /// Color to draw instead of the legend color, if any.
    pub color_override: Option<Color>,
}

impl TileData {
    /// Create a tile drawn in its legend color.
    pub fn new(position: TilePosition, legend: &Arc<LegendEntry>) -> Self {
        Self {
            position,
            legend: Arc::clone(legend),
            color_override: None,
        }
    }

    /// Create a tile drawn in a specific color.
    pub fn with_color(position: TilePosition, legend: &Arc<LegendEntry>, color: Color) -> Self {
        Self {
            position,
            legend: Arc::clone(legend),
            color_override: Some(color),
        }
    }

    /// The color to draw this tile in.
    pub fn color(&self) -> Color {
        self.color_override.unwrap_or(self.legend.color)
    }
}

/// A cohesive set of tiles drawn with a shared outer border.
///
/// Grouping is semantic: the tiles needn't be contiguous. Groups marked as
/// not exportable (placement previews and the like) are drawn live but left
/// out of any saved or exported data.
#[derive(Debug, Clone, PartialEq)]
pub struct TileGroup {
    /// Tiles in the group, in emission order.
    pub tiles: Vec<TileData>,
    /// Border color drawn around the group, if any.
    pub outer_border_color: Option<Color>,
    /// Whether the group is included in exported data.
    pub exportable: bool,
}

impl TileGroup {
    /// Create an exportable group with the given border.
    pub fn new(tiles: impl IntoIterator<Item = TileData>, outer_border_color: Option<Color>) -> Self {
        Self {
            tiles: tiles.into_iter().collect(),
            outer_border_color,
            exportable: true,
        }
    }

    /// Create a group that is rendered but never exported.
    pub fn transient(
        tiles: impl IntoIterator<Item = TileData>,
        outer_border_color: Option<Color>,
    ) -> Self {
        Self {
            exportable: false,
            ..Self::new(tiles, outer_border_color)
        }
    }

    /// Number of tiles in the group.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the group has no tiles.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Iterate the tile positions in the group.
    pub fn positions(&self) -> impl Iterator<Item = TilePosition> + '_ {
        self.tiles.iter().map(|t| t.position)
    }
}
