//! Entity and terrain data returned by grid queries.

use std::fmt;

use crate::coord::TilePosition;

/// What kind of object an entity is.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Protects crops within its radius.
    Scarecrow,
    /// Waters tiles around it.
    Sprinkler,
    /// Anything else, by host item name.
    Other(String),
}

impl EntityKind {
    /// Whether this kind emits a protective radius.
    pub fn is_scarecrow(&self) -> bool {
        matches!(self, EntityKind::Scarecrow)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Scarecrow => write!(f, "scarecrow"),
            EntityKind::Sprinkler => write!(f, "sprinkler"),
            EntityKind::Other(name) => write!(f, "{}", name),
        }
    }
}

/// An object placed on the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    /// The entity kind.
    pub kind: EntityKind,
    /// The tile the entity stands on.
    pub origin: TilePosition,
    /// Effect radius in tiles (0 for entities without one).
    pub radius: i32,
}

impl Entity {
    /// Create a new entity.
    pub fn new(kind: EntityKind, origin: TilePosition, radius: i32) -> Self {
        Self {
            kind,
            origin,
            radius,
        }
    }

    /// Create a scarecrow with the given radius.
    pub fn scarecrow(origin: TilePosition, radius: i32) -> Self {
        Self::new(EntityKind::Scarecrow, origin, radius)
    }
}

/// Growth state of a planted crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CropState {
    /// Still growing.
    Growing,
    /// Ready to harvest.
    Ready,
    /// Dead (out of season or unwatered).
    Dead,
}

/// A feature on the ground of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerrainFeature {
    /// Tilled soil, optionally planted.
    HoeDirt { crop: Option<CropState> },
    /// Grass.
    Grass,
    /// A tree.
    Tree,
    /// Paving or flooring.
    Flooring,
}

impl TerrainFeature {
    /// Tilled soil holding a crop in the given state.
    pub fn crop(state: CropState) -> Self {
        TerrainFeature::HoeDirt { crop: Some(state) }
    }

    /// The crop planted here, if any.
    pub fn crop_state(&self) -> Option<CropState> {
        match self {
            TerrainFeature::HoeDirt { crop } => *crop,
            _ => None,
        }
    }

    /// Whether a crop is planted on this feature.
    pub fn is_crop(&self) -> bool {
        self.crop_state().is_some()
    }
}

/// The item the player is holding, which may be placed at the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeldItem {
    /// What would be placed.
    pub kind: EntityKind,
    /// Effect radius once placed.
    pub radius: i32,
}

impl HeldItem {
    /// Create a held item.
    pub fn new(kind: EntityKind, radius: i32) -> Self {
        Self { kind, radius }
    }

    /// The entity this item would become if placed at `tile`.
    pub fn placed_at(&self, tile: TilePosition) -> Entity {
        Entity::new(self.kind.clone(), tile, self.radius)
    }
}
