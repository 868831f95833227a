//! TileLayers - tile-grid data overlays
//!
//! This library classifies the visible tiles of a 2D world grid into
//! colored groups ("data layers") that a host renders on top of the map:
//! which crops a scarecrow protects, which are exposed, which are ready to
//! harvest, and where a held scarecrow would reach if placed.
//!
//! # Overview
//!
//! - [`coord`]: tile positions, areas and the radius coverage rule
//! - [`grid`]: the read-only world query interface layers run against
//! - [`layer`]: the layer contract and the built-in layers
//! - [`scheduler`]: decides when each layer is recomputed
//! - [`overlay`]: drives the active layer each tick and caches its groups
//! - [`export`]: JSON snapshots of a layer's groups
//! - [`config`]: INI settings, color schemes and shortcuts
//!
//! # Example
//!
//! ```
//! use tilelayers::config::OverlayConfig;
//! use tilelayers::coord::{TileArea, TilePosition};
//! use tilelayers::grid::{Entity, InMemoryGrid};
//! use tilelayers::layer::LayerRegistry;
//! use tilelayers::legend::DefaultColorScheme;
//! use tilelayers::overlay::{OverlayCoordinator, StaticViewport};
//!
//! let mut overlay = OverlayCoordinator::from_registry(
//!     &LayerRegistry::with_builtin(),
//!     &OverlayConfig::new(),
//!     &DefaultColorScheme,
//! );
//! let grid = InMemoryGrid::new().with_entity(Entity::scarecrow(TilePosition::new(5, 5), 3));
//! let view = StaticViewport::new(TileArea::new(0, 0, 10, 10), TilePosition::new(0, 0));
//!
//! overlay.tick(0, &view, &grid, None);
//!
//! // one coverage group, then the (empty) exposed-crops group
//! assert_eq!(overlay.current_groups().len(), 2);
//! ```

pub mod color;
pub mod config;
pub mod coord;
pub mod error;
pub mod export;
pub mod grid;
pub mod layer;
pub mod legend;
pub mod logging;
pub mod overlay;
pub mod scheduler;
pub mod tile;

pub use error::{OverlayError, OverlayResult};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_matches_package() {
        assert!(!VERSION.is_empty());
        assert_eq!(VERSION.split('.').count(), 3);
    }
}
