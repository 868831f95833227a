//! End-to-end tests driving the overlay coordinator against an in-memory grid.

use std::cell::Cell;
use std::collections::HashSet;
use std::fs;

use tilelayers::color::Color;
use tilelayers::config::{IniColorScheme, LayerConfig, OverlayConfig};
use tilelayers::coord::{TileArea, TilePosition};
use tilelayers::grid::{
    CropState, Entity, EntityKind, Grid, HeldItem, InMemoryGrid, TerrainFeature,
};
use tilelayers::layer::{Layer, LayerRegistry, ScarecrowLayer};
use tilelayers::legend::DefaultColorScheme;
use tilelayers::overlay::{LayerStats, OverlayCoordinator, StaticViewport};
use tilelayers::scheduler::UpdateReason;
use tilelayers::{OverlayError, OverlayResult};

fn crop() -> TerrainFeature {
    TerrainFeature::crop(CropState::Growing)
}

fn view() -> StaticViewport {
    StaticViewport::new(TileArea::new(10, 10, 5, 5), TilePosition::new(10, 10))
}

fn scarecrow_overlay(config: LayerConfig) -> OverlayCoordinator {
    let layer = ScarecrowLayer::new(&config, &DefaultColorScheme).unwrap();
    OverlayCoordinator::new(vec![Box::new(layer)])
}

/// Grid wrapper that can be switched into failing every query.
struct Unreliable {
    inner: InMemoryGrid,
    failing: Cell<bool>,
}

impl Grid for Unreliable {
    fn entity_at(&self, tile: TilePosition) -> OverlayResult<Option<Entity>> {
        if self.failing.get() {
            return Err(OverlayError::query_failure(tile, "location unloaded"));
        }
        self.inner.entity_at(tile)
    }

    fn terrain_feature_at(&self, tile: TilePosition) -> OverlayResult<Option<TerrainFeature>> {
        if self.failing.get() {
            return Err(OverlayError::query_failure(tile, "location unloaded"));
        }
        self.inner.terrain_feature_at(tile)
    }
}

#[test]
fn test_slow_layer_ignores_scroll_until_cadence() {
    let config = LayerConfig::new()
        .with_updates_per_second(2.0)
        .with_update_when_view_changes(false);
    let mut overlay = scarecrow_overlay(config);
    let grid = InMemoryGrid::new().with_entity(Entity::scarecrow(TilePosition::new(12, 12), 2));

    assert_eq!(overlay.tick(0, &view(), &grid, None), Some(UpdateReason::Forced));
    let before: HashSet<_> = overlay.current_groups()[0].positions().collect();

    let scrolled = view().scrolled(3, 0);
    for tick in 1..30 {
        assert_eq!(overlay.tick(tick, &scrolled, &grid, None), None, "tick {tick}");
    }
    let stale: HashSet<_> = overlay.current_groups()[0].positions().collect();
    assert_eq!(stale, before, "stale groups shown until the layer is due");

    assert_eq!(overlay.tick(30, &scrolled, &grid, None), Some(UpdateReason::Cadence));
    let after: HashSet<_> = overlay.current_groups()[0].positions().collect();
    assert!(after.iter().all(|t| t.x >= 13), "coverage clipped to the new view");
    assert_eq!(overlay.stats("ScarecrowCoverage").updates, 2);
}

#[test]
fn test_covered_and_exposed_crops() {
    let mut overlay = scarecrow_overlay(LayerConfig::default());
    let grid = InMemoryGrid::new()
        .with_entity(Entity::scarecrow(TilePosition::new(11, 11), 3))
        .with_terrain(TilePosition::new(12, 12), crop())
        .with_terrain(TilePosition::new(14, 11), crop())
        .with_terrain(TilePosition::new(14, 14), crop());

    overlay.tick(0, &view(), &grid, None);
    let groups = overlay.current_groups();
    assert_eq!(groups.len(), 2);

    let covered: HashSet<_> = groups[0].positions().collect();
    assert!(covered.contains(&TilePosition::new(12, 12)));
    assert!(
        !covered.contains(&TilePosition::new(14, 11)),
        "distance exactly equal to the radius is not covered"
    );
    assert_eq!(groups[0].outer_border_color, Some(Color::GREEN));

    let exposed: Vec<_> = groups[1].positions().collect();
    assert_eq!(
        exposed,
        vec![TilePosition::new(14, 11), TilePosition::new(14, 14)]
    );
    assert!(groups[1].tiles.iter().all(|t| t.color() == Color::RED));

    let legend: Vec<_> = overlay.active_legend().iter().map(|l| l.key.as_str()).collect();
    assert_eq!(legend, vec!["scarecrows.protected", "scarecrows.exposed"]);
}

#[test]
fn test_nothing_visible_yields_no_groups() {
    let mut overlay = scarecrow_overlay(LayerConfig::default());
    let grid = InMemoryGrid::new().with_terrain(TilePosition::new(100, 100), crop());

    assert_eq!(overlay.tick(0, &view(), &grid, None), Some(UpdateReason::Forced));
    assert!(overlay.current_groups().is_empty());
}

#[test]
fn test_held_scarecrow_preview_is_not_exported() {
    let mut overlay = scarecrow_overlay(LayerConfig::default());
    let grid = InMemoryGrid::new().with_terrain(TilePosition::new(14, 14), crop());
    let held = HeldItem::new(EntityKind::Scarecrow, 2);
    let at_center = view().with_cursor(TilePosition::new(12, 12));

    overlay.tick(0, &at_center, &grid, Some(&held));
    let groups = overlay.current_groups();
    assert_eq!(groups.len(), 2, "exposed crop, then preview");

    let preview = &groups[1];
    assert!(!preview.exportable);
    assert_eq!(preview.outer_border_color, Some(Color::BLUE));
    assert!(preview.positions().any(|t| t == TilePosition::new(12, 12)));
    assert!(preview
        .tiles
        .iter()
        .all(|t| t.color() == Color::GREEN.scale(0.75)));

    let export = overlay.export().unwrap();
    assert_eq!(export.groups.len(), 1);
    assert_eq!(export.groups[0].tiles[0].legend, "scarecrows.exposed");
    assert!(export.to_json_pretty().unwrap().contains("\"layer_id\": \"ScarecrowCoverage\""));
}

#[test]
fn test_holding_other_item_shows_no_preview() {
    let mut overlay = scarecrow_overlay(LayerConfig::default());
    let grid = InMemoryGrid::new();
    let held = HeldItem::new(EntityKind::Sprinkler, 2);

    overlay.tick(0, &view(), &grid, Some(&held));
    assert!(overlay.current_groups().is_empty());
}

#[test]
fn test_query_failure_degrades_to_empty_groups() {
    let config = LayerConfig::new()
        .with_updates_per_second(2.0)
        .with_update_when_view_changes(false);
    let mut overlay = scarecrow_overlay(config);
    let grid = Unreliable {
        inner: InMemoryGrid::new().with_entity(Entity::scarecrow(TilePosition::new(12, 12), 2)),
        failing: Cell::new(false),
    };

    overlay.tick(0, &view(), &grid, None);
    assert_eq!(overlay.current_groups().len(), 2);

    grid.failing.set(true);
    assert_eq!(overlay.tick(30, &view(), &grid, None), Some(UpdateReason::Cadence));
    assert!(overlay.current_groups().is_empty());

    grid.failing.set(false);
    assert_eq!(overlay.tick(60, &view(), &grid, None), Some(UpdateReason::Cadence));
    assert_eq!(overlay.current_groups().len(), 2, "recovers on the next due tick");
    assert_eq!(
        overlay.stats("ScarecrowCoverage"),
        LayerStats {
            updates: 2,
            failures: 1
        }
    );
}

#[test]
fn test_invalid_entity_is_skipped() {
    struct Corrupt(InMemoryGrid);

    impl Grid for Corrupt {
        fn entity_at(&self, tile: TilePosition) -> OverlayResult<Option<Entity>> {
            if tile == TilePosition::new(10, 10) {
                return Err(OverlayError::invalid_entity(tile, "unknown entity kind"));
            }
            self.0.entity_at(tile)
        }

        fn terrain_feature_at(&self, tile: TilePosition) -> OverlayResult<Option<TerrainFeature>> {
            self.0.terrain_feature_at(tile)
        }
    }

    let mut overlay = scarecrow_overlay(LayerConfig::default());
    let grid = Corrupt(InMemoryGrid::new().with_entity(Entity::scarecrow(TilePosition::new(13, 13), 2)));

    overlay.tick(0, &view(), &grid, None);
    assert_eq!(overlay.current_groups().len(), 2);
    assert!(!overlay.current_groups()[0].is_empty());
    assert_eq!(overlay.stats("ScarecrowCoverage").failures, 0);
}

#[test]
fn test_failing_layer_is_skipped_at_startup() {
    let colors =
        IniColorScheme::from_ini_str("[colors.ScarecrowCoverage]\nCovered = not-a-color\n").unwrap();
    let overlay = OverlayCoordinator::from_registry(
        &LayerRegistry::with_builtin(),
        &OverlayConfig::new(),
        &colors,
    );

    let ids: Vec<_> = overlay.layers().map(|l| l.id()).collect();
    assert_eq!(ids, vec!["CropHarvest"]);
    assert_eq!(overlay.active_id(), Some("CropHarvest"));
}

#[test]
fn test_config_file_drives_overlay() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.ini");
    fs::write(
        &path,
        "[layer.ScarecrowCoverage]\n\
         updates_per_second = 4\n\
         shortcut = F2\n\
         \n\
         [layer.CropHarvest]\n\
         shortcut = LeftShift + F3\n\
         always_show_grid = true\n\
         \n\
         [colors.CropHarvest]\n\
         Ready = #00FFFF\n",
    )
    .unwrap();

    let (config, colors) = OverlayConfig::load(&path).unwrap();
    let mut overlay =
        OverlayCoordinator::from_registry(&LayerRegistry::with_builtin(), &config, &colors);
    assert_eq!(overlay.active_layer().map(|l| l.update_tick_rate()), Some(15));
    assert!(!overlay.shows_grid());

    assert_eq!(overlay.activate_by_shortcut(&["LeftShift", "F3"]), Some("CropHarvest"));
    assert!(overlay.shows_grid());

    let grid = InMemoryGrid::new()
        .with_terrain(TilePosition::new(11, 11), TerrainFeature::crop(CropState::Ready))
        .with_terrain(TilePosition::new(12, 11), TerrainFeature::crop(CropState::Dead));
    assert_eq!(overlay.tick(0, &view(), &grid, None), Some(UpdateReason::Forced));

    let groups = overlay.current_groups();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].tiles[0].color(), Color::rgb(0, 255, 255));
    assert_eq!(groups[1].tiles[0].legend.key, "crop-harvest.dead");
}

#[test]
fn test_switching_layers_forces_update() {
    let mut overlay = OverlayCoordinator::from_registry(
        &LayerRegistry::with_builtin(),
        &OverlayConfig::new()
            .with_layer("CropHarvest", LayerConfig::new().with_updates_per_second(1.0)),
        &DefaultColorScheme,
    );
    let grid = InMemoryGrid::new()
        .with_entity(Entity::scarecrow(TilePosition::new(12, 12), 2))
        .with_terrain(TilePosition::new(14, 14), TerrainFeature::crop(CropState::Ready));

    overlay.tick(0, &view(), &grid, None);
    assert_eq!(overlay.current_groups().len(), 2);

    assert_eq!(overlay.next_layer(), Some("CropHarvest"));
    assert!(overlay.current_groups().is_empty());
    assert_eq!(overlay.tick(1, &view(), &grid, None), Some(UpdateReason::Forced));
    assert_eq!(overlay.current_groups().len(), 1);
    assert_eq!(overlay.tick(2, &view(), &grid, None), None);

    assert_eq!(overlay.previous_layer(), Some("ScarecrowCoverage"));
    assert_eq!(overlay.tick(3, &view(), &grid, None), Some(UpdateReason::Forced));
}
