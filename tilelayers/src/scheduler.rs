//! Layer update scheduling.
//!
//! Recomputing a layer is far more expensive than drawing it, so layers are
//! recomputed on a cadence instead of every tick. A layer is due when:
//!
//! - it has never been computed (or was invalidated, or the host's tick
//!   counter went backwards), or
//! - at least `update_tick_rate` ticks have passed since its last update, or
//! - the visible tiles changed since the last tick and the layer asked to
//!   follow view changes.
//!
//! Layers that aren't due keep showing their last result.

use std::collections::HashMap;
use std::fmt;

use crate::layer::Layer;

/// Why a layer is being recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateReason {
    /// No usable history: never computed, invalidated, or the tick counter restarted.
    Forced,
    /// The layer's tick interval elapsed.
    Cadence,
    /// The visible tiles changed.
    VisibleTilesChanged,
}

impl UpdateReason {
    /// Get a short description for display.
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateReason::Forced => "forced",
            UpdateReason::Cadence => "cadence",
            UpdateReason::VisibleTilesChanged => "visible tiles changed",
        }
    }
}

impl fmt::Display for UpdateReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tracks when each layer was last recomputed.
#[derive(Debug, Clone, Default)]
pub struct UpdateScheduler {
    last_update: HashMap<String, u64>,
}

impl UpdateScheduler {
    /// Create a scheduler with no update history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide whether `layer` should be recomputed at `tick`.
    ///
    /// Returns the reason if it is due, `None` if its cached result should
    /// be reused. A `tick` earlier than the layer's last update means the
    /// host restarted its counter, so the layer is due straight away.
    pub fn check(
        &self,
        layer: &dyn Layer,
        tick: u64,
        visible_tiles_changed: bool,
    ) -> Option<UpdateReason> {
        let Some(&last) = self.last_update.get(layer.id()) else {
            return Some(UpdateReason::Forced);
        };

        let Some(elapsed) = tick.checked_sub(last) else {
            return Some(UpdateReason::Forced);
        };

        if elapsed >= u64::from(layer.update_tick_rate()) {
            Some(UpdateReason::Cadence)
        } else if visible_tiles_changed && layer.update_when_visible_tiles_change() {
            Some(UpdateReason::VisibleTilesChanged)
        } else {
            None
        }
    }

    /// Record that `layer_id` was recomputed at `tick`.
    pub fn mark_updated(&mut self, layer_id: &str, tick: u64) {
        self.last_update.insert(layer_id.to_string(), tick);
    }

    /// Tick of the layer's last recompute, if any.
    pub fn last_update(&self, layer_id: &str) -> Option<u64> {
        self.last_update.get(layer_id).copied()
    }

    /// Force `layer_id` to recompute on its next check.
    pub fn invalidate(&mut self, layer_id: &str) {
        self.last_update.remove(layer_id);
    }

    /// Force every layer to recompute on its next check.
    pub fn invalidate_all(&mut self) {
        self.last_update.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayerConfig;
    use crate::layer::{LayerMeta, UpdateContext};
    use crate::error::OverlayResult;
    use crate::tile::TileGroup;

    struct FixedLayer {
        meta: LayerMeta,
    }

    impl FixedLayer {
        fn new(updates_per_second: f64, follow_view: bool) -> Self {
            let config = LayerConfig::new()
                .with_updates_per_second(updates_per_second)
                .with_update_when_view_changes(follow_view);
            Self {
                meta: LayerMeta::new("Fixed", "Fixed", &config, Vec::new()),
            }
        }
    }

    impl Layer for FixedLayer {
        fn meta(&self) -> &LayerMeta {
            &self.meta
        }

        fn update(&self, _ctx: &UpdateContext<'_>) -> OverlayResult<Vec<TileGroup>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_first_check_is_forced() {
        let scheduler = UpdateScheduler::new();
        let layer = FixedLayer::new(2.0, false);
        assert_eq!(scheduler.check(&layer, 7, false), Some(UpdateReason::Forced));
    }

    #[test]
    fn test_cadence() {
        let mut scheduler = UpdateScheduler::new();
        let layer = FixedLayer::new(2.0, false);
        assert_eq!(layer.update_tick_rate(), 30);

        scheduler.mark_updated("Fixed", 0);
        assert_eq!(scheduler.check(&layer, 29, false), None);
        assert_eq!(scheduler.check(&layer, 30, false), Some(UpdateReason::Cadence));
    }

    #[test]
    fn test_view_change_ignored_without_flag() {
        let mut scheduler = UpdateScheduler::new();
        let layer = FixedLayer::new(2.0, false);
        scheduler.mark_updated("Fixed", 0);

        assert_eq!(scheduler.check(&layer, 5, true), None);
        assert_eq!(scheduler.check(&layer, 30, false), Some(UpdateReason::Cadence));
    }

    #[test]
    fn test_view_change_with_flag() {
        let mut scheduler = UpdateScheduler::new();
        let layer = FixedLayer::new(2.0, true);
        scheduler.mark_updated("Fixed", 0);

        assert_eq!(
            scheduler.check(&layer, 5, true),
            Some(UpdateReason::VisibleTilesChanged)
        );
        assert_eq!(scheduler.check(&layer, 6, false), None);
    }

    #[test]
    fn test_every_tick_rate() {
        let mut scheduler = UpdateScheduler::new();
        let layer = FixedLayer::new(60.0, false);
        scheduler.mark_updated("Fixed", 10);
        assert_eq!(scheduler.check(&layer, 10, false), None);
        assert_eq!(scheduler.check(&layer, 11, false), Some(UpdateReason::Cadence));
    }

    #[test]
    fn test_invalidate() {
        let mut scheduler = UpdateScheduler::new();
        let layer = FixedLayer::new(2.0, false);
        scheduler.mark_updated("Fixed", 0);
        assert_eq!(scheduler.last_update("Fixed"), Some(0));

        scheduler.invalidate("Fixed");
        assert_eq!(scheduler.last_update("Fixed"), None);
        assert_eq!(scheduler.check(&layer, 1, false), Some(UpdateReason::Forced));

        scheduler.mark_updated("Fixed", 1);
        scheduler.invalidate_all();
        assert_eq!(scheduler.check(&layer, 2, false), Some(UpdateReason::Forced));
    }

    #[test]
    fn test_tick_counter_reset_is_due() {
        let mut scheduler = UpdateScheduler::new();
        let layer = FixedLayer::new(2.0, false);
        scheduler.mark_updated("Fixed", 100);
        assert_eq!(scheduler.check(&layer, 50, false), Some(UpdateReason::Forced));

        // cadence resumes from the reset counter
        scheduler.mark_updated("Fixed", 50);
        assert_eq!(scheduler.check(&layer, 79, false), None);
        assert_eq!(scheduler.check(&layer, 80, false), Some(UpdateReason::Cadence));
    }

    #[test]
    fn test_reason_display() {
        assert_eq!(UpdateReason::Cadence.to_string(), "cadence");
        assert_eq!(
            UpdateReason::VisibleTilesChanged.to_string(),
            "visible tiles changed"
        );
    }
}
