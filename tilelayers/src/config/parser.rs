//! INI parsing logic for converting `Ini` → `OverlayConfig`.
//!
//! Layer settings live in `[layer.<Id>]` sections:
//!
//! ```ini
//! [layer.ScarecrowCoverage]
//! enabled = true
//! updates_per_second = 2
//! update_when_view_changes = true
//! shortcut = F2, LeftShift + S
//! always_show_grid = false
//! ```

use ini::Ini;

use super::keybind::KeybindList;
use super::settings::{LayerConfig, OverlayConfig, TICKS_PER_SECOND};
use crate::error::{OverlayError, OverlayResult};

/// Section prefix for per-layer settings.
pub const LAYER_SECTION_PREFIX: &str = "layer.";

/// Parse an `Ini` object into an `OverlayConfig`.
///
/// Starts from defaults and overlays any values found in the INI. Sections
/// that aren't layer sections are ignored here.
pub(super) fn parse_ini(ini: &Ini) -> OverlayResult<OverlayConfig> {
    let mut config = OverlayConfig::default();

    for (name, section) in ini.iter() {
        let Some(layer_id) = name.and_then(|n| n.strip_prefix(LAYER_SECTION_PREFIX)) else {
            continue;
        };
        let section_name = format!("{}{}", LAYER_SECTION_PREFIX, layer_id);
        let mut layer = LayerConfig::default();

        if let Some(v) = section.get("enabled") {
            layer.enabled = parse_bool(&section_name, "enabled", v)?;
        }
        if let Some(v) = section.get("updates_per_second") {
            let ups: f64 = v
                .trim()
                .parse()
                .map_err(|_| invalid(&section_name, "updates_per_second", v, "expected a number"))?;
            if !(ups > 0.0 && ups <= TICKS_PER_SECOND as f64) {
                return Err(invalid(
                    &section_name,
                    "updates_per_second",
                    v,
                    "must be greater than 0 and at most 60",
                ));
            }
            layer.updates_per_second = ups;
        }
        if let Some(v) = section.get("update_when_view_changes") {
            layer.update_when_view_changes =
                parse_bool(&section_name, "update_when_view_changes", v)?;
        }
        if let Some(v) = section.get("shortcut") {
            layer.shortcut = v
                .parse::<KeybindList>()
                .map_err(|_| invalid(&section_name, "shortcut", v, "expected keys like 'F2, LeftShift + G'"))?;
        }
        if let Some(v) = section.get("always_show_grid") {
            layer.always_show_grid = parse_bool(&section_name, "always_show_grid", v)?;
        }

        config.layers.insert(layer_id.to_string(), layer);
    }

    Ok(config)
}

fn parse_bool(section: &str, key: &str, value: &str) -> OverlayResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(invalid(section, key, value, "expected true or false")),
    }
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> OverlayError {
    OverlayError::config(
        section,
        format!("invalid value '{}' for '{}': {}", value.trim(), key, reason),
    )
}
