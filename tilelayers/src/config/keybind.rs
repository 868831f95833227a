//! Keyboard shortcut lists.

use std::fmt;
use std::str::FromStr;

use crate::error::OverlayError;

/// A set of alternative key combinations, any of which activates a layer.
///
/// Written as comma-separated combinations whose keys are joined by `+`:
/// `"F2, LeftShift + G"`. Key names are compared case-insensitively.
/// An empty list never matches.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeybindList {
    combos: Vec<Vec<String>>,
}

impl KeybindList {
    /// A list with no key combinations.
    pub fn none() -> Self {
        Self::default()
    }

    /// Whether the list has no combinations.
    pub fn is_empty(&self) -> bool {
        self.combos.is_empty()
    }

    /// Whether any combination is fully held in `pressed`.
    pub fn is_down<S: AsRef<str>>(&self, pressed: &[S]) -> bool {
        self.combos.iter().any(|combo| {
            combo.iter().all(|key| {
                pressed
                    .iter()
                    .any(|p| p.as_ref().trim().eq_ignore_ascii_case(key))
            })
        })
    }
}

impl FromStr for KeybindList {
    type Err = OverlayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
            return Ok(Self::none());
        }

        let mut combos = Vec::new();
        for combo in trimmed.split(',') {
            let keys: Vec<String> = combo.split('+').map(|k| k.trim().to_string()).collect();
            if keys.iter().any(|k| k.is_empty()) {
                return Err(OverlayError::config(
                    "shortcut",
                    format!("invalid key combination '{}' in '{}'", combo.trim(), s),
                ));
            }
            combos.push(keys);
        }
        Ok(Self { combos })
    }
}

impl fmt::Display for KeybindList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.combos.is_empty() {
            return write!(f, "None");
        }
        let parts: Vec<String> = self.combos.iter().map(|c| c.join(" + ")).collect();
        write!(f, "{}", parts.join(", "))
    }
}
