//! Logging setup for hosts that don't install their own subscriber.
//!
//! The library only emits `tracing` events. Hosts that already configure
//! tracing can ignore this module.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::error::{OverlayError, OverlayResult};

/// Filter used when neither `RUST_LOG` nor a directive is given.
pub const DEFAULT_FILTER: &str = "tilelayers=info";

/// Build the event filter: `RUST_LOG` if set, otherwise `default_filter`.
pub fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// Install a global console subscriber.
///
/// # Errors
///
/// Returns [`OverlayError::Logging`] if a global subscriber is already set.
pub fn init_logging(default_filter: &str) -> OverlayResult<()> {
    tracing_subscriber::registry()
        .with(env_filter(default_filter))
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init()
        .map_err(|e| OverlayError::Logging(e.to_string()))
}
