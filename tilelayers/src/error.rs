//! Error types for overlay construction and updates.
//!
//! Errors fall into three groups:
//!
//! - **Configuration** ([`OverlayError::Config`]): raised while building a
//!   layer or parsing settings. Fatal to that layer only; the coordinator
//!   skips it and keeps the rest.
//! - **Entity data** ([`OverlayError::InvalidEntityData`]): the grid reported an
//!   entity it could not describe. Layers log and skip the tile.
//! - **Query failures** ([`OverlayError::QueryFailure`]): the grid could not
//!   answer. Propagated out of `update`, after which the coordinator shows no
//!   groups for that layer until its next due tick.

use thiserror::Error;

use crate::coord::TilePosition;

/// Result type for overlay operations.
pub type OverlayResult<T> = Result<T, OverlayError>;

/// Errors that can occur while configuring or updating data layers.
#[derive(Debug, Error)]
pub enum OverlayError {
    /// Missing, invalid or malformed layer configuration.
    #[error("Configuration error in {layer}: {reason}")]
    Config { layer: String, reason: String },

    /// An entity on the grid described itself with data the layer can't use.
    #[error("Invalid entity data at {tile}: {reason}")]
    InvalidEntityData { tile: TilePosition, reason: String },

    /// The grid query interface failed to answer.
    #[error("Grid query failed at {tile}: {reason}")]
    QueryFailure { tile: TilePosition, reason: String },

    /// I/O error while reading configuration.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file isn't valid INI.
    #[error("Failed to parse INI: {0}")]
    Ini(String),

    /// Export serialization failed.
    #[error("Export failed: {0}")]
    Export(#[from] serde_json::Error),

    /// A global tracing subscriber was already installed.
    #[error("Failed to initialize logging: {0}")]
    Logging(String),
}

impl OverlayError {
    /// Build a configuration error for the given layer or section.
    pub fn config(layer: impl Into<String>, reason: impl Into<String>) -> Self {
        OverlayError::Config {
            layer: layer.into(),
            reason: reason.into(),
        }
    }

    /// Build a query failure for the given tile.
    pub fn query_failure(tile: TilePosition, reason: impl Into<String>) -> Self {
        OverlayError::QueryFailure {
            tile,
            reason: reason.into(),
        }
    }

    /// Build an invalid entity error for the given tile.
    pub fn invalid_entity(tile: TilePosition, reason: impl Into<String>) -> Self {
        OverlayError::InvalidEntityData {
            tile,
            reason: reason.into(),
        }
    }

    /// Whether a layer may skip this error and keep scanning.
    pub fn is_skippable(&self) -> bool {
        matches!(self, OverlayError::InvalidEntityData { .. })
    }
}

impl From<ini::Error> for OverlayError {
    fn from(err: ini::Error) -> Self {
        match err {
            ini::Error::Io(e) => OverlayError::Io(e),
            ini::Error::Parse(e) => OverlayError::Ini(e.to_string()),
        }
    }
}
