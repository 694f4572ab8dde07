//! Error types for Wayside

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WaysideError {
    // Route errors
    #[error("Could not load route coordinates from {path}: {reason}")]
    RouteLoad { path: PathBuf, reason: String },

    #[error("Invalid route: {reason}")]
    InvalidRoute { reason: String },

    // External service errors
    #[error("Geographic data query failed: {reason}")]
    GeoQuery { reason: String },

    #[error("Routing service error: {reason}")]
    Routing { reason: String },

    #[error("No route found between the requested points")]
    NoRoute,

    // Lookup errors
    #[error("No {amenity_type} found along route")]
    NoMatchingAmenity { amenity_type: String },

    // Configuration errors
    #[error("Missing required configuration: {key}")]
    ConfigMissing { key: String },

    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl WaysideError {
    /// Build a route load error for the given file
    pub fn route_load(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::RouteLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True for failures caused by an external service rather than by input
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::GeoQuery { .. } | Self::Routing { .. })
    }
}

impl From<serde_json::Error> for WaysideError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, WaysideError>;
