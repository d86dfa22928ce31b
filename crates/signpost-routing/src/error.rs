//! Error types for routing.

use thiserror::Error;

/// Routing-specific errors.
#[derive(Debug, Error)]
pub enum RoutingError {
    /// No route is registered under the requested name.
    #[error("route does not exist: {0}")]
    RouteNotFound(String),

    /// A config entry is missing one of its required keys.
    #[error("route config `{route}` is missing required key `{key}`")]
    ConfigInvalid { route: String, key: &'static str },

    /// Raw config data could not be parsed.
    #[error("failed to parse route config: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

/// Result type alias for routing operations.
pub type Result<T> = std::result::Result<T, RoutingError>;
