//! services/client/src/error.rs
//!
//! Defines the primary error type for the entire client service.

use crate::config::ConfigError;
use smartchef_core::discovery::DiscoveryError;
use smartchef_core::favorites::FavoriteError;
use smartchef_core::ports::PortError;

/// The primary error type for the `client` service.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error that propagated up from one of the core service ports.
    #[error("Service Port Error: {0}")]
    Port(#[from] PortError),

    /// Represents a failure surfaced by the favorites gateway.
    #[error("Favorites Error: {0}")]
    Favorites(#[from] FavoriteError),

    /// Represents a failure of the random-recipe discovery loop.
    #[error("Discovery Error: {0}")]
    Discovery(#[from] DiscoveryError),

    /// Represents an error from the underlying HTTP client.
    #[error("HTTP Error: {0}")]
    Http(#[from] reqwest::Error),

    /// Represents a standard Input/Output error (e.g., reading from stdin).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
