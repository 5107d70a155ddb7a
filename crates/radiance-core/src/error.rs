//! Error types for Radiance

use thiserror::Error;

/// Result type alias using Radiance's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in Radiance operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Hierarchy configuration cannot produce a usable cascade layout
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}
