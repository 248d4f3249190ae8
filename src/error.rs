//! Error types for article and feed rendering.

use thiserror::Error;

/// Errors raised while rendering articles, building feeds or loading manifests.
#[derive(Error, Debug)]
pub enum InstantError {
    /// The article has no `<h1>` title.
    #[error("article title <h1> is required")]
    MissingTitle,

    /// The article has no canonical link.
    #[error("canonical link is required")]
    MissingCanonicalLink,

    /// IO error while writing markup or output files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Manifest could not be decoded as YAML
    #[error("YAML manifest error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Manifest could not be decoded as JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A manifest timestamp is not RFC 3339
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, InstantError>;
