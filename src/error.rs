//! Error types.
//!
//! The background engine never fails; these cover the data paths that do
//! (content loading, configuration overrides and the blog feed).

use thiserror::Error;

/// Why a blog fetch produced no posts.
///
/// Every variant is recovered the same way (the fallback panel); the
/// distinction only shows up in the diagnostic log.
#[derive(Debug, Error)]
pub enum BlogError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out after {0} ms")]
    Timeout(u32),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("GraphQL error: {0}")]
    Graphql(String),

    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("response contained no posts")]
    Empty,
}

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("invalid content JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("record {index} in '{section}' has an empty title")]
    MissingTitle { section: &'static str, index: usize },

    #[error("unknown card kind '{0}' (expected 'project' or 'research')")]
    UnknownKind(String),
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("node count thresholds must be increasing ({small} < {medium})")]
    Thresholds { small: f64, medium: f64 },

    #[error("{0}")]
    Invalid(String),
}
