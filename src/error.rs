//! Error types for the configuration store.
//!
//! Ordinary store operations fail soft and never return these. They surface only
//! at the boundary: normalizing any-keyed input, decoding subtrees into typed
//! structs, bridging `config` crate sources, and installing the log subscriber.

use thiserror::Error;

/// Normalization errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("Unsupported map key of kind {kind} at '{path}': only string, integer, boolean and finite float keys can be folded")]
    UnsupportedKey { path: String, kind: &'static str },
}

/// Store-level errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Normalization failed: {0}")]
    Normalize(#[from] NormalizeError),

    #[error("Key not found: {0}")]
    KeyNotFound(String),

    #[error("Failed to decode '{key}': {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration source error: {0}")]
    Source(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

impl From<config::ConfigError> for StoreError {
    fn from(err: config::ConfigError) -> Self {
        StoreError::Source(err.to_string())
    }
}
