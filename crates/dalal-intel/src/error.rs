//! Error types for web intelligence operations

use thiserror::Error;

/// Result type alias for intelligence operations
pub type Result<T> = std::result::Result<T, IntelError>;

/// Errors that can occur while talking to the search provider
#[derive(Debug, Error)]
pub enum IntelError {
    /// Provider returned a non-success status
    #[error("Serper API error {status}: {body}")]
    ApiStatus {
        status: u16,
        body: String,
    },

    /// Network or HTTP error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Response could not be decoded
    #[error("Failed to parse Serper response: {0}")]
    Parse(String),
}
