//! Error types for HTTP operations.

use thiserror::Error;

/// Error type for HTTP transport failures.
///
/// Describes what went wrong without dictating recovery strategy.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// Covers DNS resolution failures, refused connections and
    /// failures while reading the response body.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    #[error("Request timed out")]
    Timeout,

    /// The request could not be built from the provided URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}
