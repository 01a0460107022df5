//! Error types for notification delivery.

use thiserror::Error;

use crate::transport::HttpError;

/// Failure to deliver a notification to a single target.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// The HTTP request could not be completed.
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    /// The target answered with a non-2xx status.
    #[error("Target responded with HTTP {status}")]
    NonSuccessStatus {
        /// Status code received
        status: http::StatusCode,
        /// Response body, if it was valid UTF-8
        body: Option<String>,
    },

    /// The configured body template failed to render.
    #[error("Failed to render body template: {0}")]
    Template(String),

    /// The default JSON body could not be encoded.
    #[error("Failed to encode notification body: {0}")]
    Encode(#[source] serde_json::Error),

    /// Every attempt failed with a retryable error.
    #[error("Delivery failed after {attempts} attempt(s): {last_error}")]
    MaxRetriesExceeded {
        /// Number of attempts made
        attempts: u32,
        /// Error from the final attempt
        #[source]
        last_error: Box<NotificationError>,
    },
}
