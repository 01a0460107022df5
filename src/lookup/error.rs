//! Error types for address lookups.

use thiserror::Error;
use url::Url;

use crate::transport::HttpError;

/// Error type for public address lookups.
///
/// All variants are transient from the caller's point of view: the run
/// ends and the next scheduled invocation tries again.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request to a lookup endpoint failed at the transport level.
    #[error("Request to {endpoint} failed: {source}")]
    Http {
        /// Endpoint that was queried
        endpoint: Url,
        /// Underlying transport error
        #[source]
        source: HttpError,
    },

    /// The endpoint answered with a non-2xx status.
    #[error("{endpoint} returned HTTP {status}")]
    Status {
        /// Endpoint that was queried
        endpoint: Url,
        /// Status code received
        status: http::StatusCode,
    },

    /// The endpoint answered, but the body held no valid address.
    #[error("{endpoint} returned no valid address: {body:?}")]
    InvalidBody {
        /// Endpoint that was queried
        endpoint: Url,
        /// Response body, truncated for logging
        body: String,
    },

    /// Every configured endpoint failed.
    #[error("All {attempts} lookup endpoint(s) failed; last error: {last}")]
    Exhausted {
        /// Number of endpoints attempted
        attempts: usize,
        /// Failure of the final endpoint
        #[source]
        last: Box<FetchError>,
    },

    /// The lookup was configured without any endpoint.
    #[error("No lookup endpoints configured")]
    NoEndpoints,
}
