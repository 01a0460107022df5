//! Error types for the monitor.

use thiserror::Error;

use crate::lookup::FetchError;
use crate::state::PersistenceError;

/// Error type for a single address check.
///
/// Both variants end the run; the next scheduled invocation starts over.
#[derive(Debug, Error)]
pub enum CheckError {
    /// The current address could not be determined.
    /// Nothing was written and nothing was sent.
    #[error("Failed to fetch public address: {0}")]
    Fetch(#[from] FetchError),

    /// The state file could not be read or written.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
