//! Persistent state for detecting changes across runs.
//!
//! This module provides:
//! - [`AddressStore`], the seam between the monitor and the previous-address
//!   state file, with the file-backed [`FileAddressStore`]
//! - [`HeartbeatStore`] and [`HeartbeatRecord`] for diagnostic run statistics

mod file;
mod heartbeat;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

pub use file::FileAddressStore;
pub use heartbeat::{HeartbeatRecord, HeartbeatStore};

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::lookup::PublicAddress;

/// Result of loading the previous address.
///
/// Explicitly models all valid states:
/// - A previous address was stored
/// - No previous address exists (first run, or empty file)
/// - The file holds something that is not an address
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadResult {
    /// The previously stored address.
    Loaded(PublicAddress),

    /// No previous address exists.
    NotFound,

    /// The state file content is not a valid address.
    /// The monitor treats this as "no previous value" and overwrites it.
    Corrupted {
        /// Reason for corruption (for logging).
        reason: String,
    },
}

impl LoadResult {
    /// Returns the stored address, or `None` for `NotFound`/`Corrupted`.
    #[must_use]
    pub const fn previous(&self) -> Option<PublicAddress> {
        match self {
            Self::Loaded(address) => Some(*address),
            Self::NotFound | Self::Corrupted { .. } => None,
        }
    }
}

/// Errors that can occur while reading or writing state files.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The state file exists but could not be read.
    #[error("Failed to read state file '{}': {source}", path.display())]
    Read {
        /// Path of the state file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The state file could not be written.
    #[error("Failed to write state file '{}': {source}", path.display())]
    Write {
        /// Path of the state file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A record could not be serialized.
    #[error("Failed to serialize state: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Storage for the previously observed public address.
///
/// The monitor receives an implementation explicitly instead of touching
/// the filesystem itself, so tests can inject [`mock::MemoryAddressStore`].
///
/// Implementations should:
/// - Report a missing state as `LoadResult::NotFound`, not as an error
/// - Write atomically so a crash never leaves a half-written address
pub trait AddressStore: Send + Sync {
    /// Loads the previously stored address.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Read`] when existing state cannot be read.
    fn load(&self) -> Result<LoadResult, PersistenceError>;

    /// Replaces the stored address.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Write`] when the state cannot be written.
    fn save(&self, address: &PublicAddress) -> Result<(), PersistenceError>;
}

/// In-memory store for testing.
#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// An [`AddressStore`] kept in memory that counts writes.
    #[derive(Debug)]
    pub struct MemoryAddressStore {
        state: Mutex<LoadResult>,
        writes: AtomicUsize,
        fail_reads: bool,
        fail_writes: bool,
    }

    impl MemoryAddressStore {
        fn with_state(state: LoadResult) -> Self {
            Self {
                state: Mutex::new(state),
                writes: AtomicUsize::new(0),
                fail_reads: false,
                fail_writes: false,
            }
        }

        /// Creates a store holding `address`.
        #[must_use]
        pub fn with_address(address: &str) -> Self {
            Self::with_state(LoadResult::Loaded(address.parse().unwrap()))
        }

        /// Creates a store with no previous address.
        #[must_use]
        pub fn empty() -> Self {
            Self::with_state(LoadResult::NotFound)
        }

        /// Creates a store whose content is unreadable as an address.
        #[must_use]
        pub fn corrupted() -> Self {
            Self::with_state(LoadResult::Corrupted {
                reason: "garbage".to_string(),
            })
        }

        /// Makes every load fail with an I/O error.
        #[must_use]
        pub const fn failing_reads(mut self) -> Self {
            self.fail_reads = true;
            self
        }

        /// Makes every save fail with an I/O error.
        #[must_use]
        pub const fn failing_writes(mut self) -> Self {
            self.fail_writes = true;
            self
        }

        /// Number of successful saves.
        #[must_use]
        pub fn writes(&self) -> usize {
            self.writes.load(Ordering::SeqCst)
        }

        /// The currently stored address.
        ///
        /// # Panics
        ///
        /// Panics if the lock is poisoned.
        #[must_use]
        pub fn stored(&self) -> Option<PublicAddress> {
            self.state.lock().unwrap().previous()
        }
    }

    impl AddressStore for MemoryAddressStore {
        fn load(&self) -> Result<LoadResult, PersistenceError> {
            if self.fail_reads {
                return Err(PersistenceError::Read {
                    path: PathBuf::from("memory"),
                    source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
                });
            }
            Ok(self.state.lock().unwrap().clone())
        }

        fn save(&self, address: &PublicAddress) -> Result<(), PersistenceError> {
            if self.fail_writes {
                return Err(PersistenceError::Write {
                    path: PathBuf::from("memory"),
                    source: io::Error::other("disk full"),
                });
            }
            *self.state.lock().unwrap() = LoadResult::Loaded(*address);
            self.writes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }
}
