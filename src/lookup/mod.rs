//! Public address lookup.
//!
//! This module provides:
//! - The [`PublicAddress`] value returned by lookups
//! - The [`AddressLookup`] trait the monitor depends on
//! - [`HttpLookup`], which queries "what is my IP" endpoints in order

mod address;
mod error;
mod remote;

#[cfg(test)]
pub mod mock;

#[cfg(test)]
mod remote_tests;

pub use address::{AddressParseError, PublicAddress};
pub use error::FetchError;
pub use remote::HttpLookup;

/// Trait for discovering the host's current public address.
///
/// Implementations perform a single lookup per call and leave retrying to
/// the next scheduled run.
pub trait AddressLookup: Send + Sync {
    /// Fetches the current public address.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when no configured source produced a valid address.
    fn lookup(&self) -> impl std::future::Future<Output = Result<PublicAddress, FetchError>> + Send;
}

impl<T: AddressLookup> AddressLookup for std::sync::Arc<T> {
    async fn lookup(&self) -> Result<PublicAddress, FetchError> {
        (**self).lookup().await
    }
}
