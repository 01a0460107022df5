//! The single-shot address check.

use crate::lookup::{AddressLookup, PublicAddress};
use crate::notify::{DispatchReport, Notification, Notifier};
use crate::state::{AddressStore, LoadResult};
use crate::time::Clock;

use super::{CheckError, Decision, Monitor, evaluate};

/// What a completed check observed and did.
#[derive(Debug)]
pub enum CheckOutcome {
    /// The address matched the stored one. Nothing was written or sent.
    Unchanged {
        /// The current (and stored) address
        address: PublicAddress,
    },

    /// The address changed. The store now holds `current` and one
    /// notification was dispatched.
    Changed {
        /// The address that was stored before, if any
        previous: Option<PublicAddress>,
        /// The newly stored address
        current: PublicAddress,
        /// Per-target delivery results
        report: DispatchReport,
    },
}

impl CheckOutcome {
    /// Returns true if the address changed.
    #[must_use]
    pub const fn is_changed(&self) -> bool {
        matches!(self, Self::Changed { .. })
    }

    /// The address observed by the check.
    #[must_use]
    pub const fn current(&self) -> PublicAddress {
        match self {
            Self::Unchanged { address } => *address,
            Self::Changed { current, .. } => *current,
        }
    }

    /// The delivery report, if a notification was sent.
    #[must_use]
    pub const fn report(&self) -> Option<&DispatchReport> {
        match self {
            Self::Unchanged { .. } => None,
            Self::Changed { report, .. } => Some(report),
        }
    }
}

impl<L, N, C, S> Monitor<L, N, C, S>
where
    L: AddressLookup,
    N: Notifier,
    C: Clock,
{
    /// Runs one check against `store`.
    ///
    /// 1. Fetches the current address
    /// 2. Loads the previous address (missing state is not an error)
    /// 3. On change: saves the current address, then notifies every target
    ///
    /// The state is written before notifying. If the write fails no
    /// notification is sent, so the next run sees the same change again.
    ///
    /// # Errors
    ///
    /// - [`CheckError::Fetch`] if the lookup fails; the store is untouched
    /// - [`CheckError::Persistence`] if the store cannot be read or written
    pub async fn check_once(&self, store: &impl AddressStore) -> Result<CheckOutcome, CheckError> {
        let current = self.lookup.lookup().await?;
        let previous = Self::load_previous(store)?;

        match evaluate(previous, current) {
            Decision::Unchanged => {
                tracing::info!("Public IP unchanged: {current}");
                Ok(CheckOutcome::Unchanged { address: current })
            }
            Decision::Changed { previous } => {
                store.save(&current)?;
                match previous {
                    Some(previous) => tracing::info!("Public IP changed: {previous} -> {current}"),
                    None => tracing::info!("Public IP recorded for the first time: {current}"),
                }

                let notification = Notification::address_changed(previous, current, self.clock.now());
                let report = self.notifier.send(&self.targets, &notification).await;
                tracing::debug!(
                    "Change notification delivered to {}/{} target(s)",
                    report.delivered(),
                    self.targets.len()
                );

                Ok(CheckOutcome::Changed {
                    previous,
                    current,
                    report,
                })
            }
        }
    }

    fn load_previous(store: &impl AddressStore) -> Result<Option<PublicAddress>, CheckError> {
        let loaded = store.load()?;
        match &loaded {
            LoadResult::Loaded(address) => tracing::debug!("Previous public IP: {address}"),
            LoadResult::NotFound => tracing::info!("No previous address stored, starting fresh"),
            LoadResult::Corrupted { reason } => {
                tracing::warn!("State file corrupted ({reason}), it will be overwritten");
            }
        }
        Ok(loaded.previous())
    }
}
