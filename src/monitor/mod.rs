//! Public address monitor.
//!
//! The monitor has two mutually exclusive run modes, each of which runs to
//! completion:
//! - [`Monitor::check_once`] compares the current address with the stored
//!   one, persisting and notifying on change
//! - [`Monitor::self_test`] samples the address over a fixed window without
//!   touching state, then forces a test notification
//!
//! The comparison itself lives in the pure [`evaluate`] function.

mod check;
mod decision;
mod error;
mod heartbeat;


pub use check::CheckOutcome;
pub use decision::{Decision, evaluate};
pub use error::CheckError;
pub use self_test::{Sample, SelfTestReport, sample_offsets};

use url::Url;

use crate::time::{SystemClock, TokioSleeper};

/// Detects public address changes and reports them to notification targets.
///
/// # Type Parameters
///
/// * `L` - The [`AddressLookup`](crate::lookup::AddressLookup) used to fetch the current address
/// * `N` - The [`Notifier`](crate::notify::Notifier) that delivers messages
/// * `C` - The [`Clock`](crate::time::Clock) for notification timestamps
/// * `S` - The [`Sleeper`](crate::time::Sleeper) used between self-test samples
#[derive(Debug)]
pub struct Monitor<L, N, C = SystemClock, S = TokioSleeper> {
    lookup: L,
    notifier: N,
    targets: Vec<Url>,
    clock: C,
    sleeper: S,
}

impl<L, N> Monitor<L, N, SystemClock, TokioSleeper> {
    /// Creates a monitor using the system clock and real sleeps.
    #[must_use]
    pub const fn new(lookup: L, notifier: N, targets: Vec<Url>) -> Self {
        Self {
            lookup,
            notifier,
            targets,
            clock: SystemClock,
            sleeper: TokioSleeper,
        }
    }
}

impl<L, N, C, S> Monitor<L, N, C, S> {
    /// Replaces the clock.
    #[must_use]
    pub fn with_clock<C2>(self, clock: C2) -> Monitor<L, N, C2, S> {
        Monitor {
            lookup: self.lookup,
            notifier: self.notifier,
            targets: self.targets,
            clock,
            sleeper: self.sleeper,
        }
    }

    /// Replaces the sleeper.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> Monitor<L, N, C, S2> {
        Monitor {
            lookup: self.lookup,
            notifier: self.notifier,
            targets: self.targets,
            clock: self.clock,
            sleeper,
        }
    }

    /// Returns the notification targets.
    #[must_use]
    pub fn targets(&self) -> &[Url] {
        &self.targets
    }

    /// Returns the clock used for timestamps.
    #[must_use]
    pub const fn clock(&self) -> &C {
        &self.clock
    }
}
