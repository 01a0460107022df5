//! The address comparison.

use crate::lookup::PublicAddress;

/// What a check should do with the current address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The stored address matches; nothing to do.
    Unchanged,
    /// The address differs from the stored one, or nothing was stored.
    Changed {
        /// The stored address being replaced, if any
        previous: Option<PublicAddress>,
    },
}

/// Compares the stored address against the current one.
///
/// A missing previous address always counts as a change.
///
/// ```
/// use pubip_notify::monitor::{Decision, evaluate};
///
/// let current = "203.0.113.7".parse().unwrap();
/// assert_eq!(evaluate(Some(current), current), Decision::Unchanged);
/// assert_eq!(evaluate(None, current), Decision::Changed { previous: None });
/// ```
#[must_use]
pub fn evaluate(previous: Option<PublicAddress>, current: PublicAddress) -> Decision {
    match previous {
        Some(previous) if previous == current => Decision::Unchanged,
        previous => Decision::Changed { previous },
    }
}
