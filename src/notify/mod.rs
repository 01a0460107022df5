//! Notification dispatch.
//!
//! This module provides:
//! - The [`Notification`] message handed to the dispatcher
//! - The [`Notifier`] trait and its per-target [`DispatchReport`]
//! - [`WebhookNotifier`], which POSTs each notification to every target URL
//! - Retry policy configuration ([`RetryPolicy`])

mod error;
mod message;
mod report;
mod retry;
mod webhook;

#[cfg(test)]
pub mod mock;

#[cfg(test)]
mod retry_tests;

pub use error::NotificationError;
pub use message::{Notification, NotificationKind};
pub use report::{DispatchReport, TargetOutcome};
pub use retry::RetryPolicy;
pub use webhook::{IsRetryable, WebhookNotifier};

use url::Url;

/// Trait for delivering a notification to a set of destinations.
///
/// Targets are opaque to callers and passed through unchanged. Delivery is
/// best effort per target: a failure on one target must never prevent
/// attempts on the remaining ones, which is why the result is a report
/// rather than a `Result`.
pub trait Notifier: Send + Sync {
    /// Delivers `notification` to each of `targets`.
    fn send(
        &self,
        targets: &[Url],
        notification: &Notification,
    ) -> impl std::future::Future<Output = DispatchReport> + Send;
}

impl<T: Notifier> Notifier for std::sync::Arc<T> {
    async fn send(&self, targets: &[Url], notification: &Notification) -> DispatchReport {
        (**self).send(targets, notification).await
    }
}
