//! Recording notifier for tests.

use std::sync::Mutex;

use url::Url;

use super::{DispatchReport, Notification, NotificationError, Notifier};

/// A mock [`Notifier`] that records every dispatch.
///
/// Targets listed via [`RecordingNotifier::failing_on`] report a
/// `503` failure; all others succeed.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(Vec<Url>, Notification)>>,
    failing: Vec<Url>,
}

impl RecordingNotifier {
    /// Creates a notifier where every target succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a notifier where the given targets fail.
    #[must_use]
    pub fn failing_on(targets: &[Url]) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failing: targets.to_vec(),
        }
    }

    /// Returns every notification dispatched so far.
    ///
    /// # Panics
    ///
    /// Panics if the lock is poisoned.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|(_, n)| n.clone())
            .collect()
    }

    /// Returns the target list passed to each dispatch.
    #[must_use]
    pub fn target_lists(&self) -> Vec<Vec<Url>> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|(t, _)| t.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    async fn send(&self, targets: &[Url], notification: &Notification) -> DispatchReport {
        self.sent
            .lock()
            .unwrap()
            .push((targets.to_vec(), notification.clone()));

        let mut report = DispatchReport::new();
        for target in targets {
            let result = if self.failing.contains(target) {
                Err(NotificationError::NonSuccessStatus {
                    status: http::StatusCode::SERVICE_UNAVAILABLE,
                    body: None,
                })
            } else {
                Ok(())
            };
            report.record(target.clone(), result);
        }
        report
    }
}
