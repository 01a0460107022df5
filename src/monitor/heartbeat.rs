//! Heartbeat bookkeeping around a check.

use std::time::Duration;

use crate::notify::{DispatchReport, Notification, Notifier};
use crate::state::HeartbeatRecord;
use crate::time::Clock;

use super::{CheckOutcome, Monitor};

impl<L, N, C, S> Monitor<L, N, C, S>
where
    N: Notifier,
    C: Clock,
{
    /// Sends a heartbeat notification if `interval` has elapsed since the
    /// record's period start, then starts a new period.
    ///
    /// Returns the delivery report when a heartbeat was sent.
    pub async fn heartbeat_if_due(
        &self,
        record: &mut HeartbeatRecord,
        interval: Duration,
    ) -> Option<DispatchReport> {
        let now = self.clock.now();
        if !record.is_due(now, interval) {
            return None;
        }

        let notification = Notification::heartbeat(
            record.days_running(now),
            record.days_since_change(now),
            record.ip_change_count,
            now,
        );
        let report = self.notifier.send(&self.targets, &notification).await;
        tracing::info!(
            "Heartbeat sent to {}/{} target(s)",
            report.delivered(),
            self.targets.len()
        );

        record.restart_period(now);
        Some(report)
    }

    /// Folds a completed check into the record.
    pub fn record_outcome(&self, record: &mut HeartbeatRecord, outcome: &CheckOutcome) {
        let now = self.clock.now();
        record.record_check(now);
        if outcome.is_changed() {
            record.record_change(now);
        }
    }
}
