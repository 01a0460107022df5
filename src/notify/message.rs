//! The notification message and its well-known forms.

use std::time::{Duration, SystemTime};

use serde::Serialize;

use crate::lookup::PublicAddress;
use crate::time::unix_secs;

/// Text used wherever a previous address is absent.
pub const NO_PREVIOUS_VALUE: &str = "no previous value";

/// Why a notification was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// The public address differs from the stored one.
    Change,
    /// Periodic liveness report.
    Heartbeat,
    /// Forced notification at the end of the self-test window.
    Test,
}

/// A message handed to the [`Notifier`](super::Notifier).
///
/// Serializes to the default JSON body sent to webhook targets, and is also
/// the data available to body templates (`{{title}}`, `{{body}}`, `{{kind}}`,
/// `{{previous}}`, `{{current}}`, `{{timestamp}}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// Short headline
    pub title: String,
    /// Human-readable message
    pub body: String,
    /// What triggered the notification
    pub kind: NotificationKind,
    /// Previously stored address, if any
    pub previous: Option<String>,
    /// Most recently observed address, if any
    pub current: Option<String>,
    /// Unix timestamp (seconds) when the notification was created
    pub timestamp: u64,
}

impl Notification {
    /// Builds the notification for an address change.
    #[must_use]
    pub fn address_changed(
        previous: Option<PublicAddress>,
        current: PublicAddress,
        at: SystemTime,
    ) -> Self {
        let previous_text = previous.map_or_else(|| NO_PREVIOUS_VALUE.to_string(), |p| p.to_string());

        Self {
            title: "Public IP Changed".to_string(),
            body: format!("Public IP changed from {previous_text} to {current}"),
            kind: NotificationKind::Change,
            previous: previous.map(|p| p.to_string()),
            current: Some(current.to_string()),
            timestamp: unix_secs(at),
        }
    }

    /// Builds the periodic heartbeat notification.
    #[must_use]
    pub fn heartbeat(
        running_days: u64,
        days_since_change: u64,
        change_count: u64,
        at: SystemTime,
    ) -> Self {
        Self {
            title: "Public IP Heartbeat".to_string(),
            body: format!(
                "Heartbeat: running for {running_days} days.\n\
                 No IP change in {days_since_change} days.\n\
                 Total IP changes: {change_count}"
            ),
            kind: NotificationKind::Heartbeat,
            previous: None,
            current: None,
            timestamp: unix_secs(at),
        }
    }

    /// Builds the forced notification sent at the end of a self-test.
    #[must_use]
    pub fn self_test(window: Duration, last_observed: Option<PublicAddress>, at: SystemTime) -> Self {
        let observed = last_observed.map_or_else(|| "unavailable".to_string(), |a| a.to_string());

        Self {
            title: "Public IP Self-Test".to_string(),
            body: format!(
                "Test notification: {} elapsed in verbose mode. Last observed address: {observed}",
                describe_window(window)
            ),
            kind: NotificationKind::Test,
            previous: None,
            current: last_observed.map(|a| a.to_string()),
            timestamp: unix_secs(at),
        }
    }
}

fn describe_window(window: Duration) -> String {
    let secs = window.as_secs();
    if secs % 60 == 0 {
        let minutes = secs / 60;
        if minutes == 1 {
            "1 minute".to_string()
        } else {
            format!("{minutes} minutes")
        }
    } else {
        format!("{secs} seconds")
    }
}
