//! Application execution logic.
//!
//! Wires the validated configuration into a [`Monitor`] and runs the selected
//! mode once.

use std::time::Duration;

use thiserror::Error;

use pubip_notify::config::{RunMode, ValidatedConfig, defaults};
use pubip_notify::lookup::{AddressLookup, HttpLookup};
use pubip_notify::monitor::{CheckError, Monitor};
use pubip_notify::notify::{DispatchReport, Notifier, WebhookNotifier};
use pubip_notify::state::{AddressStore, FileAddressStore, HeartbeatStore};
use pubip_notify::time::{Clock, Sleeper};
use pubip_notify::transport::ReqwestClient;

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// The check could not complete.
    #[error(transparent)]
    Check(#[from] CheckError),

    /// At least one target did not receive the notification.
    #[error("Notification failed for {failed} of {total} target(s)")]
    NotificationFailed {
        /// Number of failed targets
        failed: usize,
        /// Number of targets attempted
        total: usize,
    },
}

impl RunError {
    /// Per-target failures are already logged by the notifier.
    fn from_report(report: &DispatchReport) -> Option<Self> {
        if report.all_delivered() {
            return None;
        }
        Some(Self::NotificationFailed {
            failed: report.failed(),
            total: report.outcomes().len(),
        })
    }
}

type AppMonitor = Monitor<HttpLookup<ReqwestClient>, WebhookNotifier<ReqwestClient>>;

/// Executes the configured run mode once.
///
/// # Errors
///
/// Returns an error if:
/// - The public address cannot be fetched (check mode)
/// - The state file cannot be read or written (check mode)
/// - Any target fails to receive the notification
///
/// # Coverage Note
///
/// This function is excluded from coverage because it performs real HTTP
/// requests and filesystem access.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    let monitor = create_monitor(&config);

    match config.mode {
        RunMode::Check => {
            let store = FileAddressStore::new(&config.state_file);
            tracing::debug!("State file: {}", store.path().display());
            let heartbeat = config.heartbeat_file.as_ref().map(HeartbeatStore::new);
            run_check(&monitor, &store, heartbeat.as_ref(), config.heartbeat_interval).await
        }
        RunMode::SelfTest => {
            run_self_test(&monitor, config.self_test_window, config.self_test_interval).await
        }
    }
}

/// Builds the production monitor from configuration.
fn create_monitor(config: &ValidatedConfig) -> AppMonitor {
    let lookup = HttpLookup::new(
        ReqwestClient::with_timeout(config.lookup_timeout),
        config.lookup_endpoints.clone(),
    );

    let mut notifier = WebhookNotifier::new(ReqwestClient::with_timeout(defaults::notify_timeout()))
        .with_method(config.method.clone())
        .with_headers(config.headers.clone())
        .with_retry_policy(config.retry_policy.clone());

    if let Some(ref template) = config.body_template {
        notifier = notifier.with_body_template(template);
    }

    Monitor::new(lookup, notifier, config.targets.clone())
}

/// Runs one check, with heartbeat bookkeeping when a heartbeat store is given.
///
/// The heartbeat record is diagnostic: it is saved even when the check
/// fails, and its own delivery or write failures are only logged.
async fn run_check<L, N, C, S>(
    monitor: &Monitor<L, N, C, S>,
    store: &impl AddressStore,
    heartbeat: Option<&HeartbeatStore>,
    heartbeat_interval: Duration,
) -> Result<(), RunError>
where
    L: AddressLookup,
    N: Notifier,
    C: Clock,
{
    let mut record = heartbeat.map(|hb| hb.load_or_fresh(monitor.clock().now()));

    if let Some(record) = record.as_mut() {
        let report = monitor.heartbeat_if_due(record, heartbeat_interval).await;
        if let Some(report) = report.filter(|r| !r.all_delivered()) {
            tracing::warn!(
                "Heartbeat failed for {} of {} target(s)",
                report.failed(),
                report.outcomes().len()
            );
        }
    }

    let result = monitor.check_once(store).await;

    if let (Some(hb), Some(record)) = (heartbeat, record.as_mut()) {
        if let Ok(outcome) = &result {
            monitor.record_outcome(record, outcome);
        }
        if let Err(e) = hb.save(record) {
            tracing::warn!("Failed to save heartbeat record: {e}");
        }
    }

    let outcome = result?;
    match outcome.report().and_then(RunError::from_report) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Runs the self-test and reports the closing notification's delivery.
///
/// Failed samples are logged by the monitor and do not fail the run.
async fn run_self_test<L, N, C, S>(
    monitor: &Monitor<L, N, C, S>,
    window: Duration,
    interval: Duration,
) -> Result<(), RunError>
where
    L: AddressLookup,
    N: Notifier,
    C: Clock,
    S: Sleeper,
{
    let report = monitor.self_test(window, interval).await;

    let failed_samples = report.samples.iter().filter(|s| s.result.is_err()).count();
    tracing::info!(
        "Self-test finished: {} sample(s), {} failed, address changed: {}",
        report.samples.len(),
        failed_samples,
        report.address_changed()
    );

    match RunError::from_report(&report.notification) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
