//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

/// Config file loaded from the working directory when `--config` is absent.
pub const CONFIG_FILE: &str = "pubip-notify.toml";

/// Lookup endpoints, primary first.
pub const LOOKUP_ENDPOINTS: [&str; 2] = ["https://api.ipify.org", "https://ifconfig.me/ip"];

/// Per-request lookup timeout in seconds.
pub const LOOKUP_TIMEOUT_SECS: u64 = 5;

/// Per-request timeout for notification delivery in seconds.
pub const NOTIFY_TIMEOUT_SECS: u64 = 30;

/// File holding the last observed address.
pub const ADDRESS_FILE: &str = "PreviousIP.txt";

/// File holding heartbeat statistics.
pub const HEARTBEAT_FILE: &str = "heartbeat.json";

/// Days between heartbeat notifications.
pub const HEARTBEAT_DAYS: u64 = 30;

/// Default HTTP method for notification requests.
pub const METHOD: &str = "POST";

/// Length of the self-test sampling window in seconds.
pub const SELF_TEST_WINDOW_SECS: u64 = 300;

/// Gap between self-test samples in seconds.
pub const SELF_TEST_INTERVAL_SECS: u64 = 90;

/// Default maximum number of delivery attempts per target.
pub const RETRY_MAX_ATTEMPTS: u32 = 3;

/// Default initial retry delay in seconds.
pub const RETRY_INITIAL_DELAY_SECS: u64 = 5;

/// Default maximum retry delay in seconds.
pub const RETRY_MAX_DELAY_SECS: u64 = 60;

/// Default retry backoff multiplier.
pub const RETRY_MULTIPLIER: f64 = 2.0;

const SECS_PER_DAY: u64 = 86_400;

/// Default lookup timeout as Duration.
#[must_use]
pub const fn lookup_timeout() -> Duration {
    Duration::from_secs(LOOKUP_TIMEOUT_SECS)
}

/// Notification request timeout as Duration.
#[must_use]
pub const fn notify_timeout() -> Duration {
    Duration::from_secs(NOTIFY_TIMEOUT_SECS)
}

/// Default heartbeat interval as Duration.
#[must_use]
pub const fn heartbeat_interval() -> Duration {
    days(HEARTBEAT_DAYS)
}

/// Default self-test window as Duration.
#[must_use]
pub const fn self_test_window() -> Duration {
    Duration::from_secs(SELF_TEST_WINDOW_SECS)
}

/// Default self-test sample interval as Duration.
#[must_use]
pub const fn self_test_interval() -> Duration {
    Duration::from_secs(SELF_TEST_INTERVAL_SECS)
}

/// Converts whole days to a Duration.
#[must_use]
pub const fn days(days: u64) -> Duration {
    Duration::from_secs(days.saturating_mul(SECS_PER_DAY))
}
