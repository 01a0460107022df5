//! Per-target delivery results.

use url::Url;

use super::NotificationError;

/// Result of delivering one notification to one target.
#[derive(Debug)]
pub struct TargetOutcome {
    /// The destination the delivery was attempted against
    pub target: Url,
    /// `Ok` when the target accepted the notification
    pub result: Result<(), NotificationError>,
}

/// Collected outcomes of a single dispatch, one per target, in target order.
#[derive(Debug, Default)]
pub struct DispatchReport {
    outcomes: Vec<TargetOutcome>,
}

impl DispatchReport {
    /// Creates an empty report.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            outcomes: Vec::new(),
        }
    }

    /// Appends the outcome for one target.
    pub fn record(&mut self, target: Url, result: Result<(), NotificationError>) {
        self.outcomes.push(TargetOutcome { target, result });
    }

    /// Returns every outcome in dispatch order.
    #[must_use]
    pub fn outcomes(&self) -> &[TargetOutcome] {
        &self.outcomes
    }

    /// Number of targets that accepted the notification.
    #[must_use]
    pub fn delivered(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    /// Outcomes that failed.
    pub fn failures(&self) -> impl Iterator<Item = &TargetOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }

    /// Number of targets that could not be reached.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failures().count()
    }

    /// Returns true if every target accepted the notification.
    #[must_use]
    pub fn all_delivered(&self) -> bool {
        self.failed() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn empty_report_counts_as_delivered() {
        let report = DispatchReport::new();

        assert_eq!(report.delivered(), 0);
        assert_eq!(report.failed(), 0);
        assert!(report.all_delivered());
    }

    #[test]
    fn counts_mixed_outcomes_in_order() {
        let mut report = DispatchReport::new();
        report.record(url("https://a.example.com/"), Ok(()));
        report.record(
            url("https://b.example.com/"),
            Err(NotificationError::Template("bad".to_string())),
        );
        report.record(url("https://c.example.com/"), Ok(()));

        assert_eq!(report.delivered(), 2);
        assert_eq!(report.failed(), 1);
        assert!(!report.all_delivered());
        assert_eq!(
            report.failures().next().unwrap().target.as_str(),
            "https://b.example.com/"
        );
        assert_eq!(report.outcomes()[2].target.as_str(), "https://c.example.com/");
    }
}
