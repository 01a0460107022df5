//! Tests for `RetryPolicy`.

use super::RetryPolicy;
use std::time::Duration;

mod defaults {
    use super::*;

    #[test]
    fn new_uses_documented_defaults() {
        let policy = RetryPolicy::new();

        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.initial_delay, Duration::from_secs(5));
        assert_eq!(policy.max_delay, Duration::from_secs(60));
        assert!((policy.multiplier - 2.0).abs() < f64::EPSILON);
        assert_eq!(policy, RetryPolicy::default());
    }

    #[test]
    fn no_retry_makes_single_attempt() {
        let policy = RetryPolicy::no_retry();

        assert_eq!(policy.max_attempts, 1);
        assert!(!policy.should_retry(1));
    }
}

mod builder {
    use super::*;

    #[test]
    #[should_panic(expected = "max_attempts must be at least 1")]
    fn zero_attempts_panics() {
        let _ = RetryPolicy::new().with_max_attempts(0);
    }

    #[test]
    #[should_panic(expected = "multiplier must be positive")]
    fn non_positive_multiplier_panics() {
        let _ = RetryPolicy::new().with_multiplier(0.0);
    }
}

mod backoff {
    use super::*;

    #[test]
    fn delays_grow_exponentially() {
        let policy = RetryPolicy::new()
            .with_initial_delay(Duration::from_secs(1))
            .with_multiplier(2.0);

        assert_eq!(policy.delay_for_retry(0), Duration::from_secs(1));
        assert_eq!(policy.delay_for_retry(1), Duration::from_secs(2));
        assert_eq!(policy.delay_for_retry(2), Duration::from_secs(4));
    }

    #[test]
    fn delays_are_capped_at_max_delay() {
        let policy = RetryPolicy::new()
            .with_initial_delay(Duration::from_secs(10))
            .with_max_delay(Duration::from_secs(15));

        assert_eq!(policy.delay_for_retry(3), Duration::from_secs(15));
    }

    #[test]
    fn should_retry_until_last_attempt() {
        let policy = RetryPolicy::new().with_max_attempts(3);

        assert!(policy.should_retry(1));
        assert!(policy.should_retry(2));
        assert!(!policy.should_retry(3));
    }
}
