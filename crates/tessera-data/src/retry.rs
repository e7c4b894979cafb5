//! Retry policy for cart submissions.

use std::time::Duration;

/// Delay strategy between retry attempts.
#[derive(Debug, Clone)]
pub enum Backoff {
    /// No delay between retries.
    None,
    /// Fixed delay between retries.
    Fixed(Duration),
    /// Exponential backoff with base and max.
    Exponential {
        /// Initial delay.
        base: Duration,
        /// Maximum delay.
        max: Duration,
    },
}

impl Backoff {
    /// Delay before retrying a given attempt (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        match self {
            Self::None => Duration::ZERO,
            Self::Fixed(delay) => *delay,
            Self::Exponential { base, max } => {
                let multiplier = 2u64.saturating_pow(attempt);
                let delay =
                    Duration::from_millis((base.as_millis() as u64).saturating_mul(multiplier));
                std::cmp::min(delay, *max)
            }
        }
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::Exponential {
            base: Duration::from_millis(50),
            max: Duration::from_millis(500),
        }
    }
}

/// Retry configuration for a cart submission.
///
/// Which failures are worth retrying is decided by
/// [`CartApiError::is_transient`](crate::error::CartApiError::is_transient);
/// the policy only governs how often and how spaced out.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts after the first try.
    pub max_attempts: u32,
    /// Delay strategy.
    pub backoff: Backoff,
}

impl RetryPolicy {
    /// Create a policy with the default backoff.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            backoff: Backoff::default(),
        }
    }

    /// A policy that never retries.
    pub fn none() -> Self {
        Self {
            max_attempts: 0,
            backoff: Backoff::None,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exponential_backoff_caps_at_max() {
        let backoff = Backoff::Exponential {
            base: Duration::from_millis(50),
            max: Duration::from_millis(500),
        };
        assert_eq!(backoff.delay_for_attempt(0), Duration::from_millis(50));
        assert_eq!(backoff.delay_for_attempt(1), Duration::from_millis(100));
        assert_eq!(backoff.delay_for_attempt(2), Duration::from_millis(200));
        assert_eq!(backoff.delay_for_attempt(10), Duration::from_millis(500));
    }

    #[test]
    fn test_none_policy_does_not_retry() {
        let policy = RetryPolicy::none();
        assert_eq!(policy.max_attempts, 0);
        assert_eq!(policy.backoff.delay_for_attempt(0), Duration::ZERO);
    }
}
