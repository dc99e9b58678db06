//! Retry delay strategies.
//!
//! This module provides the [`RetryBackoff`] enum which decides how long the
//! request engine waits between a failed attempt and the next one.

use std::time::Duration;

use rand::Rng;

/// Upper bound of the random jitter added to exponential delays, in percent.
const JITTER_PERCENT: u64 = 10;

/// Delay strategy between retry attempts.
///
/// The default is [`RetryBackoff::Immediate`]: a failed attempt is retried
/// right away. [`RetryBackoff::Exponential`] doubles the delay on every retry,
/// starting at `initial` and never exceeding `max`, with up to 10% jitter.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use keap_api::RetryBackoff;
///
/// let backoff = RetryBackoff::Immediate;
/// assert_eq!(backoff.delay(1), Duration::ZERO);
///
/// let backoff = RetryBackoff::Exponential {
///     initial: Duration::from_millis(100),
///     max: Duration::from_secs(2),
/// };
/// assert!(backoff.delay(1) >= Duration::from_millis(100));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RetryBackoff {
    /// Retry without waiting.
    #[default]
    Immediate,
    /// Wait `initial * 2^(retry - 1)`, capped at `max`, plus jitter.
    Exponential {
        /// Delay before the first retry.
        initial: Duration,
        /// Largest delay ever returned (before jitter).
        max: Duration,
    },
}

impl RetryBackoff {
    /// Returns the delay to wait before retry number `retry` (1-based).
    #[must_use]
    pub fn delay(&self, retry: u32) -> Duration {
        match *self {
            Self::Immediate => Duration::ZERO,
            Self::Exponential { initial, max } => {
                let exponent = retry.saturating_sub(1).min(31);
                let base = initial.saturating_mul(1u32 << exponent).min(max);
                base + jitter(base)
            }
        }
    }
}

fn jitter(base: Duration) -> Duration {
    let ceiling = u64::try_from(base.as_millis())
        .unwrap_or(u64::MAX)
        .saturating_mul(JITTER_PERCENT)
        / 100;
    if ceiling == 0 {
        return Duration::ZERO;
    }
    Duration::from_millis(rand::thread_rng().gen_range(0..=ceiling))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_immediate() {
        assert_eq!(RetryBackoff::default(), RetryBackoff::Immediate);
    }

    #[test]
    fn test_immediate_never_waits() {
        for retry in 1..10 {
            assert_eq!(RetryBackoff::Immediate.delay(retry), Duration::ZERO);
        }
    }

    #[test]
    fn test_exponential_doubles_within_jitter() {
        let backoff = RetryBackoff::Exponential {
            initial: Duration::from_millis(100),
            max: Duration::from_secs(60),
        };

        let first = backoff.delay(1);
        assert!(first >= Duration::from_millis(100) && first <= Duration::from_millis(110));

        let third = backoff.delay(3);
        assert!(third >= Duration::from_millis(400) && third <= Duration::from_millis(440));
    }

    #[test]
    fn test_exponential_is_capped_at_max() {
        let backoff = RetryBackoff::Exponential {
            initial: Duration::from_millis(500),
            max: Duration::from_secs(1),
        };

        let delay = backoff.delay(30);
        assert!(delay >= Duration::from_secs(1));
        assert!(delay <= Duration::from_millis(1100));
    }
}
