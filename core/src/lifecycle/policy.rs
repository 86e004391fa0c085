use std::time::Duration;

pub const DEFAULT_POLL_DELAY_MS: u64 = 5_000;

/// The service kills tasks after 24 hours. 16560 polls at 5s is 23 hours,
/// leaving room to stop the task and fetch its final state ourselves.
pub const POLL_HARD_CAP: u32 = 16_560;

pub const DEFAULT_TIMEOUT_SECS: f64 = 3_600.0;

/// Poll budget: fixed delay between status checks and an upper bound on the
/// number of checks regardless of the caller's timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub delay: Duration,
    pub hard_cap: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(DEFAULT_POLL_DELAY_MS),
            hard_cap: POLL_HARD_CAP,
        }
    }
}

impl PollPolicy {
    pub fn new(delay_ms: u64, hard_cap: u32) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            hard_cap,
        }
    }

    /// `min(ceil(timeout_ms / delay_ms), hard_cap)`; non-positive or
    /// non-finite timeouts give a zero budget.
    pub fn max_attempts(&self, timeout_secs: f64) -> u32 {
        if !timeout_secs.is_finite() || timeout_secs <= 0.0 {
            return 0;
        }
        let delay_ms = self.delay.as_millis().max(1) as f64;
        let attempts = (timeout_secs * 1000.0 / delay_ms).ceil();
        if attempts >= self.hard_cap as f64 {
            self.hard_cap
        } else {
            attempts as u32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_attempts_rounds_up() {
        let p = PollPolicy::default();
        assert_eq!(p.max_attempts(10.0), 2);
        assert_eq!(p.max_attempts(11.0), 3);
        assert_eq!(p.max_attempts(0.5), 1);
        assert_eq!(p.max_attempts(3_600.0), 720);
    }

    #[test]
    fn test_max_attempts_capped() {
        let p = PollPolicy::default();
        assert_eq!(p.max_attempts(86_400.0), POLL_HARD_CAP);
        assert_eq!(p.max_attempts(82_800.0), POLL_HARD_CAP);
        assert_eq!(p.max_attempts(82_795.0), POLL_HARD_CAP - 1);
    }

    #[test]
    fn test_max_attempts_degenerate_timeouts() {
        let p = PollPolicy::default();
        assert_eq!(p.max_attempts(0.0), 0);
        assert_eq!(p.max_attempts(-5.0), 0);
        assert_eq!(p.max_attempts(f64::NAN), 0);
    }
}
