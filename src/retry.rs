//! Fixed inter-attempt delay schedule for lookup submissions.

use crate::error::Error;
use std::time::Duration;

/// Delay schedule driving the bounded retry loop.
///
/// One entry per attempt; the entry for attempt `i` is waited only after
/// attempt `i` fails and before attempt `i + 1`, so the last entry is never
/// waited. The default is the production schedule: three attempts with delays
/// of 1000ms and 1001ms between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrySchedule {
    delays: Vec<Duration>,
}

impl Default for RetrySchedule {
    fn default() -> Self {
        Self {
            delays: vec![
                Duration::from_millis(1000),
                Duration::from_millis(1001),
                Duration::from_millis(1002),
            ],
        }
    }
}

impl RetrySchedule {
    /// Build a schedule from per-attempt delays. Must not be empty.
    pub fn new(delays: impl IntoIterator<Item = Duration>) -> Result<Self, Error> {
        let delays: Vec<Duration> = delays.into_iter().collect();
        if delays.is_empty() {
            return Err(Error::InvalidConfig {
                message: "retry schedule must allow at least one attempt".into(),
                source: None,
            });
        }
        Ok(Self { delays })
    }

    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.delays.len() as u32
    }

    /// Delay waited after failed `attempt` (1-based); `None` after the final
    /// attempt, which terminates the submission instead.
    #[must_use]
    pub fn delay_after(&self, attempt: u32) -> Option<Duration> {
        if attempt == 0 || attempt >= self.max_attempts() {
            return None;
        }
        self.delays.get(attempt as usize - 1).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn default_schedule_is_three_attempts() {
        let schedule = RetrySchedule::default();
        assert_eq!(schedule.max_attempts(), 3);
        assert_eq!(schedule.delay_after(1), Some(Duration::from_millis(1000)));
        assert_eq!(schedule.delay_after(2), Some(Duration::from_millis(1001)));
        assert_eq!(schedule.delay_after(3), None);
    }

    #[test]
    fn single_attempt_schedule_never_waits() {
        let schedule = RetrySchedule::new([Duration::from_millis(5)]).unwrap();
        assert_eq!(schedule.max_attempts(), 1);
        assert_eq!(schedule.delay_after(1), None);
    }

    #[test]
    fn empty_schedule_is_rejected() {
        let err = RetrySchedule::new([]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfig);
    }
}
