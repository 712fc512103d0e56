//! Cancellable scheduled tasks.
//!
//! The load timeout and the settle delay are tracked as owned values on
//! the widget rather than opaque platform timer handles: cancellation is
//! `Option::take`, and "timer guaranteed cancelled" is a field the tests
//! can check directly.

use std::time::{Duration, Instant};

/// A one-shot deadline owned by the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTask {
    due: Instant,
}

impl ScheduledTask {
    /// Schedules a task `delay` from now.
    #[must_use]
    pub fn after(delay: Duration) -> Self {
        Self {
            due: Instant::now() + delay,
        }
    }

    /// Schedules a task at an explicit instant.
    #[must_use]
    pub fn at(due: Instant) -> Self {
        Self { due }
    }

    /// Returns `true` once `now` has reached the deadline.
    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.due
    }

    /// Returns the deadline.
    #[must_use]
    pub fn due_at(&self) -> Instant {
        self.due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_due_before_deadline() {
        let now = Instant::now();
        let task = ScheduledTask::at(now + Duration::from_secs(5));
        assert!(!task.is_due(now));
        assert!(!task.is_due(now + Duration::from_secs(4)));
    }

    #[test]
    fn due_at_and_after_deadline() {
        let now = Instant::now();
        let task = ScheduledTask::at(now + Duration::from_secs(5));
        assert!(task.is_due(now + Duration::from_secs(5)));
        assert!(task.is_due(now + Duration::from_secs(60)));
    }

    #[test]
    fn after_targets_the_future() {
        let task = ScheduledTask::after(Duration::from_secs(5));
        assert!(!task.is_due(Instant::now()));
        assert!(task.due_at() > Instant::now());
    }

    #[test]
    fn cancellation_is_option_take() {
        let mut slot = Some(ScheduledTask::after(Duration::from_millis(1)));
        assert!(slot.take().is_some());
        // Once taken, nothing is left to fire
        assert!(slot.is_none());
    }
}
