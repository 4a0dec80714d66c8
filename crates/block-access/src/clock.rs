//! Wall-clock sources.

use chrono::Local;

use crate::evaluator::LocalTime;

/// Supplies the current local time to the authentication gate.
pub trait Clock: Send + Sync {
    fn now(&self) -> LocalTime;
}

/// Server local time as reported by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> LocalTime {
        LocalTime::from_datetime(&Local::now())
    }
}

/// Always returns the same instant. Used by tests and dry runs.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub LocalTime);

impl Clock for FixedClock {
    fn now(&self) -> LocalTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::WeekDay;

    #[test]
    fn test_fixed_clock() {
        let now = LocalTime::new(WeekDay::Sat, 11, 15);
        assert_eq!(FixedClock(now).now(), now);
    }

    #[test]
    fn test_system_clock_in_range() {
        let now = SystemClock.now();
        assert!(now.hour <= 23);
        assert!(now.minute <= 59);
    }
}
