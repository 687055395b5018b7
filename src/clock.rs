//! Wall clock readings for the header and routine period selection

use chrono::{Local, Timelike};

use crate::routine::Period;

/// A time of day, second resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockReading {
    hour: u32,
    minute: u32,
    second: u32,
}

impl ClockReading {
    pub fn from_time<T: Timelike>(time: &T) -> Self {
        Self {
            hour: time.hour(),
            minute: time.minute(),
            second: time.second(),
        }
    }

    /// Current local time
    pub fn now() -> Self {
        Self::from_time(&Local::now())
    }

    /// Hour on a 24-hour clock
    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn period(&self) -> Period {
        Period::from_hour(self.hour)
    }

    /// `hh:mm:ss` on a 12-hour clock where midnight and noon read 12
    pub fn display(&self) -> String {
        let hour12 = match self.hour % 12 {
            0 => 12,
            h => h,
        };
        format!("{:02}:{:02}:{:02}", hour12, self.minute, self.second)
    }
}

/// Reports period changes across successive readings
#[derive(Debug, Clone, Copy, Default)]
pub struct PeriodTracker {
    last: Option<Period>,
}

impl PeriodTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a reading; returns the period when it differs from the last one
    pub fn observe(&mut self, reading: &ClockReading) -> Option<Period> {
        let period = reading.period();
        if self.last == Some(period) {
            return None;
        }
        self.last = Some(period);
        Some(period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn at(h: u32, m: u32, s: u32) -> ClockReading {
        ClockReading::from_time(&NaiveTime::from_hms_opt(h, m, s).unwrap())
    }

    #[test]
    fn test_display_twelve_hour() {
        assert_eq!(at(0, 5, 9).display(), "12:05:09");
        assert_eq!(at(9, 30, 0).display(), "09:30:00");
        assert_eq!(at(12, 0, 0).display(), "12:00:00");
        assert_eq!(at(23, 59, 59).display(), "11:59:59");
    }

    #[test]
    fn test_period() {
        assert_eq!(at(11, 59, 59).period(), Period::Am);
        assert_eq!(at(12, 0, 0).period(), Period::Pm);
    }

    #[test]
    fn test_tracker_reports_changes_only() {
        let mut tracker = PeriodTracker::new();
        assert_eq!(tracker.observe(&at(11, 59, 58)), Some(Period::Am));
        assert_eq!(tracker.observe(&at(11, 59, 59)), None);
        assert_eq!(tracker.observe(&at(12, 0, 0)), Some(Period::Pm));
        assert_eq!(tracker.observe(&at(18, 0, 0)), None);
    }
}
