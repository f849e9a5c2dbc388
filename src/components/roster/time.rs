use chrono::{DateTime, Datelike, TimeZone, Utc};
use chrono_tz::Tz;

/// Source of the month treated as "now" when deriving a center's status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthClock {
    /// Wall clock in the given timezone
    Wall(Tz),
    /// A fixed zero-based month index
    Fixed(usize),
}

impl MonthClock {
    /// Zero-based index of the current month
    pub fn current_month(&self) -> usize {
        match self {
            MonthClock::Wall(tz) => month_index(&Utc::now().with_timezone(tz)),
            MonthClock::Fixed(month) => *month,
        }
    }
}

/// Zero-based month index of a timestamp (January = 0)
pub fn month_index<T: TimeZone>(time: &DateTime<T>) -> usize {
    time.month0() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_index() {
        let time = Utc.with_ymd_and_hms(2026, 3, 31, 12, 0, 0).unwrap();
        assert_eq!(month_index(&time), 2);
    }

    #[test]
    fn test_month_index_respects_timezone() {
        // Late evening of March 31st in UTC is already April in Seoul
        let time = Utc.with_ymd_and_hms(2026, 3, 31, 20, 0, 0).unwrap();
        assert_eq!(month_index(&time), 2);
        assert_eq!(month_index(&time.with_timezone(&chrono_tz::Asia::Seoul)), 3);
    }

    #[test]
    fn test_fixed_clock() {
        assert_eq!(MonthClock::Fixed(7).current_month(), 7);
        assert!(MonthClock::Wall(chrono_tz::UTC).current_month() < 12);
    }
}
