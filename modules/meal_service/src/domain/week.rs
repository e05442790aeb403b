//! Week arithmetic. Weeks start on Sunday.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Sunday on or before `date`
pub fn week_start_for(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

pub fn is_week_start(date: NaiveDate) -> bool {
    date.weekday() == Weekday::Sun
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_start_for_each_weekday() {
        // 2026-10-18 is a Sunday
        let sunday = date(2026, 10, 18);
        for offset in 0..7 {
            let day = sunday + Duration::days(offset);
            assert_eq!(week_start_for(day), sunday, "offset {}", offset);
        }
        assert_eq!(week_start_for(date(2026, 10, 25)), date(2026, 10, 25));
    }

    #[test]
    fn test_is_week_start() {
        assert!(is_week_start(date(2026, 10, 18)));
        assert!(!is_week_start(date(2026, 10, 19)));
    }
}
