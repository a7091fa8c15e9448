//! Day-count conventions turning a pair of calendar dates into a year fraction.
//!
//! Maturity dates come in as calendar dates but rate and volatility are annualized, so
//! the day difference has to be converted explicitly before it reaches a pricer.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{require, PricingResult};

/// Supported conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayCount {
    /// Calendar days / 365
    #[default]
    Actual365Fixed,
    /// Calendar days / 360
    Actual360,
    /// Weekdays / 252 (holidays are not modelled)
    Business252,
}

impl DayCount {
    /// Year fraction between `start` (inclusive) and `end` (exclusive).
    pub fn year_fraction(self, start: NaiveDate, end: NaiveDate) -> PricingResult<f64> {
        require!(
            end >= start,
            "maturity date {} is before valuation date {}",
            end,
            start
        );

        let fraction = match self {
            DayCount::Actual365Fixed => calendar_days(start, end) as f64 / 365.0,
            DayCount::Actual360 => calendar_days(start, end) as f64 / 360.0,
            DayCount::Business252 => business_days(start, end) as f64 / 252.0,
        };
        Ok(fraction)
    }
}

fn calendar_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

/// Monday-Friday days in `[start, end)`.
fn business_days(start: NaiveDate, end: NaiveDate) -> i64 {
    let days = calendar_days(start, end);
    let full_weeks = days / 7;
    let mut count = full_weeks * 5;

    let mut day = start + chrono::Duration::days(full_weeks * 7);
    while day < end {
        if !matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
            count += 1;
        }
        day = day + chrono::Duration::days(1);
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_actual_365_full_year() {
        let yf = DayCount::Actual365Fixed
            .year_fraction(date(2021, 1, 1), date(2022, 1, 1))
            .unwrap();
        assert!((yf - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_actual_360() {
        let yf = DayCount::Actual360
            .year_fraction(date(2021, 6, 1), date(2021, 9, 16))
            .unwrap();
        // 107 calendar days
        assert!((yf - 107.0 / 360.0).abs() < 1e-12);
    }

    #[test]
    fn test_business_252_skips_weekends() {
        // Mon 2021-09-06 .. Mon 2021-09-20: two full weeks
        let yf = DayCount::Business252
            .year_fraction(date(2021, 9, 6), date(2021, 9, 20))
            .unwrap();
        assert!((yf - 10.0 / 252.0).abs() < 1e-12);

        // Fri -> Mon counts only the Friday
        assert_eq!(business_days(date(2021, 9, 10), date(2021, 9, 13)), 1);
        // Sat -> Mon counts nothing
        assert_eq!(business_days(date(2021, 9, 11), date(2021, 9, 13)), 0);
    }

    #[test]
    fn test_same_day_is_zero() {
        let d = date(2021, 9, 16);
        for dc in [
            DayCount::Actual365Fixed,
            DayCount::Actual360,
            DayCount::Business252,
        ] {
            assert_eq!(dc.year_fraction(d, d).unwrap(), 0.0);
        }
    }

    #[test]
    fn test_end_before_start_rejected() {
        let result = DayCount::Actual365Fixed.year_fraction(date(2021, 9, 16), date(2021, 9, 1));
        assert!(matches!(
            result,
            Err(crate::error::PricingError::InvalidParameter(_))
        ));
    }
}
