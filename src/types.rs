use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, LEAP_YEAR_CYCLE,
    MAX_MONTH, MIN_MONTH,
};
use crate::month::CalendarError;
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU8;

/// A month value guaranteed to be in the range `MIN_MONTH..=MAX_MONTH` (1..=12)
/// Uses `NonZeroU8` internally, so 0 is not a valid month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    /// Creates a new Month, validating that it's non-zero and <= `MAX_MONTH`
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidArgument` if the value is 0 or > `MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, CalendarError> {
        let non_zero =
            NonZeroU8::new(value).ok_or(CalendarError::InvalidArgument(i32::from(value)))?;
        if value > MAX_MONTH {
            return Err(CalendarError::InvalidArgument(i32::from(value)));
        }
        Ok(Self(non_zero))
    }

    /// Returns the month value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    /// Zero-based position, for indexing the name tables
    #[inline]
    pub(crate) const fn index(self) -> usize {
        (self.0.get() - MIN_MONTH) as usize
    }
}

impl Default for Month {
    /// January
    fn default() -> Self {
        Self(NonZeroU8::MIN)
    }
}

impl TryFrom<u8> for Month {
    type Error = CalendarError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<i32> for Month {
    type Error = CalendarError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| CalendarError::InvalidArgument(value))
            .and_then(Self::new)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Helper functions

/// Proleptic Gregorian leap year rule; negative years follow the same rule.
pub const fn is_leap_year(year: i32) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn days_in_month(year: i32, month: Month) -> u8 {
    if month.get() == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month.get() as usize]
    }
}

/// Days since 1970-01-01 for a (year, month, day) triple.
///
/// Components outside their calendar bounds carry over the way a native date
/// constructor does: month 13 is January of the next year, day 0 is the last
/// day of the previous month, day 31 of February spills into March.
/// `NaiveDate` rejects such components and caps the year range, so this is
/// computed directly.
pub(crate) const fn day_number(year: i64, month: i64, day: i64) -> i64 {
    let month0 = month - MIN_MONTH as i64;
    let year = year + month0.div_euclid(MAX_MONTH as i64);
    let month = month0.rem_euclid(MAX_MONTH as i64) + MIN_MONTH as i64;

    // Shift the year to start in March so the leap day is the last day.
    let y = if month <= FEBRUARY as i64 { year - 1 } else { year };
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let mp = (month + 9) % 12;
    let doy = (153 * mp + 2) / 5;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468 + (day - 1)
}

/// Inverse of [`day_number`]: the normalized (year, month, day) for a day count.
pub(crate) const fn civil_from_day_number(days: i64) -> (i64, u8, u8) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + if month <= FEBRUARY as i64 { 1 } else { 0 };
    (year, month as u8, day as u8)
}

/// Weekday of a day number, 0 = Sunday .. 6 = Saturday.
pub(crate) const fn weekday_index(day_number: i64) -> u8 {
    // 1970-01-01 was a Thursday
    (day_number + 4).rem_euclid(7) as u8
}

/// Maps a Sunday-based index onto chrono's weekday.
pub(crate) const fn weekday_from_index(index: u8) -> Weekday {
    match index % 7 {
        0 => Weekday::Sun,
        1 => Weekday::Mon,
        2 => Weekday::Tue,
        3 => Weekday::Wed,
        4 => Weekday::Thu,
        5 => Weekday::Fri,
        _ => Weekday::Sat,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(value: u8) -> Month {
        Month::new(value).unwrap()
    }

    #[test]
    fn test_month_new_valid() {
        for m in 1..=12 {
            assert!(Month::new(m).is_ok(), "Month {m} should be valid");
        }
    }

    #[test]
    fn test_month_new_invalid() {
        assert!(matches!(Month::new(0), Err(CalendarError::InvalidArgument(0))));
        assert!(matches!(Month::new(13), Err(CalendarError::InvalidArgument(13))));
        assert!(matches!(Month::new(255), Err(CalendarError::InvalidArgument(255))));
    }

    #[test]
    fn test_month_default_is_january() {
        assert_eq!(Month::default().get(), 1);
    }

    #[test]
    fn test_month_try_from_i32() {
        let m: Month = 8_i32.try_into().unwrap();
        assert_eq!(m.get(), 8);

        let result: Result<Month, _> = (-1_i32).try_into();
        assert!(matches!(result, Err(CalendarError::InvalidArgument(-1))));

        let result: Result<Month, _> = 300_i32.try_into();
        assert!(matches!(result, Err(CalendarError::InvalidArgument(300))));
    }

    #[test]
    fn test_month_serde() {
        let m = month(8);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "8");

        let parsed: Month = serde_json::from_str(&json).unwrap();
        assert_eq!(m, parsed);

        assert!(serde_json::from_str::<Month>("13").is_err());
    }

    #[test]
    fn test_is_leap_year_cases() {
        struct TestCase {
            year:        i32,
            is_leap:     bool,
            description: &'static str,
        }

        let cases = [
            TestCase { year: 2020, is_leap: true, description: "divisible by 4" },
            TestCase { year: 2014, is_leap: false, description: "not divisible by 4" },
            TestCase { year: 1900, is_leap: false, description: "century not divisible by 400" },
            TestCase { year: 2100, is_leap: false, description: "century not divisible by 400" },
            TestCase { year: 2000, is_leap: true, description: "divisible by 400" },
            TestCase { year: 0, is_leap: true, description: "year zero is divisible by 400" },
            TestCase { year: -4, is_leap: true, description: "negative, divisible by 4" },
            TestCase { year: -100, is_leap: false, description: "negative century" },
        ];

        for case in &cases {
            assert_eq!(
                is_leap_year(case.year),
                case.is_leap,
                "Year {} ({})",
                case.year,
                case.description
            );
        }
    }

    #[test]
    fn test_february_day_count_tracks_leap_rule() {
        for year in -800..=2800 {
            let expected = if (year % 4 == 0 && year % 100 != 0) || year % 400 == 0 { 29 } else { 28 };
            assert_eq!(days_in_month(year, month(2)), expected, "February {year}");
        }
    }

    #[test]
    fn test_all_months_have_valid_days() {
        let expected = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for m in 1..=12 {
            assert_eq!(
                days_in_month(2023, month(m)),
                expected[m as usize],
                "Month {m} has incorrect day count"
            );
        }
    }

    #[test]
    fn test_day_number_epoch_and_known_points() {
        assert_eq!(day_number(1970, 1, 1), 0);
        assert_eq!(day_number(1969, 12, 31), -1);
        assert_eq!(day_number(2000, 3, 1), 11_017);
        assert_eq!(day_number(2014, 3, 1), 16_130);
    }

    #[test]
    fn test_day_number_carries_overflowing_components() {
        assert_eq!(day_number(2014, 2, 31), day_number(2014, 3, 3));
        assert_eq!(day_number(2014, 13, 1), day_number(2015, 1, 1));
        assert_eq!(day_number(2014, 0, 1), day_number(2013, 12, 1));
        assert_eq!(day_number(2014, 3, 0), day_number(2014, 2, 28));
        assert_eq!(day_number(2016, 3, 0), day_number(2016, 2, 29));
    }

    #[test]
    fn test_civil_round_trip_across_eras() {
        for days in (-800_000..800_000).step_by(997) {
            let (y, m, d) = civil_from_day_number(days);
            assert_eq!(day_number(y, i64::from(m), i64::from(d)), days);
        }
    }

    #[test]
    fn test_weekday_index() {
        // 1970-01-01 Thursday, 2014-03-01 Saturday, 2000-01-02 Sunday
        assert_eq!(weekday_index(0), 4);
        assert_eq!(weekday_index(day_number(2014, 3, 1)), 6);
        assert_eq!(weekday_index(day_number(2000, 1, 2)), 0);
        assert_eq!(weekday_index(-1), 3);
    }

    #[test]
    fn test_weekday_from_index() {
        assert_eq!(weekday_from_index(0), Weekday::Sun);
        assert_eq!(weekday_from_index(6), Weekday::Sat);
        for index in 0..7 {
            assert_eq!(
                weekday_from_index(index).num_days_from_sunday(),
                u32::from(index)
            );
        }
    }
}
