mod consts;
mod month;
mod picker;
mod prelude;
mod range;
mod types;

pub use consts::*;
pub use month::{CalendarError, CalendarMonth};
pub use picker::{DayState, PickerOptions, RangePicker};
pub use range::DateRange;
pub use types::{Month, days_in_month, is_leap_year};

use crate::prelude::*;
use chrono::{Datelike, NaiveDate, Weekday};
use std::cmp::Ordering;
use std::str::FromStr;

/// Day numbers beyond this magnitude cannot map to an `i32` year.
const MAX_DAY_NUMBER: i64 = 366 * (i32::MAX as i64 + 1);

/// A single calendar day, independent of time of day or timezone.
///
/// Components are kept exactly as given, so `2014-02-31` is representable.
/// Equality compares the fields; chronological comparisons go through
/// [`CalendarDate::day_number`], which normalizes overflowing components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{}-{:02}-{:02}", year, month, day)]
pub struct CalendarDate {
    year:  i32,
    month: i32,
    day:   i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Empty date string")]
    EmptyInput,
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid date component: {_0:?}")]
    InvalidComponent(String),
}

impl std::error::Error for ParseError {}

impl CalendarDate {
    /// Creates a date from raw components. No bounds are checked.
    pub const fn new(year: i32, month: i32, day: i32) -> Self {
        Self { year, month, day }
    }

    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month component as given (1-based, not normalized)
    pub const fn month(&self) -> i32 {
        self.month
    }

    /// Returns the day component as given (not normalized)
    pub const fn day(&self) -> i32 {
        self.day
    }

    /// Days since 1970-01-01, after carrying overflowing components.
    pub const fn day_number(&self) -> i64 {
        types::day_number(self.year as i64, self.month as i64, self.day as i64)
    }

    /// Compares two dates by the day they actually denote.
    pub const fn cmp_chronological(&self, other: &Self) -> Ordering {
        let (a, b) = (self.day_number(), other.day_number());
        if a < b {
            Ordering::Less
        } else if a > b {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }

    /// Builds the date for a day count since 1970-01-01.
    /// Returns `None` if the year does not fit in an `i32`.
    pub fn from_day_number(days: i64) -> Option<Self> {
        if !(-MAX_DAY_NUMBER..=MAX_DAY_NUMBER).contains(&days) {
            return None;
        }
        let (year, month, day) = types::civil_from_day_number(days);
        let year = i32::try_from(year).ok()?;
        Some(Self::new(year, i32::from(month), i32::from(day)))
    }

    /// The real calendar date this value denotes, e.g. `2014-02-31` becomes `2014-03-03`.
    pub fn normalized(&self) -> Option<Self> {
        Self::from_day_number(self.day_number())
    }

    /// True when every component is within its calendar bounds.
    pub fn is_calendar_valid(&self) -> bool {
        Month::try_from(self.month).is_ok_and(|month| {
            self.day >= i32::from(MIN_DAY) && self.day <= i32::from(days_in_month(self.year, month))
        })
    }

    /// Shifts the date by `days` (negative goes back).
    /// Returns `None` on overflow.
    pub fn checked_add_days(&self, days: i64) -> Option<Self> {
        Self::from_day_number(self.day_number().checked_add(days)?)
    }

    /// Weekday, 0 = Sunday .. 6 = Saturday.
    pub const fn weekday_index(&self) -> u8 {
        types::weekday_index(self.day_number())
    }

    pub const fn weekday(&self) -> Weekday {
        types::weekday_from_index(self.weekday_index())
    }

    /// The month this date falls in, after normalization.
    pub fn calendar_month(&self) -> Option<CalendarMonth> {
        let date = self.normalized()?;
        CalendarMonth::new(date.year, date.month).ok()
    }

    /// Today's date on the local clock.
    pub fn today() -> Self {
        chrono::Local::now().date_naive().into()
    }

    /// Converts to a chrono date, normalizing first.
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        let date = self.normalized()?;
        NaiveDate::from_ymd_opt(
            date.year,
            u32::try_from(date.month).ok()?,
            u32::try_from(date.day).ok()?,
        )
    }

    /// Human-readable form, e.g. "Jan 5, 2014".
    pub fn to_human(&self) -> String {
        match self.normalized() {
            Some(date) => {
                let name = Month::try_from(date.month)
                    .map_or("?", |month| MONTH_SHORT_NAMES[month.index()]);
                format!("{name} {}, {}", date.day, date.year)
            },
            None => self.to_string(),
        }
    }

    /// Month-first form used by text inputs, e.g. "1/5/2014".
    pub fn to_slashed(&self) -> String {
        format!(
            "{}{MONTH_FIRST_SEPARATOR}{}{MONTH_FIRST_SEPARATOR}{}",
            self.month, self.day, self.year
        )
    }

    /// Lenient parse of `YYYY-MM-DD`: empty or malformed input yields `None`.
    pub fn from_input(input: &str) -> Option<Self> {
        match input.parse() {
            Ok(date) => Some(date),
            Err(err) => {
                log::debug!("ignoring date input {input:?}: {err}");
                None
            },
        }
    }

    /// Parses the month-first `M/D/YYYY` form.
    ///
    /// # Errors
    /// Returns `ParseError` if the input is empty, has the wrong number of
    /// fields, or a field is not an integer.
    pub fn from_slashed(input: &str) -> Result<Self, ParseError> {
        let [month, day, year] = split_fields(input, MONTH_FIRST_SEPARATOR)?;
        Ok(Self::new(year, month, day))
    }

    /// Reads free text typed into a range input: either `YYYY-MM-DD` or
    /// `M/D/YYYY`. The result is normalized to a real calendar date.
    pub fn from_user_text(input: &str) -> Option<Self> {
        let parsed = if input.contains(MONTH_FIRST_SEPARATOR) {
            Self::from_slashed(input)
        } else {
            input.parse()
        };
        match parsed {
            Ok(date) => date.normalized(),
            Err(err) => {
                log::debug!("ignoring typed date {input:?}: {err}");
                None
            },
        }
    }
}

/// Splits `input` into exactly three integer fields.
/// A leading `-` is the sign of the first field, not a separator.
fn split_fields(input: &str, separator: char) -> Result<[i32; 3], ParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let (sign, body) = trimmed
        .strip_prefix('-')
        .map_or(("", trimmed), |rest| ("-", rest));
    let parts: Vec<&str> = body.split(separator).map(str::trim).collect();
    let [a, b, c] = parts.as_slice() else {
        return Err(ParseError::InvalidFormat(format!(
            "expected 3 fields separated by '{separator}', found {}: {trimmed}",
            parts.len()
        )));
    };

    Ok([parse_i32(&format!("{sign}{a}"))?, parse_i32(b)?, parse_i32(c)?])
}

fn parse_i32(s: &str) -> Result<i32, ParseError> {
    s.parse::<i32>()
        .map_err(|_| ParseError::InvalidComponent(s.to_owned()))
}

impl FromStr for CalendarDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let [year, month, day] = split_fields(s, DATE_SEPARATOR)?;
        Ok(Self::new(year, month, day))
    }
}

impl From<NaiveDate> for CalendarDate {
    #[allow(clippy::cast_possible_wrap)]
    fn from(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month() as i32, date.day() as i32)
    }
}

impl serde::Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
pub(crate) mod test_utils {
    use crate::{CalendarDate, CalendarMonth};

    pub fn date(year: i32, month: i32, day: i32) -> CalendarDate {
        CalendarDate::new(year, month, day)
    }

    pub fn month(year: i32, month: i32) -> CalendarMonth {
        CalendarMonth::new(year, month).expect("test month should be in 1..=12")
    }
}
