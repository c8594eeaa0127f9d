use std::fmt;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::{
    CalendarDate, DAYS_PER_WEEK, DECEMBER, JANUARY, MAX_MONTH, MIN_DAY, MIN_MONTH, MONTH_NAMES,
    MONTH_SHORT_NAMES,
    types::{self, Month},
};

/// Error type for calendar construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// Month number outside `MIN_MONTH..=MAX_MONTH`.
    #[error("Invalid argument: month {0} (must be {min}-{max})", min = MIN_MONTH, max = MAX_MONTH)]
    InvalidArgument(i32),
}

/// One month of one year, with the facts a calendar view needs to lay it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CalendarMonth {
    year:  i32,
    month: Month,
}

impl CalendarMonth {
    /// Creates a month of the given year. `month` is 1-based.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidArgument` if `month` is outside 1..=12.
    pub fn new(year: i32, month: i32) -> Result<Self, CalendarError> {
        let month = Month::try_from(month)?;
        Ok(Self { year, month })
    }

    pub const fn from_parts(year: i32, month: Month) -> Self {
        Self { year, month }
    }

    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Returns the 1-based month number
    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    /// Number of days in this month, 28 to 31.
    pub const fn day_count(&self) -> u8 {
        types::days_in_month(self.year, self.month)
    }

    pub const fn is_leap_year(&self) -> bool {
        types::is_leap_year(self.year)
    }

    /// Weekday of the 1st, 0 = Sunday .. 6 = Saturday.
    pub const fn first_weekday_index(&self) -> u8 {
        types::weekday_index(self.first_day_number())
    }

    pub const fn first_weekday(&self) -> Weekday {
        types::weekday_from_index(self.first_weekday_index())
    }

    /// The month before this one, or `None` if the year would underflow.
    pub fn previous(&self) -> Option<Self> {
        if self.month.get() == JANUARY {
            let year = self.year.checked_sub(1)?;
            Month::new(DECEMBER).ok().map(|month| Self { year, month })
        } else {
            Month::new(self.month.get() - 1).ok().map(|month| Self { year: self.year, month })
        }
    }

    /// The month after this one, or `None` if the year would overflow.
    pub fn next(&self) -> Option<Self> {
        if self.month.get() == DECEMBER {
            let year = self.year.checked_add(1)?;
            Month::new(JANUARY).ok().map(|month| Self { year, month })
        } else {
            Month::new(self.month.get() + 1).ok().map(|month| Self { year: self.year, month })
        }
    }

    /// Full name with year, e.g. "March 2014".
    pub fn name(&self) -> String {
        format!("{} {}", MONTH_NAMES[self.month.index()], self.year)
    }

    /// Abbreviated name with year, e.g. "Mar 2014".
    pub fn short_name(&self) -> String {
        format!("{} {}", MONTH_SHORT_NAMES[self.month.index()], self.year)
    }

    pub fn first_day(&self) -> CalendarDate {
        CalendarDate::new(self.year, i32::from(self.month.get()), i32::from(MIN_DAY))
    }

    pub fn last_day(&self) -> CalendarDate {
        CalendarDate::new(
            self.year,
            i32::from(self.month.get()),
            i32::from(self.day_count()),
        )
    }

    /// Every date of the month, in order.
    pub fn days(&self) -> impl Iterator<Item = CalendarDate> + use<> {
        let (year, month) = (self.year, i32::from(self.month.get()));
        (i32::from(MIN_DAY)..=i32::from(self.day_count()))
            .map(move |day| CalendarDate::new(year, month, day))
    }

    /// Whether `date`, once normalized, falls in this month.
    pub fn contains(&self, date: &CalendarDate) -> bool {
        date.calendar_month().is_some_and(|month| month == *self)
    }

    /// Calendar grid, one row per week running Sunday to Saturday.
    ///
    /// Cells before the 1st and after the last day are `None`. The grid has
    /// four to six rows and never ends in an empty row.
    pub fn weeks(&self) -> Vec<[Option<u8>; DAYS_PER_WEEK]> {
        let count = self.day_count();
        let offset = usize::from(self.first_weekday_index());
        let mut weeks = Vec::with_capacity(6);
        let mut week = [None; DAYS_PER_WEEK];
        let mut column = offset;

        for day in MIN_DAY..=count {
            week[column] = Some(day);
            column += 1;
            if column == DAYS_PER_WEEK {
                weeks.push(week);
                week = [None; DAYS_PER_WEEK];
                column = 0;
            }
        }
        if column > 0 {
            weeks.push(week);
        }

        weeks
    }

    const fn first_day_number(&self) -> i64 {
        types::day_number(self.year as i64, self.month.get() as i64, MIN_DAY as i64)
    }
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month.get())
    }
}
