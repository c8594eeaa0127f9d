use serde::{Deserialize, Serialize};

use crate::{CalendarDate, RANGE_LABEL_SEPARATOR};

/// A pair of optional dates with inclusive membership.
///
/// Either end may be missing, and `from` may be after `to`. Such a range is
/// not valid: it includes nothing and reports `is_valid() == false` instead
/// of failing, so partially typed input never breaks the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default)]
    from: Option<CalendarDate>,
    #[serde(default)]
    to:   Option<CalendarDate>,
}

impl DateRange {
    /// Creates a range from already-parsed ends.
    pub const fn new(from: Option<CalendarDate>, to: Option<CalendarDate>) -> Self {
        Self { from, to }
    }

    /// Parses both ends as `YYYY-MM-DD`. Empty or malformed strings become
    /// absent ends.
    pub fn parse(from: &str, to: &str) -> Self {
        Self::new(CalendarDate::from_input(from), CalendarDate::from_input(to))
    }

    /// The `days` days before `end`, through `end` itself.
    /// Both ends are absent if the start would overflow.
    pub fn trailing(end: CalendarDate, days: i64) -> Self {
        let from = days.checked_neg().and_then(|back| end.checked_add_days(back));
        let to = from.map(|_| end);
        Self::new(from, to)
    }

    /// The trailing range ending today.
    pub fn last_days(days: i64) -> Self {
        Self::trailing(CalendarDate::today(), days)
    }

    pub const fn from(&self) -> Option<CalendarDate> {
        self.from
    }

    pub const fn to(&self) -> Option<CalendarDate> {
        self.to
    }

    #[must_use]
    pub const fn with_from(self, from: Option<CalendarDate>) -> Self {
        Self { from, ..self }
    }

    #[must_use]
    pub const fn with_to(self, to: Option<CalendarDate>) -> Self {
        Self { to, ..self }
    }

    /// Both ends, if the range is valid.
    pub fn bounds(&self) -> Option<(CalendarDate, CalendarDate)> {
        match (self.from, self.to) {
            (Some(from), Some(to)) if from.day_number() <= to.day_number() => Some((from, to)),
            _ => None,
        }
    }

    /// True if both ends are present and `from` is not after `to`.
    pub fn is_valid(&self) -> bool {
        self.bounds().is_some()
    }

    /// Checks if a `YYYY-MM-DD` string falls within the range, ends included.
    /// Malformed input and invalid ranges include nothing.
    pub fn includes(&self, date: &str) -> bool {
        CalendarDate::from_input(date).is_some_and(|date| self.contains(&date))
    }

    /// Checks if the range contains a given date, ends included.
    pub fn contains(&self, date: &CalendarDate) -> bool {
        self.bounds().is_some_and(|(from, to)| {
            let day = date.day_number();
            from.day_number() <= day && day <= to.day_number()
        })
    }

    /// Number of days covered, both ends included.
    pub fn day_count(&self) -> Option<i64> {
        self.bounds()
            .map(|(from, to)| to.day_number() - from.day_number() + 1)
    }

    /// Human-readable label, e.g. "Jan 1, 2014 — Jan 31, 2014".
    /// Present whenever both ends are, valid or not.
    pub fn label(&self) -> Option<String> {
        let (from, to) = (self.from?, self.to?);
        Some(format!(
            "{}{RANGE_LABEL_SEPARATOR}{}",
            from.to_human(),
            to.to_human()
        ))
    }
}
