//! State behind a three-month date-range picker.
//!
//! The picker knows which months are on screen, where a two-click selection
//! stands, and which days are selected or disabled. Drawing those days and
//! routing clicks to [`RangePicker::select`] is left to the view layer.

use serde::{Deserialize, Serialize};

use crate::{CalendarDate, CalendarMonth, DEFAULT_RANGE_DAYS, DateRange, Month, VISIBLE_MONTHS};

/// Initial range handed to the picker by the host, as `YYYY-MM-DD` strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerOptions {
    pub from: Option<String>,
    pub to:   Option<String>,
}

impl PickerOptions {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: Some(from.into()),
            to:   Some(to.into()),
        }
    }
}

/// How a single day cell should be shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DayState {
    /// Inside the current range
    pub selected: bool,
    /// In the future, or before the start while choosing the end
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangePicker {
    range:     DateRange,
    visible:   CalendarMonth,
    selecting: bool,
    today:     CalendarDate,
}

impl RangePicker {
    pub fn new(options: &PickerOptions) -> Self {
        Self::with_today(options, CalendarDate::today())
    }

    /// Builds a picker around a fixed "today".
    ///
    /// An invalid or missing configured range falls back to the last
    /// `DEFAULT_RANGE_DAYS` days. The newest visible month is the month of
    /// the range's end.
    pub fn with_today(options: &PickerOptions, today: CalendarDate) -> Self {
        let configured = DateRange::parse(
            options.from.as_deref().unwrap_or_default(),
            options.to.as_deref().unwrap_or_default(),
        );
        let range = if configured.is_valid() {
            configured
        } else {
            log::debug!("no valid configured range ({options:?}), using the last {DEFAULT_RANGE_DAYS} days");
            DateRange::trailing(today, DEFAULT_RANGE_DAYS)
        };

        let visible = range
            .to()
            .and_then(|to| to.calendar_month())
            .or_else(|| today.calendar_month())
            .unwrap_or_else(|| CalendarMonth::from_parts(today.year(), Month::default()));

        Self {
            range,
            visible,
            selecting: false,
            today,
        }
    }

    pub const fn range(&self) -> DateRange {
        self.range
    }

    pub const fn today(&self) -> CalendarDate {
        self.today
    }

    /// Newest of the visible months.
    pub const fn visible_month(&self) -> CalendarMonth {
        self.visible
    }

    /// True between the first and second click of a selection.
    pub const fn is_selecting(&self) -> bool {
        self.selecting
    }

    /// The months on screen, oldest first, ending with [`Self::visible_month`].
    pub fn visible_months(&self) -> [CalendarMonth; VISIBLE_MONTHS] {
        let mut months = [self.visible; VISIBLE_MONTHS];
        for index in (0..VISIBLE_MONTHS - 1).rev() {
            let newer = months[index + 1];
            months[index] = newer.previous().unwrap_or(newer);
        }
        months
    }

    pub fn set_visible_month(&mut self, month: CalendarMonth) {
        log::trace!("visible month {} -> {month}", self.visible);
        self.visible = month;
    }

    pub fn shift_next(&mut self) -> &mut Self {
        if let Some(next) = self.visible.next() {
            self.set_visible_month(next);
        }
        self
    }

    pub fn shift_previous(&mut self) -> &mut Self {
        if let Some(previous) = self.visible.previous() {
            self.set_visible_month(previous);
        }
        self
    }

    /// Applies a click on `date`.
    ///
    /// The first click sets both ends and starts a selection; the second
    /// click sets the end and finishes it. Returns false, changing nothing,
    /// if the day is disabled.
    pub fn select(&mut self, date: CalendarDate) -> bool {
        if self.day_state(&date).disabled {
            log::debug!("refusing disabled date {date}");
            return false;
        }

        self.range = self.range.with_to(Some(date));
        if self.selecting {
            self.selecting = false;
        } else {
            self.range = self.range.with_from(Some(date));
            self.selecting = true;
        }
        log::trace!("selected {date}, selecting: {}", self.selecting);
        true
    }

    pub fn day_state(&self, date: &CalendarDate) -> DayState {
        let day = date.day_number();
        let before_start = self.selecting
            && self
                .range
                .from()
                .is_some_and(|from| day < from.day_number());

        DayState {
            selected: self.range.contains(date),
            disabled: day > self.today.day_number() || before_start,
        }
    }

    /// Stores the start typed into the "from" input. Unreadable text clears
    /// it. Returns whether the range is now valid.
    pub fn update_from(&mut self, text: &str) -> bool {
        self.range = self.range.with_from(CalendarDate::from_user_text(text));
        log::trace!("from updated to {:?}", self.range.from());
        self.range.is_valid()
    }

    /// Stores the end typed into the "to" input. Unreadable text clears it.
    /// Returns whether the range is now valid.
    pub fn update_to(&mut self, text: &str) -> bool {
        self.range = self.range.with_to(CalendarDate::from_user_text(text));
        log::trace!("to updated to {:?}", self.range.to());
        self.range.is_valid()
    }

    /// Start as `YYYY-MM-DD`, the value handed back to the host.
    pub fn start_value(&self) -> Option<String> {
        self.range.from().map(|date| date.to_string())
    }

    /// End as `YYYY-MM-DD`, the value handed back to the host.
    pub fn end_value(&self) -> Option<String> {
        self.range.to().map(|date| date.to_string())
    }

    /// Start as shown in the "from" text input.
    pub fn start_input(&self) -> Option<String> {
        self.range.from().map(|date| date.to_slashed())
    }

    /// End as shown in the "to" text input.
    pub fn end_input(&self) -> Option<String> {
        self.range.to().map(|date| date.to_slashed())
    }

    /// Dropdown label, e.g. "Jan 1, 2014 — Jan 31, 2014".
    pub fn label(&self) -> Option<String> {
        self.range.label()
    }
}
