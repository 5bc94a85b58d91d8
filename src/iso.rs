//! Julian Day numbers and the proleptic Gregorian calendar of ISO 8601.
//!
//! Every calendar of this crate counts days the same way: as **Julian Day
//! numbers**, where day 0 is Monday 24 November 4714 BC (proleptic
//! Gregorian). The `IsoCounter` converts those numbers to and from ISO
//! year-month-day fields, so dates from different calendars can be
//! compared and exchanged.

use std::fmt;

use crate::arith::{is_gregorian_leap_year, shift_cycle};
use crate::clockwork::{CalendarRule, CanvasField, Clockwork, CycleLevel, Fields};
use crate::error::{Error, Result};
use crate::util::RangeExt;
use crate::week::{WeekClock, WeekFigures, WeekRule};


/// Julian Day number of ISO 0000-03-01, the start of the 400-year cycle.
pub const ISO_EPOCH: i64 = 1_721_120;

/// Weekday of Julian Day 0, with Sunday as 0.
pub const ORIGIN_WEEKDAY: i64 = 1;


/// A date in the proleptic Gregorian calendar, with astronomical year
/// numbering: the year before 1 is 0, and the one before that is -1.
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Copy, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IsoDate {
    pub year: i64,
    pub month: i64,
    pub day: i64,
}

impl IsoDate {

    /// Creates a date without checking it. A day beyond the end of its
    /// month is carried into the next month on conversion.
    pub fn ymd(year: i64, month: i64, day: i64) -> Self {
        Self { year, month, day }
    }
}

impl fmt::Display for IsoDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.year.is_within(0 .. 10000) {
            write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
        }
        else {
            write!(f, "{:+05}-{:02}-{:02}", self.year, self.month, self.day)
        }
    }
}


/// Converts between Julian Day numbers and ISO dates.
#[derive(Clone, Debug)]
pub struct IsoCounter {
    clockwork: Clockwork,
    weeks: WeekClock,
}

impl IsoCounter {

    pub fn new() -> Self {
        let rule = CalendarRule::fixed(ISO_EPOCH,
            vec![ CycleLevel::unbounded(146097, 400, "year"),
                  CycleLevel::bounded(36524, 3, 100, "year"),
                  CycleLevel::unbounded(1461, 4, "year"),
                  CycleLevel::bounded(365, 3, 1, "year"),
                  CycleLevel::unbounded(153, 5, "month"),
                  CycleLevel::unbounded(61, 2, "month"),
                  CycleLevel::unbounded(31, 1, "month"),
                  CycleLevel::unbounded(1, 1, "day") ],
            vec![ CanvasField::new("year", 0),
                  CanvasField::new("month", 3),
                  CanvasField::new("day", 1) ]);

        let weeks = WeekRule {
            origin_weekday: ORIGIN_WEEKDAY,
            days_in_year: std::sync::Arc::new(gregorian_year_length),
            week_length: 7,
            start_of_week: 1,
            characteristic_week_number: 1,
            day_base: 1,
            week_base: 1,
        };

        Self { clockwork: Clockwork::new(rule), weeks: WeekClock::new(weeks) }
    }

    /// Returns the Julian Day number of an ISO date.
    ///
    /// ### Examples
    ///
    /// ```
    /// use calendrical::iso::{IsoCounter, IsoDate};
    ///
    /// let counter = IsoCounter::new();
    /// assert_eq!(counter.to_day_index(IsoDate::ymd(1582, 10, 15)), Ok(2299161));
    /// assert_eq!(counter.to_day_index(IsoDate::ymd(2000, 1, 1)), Ok(2451545));
    /// ```
    pub fn to_day_index(&self, date: IsoDate) -> Result<i64> {
        if ! date.month.is_within(1 .. 13) {
            return Err(Error::OutOfRangeDateElement { element: "month", value: date.month });
        }

        let (year, month) = shift_cycle(date.year, date.month, 12, 2, 1)?;
        self.clockwork.compose(&Fields::of(&[ ("year", year), ("month", month), ("day", date.day) ]))
    }

    /// Returns the ISO date of a Julian Day number.
    pub fn to_iso(&self, day_index: i64) -> Result<IsoDate> {
        let fields = self.clockwork.decompose(day_index)?;
        let (year, month) = shift_cycle(field(&fields, "year"), field(&fields, "month"), 12, -2, 3)?;
        Ok(IsoDate::ymd(year, month, field(&fields, "day")))
    }

    /// Returns the ISO 8601 week figures of a Julian Day number.
    pub fn iso_week_figures(&self, day_index: i64) -> Result<WeekFigures> {
        let year = self.to_iso(day_index)?.year;
        let characteristic_day = self.to_day_index(IsoDate::ymd(year, 1, 4))?;
        self.weeks.week_figures(day_index, characteristic_day, year)
    }

    /// Returns the weekday of a Julian Day number, from 1 for Monday to 7 for Sunday.
    pub fn weekday(&self, day_index: i64) -> i64 {
        (day_index.rem_euclid(7) + ORIGIN_WEEKDAY - 1).rem_euclid(7) + 1
    }
}

impl Default for IsoCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// The number of days in a year of the Gregorian calendar.
pub fn gregorian_year_length(year: i64) -> i64 {
    if is_gregorian_leap_year(year) { 366 } else { 365 }
}

/// Reads a field that the clockwork's canvas always produces.
pub(crate) fn field(fields: &Fields, name: &str) -> i64 {
    fields.get(name).unwrap_or(0)
}
