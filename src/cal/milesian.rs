//! The Milesian calendar.
//!
//! Milesian years begin on the December solstice, near 21 December of
//! the previous Gregorian year. Months alternate between 30 and 31 days,
//! odd months being the short ones, and the twelfth month has 31 days
//! only when the *next* Gregorian year is a leap year. Months are written
//! with an `m`: “31 10m 2020”.
//!
//! There are no eras: years before 1 are simply 0, -1, -2...

use crate::arith::is_gregorian_leap_year;
use crate::cal::{check_era, check_month, check_year_fields, resolve_day};
use crate::cal::{Calendar, CalendarFields, CalendarId, DateFields, Era, Overflow, WeekFields};
use crate::clockwork::{CalendarRule, CanvasField, Clockwork, CycleLevel, Fields};
use crate::error::Result;
use crate::iso::{field, ORIGIN_WEEKDAY};
use crate::week::{WeekClock, WeekRule};

use std::sync::Arc;


/// Julian Day number of 1 1m 000, or ISO -0001-12-22.
const EPOCH: i64 = 1_721_050;

/// The day of the first month that always falls in week 0.
const WEEK_ZERO_DAY: i64 = 7;


/// The Milesian calendar.
#[derive(Clone, Debug)]
pub struct MilesianCalendar {
    clockwork: Clockwork,
    weeks: WeekClock,
}

impl MilesianCalendar {

    pub fn new() -> Self {
        let rule = CalendarRule::fixed(EPOCH,
            vec![ CycleLevel::unbounded(146097, 400, "year"),
                  CycleLevel::bounded(36524, 3, 100, "year"),
                  CycleLevel::unbounded(1461, 4, "year"),
                  CycleLevel::bounded(365, 3, 1, "year"),
                  CycleLevel::unbounded(61, 2, "month"),
                  CycleLevel::bounded(30, 1, 1, "month"),
                  CycleLevel::unbounded(1, 1, "day") ],
            vec![ CanvasField::new("year", 0),
                  CanvasField::new("month", 1),
                  CanvasField::new("day", 1) ]);

        let weeks = WeekRule {
            origin_weekday: ORIGIN_WEEKDAY,
            days_in_year: Arc::new(year_length),
            week_length: 7,
            start_of_week: 0,
            characteristic_week_number: 0,
            day_base: 0,
            week_base: 0,
        };

        Self { clockwork: Clockwork::new(rule), weeks: WeekClock::new(weeks) }
    }

    /// Whether a Milesian year has 366 days.
    pub fn is_leap_year(year: i64) -> bool {
        year.checked_add(1).map_or(false, is_gregorian_leap_year)
    }

    /// The number of days in a month of a year.
    pub fn month_length(year: i64, month: i64) -> i64 {
        if month % 2 == 1 || (month == 12 && ! Self::is_leap_year(year)) { 30 } else { 31 }
    }

    fn compose(&self, year: i64, month: i64, day: i64) -> Result<i64> {
        self.clockwork.compose(&Fields::of(&[ ("year", year), ("month", month), ("day", day) ]))
    }
}

impl Default for MilesianCalendar {
    fn default() -> Self {
        Self::new()
    }
}

fn year_length(year: i64) -> i64 {
    if MilesianCalendar::is_leap_year(year) { 366 } else { 365 }
}

impl Calendar for MilesianCalendar {
    fn id(&self) -> CalendarId {
        CalendarId::Milesian
    }

    fn fields_from_date(&self, day_index: i64) -> Result<CalendarFields> {
        let fields = self.clockwork.decompose(day_index)?;
        Ok(CalendarFields::ymd(field(&fields, "year"), field(&fields, "month"), field(&fields, "day")))
    }

    fn full_fields_from_date(&self, day_index: i64) -> Result<(CalendarFields, WeekFields)> {
        let fields = self.fields_from_date(day_index)?;
        let week_zero_day = self.compose(fields.year, 1, WEEK_ZERO_DAY)?;
        let figures = self.weeks.week_figures(day_index, week_zero_day, fields.year)?;
        Ok((fields, figures.into()))
    }

    fn date_from_fields(&self, fields: &DateFields, overflow: Overflow) -> Result<i64> {
        check_era(fields.era, &[])?;
        let year = check_year_fields(fields, Era::Bc)?;
        check_month(fields.month)?;

        let day = resolve_day(fields.day, Self::month_length(year, fields.month), overflow)?;
        self.compose(year, fields.month, day)
    }

    fn days_in_month(&self, day_index: i64) -> Result<i64> {
        let fields = self.fields_from_date(day_index)?;
        Ok(Self::month_length(fields.year, fields.month))
    }

    fn days_in_year(&self, day_index: i64) -> Result<i64> {
        Ok(year_length(self.fields_from_date(day_index)?.year))
    }

    fn day_of_year(&self, day_index: i64) -> Result<i64> {
        let fields = self.fields_from_date(day_index)?;
        let months_before = fields.month - 1;
        Ok(fields.day + 30 * (months_before % 2) + 61 * (months_before / 2))
    }

    fn in_leap_year(&self, day_index: i64) -> Result<bool> {
        Ok(Self::is_leap_year(self.fields_from_date(day_index)?.year))
    }

    /// The 13th of a Milesian month falls in the Gregorian month of the
    /// same number.
    fn year_month_reference_day(&self) -> i64 {
        13
    }

    /// A year whose twelfth month has 31 days.
    fn month_day_reference_year(&self) -> i64 {
        1999
    }
}
