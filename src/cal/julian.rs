//! The Julian calendar, proleptic in both directions.
//!
//! Internally, years begin in March so that the leap day comes last;
//! fields are moved back to January-based years on the way out.

use std::sync::Arc;

use crate::arith::{is_julian_leap_year, shift_cycle};
use crate::cal::{check_era, check_month, check_year_fields, resolve_day};
use crate::cal::{Calendar, CalendarFields, CalendarId, DateFields, Era, Overflow, WeekFields};
use crate::clockwork::{CalendarRule, CanvasField, Clockwork, CycleLevel, Fields};
use crate::error::Result;
use crate::iso::{field, ORIGIN_WEEKDAY};
use crate::week::{WeekClock, WeekRule};


/// Julian Day number of Julian 0000-03-01.
const EPOCH: i64 = 1_721_118;

/// The day of January that always falls in week 1.
const WEEK_ONE_DAY: i64 = 4;


/// The Julian calendar, with eras `bc` and `ad`.
#[derive(Clone, Debug)]
pub struct JulianCalendar {
    clockwork: Clockwork,
    weeks: WeekClock,
}

impl JulianCalendar {

    pub fn new() -> Self {
        let rule = CalendarRule::fixed(EPOCH,
            vec![ CycleLevel::unbounded(1461, 4, "year"),
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
            days_in_year: Arc::new(year_length),
            week_length: 7,
            start_of_week: 0,
            characteristic_week_number: 1,
            day_base: 1,
            week_base: 1,
        };

        Self { clockwork: Clockwork::new(rule), weeks: WeekClock::new(weeks) }
    }

    /// The number of days in a month, for the Julian or the Gregorian
    /// calendar, depending on which one decided `is_leap`.
    ///
    /// ### Examples
    ///
    /// ```
    /// use calendrical::cal::JulianCalendar;
    ///
    /// assert_eq!(JulianCalendar::month_length(2, true), 29);
    /// assert_eq!(JulianCalendar::month_length(8, false), 31);
    /// assert_eq!(JulianCalendar::month_length(11, false), 30);
    /// ```
    pub fn month_length(month: i64, is_leap: bool) -> i64 {
        if (month - month / 8) % 2 == 1 {
            31
        }
        else if month > 3 {
            30
        }
        else if is_leap {
            29
        }
        else {
            28
        }
    }

    /// The Julian Day number of a Julian date. Days beyond the end of
    /// the month are carried into the next one.
    pub fn to_day_index(&self, year: i64, month: i64, day: i64) -> Result<i64> {
        check_month(month)?;
        let (year, month) = shift_cycle(year, month, 12, 2, 1)?;
        self.clockwork.compose(&Fields::of(&[ ("year", year), ("month", month), ("day", day) ]))
    }
}

impl Default for JulianCalendar {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn year_length(year: i64) -> i64 {
    if is_julian_leap_year(year) { 366 } else { 365 }
}

/// Splits a signed year into an era and a positive year.
pub(crate) fn era_of(year: i64) -> (Era, i64) {
    if year < 1 { (Era::Bc, 1 - year) } else { (Era::Ad, year) }
}

impl Calendar for JulianCalendar {
    fn id(&self) -> CalendarId {
        CalendarId::Julian
    }

    fn fields_from_date(&self, day_index: i64) -> Result<CalendarFields> {
        let fields = self.clockwork.decompose(day_index)?;
        let (year, month) = shift_cycle(field(&fields, "year"), field(&fields, "month"), 12, -2, 3)?;
        let (era, era_year) = era_of(year);
        Ok(CalendarFields::ymd(year, month, field(&fields, "day")).with_era(era, era_year))
    }

    fn full_fields_from_date(&self, day_index: i64) -> Result<(CalendarFields, WeekFields)> {
        let fields = self.fields_from_date(day_index)?;
        let week_one_day = self.to_day_index(fields.year, 1, WEEK_ONE_DAY)?;
        let figures = self.weeks.week_figures(day_index, week_one_day, fields.year)?;
        Ok((fields, figures.into()))
    }

    fn date_from_fields(&self, fields: &DateFields, overflow: Overflow) -> Result<i64> {
        check_era(fields.era, &[ Era::Bc, Era::Ad ])?;
        let year = check_year_fields(fields, Era::Bc)?;
        check_month(fields.month)?;

        let month_length = Self::month_length(fields.month, is_julian_leap_year(year));
        let day = resolve_day(fields.day, month_length, overflow)?;
        self.to_day_index(year, fields.month, day)
    }

    fn days_in_month(&self, day_index: i64) -> Result<i64> {
        let fields = self.fields_from_date(day_index)?;
        Ok(Self::month_length(fields.month, is_julian_leap_year(fields.year)))
    }

    fn days_in_year(&self, day_index: i64) -> Result<i64> {
        Ok(year_length(self.fields_from_date(day_index)?.year))
    }

    fn day_of_year(&self, day_index: i64) -> Result<i64> {
        let year = self.fields_from_date(day_index)?.year;
        Ok(day_index - self.to_day_index(year, 1, 1)? + 1)
    }

    fn in_leap_year(&self, day_index: i64) -> Result<bool> {
        Ok(is_julian_leap_year(self.fields_from_date(day_index)?.year))
    }
}
