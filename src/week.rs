//! Week numbering for any calendar.
//!
//! A **week-year** is the run of whole weeks that a calendar attributes to
//! a year. Its first week is the one holding the year's *characteristic
//! day* (4 January under ISO 8601), so the first few days of a year may
//! belong to the last week of the previous week-year, and the last few
//! days to the first week of the next one.

use std::fmt;
use std::sync::Arc;

use crate::arith::{div_mod, modulo, shift_cycle};
use crate::error::{Error, Result};


/// The number of days in a given year of some calendar.
pub type YearLength = Arc<dyn Fn(i64) -> i64 + Send + Sync>;


/// How a calendar numbers its weeks and the days inside them.
#[derive(Clone)]
pub struct WeekRule {

    /// Weekday of day index 0, with Sunday as 0.
    pub origin_weekday: i64,

    /// Length of a year, for finding where the neighbouring week-years end.
    pub days_in_year: YearLength,

    pub week_length: i64,

    /// The weekday that weeks begin with, with Sunday as 0.
    pub start_of_week: i64,

    /// The number of the week that holds the characteristic day.
    pub characteristic_week_number: i64,

    /// The number given to the first day of a week.
    pub day_base: i64,

    /// The number given to the first week of a week-year.
    pub week_base: i64,
}

impl WeekRule {

    /// Starts building a rule, with ISO 8601 defaults for everything
    /// but the origin weekday and year lengths.
    ///
    /// ### Examples
    ///
    /// ```
    /// use calendrical::week::WeekRule;
    /// use calendrical::arith::is_gregorian_leap_year;
    ///
    /// let rule = WeekRule::builder(1, |y| if is_gregorian_leap_year(y) { 366 } else { 365 })
    ///                     .start_of_week(0)
    ///                     .build()
    ///                     .unwrap();
    ///
    /// assert_eq!(rule.start_of_week, 0);
    /// assert_eq!(rule.week_length, 7);
    /// ```
    pub fn builder<F>(origin_weekday: i64, days_in_year: F) -> WeekRuleBuilder
    where F: Fn(i64) -> i64 + Send + Sync + 'static {
        WeekRuleBuilder {
            origin_weekday,
            days_in_year: Arc::new(days_in_year),
            week_length: 7,
            start_of_week: 1,
            characteristic_week_number: 1,
            day_base: 1,
            week_base: 1,
        }
    }
}

impl fmt::Debug for WeekRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeekRule")
         .field("origin_weekday", &self.origin_weekday)
         .field("week_length", &self.week_length)
         .field("start_of_week", &self.start_of_week)
         .field("characteristic_week_number", &self.characteristic_week_number)
         .field("day_base", &self.day_base)
         .field("week_base", &self.week_base)
         .finish()
    }
}


/// Builder for a `WeekRule`.
#[derive(Clone)]
pub struct WeekRuleBuilder {
    origin_weekday: i64,
    days_in_year: YearLength,
    week_length: i64,
    start_of_week: i64,
    characteristic_week_number: i64,
    day_base: i64,
    week_base: i64,
}

impl WeekRuleBuilder {
    pub fn week_length(mut self, week_length: i64) -> Self {
        self.week_length = week_length;
        self
    }

    pub fn start_of_week(mut self, start_of_week: i64) -> Self {
        self.start_of_week = start_of_week;
        self
    }

    pub fn characteristic_week_number(mut self, characteristic_week_number: i64) -> Self {
        self.characteristic_week_number = characteristic_week_number;
        self
    }

    pub fn day_base(mut self, day_base: i64) -> Self {
        self.day_base = day_base;
        self
    }

    pub fn week_base(mut self, week_base: i64) -> Self {
        self.week_base = week_base;
        self
    }

    /// Checks the week length, and brings the start of week and the day
    /// base into `0 .. week_length`.
    pub fn build(self) -> Result<WeekRule> {
        if self.week_length <= 0 {
            return Err(Error::InvalidRule(format!("week length of {} days", self.week_length)));
        }

        Ok(WeekRule {
            origin_weekday:             self.origin_weekday,
            days_in_year:               self.days_in_year,
            week_length:                self.week_length,
            start_of_week:              modulo(self.start_of_week, self.week_length)?,
            characteristic_week_number: self.characteristic_week_number,
            day_base:                   modulo(self.day_base, self.week_length)?,
            week_base:                  self.week_base,
        })
    }
}

impl fmt::Debug for WeekRuleBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeekRuleBuilder")
         .field("origin_weekday", &self.origin_weekday)
         .field("week_length", &self.week_length)
         .finish()
    }
}


/// Where a day falls in its week-year.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub struct WeekFigures {
    pub week_number: i64,
    pub weekday: i64,

    /// `-1` if the day belongs to the previous week-year, `1` if it
    /// belongs to the next one, `0` otherwise.
    pub week_year_offset: i64,

    /// The number of weeks in the week-year the day belongs to.
    pub weeks_in_year: i64,
}


/// Computes week figures with a `WeekRule`.
#[derive(Clone, Debug)]
pub struct WeekClock {
    rule: WeekRule,
}

impl WeekClock {

    pub fn new(rule: WeekRule) -> Self {
        Self { rule }
    }

    pub fn rule(&self) -> &WeekRule {
        &self.rule
    }

    /// Returns the week figures of `day_index`, a day of `year`, given the
    /// index of that year's characteristic day.
    pub fn week_figures(&self, day_index: i64, characteristic_day_index: i64, year: i64) -> Result<WeekFigures> {
        let rule = &self.rule;
        let length = rule.week_length;
        let week_number_shift = rule.week_base - 1;

        let (whole_weeks, spare_days) = div_mod((rule.days_in_year)(year), length)?;
        let phase = modulo(modulo(characteristic_day_index, length)? + rule.origin_weekday - rule.start_of_week, length)?;

        let (week, day) = div_mod(day_index - characteristic_day_index + rule.start_of_week + phase, length)?;
        let (mut week, mut day) = shift_cycle(week + rule.characteristic_week_number, day, length, rule.start_of_week, 0)?;

        if rule.day_base != rule.start_of_week {
            day = modulo(day - rule.day_base, length)? + rule.day_base;
        }

        let weeks_this_year = whole_weeks + long_year(phase, spare_days, length)?;

        if week < rule.week_base {
            // The last week of the previous week-year.
            let (previous_weeks, previous_spare) = div_mod((rule.days_in_year)(year - 1), length)?;
            let weeks = previous_weeks + long_year(modulo(phase - previous_spare, length)?, previous_spare, length)?;
            week = weeks + week_number_shift;
            Ok(WeekFigures { week_number: week, weekday: day, week_year_offset: -1, weeks_in_year: weeks })
        }
        else if week > weeks_this_year + week_number_shift {
            // The first week of the next week-year.
            let (next_weeks, next_spare) = div_mod((rule.days_in_year)(year + 1), length)?;
            let weeks = next_weeks + long_year(modulo(phase + spare_days, length)?, next_spare, length)?;
            Ok(WeekFigures { week_number: rule.week_base, weekday: day, week_year_offset: 1, weeks_in_year: weeks })
        }
        else {
            Ok(WeekFigures { week_number: week, weekday: day, week_year_offset: 0, weeks_in_year: weeks_this_year })
        }
    }
}

/// Whether a week-year whose characteristic day sits at `phase` in its
/// week gets one week more than the whole weeks of its year.
fn long_year(phase: i64, spare_days: i64, length: i64) -> Result<i64> {
    Ok(if phase >= modulo(-spare_days, length)? { 1 } else { 0 })
}
