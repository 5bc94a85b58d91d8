//! Lengths of time in calendar units.

use std::ops::Neg;


/// A **duration** is a length of time counted in the units of a calendar:
/// years, months, weeks and days.
///
/// Unlike a count of days, a duration in years or months has no fixed
/// length: one month after 31 January is not as long as one month after
/// 1 June. Adding one to a date is left to the calendar.
#[derive(PartialEq, Eq, Debug, Copy, Clone, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Duration {
    pub years: i64,
    pub months: i64,
    pub weeks: i64,
    pub days: i64,
}

impl Duration {

    /// Create a new zero-length duration.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Create a new duration that’s the given number of days long.
    pub fn of_days(days: i64) -> Self {
        Self { days, ..Self::default() }
    }

    pub fn new(years: i64, months: i64, weeks: i64, days: i64) -> Self {
        Self { years, months, weeks, days }
    }

    /// Returns this duration, pointing the other way.
    pub fn negated(self) -> Self {
        Self::new(-self.years, -self.months, -self.weeks, -self.days)
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::zero()
    }
}

impl Neg for Duration {
    type Output = Self;

    fn neg(self) -> Self {
        self.negated()
    }
}
