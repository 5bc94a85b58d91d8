//! Calendars built on the cycle engine.
//!
//! Every calendar converts between **day indices** (Julian Day numbers,
//! shared by all calendars) and its own year-month-day fields. Dates
//! and durations are plain values; calendars hold nothing but their
//! rules, so one calendar may serve any number of threads.

use std::fmt::{Debug, Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use tracing::instrument;

use crate::arith::{div_mod, integral};
use crate::duration::Duration;
use crate::error::{Error, Result};
use crate::util::RangeExt;

pub mod id;
pub mod julian;
pub mod milesian;
pub mod western;

#[cfg(feature = "format")]
pub mod fmt;

pub use self::id::CalendarId;
pub use self::julian::JulianCalendar;
pub use self::milesian::MilesianCalendar;
pub use self::western::WesternCalendar;


/// What to do with a day that does not exist in its month.
#[derive(PartialEq, Eq, Debug, Copy, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(rename_all = "lowercase"))]
pub enum Overflow {

    /// Use the nearest day that exists: 30 February becomes 28 or 29 February.
    Constrain,

    /// Fail with `Error::DateOverflow`.
    Reject,

    /// Carry the extra days into the next month: 30 February becomes
    /// 1 or 2 March.
    Balance,
}

impl Default for Overflow {
    fn default() -> Self {
        Overflow::Constrain
    }
}

impl FromStr for Overflow {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        match input {
            "constrain" => Ok(Overflow::Constrain),
            "reject"    => Ok(Overflow::Reject),
            "balance"   => Ok(Overflow::Balance),
            other       => Err(Error::InvalidOption(other.to_owned())),
        }
    }
}

impl Display for Overflow {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match *self {
            Overflow::Constrain => "constrain",
            Overflow::Reject    => "reject",
            Overflow::Balance   => "balance",
        })
    }
}


/// The largest unit a difference between two dates is expressed in.
#[derive(PartialEq, Eq, Debug, Copy, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(rename_all = "lowercase"))]
pub enum LargestUnit {
    Auto,
    Years,
    Months,
    Weeks,
    Days,
}

impl Default for LargestUnit {
    fn default() -> Self {
        LargestUnit::Auto
    }
}

impl FromStr for LargestUnit {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        match input {
            "auto"   => Ok(LargestUnit::Auto),
            "years"  => Ok(LargestUnit::Years),
            "months" => Ok(LargestUnit::Months),
            "weeks"  => Ok(LargestUnit::Weeks),
            "days"   => Ok(LargestUnit::Days),
            other    => Err(Error::InvalidOption(other.to_owned())),
        }
    }
}


/// An **era** qualifies a year count that starts over at some point.
#[derive(PartialEq, Eq, Debug, Copy, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(rename_all = "lowercase"))]
pub enum Era {

    /// Before Christ: year 1 BC is year 0, year 2 BC is year -1.
    Bc,

    /// Anno Domini.
    Ad,

    /// Ancient style: a Julian date in a calendar that later switched to
    /// Gregorian rules.
    As,

    /// New style: a Gregorian date.
    Ns,
}

impl Era {
    fn index(self) -> i64 {
        match self {
            Era::Bc => 0,
            Era::Ad => 1,
            Era::As => 2,
            Era::Ns => 3,
        }
    }
}

impl FromStr for Era {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        match input {
            "bc" => Ok(Era::Bc),
            "ad" => Ok(Era::Ad),
            "as" => Ok(Era::As),
            "ns" => Ok(Era::Ns),
            other => Err(Error::Parse(format!("unknown era {:?}", other))),
        }
    }
}

impl Display for Era {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match *self {
            Era::Bc => "bc",
            Era::Ad => "ad",
            Era::As => "as",
            Era::Ns => "ns",
        })
    }
}


/// Fields asked for by a caller, to be turned into a date.
///
/// The year may be given as a signed `year`, as an `era` and `era_year`,
/// or as both if they agree. With an era but no `era_year`, `year`
/// counts from the start of that era.
#[derive(PartialEq, Eq, Debug, Copy, Clone, Hash)]
pub struct DateFields {
    pub year: Option<i64>,
    pub era: Option<Era>,
    pub era_year: Option<i64>,
    pub month: i64,
    pub day: i64,
}

impl DateFields {

    /// Fields with a signed year and no era.
    pub fn ymd(year: i64, month: i64, day: i64) -> Self {
        Self { year: Some(year), era: None, era_year: None, month, day }
    }

    /// Fields with an era and a year counted from the start of that era.
    pub fn era_ymd(era: Era, era_year: i64, month: i64, day: i64) -> Self {
        Self { year: None, era: Some(era), era_year: Some(era_year), month, day }
    }

    /// Fields from numbers of a host environment, which must be exact
    /// integers.
    pub fn try_from_numbers(year: f64, month: f64, day: f64) -> Result<Self> {
        Ok(Self::ymd(integral(year)?, integral(month)?, integral(day)?))
    }

    /// Returns these fields with an era.
    pub fn with_era(self, era: Era) -> Self {
        Self { era: Some(era), ..self }
    }
}


/// The fields of a date in some calendar.
#[derive(PartialEq, Eq, Debug, Copy, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalendarFields {

    /// The signed year, with no gap between 1 BC (0) and AD 1.
    pub year: i64,
    pub month: i64,
    pub day: i64,

    /// The era, for calendars that have eras.
    pub era: Option<Era>,

    /// The year counted from the start of `era`, always positive.
    pub era_year: Option<i64>,
}

impl CalendarFields {
    pub(crate) fn ymd(year: i64, month: i64, day: i64) -> Self {
        Self { year, month, day, era: None, era_year: None }
    }

    pub(crate) fn with_era(self, era: Era, era_year: i64) -> Self {
        Self { era: Some(era), era_year: Some(era_year), ..self }
    }
}


/// Where a date falls among the weeks of its calendar.
#[derive(PartialEq, Eq, Debug, Copy, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeekFields {
    pub week_of_year: i64,
    pub day_of_week: i64,

    /// `-1`, `0` or `1` as the week belongs to the previous, same, or
    /// next year as the date.
    pub week_year_offset: i64,
    pub weeks_in_year: i64,
}

impl From<crate::week::WeekFigures> for WeekFields {
    fn from(figures: crate::week::WeekFigures) -> Self {
        Self {
            week_of_year:     figures.week_number,
            day_of_week:      figures.weekday,
            week_year_offset: figures.week_year_offset,
            weeks_in_year:    figures.weeks_in_year,
        }
    }
}


/// A day, seen through a calendar.
#[derive(PartialEq, Eq, Debug, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Date {

    /// The Julian Day number of this date.
    pub index: i64,
    pub calendar: CalendarId,
}

impl Date {
    pub fn new(index: i64, calendar: CalendarId) -> Self {
        Self { index, calendar }
    }
}


/// A **calendar** names days with years, months and days.
///
/// Implementors provide the conversions and the few figures that depend
/// on their rules; everything else is derived from those.
pub trait Calendar: Debug + Send + Sync {

    /// The identity that rebuilds this calendar.
    fn id(&self) -> CalendarId;

    /// The fields of a day.
    fn fields_from_date(&self, day_index: i64) -> Result<CalendarFields>;

    /// The fields of a day, with its week figures.
    fn full_fields_from_date(&self, day_index: i64) -> Result<(CalendarFields, WeekFields)>;

    /// The day named by some fields.
    ///
    /// A month outside `1 ..= 12` is always an error. A day outside its
    /// month is dealt with as `overflow` says.
    fn date_from_fields(&self, fields: &DateFields, overflow: Overflow) -> Result<i64>;

    fn days_in_month(&self, day_index: i64) -> Result<i64>;

    fn days_in_year(&self, day_index: i64) -> Result<i64>;

    /// The number of the day in its year, starting at 1.
    fn day_of_year(&self, day_index: i64) -> Result<i64>;

    fn in_leap_year(&self, day_index: i64) -> Result<bool>;

    /// The day that stands for a month as a whole.
    fn year_month_reference_day(&self) -> i64 {
        1
    }

    /// The year that stands for a day of any year. It has to be one
    /// where every month has its longest length.
    fn month_day_reference_year(&self) -> i64 {
        2000
    }

    /// The reference day of the month named by some fields.
    fn year_month_from_fields(&self, fields: &DateFields, overflow: Overflow) -> Result<i64> {
        let fields = DateFields { day: self.year_month_reference_day(), ..*fields };
        self.date_from_fields(&fields, overflow)
    }

    /// A month and day, placed in the reference year.
    fn month_day_from_fields(&self, fields: &DateFields, overflow: Overflow) -> Result<i64> {
        let fields = DateFields::ymd(self.month_day_reference_year(), fields.month, fields.day);
        self.date_from_fields(&fields, overflow)
    }

    /// Builds a `Date` of this calendar from fields.
    fn date(&self, fields: &DateFields, overflow: Overflow) -> Result<Date> {
        Ok(Date::new(self.date_from_fields(fields, overflow)?, self.id()))
    }

    fn day_of_week(&self, day_index: i64) -> Result<i64> {
        Ok(self.full_fields_from_date(day_index)?.1.day_of_week)
    }

    fn week_of_year(&self, day_index: i64) -> Result<i64> {
        Ok(self.full_fields_from_date(day_index)?.1.week_of_year)
    }

    fn weeks_in_year(&self, day_index: i64) -> Result<i64> {
        Ok(self.full_fields_from_date(day_index)?.1.weeks_in_year)
    }

    /// The year that the week of a day belongs to.
    fn year_of_week(&self, day_index: i64) -> Result<i64> {
        let (fields, weeks) = self.full_fields_from_date(day_index)?;
        Ok(fields.year + weeks.week_year_offset)
    }

    fn months_in_year(&self, _day_index: i64) -> i64 {
        12
    }

    fn days_in_week(&self, _day_index: i64) -> i64 {
        7
    }

    /// Adds a duration to a date.
    ///
    /// Years and months are added to the fields first, and `overflow`
    /// applies to that step only. Weeks and days are then added to the
    /// day index, which never overflows.
    fn date_add(&self, date: &Date, duration: &Duration, overflow: Overflow) -> Result<Date> {
        let index = add_duration(self, date.index, duration, overflow)?;
        Ok(Date::new(index, self.id()))
    }

    /// The duration from `smaller` to `larger`, negative if `larger`
    /// comes first.
    ///
    /// In years and months, every month is taken to end on its 30th day:
    /// from 31 January to 28 February is 28 days, and so is 30 January.
    fn date_until(&self, smaller: &Date, larger: &Date, largest_unit: LargestUnit) -> Result<Duration> {
        let id = self.id();
        if smaller.calendar != id || larger.calendar != id {
            return Err(Error::MixingCalendar);
        }

        difference(self, smaller.index, larger.index, largest_unit)
    }

    /// A short human-readable rendering of a date.
    #[cfg(feature = "format")]
    fn to_date_string(&self, day_index: i64) -> Result<String> {
        Ok(self::fmt::date_string(&self.id(), &self.fields_from_date(day_index)?))
    }
}


/// Settles the signed year of some fields.
///
/// Fails if no year can be found, if `era_year` comes without an era,
/// or if `year` and `era_year` disagree. `bc` is the era that counts
/// years backwards.
pub fn check_year_fields(fields: &DateFields, bc: Era) -> Result<i64> {
    let counts_back = fields.era == Some(bc);

    match (fields.year, fields.era, fields.era_year) {
        (None, _, None) | (None, None, _) | (Some(_), None, Some(_)) => {
            Err(Error::AmbiguousDateElement)
        }

        (Some(year), Some(_), Some(era_year)) => {
            if year == era_year || (counts_back && year.checked_add(era_year) == Some(1)) {
                relative_year(era_year, counts_back)
            }
            else {
                Err(Error::AmbiguousDateElement)
            }
        }

        (Some(year), Some(_), None) => relative_year(year, counts_back),
        (None, Some(_), Some(era_year)) => relative_year(era_year, counts_back),
        (Some(year), None, None) => Ok(year),
    }
}

fn relative_year(era_year: i64, counts_back: bool) -> Result<i64> {
    if era_year < 1 {
        return Err(Error::OutOfRangeDateElement { element: "eraYear", value: era_year });
    }

    Ok(if counts_back { 1 - era_year } else { era_year })
}

/// Rejects an era that a calendar does not know.
pub(crate) fn check_era(era: Option<Era>, known: &[Era]) -> Result<()> {
    match era {
        Some(era) if ! known.contains(&era) => Err(Error::OutOfRangeDateElement { element: "era", value: era.index() }),
        _ => Ok(()),
    }
}

/// Rejects a month outside `1 ..= 12`, whatever the overflow option.
pub(crate) fn check_month(month: i64) -> Result<()> {
    if month.is_within(1 .. 13) {
        Ok(())
    }
    else {
        Err(Error::OutOfRangeDateElement { element: "month", value: month })
    }
}

/// Applies an overflow option to a day of a month of `month_length` days.
pub(crate) fn resolve_day(day: i64, month_length: i64, overflow: Overflow) -> Result<i64> {
    if day.is_within(1 .. month_length + 1) {
        return Ok(day);
    }

    match overflow {
        Overflow::Reject    => Err(Error::DateOverflow),
        Overflow::Constrain => Ok(day.max(1).min(month_length)),
        Overflow::Balance   => Ok(day),
    }
}

#[instrument(level = "trace", skip(calendar))]
fn add_duration<C: Calendar + ?Sized>(calendar: &C, day_index: i64, duration: &Duration, overflow: Overflow) -> Result<i64> {
    let fields = calendar.fields_from_date(day_index)?;

    let months = (fields.month - 1).checked_add(duration.months).ok_or(Error::OutOfRange)?;
    let (carried_years, month) = div_mod(months, 12)?;
    let year = fields.year.checked_add(duration.years)
                          .and_then(|y| y.checked_add(carried_years))
                          .ok_or(Error::OutOfRange)?;

    let index = calendar.date_from_fields(&DateFields::ymd(year, month + 1, fields.day), overflow)?;
    duration.weeks.checked_mul(calendar.days_in_week(index))
                  .and_then(|days| days.checked_add(duration.days))
                  .and_then(|days| index.checked_add(days))
                  .ok_or(Error::OutOfRange)
}

#[instrument(level = "trace", skip(calendar))]
fn difference<C: Calendar + ?Sized>(calendar: &C, smaller: i64, larger: i64, largest_unit: LargestUnit) -> Result<Duration> {
    if smaller > larger {
        return Ok(difference(calendar, larger, smaller, largest_unit)?.negated());
    }

    if smaller == larger {
        return Ok(Duration::zero());
    }

    let day_offset = larger.checked_sub(smaller).ok_or(Error::OutOfRange)?;

    match largest_unit {
        LargestUnit::Auto | LargestUnit::Days => Ok(Duration::of_days(day_offset)),

        LargestUnit::Weeks => {
            let (weeks, days) = div_mod(day_offset, calendar.days_in_week(smaller))?;
            Ok(Duration::new(0, 0, weeks, days))
        }

        LargestUnit::Years | LargestUnit::Months => {
            let from = calendar.fields_from_date(smaller)?;
            let to   = calendar.fields_from_date(larger)?;

            let (days, borrow) = borrow_from(to.day.min(30) - from.day.min(30), 30);
            let (months, borrow) = borrow_from(to.month - from.month - borrow, 12);
            let years = to.year - from.year - borrow;

            if largest_unit == LargestUnit::Years {
                Ok(Duration::new(years, months, 0, days))
            }
            else {
                let months = years.checked_mul(12).and_then(|m| m.checked_add(months)).ok_or(Error::OutOfRange)?;
                Ok(Duration::new(0, months, 0, days))
            }
        }
    }
}

/// Brings a negative difference back into range by borrowing one from
/// the next unit.
fn borrow_from(difference: i64, unit: i64) -> (i64, i64) {
    if difference < 0 { (difference + unit, 1) } else { (difference, 0) }
}


#[cfg(test)]
mod test {
    use super::*;

    mod options {
        use super::*;

        #[test]
        fn overflow() {
            assert_eq!("balance".parse::<Overflow>(), Ok(Overflow::Balance));
            assert_eq!(Overflow::default(), Overflow::Constrain);
            assert_eq!(Overflow::Reject.to_string(), "reject");
        }

        #[test]
        fn unknown_overflow() {
            assert_eq!("clamp".parse::<Overflow>(), Err(Error::InvalidOption("clamp".into())));
        }

        #[test]
        fn largest_unit() {
            assert_eq!("weeks".parse::<LargestUnit>(), Ok(LargestUnit::Weeks));
            assert_eq!(LargestUnit::default(), LargestUnit::Auto);
            assert!("hours".parse::<LargestUnit>().is_err());
        }

        #[test]
        fn era() {
            assert_eq!("as".parse::<Era>(), Ok(Era::As));
            assert_eq!(Era::Ns.to_string(), "ns");
        }
    }

    mod year_fields {
        use super::*;

        #[test]
        fn signed_year() {
            assert_eq!(check_year_fields(&DateFields::ymd(-44, 3, 15), Era::Bc), Ok(-44));
        }

        #[test]
        fn era_year() {
            assert_eq!(check_year_fields(&DateFields::era_ymd(Era::Bc, 45, 3, 15), Era::Bc), Ok(-44));
            assert_eq!(check_year_fields(&DateFields::era_ymd(Era::Ad, 45, 3, 15), Era::Bc), Ok(45));
        }

        #[test]
        fn year_counts_in_era() {
            let fields = DateFields::ymd(45, 3, 15).with_era(Era::Bc);
            assert_eq!(check_year_fields(&fields, Era::Bc), Ok(-44));
        }

        #[test]
        fn agreeing() {
            let fields = DateFields { year: Some(-44), ..DateFields::era_ymd(Era::Bc, 45, 3, 15) };
            assert_eq!(check_year_fields(&fields, Era::Bc), Ok(-44));
        }

        #[test]
        fn contradicting() {
            let fields = DateFields { year: Some(44), ..DateFields::era_ymd(Era::Bc, 45, 3, 15) };
            assert_eq!(check_year_fields(&fields, Era::Bc), Err(Error::AmbiguousDateElement));
        }

        #[test]
        fn era_year_without_era() {
            let fields = DateFields { era_year: Some(45), ..DateFields::ymd(45, 3, 15) };
            assert_eq!(check_year_fields(&fields, Era::Bc), Err(Error::AmbiguousDateElement));
        }

        #[test]
        fn no_year() {
            let fields = DateFields { year: None, ..DateFields::ymd(0, 3, 15) };
            assert_eq!(check_year_fields(&fields, Era::Bc), Err(Error::AmbiguousDateElement));
        }

        #[test]
        fn zero_era_year() {
            assert_eq!(check_year_fields(&DateFields::era_ymd(Era::Ad, 0, 1, 1), Era::Bc),
                       Err(Error::OutOfRangeDateElement { element: "eraYear", value: 0 }));
        }
    }

    mod days {
        use super::*;

        #[test]
        fn in_range() {
            assert_eq!(resolve_day(28, 28, Overflow::Reject), Ok(28));
        }

        #[test]
        fn overflowing() {
            assert_eq!(resolve_day(30, 28, Overflow::Reject), Err(Error::DateOverflow));
            assert_eq!(resolve_day(30, 28, Overflow::Constrain), Ok(28));
            assert_eq!(resolve_day(30, 28, Overflow::Balance), Ok(30));
        }

        #[test]
        fn underflowing() {
            assert_eq!(resolve_day(0, 31, Overflow::Constrain), Ok(1));
            assert_eq!(resolve_day(-3, 31, Overflow::Balance), Ok(-3));
        }

        #[test]
        fn months() {
            assert!(check_month(12).is_ok());
            assert_eq!(check_month(0), Err(Error::OutOfRangeDateElement { element: "month", value: 0 }));
        }

        #[test]
        fn eras() {
            assert!(check_era(None, &[]).is_ok());
            assert!(check_era(Some(Era::Ad), &[Era::Bc, Era::Ad]).is_ok());
            assert_eq!(check_era(Some(Era::Ns), &[Era::Bc, Era::Ad]),
                       Err(Error::OutOfRangeDateElement { element: "era", value: 3 }));
        }

        #[test]
        fn numbers() {
            assert_eq!(DateFields::try_from_numbers(2020.0, 10.0, 31.0), Ok(DateFields::ymd(2020, 10, 31)));
            assert_eq!(DateFields::try_from_numbers(2020.0, 10.5, 31.0), Err(Error::NonInteger));
            assert_eq!(DateFields::try_from_numbers(f64::NAN, 1.0, 1.0), Err(Error::NotANumber));
        }
    }
}
