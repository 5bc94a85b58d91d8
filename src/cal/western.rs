//! The Western calendar: Julian up to some day, Gregorian from then on.
//!
//! Countries adopted the Gregorian reform at different dates, skipping
//! between ten and thirteen days as they did. A `WesternCalendar` is
//! given the first Gregorian day of its country, the **switch-over**.
//! Dates before it are Julian, in the *ancient style* era (`as`) or
//! `bc`; dates from it onwards are Gregorian, in the *new style* era
//! (`ns`). The month and year holding the switch-over are short.

use std::cmp::{max, min};
use std::sync::Arc;

use tracing::debug;

use crate::arith::{is_gregorian_leap_year, is_julian_leap_year};
use crate::cal::julian::{era_of, year_length as julian_year_length, JulianCalendar};
use crate::cal::{check_month, check_year_fields, resolve_day};
use crate::cal::{Calendar, CalendarFields, CalendarId, DateFields, Era, Overflow, WeekFields};
use crate::error::{Error, Result};
use crate::iso::{gregorian_year_length, IsoCounter, IsoDate, ORIGIN_WEEKDAY};
use crate::week::{WeekClock, WeekRule};


/// Julian Day number of 1582-10-15, the first Gregorian day anywhere.
pub const FIRST_SWITCH_OVER: i64 = 2_299_161;

/// The day of January that always falls in week 1.
const WEEK_ONE_DAY: i64 = 4;


/// A Julian calendar that switched to Gregorian rules.
#[derive(Clone, Debug)]
pub struct WesternCalendar {
    name: String,
    switch_over: IsoDate,
    switch_index: i64,
    julian: JulianCalendar,
    iso: IsoCounter,
    weeks: WeekClock,
}

impl WesternCalendar {

    /// Creates a calendar that uses Gregorian rules from `switch_over` on.
    ///
    /// ### Examples
    ///
    /// ```
    /// use calendrical::cal::WesternCalendar;
    /// use calendrical::iso::IsoDate;
    ///
    /// assert!(WesternCalendar::new("russian", IsoDate::ymd(1918, 2, 14)).is_ok());
    /// assert!(WesternCalendar::new("early", IsoDate::ymd(1582, 10, 14)).is_err());
    /// assert!(WesternCalendar::new("odd", IsoDate::ymd(1582, 10, 45)).is_err());
    /// ```
    pub fn new(name: impl Into<String>, switch_over: IsoDate) -> Result<Self> {
        let iso = IsoCounter::new();
        let switch_index = iso.to_day_index(switch_over)?;
        if switch_index < FIRST_SWITCH_OVER {
            return Err(Error::SwitchOverTooEarly);
        }

        // The switch-over is compared field by field later on, so it has
        // to name a day that exists.
        if iso.to_iso(switch_index)? != switch_over {
            return Err(Error::OutOfRangeDateElement { element: "day", value: switch_over.day });
        }

        Ok(Self::with_switch_index(name.into(), switch_over, switch_index))
    }

    /// Rome and most Catholic countries, from 1582-10-15.
    pub fn vatican() -> Self {
        Self::with_switch_index("vatican".into(), IsoDate::ymd(1582, 10, 15), FIRST_SWITCH_OVER)
    }

    /// France, from 1582-12-20.
    pub fn french() -> Self {
        Self::with_switch_index("french".into(), IsoDate::ymd(1582, 12, 20), 2_299_227)
    }

    /// The Protestant German states, from 1700-03-01.
    pub fn german() -> Self {
        Self::with_switch_index("german".into(), IsoDate::ymd(1700, 3, 1), 2_342_032)
    }

    /// Great Britain and its colonies, from 1752-09-14.
    pub fn english() -> Self {
        Self::with_switch_index("english".into(), IsoDate::ymd(1752, 9, 14), 2_361_222)
    }

    fn with_switch_index(name: String, switch_over: IsoDate, switch_index: i64) -> Self {
        let switch_year = switch_over.year;
        let weeks = WeekRule {
            origin_weekday: ORIGIN_WEEKDAY,
            days_in_year: Arc::new(move |year: i64| {
                if year >= switch_year { gregorian_year_length(year) } else { julian_year_length(year) }
            }),
            week_length: 7,
            start_of_week: 1,
            characteristic_week_number: 1,
            day_base: 1,
            week_base: 1,
        };

        debug!(name = %name, switch_over = %switch_over, switch_index, "western calendar");
        Self {
            name,
            switch_over,
            switch_index,
            julian: JulianCalendar::new(),
            iso: IsoCounter::new(),
            weeks: WeekClock::new(weeks),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The first Gregorian day.
    pub fn switch_over(&self) -> IsoDate {
        self.switch_over
    }

    /// The Julian Day number of the first Gregorian day.
    pub fn switch_index(&self) -> i64 {
        self.switch_index
    }

    fn gregorian_index(&self, year: i64, month: i64, day: i64) -> Result<i64> {
        self.iso.to_day_index(IsoDate::ymd(year, month, day))
    }

    /// The number of days between `julian_first` and `julian_last` that
    /// come before the switch-over, plus those between `gregorian_first`
    /// and `gregorian_last` that come after it.
    fn days_between(&self, julian: (i64, i64), gregorian: (i64, i64)) -> i64 {
        let (julian_first, julian_last) = julian;
        let (gregorian_first, gregorian_last) = gregorian;

        max(0, min(julian_last, self.switch_index - 1) - julian_first + 1)
            + max(0, gregorian_last - max(gregorian_first, self.switch_index) + 1)
    }

    /// Resolves fields that have no era: they are Gregorian if they name
    /// a day from the switch-over on, and Julian otherwise.
    fn index_without_era(&self, year: i64, month: i64, day: i64, overflow: Overflow) -> Result<i64> {
        let switch_over = self.switch_over;
        if (year, month, day) >= (switch_over.year, switch_over.month, switch_over.day) {
            return self.gregorian(year, month, day, overflow);
        }

        let index = self.julian.date_from_fields(&DateFields::ymd(year, month, day), overflow)?;
        if index < self.switch_index {
            return Ok(index);
        }

        // A Julian date that was skipped when the calendar switched over.
        match overflow {
            Overflow::Reject    => Err(Error::DateOverflow),
            Overflow::Constrain => Ok(self.switch_index - 1),
            Overflow::Balance   => Ok(index),
        }
    }

    fn gregorian(&self, year: i64, month: i64, day: i64, overflow: Overflow) -> Result<i64> {
        let month_length = JulianCalendar::month_length(month, is_gregorian_leap_year(year));
        let day = resolve_day(day, month_length, overflow)?;
        self.gregorian_index(year, month, day)
    }
}

impl Calendar for WesternCalendar {
    fn id(&self) -> CalendarId {
        CalendarId::Western { name: self.name.clone(), switch_over: self.switch_over }
    }

    fn fields_from_date(&self, day_index: i64) -> Result<CalendarFields> {
        if day_index >= self.switch_index {
            let date = self.iso.to_iso(day_index)?;
            Ok(CalendarFields::ymd(date.year, date.month, date.day).with_era(Era::Ns, date.year))
        }
        else {
            let fields = self.julian.fields_from_date(day_index)?;
            let (era, era_year) = era_of(fields.year);
            let era = if era == Era::Ad { Era::As } else { era };
            Ok(fields.with_era(era, era_year))
        }
    }

    fn full_fields_from_date(&self, day_index: i64) -> Result<(CalendarFields, WeekFields)> {
        let fields = self.fields_from_date(day_index)?;

        if day_index >= self.switch_index {
            let week_one_day = self.gregorian_index(fields.year, 1, WEEK_ONE_DAY)?;
            let figures = self.weeks.week_figures(day_index, week_one_day, fields.year)?;
            Ok((fields, figures.into()))
        }
        else {
            let (_, weeks) = self.julian.full_fields_from_date(day_index)?;
            Ok((fields, weeks))
        }
    }

    /// Fields without an era (or in era `ad`) are Gregorian if they name
    /// a day on or after the switch-over, and Julian otherwise. With era
    /// `ns` they are always Gregorian, and with `as` or `bc` always Julian.
    fn date_from_fields(&self, fields: &DateFields, overflow: Overflow) -> Result<i64> {
        let year = check_year_fields(fields, Era::Bc)?;
        check_month(fields.month)?;

        let index = match fields.era {
            None | Some(Era::Ad) => {
                self.index_without_era(year, fields.month, fields.day, overflow)?
            }

            Some(Era::Ns) => {
                let index = self.gregorian(year, fields.month, fields.day, overflow)?;
                if index < FIRST_SWITCH_OVER {
                    return Err(Error::OutOfRangeDateElement { element: "era", value: 3 });
                }
                index
            }

            Some(Era::As) | Some(Era::Bc) => {
                self.julian.date_from_fields(&DateFields::ymd(year, fields.month, fields.day), overflow)?
            }
        };

        if overflow == Overflow::Reject {
            let found = self.fields_from_date(index)?;
            let era_differs = match fields.era {
                Some(Era::Ad) | None => false,
                era                  => era != found.era,
            };

            if era_differs || found.year != year || found.month != fields.month || found.day != fields.day {
                return Err(Error::DateOverflow);
            }
        }

        Ok(index)
    }

    fn days_in_month(&self, day_index: i64) -> Result<i64> {
        let fields = self.fields_from_date(day_index)?;
        let (year, month) = (fields.year, fields.month);

        let julian_length = JulianCalendar::month_length(month, is_julian_leap_year(year));
        let gregorian_length = JulianCalendar::month_length(month, is_gregorian_leap_year(year));

        let julian = (self.julian.to_day_index(year, month, 1)?, self.julian.to_day_index(year, month, julian_length)?);
        let gregorian = (self.gregorian_index(year, month, 1)?, self.gregorian_index(year, month, gregorian_length)?);

        Ok(self.days_between(julian, gregorian))
    }

    fn days_in_year(&self, day_index: i64) -> Result<i64> {
        let year = self.fields_from_date(day_index)?.year;

        let julian_first = self.julian.to_day_index(year, 1, 1)?;
        let gregorian_first = self.gregorian_index(year, 1, 1)?;

        Ok(self.days_between((julian_first, self.julian.to_day_index(year, 12, 31)?),
                             (gregorian_first, self.gregorian_index(year, 12, 31)?)))
    }

    fn day_of_year(&self, day_index: i64) -> Result<i64> {
        let year = self.fields_from_date(day_index)?.year;

        let julian_first = self.julian.to_day_index(year, 1, 1)?;
        let first = if julian_first < self.switch_index {
            julian_first
        }
        else {
            max(self.gregorian_index(year, 1, 1)?, self.switch_index)
        };

        Ok(day_index - first + 1)
    }

    fn in_leap_year(&self, day_index: i64) -> Result<bool> {
        let year = self.fields_from_date(day_index)?.year;

        if day_index >= self.switch_index {
            Ok(is_gregorian_leap_year(year))
        }
        else {
            Ok(is_julian_leap_year(year))
        }
    }
}
