//! Reading dates and calendar identities from strings.

use std::str::FromStr;

use iso8601::Date;

use crate::cal::CalendarId;
use crate::error::{Error, Result};
use crate::iso::{IsoCounter, IsoDate};


/// Parses an ISO 8601 date string, in any of its three forms: calendar
/// date (`2020-10-21`), week date (`2020-W43-3`) or ordinal date
/// (`2020-295`).
pub fn parse_iso_8601_date(string: &str) -> Result<IsoDate> {
    let parsed = iso8601::date(string).map_err(Error::Parse)?;
    let counter = IsoCounter::new();

    match parsed {
        Date::YMD { year, month, day } => Ok(IsoDate::ymd(year.into(), month.into(), day.into())),

        Date::Week { year, ww, d } => {
            let fourth = counter.to_day_index(IsoDate::ymd(year.into(), 1, 4))?;
            let first_monday = fourth - counter.weekday(fourth) + 1;
            counter.to_iso(first_monday + (i64::from(ww) - 1) * 7 + i64::from(d) - 1)
        }

        Date::Ordinal { year, ddd } => {
            let first = counter.to_day_index(IsoDate::ymd(year.into(), 1, 1))?;
            counter.to_iso(first + i64::from(ddd) - 1)
        }
    }
}

impl FromStr for IsoDate {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        parse_iso_8601_date(input)
    }
}

impl FromStr for CalendarId {
    type Err = Error;

    /// Reads `milesian`, `julian`, or `<name>:<switch-over date>`, where
    /// the date follows the last colon.
    fn from_str(input: &str) -> Result<Self> {
        match input {
            "milesian" => Ok(CalendarId::Milesian),
            "julian"   => Ok(CalendarId::Julian),
            other => {
                // Names may hold colons of their own; the date never does.
                let mut parts = other.rsplitn(2, ':');
                match (parts.next(), parts.next()) {
                    (Some(date), Some(name)) if ! name.is_empty() => {
                        Ok(CalendarId::Western { name: name.to_owned(), switch_over: date.parse()? })
                    }
                    _ => Err(Error::Parse(format!("unknown calendar {:?}", other))),
                }
            }
        }
    }
}
