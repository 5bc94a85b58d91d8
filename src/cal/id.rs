//! Calendar identities, which can be stored and turned back into calendars.

use std::fmt;

use crate::cal::{Calendar, JulianCalendar, MilesianCalendar, WesternCalendar};
use crate::error::Result;
use crate::iso::IsoDate;


/// Everything needed to rebuild a calendar.
///
/// Its string form is `milesian`, `julian`, or for a Western calendar,
/// its name and switch-over date: `vatican:1582-10-15`.
#[derive(PartialEq, Eq, Debug, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(rename_all = "lowercase"))]
pub enum CalendarId {
    Milesian,
    Julian,
    Western {
        name: String,
        switch_over: IsoDate,
    },
}

impl CalendarId {

    /// Builds the calendar this identity stands for.
    ///
    /// ### Examples
    ///
    /// ```
    /// use calendrical::cal::{CalendarId, Calendar};
    ///
    /// let id = CalendarId::Julian;
    /// assert_eq!(id.build().unwrap().id(), id);
    /// ```
    pub fn build(&self) -> Result<Box<dyn Calendar>> {
        Ok(match self {
            CalendarId::Milesian => Box::new(MilesianCalendar::new()),
            CalendarId::Julian   => Box::new(JulianCalendar::new()),
            CalendarId::Western { name, switch_over } => Box::new(WesternCalendar::new(name.clone(), *switch_over)?),
        })
    }

    /// The name shown in date strings.
    pub fn name(&self) -> &str {
        match self {
            CalendarId::Milesian             => "milesian",
            CalendarId::Julian               => "julian",
            CalendarId::Western { name, .. } => name,
        }
    }
}

impl fmt::Display for CalendarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalendarId::Western { name, switch_over } => write!(f, "{}:{}", name, switch_over),
            other                                     => f.write_str(other.name()),
        }
    }
}
