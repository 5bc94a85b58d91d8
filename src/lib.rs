#![crate_name = "calendrical"]
#![crate_type = "rlib"]

#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
//#![warn(missing_docs)]

#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unused_qualifications)]
#![warn(unused_results)]

//! Calendar arithmetic on a **cycle-based** computation engine.
//!
//! A calendar here is a table of nested cycles (400 years, centuries,
//! four-year runs, years, months, days) that a `Clockwork` walks to turn
//! a Julian Day number into fields and back. The Milesian, Julian and
//! Western calendars are built on it, along with week numbering for any
//! of them.
//!
//! # Examples
//!
//! ```
//! use calendrical::cal::{Calendar, DateFields, Overflow, MilesianCalendar, WesternCalendar};
//!
//! let milesian = MilesianCalendar::new();
//! let day = milesian.date_from_fields(&DateFields::ymd(2020, 10, 31), Overflow::Reject).unwrap();
//!
//! let vatican = WesternCalendar::vatican();
//! let fields = vatican.fields_from_date(day).unwrap();
//! assert_eq!((fields.year, fields.month, fields.day), (2020, 10, 21));
//! ```

pub mod arith;
pub mod cal;
pub mod clockwork;
pub mod duration;
pub mod error;
pub mod iso;
pub mod week;

#[cfg(feature = "parse")]
pub mod parse;

mod util;

pub use crate::cal::{Calendar, CalendarId, Date, DateFields, Era, LargestUnit, Overflow};
pub use crate::duration::Duration;
pub use crate::error::{Error, Result};
pub use crate::iso::{IsoCounter, IsoDate};
