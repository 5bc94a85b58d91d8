//! The errors that calendrical computations can produce.

/// Error type for every fallible operation in this crate.
///
/// None of these are retried anywhere: arithmetic either succeeds
/// deterministically, or the input is rejected outright.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {

    /// A host-supplied quantity was NaN or infinite.
    #[error("non numeric value")]
    NotANumber,

    /// A host-supplied date field had a fractional part.
    #[error("non integer value for date field")]
    NonInteger,

    /// A modulo or division was asked with a divisor that is not
    /// strictly positive. This points at a bad cycle or week rule.
    #[error("non positive divisor {divisor} in calendrical division")]
    InvalidDivisor {
        /// The offending divisor.
        divisor: i64,
    },

    /// The phase given to `shift_cycle` was outside of its cycle.
    #[error("out-of-range phase value {phase} in cycle of {period} starting at {base}")]
    PhaseOutOfRange {
        phase: i64,
        period: i64,
        base: i64,
    },

    /// A month, era, or era year that the calendar cannot handle.
    /// These are rejected whatever the overflow option.
    #[error("date element out of range: {element} = {value}")]
    OutOfRangeDateElement {
        /// Which element was wrong: `"month"`, `"era"`, `"eraYear"`...
        element: &'static str,
        /// The value, or the era's index when the element is an era.
        value: i64,
    },

    /// The day does not exist, and the `reject` overflow option is in force.
    #[error("date overflow with reject option")]
    DateOverflow,

    /// A day index or a year so far from the epoch that computing with
    /// it would overflow.
    #[error("date out of computable range")]
    OutOfRange,

    /// `year`, `era` and `eraYear` contradict each other, or are missing.
    #[error("ambiguous date elements")]
    AmbiguousDateElement,

    /// An unknown overflow or largest-unit option.
    #[error("unknown option: {0}")]
    InvalidOption(String),

    /// A difference was asked between dates of different calendars.
    #[error("until or since operation requires same calendar")]
    MixingCalendar,

    /// A Western calendar cannot switch to Gregorian rules before the
    /// first day they were ever used.
    #[error("Gregorian transition is on or after 1582-10-15")]
    SwitchOverTooEarly,

    /// A cycle table that the engine cannot work with.
    #[error("invalid calendar rule: {0}")]
    InvalidRule(String),

    /// A string that could not be read as a date or calendar id.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Result type with this crate's `Error`.
pub type Result<T> = std::result::Result<T, Error>;
