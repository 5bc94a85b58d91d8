//! Integer arithmetic for calendrical computations.
//!
//! Calendars count backwards as well as forwards, so every division here
//! is a *floor* division: the remainder always has the sign of the
//! divisor, never the sign of the dividend.

use num_traits::{Float, PrimInt, Signed, ToPrimitive};

use crate::error::{Error, Result};


/// Returns `a` modulo `d`, always in the range `0 .. d`.
///
/// ### Examples
///
/// ```
/// use calendrical::arith::modulo;
///
/// assert_eq!(modulo(-1, 7), Ok(6));
/// assert_eq!(modulo(15, 7), Ok(1));
/// assert!(modulo(3, 0).is_err());
/// ```
pub fn modulo<T>(a: T, d: T) -> Result<T>
where T: PrimInt + Signed {
    div_mod(a, d).map(|(_, r)| r)
}

/// Divides `a` by `d`, returning the quotient and a remainder in the
/// range `0 .. d`, so that `a == quotient * d + remainder`.
pub fn div_mod<T>(a: T, d: T) -> Result<(T, T)>
where T: PrimInt + Signed {
    if d <= T::zero() {
        return Err(Error::InvalidDivisor { divisor: d.to_i64().unwrap_or(i64::MIN) });
    }

    let mut quotient  = a / d;
    let mut remainder = a % d;

    if remainder < T::zero() {
        remainder = remainder + d;
        quotient  = quotient - T::one();
    }

    Ok((quotient, remainder))
}

/// Moves the start of a cycle while keeping the same point in time.
///
/// The pair `(cycle, phase)` is a position, with `phase` in
/// `cycle_base .. cycle_base + period`. The result is the same position
/// expressed with phases in `cycle_base + shift .. cycle_base + shift + period`.
/// Fails with `OutOfRange` if the cycle is too large to be counted in phases.
///
/// This is how a year beginning in January gets turned into one that
/// begins in March (so the leap day falls at the very end), and back.
///
/// ### Examples
///
/// ```
/// use calendrical::arith::shift_cycle;
///
/// // January of year 20 is the 13th month of year 19 when years begin in March.
/// assert_eq!(shift_cycle(20, 1, 12, 2, 1), Ok((19, 13)));
/// assert_eq!(shift_cycle(20, 6, 12, 2, 1), Ok((20, 6)));
/// assert_eq!(shift_cycle(19, 13, 12, -2, 3), Ok((20, 1)));
/// ```
pub fn shift_cycle(cycle: i64, phase: i64, period: i64, shift: i64, cycle_base: i64) -> Result<(i64, i64)> {
    if period <= 0 {
        return Err(Error::InvalidDivisor { divisor: period });
    }

    if phase < cycle_base || phase >= cycle_base + period {
        return Err(Error::PhaseOutOfRange { phase, period, base: cycle_base });
    }

    let position = cycle.checked_mul(period)
                        .and_then(|p| p.checked_add(phase - cycle_base))
                        .and_then(|p| p.checked_sub(shift))
                        .ok_or(Error::OutOfRange)?;

    let (new_cycle, new_phase) = div_mod(position, period)?;
    Ok((new_cycle, new_phase + cycle_base + shift))
}

/// Whether `year` is a leap year under Julian rules: every fourth year,
/// counting year 0 (1 BC) and the negative years too.
pub fn is_julian_leap_year(year: i64) -> bool {
    year.rem_euclid(4) == 0
}

/// Whether `year` is a leap year under Gregorian rules.
///
/// ### Examples
///
/// ```
/// use calendrical::arith::is_gregorian_leap_year;
///
/// assert!(is_gregorian_leap_year(2000));
/// assert!(!is_gregorian_leap_year(1900));
/// ```
pub fn is_gregorian_leap_year(year: i64) -> bool {
    year.rem_euclid(4) == 0 && (year.rem_euclid(100) != 0 || year.rem_euclid(400) == 0)
}

/// Converts a number coming from a host environment into an exact
/// integer, refusing NaN, infinities, and anything with a fractional part.
pub fn integral<F: Float>(value: F) -> Result<i64> {
    if value.is_nan() || value.is_infinite() {
        return Err(Error::NotANumber);
    }

    if value.fract() != F::zero() {
        return Err(Error::NonInteger);
    }

    value.to_i64().ok_or(Error::NotANumber)
}


#[cfg(test)]
mod test {
    use super::*;

    mod modulo {
        use super::*;

        #[test]
        fn positive() {
            assert_eq!(modulo(17, 5), Ok(2));
        }

        #[test]
        fn negative() {
            assert_eq!(modulo(-17, 5), Ok(3));
            assert_eq!(modulo(-15, 5), Ok(0));
        }

        #[test]
        fn other_integer_types() {
            assert_eq!(modulo(-1i8, 12), Ok(11));
            assert_eq!(modulo(-400i32, 7), Ok(6));
        }

        #[test]
        fn zero_divisor() {
            assert_eq!(modulo(4, 0), Err(Error::InvalidDivisor { divisor: 0 }));
        }

        #[test]
        fn negative_divisor() {
            assert_eq!(modulo(4, -3), Err(Error::InvalidDivisor { divisor: -3 }));
        }
    }

    mod div_mod {
        use super::*;

        #[test]
        fn before_epoch() {
            assert_eq!(div_mod(-1, 1461), Ok((-1, 1460)));
        }

        #[test]
        fn exact() {
            assert_eq!(div_mod(-14, 7), Ok((-2, 0)));
            assert_eq!(div_mod(14, 7), Ok((2, 0)));
        }
    }

    mod shift_cycle {
        use super::*;

        #[test]
        fn phase_too_low() {
            assert_eq!(shift_cycle(2020, 0, 12, 2, 1),
                       Err(Error::PhaseOutOfRange { phase: 0, period: 12, base: 1 }));
        }

        #[test]
        fn phase_too_high() {
            assert!(shift_cycle(2020, 13, 12, 2, 1).is_err());
        }

        #[test]
        fn negative_cycle() {
            assert_eq!(shift_cycle(-1, 2, 12, 2, 1), Ok((-2, 14)));
        }

        #[test]
        fn weeks() {
            assert_eq!(shift_cycle(1, 0, 7, 1, 0), Ok((0, 7)));
        }

        #[test]
        fn cycle_too_large() {
            assert_eq!(shift_cycle(i64::MAX / 2, 1, 12, 2, 1), Err(Error::OutOfRange));
        }
    }

    mod leap_years {
        use super::*;

        #[test]
        fn julian() {
            assert!(is_julian_leap_year(-4));
            assert!(is_julian_leap_year(0));
            assert!(is_julian_leap_year(1900));
            assert!(!is_julian_leap_year(-1));
            assert!(!is_julian_leap_year(2021));
        }

        #[test]
        fn gregorian() {
            assert!(is_gregorian_leap_year(-400));
            assert!(!is_gregorian_leap_year(-100));
            assert!(is_gregorian_leap_year(2024));
            assert!(!is_gregorian_leap_year(2100));
        }
    }

    mod integral {
        use super::*;

        #[test]
        fn whole() {
            assert_eq!(integral(2020.0), Ok(2020));
            assert_eq!(integral(-3.0f32), Ok(-3));
        }

        #[test]
        fn not_a_number() {
            assert_eq!(integral(f64::NAN), Err(Error::NotANumber));
            assert_eq!(integral(f64::INFINITY), Err(Error::NotANumber));
        }

        #[test]
        fn fractional() {
            assert_eq!(integral(1.5), Err(Error::NonInteger));
        }
    }
}
