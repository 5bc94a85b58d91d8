extern crate calendrical;
extern crate proptest;

use proptest::prelude::*;

use calendrical::{Calendar, DateFields, IsoCounter, Overflow};
use calendrical::arith::{modulo, shift_cycle};
use calendrical::cal::{JulianCalendar, MilesianCalendar, WesternCalendar};


// Julian Day numbers from around 4700 BC to AD 4000.
const DAYS: std::ops::Range<i64> = 0 .. 3_200_000;

fn fields_of(calendar: &dyn Calendar, day: i64) -> DateFields {
    let fields = calendar.fields_from_date(day).unwrap();
    DateFields::ymd(fields.year, fields.month, fields.day)
}

proptest! {
    #[test]
    fn milesian_days(day in DAYS) {
        let calendar = MilesianCalendar::new();
        let fields = fields_of(&calendar, day);
        prop_assert_eq!(calendar.date_from_fields(&fields, Overflow::Reject), Ok(day));
    }

    #[test]
    fn julian_days(day in DAYS) {
        let calendar = JulianCalendar::new();
        let fields = fields_of(&calendar, day);
        prop_assert_eq!(calendar.date_from_fields(&fields, Overflow::Reject), Ok(day));
    }

    #[test]
    fn western_days(day in DAYS) {
        let calendar = WesternCalendar::german();
        let fields = fields_of(&calendar, day);
        prop_assert_eq!(calendar.date_from_fields(&fields, Overflow::Reject), Ok(day));
    }

    #[test]
    fn iso_days(day in DAYS) {
        let counter = IsoCounter::new();
        let date = counter.to_iso(day).unwrap();
        prop_assert_eq!(counter.to_day_index(date), Ok(day));
    }

    #[test]
    fn balanced_fields_are_canonical(year in -3000_i64 .. 3000, month in 1_i64 ..= 12, day in -400_i64 .. 400) {
        let calendar = MilesianCalendar::new();
        let index = calendar.date_from_fields(&DateFields::ymd(year, month, day), Overflow::Balance).unwrap();
        let canonical = fields_of(&calendar, index);
        prop_assert_eq!(calendar.date_from_fields(&canonical, Overflow::Reject), Ok(index));
    }

    #[test]
    fn modulo_stays_in_range(dividend in any::<i32>(), divisor in 1_i64 .. 10_000) {
        let remainder = modulo(i64::from(dividend), divisor).unwrap();
        prop_assert!(remainder >= 0 && remainder < divisor);
        prop_assert_eq!(modulo(i64::from(dividend) - remainder, divisor), Ok(0));
    }

    #[test]
    fn shifted_cycles_come_back(cycle in -100_i64 .. 100, phase in 0_i64 .. 12, shift in -11_i64 .. 12) {
        let (c, p) = shift_cycle(cycle, phase, 12, shift, 0).unwrap();
        prop_assert_eq!(shift_cycle(c, p, 12, -shift, shift), Ok((cycle, phase)));
    }
}
