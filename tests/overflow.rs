extern crate calendrical;
use calendrical::{Calendar, DateFields, Error, Overflow};
use calendrical::cal::{JulianCalendar, MilesianCalendar, WesternCalendar};


mod february_30 {
    use super::*;

    fn february_30() -> DateFields {
        DateFields::ymd(2021, 2, 30)
    }

    #[test]
    fn reject() {
        let calendar = WesternCalendar::vatican();
        assert_eq!(calendar.date_from_fields(&february_30(), Overflow::Reject), Err(Error::DateOverflow));
    }

    #[test]
    fn constrain() {
        let calendar = WesternCalendar::vatican();
        assert_eq!(calendar.date_from_fields(&february_30(), Overflow::Constrain),
                   calendar.date_from_fields(&DateFields::ymd(2021, 2, 28), Overflow::Reject));
    }

    #[test]
    fn balance() {
        let calendar = WesternCalendar::vatican();
        assert_eq!(calendar.date_from_fields(&february_30(), Overflow::Balance),
                   calendar.date_from_fields(&DateFields::ymd(2021, 3, 2), Overflow::Reject));
    }

    #[test]
    fn julian() {
        let calendar = JulianCalendar::new();
        assert_eq!(calendar.date_from_fields(&february_30(), Overflow::Reject), Err(Error::DateOverflow));
        assert_eq!(calendar.date_from_fields(&february_30(), Overflow::Balance),
                   calendar.date_from_fields(&DateFields::ymd(2021, 3, 2), Overflow::Reject));
    }
}

mod months {
    use super::*;

    #[test]
    fn never_balanced() {
        let calendar = MilesianCalendar::new();
        for overflow in &[ Overflow::Reject, Overflow::Constrain, Overflow::Balance ] {
            assert_eq!(calendar.date_from_fields(&DateFields::ymd(2020, 0, 1), *overflow),
                       Err(Error::OutOfRangeDateElement { element: "month", value: 0 }));
        }
    }
}

mod milesian_days {
    use super::*;

    #[test]
    fn thirty_first_of_odd_month() {
        let calendar = MilesianCalendar::new();
        let fields = DateFields::ymd(2020, 9, 31);
        assert_eq!(calendar.date_from_fields(&fields, Overflow::Reject), Err(Error::DateOverflow));
        assert_eq!(calendar.date_from_fields(&fields, Overflow::Constrain),
                   calendar.date_from_fields(&DateFields::ymd(2020, 9, 30), Overflow::Reject));
        assert_eq!(calendar.date_from_fields(&fields, Overflow::Balance),
                   calendar.date_from_fields(&DateFields::ymd(2020, 10, 1), Overflow::Reject));
    }

    #[test]
    fn day_zero() {
        let calendar = MilesianCalendar::new();
        let fields = DateFields::ymd(2020, 10, 0);
        assert_eq!(calendar.date_from_fields(&fields, Overflow::Constrain),
                   calendar.date_from_fields(&DateFields::ymd(2020, 10, 1), Overflow::Reject));
        assert_eq!(calendar.date_from_fields(&fields, Overflow::Balance),
                   calendar.date_from_fields(&DateFields::ymd(2020, 9, 30), Overflow::Reject));
    }
}

mod options {
    use super::*;

    #[test]
    fn from_strings() {
        assert_eq!("reject".parse::<Overflow>(), Ok(Overflow::Reject));
        assert_eq!("sideways".parse::<Overflow>(), Err(Error::InvalidOption("sideways".into())));
    }
}

mod out_of_range {
    use super::*;
    use calendrical::{CalendarId, Date, Duration, LargestUnit};

    #[test]
    fn enormous_milesian_year() {
        let fields = DateFields::ymd(i64::MAX / 100, 1, 1);
        assert_eq!(MilesianCalendar::new().date_from_fields(&fields, Overflow::Reject), Err(Error::OutOfRange));
    }

    #[test]
    fn enormous_julian_year() {
        let fields = DateFields::ymd(i64::MIN, 1, 1);
        assert_eq!(JulianCalendar::new().date_from_fields(&fields, Overflow::Constrain), Err(Error::OutOfRange));
    }

    #[test]
    fn enormous_western_year() {
        let fields = DateFields::ymd(i64::MAX, 12, 31);
        assert_eq!(WesternCalendar::vatican().date_from_fields(&fields, Overflow::Constrain), Err(Error::OutOfRange));
    }

    #[test]
    fn first_day_index() {
        assert_eq!(MilesianCalendar::new().fields_from_date(i64::MIN), Err(Error::OutOfRange));
        assert_eq!(JulianCalendar::new().fields_from_date(i64::MIN), Err(Error::OutOfRange));
        assert_eq!(WesternCalendar::english().fields_from_date(i64::MIN), Err(Error::OutOfRange));
    }

    #[test]
    fn last_day_index() {
        assert!(MilesianCalendar::new().fields_from_date(i64::MAX).is_ok());
    }

    #[test]
    fn adding_too_many_years() {
        let calendar = MilesianCalendar::new();
        let date = calendar.date(&DateFields::ymd(2020, 1, 1), Overflow::Reject).unwrap();
        let duration = Duration::new(i64::MAX, 0, 0, 0);
        assert_eq!(calendar.date_add(&date, &duration, Overflow::Constrain), Err(Error::OutOfRange));
    }

    #[test]
    fn days_between_the_ends_of_time() {
        let calendar = MilesianCalendar::new();
        let first = Date::new(i64::MIN, CalendarId::Milesian);
        let last = Date::new(i64::MAX, CalendarId::Milesian);
        assert_eq!(calendar.date_until(&first, &last, LargestUnit::Days), Err(Error::OutOfRange));
    }
}
