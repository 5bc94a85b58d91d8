extern crate calendrical;
use calendrical::arith::is_gregorian_leap_year;
use calendrical::week::{WeekClock, WeekFigures, WeekRule};
use calendrical::{Calendar, DateFields, IsoCounter, IsoDate, Overflow};
use calendrical::cal::{JulianCalendar, MilesianCalendar, WesternCalendar};


fn iso_day(year: i64, month: i64, day: i64) -> i64 {
    IsoCounter::new().to_day_index(IsoDate::ymd(year, month, day)).unwrap()
}

mod iso {
    use super::*;

    #[test]
    fn wednesday_1_january_2020() {
        let figures = IsoCounter::new().iso_week_figures(iso_day(2020, 1, 1)).unwrap();
        assert_eq!(figures.weekday, 3);
        assert_eq!(figures.week_number, 1);
        assert_eq!(figures.week_year_offset, 0);
    }

    #[test]
    fn monday_30_december_2019() {
        let figures = IsoCounter::new().iso_week_figures(iso_day(2019, 12, 30)).unwrap();
        assert_eq!(figures, WeekFigures { week_number: 1, weekday: 1, week_year_offset: 1, weeks_in_year: 53 });
    }

    #[test]
    fn sunday_3_january_2021() {
        let figures = IsoCounter::new().iso_week_figures(iso_day(2021, 1, 3)).unwrap();
        assert_eq!(figures, WeekFigures { week_number: 53, weekday: 7, week_year_offset: -1, weeks_in_year: 53 });
    }

    #[test]
    fn every_day_of_a_decade() {
        let counter = IsoCounter::new();
        let mut previous = counter.iso_week_figures(iso_day(2010, 1, 3)).unwrap();

        for day in iso_day(2010, 1, 4) .. iso_day(2020, 1, 1) {
            let figures = counter.iso_week_figures(day).unwrap();
            if figures.weekday == 1 {
                let expected = if previous.week_number == previous.weeks_in_year { 1 } else { previous.week_number + 1 };
                assert_eq!(figures.week_number, expected);
            }
            else {
                assert_eq!(figures.weekday, previous.weekday + 1);
                assert_eq!(figures.week_number, previous.week_number);
            }
            previous = figures;
        }
    }
}

mod rules {
    use super::*;

    #[test]
    fn weeks_starting_on_sunday() {
        // Week 1 holds 1 January, and weeks begin on Sunday, numbered from 0.
        let rule = WeekRule::builder(1, |y| if is_gregorian_leap_year(y) { 366 } else { 365 })
                            .start_of_week(0)
                            .day_base(0)
                            .build()
                            .unwrap();
        let clock = WeekClock::new(rule);

        let new_year = iso_day(2020, 1, 1);
        let figures = clock.week_figures(iso_day(2020, 1, 5), new_year, 2020).unwrap();
        assert_eq!(figures.week_number, 2);
        assert_eq!(figures.weekday, 0);
    }
}

mod calendars {
    use super::*;

    #[test]
    fn western_after_switch_over_is_iso() {
        let calendar = WesternCalendar::english();
        let counter = IsoCounter::new();
        for day in iso_day(1800, 12, 20) .. iso_day(1801, 1, 15) {
            let figures = counter.iso_week_figures(day).unwrap();
            assert_eq!(calendar.week_of_year(day), Ok(figures.week_number));
            assert_eq!(calendar.day_of_week(day), Ok(figures.weekday));
        }
    }

    #[test]
    fn year_of_week() {
        let calendar = WesternCalendar::vatican();
        assert_eq!(calendar.year_of_week(iso_day(2019, 12, 30)), Ok(2020));
        assert_eq!(calendar.year_of_week(iso_day(2021, 1, 3)), Ok(2020));
        assert_eq!(calendar.weeks_in_year(iso_day(2021, 1, 3)), Ok(53));
    }

    #[test]
    fn julian_week_one_holds_4_january() {
        let calendar = JulianCalendar::new();
        let day = calendar.date_from_fields(&DateFields::ymd(1500, 1, 4), Overflow::Reject).unwrap();
        assert_eq!(calendar.week_of_year(day), Ok(1));
    }

    #[test]
    fn milesian_week_zero_holds_7_1m() {
        let calendar = MilesianCalendar::new();
        for year in 1990 .. 2030 {
            let day = calendar.date_from_fields(&DateFields::ymd(year, 1, 7), Overflow::Reject).unwrap();
            assert_eq!(calendar.week_of_year(day), Ok(0));
            assert_eq!(calendar.year_of_week(day), Ok(year));
        }
    }
}
