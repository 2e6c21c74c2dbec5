//! Integration tests for the national-holiday resolver and the facility
//! calendar.

use std::collections::HashSet;

use ds_time::calendar::Calendar;
use ds_time::{
    is_japanese_holiday, japanese_holiday_strings, japanese_holidays, CalendarMonth, Date,
    FacilityCalendar, HolidayPeriod, Weekday, WeekdaySet,
};
use proptest::prelude::*;

fn date(y: u16, m: u8, d: u8) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

fn month(y: u16, m: u8) -> CalendarMonth {
    CalendarMonth::from_numbers(y, m).unwrap()
}

/// Assert that the resolver produces exactly `expected` for `year`.
fn check_holidays(year: u16, expected: &[&str]) {
    let calculated = japanese_holiday_strings(year);
    let calc_set: HashSet<&str> = calculated.iter().map(String::as_str).collect();
    let exp_set: HashSet<&str> = expected.iter().copied().collect();

    for d in &calculated {
        assert!(exp_set.contains(d.as_str()), "{d} calculated as holiday but not expected");
    }
    for d in expected {
        assert!(calc_set.contains(d), "{d} expected as holiday but not found");
    }
    assert_eq!(calculated.len(), expected.len());
}

// ─── Holiday lists ────────────────────────────────────────────────────────────

#[test]
fn test_japan_holidays_2024() {
    check_holidays(
        2024,
        &[
            "2024-01-01",
            "2024-01-08",
            "2024-02-11",
            "2024-02-12",
            "2024-02-23",
            "2024-03-20",
            "2024-04-29",
            "2024-05-03",
            "2024-05-04",
            "2024-05-05",
            "2024-05-06",
            "2024-07-23",
            "2024-07-24",
            "2024-08-11",
            "2024-08-12",
            "2024-09-16",
            "2024-09-22",
            "2024-09-23",
            "2024-11-03",
            "2024-11-04",
            "2024-11-23",
        ],
    );
}

#[test]
fn test_japan_holidays_2019() {
    check_holidays(
        2019,
        &[
            "2019-01-01",
            "2019-01-14",
            "2019-02-11",
            "2019-03-21",
            "2019-04-29",
            "2019-05-03",
            "2019-05-04",
            "2019-05-05",
            "2019-05-06",
            "2019-07-15",
            "2019-08-11",
            "2019-08-12",
            "2019-09-16",
            "2019-09-23",
            "2019-10-14",
            "2019-11-03",
            "2019-11-04",
            "2019-11-23",
            "2019-12-23",
        ],
    );
}

#[test]
fn test_equinoxes_within_known_window() {
    let holidays = japanese_holidays(2024);
    let spring = holidays
        .iter()
        .find(|d| d.month() == 3)
        .expect("a March holiday");
    assert!((19..=22).contains(&spring.day_of_month()));
    let autumn = holidays
        .iter()
        .find(|d| d.month() == 9 && d.day_of_month() >= 21)
        .expect("an autumn equinox");
    assert!((21..=24).contains(&autumn.day_of_month()));
}

#[test]
fn test_holidays_across_year_boundaries() {
    assert!(is_japanese_holiday(date(2023, 1, 1)));
    assert!(is_japanese_holiday(date(2025, 1, 1)));
    assert!(!is_japanese_holiday(date(2024, 3, 15)));
}

// ─── Facility calendar ────────────────────────────────────────────────────────

#[test]
fn test_facility_sunday_closed_30_day_month() {
    // April 2024 starts on a Monday: 30 days, four Sundays
    let sundays: WeekdaySet = [Weekday::Sunday].into_iter().collect();
    let cal = FacilityCalendar::new(sundays, &[], &[], false);
    assert_eq!(cal.business_days_in(month(2024, 4)), 26);
}

#[test]
fn test_facility_with_all_rules() {
    // May 2024, closed Sundays, Saturdays closed from May 20, custom closure
    // on May 31, national holidays observed.
    let sundays: WeekdaySet = [Weekday::Sunday].into_iter().collect();
    let periods = [HolidayPeriod {
        start_date: date(2024, 5, 20),
        end_date: None,
        regular_holidays: [Weekday::Saturday].into_iter().collect(),
    }];
    let custom = [date(2024, 5, 31)];
    let cal = FacilityCalendar::new(sundays, &periods, &custom, true);

    let business = cal.business_dates(month(2024, 5));
    // 31 days − 4 Sundays (5, 12, 19, 26) − Saturday 25 − May 31
    //        − May 3, 4, 6 (May 5 is already a Sunday)
    assert_eq!(business.len(), 31 - 4 - 1 - 1 - 3);
    assert!(!business.contains(&date(2024, 5, 25)));
    assert!(business.contains(&date(2024, 5, 18)));

    let occurrences = cal.business_day_occurrences(month(2024, 5));
    assert_eq!(occurrences[Weekday::Sunday], 0);
    assert_eq!(occurrences[Weekday::Saturday], 2); // 11, 18
    assert_eq!(occurrences.values().sum::<u32>(), business.len() as u32);
}

// ─── Properties ───────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn prop_holidays_sorted_and_unique(year in 1900u16..=2300) {
        let holidays = japanese_holidays(year);
        prop_assert!(holidays.windows(2).all(|w| w[0] < w[1]));
        let strings = japanese_holiday_strings(year);
        let mut sorted = strings.clone();
        sorted.sort();
        prop_assert_eq!(&strings, &sorted);
    }

    #[test]
    fn prop_exactly_one_emperors_birthday(year in 1900u16..=2300) {
        let holidays = japanese_holidays(year);
        let feb = holidays.contains(&date(year, 2, 23));
        let dec = holidays.contains(&date(year, 12, 23));
        prop_assert!(feb != dec);
        prop_assert_eq!(feb, year >= 2020);
    }

    #[test]
    fn prop_membership_matches_list(year in 1900u16..=2300, day_of_year in 0i32..365) {
        let d = date(year, 1, 1).add_days(day_of_year).unwrap();
        let listed = japanese_holidays(d.year()).contains(&d);
        prop_assert_eq!(is_japanese_holiday(d), listed);
    }
}
