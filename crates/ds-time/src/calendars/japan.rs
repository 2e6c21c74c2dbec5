//! Japanese national holidays.
//!
//! [`japanese_holidays`] resolves the holiday list of one year:
//! * New Year's Day (Jan 1)
//! * Coming of Age Day (2nd Monday in January)
//! * National Foundation Day (Feb 11)
//! * Emperor's Birthday (Dec 23 before 2020, Feb 23 from 2020)
//! * Vernal Equinox Day (computed, see [`vernal_equinox_day`])
//! * Showa Day (Apr 29)
//! * Constitution Memorial Day, Greenery Day, Children's Day (May 3–5)
//! * Marine Day (3rd Monday in July; Jul 23 from 2020)
//! * Sports Day (2nd Monday in October; Jul 24 from 2020)
//! * Mountain Day (Aug 11)
//! * Respect for the Aged Day (3rd Monday in September)
//! * Autumnal Equinox Day (computed, see [`autumnal_equinox_day`])
//! * Culture Day (Nov 3)
//! * Labour Thanksgiving Day (Nov 23)
//!
//! A holiday falling on a Sunday makes the following Monday a substitute
//! holiday (*furikae kyūjitsu*). The substitution is applied once over the
//! list above; a substitute that lands on another holiday is dropped rather
//! than pushed further (so May 6, 2020 is not in the list).
//!
//! The 2020 move of Marine Day and Sports Day to July 23/24 is applied to
//! every later year as well.

use crate::calendar::Calendar;
use crate::date::Date;
use crate::weekday::Weekday;

/// Japan calendar: Saturdays, Sundays and national holidays are closed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Japan;

/// Last year the equinox approximation is used for.
const EQUINOX_FORMULA_LAST_YEAR: u16 = 2099;

/// Day-of-month of the Vernal Equinox Day (March).
///
/// `floor(20.8431 + 0.242194·(y−1980) − floor((y−1980)/4))` up to 2099,
/// March 20 afterwards.
pub fn vernal_equinox_day(year: u16) -> u8 {
    equinox_day(year, 20.8431).unwrap_or(20)
}

/// Day-of-month of the Autumnal Equinox Day (September).
///
/// `floor(23.2488 + 0.242194·(y−1980) − floor((y−1980)/4))` up to 2099,
/// September 23 afterwards.
pub fn autumnal_equinox_day(year: u16) -> u8 {
    equinox_day(year, 23.2488).unwrap_or(23)
}

fn equinox_day(year: u16, base: f64) -> Option<u8> {
    if year > EQUINOX_FORMULA_LAST_YEAR {
        return None;
    }
    let y = year as f64 - 1980.0;
    let d = base + 0.242194 * y - (y / 4.0).floor();
    Some(d.floor() as u8)
}

fn nth_monday(n: u8, year: u16, month: u8) -> Option<Date> {
    Date::nth_weekday(n, Weekday::Monday, year, month).ok()
}

/// All national holidays of `year`, sorted ascending and without duplicates.
///
/// Years outside the supported date range yield an empty list.
pub fn japanese_holidays(year: u16) -> Vec<Date> {
    if !(Date::MIN_YEAR..=Date::MAX_YEAR).contains(&year) {
        return Vec::new();
    }
    let fixed = |month: u8, day: u8| Date::from_ymd_unchecked(year, month, day);

    let mut holidays = vec![
        fixed(1, 1),
        fixed(2, 11),
        fixed(4, 29),
        fixed(5, 3),
        fixed(5, 4),
        fixed(5, 5),
        fixed(8, 11),
        fixed(11, 3),
        fixed(11, 23),
    ];

    // Emperor's Birthday
    holidays.push(if year >= 2020 { fixed(2, 23) } else { fixed(12, 23) });

    holidays.push(fixed(3, vernal_equinox_day(year)));
    holidays.push(fixed(9, autumnal_equinox_day(year)));

    // Coming of Age Day
    holidays.extend(nth_monday(2, year, 1));
    // Marine Day
    if year >= 2020 {
        holidays.push(fixed(7, 23));
    } else {
        holidays.extend(nth_monday(3, year, 7));
    }
    // Respect for the Aged Day
    holidays.extend(nth_monday(3, year, 9));
    // Sports Day
    if year >= 2020 {
        holidays.push(fixed(7, 24));
    } else {
        holidays.extend(nth_monday(2, year, 10));
    }

    let substitutes: Vec<Date> = holidays
        .iter()
        .filter(|d| d.weekday() == Weekday::Sunday)
        .filter_map(|d| d.checked_add_days(1))
        .filter(|next| !holidays.contains(next))
        .collect();
    holidays.extend(substitutes);

    holidays.sort_unstable();
    holidays.dedup();
    holidays
}

/// The holidays of `year` as zero-padded ISO strings.
pub fn japanese_holiday_strings(year: u16) -> Vec<String> {
    japanese_holidays(year)
        .into_iter()
        .map(|d| d.to_string())
        .collect()
}

/// Return `true` if `date` is a national holiday (including substitutes).
pub fn is_japanese_holiday(date: Date) -> bool {
    japanese_holidays(date.year()).binary_search(&date).is_ok()
}

/// String form of [`is_japanese_holiday`]; an unparseable date is not a
/// holiday.
pub fn is_japanese_holiday_str(date: &str) -> bool {
    date.parse::<Date>().is_ok_and(is_japanese_holiday)
}

impl Calendar for Japan {
    fn name(&self) -> &str {
        "Japan"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.weekday().is_weekend() && !is_japanese_holiday(date)
    }
}
