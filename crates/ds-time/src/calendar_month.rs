//! `CalendarMonth` — a validated (year, month) pair, the unit every
//! business-day and forecast calculation is run over.

use crate::date::{days_in_month, Date};
use crate::month::Month;
use ds_core::ensure;
use ds_core::errors::{Error, Result};

/// A calendar month of a specific year.
///
/// Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarMonth {
    year: u16,
    month: Month,
}

/// One of the (up to five) day-of-month weeks of a month: days 1–7, 8–14,
/// 15–21, 22–28, and 29 to the end of the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWeek {
    /// Week number, 1-based.
    pub number: u8,
    /// First date of the week.
    pub start: Date,
    /// Last date of the week (clamped to the end of the month).
    pub end: Date,
}

impl CalendarMonth {
    /// Create a month; the year must lie within the supported `Date` range.
    pub fn new(year: u16, month: Month) -> Result<Self> {
        ensure!(
            (Date::MIN_YEAR..=Date::MAX_YEAR).contains(&year),
            "year {year} out of range [{}, {}]",
            Date::MIN_YEAR,
            Date::MAX_YEAR
        );
        Ok(Self { year, month })
    }

    /// Create a month from a 1-based month number.
    pub fn from_numbers(year: u16, month: u8) -> Result<Self> {
        let month = Month::from_number(month)
            .ok_or_else(|| Error::InvalidArgument(format!("month {month} out of range [1, 12]")))?;
        Self::new(year, month)
    }

    /// The month containing `date`.
    pub fn of(date: Date) -> Self {
        let (year, month, _) = date.ymd();
        Self {
            year,
            month: Month::from_number(month).unwrap_or(Month::January),
        }
    }

    /// The year.
    pub fn year(&self) -> u16 {
        self.year
    }

    /// The month of the year.
    pub fn month(&self) -> Month {
        self.month
    }

    /// Number of days in this month.
    pub fn days_in_month(&self) -> u8 {
        days_in_month(self.year, self.month.number())
    }

    /// The date of day-of-month `day`, or `None` if the month has no such day.
    pub fn day(&self, day: u8) -> Option<Date> {
        (1..=self.days_in_month())
            .contains(&day)
            .then(|| Date::from_ymd_unchecked(self.year, self.month.number(), day))
    }

    /// First day of the month.
    pub fn first_day(&self) -> Date {
        Date::from_ymd_unchecked(self.year, self.month.number(), 1)
    }

    /// Last day of the month.
    pub fn last_day(&self) -> Date {
        Date::from_ymd_unchecked(self.year, self.month.number(), self.days_in_month())
    }

    /// Every date of the month in ascending order.
    pub fn dates(&self) -> impl Iterator<Item = Date> {
        let first = self.first_day().serial();
        let last = self.last_day().serial();
        let (year, month) = (self.year, self.month.number());
        (first..=last).map(move |serial| {
            Date::from_ymd_unchecked(year, month, (serial - first + 1) as u8)
        })
    }

    /// Return `true` if `date` falls within this month.
    pub fn contains(&self, date: Date) -> bool {
        (self.first_day()..=self.last_day()).contains(&date)
    }

    /// Week number (1–5) of a day-of-month: days 1–7 are week 1, and so on.
    pub fn week_of_day(day: u8) -> u8 {
        day.div_ceil(7)
    }

    /// The day-of-month weeks of this month, in order.
    pub fn weeks(&self) -> impl Iterator<Item = MonthWeek> {
        let days = self.days_in_month();
        let this = *self;
        (1..=5u8)
            .map(|number| (number, (number - 1) * 7 + 1))
            .take_while(move |(_, start_day)| *start_day <= days)
            .map(move |(number, start_day)| MonthWeek {
                number,
                start: Date::from_ymd_unchecked(this.year, this.month.number(), start_day),
                end: Date::from_ymd_unchecked(
                    this.year,
                    this.month.number(),
                    (number * 7).min(days),
                ),
            })
    }
}

impl std::fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month.number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(y: u16, m: u8) -> CalendarMonth {
        CalendarMonth::from_numbers(y, m).unwrap()
    }

    #[test]
    fn dates_cover_the_month() {
        let feb = month(2024, 2);
        let dates: Vec<Date> = feb.dates().collect();
        assert_eq!(dates.len(), 29);
        assert_eq!(dates[0].to_string(), "2024-02-01");
        assert_eq!(dates[28].to_string(), "2024-02-29");
        assert!(feb.contains(dates[10]));
        assert!(!feb.contains(Date::from_ymd(2024, 3, 1).unwrap()));
    }

    #[test]
    fn weeks_split_by_day_of_month() {
        let weeks: Vec<MonthWeek> = month(2023, 2).weeks().collect();
        assert_eq!(weeks.len(), 4, "28-day February has no fifth week");

        let weeks: Vec<MonthWeek> = month(2024, 7).weeks().collect();
        assert_eq!(weeks.len(), 5);
        assert_eq!(weeks[4].start.to_string(), "2024-07-29");
        assert_eq!(weeks[4].end.to_string(), "2024-07-31");
        assert_eq!(weeks[1].start.to_string(), "2024-07-08");
        assert_eq!(weeks[1].end.to_string(), "2024-07-14");
    }

    #[test]
    fn week_of_day() {
        assert_eq!(CalendarMonth::week_of_day(1), 1);
        assert_eq!(CalendarMonth::week_of_day(7), 1);
        assert_eq!(CalendarMonth::week_of_day(8), 2);
        assert_eq!(CalendarMonth::week_of_day(31), 5);
    }

    #[test]
    fn ordering_and_validation() {
        assert!(month(2023, 12) < month(2024, 1));
        assert!(month(2024, 1) < month(2024, 2));
        assert!(CalendarMonth::from_numbers(2024, 13).is_err());
        assert!(CalendarMonth::from_numbers(1899, 12).is_err());
        assert_eq!(month(2024, 4).to_string(), "2024-04");
        assert_eq!(CalendarMonth::of(Date::from_ymd(2024, 4, 30).unwrap()), month(2024, 4));
    }
}
