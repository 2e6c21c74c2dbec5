//! `Calendar` trait and the trivial [`NullCalendar`].
//!
//! A calendar knows which dates are business days; the provided methods
//! derive the per-month counts the capacity and forecast code is built on.

use crate::calendar_month::CalendarMonth;
use crate::date::Date;
use crate::weekday::WeekdayTable;

/// A business-day calendar.
pub trait Calendar: std::fmt::Debug + Send + Sync {
    /// Human-readable name (e.g. `"Japan"`).
    fn name(&self) -> &str;

    /// Return `true` if `date` is a business day in this calendar.
    fn is_business_day(&self, date: Date) -> bool;

    /// Return `true` if `date` is a holiday (non-business) day.
    fn is_holiday(&self, date: Date) -> bool {
        !self.is_business_day(date)
    }

    /// The business days of `month`, ascending.
    fn business_dates(&self, month: CalendarMonth) -> Vec<Date> {
        month.dates().filter(|d| self.is_business_day(*d)).collect()
    }

    /// Number of business days in `month`.
    fn business_days_in(&self, month: CalendarMonth) -> u32 {
        month.dates().filter(|d| self.is_business_day(*d)).count() as u32
    }

    /// How many times each weekday occurs as a business day in `month`.
    fn business_day_occurrences(&self, month: CalendarMonth) -> WeekdayTable<u32> {
        let mut counts = WeekdayTable::default();
        for date in month.dates().filter(|d| self.is_business_day(*d)) {
            counts[date.weekday()] += 1;
        }
        counts
    }
}

/// A null calendar: every day is a business day.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCalendar;

impl Calendar for NullCalendar {
    fn name(&self) -> &str {
        "Null"
    }

    fn is_business_day(&self, _date: Date) -> bool {
        true
    }
}
