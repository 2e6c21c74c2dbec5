//! # ds-time
//!
//! Date, weekday, month, and calendar types for the day-service forecasting
//! crates, including the Japanese national-holiday resolver and the
//! facility business-day calendar.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Calendar trait and the null calendar.
pub mod calendar;

/// `CalendarMonth` — a validated year/month pair.
pub mod calendar_month;

/// Concrete calendar implementations (national holidays, facility closures).
pub mod calendars;

/// `Date` type.
pub mod date;

/// `Month` — month of the year.
pub mod month;

/// `Weekday` and the weekday-indexed collections.
pub mod weekday;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use calendar::{Calendar, NullCalendar};
pub use calendar_month::{CalendarMonth, MonthWeek};
pub use calendars::facility::{ClosureReason, FacilityCalendar, HolidayPeriod};
pub use calendars::japan::{
    is_japanese_holiday, is_japanese_holiday_str, japanese_holiday_strings, japanese_holidays,
    Japan,
};
pub use date::Date;
pub use month::Month;
pub use weekday::{Weekday, WeekdaySet, WeekdayTable};
