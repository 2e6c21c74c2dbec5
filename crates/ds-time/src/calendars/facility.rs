//! Facility calendar — the closure rules of a single day-service facility.
//!
//! A date is closed when any of the following holds:
//! 1. a [`HolidayPeriod`] covering the date lists its weekday;
//! 2. otherwise, the facility's default regular holidays list the weekday;
//! 3. the date is one of the facility's custom holidays;
//! 4. national holidays are observed and the date is one.
//!
//! A covering period that does not list the weekday does not reopen a day the
//! default regular holidays close: rule 2 still applies.

use std::collections::HashSet;

use crate::calendar::Calendar;
use crate::calendars::japan::is_japanese_holiday;
use crate::date::Date;
use crate::weekday::WeekdaySet;

/// A dated override of which weekdays are closed (e.g. a summer-break
/// schedule). `end_date == None` means open-ended.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct HolidayPeriod {
    /// First day of the period (inclusive).
    pub start_date: Date,
    /// Last day of the period (inclusive), if any. Blank on the wire is
    /// open-ended.
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "crate::date::deserialize_optional")
    )]
    pub end_date: Option<Date>,
    /// Weekdays closed while the period applies.
    #[cfg_attr(feature = "serde", serde(default))]
    pub regular_holidays: WeekdaySet,
}

impl HolidayPeriod {
    /// Return `true` if `date` lies within `[start_date, end_date]`.
    pub fn covers(&self, date: Date) -> bool {
        date >= self.start_date && self.end_date.map_or(true, |end| date <= end)
    }
}

/// Why a facility is closed on a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClosureReason {
    /// Weekday closed by a covering holiday period.
    PeriodRegularHoliday,
    /// Weekday closed by the default regular holidays.
    RegularHoliday,
    /// Explicit custom closure date.
    CustomHoliday,
    /// Japanese national holiday.
    NationalHoliday,
}

/// Business-day calendar of one facility.
#[derive(Debug, Clone)]
pub struct FacilityCalendar<'a> {
    regular_holidays: WeekdaySet,
    holiday_periods: &'a [HolidayPeriod],
    custom_holidays: HashSet<Date>,
    include_national_holidays: bool,
}

impl<'a> FacilityCalendar<'a> {
    /// Build the calendar from a facility's closure settings.
    pub fn new(
        regular_holidays: WeekdaySet,
        holiday_periods: &'a [HolidayPeriod],
        custom_holidays: &[Date],
        include_national_holidays: bool,
    ) -> Self {
        Self {
            regular_holidays,
            holiday_periods,
            custom_holidays: custom_holidays.iter().copied().collect(),
            include_national_holidays,
        }
    }

    /// The first rule that closes the facility on `date`, or `None` on a
    /// business day.
    pub fn closure_reason(&self, date: Date) -> Option<ClosureReason> {
        let weekday = date.weekday();
        if self
            .holiday_periods
            .iter()
            .any(|p| p.covers(date) && p.regular_holidays.contains(weekday))
        {
            return Some(ClosureReason::PeriodRegularHoliday);
        }
        if self.regular_holidays.contains(weekday) {
            return Some(ClosureReason::RegularHoliday);
        }
        if self.custom_holidays.contains(&date) {
            return Some(ClosureReason::CustomHoliday);
        }
        if self.include_national_holidays && is_japanese_holiday(date) {
            return Some(ClosureReason::NationalHoliday);
        }
        None
    }
}

impl Calendar for FacilityCalendar<'_> {
    fn name(&self) -> &str {
        "Facility"
    }

    fn is_business_day(&self, date: Date) -> bool {
        self.closure_reason(date).is_none()
    }
}
