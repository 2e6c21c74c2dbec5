//! Business-day counts and occupancy rates of a facility month.
//!
//! Capacity is `business days × places per slot`. Rates are percentages on the
//! 0–100 scale and are not clamped: an over-booked month reports more than
//! 100. A month without capacity reports 0.

use ds_core::{Count, Percentage};
use ds_time::{Calendar, CalendarMonth, WeekdayTable};
use serde::Serialize;

use crate::config::DashboardConfig;
use crate::model::{FacilitySettings, ScheduleItem, TimeSlot};

/// `numerator / denominator × 100`, or 0 without a denominator.
pub(crate) fn percentage(numerator: f64, denominator: f64) -> Percentage {
    if denominator > 0.0 {
        numerator / denominator * 100.0
    } else {
        0.0
    }
}

fn month_schedules(
    schedules: &[ScheduleItem],
    month: CalendarMonth,
) -> impl Iterator<Item = &ScheduleItem> {
    schedules.iter().filter(move |s| month.contains(s.date))
}

/// Number of days the facility is open in `month`.
pub fn calculate_business_days(settings: &FacilitySettings, month: CalendarMonth) -> Count {
    settings.calendar().business_days_in(month)
}

/// How many times each weekday is a business day in `month`.
pub fn business_day_occurrences(
    settings: &FacilitySettings,
    month: CalendarMonth,
) -> WeekdayTable<Count> {
    settings.calendar().business_day_occurrences(month)
}

/// Overall occupancy of a month against its target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupancyRate {
    /// Percentage of the month's places that are scheduled.
    pub rate: Percentage,
    /// Configured target occupancy.
    pub target: Percentage,
}

/// Scheduled slots of `month` as a share of the month's capacity.
pub fn calculate_occupancy_rate(
    schedules: &[ScheduleItem],
    settings: &FacilitySettings,
    month: CalendarMonth,
    config: &DashboardConfig,
) -> OccupancyRate {
    let scheduled = month_schedules(schedules, month).count();
    let capacity =
        calculate_business_days(settings, month).saturating_mul(settings.capacity.per_day());
    OccupancyRate {
        rate: percentage(scheduled as f64, capacity as f64),
        target: config.target_occupancy_rate,
    }
}

/// Occupancy of a month split by slot.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmPmOccupancy {
    /// Morning slots scheduled.
    pub am_count: Count,
    /// Afternoon slots scheduled.
    pub pm_count: Count,
    /// Morning places across the period.
    pub am_capacity: Count,
    /// Afternoon places across the period.
    pub pm_capacity: Count,
    /// Morning occupancy.
    pub am_rate: Percentage,
    /// Afternoon occupancy.
    pub pm_rate: Percentage,
    /// Both slots combined.
    pub total_rate: Percentage,
}

impl AmPmOccupancy {
    fn new(am_count: Count, pm_count: Count, am_capacity: Count, pm_capacity: Count) -> Self {
        Self {
            am_count,
            pm_count,
            am_capacity,
            pm_capacity,
            am_rate: percentage(am_count as f64, am_capacity as f64),
            pm_rate: percentage(pm_count as f64, pm_capacity as f64),
            total_rate: percentage(
                f64::from(am_count) + f64::from(pm_count),
                f64::from(am_capacity) + f64::from(pm_capacity),
            ),
        }
    }
}

/// Morning and afternoon occupancy of `month`.
pub fn calculate_ampm_occupancy_rate(
    schedules: &[ScheduleItem],
    settings: &FacilitySettings,
    month: CalendarMonth,
) -> AmPmOccupancy {
    let (mut am, mut pm) = (0, 0);
    for item in month_schedules(schedules, month) {
        match item.slot {
            TimeSlot::Am => am += 1,
            TimeSlot::Pm => pm += 1,
        }
    }
    let days = calculate_business_days(settings, month);
    AmPmOccupancy::new(
        am,
        pm,
        days.saturating_mul(settings.capacity.am),
        days.saturating_mul(settings.capacity.pm),
    )
}

/// Occupancy of one weekday across a month.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayOfWeekUtilization {
    /// Business days falling on this weekday.
    pub business_days: Count,
    /// Scheduled slots against this weekday's capacity.
    #[serde(flatten)]
    pub occupancy: AmPmOccupancy,
}

/// Per-weekday occupancy of `month`, each weekday measured against its own
/// business-day occurrences.
pub fn calculate_day_of_week_utilization(
    schedules: &[ScheduleItem],
    settings: &FacilitySettings,
    month: CalendarMonth,
) -> WeekdayTable<DayOfWeekUtilization> {
    let mut counts: WeekdayTable<(Count, Count)> = WeekdayTable::default();
    for item in month_schedules(schedules, month) {
        let entry = &mut counts[item.date.weekday()];
        match item.slot {
            TimeSlot::Am => entry.0 += 1,
            TimeSlot::Pm => entry.1 += 1,
        }
    }
    let occurrences = business_day_occurrences(settings, month);
    let capacity = settings.capacity;
    counts.map(|day, &(am, pm)| {
        let days = occurrences[day];
        DayOfWeekUtilization {
            business_days: days,
            occupancy: AmPmOccupancy::new(
                am,
                pm,
                days.saturating_mul(capacity.am),
                days.saturating_mul(capacity.pm),
            ),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_guards_zero_denominator() {
        assert_eq!(percentage(5.0, 0.0), 0.0);
        assert_eq!(percentage(5.0, 10.0), 50.0);
        assert_eq!(percentage(15.0, 10.0), 150.0);
    }

    #[test]
    fn combined_rate_uses_both_slots() {
        let occ = AmPmOccupancy::new(10, 30, 20, 40);
        assert_eq!(occ.am_rate, 50.0);
        assert_eq!(occ.pm_rate, 75.0);
        assert!((occ.total_rate - 40.0 / 60.0 * 100.0).abs() < 1e-12);
    }
}
