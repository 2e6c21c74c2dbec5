//! Monthly utilization forecast.
//!
//! Each eligible child's contracted days are spread across the business days
//! of the month that fall on the child's pattern weekdays. When the pattern
//! offers more days than the contract, every weekday is scaled by the same
//! ratio `contract_days / pattern_occurrences` and rounded down
//! independently, so a child may be allocated fewer days than contracted.
//! Allocated days are taken in date order.

use std::collections::BTreeMap;

use ds_core::{Count, Percentage};
use ds_time::{Calendar, CalendarMonth, Date, Month, WeekdayTable};
use serde::Serialize;

use crate::capacity::percentage;
use crate::config::DashboardConfig;
use crate::eligibility::{eligible_children, EligibleChild};
use crate::model::{Child, FacilitySettings, SlotPattern, TimeSlot};

// ── Output ────────────────────────────────────────────────────────────────────

/// Forecast of one facility month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyUtilizationForecast {
    /// Calendar year.
    pub year: u16,
    /// Calendar month.
    pub month: Month,
    /// Business days × places per day.
    pub total_slots: Count,
    /// Slots allocated to children.
    pub forecasted_slots: Count,
    /// `forecasted_slots / total_slots`, as a percentage.
    pub utilization_rate: Percentage,
    /// Seven rows, Sunday first.
    pub day_of_week_breakdown: Vec<DayOfWeekForecast>,
    /// Day-of-month weeks 1–7, 8–14, … of the month.
    pub weekly_breakdown: Vec<WeeklyForecast>,
    /// Dates with at least one allocation, ascending.
    pub daily_breakdown: Vec<DailyForecast>,
}

/// Allocated slots on one weekday across the month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayOfWeekForecast {
    /// 0 = Sunday … 6 = Saturday.
    pub day_index: u8,
    /// Japanese short weekday name.
    pub day_of_week: &'static str,
    /// Morning slots.
    pub am_slots: Count,
    /// Afternoon slots.
    pub pm_slots: Count,
    /// Both slots.
    pub total_slots: Count,
}

/// Allocated slots of one day-of-month week.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyForecast {
    /// Week number, from 1.
    pub week: u8,
    /// First day of the week (inclusive).
    pub start_date: Date,
    /// Last day of the week (inclusive), clipped to the month.
    pub end_date: Date,
    /// Morning slots.
    pub am_slots: Count,
    /// Afternoon slots.
    pub pm_slots: Count,
    /// Both slots.
    pub total_slots: Count,
    /// Children attending in the week, in order of first allocation.
    pub children: Vec<WeeklyChildUsage>,
}

/// A child's attendance within one week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyChildUsage {
    /// Child record identifier.
    pub child_id: String,
    /// Child display name.
    pub child_name: String,
    /// Days allocated in the week.
    pub days: Count,
}

/// Allocations of one date.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyForecast {
    /// Calendar date.
    pub date: Date,
    /// Japanese short weekday name.
    pub day_of_week: &'static str,
    /// Morning slots.
    pub am_slots: Count,
    /// Afternoon slots.
    pub pm_slots: Count,
    /// Both slots.
    pub total_slots: Count,
    /// Morning entries first; one entry per child and slot.
    pub children: Vec<DailyAssignment>,
}

/// One child in one slot on a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyAssignment {
    /// Child record identifier.
    pub child_id: String,
    /// Child display name.
    pub child_name: String,
    /// Allocated slot.
    pub time_slot: TimeSlot,
}

// ── Accumulation ──────────────────────────────────────────────────────────────

#[derive(Debug, Default, Clone, Copy)]
struct SlotTally {
    am: Count,
    pm: Count,
}

impl SlotTally {
    fn add(&mut self, pattern: SlotPattern) {
        if pattern.includes(TimeSlot::Am) {
            self.am += 1;
        }
        if pattern.includes(TimeSlot::Pm) {
            self.pm += 1;
        }
    }

    fn total(&self) -> Count {
        self.am + self.pm
    }
}

#[derive(Debug, Default)]
struct DayAssignments<'a> {
    am: Vec<&'a Child>,
    pm: Vec<&'a Child>,
}

#[derive(Debug, Default)]
struct WeekTally {
    slots: SlotTally,
    children: Vec<WeeklyChildUsage>,
}

/// Running totals of one forecast.
struct Accumulator<'a> {
    by_weekday: WeekdayTable<SlotTally>,
    by_week: [WeekTally; 5],
    by_date: BTreeMap<Date, DayAssignments<'a>>,
}

impl<'a> Accumulator<'a> {
    fn new() -> Self {
        Self {
            by_weekday: WeekdayTable::default(),
            by_week: Default::default(),
            by_date: BTreeMap::new(),
        }
    }

    fn record(&mut self, child: &'a Child, date: Date, pattern: SlotPattern) {
        self.by_weekday[date.weekday()].add(pattern);

        let day = self.by_date.entry(date).or_default();
        if pattern.includes(TimeSlot::Am) {
            day.am.push(child);
        }
        if pattern.includes(TimeSlot::Pm) {
            day.pm.push(child);
        }

        let week_index = usize::from(CalendarMonth::week_of_day(date.day_of_month()) - 1);
        let week = &mut self.by_week[week_index];
        week.slots.add(pattern);
        match week
            .children
            .iter_mut()
            .find(|usage| usage.child_id == child.id)
        {
            Some(usage) => usage.days += 1,
            None => week.children.push(WeeklyChildUsage {
                child_id: child.id.clone(),
                child_name: child.name.clone(),
                days: 1,
            }),
        }
    }

    fn finish(
        self,
        month: CalendarMonth,
        settings: &FacilitySettings,
        business_days: Count,
    ) -> MonthlyUtilizationForecast {
        let day_of_week_breakdown: Vec<DayOfWeekForecast> = self
            .by_weekday
            .iter()
            .map(|(day, tally)| DayOfWeekForecast {
                day_index: day.index(),
                day_of_week: day.short_ja(),
                am_slots: tally.am,
                pm_slots: tally.pm,
                total_slots: tally.total(),
            })
            .collect();

        let mut by_week = self.by_week;
        let weekly_breakdown = month
            .weeks()
            .map(|week| {
                let tally = std::mem::take(&mut by_week[usize::from(week.number - 1)]);
                WeeklyForecast {
                    week: week.number,
                    start_date: week.start,
                    end_date: week.end,
                    am_slots: tally.slots.am,
                    pm_slots: tally.slots.pm,
                    total_slots: tally.slots.total(),
                    children: tally.children,
                }
            })
            .collect();

        let daily_breakdown = self
            .by_date
            .into_iter()
            .map(|(date, day)| daily_forecast(date, day))
            .collect();

        let total_slots = business_days.saturating_mul(settings.capacity.per_day());
        let forecasted_slots: Count = day_of_week_breakdown.iter().map(|d| d.total_slots).sum();
        MonthlyUtilizationForecast {
            year: month.year(),
            month: month.month(),
            total_slots,
            forecasted_slots,
            utilization_rate: percentage(forecasted_slots as f64, total_slots as f64),
            day_of_week_breakdown,
            weekly_breakdown,
            daily_breakdown,
        }
    }
}

fn daily_forecast(date: Date, day: DayAssignments<'_>) -> DailyForecast {
    let am_slots = day.am.len() as Count;
    let pm_slots = day.pm.len() as Count;
    let mut children: Vec<DailyAssignment> = Vec::with_capacity(day.am.len() + day.pm.len());
    let entries = day
        .am
        .iter()
        .map(|c| (c, TimeSlot::Am))
        .chain(day.pm.iter().map(|c| (c, TimeSlot::Pm)));
    for (child, time_slot) in entries {
        let duplicate = children
            .iter()
            .any(|a| a.child_id == child.id && a.time_slot == time_slot);
        if !duplicate {
            children.push(DailyAssignment {
                child_id: child.id.clone(),
                child_name: child.name.clone(),
                time_slot,
            });
        }
    }
    DailyForecast {
        date,
        day_of_week: date.weekday().short_ja(),
        am_slots,
        pm_slots,
        total_slots: am_slots + pm_slots,
        children,
    }
}

/// Spread one child's contracted days over `business_dates`.
fn allocate<'a>(child: &EligibleChild<'a>, business_dates: &[Date], acc: &mut Accumulator<'a>) {
    let available: Vec<Date> = business_dates
        .iter()
        .copied()
        .filter(|d| child.pattern_days.contains(d.weekday()) && child.is_contracted_on(*d))
        .collect();

    let mut counts: WeekdayTable<Count> = WeekdayTable::default();
    for date in &available {
        counts[date.weekday()] += 1;
    }
    let pattern_occurrences = available.len() as Count;
    if pattern_occurrences == 0 {
        tracing::trace!(child_id = %child.child.id, "no available pattern days");
        return;
    }

    let actual_usage_days = child.contract_days.min(pattern_occurrences);
    let ratio = f64::from(actual_usage_days) / f64::from(pattern_occurrences);
    let mut allocated: Count = 0;
    for weekday in child.pattern_days.iter() {
        let actual_days = (f64::from(counts[weekday]) * ratio).floor() as usize;
        let pattern = child.time_slots[weekday];
        for &date in available
            .iter()
            .filter(|d| d.weekday() == weekday)
            .take(actual_days)
        {
            acc.record(child.child, date, pattern);
            allocated += 1;
        }
    }
    tracing::trace!(
        child_id = %child.child.id,
        contract_days = child.contract_days,
        pattern_occurrences,
        allocated,
        "child allocated"
    );
}

/// Forecast the slot usage of `month` from the children's contracts and
/// weekday patterns.
pub fn calculate_monthly_utilization_forecast(
    children: &[Child],
    settings: &FacilitySettings,
    month: CalendarMonth,
    config: &DashboardConfig,
) -> MonthlyUtilizationForecast {
    let business_dates = settings.calendar().business_dates(month);
    let eligible = eligible_children(children, month, config);

    let mut acc = Accumulator::new();
    for child in &eligible {
        allocate(child, &business_dates, &mut acc);
    }
    let forecast = acc.finish(month, settings, business_dates.len() as Count);

    tracing::debug!(
        %month,
        children = children.len(),
        eligible = eligible.len(),
        total_slots = forecast.total_slots,
        forecasted_slots = forecast.forecasted_slots,
        utilization_rate = forecast.utilization_rate,
        "utilization forecast"
    );
    forecast
}
