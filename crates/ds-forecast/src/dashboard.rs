//! Management KPIs shown on the facility dashboard.
//!
//! Every function takes the month or reference date it reports on explicitly.
//! Revenue is estimated as billed service days × `unit_price`; the other
//! heuristics (salary cost, plan coverage, funnel ratios, lifetime) come from
//! [`DashboardConfig`].

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use ds_core::{Count, Percentage, Real, Yen};
use ds_time::{CalendarMonth, Date, Weekday};
use serde::Serialize;

use crate::capacity::{business_day_occurrences, percentage};
use crate::config::DashboardConfig;
use crate::model::{
    BookingKind, BookingRequest, Child, ContractStatus, FacilitySettings, ScheduleItem,
    ServiceStatus, Staff, TimeSlot, UsageRecord,
};

fn month_records(
    records: &[UsageRecord],
    month: CalendarMonth,
) -> impl Iterator<Item = &UsageRecord> {
    records.iter().filter(move |r| month.contains(r.date))
}

fn estimated_revenue(records: &[UsageRecord], month: CalendarMonth, config: &DashboardConfig) -> Yen {
    let billable = month_records(records, month)
        .filter(|r| r.is_billable_use())
        .count();
    billable as Real * config.unit_price
}

fn active_children(children: &[Child]) -> impl Iterator<Item = &Child> {
    children
        .iter()
        .filter(|c| c.contract_status == ContractStatus::Active)
}

/// Days from `start` (an ISO date string) to `as_of`, or `None` if `start`
/// is absent or unparseable.
fn days_since(start: Option<&str>, as_of: Date) -> Option<i32> {
    let start: Date = start.filter(|s| !s.is_empty())?.parse().ok()?;
    Some(as_of - start)
}

// ── Revenue ───────────────────────────────────────────────────────────────────

/// Estimated profit of a month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitSummary {
    /// Billed service days × unit price.
    pub profit: Yen,
    /// Configured monthly target.
    pub target: Yen,
    /// `profit / target`, as a percentage.
    pub achievement_rate: Percentage,
}

/// Estimated revenue of `month` against the profit target.
pub fn calculate_monthly_profit(
    records: &[UsageRecord],
    month: CalendarMonth,
    config: &DashboardConfig,
) -> ProfitSummary {
    let profit = estimated_revenue(records, month, config);
    ProfitSummary {
        profit,
        target: config.target_profit,
        achievement_rate: percentage(profit, config.target_profit),
    }
}

/// Average revenue per active child.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Arpu {
    /// Revenue per active child, zero without active children.
    pub arpu: Yen,
    /// Configured target.
    pub target: Yen,
}

/// Revenue of `month` per active child.
pub fn calculate_arpu(
    records: &[UsageRecord],
    children: &[Child],
    month: CalendarMonth,
    config: &DashboardConfig,
) -> Arpu {
    let active = active_children(children).count();
    let arpu = if active == 0 {
        0.0
    } else {
        estimated_revenue(records, month, config) / active as Real
    };
    Arpu {
        arpu,
        target: config.target_arpu,
    }
}

/// Salary cost against revenue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LaborRatio {
    /// Estimated salary cost as a percentage of revenue.
    pub ratio: Percentage,
    /// Configured ceiling.
    pub target: Percentage,
}

/// Estimated salary cost as a share of the revenue of `month`.
pub fn calculate_labor_ratio(
    staff: &[Staff],
    records: &[UsageRecord],
    month: CalendarMonth,
    config: &DashboardConfig,
) -> LaborRatio {
    let revenue = estimated_revenue(records, month, config);
    let labor_cost = staff.len() as Real * config.monthly_salary;
    LaborRatio {
        ratio: percentage(labor_cost, revenue),
        target: config.target_labor_ratio,
    }
}

// ── Alerts ────────────────────────────────────────────────────────────────────

/// An anomaly worth the manager's attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Alert {
    /// Absences without add-on this month exceed the threshold; the add-on
    /// revenue of those days is lost.
    AbsenceRisk {
        /// Absence records without add-on.
        count: Count,
    },
    /// Children whose support plan is presumed overdue.
    PlansOutstanding {
        /// Children past the plan deadline.
        count: Count,
    },
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alert::AbsenceRisk { count } => write!(f, "欠勤による加算消滅リスク: {count}件"),
            Alert::PlansOutstanding { count } => write!(f, "書類未作成数: {count}件"),
        }
    }
}

/// Alerts for the month containing `as_of`.
pub fn collect_alerts(
    records: &[UsageRecord],
    children: &[Child],
    as_of: Date,
    config: &DashboardConfig,
) -> Vec<Alert> {
    let mut alerts = Vec::new();

    let absences = month_records(records, CalendarMonth::of(as_of))
        .filter(|r| r.service_status == ServiceStatus::AbsentWithoutAddon)
        .count() as Count;
    if absences > config.absence_alert_threshold {
        alerts.push(Alert::AbsenceRisk { count: absences });
    }

    let overdue = children
        .iter()
        .filter(|c| {
            days_since(c.contract_start_date.as_deref(), as_of)
                .is_some_and(|days| days >= config.plan_overdue_days)
        })
        .count() as Count;
    if overdue > 0 {
        alerts.push(Alert::PlansOutstanding { count: overdue });
    }

    alerts
}

// ── Occupancy heatmap ─────────────────────────────────────────────────────────

/// Scheduled load of one weekday and slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapCell {
    /// Japanese short weekday name.
    pub day_of_week: &'static str,
    /// Morning or afternoon.
    pub slot: TimeSlot,
    /// Scheduled slots.
    pub occupancy: Count,
    /// Places across the month's business days on this weekday.
    pub capacity: Count,
}

/// Scheduled slots of `month` per weekday and slot, Sunday first, AM before PM.
pub fn occupancy_heatmap(
    schedules: &[ScheduleItem],
    settings: &FacilitySettings,
    month: CalendarMonth,
) -> Vec<HeatmapCell> {
    let occurrences = business_day_occurrences(settings, month);
    let mut cells = Vec::with_capacity(14);
    for day in Weekday::SUNDAY_FIRST {
        for slot in [TimeSlot::Am, TimeSlot::Pm] {
            let occupancy = schedules
                .iter()
                .filter(|s| month.contains(s.date) && s.date.weekday() == day && s.slot == slot)
                .count() as Count;
            cells.push(HeatmapCell {
                day_of_week: day.short_ja(),
                slot,
                occupancy,
                capacity: occurrences[day].saturating_mul(settings.capacity.of(slot)),
            });
        }
    }
    cells
}

// ── Add-ons ───────────────────────────────────────────────────────────────────

/// Usage of one add-on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddonShare {
    /// Add-on name.
    pub addon: String,
    /// Records carrying the add-on.
    pub count: Count,
    /// Share of the month's used-service records carrying the add-on.
    pub percentage: Percentage,
}

/// How often each configured add-on was claimed on service days of `month`.
pub fn addon_matrix(
    records: &[UsageRecord],
    month: CalendarMonth,
    config: &DashboardConfig,
) -> Vec<AddonShare> {
    let mut counts: BTreeMap<&str, Count> = BTreeMap::new();
    let mut used = 0;
    for record in month_records(records, month).filter(|r| r.service_status == ServiceStatus::Used)
    {
        used += 1;
        for addon in &record.addon_items {
            *counts.entry(addon.as_str()).or_default() += 1;
        }
    }
    config
        .addon_types
        .iter()
        .map(|addon| {
            let count = counts.get(addon.as_str()).copied().unwrap_or(0);
            AddonShare {
                addon: addon.clone(),
                count,
                percentage: percentage(count as Real, used as Real),
            }
        })
        .collect()
}

// ── Cancellations ─────────────────────────────────────────────────────────────

/// Absence notices of one day-of-month week.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyCancellation {
    /// Week number, 1–4.
    pub week: u8,
    /// Display label, e.g. `"1週目"`.
    pub label: String,
    /// Absence notices as a share of the week's requests.
    pub cancellation_rate: Percentage,
}

/// Share of absence notices among the requests of weeks 1–4 of `month`.
///
/// Days after the 28th are not reported.
pub fn cancellation_trend(requests: &[BookingRequest], month: CalendarMonth) -> Vec<WeeklyCancellation> {
    (1..=4u8)
        .map(|week| {
            let days = (week - 1) * 7 + 1..=week * 7;
            let (mut total, mut cancellations) = (0u32, 0u32);
            for request in requests
                .iter()
                .filter(|r| month.contains(r.date) && days.contains(&r.date.day_of_month()))
            {
                total += 1;
                if request.kind == BookingKind::AbsenceNotice {
                    cancellations += 1;
                }
            }
            WeeklyCancellation {
                week,
                label: format!("{week}週目"),
                cancellation_rate: percentage(cancellations as Real, total as Real),
            }
        })
        .collect()
}

// ── Staffing ──────────────────────────────────────────────────────────────────

/// Headcount of one scheduled date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStaffing {
    /// Calendar date.
    pub date: Date,
    /// Distinct children scheduled.
    pub children_count: Count,
    /// Assigned staff, or the required headcount when nobody is assigned.
    pub staff_count: Count,
}

/// Children and staff per scheduled date of `month`, ascending.
pub fn staff_optimization(
    schedules: &[ScheduleItem],
    month: CalendarMonth,
    config: &DashboardConfig,
) -> Vec<DailyStaffing> {
    let mut by_date: BTreeMap<Date, (HashSet<&str>, HashSet<&str>)> = BTreeMap::new();
    for item in schedules.iter().filter(|s| month.contains(s.date)) {
        let (children, staff) = by_date.entry(item.date).or_default();
        children.insert(item.child_id.as_str());
        if let Some(staff_id) = item.staff_id.as_deref().filter(|s| !s.is_empty()) {
            staff.insert(staff_id);
        }
    }
    by_date
        .into_iter()
        .map(|(date, (children, staff))| {
            let children_count = children.len() as Count;
            let staff_count = if staff.is_empty() {
                children_count.div_ceil(config.children_per_staff.max(1))
            } else {
                staff.len() as Count
            };
            DailyStaffing {
                date,
                children_count,
                staff_count,
            }
        })
        .collect()
}

/// Caseload of one staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffProductivity {
    /// Staff display name.
    pub staff_name: String,
    /// Distinct children the staff member is scheduled with.
    pub children_count: Count,
    /// Estimated support plans written.
    pub plans_count: Count,
}

/// Caseload per staff member, in staff order.
pub fn staff_productivity(
    schedules: &[ScheduleItem],
    staff: &[Staff],
    config: &DashboardConfig,
) -> Vec<StaffProductivity> {
    staff
        .iter()
        .map(|member| {
            let children: HashSet<&str> = schedules
                .iter()
                .filter(|s| s.staff_id.as_deref() == Some(member.id.as_str()))
                .map(|s| s.child_id.as_str())
                .collect();
            let children_count = children.len() as Count;
            StaffProductivity {
                staff_name: member.name.clone(),
                children_count,
                plans_count: (children_count as Real * config.plan_coverage).floor() as Count,
            }
        })
        .collect()
}

// ── Enrolment ─────────────────────────────────────────────────────────────────

/// One stage of the enrolment funnel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunnelStage {
    /// Stage label.
    pub stage: &'static str,
    /// Estimated children at this stage.
    pub count: Count,
    /// Share of inquiries.
    pub percentage: Percentage,
}

/// Estimated enrolment funnel: inquiries, visits, contracts, waiting list.
pub fn enrollment_funnel(children: &[Child], config: &DashboardConfig) -> Vec<FunnelStage> {
    let inquiries = children.len() as Count * config.inquiry_multiplier;
    let visits = (inquiries as Real * config.visit_rate).floor() as Count;
    let waiting = children.iter().filter(|c| c.is_pre_contract()).count() as Count;
    let contracts = children.len() as Count - waiting;
    [
        ("問い合わせ", inquiries),
        ("見学", visits),
        ("契約", contracts),
        ("待機", waiting),
    ]
    .into_iter()
    .map(|(stage, count)| FunnelStage {
        stage,
        count,
        percentage: percentage(count as Real, inquiries as Real),
    })
    .collect()
}

/// A child at risk of leaving.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChurnRisk {
    /// Child display name.
    pub child_name: String,
    /// Absence rate of the lookback window, 0–1.
    pub risk_score: Real,
    /// Display text for the manager.
    pub reason: String,
}

/// Active children with a high recent absence rate, highest risk first.
pub fn churn_risk(
    children: &[Child],
    records: &[UsageRecord],
    as_of: Date,
    config: &DashboardConfig,
) -> Vec<ChurnRisk> {
    let cutoff = as_of
        .checked_add_days(-config.churn_lookback_days)
        .unwrap_or(Date::MIN);
    let mut risks: Vec<ChurnRisk> = active_children(children)
        .filter_map(|child| {
            let (mut total, mut absent) = (0u32, 0u32);
            for record in records.iter().filter(|r| r.child_id == child.id && r.date >= cutoff) {
                total += 1;
                if record.service_status == ServiceStatus::AbsentWithoutAddon {
                    absent += 1;
                }
            }
            let rate = percentage(absent as Real, total as Real);
            (rate > config.churn_absence_threshold).then(|| ChurnRisk {
                child_name: child.name.clone(),
                risk_score: rate.min(100.0),
                reason: format!("欠席率{rate:.1}%"),
            })
        })
        .collect();
    risks.sort_by(|a, b| b.risk_score.total_cmp(&a.risk_score));
    risks
}

/// Expected lifetime revenue of the active children.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LifetimeValue {
    /// Per active child.
    #[serde(rename = "averageLTV")]
    pub average: Yen,
    /// Across all active children.
    #[serde(rename = "totalLTV")]
    pub total: Yen,
}

/// Expected lifetime revenue of the active children as of `as_of`.
///
/// Tenure is counted in 30-day months; children without a usable start date
/// count as zero tenure.
pub fn calculate_ltv(children: &[Child], as_of: Date, config: &DashboardConfig) -> LifetimeValue {
    let active: Vec<&Child> = active_children(children).collect();
    if active.is_empty() {
        return LifetimeValue {
            average: 0.0,
            total: 0.0,
        };
    }
    let total_months: Real = active
        .iter()
        .filter_map(|c| days_since(c.contract_start_date.as_deref(), as_of))
        .map(|days| days as Real / 30.0)
        .sum();
    let average_months = total_months / active.len() as Real;
    let monthly_revenue = config.unit_price * config.ltv_monthly_uses;
    let average = monthly_revenue * (average_months + config.ltv_remaining_months);
    LifetimeValue {
        average,
        total: average * active.len() as Real,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alert_messages() {
        assert_eq!(
            Alert::AbsenceRisk { count: 6 }.to_string(),
            "欠勤による加算消滅リスク: 6件"
        );
        assert_eq!(Alert::PlansOutstanding { count: 2 }.to_string(), "書類未作成数: 2件");
    }

    #[test]
    fn days_since_skips_bad_dates() {
        let as_of = Date::from_ymd(2024, 4, 30).unwrap();
        assert_eq!(days_since(Some("2024-04-01"), as_of), Some(29));
        assert_eq!(days_since(Some(""), as_of), None);
        assert_eq!(days_since(Some("April"), as_of), None);
        assert_eq!(days_since(None, as_of), None);
    }
}
