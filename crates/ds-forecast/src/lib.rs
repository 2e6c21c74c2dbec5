//! # ds-forecast
//!
//! Capacity, utilization-forecast and dashboard calculations for a Japanese
//! after-school day-service facility.
//!
//! All calculations are pure functions over read-only entity records: they
//! take the target month (or reference date) explicitly, never fail, and skip
//! entities whose data cannot be used.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Business days and occupancy rates.
pub mod capacity;

/// `DashboardConfig` — targets and heuristics, loadable from TOML.
pub mod config;

/// Management KPIs.
pub mod dashboard;

/// Validate-and-filter pass over the children before a forecast.
pub mod eligibility;

/// Monthly utilization forecast.
pub mod forecast;

/// Entity records.
pub mod model;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use capacity::{
    business_day_occurrences, calculate_ampm_occupancy_rate, calculate_business_days,
    calculate_day_of_week_utilization, calculate_occupancy_rate, AmPmOccupancy,
    DayOfWeekUtilization, OccupancyRate,
};
pub use config::DashboardConfig;
pub use eligibility::{eligible_children, EligibleChild, SkipReason};
pub use forecast::{calculate_monthly_utilization_forecast, MonthlyUtilizationForecast};
pub use model::{
    BillingTarget, BookingKind, BookingRequest, Capacity, Child, ContractStatus,
    FacilitySettings, ScheduleItem, ServiceStatus, SlotPattern, Staff, TimeSlot, UsageRecord,
};
