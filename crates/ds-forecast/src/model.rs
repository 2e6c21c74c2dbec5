//! Entity records supplied by the CRUD layer.
//!
//! These are read-only inputs: the calculations never mutate or persist them.
//! Field names follow the camelCase JSON the application stores, and the
//! Japanese status strings are kept verbatim on the wire.

use std::collections::BTreeMap;

use ds_time::{Date, FacilityCalendar, HolidayPeriod, WeekdaySet};
use serde::{Deserialize, Serialize};

// ── Slots ─────────────────────────────────────────────────────────────────────

/// One half-day attendance unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TimeSlot {
    /// Morning.
    #[serde(rename = "AM")]
    Am,
    /// Afternoon.
    #[serde(rename = "PM")]
    Pm,
}

/// The slot(s) a child attends on a pattern weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SlotPattern {
    /// Morning only.
    #[serde(rename = "AM")]
    Am,
    /// Afternoon only.
    #[serde(rename = "PM")]
    #[default]
    Pm,
    /// Both morning and afternoon.
    #[serde(rename = "AMPM")]
    AmPm,
}

impl SlotPattern {
    /// Return `true` if this pattern occupies `slot`.
    pub fn includes(&self, slot: TimeSlot) -> bool {
        matches!(
            (self, slot),
            (SlotPattern::AmPm, _) | (SlotPattern::Am, TimeSlot::Am) | (SlotPattern::Pm, TimeSlot::Pm)
        )
    }
}

// ── Facility ──────────────────────────────────────────────────────────────────

/// Slot capacity of a facility per business day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Capacity {
    /// Morning places.
    #[serde(rename = "AM")]
    pub am: u32,
    /// Afternoon places.
    #[serde(rename = "PM")]
    pub pm: u32,
}

impl Capacity {
    /// Places per business day across both slots, saturating at `u32::MAX`.
    pub fn per_day(&self) -> u32 {
        self.am.saturating_add(self.pm)
    }

    /// Places in one slot.
    pub fn of(&self, slot: TimeSlot) -> u32 {
        match slot {
            TimeSlot::Am => self.am,
            TimeSlot::Pm => self.pm,
        }
    }
}

/// Capacity and closure settings of a facility.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilitySettings {
    /// Places per slot.
    pub capacity: Capacity,
    /// Weekdays closed by default.
    #[serde(default)]
    pub regular_holidays: WeekdaySet,
    /// Dated overrides of the closed weekdays.
    #[serde(default)]
    pub holiday_periods: Vec<HolidayPeriod>,
    /// Explicit closure dates.
    #[serde(default)]
    pub custom_holidays: Vec<Date>,
    /// Whether national holidays close the facility.
    #[serde(default)]
    pub include_holidays: bool,
}

impl FacilitySettings {
    /// The business-day calendar described by these settings.
    pub fn calendar(&self) -> FacilityCalendar<'_> {
        FacilityCalendar::new(
            self.regular_holidays,
            &self.holiday_periods,
            &self.custom_holidays,
            self.include_holidays,
        )
    }
}

// ── Children ──────────────────────────────────────────────────────────────────

/// Contract lifecycle of a child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContractStatus {
    /// Enrolment planned, contract not yet signed.
    PreContract,
    /// Contract in force.
    Active,
    /// Contract suspended.
    Inactive,
    /// Contract ended.
    Terminated,
}

/// A child enrolled (or about to be) at the facility.
///
/// Dates are kept as the raw strings the CRUD layer stores; a missing or
/// malformed date excludes the child from forecasts instead of failing the
/// whole batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Child {
    /// Record identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Contract lifecycle.
    pub contract_status: ContractStatus,
    /// Contract start (`YYYY-MM-DD`), used for signed contracts.
    #[serde(default)]
    pub contract_start_date: Option<String>,
    /// Last contracted day (`YYYY-MM-DD`); blank or absent means open-ended.
    #[serde(default)]
    pub contract_end_date: Option<String>,
    /// Planned first day of use, for pre-contract children.
    #[serde(default)]
    pub planned_usage_start_date: Option<String>,
    /// Contracted usage days per month (active contracts).
    #[serde(default)]
    pub contract_days: Option<u32>,
    /// Planned usage days per month (pre-contract).
    #[serde(default)]
    pub planned_contract_days: Option<u32>,
    /// Attended weekdays as wire indices (0 = Sunday … 6 = Saturday).
    ///
    /// Kept as wide signed integers so an out-of-range entry skips this child
    /// instead of failing the batch.
    #[serde(default)]
    pub pattern_days: Vec<i64>,
    /// Slot attended on each pattern weekday, keyed by wire index.
    #[serde(default)]
    pub pattern_time_slots: BTreeMap<u8, SlotPattern>,
    /// Age in years.
    #[serde(default)]
    pub age: Option<u32>,
    /// Home address.
    #[serde(default)]
    pub address: Option<String>,
}

impl Child {
    /// Return `true` for pre-contract children.
    pub fn is_pre_contract(&self) -> bool {
        self.contract_status == ContractStatus::PreContract
    }

    /// The start date that applies to the contract status: planned usage start
    /// for pre-contract children, contract start otherwise.
    pub fn effective_start_date(&self) -> Option<&str> {
        let raw = if self.is_pre_contract() {
            &self.planned_usage_start_date
        } else {
            &self.contract_start_date
        };
        raw.as_deref().filter(|s| !s.is_empty())
    }

    /// The monthly day count that applies to the contract status.
    pub fn effective_contract_days(&self) -> u32 {
        let days = if self.is_pre_contract() {
            self.planned_contract_days
        } else {
            self.contract_days
        };
        days.unwrap_or(0)
    }
}

// ── Recorded attendance ───────────────────────────────────────────────────────

/// A scheduled (or attended) slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleItem {
    /// Record identifier.
    #[serde(default)]
    pub id: i64,
    /// Calendar date.
    pub date: Date,
    /// Child record identifier.
    pub child_id: String,
    /// Display name at scheduling time.
    #[serde(default)]
    pub child_name: String,
    /// Scheduled slot.
    pub slot: TimeSlot,
    /// Staff member assigned, if any.
    #[serde(default)]
    pub staff_id: Option<String>,
}

/// Service outcome of a usage record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceStatus {
    /// The child used the service.
    #[serde(rename = "利用")]
    Used,
    /// Absent, no add-on claimed.
    #[serde(rename = "欠席(加算なし)")]
    AbsentWithoutAddon,
    /// Absent, add-on only.
    #[serde(rename = "加算のみ")]
    AddonOnly,
}

/// Whether a usage record is billed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BillingTarget {
    /// Billed.
    #[serde(rename = "請求する")]
    Bill,
    /// Not billed.
    #[serde(rename = "請求しない")]
    NoBill,
}

/// A daily service record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageRecord {
    /// Child record identifier.
    pub child_id: String,
    /// Service date.
    pub date: Date,
    /// Service outcome.
    pub service_status: ServiceStatus,
    /// Billing decision.
    pub billing_target: BillingTarget,
    /// Add-ons claimed on the day.
    #[serde(default)]
    pub addon_items: Vec<String>,
}

impl UsageRecord {
    /// Return `true` for a used, billed service day.
    pub fn is_billable_use(&self) -> bool {
        self.service_status == ServiceStatus::Used && self.billing_target == BillingTarget::Bill
    }
}

// ── Staff & requests ──────────────────────────────────────────────────────────

/// A staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Staff {
    /// Record identifier.
    pub id: String,
    /// Display name.
    pub name: String,
}

/// Kind of a guardian booking request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookingKind {
    /// Extra day requested.
    #[serde(rename = "追加希望")]
    AdditionalDay,
    /// Absence notice.
    #[serde(rename = "欠席連絡")]
    AbsenceNotice,
}

/// A request sent by a guardian.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    /// Date the request is for.
    pub date: Date,
    /// Child display name.
    #[serde(default)]
    pub child_name: String,
    /// What is requested.
    #[serde(rename = "type")]
    pub kind: BookingKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_pattern_includes() {
        assert!(SlotPattern::AmPm.includes(TimeSlot::Am));
        assert!(SlotPattern::AmPm.includes(TimeSlot::Pm));
        assert!(SlotPattern::Am.includes(TimeSlot::Am));
        assert!(!SlotPattern::Am.includes(TimeSlot::Pm));
        assert_eq!(SlotPattern::default(), SlotPattern::Pm);
    }

    #[test]
    fn capacity_per_day_saturates() {
        assert_eq!(Capacity { am: 5, pm: 10 }.per_day(), 15);
        let huge = Capacity { am: u32::MAX, pm: 1 };
        assert_eq!(huge.per_day(), u32::MAX);
        assert_eq!(huge.of(TimeSlot::Pm), 1);
    }

    #[test]
    fn child_effective_fields_follow_status() {
        let mut child = Child {
            id: "c1".into(),
            name: "Hana".into(),
            contract_status: ContractStatus::PreContract,
            contract_start_date: Some("2024-01-01".into()),
            contract_end_date: None,
            planned_usage_start_date: Some("2024-04-01".into()),
            contract_days: Some(10),
            planned_contract_days: Some(6),
            pattern_days: vec![1],
            pattern_time_slots: BTreeMap::new(),
            age: None,
            address: None,
        };
        assert_eq!(child.effective_start_date(), Some("2024-04-01"));
        assert_eq!(child.effective_contract_days(), 6);

        child.contract_status = ContractStatus::Active;
        assert_eq!(child.effective_start_date(), Some("2024-01-01"));
        assert_eq!(child.effective_contract_days(), 10);

        child.contract_start_date = Some(String::new());
        assert_eq!(child.effective_start_date(), None);
    }

    #[test]
    fn billable_use() {
        let record = UsageRecord {
            child_id: "c1".into(),
            date: Date::from_ymd(2024, 4, 1).unwrap(),
            service_status: ServiceStatus::Used,
            billing_target: BillingTarget::Bill,
            addon_items: vec![],
        };
        assert!(record.is_billable_use());
        let unbilled = UsageRecord {
            billing_target: BillingTarget::NoBill,
            ..record
        };
        assert!(!unbilled.is_billable_use());
    }
}
