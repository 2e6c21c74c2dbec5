//! Validate-and-filter pass run before a forecast.
//!
//! Children whose records cannot contribute to a month are dropped here, with
//! a `debug` event naming the reason. What survives carries parsed dates and a
//! normalised weekday pattern, so the allocation loop never re-checks them.

use ds_time::{CalendarMonth, Date, Weekday, WeekdaySet, WeekdayTable};
use thiserror::Error;

use crate::config::DashboardConfig;
use crate::model::{Child, SlotPattern};

/// Why a child does not take part in a month's forecast.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    /// Neither start date is set for the contract status.
    #[error("no start date")]
    MissingStartDate,
    /// The start date is not `YYYY-MM-DD`.
    #[error("unparseable start date {0:?}")]
    InvalidStartDate(String),
    /// The contract starts after the month.
    #[error("starts after the target month")]
    StartsAfterMonth,
    /// The end date is not `YYYY-MM-DD`.
    #[error("unparseable end date {0:?}")]
    InvalidEndDate(String),
    /// The contract ended before the month.
    #[error("contract ended before the target month")]
    EndedBeforeMonth,
    /// Zero or missing monthly day count.
    #[error("no contracted days")]
    NoContractDays,
    /// The weekday pattern is empty.
    #[error("no pattern weekday")]
    NoPatternDays,
    /// A weekday pattern entry is not a wire index.
    #[error("pattern weekday {0} is not in 0..=6")]
    InvalidPatternDay(i64),
}

/// A child that can contribute to a month's forecast.
#[derive(Debug, Clone, PartialEq)]
pub struct EligibleChild<'a> {
    /// The source record.
    pub child: &'a Child,
    /// Effective start date (inclusive).
    pub start: Date,
    /// Contract end date (inclusive), if any.
    pub end: Option<Date>,
    /// Contracted usage days per month, always positive.
    pub contract_days: u32,
    /// Attended weekdays, never empty.
    pub pattern_days: WeekdaySet,
    /// Slot attended on each weekday.
    pub time_slots: WeekdayTable<SlotPattern>,
}

impl EligibleChild<'_> {
    /// Return `true` if `date` lies within the child's contract.
    pub fn is_contracted_on(&self, date: Date) -> bool {
        date >= self.start && self.end.map_or(true, |end| date <= end)
    }
}

/// Check a single child against `month`.
pub fn check_child<'a>(
    child: &'a Child,
    month: CalendarMonth,
    config: &DashboardConfig,
) -> Result<EligibleChild<'a>, SkipReason> {
    let raw_start = child
        .effective_start_date()
        .ok_or(SkipReason::MissingStartDate)?;
    let start: Date = raw_start
        .parse()
        .map_err(|_| SkipReason::InvalidStartDate(raw_start.to_owned()))?;
    if CalendarMonth::of(start) > month {
        return Err(SkipReason::StartsAfterMonth);
    }

    let end = match child.contract_end_date.as_deref().filter(|s| !s.is_empty()) {
        Some(raw) => {
            let end: Date = raw
                .parse()
                .map_err(|_| SkipReason::InvalidEndDate(raw.to_owned()))?;
            if CalendarMonth::of(end) < month {
                return Err(SkipReason::EndedBeforeMonth);
            }
            Some(end)
        }
        None => None,
    };

    let contract_days = child.effective_contract_days();
    if contract_days == 0 {
        return Err(SkipReason::NoContractDays);
    }
    // Repeated indices collapse into one weekday.
    let pattern_days = child
        .pattern_days
        .iter()
        .map(|&i| {
            u8::try_from(i)
                .ok()
                .and_then(Weekday::from_index)
                .ok_or(SkipReason::InvalidPatternDay(i))
        })
        .collect::<Result<WeekdaySet, _>>()?;
    if pattern_days.is_empty() {
        return Err(SkipReason::NoPatternDays);
    }

    let time_slots = WeekdayTable::from_fn(|day| {
        child
            .pattern_time_slots
            .get(&day.index())
            .copied()
            .unwrap_or(config.default_slot_pattern)
    });

    Ok(EligibleChild {
        child,
        start,
        end,
        contract_days,
        pattern_days,
        time_slots,
    })
}

/// The children that can contribute to `month`, in input order.
pub fn eligible_children<'a>(
    children: &'a [Child],
    month: CalendarMonth,
    config: &DashboardConfig,
) -> Vec<EligibleChild<'a>> {
    children
        .iter()
        .filter_map(|child| match check_child(child, month, config) {
            Ok(eligible) => Some(eligible),
            Err(reason) => {
                tracing::debug!(child_id = %child.id, %month, %reason, "child skipped");
                None
            }
        })
        .collect()
}
