//! Dashboard and forecast tuning parameters.
//!
//! Every field has a default, so an empty TOML document (or
//! [`DashboardConfig::default()`]) yields the standard facility assumptions.

use std::path::Path;

use ds_core::errors::{Error, Result};
use ds_core::{Percentage, Real, Yen};
use serde::{Deserialize, Serialize};

use crate::model::SlotPattern;

/// Targets, unit prices and heuristics used by the KPI calculations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Monthly profit target.
    pub target_profit: Yen,
    /// Occupancy-rate target (percent).
    pub target_occupancy_rate: Percentage,
    /// Revenue-per-child target.
    pub target_arpu: Yen,
    /// Labour-cost ratio target (percent).
    pub target_labor_ratio: Percentage,
    /// Revenue of one billed service day.
    pub unit_price: Yen,
    /// Monthly salary cost of one staff member.
    pub monthly_salary: Yen,
    /// Absences per month above which an alert is raised.
    pub absence_alert_threshold: u32,
    /// Days after contract start at which a support plan is overdue.
    pub plan_overdue_days: i32,
    /// Children one staff member can look after.
    pub children_per_staff: u32,
    /// Fraction of children with a written support plan.
    pub plan_coverage: Real,
    /// Inquiries assumed per enrolled child.
    pub inquiry_multiplier: u32,
    /// Fraction of inquiries that lead to a visit.
    pub visit_rate: Real,
    /// Window of the churn absence rate, in days.
    pub churn_lookback_days: i32,
    /// Absence rate (percent) above which a child is at risk.
    pub churn_absence_threshold: Percentage,
    /// Billed days per month assumed for lifetime value.
    pub ltv_monthly_uses: Real,
    /// Remaining months assumed for lifetime value.
    pub ltv_remaining_months: Real,
    /// Add-on names tracked by the add-on matrix.
    pub addon_types: Vec<String>,
    /// Slot used when a child has no slot for a pattern weekday.
    pub default_slot_pattern: SlotPattern,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            target_profit: 1_000_000.0,
            target_occupancy_rate: 90.0,
            target_arpu: 15_000.0,
            target_labor_ratio: 47.0,
            unit_price: 15_000.0,
            monthly_salary: 300_000.0,
            absence_alert_threshold: 5,
            plan_overdue_days: 90,
            children_per_staff: 3,
            plan_coverage: 0.8,
            inquiry_multiplier: 3,
            visit_rate: 0.7,
            churn_lookback_days: 30,
            churn_absence_threshold: 30.0,
            ltv_monthly_uses: 8.0,
            ltv_remaining_months: 24.0,
            addon_types: ["専門的支援加算", "個別支援加算", "送迎加算", "その他"]
                .into_iter()
                .map(String::from)
                .collect(),
            default_slot_pattern: SlotPattern::Pm,
        }
    }
}

impl DashboardConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loaded dashboard config");
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: DashboardConfig =
            toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every parameter is usable.
    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("target_profit", self.target_profit),
            ("target_occupancy_rate", self.target_occupancy_rate),
            ("target_arpu", self.target_arpu),
            ("target_labor_ratio", self.target_labor_ratio),
            ("unit_price", self.unit_price),
            ("monthly_salary", self.monthly_salary),
            ("churn_absence_threshold", self.churn_absence_threshold),
            ("ltv_monthly_uses", self.ltv_monthly_uses),
            ("ltv_remaining_months", self.ltv_remaining_months),
        ];
        for (name, value) in non_negative {
            if value.is_nan() || value < 0.0 {
                return Err(Error::Config(format!("{name} must be >= 0, got {value}")));
            }
        }
        let fractions = [
            ("plan_coverage", self.plan_coverage),
            ("visit_rate", self.visit_rate),
        ];
        for (name, value) in fractions {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::Config(format!("{name} must lie in [0, 1], got {value}")));
            }
        }
        if self.children_per_staff == 0 {
            return Err(Error::Config("children_per_staff must be > 0".into()));
        }
        if self.plan_overdue_days < 0 || self.churn_lookback_days < 0 {
            return Err(Error::Config("day windows must be >= 0".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config = DashboardConfig::from_toml_str("").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.addon_types.len(), 4);
    }

    #[test]
    fn partial_document_overrides_fields() {
        let config = DashboardConfig::from_toml_str(
            r#"
            unit_price = 12000.0
            children_per_staff = 2
            default_slot_pattern = "AMPM"
            "#,
        )
        .unwrap();
        assert_eq!(config.unit_price, 12_000.0);
        assert_eq!(config.children_per_staff, 2);
        assert_eq!(config.default_slot_pattern, SlotPattern::AmPm);
        assert_eq!(config.target_profit, 1_000_000.0);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            DashboardConfig::from_toml_str("children_per_staff = 0"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            DashboardConfig::from_toml_str("visit_rate = 1.5"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            DashboardConfig::from_toml_str("target_profit = -1.0"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            DashboardConfig::from_toml_str("unit_price = \"cheap\""),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = DashboardConfig::from_file("/nonexistent/dashboard.toml").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
