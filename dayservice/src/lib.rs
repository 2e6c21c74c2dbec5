//! # dayservice
//!
//! Utilization and revenue forecasting for a Japanese after-school
//! day-service facility (放課後等デイサービス).
//!
//! This crate is a **façade** that re-exports the workspace crates.
//! Application code should depend on this crate rather than the individual
//! `ds-*` crates.
//!
//! ## Quick start
//!
//! ```rust
//! use dayservice::forecast::{
//!     calculate_monthly_utilization_forecast, Capacity, DashboardConfig, FacilitySettings,
//! };
//! use dayservice::time::{CalendarMonth, Weekday};
//!
//! let settings = FacilitySettings {
//!     capacity: Capacity { am: 10, pm: 10 },
//!     regular_holidays: [Weekday::Sunday].into_iter().collect(),
//!     include_holidays: true,
//!     ..FacilitySettings::default()
//! };
//! let month = CalendarMonth::from_numbers(2024, 5).unwrap();
//! let forecast =
//!     calculate_monthly_utilization_forecast(&[], &settings, month, &DashboardConfig::default());
//! assert_eq!(forecast.total_slots, 24 * 20);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core aliases and error definitions.
pub use ds_core as core;

/// Dates, months, weekdays, the national-holiday resolver and the facility
/// calendar.
pub use ds_time as time;

/// Capacity, forecast and dashboard calculations.
pub use ds_forecast as forecast;
