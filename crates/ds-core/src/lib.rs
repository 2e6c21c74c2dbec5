//! # ds-core
//!
//! Core types and error definitions shared by the day-service forecasting
//! crates: primitive type aliases, the [`Error`] enum, and the `ensure!` /
//! `fail!` macros.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error types and the `ensure!` / `fail!` macros.
pub mod errors;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Floating-point type used for rates and money.
pub type Real = f64;

/// A percentage on the 0–100 scale. Not clamped: over-booking yields > 100.
pub type Percentage = Real;

/// An amount of money in Japanese yen.
pub type Yen = Real;

/// Count of days or slots.
pub type Count = u32;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Error, Result};
