//! Concrete calendar implementations.

/// Facility closure rules (regular holidays, holiday periods, custom closures).
pub mod facility;

/// Japanese national holidays.
pub mod japan;
