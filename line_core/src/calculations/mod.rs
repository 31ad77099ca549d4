//! # Line Calculations
//!
//! The calculator chain behind the configurator. Each module is a set of
//! pure functions: same inputs, same outputs, no side effects. Insufficient
//! upstream data flows through as `Option::None`, never as NaN.
//!
//! Dependency order (leaves first):
//!
//! - [`power`] - total installed/corrected power across the load units
//! - [`current`] - nominal current and the standard rating ladder
//! - [`accessories`] - socket and drag-arm catalog references
//! - [`supports`] - support, splice and sliding-guide counts, end-feed unit
//! - [`voltage_drop`] - ohmic drop over the line and the offer verdict
//!
//! [`crate::derived`] wires them together for a whole session.

pub mod accessories;
pub mod current;
pub mod power;
pub mod supports;
pub mod voltage_drop;

// Re-export commonly used types
pub use current::{RatingSelection, STANDARD_LADDER};
pub use voltage_drop::{DropVerdict, VoltageDropEstimate};
