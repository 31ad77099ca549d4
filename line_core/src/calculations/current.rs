//! # Current Sizing
//!
//! Converts aggregated power and nominal voltage into a nominal current via
//! the three-phase formula `I = P / (√3 · V · cosφ)` with cosφ = 0.8, then
//! rounds the result *up* to the next value in the standard rating ladder.
//!
//! The ladder is the fixed catalog of conductor-rail current capacities.
//! Demand above 200 A is not an error - it is a "consult the technical
//! department" business outcome, kept distinct from "undetermined".

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::form::POWER_FACTOR;

/// Catalog ladder of standard current ratings, ascending (A)
pub const STANDARD_LADDER: [u32; 7] = [40, 60, 80, 100, 140, 160, 200];

/// Label shown when demand exceeds the catalog ladder
pub const REFER_TECHNICAL_LABEL: &str = "Consultar dpto. técnico";

/// Nominal line current for a power/voltage pair.
///
/// `None` when the voltage is absent, non-finite or non-positive - the
/// downstream calculators treat that as "no result", never as zero.
pub fn nominal_current_amps(power_watts: f64, voltage_v: f64) -> Option<f64> {
    if !voltage_v.is_finite() || voltage_v <= 0.0 || !power_watts.is_finite() {
        return None;
    }
    Some(power_watts / (3.0_f64.sqrt() * voltage_v * POWER_FACTOR))
}

/// Outcome of standardizing a nominal current against the rating ladder.
///
/// This is a derived enumeration - never user-editable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "amps")]
pub enum RatingSelection {
    /// Demand is zero or negative: no line current rating required
    NoneRequired,
    /// One of the seven catalog ratings (A)
    Rated(u32),
    /// Demand exceeds 200 A: refer to the technical department
    ReferTechnical,
}

impl RatingSelection {
    /// Numeric rating in amps.
    ///
    /// `NoneRequired` counts as 0 A (it participates in threshold
    /// comparisons downstream); the refer-to-technical sentinel has no
    /// numeric value.
    pub fn amps(&self) -> Option<u32> {
        match self {
            RatingSelection::NoneRequired => Some(0),
            RatingSelection::Rated(amps) => Some(*amps),
            RatingSelection::ReferTechnical => None,
        }
    }
}

impl fmt::Display for RatingSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RatingSelection::NoneRequired => write!(f, "0"),
            RatingSelection::Rated(amps) => write!(f, "{amps}"),
            RatingSelection::ReferTechnical => f.write_str(REFER_TECHNICAL_LABEL),
        }
    }
}

/// Round a nominal current up to the standard ladder.
///
/// The first ladder value *strictly greater* than the nominal current wins;
/// above 200 A the refer-to-technical sentinel applies. Exactly 200 A falls
/// between the two branches and yields `None` (undetermined), as does a
/// non-finite input.
pub fn standardize(nominal_amps: f64) -> Option<RatingSelection> {
    if !nominal_amps.is_finite() {
        return None;
    }
    if nominal_amps <= 0.0 {
        return Some(RatingSelection::NoneRequired);
    }
    for step in STANDARD_LADDER {
        if nominal_amps < f64::from(step) {
            return Some(RatingSelection::Rated(step));
        }
    }
    if nominal_amps > 200.0 {
        return Some(RatingSelection::ReferTechnical);
    }
    None
}
