//! # Voltage Drop Estimation
//!
//! Ohmic voltage drop over the full line distance at the standardized
//! current rating, and the resulting offerability verdict. A design is
//! offerable when the drop stays under 3% of the nominal voltage.
//!
//! The current fed in here is the line-wide total-power amp figure, not a
//! separately measured line current - the sizing chain deliberately reuses
//! the same proxy for drop estimation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::calculations::current::{standardize, RatingSelection};

/// Verdict line for an offerable design (<3% drop)
pub const VERDICT_OFFERABLE: &str = "SE PUEDE OFERTAR ESTA LÍNEA (<3%)";

/// Verdict line when the drop is 3% or more
pub const VERDICT_SEE_ALTERNATIVES: &str = "VER OPCIONES 1 Y 2";

/// Offerability verdict for a computed drop percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropVerdict {
    /// Drop below 3% - the line can be offered as configured
    Offerable,
    /// Drop at or above 3% - alternative configurations apply
    SeeAlternatives,
}

impl fmt::Display for DropVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropVerdict::Offerable => f.write_str(VERDICT_OFFERABLE),
            DropVerdict::SeeAlternatives => f.write_str(VERDICT_SEE_ALTERNATIVES),
        }
    }
}

/// Conductor impedance per meter for a standardized rating (Ω/m).
///
/// Larger sections carry lower impedance. Only the seven ladder values have
/// an entry; anything else is undetermined.
pub fn impedance_ohm_per_m(rating: RatingSelection) -> Option<f64> {
    match rating {
        RatingSelection::Rated(40) => Some(0.00200),
        RatingSelection::Rated(60) => Some(0.00175),
        RatingSelection::Rated(80) => Some(0.00118),
        RatingSelection::Rated(100) => Some(0.00100),
        RatingSelection::Rated(140) => Some(0.00075),
        RatingSelection::Rated(160) => Some(0.00065),
        RatingSelection::Rated(200) => Some(0.00055),
        _ => None,
    }
}

/// Full voltage-drop estimate for one line configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoltageDropEstimate {
    /// Rating re-derived from the input current via the standard ladder
    pub rating: Option<RatingSelection>,
    /// Impedance per meter for that rating (Ω/m)
    pub impedance_ohm_per_m: Option<f64>,
    /// Drop over the full line in volts
    pub drop_volts: Option<f64>,
    /// Drop as a percentage of the nominal voltage
    pub drop_percent: Option<f64>,
    /// Offerability verdict; absent while the drop is undetermined
    pub verdict: Option<DropVerdict>,
}

/// Estimate the voltage drop for a current/distance/voltage triple.
///
/// Each output is independently undetermined (`None`) when its own inputs
/// are insufficient; an undetermined upstream value propagates downstream
/// instead of ever leaking a NaN.
pub fn estimate(
    current_amps: f64,
    distance_m: Option<f64>,
    voltage_v: Option<f64>,
) -> VoltageDropEstimate {
    let rating = standardize(current_amps);
    let impedance = rating.and_then(impedance_ohm_per_m);

    let drop_volts = match (impedance, distance_m) {
        (Some(impedance), Some(distance))
            if current_amps.is_finite()
                && current_amps > 0.0
                && distance.is_finite()
                && distance > 0.0 =>
        {
            Some(3.0_f64.sqrt() * current_amps * distance * impedance)
        }
        _ => None,
    };

    let drop_percent = match (drop_volts, voltage_v) {
        (Some(volts), Some(nominal)) if nominal.is_finite() && nominal != 0.0 => {
            Some(volts / nominal * 100.0)
        }
        _ => None,
    };

    let verdict = drop_percent.map(|percent| {
        if percent < 3.0 {
            DropVerdict::Offerable
        } else {
            DropVerdict::SeeAlternatives
        }
    });

    VoltageDropEstimate {
        rating,
        impedance_ohm_per_m: impedance,
        drop_volts,
        drop_percent,
        verdict,
    }
}
