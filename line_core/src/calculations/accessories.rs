//! # Accessory Resolution
//!
//! Maps a standardized current rating to catalog reference codes for the
//! socket unit (tomacorriente) and the trolley drag arm (brazo de arrastre).
//! Both tables are keyed by the seven ladder values; anything else - the
//! zero rating, the refer-to-technical sentinel, an undetermined rating -
//! resolves to "no reference" rather than an error.
//!
//! Ratings above 80 A are served by combining the 40 A and 60 A rated units,
//! which is why the higher rows reference multiples of the same two codes.

use crate::calculations::current::{nominal_current_amps, standardize, RatingSelection};
use crate::form::LoadGroup;

/// Socket (tomacorriente) catalog reference for a standardized rating
pub fn socket_ref(rating: RatingSelection) -> Option<&'static str> {
    match rating {
        RatingSelection::Rated(40) => Some("TO-4x35A"),
        RatingSelection::Rated(60) => Some("TO-4x70A"),
        RatingSelection::Rated(80) => Some("TO-4x70A"),
        RatingSelection::Rated(100) => Some("TO-4x35A + TO-4x70A"),
        RatingSelection::Rated(140) => Some("2  TO-4x70A"),
        RatingSelection::Rated(160) => Some("TO-4x35A + 2 TO-4x70A"),
        RatingSelection::Rated(200) => Some("3 TO-4x70A"),
        _ => None,
    }
}

/// Drag-arm (brazo de arrastre) catalog reference for a standardized rating
pub fn drag_arm_ref(rating: RatingSelection) -> Option<&'static str> {
    match rating {
        RatingSelection::Rated(40) => Some("BA-4"),
        RatingSelection::Rated(60) => Some("BA-70"),
        RatingSelection::Rated(80) => Some("BA-70"),
        RatingSelection::Rated(100) => Some("BA-4 + BA-70"),
        RatingSelection::Rated(140) => Some("2 BA-70"),
        RatingSelection::Rated(160) => Some("BA-4 + 2 BA-70"),
        RatingSelection::Rated(200) => Some("3 BA-70"),
        _ => None,
    }
}

/// Standardized rating per load unit, from its own installed power.
///
/// Each grua draws through its own socket and drag arm, so its accessories
/// are sized from its own service sum rather than the line-wide total.
/// Without a usable voltage every entry is undetermined.
pub fn rating_by_grua(voltage_v: Option<f64>, gruas: &[LoadGroup]) -> Vec<Option<RatingSelection>> {
    let Some(voltage) = voltage_v.filter(|v| v.is_finite() && *v > 0.0) else {
        return vec![None; gruas.len()];
    };
    gruas
        .iter()
        .map(|grua| {
            let power_watts = grua.installed_power_watts();
            nominal_current_amps(power_watts, voltage).and_then(standardize)
        })
        .collect()
}
