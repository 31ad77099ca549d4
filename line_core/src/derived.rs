//! # Derived Session Values
//!
//! One eager recomputation pass over a session: validation completeness,
//! power aggregation, current sizing, accessory lookup, support counts and
//! the voltage-drop estimate, in dependency order. The source application
//! recomputes these reactively on every edit; with inputs this small a full
//! pass per edit is equivalent and keeps the calculators pure.
//!
//! The presentation layer reads these values and renders them; it never
//! computes anything itself and never mutates a derived value.

use serde::{Deserialize, Serialize};

use crate::calculations::accessories::{drag_arm_ref, rating_by_grua, socket_ref};
use crate::calculations::current::RatingSelection;
use crate::calculations::power::{total_power_amps, total_power_watts};
use crate::calculations::supports::{
    end_feed_ref, sliding_guide_count, splice_count, support_count,
};
use crate::calculations::voltage_drop::{self, DropVerdict};
use crate::form::{FormState, LoadGroup};
use crate::session::Session;
use crate::validation::is_required_form_complete;

/// Every derived value the results panel renders.
///
/// `None` means "no result yet" - insufficient upstream data, to be shown
/// as a placeholder. The refer-to-technical rating is a real outcome and
/// arrives as `Some(RatingSelection::ReferTechnical)` instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedValues {
    /// Required subset of the form is filled in; results may be shown
    pub form_complete: bool,

    /// Total corrected power (W); 0 when nothing is entered
    pub total_power_watts: f64,

    /// Total corrected power as amps at the nominal voltage; 0 without one
    pub total_power_amps: f64,

    /// Line-wide standardized rating, from the total-power amp figure
    pub line_rating: Option<RatingSelection>,

    /// Standardized rating per load unit, from its own installed power
    pub rating_by_grua: Vec<Option<RatingSelection>>,

    /// Socket (tomacorriente) reference per load unit
    pub socket_refs: Vec<Option<String>>,

    /// Drag-arm (brazo de arrastre) reference per load unit
    pub drag_arm_refs: Vec<Option<String>>,

    /// SO-4 support count over the full line
    pub support_count: Option<u64>,

    /// SU-5001 sliding-guide count (supports + 1)
    pub sliding_guide_count: Option<u64>,

    /// EMP-4 splice count over the full line
    pub splice_count: Option<i64>,

    /// End-feed (alimentación extrema) reference or choose-by-cable advisory
    pub end_feed_ref: Option<String>,

    /// Impedance per meter for the line rating (Ω/m)
    pub impedance_ohm_per_m: Option<f64>,

    /// Voltage drop over the full line (V)
    pub voltage_drop_volts: Option<f64>,

    /// Voltage drop as a percentage of the nominal voltage
    pub voltage_drop_percent: Option<f64>,

    /// Offerability verdict for the drop percentage
    pub voltage_drop_verdict: Option<DropVerdict>,
}

/// Recompute every derived value for a form and its load units.
///
/// Pure and idempotent: the same state always produces the same values.
pub fn derive_values(form: &FormState, gruas: &[LoadGroup]) -> DerivedValues {
    let grua_count = form
        .number_and_type_of_machines_to_feed
        .map(|count| count as usize)
        .unwrap_or(gruas.len());

    let watts = total_power_watts(form, gruas, grua_count);
    let amps = total_power_amps(watts, form.voltage);

    let per_grua = rating_by_grua(form.voltage, gruas);
    let socket_refs = per_grua
        .iter()
        .map(|rating| rating.and_then(socket_ref).map(str::to_string))
        .collect();
    let drag_arm_refs = per_grua
        .iter()
        .map(|rating| rating.and_then(drag_arm_ref).map(str::to_string))
        .collect();

    let drop = voltage_drop::estimate(amps, form.total_distance, form.voltage);
    let supports = support_count(form.total_distance, drop.rating);

    DerivedValues {
        form_complete: is_required_form_complete(form),
        total_power_watts: watts,
        total_power_amps: amps,
        line_rating: drop.rating,
        rating_by_grua: per_grua,
        socket_refs,
        drag_arm_refs,
        support_count: supports,
        sliding_guide_count: sliding_guide_count(supports),
        splice_count: splice_count(form.total_distance),
        end_feed_ref: end_feed_ref(drop.rating).map(str::to_string),
        impedance_ohm_per_m: drop.impedance_ohm_per_m,
        voltage_drop_volts: drop.drop_volts,
        voltage_drop_percent: drop.drop_percent,
        voltage_drop_verdict: drop.verdict,
    }
}

/// Recompute every derived value for a session
pub fn derive(session: &Session) -> DerivedValues {
    derive_values(&session.form, &session.gruas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::PowerGroup;

    fn grua_with_kw(kw: f64) -> LoadGroup {
        let mut grua = LoadGroup::default();
        let mut servicio = PowerGroup::default();
        servicio.set_kw(Some(kw));
        grua.set_service("elevacion", servicio);
        grua
    }

    /// 380 V, one 30 kW grua: the walkthrough scenario end to end
    #[test]
    fn test_single_grua_scenario() {
        let mut form = FormState::new();
        form.voltage = Some(380.0);
        form.total_distance = Some(100.0);
        form.number_and_type_of_machines_to_feed = Some(1);
        let gruas = vec![grua_with_kw(30.0)];

        let derived = derive_values(&form, &gruas);

        // 30 kW installed, derated once: 24 kW
        assert!((derived.total_power_watts - 24_000.0).abs() < 1e-9);
        // 24000 / (sqrt(3) * 380 * 0.8) = 45.58 A -> 60 A rating
        assert!((derived.total_power_amps - 45.58).abs() < 0.005);
        assert_eq!(derived.line_rating, Some(RatingSelection::Rated(60)));

        // Per-grua sizing uses the un-derated 30 kW: 56.98 A -> 60 A
        assert_eq!(derived.rating_by_grua, vec![Some(RatingSelection::Rated(60))]);
        assert_eq!(derived.socket_refs, vec![Some("TO-4x70A".to_string())]);
        assert_eq!(derived.drag_arm_refs, vec![Some("BA-70".to_string())]);

        // 100 m at 60 A: 50 supports, 51 guides, 24 splices, AE-4 feed
        assert_eq!(derived.support_count, Some(50));
        assert_eq!(derived.sliding_guide_count, Some(51));
        assert_eq!(derived.splice_count, Some(24));
        assert_eq!(derived.end_feed_ref, Some("AE-4".to_string()));

        // Drop: sqrt(3) * 45.58 * 100 * 0.00175 = 13.81 V = 3.6% -> not offerable
        let percent = derived.voltage_drop_percent.unwrap();
        assert!((percent - 3.635).abs() < 0.01);
        assert_eq!(derived.voltage_drop_verdict, Some(DropVerdict::SeeAlternatives));
    }

    /// Two 30 kW gruas: the aggregate picks up the second derating pass
    #[test]
    fn test_two_grua_scenario() {
        let mut form = FormState::new();
        form.voltage = Some(380.0);
        form.number_and_type_of_machines_to_feed = Some(2);
        let gruas = vec![grua_with_kw(30.0), grua_with_kw(30.0)];

        let derived = derive_values(&form, &gruas);

        // 0.8 * (24000 + 24000) = 38400 W -> 72.93 A -> 80 A
        assert!((derived.total_power_watts - 38_400.0).abs() < 1e-9);
        assert!((derived.total_power_amps - 72.93).abs() < 0.005);
        assert_eq!(derived.line_rating, Some(RatingSelection::Rated(80)));

        // Each grua on its own still sizes at 60 A
        assert_eq!(
            derived.rating_by_grua,
            vec![Some(RatingSelection::Rated(60)), Some(RatingSelection::Rated(60))]
        );
    }

    #[test]
    fn test_empty_session_yields_placeholders() {
        let derived = derive_values(&FormState::new(), &[]);

        assert!(!derived.form_complete);
        assert_eq!(derived.total_power_watts, 0.0);
        assert_eq!(derived.total_power_amps, 0.0);
        // Zero amps standardizes to "none required", not undetermined
        assert_eq!(derived.line_rating, Some(RatingSelection::NoneRequired));
        assert_eq!(derived.voltage_drop_volts, None);
        assert_eq!(derived.voltage_drop_verdict, None);
        assert_eq!(derived.support_count, None);
        // The zero rating is numeric, so it still buckets into the
        // smallest end-feed unit
        assert_eq!(derived.end_feed_ref, Some("AE-4".to_string()));
    }

    #[test]
    fn test_idempotent_over_unchanged_state() {
        let mut form = FormState::new();
        form.voltage = Some(380.0);
        form.total_distance = Some(120.0);
        let gruas = vec![grua_with_kw(22.0)];

        let first = derive_values(&form, &gruas);
        let second = derive_values(&form, &gruas);
        assert_eq!(first, second);
    }

    #[test]
    fn test_derived_serialization() {
        let mut form = FormState::new();
        form.voltage = Some(380.0);
        form.total_distance = Some(100.0);
        let derived = derive_values(&form, &[grua_with_kw(30.0)]);

        let json = serde_json::to_string_pretty(&derived).unwrap();
        let roundtrip: DerivedValues = serde_json::from_str(&json).unwrap();
        assert_eq!(derived, roundtrip);
    }
}
