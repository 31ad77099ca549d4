//! # Power Aggregation
//!
//! Total corrected electrical power across the installation's load units,
//! in two modes:
//!
//! - **simultaneous**: one per-machine kW figure replicated across the
//!   declared machine count
//! - **per-service**: each load unit contributes the sum of its nameplate
//!   service powers
//!
//! Every unit's installed power is derated by 0.8 ("corrected power"). With
//! more than one unit, the aggregate is derated by 0.8 a second time - the
//! simultaneity factor. The double derating in the multi-unit case is a
//! domain rule, not an accident.

use crate::form::{round2, FormState, LoadGroup, POWER_FACTOR};

/// Derating factor applied per unit, and again to multi-unit aggregates
pub const DERATING_FACTOR: f64 = 0.8;

/// Installed power per load unit in watts.
///
/// In simultaneous mode with a positive per-machine kW figure, the figure is
/// replicated `grua_count` times. Otherwise each load unit contributes its
/// per-service sum; empty or non-positive unit totals are dropped, not
/// propagated.
pub fn installed_powers_watts(
    form: &FormState,
    gruas: &[LoadGroup],
    grua_count: usize,
) -> Vec<f64> {
    let per_machine_kw = form.max_simultaneous_power_kw;
    let use_per_machine = form.is_simultaneous_mode()
        && per_machine_kw.is_some_and(|kw| kw.is_finite() && kw > 0.0);

    if use_per_machine {
        let watts = per_machine_kw.unwrap_or_default() * 1000.0;
        return vec![watts; grua_count];
    }

    gruas
        .iter()
        .map(LoadGroup::installed_power_watts)
        .filter(|power| power.is_finite() && *power > 0.0)
        .collect()
}

/// Total corrected power in watts.
///
/// Always ≥ 0: an empty installed-power list yields 0, and non-finite
/// contributors were already filtered upstream.
pub fn total_power_watts(form: &FormState, gruas: &[LoadGroup], grua_count: usize) -> f64 {
    let installed = installed_powers_watts(form, gruas, grua_count);
    if installed.is_empty() {
        return 0.0;
    }

    let corrected: Vec<f64> = installed
        .iter()
        .map(|power| DERATING_FACTOR * power)
        .collect();
    if corrected.len() == 1 {
        return corrected[0];
    }

    // Simultaneity: the multi-unit aggregate is derated a second time
    DERATING_FACTOR * corrected.iter().sum::<f64>()
}

/// Total corrected power expressed as amps at the nominal voltage.
///
/// Returns 0 (not "undefined") when the voltage is absent or non-positive,
/// rounded to two decimals as shown in the form.
pub fn total_power_amps(total_watts: f64, voltage_v: Option<f64>) -> f64 {
    let Some(voltage) = voltage_v.filter(|v| v.is_finite() && *v > 0.0) else {
        return 0.0;
    };
    round2(total_watts / (3.0_f64.sqrt() * voltage * POWER_FACTOR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{PowerGroup, POWER_MODE_SIMULTANEOUS};

    fn grua_with_kw(kw: f64) -> LoadGroup {
        let mut grua = LoadGroup::default();
        let mut servicio = PowerGroup::default();
        servicio.set_kw(Some(kw));
        grua.set_service("elevacion", servicio);
        grua
    }

    #[test]
    fn test_single_unit_derated_once() {
        // 30 kW installed -> 24 kW corrected, no aggregate derating
        let form = FormState::new();
        let gruas = vec![grua_with_kw(30.0)];
        let total = total_power_watts(&form, &gruas, 1);
        assert!((total - 24_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_multi_unit_derated_twice() {
        // Two 30 kW units: 0.8 * (24000 + 24000) = 38400 W
        let form = FormState::new();
        let gruas = vec![grua_with_kw(30.0), grua_with_kw(30.0)];
        let total = total_power_watts(&form, &gruas, 2);
        assert!((total - 38_400.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_and_multi_formulas_coincide_at_one_unit() {
        let form = FormState::new();
        let gruas = vec![grua_with_kw(18.5)];
        let single = total_power_watts(&form, &gruas, 1);
        // Multi-unit formula with one element would be 0.8 * corrected
        assert!((single - 0.8 * 18_500.0).abs() < 1e-9);
    }

    #[test]
    fn test_simultaneous_mode_replicates_per_machine_figure() {
        let mut form = FormState::new();
        form.power_mode = POWER_MODE_SIMULTANEOUS.to_string();
        form.set_max_power_kw(Some(12.0));

        let installed = installed_powers_watts(&form, &[], 3);
        assert_eq!(installed, vec![12_000.0, 12_000.0, 12_000.0]);

        // 3 units: 0.8 * (3 * 0.8 * 12000) = 23040 W
        let total = total_power_watts(&form, &[], 3);
        assert!((total - 23_040.0).abs() < 1e-9);
    }

    #[test]
    fn test_cleared_figure_stops_driving_simultaneous_mode() {
        let mut form = FormState::new();
        form.power_mode = POWER_MODE_SIMULTANEOUS.to_string();
        form.set_max_power_kw(Some(12.0));
        form.set_max_power_kw(None);

        // Nothing left to replicate: the cleared figure must not linger
        assert_eq!(installed_powers_watts(&form, &[], 3), Vec::<f64>::new());
        assert_eq!(total_power_watts(&form, &[], 3), 0.0);
    }

    #[test]
    fn test_simultaneous_mode_without_figure_falls_back_to_services() {
        let mut form = FormState::new();
        form.power_mode = POWER_MODE_SIMULTANEOUS.to_string();

        let gruas = vec![grua_with_kw(30.0)];
        let total = total_power_watts(&form, &gruas, 1);
        assert!((total - 24_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_load_list_yields_zero() {
        let form = FormState::new();
        assert_eq!(total_power_watts(&form, &[], 0), 0.0);
    }

    #[test]
    fn test_units_without_power_are_dropped() {
        let form = FormState::new();
        let gruas = vec![grua_with_kw(30.0), LoadGroup::default()];
        // The empty unit drops out, leaving a single-unit aggregation
        let total = total_power_watts(&form, &gruas, 2);
        assert!((total - 24_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_total_never_negative() {
        let form = FormState::new();
        let gruas = vec![LoadGroup::default(), LoadGroup::default()];
        assert!(total_power_watts(&form, &gruas, 2) >= 0.0);
    }

    #[test]
    fn test_total_power_amps() {
        // 24000 W at 380 V -> 45.58 A, rounded to 2 decimals
        let amps = total_power_amps(24_000.0, Some(380.0));
        assert!((amps - 45.58).abs() < 0.005);
    }

    #[test]
    fn test_total_power_amps_zero_without_voltage() {
        assert_eq!(total_power_amps(24_000.0, None), 0.0);
        assert_eq!(total_power_amps(24_000.0, Some(0.0)), 0.0);
        assert_eq!(total_power_amps(24_000.0, Some(f64::NAN)), 0.0);
    }
}
