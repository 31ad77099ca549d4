//! # Form Data Structures
//!
//! The shared form state for one configuration session, plus the load-unit
//! ("grua") and per-service power records. All types serialize to clean JSON
//! so a session can be persisted or shipped to the mail relay as-is.
//!
//! ## Power unit consistency
//!
//! A [`PowerGroup`] keeps three equivalent figures (cv, kW, A) for one
//! service. Only one of cv/kW is ever edited directly; the other and the
//! amp figure are derived on every edit, so the triple can never drift
//! apart. kW is the source of truth for all downstream power aggregation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Horsepower (cv) to kilowatt conversion factor
pub const CV_TO_KW: f64 = 1.36;

/// Kilowatt to horsepower (cv) conversion factor
pub const KW_TO_CV: f64 = 0.73;

/// Reference line-to-line voltage used for the per-service amp figure (V)
pub const REFERENCE_VOLTAGE_V: f64 = 380.0;

/// Power factor applied in every three-phase current formula
pub const POWER_FACTOR: f64 = 0.8;

/// Selector value marking a curved line geometry
pub const LINE_TYPE_CURVED: &str = "Línea curva";

/// Selector value marking a straight line geometry
pub const LINE_TYPE_STRAIGHT: &str = "Línea recta";

/// Feed-point position that requires an explicit distance
pub const FEED_POSITION_DISTANCE: &str = "distance";

/// Environmental condition that requires a corrosive sub-type
pub const ENVIRONMENT_CORROSIVE: &str = "corrosive";

/// Power mode: one simultaneous per-machine figure instead of per-service sums
pub const POWER_MODE_SIMULTANEOUS: &str = "simultanea";

/// Round to two decimals, matching the precision shown in the form
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Per-service power in three mutually consistent units.
///
/// `None` means "not entered". Use [`PowerGroup::set_cv`] /
/// [`PowerGroup::set_kw`] rather than writing fields directly so the
/// derived pair stays in sync.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PowerGroup {
    /// Power in metric horsepower (cv)
    pub cv: Option<f64>,
    /// Power in kilowatts - source of truth for aggregation
    pub kw: Option<f64>,
    /// Current draw at 380 V, derived from kw
    pub amp: Option<f64>,
}

impl PowerGroup {
    /// Current draw for a kW figure at the 380 V reference voltage
    pub fn amps_for_kw(kw: f64) -> f64 {
        round2(kw * 1000.0 / (3.0_f64.sqrt() * REFERENCE_VOLTAGE_V * POWER_FACTOR))
    }

    /// Edit the cv side; kw and amp follow.
    ///
    /// Clearing cv (passing `None`) clears the derived pair. A non-finite
    /// value is ignored, leaving the group untouched.
    pub fn set_cv(&mut self, value: Option<f64>) {
        let Some(cv) = value else {
            self.cv = None;
            self.kw = None;
            self.amp = None;
            return;
        };
        if !cv.is_finite() {
            return;
        }
        let kw = round2(cv * CV_TO_KW);
        self.cv = Some(cv);
        self.kw = Some(kw);
        self.amp = Some(Self::amps_for_kw(kw));
    }

    /// Edit the kw side; cv and amp follow.
    pub fn set_kw(&mut self, value: Option<f64>) {
        let Some(kw) = value else {
            self.cv = None;
            self.kw = None;
            self.amp = None;
            return;
        };
        if !kw.is_finite() {
            return;
        }
        self.kw = Some(kw);
        self.cv = Some(round2(kw * KW_TO_CV));
        self.amp = Some(Self::amps_for_kw(kw));
    }
}

/// One load unit ("grua") with its named electrical services.
///
/// Services are keyed by name (hoist, translation, ...) in a sorted map so
/// aggregation order is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadGroup {
    /// Named services and their power figures
    pub servicios: BTreeMap<String, PowerGroup>,
}

impl LoadGroup {
    /// Sum of nameplate service powers in watts.
    ///
    /// Services without a kW figure contribute nothing; non-finite figures
    /// are filtered rather than propagated.
    pub fn installed_power_watts(&self) -> f64 {
        self.servicios
            .values()
            .filter_map(|servicio| servicio.kw)
            .filter(|kw| kw.is_finite())
            .map(|kw| kw * 1000.0)
            .sum()
    }

    /// Insert or replace a service by name
    pub fn set_service(&mut self, name: impl Into<String>, group: PowerGroup) {
        self.servicios.insert(name.into(), group);
    }
}

/// Curved-line geometry segment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tramo {
    /// Curve radius in meters
    pub radio: Option<f64>,
    /// Swept angle in degrees [0, 360]
    pub angulo: Option<f64>,
    /// Segment length in meters
    pub longitud: Option<f64>,
}

/// The single mutable record describing one configuration session.
///
/// Selector fields hold the raw option value the user picked (empty string
/// when unanswered); numeric fields are `None` until entered. The form is
/// mutated exclusively by user edits - every derived figure lives in
/// [`DerivedValues`](crate::derived::DerivedValues) instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormState {
    /// Industry the installation serves
    pub application_industry_type: String,

    /// Number of machines to feed [1, 4]
    pub number_and_type_of_machines_to_feed: Option<u32>,

    /// Conductor family the customer prefers
    pub type_of_conductors_to_use: String,

    /// Total line distance in meters (1, 280]
    pub total_distance: Option<f64>,

    /// Straight vs curved line
    pub type_of_line: String,

    /// Curved-line geometry segments; only the first is required today
    pub tramos: Vec<Tramo>,

    /// Indoor/outdoor work environment
    pub work_environment: String,

    /// Where the feed point sits along the line
    pub feeding_point_position: String,

    /// Feed-point offset in meters, required when position = "distance"
    pub feeding_point_position_distance: Option<f64>,

    /// Environmental condition (standard, corrosive, ...)
    pub environmental_condition: String,

    /// Corrosive sub-type, required when condition = "corrosive"
    pub environmental_condition_corrosive: String,

    /// Whether the line needs accidental-contact protection
    pub protected_line: String,

    /// Whether supply support arms are included
    pub supply_support_arms: String,

    /// Minimum ambient temperature (°C)
    pub min_temperature: Option<f64>,

    /// Maximum ambient temperature (°C)
    pub max_temperature: Option<f64>,

    /// Nominal line voltage (V)
    pub voltage: Option<f64>,

    /// "simultanea" = one per-machine figure; otherwise per-service sums
    pub power_mode: String,

    /// Max simultaneous power per machine, cv side
    pub max_simultaneous_power_cv: Option<f64>,

    /// Max simultaneous power per machine, kW side (source of truth)
    pub max_simultaneous_power_kw: Option<f64>,

    /// Max simultaneous power per machine, derived amps at 380 V
    pub max_simultaneous_power_amp: Option<f64>,
}

impl FormState {
    /// New empty session form
    pub fn new() -> Self {
        FormState {
            tramos: vec![Tramo::default()],
            ..FormState::default()
        }
    }

    /// Line type is curved, so tramo geometry applies
    pub fn is_curved(&self) -> bool {
        self.type_of_line == LINE_TYPE_CURVED
    }

    /// Feed point is placed at an explicit distance
    pub fn feed_point_needs_distance(&self) -> bool {
        self.feeding_point_position == FEED_POSITION_DISTANCE
    }

    /// Corrosive environment, so the sub-type selector applies
    pub fn is_corrosive(&self) -> bool {
        self.environmental_condition == ENVIRONMENT_CORROSIVE
    }

    /// Power entered as one simultaneous per-machine figure
    pub fn is_simultaneous_mode(&self) -> bool {
        self.power_mode == POWER_MODE_SIMULTANEOUS
    }

    /// Edit the simultaneous-power cv field; kw and amp follow
    pub fn set_max_power_cv(&mut self, value: Option<f64>) {
        let Some(cv) = value else {
            self.max_simultaneous_power_cv = None;
            self.max_simultaneous_power_kw = None;
            self.max_simultaneous_power_amp = None;
            return;
        };
        if !cv.is_finite() {
            return;
        }
        let kw = round2(cv * CV_TO_KW);
        self.max_simultaneous_power_cv = Some(cv);
        self.max_simultaneous_power_kw = Some(kw);
        self.max_simultaneous_power_amp = Some(PowerGroup::amps_for_kw(kw));
    }

    /// Edit the simultaneous-power kw field; cv and amp follow
    pub fn set_max_power_kw(&mut self, value: Option<f64>) {
        let Some(kw) = value else {
            self.max_simultaneous_power_cv = None;
            self.max_simultaneous_power_kw = None;
            self.max_simultaneous_power_amp = None;
            return;
        };
        if !kw.is_finite() {
            return;
        }
        self.max_simultaneous_power_kw = Some(kw);
        self.max_simultaneous_power_cv = Some(round2(kw * KW_TO_CV));
        self.max_simultaneous_power_amp = Some(PowerGroup::amps_for_kw(kw));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cv_edit_derives_kw_and_amp() {
        let mut group = PowerGroup::default();
        group.set_cv(Some(10.0));

        // 10 cv * 1.36 = 13.6 kW
        assert_eq!(group.kw, Some(13.6));
        // 13600 / (sqrt(3) * 380 * 0.8) = 25.83 A
        let amp = group.amp.unwrap();
        assert!((amp - 25.83).abs() < 0.01);
    }

    #[test]
    fn test_kw_edit_derives_cv_and_amp() {
        let mut group = PowerGroup::default();
        group.set_kw(Some(30.0));

        assert_eq!(group.cv, Some(21.9));
        assert_eq!(group.amp, Some(56.98));
    }

    #[test]
    fn test_clearing_cv_clears_derived_pair() {
        let mut group = PowerGroup::default();
        group.set_cv(Some(10.0));
        group.set_cv(None);

        assert_eq!(group.cv, None);
        assert_eq!(group.kw, None);
        assert_eq!(group.amp, None);
    }

    #[test]
    fn test_non_finite_edit_ignored() {
        let mut group = PowerGroup::default();
        group.set_kw(Some(30.0));
        group.set_kw(Some(f64::NAN));

        assert_eq!(group.kw, Some(30.0));
    }

    #[test]
    fn test_installed_power_sums_services() {
        let mut grua = LoadGroup::default();
        let mut hoist = PowerGroup::default();
        hoist.set_kw(Some(30.0));
        let mut translation = PowerGroup::default();
        translation.set_kw(Some(7.5));
        grua.set_service("elevacion", hoist);
        grua.set_service("traslacion", translation);

        assert!((grua.installed_power_watts() - 37_500.0).abs() < 1e-9);
    }

    #[test]
    fn test_installed_power_skips_missing_kw() {
        let mut grua = LoadGroup::default();
        grua.set_service("elevacion", PowerGroup::default());

        assert_eq!(grua.installed_power_watts(), 0.0);
    }

    #[test]
    fn test_simultaneous_power_handlers() {
        let mut form = FormState::new();
        form.set_max_power_kw(Some(15.0));
        assert_eq!(form.max_simultaneous_power_cv, Some(10.95));

        form.set_max_power_kw(None);
        assert_eq!(form.max_simultaneous_power_cv, None);
        assert_eq!(form.max_simultaneous_power_kw, None);
        assert_eq!(form.max_simultaneous_power_amp, None);
    }

    #[test]
    fn test_clearing_either_side_clears_whole_triple() {
        let mut form = FormState::new();
        form.set_max_power_kw(Some(12.0));
        form.set_max_power_kw(None);
        assert_eq!(form.max_simultaneous_power_kw, None);

        form.set_max_power_cv(Some(10.0));
        form.set_max_power_cv(None);
        assert_eq!(form.max_simultaneous_power_cv, None);
        assert_eq!(form.max_simultaneous_power_kw, None);
        assert_eq!(form.max_simultaneous_power_amp, None);
    }

    #[test]
    fn test_form_serialization_roundtrip() {
        let mut form = FormState::new();
        form.type_of_line = LINE_TYPE_CURVED.to_string();
        form.total_distance = Some(120.0);
        form.voltage = Some(380.0);

        let json = serde_json::to_string_pretty(&form).unwrap();
        let roundtrip: FormState = serde_json::from_str(&json).unwrap();
        assert_eq!(form, roundtrip);
    }
}
