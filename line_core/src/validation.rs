//! # Validation Engine
//!
//! Field-level validation for the configurator form. Two outputs:
//!
//! - [`is_required_form_complete`] - whether the required subset of the form
//!   is filled in well enough to show results
//! - [`validate_field`] - re-check one field after an edit, mutating the
//!   shared [`ErrorMap`] in place (add/remove keys), including any field
//!   whose validity depends on the edited one
//!
//! Completeness and the error map are deliberately independent: the
//! temperature-order and high-voltage rules attach messages but never block
//! completeness. Validation never fails - an invalid field is a map entry,
//! not an error value.

use std::collections::{BTreeMap, HashMap};

use once_cell::sync::Lazy;

use crate::form::FormState;

/// Field name → human-readable message. Presence of a key means the field
/// is currently invalid; absence means valid or not yet validated.
pub type ErrorMap = BTreeMap<String, String>;

/// Message for an empty required input
pub const MSG_REQUIRED: &str = "Este campo es obligatorio.";

/// Message for an unanswered selector group
pub const MSG_SELECT_OPTION: &str = "Selecciona una opción.";

/// Message for an unparseable value
pub const MSG_INVALID_FORMAT: &str = "Formato inválido.";

/// Message when min temperature is not below max temperature
pub const MSG_TEMPERATURE_ORDER: &str =
    "La temperatura mínima debe ser menor que la temperatura máxima.";

/// Advisory shown for voltages above 500 V
pub const MSG_VOLTAGE_ADVISORY: &str =
    "Para un voltaje mayor a 500V contacte con el servicio técnico.";

/// Message for a distance beyond the 280 m catalog limit
pub const MSG_DISTANCE_MAX: &str =
    "Valor máximo: 280. Para más recorrido contacte con el servicio técnico.";

/// Inclusive range rule for one numeric field
#[derive(Debug, Clone, Copy)]
struct NumericRule {
    min: Option<f64>,
    max: Option<f64>,
    /// Overrides the generic max message (catalog limits carry advice)
    max_message: Option<&'static str>,
}

static NUMERIC_RULES: Lazy<HashMap<&'static str, NumericRule>> = Lazy::new(|| {
    let mut rules = HashMap::new();
    rules.insert(
        "number_and_type_of_machines_to_feed",
        NumericRule { min: Some(1.0), max: Some(4.0), max_message: None },
    );
    rules.insert(
        "total_distance",
        NumericRule { min: Some(1.0), max: Some(280.0), max_message: Some(MSG_DISTANCE_MAX) },
    );
    rules.insert(
        "tramo_radio",
        NumericRule { min: Some(0.0), max: None, max_message: None },
    );
    rules.insert(
        "tramo_angulo",
        NumericRule { min: Some(0.0), max: Some(360.0), max_message: None },
    );
    rules.insert(
        "tramo_longitud",
        NumericRule { min: Some(0.0), max: None, max_message: None },
    );
    rules.insert(
        "feeding_point_position_distance",
        NumericRule { min: Some(0.0), max: None, max_message: None },
    );
    rules
});

fn is_non_empty(value: &str) -> bool {
    !value.trim().is_empty()
}

fn is_valid_number(value: Option<f64>, min: Option<f64>, max: Option<f64>) -> bool {
    let Some(numeric) = value else {
        return false;
    };
    if !numeric.is_finite() {
        return false;
    }
    if let Some(min) = min {
        if numeric < min {
            return false;
        }
    }
    if let Some(max) = max {
        if numeric > max {
            return false;
        }
    }
    true
}

/// Whether the required subset of the form is complete.
///
/// Conditional fields only count when their condition holds: tramo geometry
/// for curved lines, the feed-point offset for "distance" positioning, the
/// corrosive sub-type for corrosive environments. Voltage, temperatures and
/// power figures are not part of the required subset.
pub fn is_required_form_complete(form: &FormState) -> bool {
    if !is_non_empty(&form.application_industry_type) {
        return false;
    }
    if !is_valid_number(
        form.number_and_type_of_machines_to_feed.map(f64::from),
        Some(1.0),
        Some(4.0),
    ) {
        return false;
    }
    if !is_non_empty(&form.type_of_conductors_to_use) {
        return false;
    }
    if !is_valid_number(form.total_distance, Some(1.0), Some(280.0)) {
        return false;
    }
    if !is_non_empty(&form.type_of_line) {
        return false;
    }
    if form.is_curved() {
        let tramo = form.tramos.first();
        if !is_valid_number(tramo.and_then(|t| t.radio), Some(0.0), None) {
            return false;
        }
        if !is_valid_number(tramo.and_then(|t| t.angulo), Some(0.0), Some(360.0)) {
            return false;
        }
        if !is_valid_number(tramo.and_then(|t| t.longitud), Some(0.0), None) {
            return false;
        }
    }
    if !is_non_empty(&form.work_environment) {
        return false;
    }
    if !is_non_empty(&form.feeding_point_position) {
        return false;
    }
    if form.feed_point_needs_distance()
        && !is_valid_number(form.feeding_point_position_distance, Some(0.0), None)
    {
        return false;
    }
    if !is_non_empty(&form.environmental_condition) {
        return false;
    }
    if form.is_corrosive() && !is_non_empty(&form.environmental_condition_corrosive) {
        return false;
    }
    if !is_non_empty(&form.protected_line) {
        return false;
    }
    if !is_non_empty(&form.supply_support_arms) {
        return false;
    }
    true
}

fn numeric_value(form: &FormState, field: &str) -> Option<f64> {
    match field {
        "number_and_type_of_machines_to_feed" => {
            form.number_and_type_of_machines_to_feed.map(f64::from)
        }
        "total_distance" => form.total_distance,
        "tramo_radio" => form.tramos.first().and_then(|t| t.radio),
        "tramo_angulo" => form.tramos.first().and_then(|t| t.angulo),
        "tramo_longitud" => form.tramos.first().and_then(|t| t.longitud),
        "feeding_point_position_distance" => form.feeding_point_position_distance,
        _ => None,
    }
}

fn selector_value<'a>(form: &'a FormState, field: &str) -> Option<&'a str> {
    match field {
        "type_of_line" => Some(&form.type_of_line),
        "work_environment" => Some(&form.work_environment),
        "feeding_point_position" => Some(&form.feeding_point_position),
        "environmental_condition" => Some(&form.environmental_condition),
        "environmental_condition_corrosive" => Some(&form.environmental_condition_corrosive),
        "protected_line" => Some(&form.protected_line),
        "supply_support_arms" => Some(&form.supply_support_arms),
        _ => None,
    }
}

fn validate_numeric(form: &FormState, field: &str, rule: NumericRule, errors: &mut ErrorMap) {
    let value = numeric_value(form, field);
    let message = match value {
        None => Some(MSG_REQUIRED.to_string()),
        Some(numeric) if !numeric.is_finite() => Some(MSG_INVALID_FORMAT.to_string()),
        Some(numeric) => {
            if let Some(min) = rule.min.filter(|min| numeric < *min) {
                Some(format!("Valor mínimo: {min}."))
            } else if let Some(max) = rule.max.filter(|max| numeric > *max) {
                Some(match rule.max_message {
                    Some(specific) => specific.to_string(),
                    None => format!("Valor máximo: {max}."),
                })
            } else {
                None
            }
        }
    };
    apply(field, message, errors);
}

fn apply(field: &str, message: Option<String>, errors: &mut ErrorMap) {
    match message {
        Some(message) => {
            errors.insert(field.to_string(), message);
        }
        None => {
            errors.remove(field);
        }
    }
}

/// Re-validate one field after an edit, updating the error map in place.
///
/// Editing either temperature bound re-checks the min-below-max rule; an
/// edit to the voltage field re-checks the 500 V advisory. Neither rule
/// affects [`is_required_form_complete`].
pub fn validate_field(form: &FormState, field: &str, errors: &mut ErrorMap) {
    if let Some(rule) = NUMERIC_RULES.get(field).copied() {
        validate_numeric(form, field, rule, errors);
    } else if let Some(value) = selector_value(form, field) {
        let message = (!is_non_empty(value)).then(|| MSG_SELECT_OPTION.to_string());
        apply(field, message, errors);
    } else if matches!(field, "application_industry_type" | "type_of_conductors_to_use") {
        let text = match field {
            "application_industry_type" => &form.application_industry_type,
            _ => &form.type_of_conductors_to_use,
        };
        let message = (!is_non_empty(text)).then(|| MSG_REQUIRED.to_string());
        apply(field, message, errors);
    }

    if matches!(field, "min_temperature" | "max_temperature") {
        let ordered = match (form.min_temperature, form.max_temperature) {
            (Some(min), Some(max)) => min < max,
            _ => true,
        };
        let message = (!ordered).then(|| MSG_TEMPERATURE_ORDER.to_string());
        apply("min_temperature", message, errors);
    }

    if field == "voltage" {
        let advisory = form.voltage.filter(|v| *v > 500.0).is_some();
        let message = advisory.then(|| MSG_VOLTAGE_ADVISORY.to_string());
        apply("voltage", message, errors);
    }
}
