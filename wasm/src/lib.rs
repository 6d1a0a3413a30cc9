//! HealthStride WASM Module
//!
//! Exposes the derived-metric calculator to the browser dashboard so the
//! profile and metrics pages compute BMI, age, net calories and unit
//! conversions with the same rules as the native client.

use healthstride_shared::models::local_datetime;
use healthstride_shared::{health_metrics, units, ActivityLevel, Gender};
use wasm_bindgen::prelude::*;

/// Calculate BMI from weight (kg) and height (cm); 0 when height is missing
#[wasm_bindgen]
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    if height_cm <= 0.0 {
        return 0.0;
    }
    health_metrics::calculate_bmi(weight_kg, height_cm)
}

/// Label of the BMI band: Underweight, Normal, Overweight or Obese
#[wasm_bindgen]
pub fn bmi_label(bmi: f64) -> String {
    health_metrics::classify_bmi(bmi).label().to_string()
}

/// Calories consumed minus burned
#[wasm_bindgen]
pub fn net_calories(consumed: f64, burned: f64) -> f64 {
    health_metrics::net_calories(consumed, burned)
}

/// Whole years between two `YYYY-MM-DD` dates; 0 if either fails to parse
#[wasm_bindgen]
pub fn age_years(date_of_birth: &str, today: &str) -> u32 {
    match (date_of_birth.parse(), today.parse()) {
        (Ok(dob), Ok(today)) => health_metrics::age_on(dob, today),
        _ => 0,
    }
}

/// Height as `5 ft 11 in`
#[wasm_bindgen]
pub fn height_feet_inches(height_cm: f64) -> String {
    units::FeetInches::from_cm(height_cm).to_string()
}

/// Kilograms to pounds, one decimal
#[wasm_bindgen]
pub fn kg_to_lb(weight_kg: f64) -> f64 {
    units::kg_to_lb(weight_kg)
}

/// Calculate TDEE (Total Daily Energy Expenditure)
/// Uses Mifflin-St Jeor equation; unknown gender or activity strings fall
/// back to the non-male constant and the sedentary multiplier
#[wasm_bindgen]
pub fn calculate_tdee(
    weight_kg: f64,
    height_cm: f64,
    age_years: u32,
    gender: &str,
    activity_level: &str,
) -> f64 {
    let gender = gender.parse().unwrap_or(Gender::Other);
    let bmr = health_metrics::calculate_bmr(weight_kg, height_cm, age_years, gender);
    health_metrics::calculate_tdee(bmr, activity_level.parse::<ActivityLevel>().ok())
}

/// Estimated calories for an activity (MET × kg × hours)
#[wasm_bindgen]
pub fn activity_calories(activity_type: &str, duration_minutes: f64, weight_kg: f64) -> f64 {
    health_metrics::calculate_activity_calories(activity_type, duration_minutes, weight_kg)
}

/// Whole minutes between two `YYYY-MM-DDTHH:MM` timestamps; 0 if either fails to parse
#[wasm_bindgen]
pub fn activity_duration(start_time: &str, end_time: &str) -> f64 {
    match (local_datetime::parse(start_time), local_datetime::parse(end_time)) {
        (Ok(start), Ok(end)) => health_metrics::activity_duration_minutes(start, end),
        _ => 0.0,
    }
}

/// Average pace in km/h
#[wasm_bindgen]
pub fn average_pace(distance_km: f64, duration_minutes: f64) -> f64 {
    health_metrics::average_pace_kmh(distance_km, duration_minutes)
}
