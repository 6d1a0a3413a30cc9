//! Derived-metric calculator
//!
//! Pure functions computing BMI, age, net calories and the energy estimates
//! shown next to a user profile. Every function takes already-fetched values
//! and returns a number; callers substitute zero for missing inputs.
//!
//! The dashboard displays the server's BMR/TDEE/BMI/age. The local
//! equivalents here back the WASM exports and the profile page's BMI card.

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ParseError;

// ============================================================================
// Profile Enums
// ============================================================================

/// Gender as stored on a user profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Wire name (`MALE`, `FEMALE`, `OTHER`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
            Gender::Other => "OTHER",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "MALE" | "M" => Ok(Gender::Male),
            "FEMALE" | "F" => Ok(Gender::Female),
            "OTHER" => Ok(Gender::Other),
            _ => Err(ParseError::Gender(s.to_string())),
        }
    }
}

/// Activity level for TDEE calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    LightlyActive,
    /// Moderate exercise 3-5 days/week
    ModeratelyActive,
    /// Hard exercise 6-7 days/week
    VeryActive,
    /// Very hard exercise, physical job
    ExtraActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::ModeratelyActive,
        ActivityLevel::VeryActive,
        ActivityLevel::ExtraActive,
    ];

    /// Get the activity multiplier for TDEE calculation
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::ExtraActive => 1.9,
        }
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Little or no exercise",
            ActivityLevel::LightlyActive => "Light exercise 1-3 days/week",
            ActivityLevel::ModeratelyActive => "Moderate exercise 3-5 days/week",
            ActivityLevel::VeryActive => "Hard exercise 6-7 days/week",
            ActivityLevel::ExtraActive => "Very hard exercise or physical job",
        }
    }

    /// Wire name, e.g. `MODERATELY_ACTIVE`
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "SEDENTARY",
            ActivityLevel::LightlyActive => "LIGHTLY_ACTIVE",
            ActivityLevel::ModeratelyActive => "MODERATELY_ACTIVE",
            ActivityLevel::VeryActive => "VERY_ACTIVE",
            ActivityLevel::ExtraActive => "EXTRA_ACTIVE",
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityLevel {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace(['-', ' '], "_");
        ActivityLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == normalized)
            .ok_or_else(|| ParseError::ActivityLevel(s.to_string()))
    }
}

// ============================================================================
// BMI Calculations
// ============================================================================

/// BMI classification band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Half-open BMI range `[low, high)` for this band
    pub fn range(&self) -> (f64, f64) {
        match self {
            BmiCategory::Underweight => (0.0, 18.5),
            BmiCategory::Normal => (18.5, 25.0),
            BmiCategory::Overweight => (25.0, 30.0),
            BmiCategory::Obese => (30.0, f64::INFINITY),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// BMI value together with its band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmiResult {
    pub value: f64,
    pub category: BmiCategory,
}

/// Calculate BMI from weight and height
///
/// Formula: BMI = weight(kg) / height(m)²
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// Classify BMI into one of four bands, evaluated in ascending order
pub fn classify_bmi(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 25.0 {
        BmiCategory::Normal
    } else if bmi < 30.0 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

/// Calculate BMI and its band
pub fn calculate_bmi_result(weight_kg: f64, height_cm: f64) -> BmiResult {
    let value = calculate_bmi(weight_kg, height_cm);
    BmiResult {
        value,
        category: classify_bmi(value),
    }
}

// ============================================================================
// Age and Calorie Balance
// ============================================================================

/// Whole years elapsed between `date_of_birth` and `today`
///
/// A year only counts once the birthday has been reached; a birth date in
/// the future yields 0.
pub fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> u32 {
    let mut years = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        years -= 1;
    }
    years.max(0) as u32
}

/// Age in whole years as of the local current date
pub fn age_today(date_of_birth: NaiveDate) -> u32 {
    age_on(date_of_birth, Local::now().date_naive())
}

/// Calories consumed minus calories burned (may be negative)
pub fn net_calories(consumed: f64, burned: f64) -> f64 {
    consumed - burned
}

/// Net calories with missing values counted as zero
pub fn net_calories_or_zero(consumed: Option<f64>, burned: Option<f64>) -> f64 {
    net_calories(consumed.unwrap_or(0.0), burned.unwrap_or(0.0))
}

// ============================================================================
// BMR and TDEE Calculations
// ============================================================================

/// Calculate Basal Metabolic Rate using Mifflin-St Jeor equation
///
/// Men: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) + 5
/// Everyone else: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) - 161
pub fn calculate_bmr(weight_kg: f64, height_cm: f64, age_years: u32, gender: Gender) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age_years);
    match gender {
        Gender::Male => base + 5.0,
        Gender::Female | Gender::Other => base - 161.0,
    }
}

/// Calculate Total Daily Energy Expenditure
///
/// TDEE = BMR × Activity Multiplier; no activity level counts as sedentary.
pub fn calculate_tdee(bmr: f64, activity_level: Option<ActivityLevel>) -> f64 {
    bmr * activity_level.map_or(ActivityLevel::Sedentary.multiplier(), |level| level.multiplier())
}

// ============================================================================
// Activity Estimates
// ============================================================================

/// MET used when an activity type matches nothing
pub const DEFAULT_MET: f64 = 3.5;

/// MET values for common activities, searched in order for partial matches
const MET_VALUES: &[(&str, f64)] = &[
    ("WALKING_SLOW", 2.5),
    ("WALKING_FAST", 5.0),
    ("WALKING", 3.5),
    ("CYCLING_LIGHT", 4.0),
    ("CYCLING_MODERATE", 6.8),
    ("CYCLING_FAST", 10.0),
    ("JOGGING", 7.0),
    ("RUNNING_FAST", 11.5),
    ("RUNNING", 9.8),
    ("SWIMMING_VIGOROUS", 10.0),
    ("SWIMMING", 6.0),
    ("YOGA", 3.0),
    ("JUMPING_ROPE", 12.0),
    ("BASKETBALL", 8.0),
    ("TENNIS", 7.0),
    ("SOCCER", 7.0),
];

/// Look up the metabolic equivalent for a free-text activity type
///
/// Exact match first, then the first table entry that contains or is
/// contained in the normalized name.
pub fn met_value(activity_type: &str) -> f64 {
    let normalized = activity_type.trim().to_uppercase().replace([' ', '-'], "_");
    if normalized.is_empty() {
        return DEFAULT_MET;
    }

    if let Some((_, met)) = MET_VALUES.iter().find(|(name, _)| *name == normalized) {
        return *met;
    }

    MET_VALUES
        .iter()
        .find(|(name, _)| normalized.contains(name) || name.contains(normalized.as_str()))
        .map_or(DEFAULT_MET, |(_, met)| *met)
}

/// Calories burned: MET × weight(kg) × hours
pub fn calculate_activity_calories(activity_type: &str, duration_minutes: f64, weight_kg: f64) -> f64 {
    if duration_minutes <= 0.0 || weight_kg <= 0.0 {
        return 0.0;
    }
    met_value(activity_type) * weight_kg * (duration_minutes / 60.0)
}

/// Whole minutes between start and end; zero when end precedes start
pub fn activity_duration_minutes(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    if end < start {
        return 0.0;
    }
    (end - start).num_minutes() as f64
}

/// Average pace in km/h; zero when either input is zero
pub fn average_pace_kmh(distance_km: f64, duration_minutes: f64) -> f64 {
    if duration_minutes == 0.0 || distance_km == 0.0 {
        return 0.0;
    }
    distance_km / (duration_minutes / 60.0)
}
