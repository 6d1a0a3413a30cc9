//! Entities exchanged with the HealthStride backend
//!
//! Records are passed through verbatim. Identifiers are assigned by the
//! backend; a record without one is still pending creation.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::health_metrics::{self, ActivityLevel, Gender};

/// Backend-assigned record identifier
pub type EntityId = i64;

/// User profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Email should be valid"))]
    pub email: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    #[validate(range(min = 50.0, max = 300.0, message = "Height must be between 50 and 300 cm"))]
    pub height_cm: f64,
    #[validate(range(min = 20.0, max = 500.0, message = "Weight must be between 20 and 500 kg"))]
    pub weight_kg: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<ActivityLevel>,
}

impl UserProfile {
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// BMI from this profile's height and weight
    pub fn bmi(&self) -> health_metrics::BmiResult {
        health_metrics::calculate_bmi_result(self.weight_kg, self.height_cm)
    }

    /// Whole years of age as of `today`
    pub fn age_on(&self, today: NaiveDate) -> u32 {
        health_metrics::age_on(self.date_of_birth, today)
    }
}

/// One day of health metrics for a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DailyMetrics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, message = "Calories consumed cannot be negative"))]
    pub calories_consumed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, message = "Calories burned cannot be negative"))]
    pub calories_burned: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, message = "Distance cannot be negative"))]
    pub distance_km: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, message = "Water intake cannot be negative"))]
    pub water_intake_liters: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, message = "Sleep hours cannot be negative"))]
    pub sleep_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heart_rate_avg: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_calories: Option<f64>,
}

impl DailyMetrics {
    /// Blank form for `date`: every measurement zero
    pub fn zeroed(date: NaiveDate) -> Self {
        Self {
            id: None,
            date,
            steps: Some(0),
            calories_consumed: Some(0.0),
            calories_burned: Some(0.0),
            distance_km: Some(0.0),
            active_minutes: Some(0),
            water_intake_liters: Some(0.0),
            sleep_hours: Some(0.0),
            heart_rate_avg: Some(0),
            net_calories: None,
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Server-computed net calories, or consumed − burned when absent
    pub fn effective_net_calories(&self) -> f64 {
        self.net_calories.unwrap_or_else(|| {
            health_metrics::net_calories_or_zero(self.calories_consumed, self.calories_burned)
        })
    }
}

/// A logged exercise session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[validate(length(min = 1, message = "Activity type is required"))]
    pub activity_type: String,
    #[serde(with = "local_datetime")]
    pub start_time: NaiveDateTime,
    #[serde(with = "local_datetime")]
    pub end_time: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories_burned: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, message = "Distance cannot be negative"))]
    pub distance_km: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// km per hour
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_pace: Option<f64>,
}

impl Activity {
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Server duration, or whole minutes between start and end
    pub fn effective_duration_minutes(&self) -> f64 {
        self.duration_minutes
            .unwrap_or_else(|| health_metrics::activity_duration_minutes(self.start_time, self.end_time))
    }
}

/// Aggregated totals for a seven-day window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyStats {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_steps: u64,
    pub total_calories_burned: f64,
    pub total_calories_consumed: f64,
    pub net_calories: f64,
    pub total_distance_km: f64,
    pub total_active_minutes: u64,
    pub average_steps_per_day: f64,
    pub average_active_minutes_per_day: f64,
}

/// Server-derived energy figures for a user
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub bmr: f64,
    pub tdee: f64,
    pub bmi: f64,
    pub age: u32,
}

/// ISO local date-time with optional seconds
///
/// The backend omits seconds when they are zero (`2024-01-15T10:00`), and
/// the activity form submits minute precision.
pub mod local_datetime {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::errors::ParseError;

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
    const ACCEPTED: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];

    pub fn parse(value: &str) -> Result<NaiveDateTime, ParseError> {
        let value = value.trim();
        ACCEPTED
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
            .ok_or_else(|| ParseError::DateTime(value.to_string()))
    }

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }
}
