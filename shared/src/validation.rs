//! Pre-submit form checks
//!
//! Mirrors the constraints the entry forms place on their inputs (required
//! fields, email type, min/max attributes) using the `validator` derives on
//! the entity types. Anything deeper is left to the backend.

use validator::{Validate, ValidationErrors};

use crate::errors::ValidationError;

/// Run the derived checks and flatten failures into field/message pairs,
/// ordered by field name
pub fn check<T: Validate>(value: &T) -> Result<(), Vec<ValidationError>> {
    value.validate().map_err(|errors| flatten(&errors))
}

fn flatten(errors: &ValidationErrors) -> Vec<ValidationError> {
    let mut flattened: Vec<ValidationError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, failures)| {
            failures.iter().map(move |failure| {
                let message = failure
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("failed {} check", failure.code));
                ValidationError::new(field.to_string(), message)
            })
        })
        .collect();
    flattened.sort_by(|a, b| a.field.cmp(&b.field));
    flattened
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health_metrics::Gender;
    use crate::models::{Activity, DailyMetrics, UserProfile};
    use chrono::NaiveDate;

    fn user() -> UserProfile {
        UserProfile {
            id: None,
            name: "Sam".to_string(),
            email: "sam@example.com".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1985, 1, 20).unwrap(),
            gender: Gender::Other,
            height_cm: 170.0,
            weight_kg: 70.0,
            activity_level: None,
        }
    }

    #[test]
    fn test_valid_user_passes() {
        assert!(check(&user()).is_ok());
    }

    #[test]
    fn test_user_limits_match_form() {
        let bad = UserProfile {
            name: String::new(),
            email: "not-an-email".to_string(),
            height_cm: 40.0,
            weight_kg: 501.0,
            ..user()
        };
        let errors = check(&bad).unwrap_err();
        let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Email should be valid",
                "Height must be between 50 and 300 cm",
                "Name is required",
                "Weight must be between 20 and 500 kg",
            ]
        );
    }

    #[test]
    fn test_metrics_reject_negative_values() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert!(check(&DailyMetrics::zeroed(date)).is_ok());

        let bad = DailyMetrics {
            sleep_hours: Some(-1.0),
            ..DailyMetrics::zeroed(date)
        };
        let errors = check(&bad).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Sleep hours cannot be negative");
    }

    #[test]
    fn test_activity_requires_type() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(7, 0, 0)
            .unwrap();
        let activity = Activity {
            id: None,
            activity_type: String::new(),
            start_time: start,
            end_time: start,
            duration_minutes: None,
            calories_burned: None,
            distance_km: Some(-2.0),
            notes: None,
            average_pace: None,
        };
        let errors = check(&activity).unwrap_err();
        let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["Activity type is required", "Distance cannot be negative"]);
    }
}
