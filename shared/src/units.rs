//! Unit conversions for profile display
//!
//! Profiles are stored in centimeters and kilograms. These helpers produce
//! the imperial figures shown next to them.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::ParseError;

/// Centimeters per foot
pub const CM_PER_FOOT: f64 = 30.48;

/// Pounds per kilogram
pub const LB_PER_KG: f64 = 2.20462;

// ============================================================================
// Height
// ============================================================================

/// Height split into whole feet and inches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeetInches {
    pub feet: u32,
    pub inches: u32,
}

impl FeetInches {
    /// `floor(cm / 30.48)` feet, then the whole inches of the remainder
    pub fn from_cm(cm: f64) -> Self {
        let total_feet = (cm / CM_PER_FOOT).max(0.0);
        let feet = total_feet.floor();
        let inches = ((total_feet - feet) * 12.0).floor();
        Self {
            feet: feet as u32,
            inches: inches as u32,
        }
    }

    pub fn to_cm(&self) -> f64 {
        f64::from(self.feet) * CM_PER_FOOT + f64::from(self.inches) * CM_PER_FOOT / 12.0
    }
}

impl fmt::Display for FeetInches {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ft {} in", self.feet, self.inches)
    }
}

// ============================================================================
// Weight
// ============================================================================

/// Kilograms to pounds, rounded to one decimal place
pub fn kg_to_lb(kg: f64) -> f64 {
    (kg * LB_PER_KG * 10.0).round() / 10.0
}

// ============================================================================
// Unit System Preference
// ============================================================================

/// Which units the profile view leads with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    /// Height in the preferred system, e.g. `182 cm` or `5 ft 11 in`
    pub fn format_height(&self, height_cm: f64) -> String {
        match self {
            UnitSystem::Metric => format!("{} cm", height_cm),
            UnitSystem::Imperial => FeetInches::from_cm(height_cm).to_string(),
        }
    }

    /// Weight in the preferred system, e.g. `80 kg` or `176.4 lb`
    pub fn format_weight(&self, weight_kg: f64) -> String {
        match self {
            UnitSystem::Metric => format!("{} kg", weight_kg),
            UnitSystem::Imperial => format!("{:.1} lb", kg_to_lb(weight_kg)),
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitSystem::Metric => f.write_str("metric"),
            UnitSystem::Imperial => f.write_str("imperial"),
        }
    }
}

impl std::str::FromStr for UnitSystem {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "metric" | "si" => Ok(UnitSystem::Metric),
            "imperial" | "us" => Ok(UnitSystem::Imperial),
            _ => Err(ParseError::UnitSystem(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(182.0, 5, 11)]
    #[case(175.0, 5, 8)]
    #[case(160.0, 5, 2)]
    #[case(190.0, 6, 2)]
    #[case(200.0, 6, 6)]
    fn test_feet_inches_from_cm(#[case] cm: f64, #[case] feet: u32, #[case] inches: u32) {
        assert_eq!(FeetInches::from_cm(cm), FeetInches { feet, inches });
    }

    #[test]
    fn test_feet_inches_display() {
        assert_eq!(FeetInches::from_cm(182.0).to_string(), "5 ft 11 in");
    }

    #[test]
    fn test_kg_to_lb() {
        assert_eq!(kg_to_lb(80.0), 176.4);
        assert_eq!(kg_to_lb(70.0), 154.3);
        assert_eq!(kg_to_lb(0.0), 0.0);
    }

    #[test]
    fn test_unit_system_formatting() {
        assert_eq!(UnitSystem::Metric.format_height(182.0), "182 cm");
        assert_eq!(UnitSystem::Imperial.format_height(182.0), "5 ft 11 in");
        assert_eq!(UnitSystem::Metric.format_weight(80.0), "80 kg");
        assert_eq!(UnitSystem::Imperial.format_weight(80.0), "176.4 lb");
        assert_eq!("Imperial".parse::<UnitSystem>().unwrap(), UnitSystem::Imperial);
        assert!("cubits".parse::<UnitSystem>().is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: inches never reach a full foot
        #[test]
        fn prop_inches_below_twelve(cm in 0.0f64..300.0) {
            let height = FeetInches::from_cm(cm);
            prop_assert!(height.inches < 12);
            prop_assert!(height.to_cm() <= cm + 1e-9);
            prop_assert!(cm - height.to_cm() < CM_PER_FOOT / 12.0 + 1e-9);
        }
    }
}
