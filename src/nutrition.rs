//! Body-metric formulas backing the health analysis endpoint
//!
//! BMR uses the Mifflin-St Jeor equation; TDEE applies a fixed activity
//! multiplier; BMI is reported to one decimal place.

use serde::{Deserialize, Serialize};
use std::fmt;

/// User gender, as the profile form reports it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Male profile (+5 BMR offset)
    Male,
    /// Female profile (-161 BMR offset)
    Female,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Male => write!(f, "male"),
            Self::Female => write!(f, "female"),
        }
    }
}

/// Self-reported activity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityLevel {
    /// Little or no exercise (multiplier 1.2)
    Sedentary,
    /// Moderate exercise (multiplier 1.55)
    Moderate,
    /// Hard exercise most days (multiplier 1.9)
    Active,
}

impl ActivityLevel {
    /// TDEE multiplier applied to the BMR
    pub fn multiplier(&self) -> f64 {
        match self {
            Self::Sedentary => 1.2,
            Self::Moderate => 1.55,
            Self::Active => 1.9,
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sedentary => write!(f, "Sedentary"),
            Self::Moderate => write!(f, "Moderate"),
            Self::Active => write!(f, "Active"),
        }
    }
}

/// A user's body profile as submitted to the health analysis endpoint
#[derive(Debug, Clone, Copy)]
pub struct BodyProfile {
    /// Gender
    pub gender: Gender,
    /// Age in years
    pub age_years: f64,
    /// Weight in kilograms
    pub weight_kg: f64,
    /// Height in centimeters
    pub height_cm: f64,
    /// Activity level
    pub activity: ActivityLevel,
}

/// Computed health metrics for a body profile
///
/// # Examples
///
/// ```
/// use namunamu::nutrition::{ActivityLevel, BodyProfile, Gender, HealthMetrics};
///
/// let profile = BodyProfile {
///     gender: Gender::Male,
///     age_years: 30.0,
///     weight_kg: 70.0,
///     height_cm: 175.0,
///     activity: ActivityLevel::Moderate,
/// };
/// let metrics = HealthMetrics::for_profile(&profile);
/// assert_eq!(metrics.tdee, 2556);
/// assert_eq!(metrics.bmi, 22.9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthMetrics {
    /// Basal metabolic rate, kcal/day
    pub bmr: f64,
    /// Total daily energy expenditure (maintenance calories), rounded
    pub tdee: i64,
    /// Body mass index, one decimal place
    pub bmi: f64,
}

impl HealthMetrics {
    /// Compute metrics for a profile
    pub fn for_profile(profile: &BodyProfile) -> Self {
        let offset = match profile.gender {
            Gender::Male => 5.0,
            Gender::Female => -161.0,
        };
        let bmr = (10.0 * profile.weight_kg) + (6.25 * profile.height_cm)
            - (5.0 * profile.age_years)
            + offset;

        let tdee = (bmr * profile.activity.multiplier()).round() as i64;

        let height_m = profile.height_cm / 100.0;
        let bmi_raw = profile.weight_kg / (height_m * height_m);
        let bmi = (bmi_raw * 10.0).round() / 10.0;

        Self { bmr, tdee, bmi }
    }
}
