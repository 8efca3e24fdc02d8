//! Fitness profile domain model.
//!
//! # Responsibility
//! - Define the user facts the coaching prompt is assembled from.
//! - Validate ranges before any persistence or prompt rendering.
//!
//! # Invariants
//! - `display_name` is non-empty after trim.
//! - Numeric fields stay inside the ranges declared below.
//! - Deserialization rejects invalid profiles instead of masking them.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::ops::RangeInclusive;

pub const AGE_YEARS_RANGE: RangeInclusive<u32> = 13..=100;
pub const HEIGHT_CM_RANGE: RangeInclusive<u32> = 100..=250;
pub const WEIGHT_KG_RANGE: RangeInclusive<u32> = 30..=300;
pub const TRAINING_DAYS_RANGE: RangeInclusive<u32> = 1..=7;
pub const SESSION_MINUTES_RANGE: RangeInclusive<u32> = 10..=240;

/// Primary outcome the user is training for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessGoal {
    LoseFat,
    BuildMuscle,
    ImproveEndurance,
    GeneralFitness,
}

impl FitnessGoal {
    /// Human-readable phrase used in prompt text.
    pub fn describe(self) -> &'static str {
        match self {
            Self::LoseFat => "lose body fat while keeping muscle",
            Self::BuildMuscle => "build muscle and strength",
            Self::ImproveEndurance => "improve cardiovascular endurance",
            Self::GeneralFitness => "improve general fitness and health",
        }
    }
}

/// Self-reported training background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl ExperienceLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

/// Validation failures for [`FitnessProfile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileValidationError {
    EmptyDisplayName,
    OutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },
}

impl Display for ProfileValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDisplayName => write!(f, "display_name cannot be empty"),
            Self::OutOfRange {
                field,
                value,
                min,
                max,
            } => write!(f, "{field} ({value}) must be within {min}..={max}"),
        }
    }
}

impl Error for ProfileValidationError {}

/// User facts rendered into the coaching prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawFitnessProfile")]
pub struct FitnessProfile {
    pub display_name: String,
    pub age_years: u32,
    pub height_cm: u32,
    pub weight_kg: u32,
    pub goal: FitnessGoal,
    pub experience: ExperienceLevel,
    pub training_days_per_week: u32,
    pub session_minutes: u32,
    /// Available equipment; empty means bodyweight only.
    #[serde(default)]
    pub equipment: Vec<String>,
    /// Injuries or medical constraints the coach must respect.
    #[serde(default)]
    pub limitations: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Deserialize)]
struct RawFitnessProfile {
    display_name: String,
    age_years: u32,
    height_cm: u32,
    weight_kg: u32,
    goal: FitnessGoal,
    experience: ExperienceLevel,
    training_days_per_week: u32,
    session_minutes: u32,
    #[serde(default)]
    equipment: Vec<String>,
    #[serde(default)]
    limitations: Option<String>,
    #[serde(default)]
    notes: Option<String>,
}

impl TryFrom<RawFitnessProfile> for FitnessProfile {
    type Error = ProfileValidationError;

    fn try_from(raw: RawFitnessProfile) -> Result<Self, Self::Error> {
        let profile = Self {
            display_name: raw.display_name,
            age_years: raw.age_years,
            height_cm: raw.height_cm,
            weight_kg: raw.weight_kg,
            goal: raw.goal,
            experience: raw.experience,
            training_days_per_week: raw.training_days_per_week,
            session_minutes: raw.session_minutes,
            equipment: raw.equipment,
            limitations: raw.limitations,
            notes: raw.notes,
        };
        profile.validate()?;
        Ok(profile)
    }
}

impl FitnessProfile {
    /// Checks every field invariant.
    ///
    /// # Errors
    /// - `EmptyDisplayName` when the trimmed name is empty.
    /// - `OutOfRange` for the first numeric field outside its range.
    pub fn validate(&self) -> Result<(), ProfileValidationError> {
        if self.display_name.trim().is_empty() {
            return Err(ProfileValidationError::EmptyDisplayName);
        }
        check_range("age_years", self.age_years, &AGE_YEARS_RANGE)?;
        check_range("height_cm", self.height_cm, &HEIGHT_CM_RANGE)?;
        check_range("weight_kg", self.weight_kg, &WEIGHT_KG_RANGE)?;
        check_range(
            "training_days_per_week",
            self.training_days_per_week,
            &TRAINING_DAYS_RANGE,
        )?;
        check_range(
            "session_minutes",
            self.session_minutes,
            &SESSION_MINUTES_RANGE,
        )?;
        Ok(())
    }

    /// Returns a copy with trimmed text and de-duplicated equipment.
    ///
    /// Equipment is compared case-insensitively; the first spelling wins.
    /// Blank optional text collapses to `None`.
    pub fn normalized(&self) -> Self {
        let mut equipment: Vec<String> = Vec::with_capacity(self.equipment.len());
        for item in &self.equipment {
            let trimmed = item.trim();
            if trimmed.is_empty() {
                continue;
            }
            if equipment
                .iter()
                .any(|existing| existing.eq_ignore_ascii_case(trimmed))
            {
                continue;
            }
            equipment.push(trimmed.to_string());
        }

        Self {
            display_name: self.display_name.trim().to_string(),
            equipment,
            limitations: normalize_optional_text(self.limitations.as_deref()),
            notes: normalize_optional_text(self.notes.as_deref()),
            ..self.clone()
        }
    }

    /// Body-mass index rounded to one decimal place.
    pub fn bmi(&self) -> f64 {
        let height_m = f64::from(self.height_cm) / 100.0;
        let bmi = f64::from(self.weight_kg) / (height_m * height_m);
        (bmi * 10.0).round() / 10.0
    }
}

fn check_range(
    field: &'static str,
    value: u32,
    range: &RangeInclusive<u32>,
) -> Result<(), ProfileValidationError> {
    if range.contains(&value) {
        return Ok(());
    }
    Err(ProfileValidationError::OutOfRange {
        field,
        value,
        min: *range.start(),
        max: *range.end(),
    })
}

fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}
