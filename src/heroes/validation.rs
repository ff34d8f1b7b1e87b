//! Field validators for heroes, powers and hero powers.
//!
//! Values that pass validation are wrapped in types (`Strength`, `Description`)
//! that cannot be built any other way, so everything handed to the repository
//! has already been checked.

use serde::Serialize;
use std::{fmt, str::FromStr};
use thiserror::Error;
use utoipa::ToSchema;

pub const DESCRIPTION_MIN_LEN: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Strength must be one of 'Strong', 'Weak', or 'Average'.")]
    Strength,
    #[error("Description must be at least 20 characters long.")]
    Description,
}

/// Closed set of strength ratings a hero can hold for a power.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum Strength {
    Strong,
    Weak,
    Average,
}

impl Strength {
    /// Canonical string stored in `hero_powers.strength` and returned in payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strong => "Strong",
            Self::Weak => "Weak",
            Self::Average => "Average",
        }
    }
}

impl FromStr for Strength {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        validate_strength(value)
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A power description of at least `DESCRIPTION_MIN_LEN` characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(transparent)]
pub struct Description(String);

impl Description {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Description {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate_description(value)
    }
}

impl TryFrom<&str> for Description {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        validate_description(value.to_string())
    }
}

/// Accepts exactly `Strong`, `Weak` or `Average` (case-sensitive).
///
/// # Errors
/// Returns `ValidationError::Strength` for any other value.
pub fn validate_strength(value: &str) -> Result<Strength, ValidationError> {
    match value {
        "Strong" => Ok(Strength::Strong),
        "Weak" => Ok(Strength::Weak),
        "Average" => Ok(Strength::Average),
        _ => Err(ValidationError::Strength),
    }
}

/// Length is counted in characters, not bytes.
///
/// # Errors
/// Returns `ValidationError::Description` when shorter than `DESCRIPTION_MIN_LEN`.
pub fn validate_description(value: String) -> Result<Description, ValidationError> {
    if value.chars().count() < DESCRIPTION_MIN_LEN {
        return Err(ValidationError::Description);
    }
    Ok(Description(value))
}
