//! Centralized validation of diagnosis input.

use thiserror::Error;

use crate::matching::diagnosis::DiagnosisRequest;

/// Maximum number of symptoms accepted in one request (DOS protection)
pub const MAX_SYMPTOMS: usize = 64;

/// Security-related constants for input validation
pub const MAX_SYMPTOM_LENGTH: usize = 128;
pub const MAX_GOAL_LENGTH: usize = 128;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Too many symptoms: {0} exceeds maximum of {MAX_SYMPTOMS}")]
    TooManySymptoms(usize),
    #[error("Symptom too long: exceeds {MAX_SYMPTOM_LENGTH} characters")]
    SymptomTooLong,
    #[error("Goal too long: exceeds {MAX_GOAL_LENGTH} characters")]
    GoalTooLong,
    #[error("Symptom contains control characters")]
    InvalidCharacters,
}

impl ValidationError {
    /// Stable machine-readable name used in API error responses
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::TooManySymptoms(_) => "too_many_symptoms",
            Self::SymptomTooLong => "symptom_too_long",
            Self::GoalTooLong => "goal_too_long",
            Self::InvalidCharacters => "invalid_characters",
        }
    }
}

/// Validate raw symptom strings before normalization.
///
/// # Errors
///
/// Returns an error if there are more than [`MAX_SYMPTOMS`] entries, an
/// entry is longer than [`MAX_SYMPTOM_LENGTH`] characters, or an entry
/// contains control characters other than whitespace.
pub fn validate_symptoms<S: AsRef<str>>(symptoms: &[S]) -> Result<(), ValidationError> {
    if symptoms.len() > MAX_SYMPTOMS {
        return Err(ValidationError::TooManySymptoms(symptoms.len()));
    }

    for symptom in symptoms {
        let symptom = symptom.as_ref();
        if symptom.chars().count() > MAX_SYMPTOM_LENGTH {
            return Err(ValidationError::SymptomTooLong);
        }
        // Tabs and newlines are stripped by normalization
        if symptom.chars().any(|c| c.is_control() && !c.is_whitespace()) {
            return Err(ValidationError::InvalidCharacters);
        }
    }

    Ok(())
}

/// Validate a full request.
///
/// # Errors
///
/// Returns the first limit the request violates.
pub fn validate_request(request: &DiagnosisRequest) -> Result<(), ValidationError> {
    validate_symptoms(&request.symptoms)?;

    if let Some(goal) = &request.goal {
        if goal.chars().count() > MAX_GOAL_LENGTH {
            return Err(ValidationError::GoalTooLong);
        }
    }

    Ok(())
}
