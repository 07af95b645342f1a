use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::types::Mode;
use crate::matching::scoring::{MatchTrace, Reasoning};

/// Method label attached to every forward result
pub const FORWARD_METHOD: &str = "Forward Chaining";

/// Message carried by a backward result whose goal is not in the knowledge base
pub const GOAL_NOT_FOUND_MESSAGE: &str = "Disease not in KB";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiagnosisError {
    #[error("Disease '{0}' not found in knowledge base")]
    GoalNotFound(String),

    #[error("Goal required for backward")]
    MissingGoal,
}

impl DiagnosisError {
    /// Stable machine-readable name used in API error responses
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::GoalNotFound(_) => "goal_not_found",
            Self::MissingGoal => "missing_goal",
        }
    }
}

/// A disease that survived forward chaining
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForwardDiagnosis {
    pub disease: String,

    /// Raw score in (0, 1], used for ranking
    pub score: f64,

    pub trace: MatchTrace,

    pub method: String,
}

/// Verdict on a single goal disease
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackwardDiagnosis {
    pub disease: String,

    /// Score present and at or above the backward threshold
    pub is_possible: bool,

    /// Full trace, or the reason the disease was ruled out
    pub trace: Reasoning,

    pub method: String,
}

impl BackwardDiagnosis {
    #[must_use]
    pub fn method_for(goal: &str) -> String {
        format!("Backward Chaining (Goal: {goal})")
    }
}

/// One entry in a diagnosis response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Diagnosis {
    Forward(ForwardDiagnosis),
    Backward(BackwardDiagnosis),
    NotFound { error: String },
}

impl Diagnosis {
    #[must_use]
    pub fn not_found() -> Self {
        Self::NotFound {
            error: GOAL_NOT_FOUND_MESSAGE.to_string(),
        }
    }
}

/// A diagnosis query as received from the CLI or HTTP API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisRequest {
    pub symptoms: Vec<String>,

    #[serde(default)]
    pub mode: Mode,

    #[serde(default)]
    pub goal: Option<String>,
}

impl DiagnosisRequest {
    pub fn forward(symptoms: Vec<String>) -> Self {
        Self {
            symptoms,
            mode: Mode::Forward,
            goal: None,
        }
    }

    pub fn backward(symptoms: Vec<String>, goal: impl Into<String>) -> Self {
        Self {
            symptoms,
            mode: Mode::Backward,
            goal: Some(goal.into()),
        }
    }
}
