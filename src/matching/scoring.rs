use serde::{Deserialize, Serialize};

use crate::core::disease::DiseaseRecord;
use crate::core::types::{SymptomId, SymptomSet};

/// Weight of a met optional symptom relative to a required one
pub const OPTIONAL_WEIGHT: f64 = 0.5;

/// Safely convert usize to f64 for ratio calculations
///
/// Symptom lists are tiny, far inside the range f64 represents exactly.
#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Per-disease breakdown of which symptoms matched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchTrace {
    /// Required symptoms the user reported, in declaration order
    pub met_required: Vec<SymptomId>,

    /// Required symptoms the user did not report
    pub missing_required: Vec<SymptomId>,

    /// Optional symptoms the user reported
    pub met_optional: Vec<SymptomId>,

    /// Score as a percentage rounded to two decimals, for display
    pub score: f64,
}

/// Either the full trace or the reason no score was produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reasoning {
    Trace(MatchTrace),
    Absent(String),
}

impl Reasoning {
    #[must_use]
    pub fn trace(&self) -> Option<&MatchTrace> {
        match self {
            Self::Trace(trace) => Some(trace),
            Self::Absent(_) => None,
        }
    }
}

impl std::fmt::Display for Reasoning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace(trace) => write!(
                f,
                "met required [{}], missing required [{}], met optional [{}], score {:.2}%",
                join(&trace.met_required),
                join(&trace.missing_required),
                join(&trace.met_optional),
                trace.score
            ),
            Self::Absent(reason) => write!(f, "{reason}"),
        }
    }
}

pub(crate) fn join(symptoms: &[SymptomId]) -> String {
    symptoms
        .iter()
        .map(SymptomId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Outcome of evaluating one disease against a user's symptoms
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    /// Raw score in [0, 1]; `None` when the disease was ruled out
    pub score: Option<f64>,

    pub reasoning: Reasoning,
}

impl MatchResult {
    fn absent(reason: String) -> Self {
        Self {
            score: None,
            reasoning: Reasoning::Absent(reason),
        }
    }

    #[must_use]
    pub fn is_excluded(&self) -> bool {
        self.score.is_none()
    }
}

/// Score a disease against the user's normalized symptoms.
///
/// Exclusions are a hard veto: the first excluded symptom present (in the
/// disease's declaration order) short-circuits with no score. Otherwise the
/// score is the weighted coverage
/// `(met_required + 0.5 * met_optional) / (required + 0.5 * optional)`.
///
/// A record with no required and no optional symptoms cannot be scored and is
/// treated as non-matching. [`KnowledgeBase`](crate::KnowledgeBase) rejects
/// such records at load time, so this only applies to hand-built records.
#[must_use]
pub fn evaluate(disease: &DiseaseRecord, user_symptoms: &SymptomSet) -> MatchResult {
    if let Some(excluded) = disease
        .exclusions
        .iter()
        .find(|s| user_symptoms.contains(*s))
    {
        return MatchResult::absent(format!("Excluded because user has {excluded}."));
    }

    if disease.is_degenerate() {
        return MatchResult::absent(format!("No symptoms defined for {}.", disease.name));
    }

    let (met_required, missing_required): (Vec<SymptomId>, Vec<SymptomId>) = disease
        .required
        .iter()
        .cloned()
        .partition(|s| user_symptoms.contains(s));

    let met_optional: Vec<SymptomId> = disease
        .optional
        .iter()
        .filter(|s| user_symptoms.contains(*s))
        .cloned()
        .collect();

    let numerator =
        count_to_f64(met_required.len()) + OPTIONAL_WEIGHT * count_to_f64(met_optional.len());
    let denominator = count_to_f64(disease.required.len())
        + OPTIONAL_WEIGHT * count_to_f64(disease.optional.len());
    let score = numerator / denominator;

    MatchResult {
        score: Some(score),
        reasoning: Reasoning::Trace(MatchTrace {
            met_required,
            missing_required,
            met_optional,
            score: round_percentage(score),
        }),
    }
}

/// Express a [0, 1] score as a percentage rounded to two decimal places.
///
/// Rounding goes through decimal formatting, which is exact on the binary
/// value and sends true ties to the even digit (`3.125` becomes `3.12`).
#[must_use]
pub fn round_percentage(score: f64) -> f64 {
    let percentage = score * 100.0;
    format!("{percentage:.2}").parse().unwrap_or(percentage)
}
