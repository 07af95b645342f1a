use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Canonical symptom identifier (lowercase, underscore-separated, e.g. `chest_pain`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SymptomId(pub String);

impl SymptomId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SymptomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SymptomId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Normalized symptoms reported by a user. Order is not significant.
pub type SymptomSet = HashSet<SymptomId>;

/// Chaining strategy for a diagnosis query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Data-driven: rank every disease consistent with the symptoms
    #[default]
    Forward,
    /// Goal-driven: check whether one named disease is supported
    Backward,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Forward => write!(f, "forward"),
            Self::Backward => write!(f, "backward"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_deserializes_lowercase() {
        let mode: Mode = serde_json::from_str("\"backward\"").unwrap();
        assert_eq!(mode, Mode::Backward);
        assert!(serde_json::from_str::<Mode>("\"sideways\"").is_err());
        assert_eq!(Mode::default(), Mode::Forward);
    }

    #[test]
    fn test_symptom_id_serializes_as_string() {
        let json = serde_json::to_string(&SymptomId::new("chest_pain")).unwrap();
        assert_eq!(json, "\"chest_pain\"");
    }
}
