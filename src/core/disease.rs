use serde::{Deserialize, Serialize};

use crate::core::types::SymptomId;

/// A disease definition from the knowledge base
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseRecord {
    /// Unique display name, also the backward-chaining goal key
    pub name: String,

    /// Symptoms expected for this disease (full weight)
    pub required: Vec<SymptomId>,

    /// Supporting symptoms (half weight)
    #[serde(default)]
    pub optional: Vec<SymptomId>,

    /// Symptoms that rule this disease out entirely
    #[serde(default)]
    pub exclusions: Vec<SymptomId>,
}

impl DiseaseRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: Vec::new(),
            optional: Vec::new(),
            exclusions: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_required(mut self, symptoms: &[&str]) -> Self {
        self.required = symptoms.iter().map(|s| SymptomId::new(*s)).collect();
        self
    }

    #[must_use]
    pub fn with_optional(mut self, symptoms: &[&str]) -> Self {
        self.optional = symptoms.iter().map(|s| SymptomId::new(*s)).collect();
        self
    }

    #[must_use]
    pub fn with_exclusions(mut self, symptoms: &[&str]) -> Self {
        self.exclusions = symptoms.iter().map(|s| SymptomId::new(*s)).collect();
        self
    }

    /// True when the record has no required and no optional symptoms,
    /// which leaves the match score without a denominator.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.required.is_empty() && self.optional.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields_default_to_empty() {
        let json = r#"{"name": "Flu", "required": ["fever", "cough"]}"#;
        let disease: DiseaseRecord = serde_json::from_str(json).unwrap();
        assert_eq!(disease.required.len(), 2);
        assert!(disease.optional.is_empty());
        assert!(disease.exclusions.is_empty());
    }

    #[test]
    fn test_is_degenerate() {
        assert!(DiseaseRecord::new("Nothing").is_degenerate());
        assert!(!DiseaseRecord::new("Rash").with_optional(&["rash"]).is_degenerate());
        assert!(!DiseaseRecord::new("Flu").with_required(&["fever"]).is_degenerate());
    }
}
