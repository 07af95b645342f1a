use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::core::disease::DiseaseRecord;
use crate::knowledge::synonyms::SynonymTable;

#[derive(Error, Debug)]
pub enum KnowledgeError {
    #[error("Failed to read knowledge base: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse knowledge base: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Disease at index {0} has an empty name")]
    EmptyDiseaseName(usize),

    #[error("Disease '{0}' has no required or optional symptoms")]
    DegenerateDisease(String),
}

/// Knowledge base version for compatibility checking
pub const KNOWLEDGE_VERSION: &str = "1.0.0";

/// Serializable knowledge base format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    pub diseases: Vec<DiseaseRecord>,
    #[serde(default)]
    pub synonyms: SynonymTable,
}

/// The disease knowledge base. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    diseases: Vec<DiseaseRecord>,
    synonyms: SynonymTable,
}

impl KnowledgeBase {
    /// Build a knowledge base, rejecting records the scorer cannot handle.
    ///
    /// # Errors
    ///
    /// Returns an error if a disease has a blank name or has neither
    /// required nor optional symptoms.
    pub fn new(
        diseases: Vec<DiseaseRecord>,
        synonyms: SynonymTable,
    ) -> Result<Self, KnowledgeError> {
        for (i, disease) in diseases.iter().enumerate() {
            if disease.name.trim().is_empty() {
                return Err(KnowledgeError::EmptyDiseaseName(i));
            }
            if disease.is_degenerate() {
                return Err(KnowledgeError::DegenerateDisease(disease.name.clone()));
            }
        }

        Ok(Self { diseases, synonyms })
    }

    /// Load the embedded default knowledge base
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded file fails to parse or validate.
    pub fn load_embedded() -> Result<Self, KnowledgeError> {
        // Embedded at compile time, validated by build.rs
        const EMBEDDED_KB: &str = include_str!("../../knowledge/medical_kb.json");
        Self::from_json(EMBEDDED_KB)
    }

    /// Load a knowledge base from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load_from_file(path: &Path) -> Result<Self, KnowledgeError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load from a file when a path is given, otherwise the embedded default
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails.
    pub fn load(path: Option<&Path>) -> Result<Self, KnowledgeError> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Self::load_embedded(),
        }
    }

    /// Parse a knowledge base from a JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a record is invalid.
    pub fn from_json(json: &str) -> Result<Self, KnowledgeError> {
        let data: KnowledgeData = serde_json::from_str(json)?;

        // Version check (warn but don't fail)
        if let Some(version) = &data.version {
            if version != KNOWLEDGE_VERSION {
                tracing::warn!(
                    "Knowledge base version mismatch (expected {}, found {})",
                    KNOWLEDGE_VERSION,
                    version
                );
            }
        }

        let kb = Self::new(data.diseases, data.synonyms)?;
        tracing::debug!(
            "Loaded knowledge base with {} diseases and {} synonyms",
            kb.len(),
            kb.synonyms.len()
        );
        Ok(kb)
    }

    /// Export the knowledge base to JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, KnowledgeError> {
        let data = KnowledgeData {
            version: Some(KNOWLEDGE_VERSION.to_string()),
            created_at: Some(chrono::Utc::now().to_rfc3339()),
            diseases: self.diseases.clone(),
            synonyms: self.synonyms.clone(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }

    /// Find a disease by exact name. The first record wins on duplicates.
    pub fn get(&self, name: &str) -> Option<&DiseaseRecord> {
        self.diseases.iter().find(|d| d.name == name)
    }

    pub fn diseases(&self) -> &[DiseaseRecord] {
        &self.diseases
    }

    pub fn synonyms(&self) -> &SynonymTable {
        &self.synonyms
    }

    /// Number of diseases in the knowledge base
    pub fn len(&self) -> usize {
        self.diseases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diseases.is_empty()
    }
}
