//! Core data types for symptom matching.
//!
//! - [`SymptomId`]: canonical symptom token such as `chest_pain`
//! - [`SymptomSet`]: the normalized symptoms a user reported
//! - [`DiseaseRecord`]: a disease definition with required, optional and excluding symptoms
//! - [`Mode`]: forward or backward chaining
//!
//! ## Symptom Naming
//!
//! All set logic runs on canonical identifiers. Free-text input such as
//! `"Runny Nose "` is lowercased, trimmed, resolved through the knowledge
//! base's synonym table, and has its spaces replaced with underscores
//! (`runny_nose`) before it is compared to any disease.
//!
//! [`SymptomId`]: types::SymptomId
//! [`SymptomSet`]: types::SymptomSet
//! [`DiseaseRecord`]: disease::DiseaseRecord
//! [`Mode`]: types::Mode

pub mod disease;
pub mod types;
