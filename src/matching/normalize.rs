use crate::core::types::{SymptomId, SymptomSet};
use crate::knowledge::synonyms::SynonymTable;

/// Convert one raw symptom phrase to its canonical identifier.
///
/// The phrase is lowercased and trimmed, resolved through the synonym table
/// (unknown phrases pass through), then spaces become underscores.
#[must_use]
pub fn normalize_symptom(raw: &str, synonyms: &SynonymTable) -> SymptomId {
    let cleaned = raw.trim().to_lowercase();
    SymptomId(synonyms.resolve(&cleaned).replace(' ', "_"))
}

/// Normalize raw user input into a deduplicated symptom set.
pub fn normalize<S: AsRef<str>>(raw: &[S], synonyms: &SynonymTable) -> SymptomSet {
    raw.iter()
        .map(|s| normalize_symptom(s.as_ref(), synonyms))
        .collect()
}
