use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Maps free-text symptom phrases to canonical symptom identifiers.
///
/// Keys are stored lowercased and trimmed so that lookups only need to clean
/// the query side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct SynonymTable {
    entries: BTreeMap<String, String>,
}

impl SynonymTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a phrase mapping
    pub fn insert(&mut self, phrase: &str, canonical: impl Into<String>) {
        self.entries
            .insert(phrase.trim().to_lowercase(), canonical.into());
    }

    /// Resolve an already cleaned phrase, falling back to the phrase itself.
    #[must_use]
    pub fn resolve<'a>(&'a self, cleaned: &'a str) -> &'a str {
        self.entries.get(cleaned).map_or(cleaned, String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<BTreeMap<String, String>> for SynonymTable {
    fn from(raw: BTreeMap<String, String>) -> Self {
        let mut table = Self::new();
        for (phrase, canonical) in raw {
            table.insert(&phrase, canonical);
        }
        table
    }
}

impl From<SynonymTable> for BTreeMap<String, String> {
    fn from(table: SynonymTable) -> Self {
        table.entries
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for SynonymTable {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (phrase, canonical) in iter {
            table.insert(phrase, canonical);
        }
        table
    }
}
