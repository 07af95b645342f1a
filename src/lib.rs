//! # symptom-solver
//!
//! A library for matching reported symptoms against a knowledge base of
//! disease definitions.
//!
//! Each disease lists the symptoms it requires, optional symptoms that count
//! half as much, and exclusions that rule it out entirely. User input is
//! free text: phrases are normalized through a synonym table before matching,
//! so `"High Temperature"` and `"fever"` land on the same symptom.
//!
//! ## Features
//!
//! - **Forward chaining**: rank every disease the symptoms support
//! - **Backward chaining**: test whether one named disease is possible
//! - **Exclusion veto**: a single excluding symptom disqualifies a disease
//! - **Reasoning traces**: which symptoms were met, missing, and optional
//!
//! ## Example
//!
//! ```rust,no_run
//! use symptom_solver::KnowledgeBase;
//! use symptom_solver::matching::engine::forward_chain;
//!
//! // Load the embedded knowledge base
//! let kb = KnowledgeBase::load_embedded().unwrap();
//!
//! let results = forward_chain(&kb, &["Fever", "cough", "tired"]);
//! for r in results {
//!     println!("{}: {:.1}%", r.disease, r.score * 100.0);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`knowledge`]: Knowledge base storage and synonym table
//! - [`core`]: Core data types for symptoms and diseases
//! - [`matching`]: Normalization, scoring, and chaining
//! - [`cli`]: Command-line interface implementation
//! - [`web`]: Web server for browser-based diagnosis

pub mod cli;
pub mod core;
pub mod knowledge;
pub mod matching;
pub mod utils;
pub mod web;

// Re-export commonly used types for convenience
pub use crate::core::disease::DiseaseRecord;
pub use crate::core::types::*;
pub use crate::knowledge::store::KnowledgeBase;
pub use crate::knowledge::synonyms::SynonymTable;
pub use crate::matching::scoring::{MatchResult, MatchTrace, Reasoning};
