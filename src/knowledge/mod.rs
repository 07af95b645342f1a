//! Disease knowledge base storage.
//!
//! The knowledge base holds disease definitions and a synonym table that maps
//! free-text phrases to canonical symptoms. A default knowledge base is
//! compiled into the binary; custom ones can be loaded from JSON files with
//! the same shape:
//!
//! ```json
//! {
//!   "diseases": [
//!     {"name": "Flu", "required": ["fever", "cough"], "optional": ["fatigue"], "exclusions": []}
//!   ],
//!   "synonyms": {"high temperature": "fever"}
//! }
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use symptom_solver::KnowledgeBase;
//! use std::path::Path;
//!
//! let kb = KnowledgeBase::load_embedded().unwrap();
//! for disease in kb.diseases() {
//!     println!("{}", disease.name);
//! }
//!
//! let custom = KnowledgeBase::load_from_file(Path::new("my_kb.json")).unwrap();
//! ```
//!
//! Loading rejects any disease with neither required nor optional symptoms,
//! so every disease in a [`KnowledgeBase`](store::KnowledgeBase) has a
//! well-defined score.

pub mod store;
pub mod synonyms;
