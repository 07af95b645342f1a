//! Symptom matching, scoring and the two chaining strategies.
//!
//! - [`normalize`](normalize::normalize): raw phrases to canonical symptoms
//! - [`evaluate`](scoring::evaluate): score one disease, with exclusion veto and trace
//! - [`forward_chain`](engine::forward_chain): rank every matching disease
//! - [`backward_chain`](engine::backward_chain): test one goal disease
//! - [`diagnose`](engine::diagnose): dispatch a [`DiagnosisRequest`] by mode
//!
//! ## Scoring
//!
//! Each disease scores the weighted fraction of its symptoms the user reported:
//!
//! ```text
//! score = (met_required + 0.5 * met_optional) / (required + 0.5 * optional)
//! ```
//!
//! Any excluded symptom vetoes the disease outright. Forward chaining keeps
//! scores above zero; backward chaining calls a goal possible at 0.5 or more.
//!
//! ## Example
//!
//! ```rust,no_run
//! use symptom_solver::KnowledgeBase;
//! use symptom_solver::matching::engine::{backward_chain, forward_chain};
//!
//! let kb = KnowledgeBase::load_embedded().unwrap();
//!
//! for d in forward_chain(&kb, &["fever", "cough", "tired"]) {
//!     println!("{}: {:.1}%", d.disease, d.score * 100.0);
//! }
//!
//! let flu = backward_chain(&kb, &["fever"], "Flu").unwrap();
//! println!("Flu possible: {}", flu.is_possible);
//! ```

pub mod diagnosis;
pub mod engine;
pub mod normalize;
pub mod scoring;

pub use diagnosis::{Diagnosis, DiagnosisError, DiagnosisRequest};
