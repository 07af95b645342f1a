//! Web server for browser-based diagnosis.
//!
//! Serves a single-page form plus a JSON API:
//!
//! - `GET /`: symptom entry page
//! - `POST /diagnose`: `{"symptoms": [...], "mode": "forward"|"backward", "goal": "..."}`
//! - `GET /api/diseases`: the loaded knowledge base
//!
//! ## Usage
//!
//! ```text
//! symptom-solver serve --port 8000
//! ```
//!
//! Then open <http://localhost:8000> in your browser.

pub mod server;
