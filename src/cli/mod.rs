//! Command-line interface for symptom-solver.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **diagnose**: Rank diseases for a set of symptoms, or test one goal disease
//! - **knowledge**: List, show, or export the knowledge base
//! - **serve**: Start the web interface and JSON API
//!
//! ## Usage
//!
//! ```text
//! # Rank every disease consistent with the symptoms
//! symptom-solver diagnose fever cough "high temperature"
//!
//! # Check one disease
//! symptom-solver diagnose fever cough --mode backward --goal Flu
//!
//! # Read symptoms from stdin, JSON output for scripting
//! echo "fever, sore throat" | symptom-solver diagnose - --format json
//!
//! # Start web UI
//! symptom-solver serve --port 8000 --open
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod diagnose;
pub mod knowledge;

#[derive(Parser)]
#[command(name = "symptom-solver")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Match reported symptoms against a disease knowledge base")]
#[command(
    long_about = "symptom-solver scores reported symptoms against a knowledge base of disease definitions.\n\nEach disease lists required symptoms, optional symptoms (worth half), and exclusions that rule it out. Two modes are available:\n- Forward chaining: rank every disease the symptoms support\n- Backward chaining: check whether one named disease is possible (score >= 50%)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Diagnose a set of symptoms
    Diagnose(diagnose::DiagnoseArgs),

    /// Inspect the disease knowledge base
    Knowledge(knowledge::KnowledgeArgs),

    /// Start the web server
    Serve(ServeArgs),
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "8000")]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: String,

    /// Open browser automatically
    #[arg(long)]
    pub open: bool,

    /// Path to custom knowledge base file
    #[arg(long)]
    pub knowledge_base: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
