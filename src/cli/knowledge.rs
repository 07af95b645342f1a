use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::OutputFormat;
use crate::core::disease::DiseaseRecord;
use crate::knowledge::store::KnowledgeBase;
use crate::matching::scoring::join;

#[derive(Args)]
pub struct KnowledgeArgs {
    #[command(subcommand)]
    pub command: KnowledgeCommands,
}

#[derive(Subcommand)]
pub enum KnowledgeCommands {
    /// List all diseases in the knowledge base
    List {
        /// Path to custom knowledge base file
        #[arg(long)]
        knowledge_base: Option<PathBuf>,

        /// Only diseases involving this symptom (canonical form, e.g. "sore_throat")
        #[arg(long)]
        symptom: Option<String>,
    },

    /// Show details of a specific disease
    Show {
        /// Disease name (exact match)
        #[arg(required = true)]
        name: String,

        /// Path to custom knowledge base file
        #[arg(long)]
        knowledge_base: Option<PathBuf>,
    },

    /// List the synonym table
    Synonyms {
        /// Path to custom knowledge base file
        #[arg(long)]
        knowledge_base: Option<PathBuf>,
    },

    /// Export the knowledge base to a file
    Export {
        /// Output file path
        #[arg(required = true)]
        output: PathBuf,

        /// Path to custom knowledge base file to export (defaults to embedded)
        #[arg(long)]
        knowledge_base: Option<PathBuf>,
    },
}

/// Execute knowledge subcommand
///
/// # Errors
///
/// Returns an error if the knowledge base cannot be loaded, a named disease
/// does not exist, or output cannot be written.
pub fn run(args: KnowledgeArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    match args.command {
        KnowledgeCommands::List {
            knowledge_base,
            symptom,
        } => run_list(knowledge_base, symptom.as_deref(), format, verbose),
        KnowledgeCommands::Show {
            name,
            knowledge_base,
        } => run_show(&name, knowledge_base, format),
        KnowledgeCommands::Synonyms { knowledge_base } => run_synonyms(knowledge_base, format),
        KnowledgeCommands::Export {
            output,
            knowledge_base,
        } => run_export(output, knowledge_base),
    }
}

fn involves(disease: &DiseaseRecord, symptom: &str) -> bool {
    disease
        .required
        .iter()
        .chain(&disease.optional)
        .chain(&disease.exclusions)
        .any(|s| s.as_str() == symptom)
}

fn run_list(
    kb_path: Option<PathBuf>,
    symptom_filter: Option<&str>,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let kb = KnowledgeBase::load(kb_path.as_deref())?;

    if verbose {
        eprintln!("Loaded knowledge base with {} diseases", kb.len());
    }

    let filtered: Vec<&DiseaseRecord> = kb
        .diseases()
        .iter()
        .filter(|d| symptom_filter.map_or(true, |s| involves(d, s)))
        .collect();

    match format {
        OutputFormat::Text => {
            let name_width = filtered
                .iter()
                .map(|d| d.name.len())
                .max()
                .unwrap_or(4)
                .max(4);
            let total_width = name_width + 3 * 11;

            println!("Knowledge Base ({} diseases)\n", filtered.len());
            println!(
                "{:<name_w$} {:>10} {:>10} {:>10}",
                "Name",
                "Required",
                "Optional",
                "Exclusions",
                name_w = name_width,
            );
            println!("{}", "-".repeat(total_width));

            for d in &filtered {
                println!(
                    "{:<name_w$} {:>10} {:>10} {:>10}",
                    d.name,
                    d.required.len(),
                    d.optional.len(),
                    d.exclusions.len(),
                    name_w = name_width,
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&filtered)?);
        }
        OutputFormat::Tsv => {
            println!("name\trequired\toptional\texclusions");
            for d in &filtered {
                println!(
                    "{}\t{}\t{}\t{}",
                    d.name,
                    join(&d.required),
                    join(&d.optional),
                    join(&d.exclusions)
                );
            }
        }
    }

    Ok(())
}

fn run_show(name: &str, kb_path: Option<PathBuf>, format: OutputFormat) -> anyhow::Result<()> {
    let kb = KnowledgeBase::load(kb_path.as_deref())?;

    let disease = kb
        .get(name)
        .ok_or_else(|| anyhow::anyhow!("Disease not found: {name}"))?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(disease)?);
        }
        OutputFormat::Text | OutputFormat::Tsv => {
            println!("{}", disease.name);
            println!("   Required: {}", join(&disease.required));
            if !disease.optional.is_empty() {
                println!("   Optional: {}", join(&disease.optional));
            }
            if !disease.exclusions.is_empty() {
                println!("   Exclusions: {}", join(&disease.exclusions));
            }
        }
    }

    Ok(())
}

fn run_synonyms(kb_path: Option<PathBuf>, format: OutputFormat) -> anyhow::Result<()> {
    let kb = KnowledgeBase::load(kb_path.as_deref())?;
    let synonyms = kb.synonyms();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(synonyms)?);
        }
        OutputFormat::Tsv => {
            println!("phrase\tsymptom");
            for (phrase, symptom) in synonyms.iter() {
                println!("{phrase}\t{symptom}");
            }
        }
        OutputFormat::Text => {
            let width = synonyms.iter().map(|(p, _)| p.len()).max().unwrap_or(6);
            println!("Synonyms ({} phrases)\n", synonyms.len());
            for (phrase, symptom) in synonyms.iter() {
                println!("{phrase:<width$} -> {symptom}");
            }
        }
    }

    Ok(())
}

fn run_export(output: PathBuf, kb_path: Option<PathBuf>) -> anyhow::Result<()> {
    let kb = KnowledgeBase::load(kb_path.as_deref())?;

    let json = kb.to_json()?;
    std::fs::write(&output, json)?;

    println!("Exported {} diseases to {}", kb.len(), output.display());

    Ok(())
}
