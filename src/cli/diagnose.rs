use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::core::types::Mode;
use crate::knowledge::store::KnowledgeBase;
use crate::matching::diagnosis::{BackwardDiagnosis, Diagnosis, ForwardDiagnosis};
use crate::matching::engine::diagnose;
use crate::matching::scoring::{join, Reasoning};
use crate::matching::DiagnosisRequest;
use crate::utils::validation::validate_request;

#[derive(Args)]
pub struct DiagnoseArgs {
    /// Reported symptoms (free text; quote phrases with spaces)
    /// Use '-' to read symptoms from stdin, one per line or comma-separated
    #[arg(required = true)]
    pub symptoms: Vec<String>,

    /// Chaining mode
    #[arg(short, long, value_enum, default_value = "forward")]
    pub mode: Mode,

    /// Disease to test in backward mode (exact name)
    #[arg(short, long)]
    pub goal: Option<String>,

    /// Number of forward results to show (all by default)
    #[arg(short = 'n', long)]
    pub max_results: Option<usize>,

    /// Path to custom knowledge base file
    #[arg(long)]
    pub knowledge_base: Option<PathBuf>,
}

/// Execute diagnose subcommand
///
/// # Errors
///
/// Returns an error if the knowledge base cannot be loaded, the input is
/// invalid, or backward mode is requested without a goal.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: DiagnoseArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let symptoms = read_symptoms(&args.symptoms)?;

    let kb = KnowledgeBase::load(args.knowledge_base.as_deref())?;
    if verbose {
        eprintln!("Loaded knowledge base with {} diseases", kb.len());
    }

    let request = DiagnosisRequest {
        symptoms,
        mode: args.mode,
        goal: args.goal.clone(),
    };
    validate_request(&request)?;

    let mut results = diagnose(&kb, &request)?;
    if let Some(limit) = args.max_results {
        results.truncate(limit);
    }

    if results.is_empty() {
        eprintln!("No matching diseases found.");
        return Ok(());
    }

    match format {
        OutputFormat::Text => print_text_results(&results, verbose),
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({ "results": results }))?
            );
        }
        OutputFormat::Tsv => print_tsv_results(&results),
    }

    Ok(())
}

/// Expand '-' into symptoms read from stdin
fn read_symptoms(raw: &[String]) -> anyhow::Result<Vec<String>> {
    use std::io::{self, Read};

    if raw.len() == 1 && raw[0] == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        return Ok(split_symptom_text(&buffer));
    }

    Ok(raw.to_vec())
}

fn split_symptom_text(text: &str) -> Vec<String> {
    text.split(['\n', ','])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn print_text_results(results: &[Diagnosis], verbose: bool) {
    for (i, result) in results.iter().enumerate() {
        if i > 0 {
            println!("\n{}", "─".repeat(60));
        }

        match result {
            Diagnosis::Forward(d) => print_forward(i, d, verbose),
            Diagnosis::Backward(d) => print_backward(d),
            Diagnosis::NotFound { error } => println!("\n{error}"),
        }
    }

    println!();
}

fn print_forward(rank: usize, d: &ForwardDiagnosis, verbose: bool) {
    println!("\n#{} {}", rank + 1, d.disease);
    println!("   Score: {:.2}%", d.trace.score);
    println!("   Met required: {}", or_none(&join(&d.trace.met_required)));
    println!(
        "   Missing required: {}",
        or_none(&join(&d.trace.missing_required))
    );
    println!("   Met optional: {}", or_none(&join(&d.trace.met_optional)));

    if verbose {
        println!("   Method: {}", d.method);
    }
}

fn print_backward(d: &BackwardDiagnosis) {
    let verdict = if d.is_possible { "POSSIBLE" } else { "UNLIKELY" };
    println!("\n{} ({verdict})", d.disease);
    println!("   Method: {}", d.method);

    match &d.trace {
        Reasoning::Trace(trace) => {
            println!("   Score: {:.2}%", trace.score);
            println!("   Met required: {}", or_none(&join(&trace.met_required)));
            println!(
                "   Missing required: {}",
                or_none(&join(&trace.missing_required))
            );
            println!("   Met optional: {}", or_none(&join(&trace.met_optional)));
        }
        Reasoning::Absent(reason) => println!("   {reason}"),
    }
}

fn or_none(list: &str) -> &str {
    if list.is_empty() {
        "-"
    } else {
        list
    }
}

fn print_tsv_results(results: &[Diagnosis]) {
    println!("rank\tdisease\tmethod\tscore\tpossible\tmet_required\tmissing_required\tmet_optional\tnote");
    for (i, result) in results.iter().enumerate() {
        match result {
            Diagnosis::Forward(d) => println!(
                "{}\t{}\t{}\t{:.4}\t\t{}\t{}\t{}\t",
                i + 1,
                d.disease,
                d.method,
                d.score,
                d.trace.met_required.len(),
                d.trace.missing_required.len(),
                d.trace.met_optional.len(),
            ),
            Diagnosis::Backward(d) => match &d.trace {
                Reasoning::Trace(trace) => println!(
                    "{}\t{}\t{}\t{:.4}\t{}\t{}\t{}\t{}\t",
                    i + 1,
                    d.disease,
                    d.method,
                    trace.score / 100.0,
                    d.is_possible,
                    trace.met_required.len(),
                    trace.missing_required.len(),
                    trace.met_optional.len(),
                ),
                Reasoning::Absent(reason) => println!(
                    "{}\t{}\t{}\t\t{}\t\t\t\t{reason}",
                    i + 1,
                    d.disease,
                    d.method,
                    d.is_possible,
                ),
            },
            Diagnosis::NotFound { error } => println!("{}\t\t\t\t\t\t\t\t{error}", i + 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_symptom_text() {
        let parsed = split_symptom_text("fever, sore throat\ncough\n\n , tired\n");
        assert_eq!(parsed, vec!["fever", "sore throat", "cough", "tired"]);
    }

    #[test]
    fn test_read_symptoms_passthrough() {
        let raw = vec!["fever".to_string(), "cough".to_string()];
        assert_eq!(read_symptoms(&raw).unwrap(), raw);
    }
}
