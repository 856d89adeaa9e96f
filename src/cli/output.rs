//! Output formatting for CLI commands.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cli::args::{FuzzpostArgs, OutputFormat};
use crate::error::Result;
use crate::search::FieldMatch;

/// Results that know how to print themselves for people.
pub trait HumanOutput {
    fn print_human(&self);
}

/// Result structure for the distance command.
#[derive(Debug, Serialize, Deserialize)]
pub struct DistanceResult {
    pub a: String,
    pub b: String,
    pub distance: usize,
}

/// Result structure for the match command.
#[derive(Debug, Serialize, Deserialize)]
pub struct MatchResult {
    pub query: String,
    pub text: String,
    pub distance: usize,
    pub start: usize,
    pub end: usize,
    pub window: String,
    pub swapped: bool,
}

/// One record in search output.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResultEntry {
    pub doc_id: u64,
    pub best_distance: usize,
    pub matches: Vec<FieldMatch>,
    /// Text fields of the record, for display.
    pub fields: BTreeMap<String, String>,
}

/// Result structure for search operations.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResults {
    pub query: String,
    pub hits: Vec<SearchResultEntry>,
    pub total_hits: usize,
    pub searched: usize,
    pub duration_ms: u64,
}

impl HumanOutput for DistanceResult {
    fn print_human(&self) {
        println!("{}", self.distance);
    }
}

impl HumanOutput for MatchResult {
    fn print_human(&self) {
        println!("distance: {}", self.distance);
        println!("window:   [{}, {}) \"{}\"", self.start, self.end, self.window);
        if self.swapped {
            println!("(query was longer than text; searched the text inside the query)");
        }
    }
}

impl HumanOutput for SearchResults {
    fn print_human(&self) {
        println!("Search Results:");
        println!("═══════════════");

        for (i, hit) in self.hits.iter().enumerate() {
            println!();
            println!(
                "Result {}: record {} (distance: {})",
                i + 1,
                hit.doc_id,
                hit.best_distance
            );
            println!("─────────────");

            for m in &hit.matches {
                let text = hit.fields.get(&m.field).map(String::as_str).unwrap_or("");
                println!("{} {text} [{}]", m.label(), m.distance);
            }
        }

        println!();
        println!("Total hits: {} of {} records", self.total_hits, self.searched);
        println!("Search time: {}ms", self.duration_ms);
    }
}

/// Output a result in the requested format.
pub fn output_result<T: Serialize + HumanOutput>(
    message: &str,
    result: &T,
    args: &FuzzpostArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: HumanOutput>(message: &str, result: &T, args: &FuzzpostArgs) -> Result<()> {
    if args.verbosity() > 1 {
        println!("{message}");
        println!();
    }
    result.print_human();
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &FuzzpostArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}
