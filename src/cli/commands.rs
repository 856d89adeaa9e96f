//! Command implementations for the fuzzpost CLI.

use std::collections::BTreeMap;
use std::time::Instant;

use anyhow::Context;

use crate::blog::{BlogStore, load_documents_jsonl};
use crate::cli::args::*;
use crate::cli::output::*;
use crate::document::Document;
use crate::error::Result;
use crate::query::fuzzy::best_match;
use crate::search::{FieldSearcher, SearchConfig};
use crate::util::levenshtein::levenshtein_distance;

/// Execute a CLI command.
pub fn execute_command(args: FuzzpostArgs) -> Result<()> {
    match &args.command {
        Command::Distance(distance_args) => {
            let result = run_distance(distance_args);
            output_result("Edit distance", &result, &args)
        }
        Command::Match(match_args) => {
            let result = run_match(match_args);
            output_result("Best matching window", &result, &args)
        }
        Command::Search(search_args) => {
            let result = run_search(search_args)?;
            output_result("Search completed", &result, &args)
        }
    }
}

/// Compute the edit distance between the two arguments.
pub fn run_distance(args: &DistanceArgs) -> DistanceResult {
    DistanceResult {
        a: args.a.clone(),
        b: args.b.clone(),
        distance: levenshtein_distance(&args.a, &args.b),
    }
}

/// Find the best-matching window of the query in the text.
pub fn run_match(args: &MatchArgs) -> MatchResult {
    let m = best_match(&args.query, &args.text);
    MatchResult {
        query: args.query.clone(),
        text: args.text.clone(),
        distance: m.distance,
        start: m.start,
        end: m.end,
        window: m.extract(&args.query, &args.text),
        swapped: m.swapped,
    }
}

/// Resolve the search configuration: file (or defaults), then flags.
pub fn build_config(args: &SearchArgs) -> Result<SearchConfig> {
    let mut config = match &args.config {
        Some(path) => SearchConfig::from_file(path)
            .with_context(|| format!("failed to load config file {}", path.display()))?,
        None => SearchConfig::default(),
    };

    if let Some(threshold) = args.threshold {
        config = config.with_threshold(threshold);
    }
    if !args.fields.is_empty() {
        config = config.with_fields(args.fields.iter().cloned());
    }
    if let Some(limit) = args.limit {
        config = config.with_limit(limit);
    }
    if args.sequential {
        config = config.with_parallel(false);
    }

    config.validate()?;
    Ok(config)
}

/// Load the data file and run the search.
pub fn run_search(args: &SearchArgs) -> Result<SearchResults> {
    let config = build_config(args)?;
    let documents = load_data(args)?;
    let searcher = FieldSearcher::new(config)?;

    let start_time = Instant::now();
    let hits = searcher.search(&args.query, &documents);
    let duration = start_time.elapsed();

    let by_id: BTreeMap<u64, &Document> = documents.iter().map(|d| (d.id(), d)).collect();
    let entries: Vec<SearchResultEntry> = hits
        .into_iter()
        .map(|hit| {
            let fields: BTreeMap<String, String> = by_id
                .get(&hit.doc_id)
                .map(|doc| {
                    doc.fields()
                        .iter()
                        .filter_map(|(name, value)| {
                            value.as_text().map(|text| (name.clone(), text.to_string()))
                        })
                        .collect()
                })
                .unwrap_or_default();
            SearchResultEntry {
                doc_id: hit.doc_id,
                best_distance: hit.best_distance(),
                matches: hit.matches,
                fields,
            }
        })
        .collect();

    Ok(SearchResults {
        query: args.query.clone(),
        total_hits: entries.len(),
        hits: entries,
        searched: documents.len(),
        duration_ms: duration.as_millis() as u64,
    })
}

fn load_data(args: &SearchArgs) -> Result<Vec<Document>> {
    let documents = if args.jsonl {
        load_documents_jsonl(&args.data)
    } else {
        BlogStore::from_json_file(&args.data).map(|store| store.rows())
    };
    Ok(documents.with_context(|| format!("failed to load data file {}", args.data.display()))?)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn search_args(query: &str, data: &std::path::Path) -> SearchArgs {
        SearchArgs {
            query: query.to_string(),
            data: data.to_path_buf(),
            jsonl: true,
            config: None,
            threshold: None,
            fields: Vec::new(),
            limit: None,
            sequential: false,
        }
    }

    #[test]
    fn test_run_distance() {
        let result = run_distance(&DistanceArgs {
            a: "kitten".to_string(),
            b: "sitting".to_string(),
        });
        assert_eq!(result.distance, 3);
    }

    #[test]
    fn test_run_match() {
        let result = run_match(&MatchArgs {
            query: "Guide".to_string(),
            text: "the guide to deployment".to_string(),
        });
        assert_eq!(result.distance, 0);
        assert_eq!((result.start, result.end), (4, 9));
        assert_eq!(result.window, "guide");
        assert!(!result.swapped);
    }

    #[test]
    fn test_build_config_flags_override_file() {
        let mut config_file = tempfile::NamedTempFile::new().unwrap();
        write!(config_file, r#"{{"threshold": 5, "fields": ["body"], "limit": 9}}"#).unwrap();

        let mut args = search_args("x", config_file.path());
        args.config = Some(config_file.path().to_path_buf());
        args.threshold = Some(1);
        args.sequential = true;

        let config = build_config(&args).unwrap();
        assert_eq!(config.threshold, 1);
        assert_eq!(config.fields, vec!["body"]);
        assert_eq!(config.limit, Some(9));
        assert!(!config.parallel);

        args.threshold = Some(0);
        assert!(build_config(&args).is_err());
    }

    #[test]
    fn test_load_errors_name_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("posts.jsonl");

        let err = run_search(&search_args("x", &missing)).unwrap_err();
        assert!(matches!(err, crate::error::FuzzpostError::Anyhow(_)));
        let message = err.to_string();
        assert!(message.starts_with("failed to load data file"), "{message}");
        assert!(message.contains("posts.jsonl"), "{message}");
        assert!(message.contains("I/O error"), "{message}");

        let mut args = search_args("x", &missing);
        args.config = Some(dir.path().join("search.json"));
        let err = build_config(&args).unwrap_err();
        assert!(err.to_string().contains("failed to load config file"));
    }

    #[test]
    fn test_run_search_jsonl() {
        let mut data = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            data,
            r#"{{"id": 1, "username": "alice", "title": "Hello from Alice", "body": "Alice writes about testing."}}"#
        )
        .unwrap();
        writeln!(
            data,
            r#"{{"id": 2, "username": "bob", "title": "The Guide", "body": "Bob writes about deployment."}}"#
        )
        .unwrap();

        let results = run_search(&search_args("deployment", data.path())).unwrap();
        assert_eq!(results.searched, 2);
        assert_eq!(results.total_hits, 1);
        assert_eq!(results.hits[0].doc_id, 2);
        assert_eq!(results.hits[0].matches[0].label(), "body:");
        assert_eq!(
            results.hits[0].fields.get("title").map(String::as_str),
            Some("The Guide")
        );
    }
}
