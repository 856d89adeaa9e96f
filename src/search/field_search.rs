//! Field search: run the fuzzy matcher over every configured field of every
//! record and report which fields matched.
//!
//! A record is a hit when at least one field's distance is below the
//! configured threshold. Each hit carries all of its passing fields so the
//! caller can label results by provenance (`username:`, `title:`, `body:`).

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::error::Result;
use crate::function::FuzzyInText;
use crate::query::expr::Expr;
use crate::query::fuzzy::FuzzyMatcher;
use crate::search::config::SearchConfig;

/// One field of a record that matched the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMatch {
    /// Name of the matching field.
    pub field: String,
    /// Best window distance between the query and the field's text.
    pub distance: usize,
}

impl FieldMatch {
    /// Provenance label shown next to a result, e.g. `title:`.
    pub fn label(&self) -> String {
        format!("{}:", self.field)
    }
}

/// A record with at least one matching field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Id of the matching record.
    pub doc_id: u64,
    /// Passing fields, in configured field order. Never empty.
    pub matches: Vec<FieldMatch>,
}

impl SearchHit {
    /// Smallest distance over the matching fields.
    pub fn best_distance(&self) -> usize {
        self.matches
            .iter()
            .map(|m| m.distance)
            .min()
            .unwrap_or(usize::MAX)
    }

    /// Names of the matching fields.
    pub fn matched_fields(&self) -> Vec<&str> {
        self.matches.iter().map(|m| m.field.as_str()).collect()
    }

    /// Whether the given field matched.
    pub fn has_match(&self, field: &str) -> bool {
        self.matches.iter().any(|m| m.field == field)
    }
}

/// Searches documents field by field with the fuzzy substring matcher.
#[derive(Debug, Clone)]
pub struct FieldSearcher {
    config: SearchConfig,
}

impl FieldSearcher {
    /// Create a searcher, rejecting configurations that cannot match.
    pub fn new(config: SearchConfig) -> Result<Self> {
        config.validate()?;
        Ok(FieldSearcher { config })
    }

    /// The active configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Search `documents` for `query`.
    ///
    /// Hits are ordered by best distance, then by record id, and truncated
    /// to the configured limit. Fields that are missing from a record or
    /// not text are skipped.
    pub fn search(&self, query: &str, documents: &[Document]) -> Vec<SearchHit> {
        let matcher = FuzzyMatcher::new(query);

        let mut hits: Vec<SearchHit> = if self.config.parallel {
            documents
                .par_iter()
                .filter_map(|doc| self.match_document(&matcher, doc))
                .collect()
        } else {
            documents
                .iter()
                .filter_map(|doc| self.match_document(&matcher, doc))
                .collect()
        };

        hits.sort_by(|a, b| {
            a.best_distance()
                .cmp(&b.best_distance())
                .then_with(|| a.doc_id.cmp(&b.doc_id))
        });

        let total = hits.len();
        if let Some(limit) = self.config.limit {
            hits.truncate(limit);
        }

        log::debug!(
            "Query {query:?} matched {total} of {} records, returning {}",
            documents.len(),
            hits.len()
        );

        hits
    }

    /// The same search as a row filter for [`RowEvaluator`](crate::query::RowEvaluator):
    /// `fuzzy_in_text(query, field) < threshold` for each field, joined by `OR`.
    ///
    /// Unlike [`FieldSearcher::search`], the evaluator reports a type error
    /// when a searched field holds a non-text value.
    pub fn filter_expr(&self, query: &str) -> Expr {
        let threshold = i64::try_from(self.config.threshold).unwrap_or(i64::MAX);
        Expr::or(
            self.config
                .fields
                .iter()
                .map(|field| {
                    Expr::call(
                        FuzzyInText::NAME,
                        vec![Expr::text(query), Expr::field(field.as_str())],
                    )
                    .lt(Expr::integer(threshold))
                })
                .collect(),
        )
    }

    fn match_document(&self, matcher: &FuzzyMatcher, doc: &Document) -> Option<SearchHit> {
        let matches: Vec<FieldMatch> = self
            .config
            .fields
            .iter()
            .filter_map(|field| {
                let text = doc.get_text(field)?;
                let distance = matcher.distance(text);
                log::trace!("doc {} field {field}: distance {distance}", doc.id());
                (distance < self.config.threshold).then(|| FieldMatch {
                    field: field.clone(),
                    distance,
                })
            })
            .collect();

        if matches.is_empty() {
            None
        } else {
            Some(SearchHit {
                doc_id: doc.id(),
                matches,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::RowEvaluator;

    fn docs() -> Vec<Document> {
        vec![
            Document::builder()
                .id(1)
                .add_text("username", "alice")
                .add_text("title", "Hello from Alice")
                .add_text("body", "Alice writes about testing.")
                .build(),
            Document::builder()
                .id(2)
                .add_text("username", "bob")
                .add_text("title", "The Guide")
                .add_text("body", "Bob writes about deployment.")
                .build(),
        ]
    }

    #[test]
    fn test_reports_every_matching_field() {
        let searcher = FieldSearcher::new(SearchConfig::default()).unwrap();
        let hits = searcher.search("alice", &docs());

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].doc_id, 1);
        assert_eq!(hits[0].matched_fields(), vec!["username", "title", "body"]);
        assert_eq!(hits[0].best_distance(), 0);
        assert_eq!(hits[0].matches[0].label(), "username:");
    }

    #[test]
    fn test_provenance_per_field() {
        let searcher = FieldSearcher::new(SearchConfig::default()).unwrap();

        let hits = searcher.search("Guide", &docs());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].doc_id, 2);
        assert_eq!(hits[0].matched_fields(), vec!["title"]);

        let hits = searcher.search("deployment", &docs());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].matched_fields(), vec!["body"]);
        assert!(!hits[0].has_match("title"));
    }

    #[test]
    fn test_threshold_is_exclusive() {
        // "gide" is one edit from a window of "The Guide".
        let strict = FieldSearcher::new(SearchConfig::default().with_threshold(1)).unwrap();
        assert!(strict.search("gide", &docs()).is_empty());

        let loose = FieldSearcher::new(SearchConfig::default().with_threshold(2)).unwrap();
        let hits = loose.search("gide", &docs());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].matches[0].distance, 1);
    }

    #[test]
    fn test_ordering_and_limit() {
        let mut documents = docs();
        documents.push(
            Document::builder()
                .id(3)
                .add_text("title", "Writing a guid")
                .build(),
        );

        let config = SearchConfig::default().with_threshold(3);
        let searcher = FieldSearcher::new(config.clone()).unwrap();
        let hits = searcher.search("guide", &documents);
        let ids: Vec<u64> = hits.iter().map(|h| h.doc_id).collect();
        assert_eq!(ids, vec![2, 3]);

        let limited = FieldSearcher::new(config.with_limit(1)).unwrap();
        assert_eq!(limited.search("guide", &documents).len(), 1);
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let parallel = FieldSearcher::new(SearchConfig::default().with_threshold(4)).unwrap();
        let sequential = FieldSearcher::new(
            SearchConfig::default()
                .with_threshold(4)
                .with_parallel(false),
        )
        .unwrap();

        for query in ["alice", "guide", "writes", "bob", "deploy"] {
            assert_eq!(
                parallel.search(query, &docs()),
                sequential.search(query, &docs())
            );
        }
    }

    #[test]
    fn test_filter_expr_agrees_with_search() {
        let searcher = FieldSearcher::new(SearchConfig::default()).unwrap();
        let evaluator = RowEvaluator::default();

        for query in ["alice", "Guide", "deployment", "bob", "nothing here"] {
            let mut expected: Vec<u64> = searcher
                .search(query, &docs())
                .iter()
                .map(|h| h.doc_id)
                .collect();
            expected.sort_unstable();

            let expr = searcher.filter_expr(query);
            assert_eq!(evaluator.filter(&expr, &docs()).unwrap(), expected, "{expr}");
        }
    }

    #[test]
    fn test_skips_missing_and_non_text_fields() {
        let documents = vec![
            Document::builder()
                .id(7)
                .add_integer("username", 42)
                .add_text("body", "bob")
                .build(),
        ];
        let searcher = FieldSearcher::new(SearchConfig::default()).unwrap();
        let hits = searcher.search("bob", &documents);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].matched_fields(), vec!["body"]);
    }

    #[test]
    fn test_rejects_invalid_config() {
        assert!(FieldSearcher::new(SearchConfig::default().with_threshold(0)).is_err());
    }
}
