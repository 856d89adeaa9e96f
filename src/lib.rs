//! # fuzzpost
//!
//! Fuzzy substring search for a blog: find posts whose author, title or
//! body contains something close to what the user typed.
//!
//! ## Features
//!
//! - Levenshtein edit distance over Unicode characters
//! - Case-insensitive sliding-window matching of a query inside a text
//! - `fuzzy_in_text` registered as a scalar function for row filters
//! - Field search that tags each hit with the fields it matched

pub mod blog;
pub mod cli;
pub mod document;
pub mod error;
pub mod function;
pub mod query;
pub mod search;
pub mod util;

pub mod prelude {
    pub use crate::document::{Document, FieldValue};
    pub use crate::error::{FuzzpostError, Result};
    pub use crate::function::{FunctionRegistry, FuzzyInText, ScalarFunction};
    pub use crate::query::{Expr, FuzzyMatcher, RowEvaluator, best_match_distance};
    pub use crate::search::{FieldMatch, FieldSearcher, SearchConfig, SearchHit};
    pub use crate::util::levenshtein::levenshtein_distance;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
