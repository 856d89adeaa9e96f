//! Fuzzy search across the text fields of many records.

pub mod config;
pub mod field_search;

pub use self::config::SearchConfig;
pub use self::field_search::{FieldMatch, FieldSearcher, SearchHit};
