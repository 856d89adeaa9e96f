//! Configuration for field searches.

use std::fs;
use std::path::Path;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{FuzzpostError, Result};

/// Fields searched when no configuration says otherwise.
pub const DEFAULT_FIELDS: [&str; 3] = ["username", "title", "body"];

/// Default acceptance threshold: a field passes when its distance is below it.
pub const DEFAULT_THRESHOLD: usize = 2;

/// Configuration for a [`FieldSearcher`](crate::search::FieldSearcher).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Fields to match the query against, in reporting order.
    pub fields: Vec<String>,

    /// A field matches when its best window distance is strictly below this.
    pub threshold: usize,

    /// Maximum number of hits to return. None returns all of them.
    pub limit: Option<usize>,

    /// Evaluate records on the rayon thread pool.
    pub parallel: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            fields: DEFAULT_FIELDS.iter().map(|f| f.to_string()).collect(),
            threshold: DEFAULT_THRESHOLD,
            limit: None,
            parallel: true,
        }
    }
}

impl SearchConfig {
    /// Load a configuration from a JSON file. Missing keys take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config: SearchConfig = serde_json::from_str(&content)?;
        config.validate()?;
        log::debug!("Loaded search config from {}", path.display());
        Ok(config)
    }

    /// Set the acceptance threshold.
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the fields to search.
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Set the maximum number of hits.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Enable or disable parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Check the configuration can produce results.
    pub fn validate(&self) -> Result<()> {
        if self.fields.is_empty() {
            return Err(FuzzpostError::invalid_config("at least one field is required"));
        }

        let mut seen = AHashSet::new();
        for field in &self.fields {
            if field.is_empty() {
                return Err(FuzzpostError::invalid_config("field names cannot be empty"));
            }
            if !seen.insert(field.as_str()) {
                return Err(FuzzpostError::invalid_config(format!(
                    "field '{field}' is listed more than once"
                )));
            }
        }

        if self.threshold == 0 {
            return Err(FuzzpostError::invalid_config(
                "threshold must be at least 1, no distance is below 0",
            ));
        }

        Ok(())
    }
}
