//! Scalar functions callable from row expressions.
//!
//! The fuzzy matcher reaches the query evaluator the same way a database
//! user-defined function would: it is registered under a name and arity in
//! a [`FunctionRegistry`], and filter expressions call it per row.
//!
//! ```
//! use fuzzpost::document::FieldValue;
//! use fuzzpost::function::FunctionRegistry;
//!
//! let registry = FunctionRegistry::with_builtins();
//! let distance = registry
//!     .call("fuzzy_in_text", &["alice".into(), "Hello from Alice".into()])
//!     .unwrap();
//! assert_eq!(distance, FieldValue::Integer(0));
//! ```

use std::fmt::Debug;
use std::sync::Arc;

use ahash::AHashMap;

use crate::document::FieldValue;
use crate::error::{FuzzpostError, Result};
use crate::query::fuzzy::best_match_distance;

/// Trait for scalar functions evaluated once per row.
pub trait ScalarFunction: Send + Sync + Debug {
    /// The name expressions call this function by.
    fn name(&self) -> &str;

    /// Number of arguments the function takes.
    fn arity(&self) -> usize;

    /// Evaluate the function. The registry has already checked the arity.
    fn call(&self, args: &[FieldValue]) -> Result<FieldValue>;
}

/// `fuzzy_in_text(query, text)`: best window edit distance as an integer.
///
/// A null argument gives a null result, so rows with a missing field never
/// pass a distance comparison.
#[derive(Debug, Clone, Copy, Default)]
pub struct FuzzyInText;

impl FuzzyInText {
    /// Registered function name.
    pub const NAME: &'static str = "fuzzy_in_text";
}

impl ScalarFunction for FuzzyInText {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn arity(&self) -> usize {
        2
    }

    fn call(&self, args: &[FieldValue]) -> Result<FieldValue> {
        match args {
            [FieldValue::Null, _] | [_, FieldValue::Null] => Ok(FieldValue::Null),
            [FieldValue::Text(query), FieldValue::Text(text)] => {
                let distance = best_match_distance(query, text);
                Ok(FieldValue::Integer(distance as i64))
            }
            [query, text] => Err(FuzzpostError::function(format!(
                "{} expects (text, text), got ({}, {})",
                Self::NAME,
                query.type_name(),
                text.type_name()
            ))),
            _ => Err(FuzzpostError::function(format!(
                "{} takes 2 arguments, got {}",
                Self::NAME,
                args.len()
            ))),
        }
    }
}

/// Named scalar functions available to the row evaluator.
///
/// Names are matched case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct FunctionRegistry {
    functions: AHashMap<String, Arc<dyn ScalarFunction>>,
}

impl FunctionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in functions.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(FuzzyInText));
        registry
    }

    /// Register a function, replacing any function with the same name.
    pub fn register(&mut self, function: Arc<dyn ScalarFunction>) {
        let key = function.name().to_lowercase();
        if self.functions.insert(key, function).is_some() {
            log::debug!("Replaced scalar function registration");
        }
    }

    /// Look up a function by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn ScalarFunction>> {
        self.functions.get(&name.to_lowercase())
    }

    /// Check whether a function is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Registered function names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.values().map(|f| f.name()).collect();
        names.sort_unstable();
        names
    }

    /// Call a function by name after checking it exists and the argument count.
    pub fn call(&self, name: &str, args: &[FieldValue]) -> Result<FieldValue> {
        let function = self
            .get(name)
            .ok_or_else(|| FuzzpostError::function(format!("unknown function: {name}")))?;

        if args.len() != function.arity() {
            return Err(FuzzpostError::function(format!(
                "{} takes {} argument(s), got {}",
                function.name(),
                function.arity(),
                args.len()
            )));
        }

        function.call(args)
    }
}
