//! Query system: fuzzy substring matching and row filter evaluation.

pub mod evaluator;
pub mod expr;
pub mod fuzzy;

pub use self::evaluator::RowEvaluator;
pub use self::expr::{CompareOp, Expr};
pub use self::fuzzy::{FuzzyMatcher, WindowMatch, best_match, best_match_distance};
