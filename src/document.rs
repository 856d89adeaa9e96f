//! Records as named field values.
//!
//! A [`Document`] is one row handed to the search layer: a post joined with
//! its author, or any JSON object read from a data file. Field values are
//! the scalar types the row evaluator understands.

#[allow(clippy::module_inception)]
pub mod document;
pub mod field_value;

pub use document::{Document, DocumentBuilder};
pub use field_value::FieldValue;
