//! Shared utility modules used across fuzzpost components.

pub mod levenshtein;
