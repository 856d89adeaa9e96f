//! Fuzzy substring matching.
//!
//! A query matches a text when some window of the text, as long as the
//! query, is within a small edit distance of it. Both sides are lower-cased
//! first, and whichever string is shorter becomes the pattern that slides
//! across the longer one. Only equal-length spans are ever compared.
//!
//! ```
//! use fuzzpost::query::fuzzy::best_match_distance;
//!
//! assert_eq!(best_match_distance("alice", "Hello from Alice"), 0);
//! assert_eq!(best_match_distance("gide", "The Guide"), 1);
//! ```

use serde::{Deserialize, Serialize};

use crate::util::levenshtein::{char_distance, char_distance_within};

/// The best-aligned window found by a fuzzy substring search.
///
/// Offsets are char positions in the lower-cased haystack, which is the
/// longer of the two inputs. `swapped` is set when that was the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowMatch {
    /// First char of the window.
    pub start: usize,
    /// One past the last char of the window.
    pub end: usize,
    /// Edit distance between the pattern and this window.
    pub distance: usize,
    /// Whether the haystack was the query rather than the text.
    pub swapped: bool,
}

impl WindowMatch {
    /// Whether the pattern occurs verbatim (ignoring case).
    pub fn is_exact(&self) -> bool {
        self.distance == 0
    }

    /// The lower-cased window contents, given the inputs the match came from.
    pub fn extract(&self, query: &str, text: &str) -> String {
        let haystack = if self.swapped { query } else { text };
        haystack
            .to_lowercase()
            .chars()
            .skip(self.start)
            .take(self.end - self.start)
            .collect()
    }
}

/// A query folded once and matched against many texts.
#[derive(Debug, Clone)]
pub struct FuzzyMatcher {
    query: String,
    folded: Vec<char>,
}

impl FuzzyMatcher {
    /// Create a new matcher for the given query.
    pub fn new<S: Into<String>>(query: S) -> Self {
        let query = query.into();
        let folded = fold(&query);
        FuzzyMatcher { query, folded }
    }

    /// Get the original query string.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Smallest edit distance between the shorter input and any
    /// equal-length window of the longer one.
    pub fn distance(&self, text: &str) -> usize {
        self.best_match(text).distance
    }

    /// Like [`FuzzyMatcher::distance`], also reporting where the best window is.
    /// Ties go to the leftmost window.
    pub fn best_match(&self, text: &str) -> WindowMatch {
        let text = fold(text);
        search_windows(&self.folded, &text)
    }
}

/// Case-insensitive best window distance between `query` and `text`.
///
/// The result is symmetric in its arguments and never exceeds the length
/// of the longer input after case folding, which can grow a string (`İ`
/// lower-cases to two chars). An empty input yields the folded length of
/// the other one.
pub fn best_match_distance(query: &str, text: &str) -> usize {
    best_match(query, text).distance
}

/// Case-insensitive best window between `query` and `text`.
pub fn best_match(query: &str, text: &str) -> WindowMatch {
    search_windows(&fold(query), &fold(text))
}

fn fold(s: &str) -> Vec<char> {
    s.to_lowercase().chars().collect()
}

fn search_windows(query: &[char], text: &[char]) -> WindowMatch {
    let swapped = query.len() > text.len();
    let (pattern, haystack) = if swapped { (text, query) } else { (query, text) };

    // Nothing to slide: every char of the haystack has to be inserted.
    if pattern.is_empty() {
        return WindowMatch {
            start: 0,
            end: haystack.len(),
            distance: haystack.len(),
            swapped,
        };
    }

    let width = pattern.len();
    let mut best = WindowMatch {
        start: 0,
        end: width,
        distance: char_distance(pattern, &haystack[..width]),
        swapped,
    };

    for start in 1..=haystack.len() - width {
        if best.is_exact() {
            break;
        }

        // Only a strictly better window can replace the current one.
        let window = &haystack[start..start + width];
        if let Some(distance) = char_distance_within(pattern, window, best.distance - 1) {
            best = WindowMatch {
                start,
                end: start + width,
                distance,
                swapped,
            };
        }
    }

    best
}
