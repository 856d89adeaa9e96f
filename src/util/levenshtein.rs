//! Levenshtein edit distance.
//!
//! Distances are counted in Unicode scalar values (`char`), never bytes, and
//! characters are compared exactly: no case folding or locale handling
//! happens here. Callers that want case-insensitive matching fold first
//! (see [`crate::query::fuzzy`]).
//!
//! All variants run the classic dynamic program with two rows. The longer
//! operand always drives the rows and the shorter one is the row width, so
//! memory stays at `O(min(|a|, |b|))`.

use std::cmp::min;

/// Calculate the Levenshtein distance between two strings.
/// This is the minimum number of single-character edits (insertions, deletions, or substitutions)
/// required to change one word into another.
///
/// If either string is empty the result is the length of the other one.
pub fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();

    char_distance(&s1_chars, &s2_chars)
}

/// Calculate Levenshtein distance with a maximum threshold for early termination.
/// Returns None if the distance exceeds the threshold, which can be more efficient
/// for filtering candidates.
pub fn levenshtein_distance_threshold(s1: &str, s2: &str, threshold: usize) -> Option<usize> {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();

    char_distance_within(&s1_chars, &s2_chars, threshold)
}

/// Calculate normalized Levenshtein similarity as a ratio between 0.0 and 1.0.
/// 1.0 means identical strings, 0.0 means completely different.
pub fn levenshtein_ratio(s1: &str, s2: &str) -> f64 {
    let len1 = s1.chars().count();
    let len2 = s2.chars().count();
    let max_len = len1.max(len2);

    if max_len == 0 {
        return 1.0;
    }

    let distance = levenshtein_distance(s1, s2);
    1.0 - (distance as f64 / max_len as f64)
}

/// Orders two operands as `(longer, shorter)`. Edit distance is symmetric,
/// so the swap never changes the result.
fn by_length<'a>(a: &'a [char], b: &'a [char]) -> (&'a [char], &'a [char]) {
    if a.len() >= b.len() { (a, b) } else { (b, a) }
}

/// Edit distance over already-decoded characters.
pub(crate) fn char_distance(a: &[char], b: &[char]) -> usize {
    let (long, short) = by_length(a, b);
    if short.is_empty() {
        return long.len();
    }

    let width = short.len();
    let mut prev_row: Vec<usize> = (0..=width).collect();
    let mut curr_row = vec![0; width + 1];

    for (i, &lc) in long.iter().enumerate() {
        curr_row[0] = i + 1;

        for (j, &sc) in short.iter().enumerate() {
            let cost = usize::from(lc != sc);

            curr_row[j + 1] = min(
                min(
                    prev_row[j + 1] + 1, // deletion
                    curr_row[j] + 1,     // insertion
                ),
                prev_row[j] + cost, // substitution
            );
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[width]
}

/// Bounded edit distance over already-decoded characters.
///
/// Returns `Some(d)` exactly when `d <= threshold`.
pub(crate) fn char_distance_within(a: &[char], b: &[char], threshold: usize) -> Option<usize> {
    let (long, short) = by_length(a, b);

    // Every extra character of the longer operand costs one insertion.
    if long.len() - short.len() > threshold {
        return None;
    }
    if short.is_empty() {
        return Some(long.len());
    }

    let width = short.len();
    let mut prev_row: Vec<usize> = (0..=width).collect();
    let mut curr_row = vec![0; width + 1];

    for (i, &lc) in long.iter().enumerate() {
        curr_row[0] = i + 1;
        let mut min_in_row = curr_row[0];

        for (j, &sc) in short.iter().enumerate() {
            let cost = usize::from(lc != sc);

            curr_row[j + 1] = min(
                min(
                    prev_row[j + 1] + 1, // deletion
                    curr_row[j] + 1,     // insertion
                ),
                prev_row[j] + cost, // substitution
            );

            min_in_row = min(min_in_row, curr_row[j + 1]);
        }

        // Row minima never decrease, so the final cell cannot recover.
        if min_in_row > threshold {
            return None;
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    let distance = prev_row[width];
    (distance <= threshold).then_some(distance)
}

/// Edit distance from one query to many candidates.
///
/// The query is decoded once and reused for every candidate.
#[derive(Debug, Clone)]
pub struct LevenshteinMatcher {
    query: String,
    query_chars: Vec<char>,
}

impl LevenshteinMatcher {
    /// Create a new matcher for the given query string.
    pub fn new<S: Into<String>>(query: S) -> Self {
        let query = query.into();
        let query_chars = query.chars().collect();

        LevenshteinMatcher { query, query_chars }
    }

    /// Get the original query string.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Calculate distance to a candidate string.
    pub fn distance(&self, candidate: &str) -> usize {
        let candidate: Vec<char> = candidate.chars().collect();
        char_distance(&self.query_chars, &candidate)
    }

    /// Calculate distance with threshold for early termination.
    pub fn distance_threshold(&self, candidate: &str, threshold: usize) -> Option<usize> {
        let candidate: Vec<char> = candidate.chars().collect();
        char_distance_within(&self.query_chars, &candidate, threshold)
    }

    /// Calculate similarity ratio (0.0 to 1.0, higher is more similar).
    pub fn similarity(&self, candidate: &str) -> f64 {
        levenshtein_ratio(&self.query, candidate)
    }

    /// Check if a candidate is within the given edit distance threshold.
    pub fn is_match(&self, candidate: &str, max_distance: usize) -> bool {
        self.distance_threshold(candidate, max_distance).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_distance() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("", "a"), 1);
        assert_eq!(levenshtein_distance("a", ""), 1);
        assert_eq!(levenshtein_distance("a", "a"), 0);
        assert_eq!(levenshtein_distance("ab", "ac"), 1);
        assert_eq!(levenshtein_distance("abc", "def"), 3);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("search", "serach"), 2);
    }

    #[test]
    fn test_empty_operand_is_length_of_other() {
        assert_eq!(levenshtein_distance("", "deployment"), 10);
        assert_eq!(levenshtein_distance("deployment", ""), 10);
        // Lengths are counted in chars, not bytes.
        assert_eq!(levenshtein_distance("", "héllo"), 5);
    }

    #[test]
    fn test_identity_and_symmetry() {
        let samples = ["", "a", "alice", "Hello from Alice", "naïve café", "bob"];
        for a in samples {
            assert_eq!(levenshtein_distance(a, a), 0, "identity for {a:?}");
            for b in samples {
                assert_eq!(
                    levenshtein_distance(a, b),
                    levenshtein_distance(b, a),
                    "symmetry for {a:?} / {b:?}"
                );
            }
        }
    }

    #[test]
    fn test_exact_char_comparison() {
        // No case folding at this layer.
        assert_eq!(levenshtein_distance("Alice", "alice"), 1);
        assert_eq!(levenshtein_distance("ALICE", "alice"), 5);
    }

    #[test]
    fn test_levenshtein_distance_threshold() {
        assert_eq!(
            levenshtein_distance_threshold("kitten", "sitting", 3),
            Some(3)
        );
        assert_eq!(levenshtein_distance_threshold("kitten", "sitting", 2), None);
        assert_eq!(
            levenshtein_distance_threshold("search", "search", 0),
            Some(0)
        );
        assert_eq!(levenshtein_distance_threshold("a", "abc", 1), None);
        assert_eq!(levenshtein_distance_threshold("a", "ab", 1), Some(1));
        assert_eq!(levenshtein_distance_threshold("", "ab", 2), Some(2));
        assert_eq!(levenshtein_distance_threshold("", "ab", 1), None);
    }

    #[test]
    fn test_threshold_agrees_with_full_distance() {
        let pairs = [
            ("guide", "about"),
            ("deployment", "the guide"),
            ("alice", "bob"),
            ("testing", "tasting"),
        ];
        for (a, b) in pairs {
            let full = levenshtein_distance(a, b);
            for threshold in 0..=full + 1 {
                let bounded = levenshtein_distance_threshold(a, b, threshold);
                if full <= threshold {
                    assert_eq!(bounded, Some(full));
                } else {
                    assert_eq!(bounded, None);
                }
            }
        }
    }

    #[test]
    fn test_levenshtein_ratio() {
        assert!((levenshtein_ratio("", "") - 1.0).abs() < 1e-6);
        assert!((levenshtein_ratio("abc", "abc") - 1.0).abs() < 1e-6);
        assert!((levenshtein_ratio("abc", "def") - 0.0).abs() < 1e-6);

        let ratio = levenshtein_ratio("search", "serach");
        assert!(ratio > 0.5 && ratio < 1.0);
    }

    #[test]
    fn test_levenshtein_matcher() {
        let matcher = LevenshteinMatcher::new("search");

        assert_eq!(matcher.query(), "search");
        assert_eq!(matcher.distance("search"), 0);
        assert_eq!(matcher.distance("serach"), 2);
        assert!(matcher.similarity("search") > matcher.similarity("serach"));
        assert!(matcher.is_match("serach", 2));
        assert!(!matcher.is_match("completely_different", 2));
    }
}
