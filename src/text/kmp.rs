//! Knuth-Morris-Pratt pattern search.
//!
//! # Algorithm
//!
//! The failure table `lps[i]` is the length of the longest proper prefix of
//! `pattern[..=i]` that is also its suffix. On a mismatch after `j` matched
//! symbols the scan resumes at `lps[j - 1]` instead of re-reading text, and
//! after a full match it resumes at `lps[m - 1]` so overlapping matches are
//! found.
//!
//! # Complexity
//! O(m) to build the table, O(n) to scan the text.
//!
//! An empty pattern matches nowhere.

use serde::{Deserialize, Serialize};

/// Builds the longest-proper-prefix-suffix table for `pattern`.
pub fn failure_table<T: PartialEq>(pattern: &[T]) -> Vec<usize> {
    let mut lps = vec![0; pattern.len()];
    let mut len = 0;
    for i in 1..pattern.len() {
        while len > 0 && pattern[i] != pattern[len] {
            len = lps[len - 1];
        }
        if pattern[i] == pattern[len] {
            len += 1;
        }
        lps[i] = len;
    }
    lps
}

fn scan<T: PartialEq>(text: &[T], pattern: &[T], lps: &[usize]) -> Vec<usize> {
    let mut matches = Vec::new();
    if pattern.is_empty() {
        return matches;
    }
    let mut j = 0;
    for (i, symbol) in text.iter().enumerate() {
        while j > 0 && *symbol != pattern[j] {
            j = lps[j - 1];
        }
        if *symbol == pattern[j] {
            j += 1;
        }
        if j == pattern.len() {
            matches.push(i + 1 - j);
            j = lps[j - 1];
        }
    }
    matches
}

/// Start positions of every occurrence of `pattern` in `text`.
pub fn search_slice<T: PartialEq>(text: &[T], pattern: &[T]) -> Vec<usize> {
    scan(text, pattern, &failure_table(pattern))
}

/// Character positions of every occurrence of `pattern` in `text`.
///
/// ```
/// use u_collections::text::kmp;
///
/// assert_eq!(kmp::search("ABABDABACDABABCABAB", "ABABCABAB"), vec![10]);
/// assert_eq!(kmp::search("aaaa", "aa"), vec![0, 1, 2]);
/// ```
pub fn search(text: &str, pattern: &str) -> Vec<usize> {
    let text: Vec<char> = text.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();
    search_slice(&text, &pattern)
}

/// Whether `pattern` occurs anywhere in `text`.
pub fn contains(text: &str, pattern: &str) -> bool {
    !search(text, pattern).is_empty()
}

/// Number of (possibly overlapping) occurrences of `pattern` in `text`.
pub fn count_occurrences(text: &str, pattern: &str) -> usize {
    search(text, pattern).len()
}

/// A pattern with its failure table built once, for searching many texts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KmpMatcher {
    pattern: Vec<char>,
    lps: Vec<usize>,
}

impl KmpMatcher {
    /// Precomputes the failure table for `pattern`.
    pub fn new(pattern: &str) -> Self {
        let pattern: Vec<char> = pattern.chars().collect();
        let lps = failure_table(&pattern);
        Self { pattern, lps }
    }

    /// Character positions of every occurrence in `text`.
    pub fn find_all(&self, text: &str) -> Vec<usize> {
        let text: Vec<char> = text.chars().collect();
        scan(&text, &self.pattern, &self.lps)
    }

    /// Whether the pattern occurs in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        !self.find_all(text).is_empty()
    }

    /// Number of occurrences in `text`.
    pub fn count(&self, text: &str) -> usize {
        self.find_all(text).len()
    }

    /// The precomputed failure table.
    pub fn failure_table(&self) -> &[usize] {
        &self.lps
    }
}
