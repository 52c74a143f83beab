//! Huffman prefix-code compressor.
//!
//! # Algorithm
//!
//! 1. Count how often each character occurs.
//! 2. Put one leaf per character into a [`MinHeap`] keyed by weight.
//! 3. Repeatedly extract the two lightest nodes and push their parent,
//!    whose weight is the sum, until one node remains: the root.
//! 4. A character's code is its root path, `0` for left and `1` for right.
//!    A tree with a single leaf gives that character the code `"0"`.
//!
//! Equal weights are ordered by node creation, so the same input always
//! yields the same codes. The exact bit patterns are still an
//! implementation detail; only the round trip is guaranteed.
//!
//! # Complexity
//! O(n + k log k) to encode n characters over k distinct symbols; O(bits)
//! to decode.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CollectionError, Result};
use crate::heap::MinHeap;

#[derive(Debug, Clone, Serialize, Deserialize)]
enum HuffmanNode {
    Leaf { symbol: char },
    Internal { left: usize, right: usize },
}

/// Encoder/decoder holding the tree built by the last [`encode`](Self::encode).
///
/// # Example
/// ```
/// use u_collections::text::HuffmanCoding;
///
/// let mut codec = HuffmanCoding::new();
/// let report = "membership renewals: 42";
/// let bits = codec.encode(report);
///
/// assert_eq!(codec.decode(&bits).unwrap(), report);
/// assert!(HuffmanCoding::compression_ratio(report, &bits) > 0.0);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HuffmanCoding {
    nodes: Vec<HuffmanNode>,
    root: Option<usize>,
    codes: BTreeMap<char, String>,
}

impl HuffmanCoding {
    /// Creates a codec with no tree built yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a code for `text` and returns `text` encoded as `'0'`/`'1'`.
    ///
    /// Empty input returns an empty string and keeps the previous tree.
    pub fn encode(&mut self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        self.build_tree(text);
        self.assign_codes();

        let mut encoded = String::new();
        for symbol in text.chars() {
            if let Some(code) = self.codes.get(&symbol) {
                encoded.push_str(code);
            }
        }
        encoded
    }

    fn build_tree(&mut self, text: &str) {
        let mut frequencies: BTreeMap<char, usize> = BTreeMap::new();
        for symbol in text.chars() {
            *frequencies.entry(symbol).or_insert(0) += 1;
        }

        self.nodes.clear();
        let mut heap = MinHeap::new();
        for (&symbol, &weight) in &frequencies {
            self.nodes.push(HuffmanNode::Leaf { symbol });
            heap.insert((weight, self.nodes.len() - 1));
        }

        self.root = None;
        while let Ok((weight, left)) = heap.extract_min() {
            match heap.extract_min() {
                Ok((right_weight, right)) => {
                    self.nodes.push(HuffmanNode::Internal { left, right });
                    heap.insert((weight + right_weight, self.nodes.len() - 1));
                }
                Err(_) => self.root = Some(left),
            }
        }
        debug!(
            symbols = frequencies.len(),
            nodes = self.nodes.len(),
            "Huffman tree built"
        );
    }

    fn assign_codes(&mut self) {
        self.codes.clear();
        let Some(root) = self.root else {
            return;
        };
        let mut pending = vec![(root, String::new())];
        while let Some((id, prefix)) = pending.pop() {
            match &self.nodes[id] {
                HuffmanNode::Leaf { symbol } => {
                    let code = if prefix.is_empty() {
                        "0".to_string()
                    } else {
                        prefix
                    };
                    self.codes.insert(*symbol, code);
                }
                HuffmanNode::Internal { left, right } => {
                    pending.push((*right, format!("{prefix}1")));
                    pending.push((*left, format!("{prefix}0")));
                }
            }
        }
    }

    /// Decodes a bit string produced by the last `encode`.
    ///
    /// Fails on any character other than `'0'`/`'1'`, on a bit that leads
    /// out of the tree, on a trailing incomplete code, and on non-empty
    /// input before any tree was built.
    pub fn decode(&self, encoded: &str) -> Result<String> {
        if encoded.is_empty() {
            return Ok(String::new());
        }
        let root = self
            .root
            .ok_or_else(|| CollectionError::invalid("no Huffman tree has been built"))?;

        let mut decoded = String::new();
        let mut current = root;
        for (pos, bit) in encoded.chars().enumerate() {
            if bit != '0' && bit != '1' {
                return Err(CollectionError::invalid(format!(
                    "invalid bit {bit:?} at position {pos}"
                )));
            }
            let next = match (&self.nodes[current], bit) {
                (HuffmanNode::Internal { left, .. }, '0') => *left,
                (HuffmanNode::Internal { right, .. }, _) => *right,
                // Single-symbol tree: the root leaf's code is "0".
                (HuffmanNode::Leaf { symbol }, '0') => {
                    decoded.push(*symbol);
                    continue;
                }
                (HuffmanNode::Leaf { .. }, _) => {
                    return Err(CollectionError::invalid(format!(
                        "bit at position {pos} matches no code"
                    )));
                }
            };
            match &self.nodes[next] {
                HuffmanNode::Leaf { symbol } => {
                    decoded.push(*symbol);
                    current = root;
                }
                HuffmanNode::Internal { .. } => current = next,
            }
        }

        if current != root {
            return Err(CollectionError::invalid(
                "encoded input ends in the middle of a code",
            ));
        }
        Ok(decoded)
    }

    /// Percentage saved relative to 8 bits per character.
    ///
    /// Returns 0 for an empty original.
    pub fn compression_ratio(original: &str, encoded: &str) -> f64 {
        let chars = original.chars().count();
        if chars == 0 {
            return 0.0;
        }
        let original_bits = (chars * 8) as f64;
        (1.0 - encoded.len() as f64 / original_bits) * 100.0
    }

    /// Symbol to code table from the last `encode`.
    pub fn codes(&self) -> &BTreeMap<char, String> {
        &self.codes
    }
}
