//! Text algorithms: substring search and prefix-code compression.
//!
//! - [`kmp`]: Knuth-Morris-Pratt search reporting every (possibly
//!   overlapping) match position.
//! - [`HuffmanCoding`]: builds an optimal prefix code from symbol
//!   frequencies and encodes text as a string of `'0'`/`'1'` bits.
//!
//! Both work on Unicode scalar values (`char`), so positions and symbol
//! counts are in characters, not bytes.
//!
//! # References
//!
//! - Knuth, Morris & Pratt (1977), "Fast Pattern Matching in Strings",
//!   SIAM J. Computing 6(2)
//! - Huffman (1952), "A Method for the Construction of Minimum-Redundancy
//!   Codes", Proc. IRE 40(9)

mod huffman;
pub mod kmp;

pub use huffman::HuffmanCoding;
pub use kmp::KmpMatcher;
