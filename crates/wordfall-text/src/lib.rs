#![forbid(unsafe_code)]

//! Text analysis for Wordfall.
//!
//! This crate turns raw pasted text into ranked word frequencies:
//!
//! - [`normalize`]: whitespace tokenization and per-token cleanup
//!   (boundary stripping, digit removal, apostrophe folding, lowercasing).
//! - [`stopwords`]: the fixed English stopword list.
//! - [`rank`]: counting, filtering, deterministic ordering, and top-N
//!   selection.
//! - [`search`]: single-word frequency lookups with user-facing messages.
//!
//! # Example
//! ```
//! use wordfall_text::{FrequencyTable, TopN, tokenize};
//!
//! let tokens = tokenize("apple banana apple cherry banana apple");
//! let table = FrequencyTable::from_tokens(&tokens);
//! let top = table.top(TopN::new(2).unwrap(), false);
//! assert_eq!(top[0].word, "apple");
//! assert_eq!(top[0].count, 3);
//! assert_eq!(top[1].word, "banana");
//! ```

pub mod normalize;
pub mod rank;
pub mod search;
pub mod stopwords;

use thiserror::Error;

pub use normalize::{normalize_token, tokenize, tokens};
pub use rank::{FrequencyEntry, FrequencyTable, TopN, frequency_of, rank};
pub use search::{SearchHit, SearchOutcome, search};
pub use stopwords::is_stopword;

/// Errors for contract violations by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextError {
    /// A negative number of top words was requested.
    #[error("top-N must not be negative (got {0})")]
    NegativeTopN(i64),
}
