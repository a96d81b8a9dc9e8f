#![forbid(unsafe_code)]

//! The fixed English stopword list.
//!
//! Stopwords are dropped from rankings when the caller asks to exclude
//! common words. Search never consults this list.

use std::sync::LazyLock;

use ahash::AHashSet;

/// Common English function words, including contractions.
pub const FUNCTION_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "aren't", "as", "at", "be", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "can't", "could", "couldn't", "did", "didn't", "do", "does", "doesn't",
    "doing", "don't", "down", "during", "each", "few", "for", "from", "further", "had",
    "hadn't", "has", "hasn't", "have", "haven't", "having", "he", "he'd", "he'll", "he's",
    "her", "here", "here's", "hers", "herself", "him", "himself", "his", "how", "how's", "i",
    "i'd", "i'll", "i'm", "i've", "if", "in", "into", "is", "isn't", "it", "it's", "its",
    "itself", "let's", "me", "more", "most", "mustn't", "my", "myself", "no", "nor", "not",
    "of", "off", "on", "once", "only", "or", "other", "ought", "our", "ours", "ourselves",
    "out", "over", "own", "same", "shan't", "she", "she'd", "she'll", "she's", "should",
    "shouldn't", "so", "some", "such", "than", "that", "that's", "the", "their", "theirs",
    "them", "themselves", "then", "there", "there's", "these", "they", "they'd", "they'll",
    "they're", "they've", "this", "those", "through", "to", "too", "under", "until", "up",
    "very", "was", "wasn't", "we", "we'd", "we'll", "we're", "we've", "were", "weren't", "what",
    "what's", "when", "when's", "where", "where's", "which", "while", "who", "who's", "whom",
    "why", "why's", "with", "won't", "would", "wouldn't", "you", "you'd", "you'll", "you're",
    "you've", "your", "yours", "yourself", "yourselves",
];

/// Generic high-frequency words and contraction fragments left behind by
/// whitespace tokenization.
pub const SUPPLEMENTARY: &[&str] = &[
    "s", "t", "can", "will", "just", "don", "now",
];

static STOPWORDS: LazyLock<AHashSet<&'static str>> = LazyLock::new(|| {
    FUNCTION_WORDS
        .iter()
        .chain(SUPPLEMENTARY)
        .copied()
        .collect()
});

/// Whether `word` (already normalized) is a stopword.
#[inline]
#[must_use]
pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(word)
}

/// Number of distinct stopwords.
#[must_use]
pub fn count() -> usize {
    STOPWORDS.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize_token;

    #[test]
    fn common_function_words_are_stopwords() {
        for w in ["the", "a", "and", "of", "to", "yourselves", "don't", "it's"] {
            assert!(is_stopword(w), "{w}");
        }
    }

    #[test]
    fn supplementary_words_are_stopwords() {
        for w in ["s", "t", "can", "will", "just", "don", "should", "now"] {
            assert!(is_stopword(w), "{w}");
        }
    }

    #[test]
    fn content_words_are_not_stopwords() {
        for w in ["apple", "question", "u.s.", "landscape", ""] {
            assert!(!is_stopword(w), "{w}");
        }
    }

    #[test]
    fn entries_are_already_normalized() {
        for w in FUNCTION_WORDS.iter().chain(SUPPLEMENTARY) {
            assert_eq!(&normalize_token(w), w);
        }
    }

    #[test]
    fn lists_do_not_overlap() {
        assert_eq!(count(), FUNCTION_WORDS.len() + SUPPLEMENTARY.len());
    }
}
