#![forbid(unsafe_code)]

//! Word counting and top-N ranking.
//!
//! # Ordering
//!
//! Entries sort by count descending, then by word ascending (plain code
//! point order; tokens are already lowercased). The order is total, so the
//! same text always ranks the same way regardless of hash-map iteration
//! order.
//!
//! # Filtering
//!
//! With `exclude_stopwords` set, stopwords and single-character tokens are
//! dropped before ranking. Without it every token is ranked. Lookups via
//! [`FrequencyTable::count`] never filter.

use std::cmp::Ordering;

use rustc_hash::FxHashMap;

use crate::TextError;
use crate::normalize::{normalize_token, tokens};
use crate::stopwords::is_stopword;

/// One ranked word.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FrequencyEntry {
    pub word: String,
    pub count: usize,
}

impl FrequencyEntry {
    #[must_use]
    pub fn new(word: impl Into<String>, count: usize) -> Self {
        Self {
            word: word.into(),
            count,
        }
    }
}

/// Ranking order: count descending, then word ascending.
#[inline]
fn by_rank(a: &FrequencyEntry, b: &FrequencyEntry) -> Ordering {
    b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word))
}

/// How many entries a ranking may return. Always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TopN(usize);

impl TopN {
    /// The default used when the host supplies nothing usable.
    pub const DEFAULT: TopN = TopN(10);

    /// Validate a host-supplied count. Negative values are a contract
    /// violation; zero is raised to the minimum of 1.
    pub fn new(n: i64) -> Result<Self, TextError> {
        if n < 0 {
            return Err(TextError::NegativeTopN(n));
        }
        Ok(Self(usize::try_from(n).unwrap_or(usize::MAX).max(1)))
    }

    /// Like [`new`](Self::new), additionally capped at `max`.
    pub fn clamped(n: i64, max: usize) -> Result<Self, TextError> {
        let top = Self::new(n)?;
        Ok(Self(top.0.min(max.max(1))))
    }

    /// Build from an unsigned count, raising zero to 1.
    #[must_use]
    pub const fn at_least_one(n: usize) -> Self {
        if n == 0 { Self(1) } else { Self(n) }
    }

    #[inline]
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl Default for TopN {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Whether `word` survives ranking filters.
#[inline]
fn keep(word: &str, exclude_stopwords: bool) -> bool {
    if !exclude_stopwords {
        return true;
    }
    let mut chars = word.chars();
    let single = chars.next().is_some() && chars.next().is_none();
    !single && !is_stopword(word)
}

/// Occurrence counts for every token of a text.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    counts: FxHashMap<String, usize>,
    total: usize,
}

impl FrequencyTable {
    /// Count already-normalized tokens.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::default();
        for token in tokens {
            let token = token.as_ref();
            if let Some(count) = table.counts.get_mut(token) {
                *count += 1;
            } else {
                table.counts.insert(token.to_owned(), 1);
            }
            table.total += 1;
        }
        table
    }

    /// Tokenize and count raw text.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self::from_tokens(tokens(text))
    }

    /// Occurrences of `word` after normalizing it. Unfiltered: stopwords
    /// and single letters are counted like any other word.
    #[must_use]
    pub fn count(&self, word: &str) -> usize {
        let normalized = normalize_token(word);
        self.counts.get(normalized.as_str()).copied().unwrap_or(0)
    }

    /// Total number of tokens counted.
    #[inline]
    #[must_use]
    pub fn total_tokens(&self) -> usize {
        self.total
    }

    /// Whether no tokens were counted.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of distinct words that survive the ranking filters.
    #[must_use]
    pub fn unique(&self, exclude_stopwords: bool) -> usize {
        self.counts
            .keys()
            .filter(|word| keep(word, exclude_stopwords))
            .count()
    }

    /// The `top_n` highest-ranked words.
    #[must_use]
    pub fn top(&self, top_n: TopN, exclude_stopwords: bool) -> Vec<FrequencyEntry> {
        let mut entries: Vec<FrequencyEntry> = self
            .counts
            .iter()
            .filter(|(word, _)| keep(word, exclude_stopwords))
            .map(|(word, &count)| FrequencyEntry::new(word.as_str(), count))
            .collect();

        let n = top_n.get();
        if entries.len() > n {
            entries.select_nth_unstable_by(n - 1, by_rank);
            entries.truncate(n);
        }
        entries.sort_unstable_by(by_rank);

        tracing::debug!(
            distinct = self.counts.len(),
            total = self.total,
            returned = entries.len(),
            exclude_stopwords,
            "ranked word frequencies"
        );
        entries
    }
}

/// Rank already-normalized tokens and keep the first `top_n`.
#[must_use]
pub fn rank<S: AsRef<str>>(tokens: &[S], top_n: TopN, exclude_stopwords: bool) -> Vec<FrequencyEntry> {
    FrequencyTable::from_tokens(tokens).top(top_n, exclude_stopwords)
}

/// Occurrences of `word` (normalized the same way as the tokens) in
/// `tokens`. Returns 0 when absent; never filters stopwords.
#[must_use]
pub fn frequency_of<S: AsRef<str>>(tokens: &[S], word: &str) -> usize {
    let needle = normalize_token(word);
    if needle.is_empty() {
        return 0;
    }
    tokens.iter().filter(|t| t.as_ref() == needle).count()
}
