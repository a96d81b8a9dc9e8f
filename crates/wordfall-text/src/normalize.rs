#![forbid(unsafe_code)]

//! Whitespace tokenization and per-token normalization.
//!
//! A token is one whitespace-delimited run of the input. Normalization:
//!
//! 1. Lowercase.
//! 2. Strip leading/trailing characters that are neither letters nor the
//!    plain apostrophe `'`.
//! 3. Remove every remaining ASCII digit.
//! 4. Fold curly apostrophes (`‘` U+2018, `’` U+2019) to `'`.
//! 5. An exact `u.s` / `u.s.` result becomes `u.s.`.
//!
//! Lowercasing happens first because some case mappings expand into
//! combining marks; stripping after them keeps normalization idempotent.
//! Internal punctuation survives: `u.s.-based`, `and/or` and `don't` are
//! single tokens.

/// The abbreviation whose trailing period is preserved.
const US_ABBREVIATION: &str = "u.s.";

#[inline]
fn is_boundary_keeper(c: char) -> bool {
    c.is_alphabetic() || c == '\''
}

#[inline]
fn fold_apostrophe(c: char) -> char {
    match c {
        '\u{2018}' | '\u{2019}' => '\'',
        other => other,
    }
}

/// Normalize a single raw token. The result may be empty.
#[must_use]
pub fn normalize_token(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let trimmed = lowered.trim_matches(|c: char| !is_boundary_keeper(c));

    let cleaned: String = trimmed
        .chars()
        .filter(|c| !c.is_ascii_digit())
        .map(fold_apostrophe)
        .collect();

    if cleaned == "u.s" || cleaned == US_ABBREVIATION {
        return US_ABBREVIATION.to_owned();
    }
    cleaned
}

/// Lazily split `text` on whitespace and normalize each piece, skipping
/// pieces that normalize to nothing.
pub fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace()
        .map(normalize_token)
        .filter(|token| !token.is_empty())
}

/// Split `text` on whitespace and normalize each piece.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    tokens(text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_boundary_punctuation() {
        assert_eq!(normalize_token("\"Hello,"), "hello");
        assert_eq!(normalize_token("(world)!"), "world");
        assert_eq!(normalize_token("--dash--"), "dash");
    }

    #[test]
    fn keeps_internal_punctuation() {
        assert_eq!(normalize_token("and/or"), "and/or");
        assert_eq!(normalize_token("well-known"), "well-known");
        assert_eq!(normalize_token("e.g."), "e.g");
    }

    #[test]
    fn keeps_boundary_apostrophes() {
        assert_eq!(normalize_token("'tis"), "'tis");
        assert_eq!(normalize_token("dogs'"), "dogs'");
    }

    #[test]
    fn removes_digits_everywhere() {
        assert_eq!(normalize_token("abc123def"), "abcdef");
        assert_eq!(normalize_token("2024"), "");
        assert_eq!(normalize_token("covid-19"), "covid");
        assert_eq!(normalize_token("b4"), "b");
    }

    #[test]
    fn folds_curly_apostrophes() {
        assert_eq!(normalize_token("Don\u{2019}t"), "don't");
        assert_eq!(normalize_token("rock\u{2018}n"), "rock'n");
    }

    #[test]
    fn curly_apostrophe_at_boundary_is_stripped() {
        assert_eq!(normalize_token("\u{2019}quoted\u{2019}"), "quoted");
    }

    #[test]
    fn lowercases_unicode() {
        assert_eq!(normalize_token("Ärger"), "ärger");
        assert_eq!(normalize_token("ΣΟΦΙΑ"), "σοφια");
    }

    #[test]
    fn us_abbreviation_special_case() {
        assert_eq!(normalize_token("U.S."), "u.s.");
        assert_eq!(normalize_token("U.S"), "u.s.");
        assert_eq!(normalize_token("(U.S.)"), "u.s.");
    }

    #[test]
    fn us_special_case_requires_exact_match() {
        assert_eq!(normalize_token("U.S.-based"), "u.s.-based");
        assert_eq!(normalize_token("U.S.A."), "u.s.a");
    }

    #[test]
    fn punctuation_only_token_is_empty() {
        assert_eq!(normalize_token("..."), "");
        assert_eq!(normalize_token("—"), "");
        assert_eq!(normalize_token(""), "");
    }

    #[test]
    fn tokenize_drops_empty_tokens() {
        let toks = tokenize("  The cat -- sat, 42 times!\n\tOK ");
        assert_eq!(toks, vec!["the", "cat", "sat", "times", "ok"]);
    }

    #[test]
    fn tokenize_empty_text() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n\t ").is_empty());
    }

    #[test]
    fn normalize_is_idempotent_on_samples() {
        for raw in [
            "U.S.",
            "U.S",
            "U.S.-based",
            "Don\u{2019}t",
            "'1'",
            "İstanbul",
            "x1.",
            "ΑΣ",
            "a.5b",
        ] {
            let once = normalize_token(raw);
            assert_eq!(normalize_token(&once), once, "raw = {raw:?}");
        }
    }
}
