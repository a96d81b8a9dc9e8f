#![no_main]

use libfuzzer_sys::fuzz_target;
use wordfall_text::{normalize_token, tokenize};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if text.len() > 4096 {
        return;
    }

    for token in text.split_whitespace() {
        let once = normalize_token(token);
        assert_eq!(normalize_token(&once), once, "normalization must be idempotent");
        assert!(!once.chars().any(|c| c.is_ascii_digit()));
        assert!(!once.contains('\u{2018}') && !once.contains('\u{2019}'));
    }

    // Tokens never come back empty or with whitespace inside.
    for token in tokenize(text) {
        assert!(!token.is_empty());
        assert!(!token.chars().any(char::is_whitespace));
    }
});
