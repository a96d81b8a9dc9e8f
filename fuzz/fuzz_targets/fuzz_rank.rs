#![no_main]

use libfuzzer_sys::fuzz_target;
use wordfall_text::{FrequencyTable, TopN, is_stopword};

fuzz_target!(|input: (u8, bool, &str)| {
    let (n, exclude, text) = input;
    if text.len() > 8192 {
        return;
    }

    let table = FrequencyTable::from_text(text);
    let top_n = TopN::at_least_one(usize::from(n));
    let entries = table.top(top_n, exclude);

    assert!(entries.len() <= top_n.get());
    assert!(entries.len() <= table.unique(exclude));
    for pair in entries.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(a.count > b.count || (a.count == b.count && a.word < b.word));
    }
    for entry in &entries {
        assert!(entry.count >= 1);
        assert_eq!(table.count(&entry.word), entry.count);
        if exclude {
            assert!(!is_stopword(&entry.word));
            assert!(entry.word.chars().count() > 1);
        }
    }
});
