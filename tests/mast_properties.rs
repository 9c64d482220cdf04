//! Property tests for the MAST builder's core invariants (spec.md §8):
//! round-trip lookup, compiled-view parity, minimality, and the
//! subsequential output property.

use std::collections::BTreeMap;

use bookdex::{compile_container, compile_mast, BookEntry, FreqField, IndexView, MastBuilder};
use proptest::collection::vec as pvec;
use proptest::prelude::*;

fn sorted_unique_keys() -> impl Strategy<Value = Vec<(String, u32)>> {
    pvec("[a-c]{1,4}", 0..30).prop_map(|mut keys| {
        keys.sort();
        keys.dedup();
        keys.into_iter()
            .enumerate()
            .map(|(i, k)| (k, i as u32))
            .collect()
    })
}

proptest! {
    #[test]
    fn every_inserted_key_round_trips(pairs in sorted_unique_keys()) {
        let mut builder = MastBuilder::new();
        for (k, v) in &pairs {
            builder.add(k.as_bytes(), *v).unwrap();
        }
        let states = builder.build();
        let compiled = compile_mast(&states);
        let fst = compiled.as_fst();

        for (k, v) in &pairs {
            prop_assert_eq!(fst.get(k.as_bytes()), Some(*v as u64));
        }
    }

    #[test]
    fn keys_never_inserted_miss(pairs in sorted_unique_keys(), probe in "[a-c]{1,4}") {
        let mut builder = MastBuilder::new();
        let mut present: BTreeMap<String, u32> = BTreeMap::new();
        for (k, v) in &pairs {
            builder.add(k.as_bytes(), *v).unwrap();
            present.insert(k.clone(), *v);
        }
        let states = builder.build();
        let compiled = compile_mast(&states);
        let fst = compiled.as_fst();

        match present.get(&probe) {
            Some(&v) => prop_assert_eq!(fst.get(probe.as_bytes()), Some(v as u64)),
            None => prop_assert_eq!(fst.get(probe.as_bytes()), None),
        }
    }

    #[test]
    fn no_two_states_share_a_canonical_key(pairs in sorted_unique_keys()) {
        let mut builder = MastBuilder::new();
        for (k, v) in &pairs {
            builder.add(k.as_bytes(), *v).unwrap();
        }
        let states = builder.build();
        let mut keys: Vec<Vec<u8>> = states.iter().map(bookdex::State::canonical_key).collect();
        let before = keys.len();
        keys.sort();
        keys.dedup();
        prop_assert_eq!(keys.len(), before);
    }

    #[test]
    fn subsequential_sum_matches_inserted_value(pairs in sorted_unique_keys()) {
        let mut builder = MastBuilder::new();
        for (k, v) in &pairs {
            builder.add(k.as_bytes(), *v).unwrap();
        }
        let states = builder.build();
        let compiled = compile_mast(&states);
        let fst = compiled.as_fst();
        for (k, v) in &pairs {
            prop_assert_eq!(fst.get(k.as_bytes()), Some(*v as u64));
        }
    }
}

#[test]
fn empty_builder_yields_single_nonfinal_root() {
    let states = MastBuilder::new().build();
    assert_eq!(states.len(), 1);
    let compiled = compile_mast(&states);
    assert_eq!(compiled.as_fst().get(b""), None);
}

#[test]
fn mast_basic_scenario() {
    let mut builder = MastBuilder::new();
    builder.add(b"cat", 1).unwrap();
    builder.add(b"deer", 2).unwrap();
    builder.add(b"dog", 3).unwrap();
    let states = builder.build();
    let compiled = compile_mast(&states);
    let fst = compiled.as_fst();

    assert_eq!(fst.get(b"cat"), Some(1));
    assert_eq!(fst.get(b"deer"), Some(2));
    assert_eq!(fst.get(b"dog"), Some(3));
    assert_eq!(fst.get(b"do"), None);
    assert_eq!(fst.get(b"dogs"), None);
}

#[test]
fn mast_shared_suffix_minimization_scenario() {
    let mut builder = MastBuilder::new();
    builder.add(b"tap", 1).unwrap();
    builder.add(b"top", 1).unwrap();
    let states = builder.build();
    assert!(states.len() <= 4);

    let compiled = compile_mast(&states);
    let fst = compiled.as_fst();
    assert_eq!(fst.get(b"tap"), Some(1));
    assert_eq!(fst.get(b"top"), Some(1));
}

#[test]
fn builder_error_scenario() {
    use bookdex::BuilderError;

    let mut builder = MastBuilder::new();
    assert_eq!(builder.add(b"", 0), Err(BuilderError::EmptyKey));

    let mut builder = MastBuilder::new();
    builder.add(b"a", 1).unwrap();
    assert_eq!(builder.add(b"a", 2), Err(BuilderError::DuplicateKey));

    let mut builder = MastBuilder::new();
    builder.add(b"b", 1).unwrap();
    assert_eq!(builder.add(b"a", 2), Err(BuilderError::UnsortedKey));
}

#[test]
fn index_end_to_end_scenario() {
    let names = vec!["lib".to_string(), "a.txt".to_string(), "b.txt".to_string()];
    let paths = vec![vec![0, 1], vec![0, 2]];

    let mut builder = MastBuilder::new();
    let mut entries: Vec<Vec<BookEntry>> = Vec::new();

    builder.add(b"hello", entries.len() as u32).unwrap();
    entries.push(vec![
        BookEntry { book_id: 0, title_freq: 1, content_freq: 0 },
        BookEntry { book_id: 1, title_freq: 0, content_freq: 1 },
    ]);
    builder.add(b"world", entries.len() as u32).unwrap();
    entries.push(vec![
        BookEntry { book_id: 0, title_freq: 0, content_freq: 2 },
        BookEntry { book_id: 1, title_freq: 1, content_freq: 0 },
    ]);

    let states = builder.build();
    let bytes = compile_container(&names, &paths, &entries, &states);
    let view = IndexView::new(&bytes);

    assert_eq!(view.search(b"hello", FreqField::Title), vec!["lib/a.txt"]);
    assert_eq!(view.search(b"world", FreqField::Title), vec!["lib/b.txt"]);

    let mut content_hello = view.search(b"hello", FreqField::Content);
    content_hello.sort();
    assert_eq!(content_hello, vec!["lib/a.txt", "lib/b.txt"]);

    assert_eq!(view.search(b"world", FreqField::Content), vec!["lib/a.txt"]);
    assert!(view.search(b"xyz", FreqField::Content).is_empty());
}
