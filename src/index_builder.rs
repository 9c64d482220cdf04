//! Accumulates books into one compiled shard: interns path segments, tracks
//! per-token, per-book frequencies in sorted order, and drives the MAST
//! builder + columnar compiler at `build()` time.

use std::collections::BTreeMap;

use crate::container::{self, BookEntry};
use crate::mast::MastBuilder;

#[derive(Clone, Copy, Default)]
struct Freqs {
    title: u64,
    content: u64,
}

/// A single worker's independent, unshared book accumulator. Exactly one
/// `IndexBuilder` lives per build-time worker thread; its state never
/// crosses a thread boundary.
#[derive(Default)]
pub struct IndexBuilder {
    names: Vec<String>,
    paths: Vec<Vec<u32>>,
    // token -> book_id -> frequencies. The outer BTreeMap provides the
    // sorted key stream the MAST builder requires; the inner one keeps
    // each token's postings ordered by ascending book id.
    unmerged: BTreeMap<Vec<u8>, BTreeMap<u32, Freqs>>,
}

/// A fully compiled shard plus the counts needed for progress reporting.
pub struct CompiledShard {
    pub bytes: Vec<u8>,
    pub book_count: usize,
    pub token_count: usize,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn book_count(&self) -> usize {
        self.paths.len()
    }

    fn intern(&mut self, segment: &str) -> u32 {
        if let Some(pos) = self.names.iter().position(|n| n == segment) {
            return pos as u32;
        }
        self.names.push(segment.to_string());
        (self.names.len() - 1) as u32
    }

    /// Registers one book's path and token streams, returning its `book_id`.
    pub fn add_book(
        &mut self,
        relative_path: &str,
        title_tokens: &[String],
        content_tokens: &[String],
    ) -> u32 {
        let segments: Vec<u32> = relative_path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| self.intern(s))
            .collect();
        self.paths.push(segments);
        let book_id = (self.paths.len() - 1) as u32;

        for t in title_tokens {
            let entry = self
                .unmerged
                .entry(t.clone().into_bytes())
                .or_default()
                .entry(book_id)
                .or_default();
            entry.title += 1;
        }
        for t in content_tokens {
            let entry = self
                .unmerged
                .entry(t.clone().into_bytes())
                .or_default()
                .entry(book_id)
                .or_default();
            entry.content += 1;
        }

        book_id
    }

    /// Finalizes the shard: builds the transducer over the sorted token
    /// stream, compiles the columnar container, and consumes `self`.
    pub fn build(self) -> CompiledShard {
        let book_count = self.paths.len();
        let mut builder = MastBuilder::new();
        let mut entries: Vec<Vec<BookEntry>> = Vec::with_capacity(self.unmerged.len());

        for (token, per_book) in &self.unmerged {
            let offset = entries.len() as u32;
            // Tokens arrive from a BTreeMap in strictly ascending order, so
            // duplicates/unsorted keys can never happen here; any failure
            // would mean this module's own invariant broke.
            builder
                .add(token, offset)
                .expect("unmerged token stream is sorted and unique by construction");
            let group: Vec<BookEntry> = per_book
                .iter()
                .map(|(&book_id, f)| BookEntry {
                    book_id,
                    title_freq: f.title,
                    content_freq: f.content,
                })
                .collect();
            entries.push(group);
        }

        let token_count = entries.len();
        let states = builder.build();
        let bytes = container::compile(&self.names, &self.paths, &entries, &states);

        CompiledShard {
            bytes,
            book_count,
            token_count,
        }
    }
}
