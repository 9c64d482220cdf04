//! Top-level orchestration: `build_index` wires the library walker,
//! tokenizer, per-worker `IndexBuilder`s, and the shard writer together
//! under the build-time concurrency model of §5; `search_index` wires the
//! shard reader and search coordinator together for queries.
//!
//! Grounded in `examples/original_source/src/build.cpp` (worker-thread
//! partition + mutex-guarded output + progress counter) and
//! `src/search.cpp` (mmap + dispatch), carried over into the teacher's
//! `std::thread::scope` / `indicatif` idiom from its own `pipeline.rs`
//! orchestration.

use std::fs;
use std::sync::Mutex;

use anyhow::{Context, Result};

use crate::concurrency::partition_contiguous;
use crate::config::{BuildOptions, SearchOptions};
use crate::container::FreqField;
use crate::index_builder::IndexBuilder;
use crate::paths::{discover_books, BookJob};
use crate::progress::ProgressScope;
use crate::query::{self, TokenHits};
use crate::shard::{ShardFile, ShardWriter};
use crate::tokenizer::tokenize_book;

/// Builds an index for the library at `opts.library_path`, writing the
/// shard file to `opts.index_path`.
pub fn build_index(opts: &BuildOptions) -> Result<()> {
    anyhow::ensure!(
        opts.library_path.is_dir(),
        "library path {} is not a directory",
        opts.library_path.display()
    );

    let books = discover_books(&opts.library_path);
    let writer = ShardWriter::create(&opts.index_path)?;
    let progress = opts
        .progress
        .then(|| ProgressScope::count("indexing books", books.len() as u64));

    let ranges = partition_contiguous(books.len(), opts.jobs);
    let run_range = |range: (usize, usize)| -> Result<()> {
        run_worker(&books[range.0..range.1], opts, &writer, progress.as_ref())
    };

    if opts.jobs <= 1 || ranges.len() <= 1 {
        for range in ranges {
            run_range(range)?;
        }
    } else {
        let errors: Mutex<Vec<anyhow::Error>> = Mutex::new(Vec::new());
        let run_range = &run_range;
        std::thread::scope(|scope| {
            for range in ranges {
                let errors = &errors;
                scope.spawn(move || {
                    if let Err(e) = run_range(range) {
                        errors.lock().unwrap().push(e);
                    }
                });
            }
        });
        if let Some(e) = errors.into_inner().unwrap().into_iter().next() {
            return Err(e);
        }
    }

    if let Some(p) = &progress {
        p.finish(format!("indexed {} books", books.len()));
    }
    writer.finish()
}

/// One worker's sequential pass over its contiguous book range: tokenize,
/// absorb into its own `IndexBuilder`, flushing a compiled shard every
/// `chunk_size` books (plus a final flush at range end).
fn run_worker(
    jobs: &[BookJob],
    opts: &BuildOptions,
    writer: &ShardWriter,
    progress: Option<&ProgressScope>,
) -> Result<()> {
    let mut builder = IndexBuilder::new();
    for job in jobs {
        let text = fs::read(&job.absolute_path)
            .with_context(|| format!("read book file {}", job.absolute_path.display()))?;
        match tokenize_book(&text, opts.min_token_len, opts.checked_tokenizer) {
            Some(book) => {
                if book.error_count == 1 {
                    tracing::warn!(
                        path = %job.absolute_path.display(),
                        "1 invalid UTF-8 codepoint was ignored"
                    );
                } else if book.error_count > 1 {
                    tracing::warn!(
                        path = %job.absolute_path.display(),
                        count = book.error_count,
                        "invalid UTF-8 codepoints were ignored"
                    );
                }
                builder.add_book(&job.relative_path, &book.title, &book.content);
            }
            None => {
                tracing::warn!(
                    path = %job.absolute_path.display(),
                    "file has no newline separating title from content; skipped"
                );
            }
        }

        if let Some(p) = progress {
            p.inc(1);
        }

        if builder.book_count() >= opts.chunk_size {
            flush(&mut builder, writer)?;
        }
    }
    if !builder.is_empty() {
        flush(&mut builder, writer)?;
    }
    Ok(())
}

fn flush(builder: &mut IndexBuilder, writer: &ShardWriter) -> Result<()> {
    let finished = std::mem::take(builder);
    let shard = finished.build();
    tracing::debug!(books = shard.book_count, tokens = shard.token_count, "flushing shard");
    writer.append_shard(&shard.bytes)
}

/// Searches `tokens` (lowercased here, per §6.3) against the index at
/// `opts.index_path`.
pub fn search_index(opts: &SearchOptions, tokens: &[String]) -> Result<Vec<TokenHits>> {
    let shard_file = ShardFile::open(&opts.index_path)?;
    let lowered: Vec<String> = tokens.iter().map(|t| t.to_lowercase()).collect();
    let field = match opts.field {
        crate::config::SearchField::Title => FreqField::Title,
        crate::config::SearchField::Content => FreqField::Content,
    };
    Ok(query::search(&shard_file, &lowered, field, opts.jobs))
}
