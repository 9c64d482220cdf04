//! `bookdex-build [index-path] [library-path] [options]` — discovers every
//! `.txt` book under `library-path`, tokenizes and indexes it, and writes
//! the compiled shard file to `index-path`. See §6.2 of the design notes.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use bookdex::{build_index, init_tracing_once, BuildOptions};

/// Build a compact full-text index for a library of plain-text books.
#[derive(Parser, Debug)]
#[command(name = "bookdex-build", version, about)]
struct Cli {
    /// Path the compiled index file is written to.
    index_path: PathBuf,

    /// Root directory to recursively scan for `.txt` book files.
    library_path: PathBuf,

    /// Use the unchecked (byte-oriented) tokenizer instead of the
    /// UTF-8-checked one.
    #[arg(short = 'n', long = "no-check")]
    no_check: bool,

    /// Drop tokens shorter than this many bytes.
    #[arg(short, long, value_name = "N")]
    filter: Option<usize>,

    /// Total worker thread count; 1 means single-threaded.
    #[arg(short, long, default_value_t = 1)]
    jobs: usize,

    /// Shard flush threshold, in books absorbed by one worker.
    #[arg(short, long, default_value_t = 5000)]
    chunk: usize,

    /// Suppress the progress bar.
    #[arg(long)]
    no_progress: bool,
}

fn main() -> Result<()> {
    init_tracing_once();
    let cli = Cli::parse();

    let mut opts = BuildOptions::new(&cli.library_path, &cli.index_path)
        .with_checked_tokenizer(!cli.no_check)
        .with_jobs(cli.jobs)
        .with_chunk_size(cli.chunk)
        .with_progress(!cli.no_progress);
    if let Some(f) = cli.filter {
        opts = opts.with_min_token_len(f);
    }

    build_index(&opts)
}
