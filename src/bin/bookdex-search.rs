//! `bookdex-search [index-path] [options] [tokens...]` — loads a compiled
//! index (mmap) and reports, per token, the book paths whose title or
//! content frequency for that token is nonzero. See §6.3.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;

use bookdex::{init_tracing_once, search_index, SearchField, SearchOptions};

/// Search a compiled bookdex index for one or more tokens.
#[derive(Parser, Debug)]
#[command(name = "bookdex-search", version, about)]
struct Cli {
    /// Path to a compiled index file.
    index_path: PathBuf,

    /// Search title frequencies instead of content.
    #[arg(short, long)]
    title: bool,

    /// Search content frequencies (default).
    #[arg(short, long)]
    content: bool,

    /// Parallel shard workers; 0 searches on the calling thread.
    #[arg(short, long, default_value_t = 0)]
    jobs: usize,

    /// Tokens to look up (lowercased before matching).
    tokens: Vec<String>,
}

fn main() -> Result<()> {
    init_tracing_once();
    let cli = Cli::parse();

    let field = if cli.title && !cli.content {
        SearchField::Title
    } else {
        SearchField::Content
    };

    println!("Loading index from '{}'.", cli.index_path.display());
    let start = Instant::now();

    let opts = SearchOptions::new(&cli.index_path).with_field(field).with_jobs(cli.jobs);
    let results = search_index(&opts, &cli.tokens)?;

    for hit in &results {
        if hit.paths.is_empty() {
            println!("{} not found.", hit.token);
        } else {
            println!("{}:", hit.token);
            for path in &hit.paths {
                println!("{path}");
            }
        }
    }

    println!(
        "Successfully searched tokens. time: {:.3} s.",
        start.elapsed().as_secs_f64()
    );
    Ok(())
}
