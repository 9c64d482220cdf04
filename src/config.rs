//! Builder-pattern configuration for the build and search pipelines, in the
//! same shape as the teacher's `ETLOptions`/`RedditETL` configuration: a
//! `Default` impl plus chaining `with_*` setters.

use std::path::{Path, PathBuf};

/// Options controlling one `bookdex-build` run.
#[derive(Clone, Debug)]
pub struct BuildOptions {
    pub library_path: PathBuf,
    pub index_path: PathBuf,
    /// `false` selects the unchecked (byte-oriented) tokenizer.
    pub checked_tokenizer: bool,
    /// Minimum token length; tokens shorter than this are dropped.
    pub min_token_len: Option<usize>,
    /// Total worker threads. `1` means single-threaded.
    pub jobs: usize,
    /// Shard flush threshold, in books absorbed by one worker.
    pub chunk_size: usize,
    pub progress: bool,
}

impl BuildOptions {
    pub fn new(library_path: impl AsRef<Path>, index_path: impl AsRef<Path>) -> Self {
        Self {
            library_path: library_path.as_ref().to_path_buf(),
            index_path: index_path.as_ref().to_path_buf(),
            checked_tokenizer: true,
            min_token_len: None,
            jobs: 1,
            chunk_size: 5000,
            progress: true,
        }
    }

    pub fn with_checked_tokenizer(mut self, checked: bool) -> Self {
        self.checked_tokenizer = checked;
        self
    }

    pub fn with_min_token_len(mut self, len: usize) -> Self {
        self.min_token_len = Some(len);
        self
    }

    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn with_progress(mut self, yes: bool) -> Self {
        self.progress = yes;
        self
    }
}

/// Which frequency channel a `bookdex-search` run targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchField {
    Title,
    Content,
}

/// Options controlling one `bookdex-search` run.
#[derive(Clone, Debug)]
pub struct SearchOptions {
    pub index_path: PathBuf,
    pub field: SearchField,
    /// Parallel shard workers. `0` means search on the calling thread only.
    pub jobs: usize,
}

impl SearchOptions {
    pub fn new(index_path: impl AsRef<Path>) -> Self {
        Self {
            index_path: index_path.as_ref().to_path_buf(),
            field: SearchField::Content,
            jobs: 0,
        }
    }

    pub fn with_field(mut self, field: SearchField) -> Self {
        self.field = field;
        self
    }

    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }
}
