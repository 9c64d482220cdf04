mod concurrency;
mod config;
mod container;
mod error;
mod index_builder;
mod mast;
mod paths;
mod pipeline;
mod progress;
mod query;
mod shard;
mod tokenizer;
mod util;

pub use crate::config::{BuildOptions, SearchField, SearchOptions};
pub use crate::container::{compile as compile_container, BookEntry, FreqField, IndexView};
pub use crate::error::BuilderError;
pub use crate::index_builder::{CompiledShard, IndexBuilder};
pub use crate::mast::{compile_mast, Arc, CompiledFst, CompiledMast, MastBuilder, State, StateId};
pub use crate::paths::{discover_books, BookJob};
pub use crate::pipeline::{build_index, search_index};
pub use crate::progress::{make_count_progress, set_global_multiprogress, ProgressScope};
pub use crate::query::{search as search_shards, TokenHits};
pub use crate::shard::{ShardFile, ShardWriter};
pub use crate::tokenizer::{tokenize_book, Book};
pub use crate::util::init_tracing_once;
