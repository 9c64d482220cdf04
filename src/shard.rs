//! Length-prefixed shard framing for the on-disk index file, and the
//! mmap-backed reader that splits it back into per-shard byte slices.
//!
//! Grounded in `examples/original_source/src/build.cpp` (mutex-guarded
//! sequential appends from worker threads) and `src/search.cpp` (the
//! `mmap` + walk-the-length-prefixes loop that recovers shard
//! boundaries), with the mutex itself following the teacher's
//! `parking_lot::Mutex`-guarded sharded writer (`src/shard.rs`).

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use memmap2::Mmap;
use parking_lot::Mutex;

/// Appends length-prefixed compiled shards to the output file. The file
/// handle is the only resource build-time workers share; every append is
/// serialized behind `inner`.
pub struct ShardWriter {
    inner: Mutex<BufWriter<File>>,
}

impl ShardWriter {
    pub fn create(index_path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(index_path)
            .with_context(|| format!("create index file {}", index_path.display()))?;
        Ok(Self {
            inner: Mutex::new(BufWriter::new(file)),
        })
    }

    /// Appends one compiled shard: `[u64 len][len bytes]`.
    pub fn append_shard(&self, bytes: &[u8]) -> Result<()> {
        let mut w = self.inner.lock();
        w.write_all(&(bytes.len() as u64).to_ne_bytes())?;
        w.write_all(bytes)?;
        Ok(())
    }

    pub fn finish(self) -> Result<()> {
        self.inner.lock().flush()?;
        Ok(())
    }
}

/// Owns the mmap of a built index file and the byte offsets of each shard
/// within it. `IndexView`s constructed from [`shard_bytes`] borrow directly
/// from the mapped region.
pub struct ShardFile {
    mmap: Mmap,
    shards: Vec<(usize, usize)>, // (start, end) byte ranges of each shard's payload
}

impl ShardFile {
    /// Maps `index_path` read-only and scans it into shard byte ranges.
    pub fn open(index_path: &Path) -> Result<Self> {
        let file = File::open(index_path)
            .with_context(|| format!("open index file {}", index_path.display()))?;
        let mmap = unsafe { Mmap::map(&file) }
            .with_context(|| format!("mmap index file {}", index_path.display()))?;
        let shards = scan_shards(&mmap)?;
        Ok(Self { mmap, shards })
    }

    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    pub fn shard_bytes(&self, i: usize) -> &[u8] {
        let (start, end) = self.shards[i];
        &self.mmap[start..end]
    }
}

fn scan_shards(bytes: &[u8]) -> Result<Vec<(usize, usize)>> {
    let mut shards = Vec::new();
    let mut pos = 0usize;
    while pos < bytes.len() {
        anyhow::ensure!(
            pos + 8 <= bytes.len(),
            "truncated shard length prefix at offset {pos}"
        );
        let len = u64::from_ne_bytes(bytes[pos..pos + 8].try_into().unwrap()) as usize;
        pos += 8;
        anyhow::ensure!(
            pos + len <= bytes.len(),
            "truncated shard body at offset {pos} (declared len {len})"
        );
        shards.push((pos, pos + len));
        pos += len;
    }
    Ok(shards)
}
