//! Contiguous-range worker partitioning, matching the teacher's
//! `for_each_file_limited` chunking idiom but for the build-time layer's
//! exact requirement: split a file list into `jobs` contiguous ranges, one
//! per worker, with the remainder absorbed by the last range.

/// Splits `len` items into up to `jobs` contiguous, roughly-equal ranges.
/// Returns the `(start, end)` bounds of each non-empty range; with
/// `jobs <= 1` this returns a single `(0, len)` range.
pub fn partition_contiguous(len: usize, jobs: usize) -> Vec<(usize, usize)> {
    let jobs = jobs.max(1);
    if len == 0 {
        return Vec::new();
    }
    let jobs = jobs.min(len);
    let base = len / jobs;
    let rem = len % jobs;

    let mut ranges = Vec::with_capacity(jobs);
    let mut start = 0;
    for i in 0..jobs {
        let size = base + if i < rem { 1 } else { 0 };
        let end = start + size;
        if size > 0 {
            ranges.push((start, end));
        }
        start = end;
    }
    ranges
}
