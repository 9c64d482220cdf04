//! Library directory discovery: recursively finds `.txt` book files under a
//! library root, grounded in the teacher's `walkdir`-based discovery
//! (`discover_month_map`) but walking one directory tree instead of a flat
//! list of monthly files.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// One discovered book file: its path on disk plus the path used as its
/// `PathRef` source (relative to the library root, `/`-separated).
#[derive(Clone, Debug)]
pub struct BookJob {
    pub absolute_path: PathBuf,
    pub relative_path: String,
}

/// Recursively discovers every `*.txt` file under `library_root`, in
/// directory-walk order (not sorted — callers that need a deterministic
/// partition should sort the returned vector themselves).
pub fn discover_books(library_root: &Path) -> Vec<BookJob> {
    let mut jobs = Vec::new();
    for entry in WalkDir::new(library_root).into_iter().filter_map(Result::ok) {
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("txt") {
            continue;
        }
        let relative = path
            .strip_prefix(library_root)
            .unwrap_or(path)
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/");
        jobs.push(BookJob {
            absolute_path: path.to_path_buf(),
            relative_path: relative,
        });
    }
    jobs
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn discovers_nested_txt_files_and_skips_others() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), b"A\nbody").unwrap();
        fs::write(dir.path().join("ignore.md"), b"nope").unwrap();
        fs::create_dir_all(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("b.txt"), b"B\nbody").unwrap();

        let mut jobs = discover_books(dir.path());
        jobs.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].relative_path, "a.txt");
        assert_eq!(jobs[1].relative_path, "sub/b.txt");
    }
}
