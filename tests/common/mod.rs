use std::fs;
use std::path::{Path, PathBuf};

/// Writes one book file (`title\ncontent`) under `lib_dir`, creating parent
/// directories as needed, and returns the path it was written to.
pub fn write_book(lib_dir: &Path, relative_path: &str, title: &str, content: &str) -> PathBuf {
    let path = lib_dir.join(relative_path);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, format!("{title}\n{content}")).unwrap();
    path
}

/// Builds a tiny library directory matching spec.md §8 scenario 4:
/// - `lib/a.txt`: title "hello", content "world hello world"
/// - `lib/b.txt`: title "world", content "hello"
///
/// Each word is followed by a period so the checked tokenizer's
/// unterminated-trailing-token rule doesn't swallow the last word of a
/// region.
pub fn make_small_library() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_book(dir.path(), "lib/a.txt", "hello.", "world hello world.");
    write_book(dir.path(), "lib/b.txt", "world.", "hello.");
    dir
}
