//! Discovery of candidate files to format.
//!
//! The change set is the union of tracked files that differ from HEAD
//! (deletions excluded) and untracked files, restricted to Python sources,
//! as absolute paths under the repository root.

use crate::git::{GitCommandError, Repo};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Extension of the source files this tool formats
pub const SOURCE_EXTENSION: &str = "py";

/// Whether a path names a formattable source file
pub fn is_source_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION)
}

/// Changed and untracked source files, absolute, deduplicated, and sorted
/// lexicographically.
///
/// Paths come back relative from git and are joined against the repository
/// root, so the result is independent of the invocation directory.
pub fn changed_source_files(repo: &Repo) -> Result<Vec<PathBuf>, GitCommandError> {
    let mut files: BTreeSet<PathBuf> = BTreeSet::new();

    for relative in repo.changed_files()? {
        let path = repo.root().join(&relative);
        if is_source_file(&path) {
            files.insert(path);
        }
    }

    for relative in repo.untracked_files()? {
        let path = repo.root().join(&relative);
        if is_source_file(&path) {
            files.insert(path);
        }
    }

    Ok(files.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn python_files_match() {
        assert!(is_source_file(Path::new("app.py")));
        assert!(is_source_file(Path::new("pkg/nested/module.py")));
    }

    #[test]
    fn other_extensions_do_not_match() {
        assert!(!is_source_file(Path::new("notes.txt")));
        assert!(!is_source_file(Path::new("lib.rs")));
        assert!(!is_source_file(Path::new("script.pyc")));
    }

    #[test]
    fn extensionless_paths_do_not_match() {
        assert!(!is_source_file(Path::new("Makefile")));
        assert!(!is_source_file(Path::new("py")));
    }

    #[test]
    fn directory_named_like_source_does_not_match() {
        // Only the final component's extension counts
        assert!(!is_source_file(Path::new("tools.py/readme")));
    }
}
