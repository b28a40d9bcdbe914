use std::path::{Path, PathBuf};

use booklist::{snapshot::Snapshot, Book};

use eyre::{eyre, Context, Result};
use log::{info, trace, warn};

const DEFAULT_SNAPSHOT: &str = ".booklist.json";

pub fn snapshot_path(file_name: Option<PathBuf>) -> PathBuf {
    file_name.unwrap_or_else(|| {
        trace!("'file' option not used - using {DEFAULT_SNAPSHOT} in current directory");
        PathBuf::from(DEFAULT_SNAPSHOT)
    })
}

/// Saves the results of a search, only a search that found books replaces the saved results.
pub fn save_results(path: &Path, query: &str, books: &[Book]) {
    if books.is_empty() {
        trace!("No books found - keeping the previously saved results");
        return;
    }

    match Snapshot::new(query.to_owned(), books.to_vec()).save(path) {
        Ok(()) => info!("Saved results to '{}'", path.display()),
        Err(err) => warn!("Could not save results to '{}': {err}", path.display()),
    }
}

pub fn restore_results(path: &Path) -> Result<Snapshot> {
    if !path.exists() {
        return Err(eyre!(
            "No saved results found at '{}' - run a search first",
            path.display()
        ));
    }

    Snapshot::load(path)
        .wrap_err_with(|| eyre!("Cannot restore saved results from '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use assert_fs::TempDir;
    use booklist::Book;

    use super::{restore_results, save_results, snapshot_path};

    #[test]
    fn default_snapshot_is_in_current_directory() {
        assert_eq!(
            std::path::PathBuf::from(".booklist.json"),
            snapshot_path(None)
        );
    }

    #[test]
    fn empty_results_do_not_replace_saved_results() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("saved.json");
        let dune = Book::new("Dune".to_owned(), "Frank Herbert".to_owned(), String::new());

        save_results(&path, "dune", &[dune.clone()]);
        save_results(&path, "zzzz", &[]);

        let snapshot = restore_results(&path).unwrap();
        assert_eq!("dune", snapshot.query());
        assert_eq!(&[dune], snapshot.books());
    }

    #[test]
    fn restoring_without_saved_results_fails() {
        let dir = TempDir::new().unwrap();
        let err = restore_results(&dir.path().join("saved.json")).unwrap_err();
        assert!(err.to_string().contains("run a search first"));
    }
}
