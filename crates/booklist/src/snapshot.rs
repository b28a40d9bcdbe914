//! Saving and restoring the last result list.
//!
//! A front-end keeps its current result list across restarts by writing a [`Snapshot`] after a
//! successful search and loading it again on start up.

use std::{fs, path::Path};

use log::trace;
use serde::{Deserialize, Serialize};

use crate::{Book, Error, ErrorKind};

/// A search query together with the books it found.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    query: String,
    books: Vec<Book>,
}

impl Snapshot {
    /// Creates a new snapshot of the `books` found for `query`.
    #[must_use]
    pub const fn new(query: String, books: Vec<Book>) -> Self {
        Self { query, books }
    }

    /// The query the books were found with.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The saved books, in the order they were found.
    #[must_use]
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Consumes the snapshot and returns the saved books.
    #[must_use]
    pub fn into_books(self) -> Vec<Book> {
        self.books
    }

    /// Writes the snapshot as JSON to `path`, replacing any existing file.
    ///
    /// # Errors
    /// An [`ErrorKind::IO`] error is returned when the snapshot cannot be encoded or the file
    /// cannot be written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(|e| Error::wrap(ErrorKind::IO, e))?;

        fs::write(path, json).map_err(|e| Error::wrap(ErrorKind::IO, e))?;
        trace!("Saved {} book(s) to '{}'", self.books.len(), path.display());
        Ok(())
    }

    /// Reads a snapshot previously written by [`Snapshot::save`].
    ///
    /// # Errors
    /// An [`ErrorKind::IO`] error is returned when the file cannot be read and an
    /// [`ErrorKind::Deserialize`] error when its content is not a snapshot.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| Error::wrap(ErrorKind::IO, e))?;
        let snapshot: Self =
            serde_json::from_str(&json).map_err(|e| Error::wrap(ErrorKind::Deserialize, e))?;

        trace!(
            "Restored {} book(s) from '{}'",
            snapshot.books.len(),
            path.display()
        );
        Ok(snapshot)
    }
}
