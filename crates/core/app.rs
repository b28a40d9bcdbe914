use std::{
    fmt::Write as _,
    io::{self, Write as _},
    time::Duration,
};

use booklist::{worker::Searcher, Book, Error};
use eyre::{eyre, Context};
use log::trace;

/// Shown whenever a search produces no books, for whatever reason.
pub const EMPTY_STATE: &str = "No books found";

const INDICATOR_TICK: Duration = Duration::from_millis(250);

/// Runs the search on a background [`Searcher`] while this thread draws the loading indicator.
pub fn search_in_background(
    query: &str,
    show_progress: bool,
) -> eyre::Result<Result<Vec<Book>, Error>> {
    let searcher = Searcher::new().wrap_err_with(|| eyre!("Cannot start the search"))?;
    let ticket = searcher.submit(query)?;

    if show_progress {
        eprint!("Searching for '{query}'");
    }

    let result = loop {
        if let Some(result) = searcher.recv_timeout(INDICATOR_TICK)? {
            if searcher.is_latest(result.ticket) {
                break result;
            }
            trace!("Discarding stale result of search {}", result.ticket);
        } else if show_progress {
            eprint!(".");
            let _ = io::stderr().flush();
        }
    };

    if show_progress {
        eprintln!();
    }

    trace!("Search {ticket} completed");
    Ok(result.outcome)
}

/// Renders a single book, empty fields are left out.
pub fn render_book(book: &Book) -> String {
    let mut out = book.title().to_owned();
    if !book.author().is_empty() {
        let _ = write!(out, "\n  by {}", book.author());
    }
    if !book.description().is_empty() {
        let _ = write!(out, "\n  {}", book.description());
    }
    out
}

/// Renders the books as a numbered list or the empty state when there are none.
pub fn render_books(books: &[Book]) -> String {
    if books.is_empty() {
        return EMPTY_STATE.to_owned();
    }

    books
        .iter()
        .enumerate()
        .map(|(i, book)| format!("{}. {}", i + 1, render_book(book)))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Describes why a search ended up with no books.
pub fn explain_empty(outcome: &Result<Vec<Book>, Error>) -> String {
    match outcome {
        Ok(_) => format!("{EMPTY_STATE}: the search matched no volumes"),
        Err(err) => format!("{EMPTY_STATE}: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use booklist::{Book, Error, ErrorKind};

    use super::{explain_empty, render_book, render_books, EMPTY_STATE};

    fn dune() -> Book {
        Book::new(
            "Dune".to_owned(),
            "Frank Herbert".to_owned(),
            "A novel.".to_owned(),
        )
    }

    #[test]
    fn no_books_renders_empty_state() {
        assert_eq!(EMPTY_STATE, render_books(&[]));
    }

    #[test]
    fn books_are_numbered() {
        let untitled = Book::new(String::new(), String::new(), "Just a description".to_owned());
        let rendered = render_books(&[dune(), untitled]);

        assert_eq!(
            "1. Dune\n  by Frank Herbert\n  A novel.\n\n2. \n  Just a description",
            rendered
        );
    }

    #[test]
    fn empty_fields_are_skipped() {
        let book = Book::new("Dune".to_owned(), String::new(), String::new());
        assert_eq!("Dune", render_book(&book));
    }

    #[test]
    fn empty_results_are_explained() {
        assert_eq!(
            "No books found: the search matched no volumes",
            explain_empty(&Ok(vec![]))
        );

        let outcome = Err(Error::new(ErrorKind::Status, "Error response code: 404 Not Found"));
        assert_eq!(
            "No books found: Status error: Error response code: 404 Not Found",
            explain_empty(&outcome)
        );
    }
}
