#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]
#![warn(missing_docs, rust_2018_idioms)]
#![allow(clippy::module_name_repetitions)]

//! # booklist
//!
//! booklist searches the Google Books API for a phrase and turns the response into a short list
//! of [`Book`] records (title, author and description).
//!
//! The crate is split into a fetcher ([`fetch`]) that performs a single blocking GET and a parser
//! ([`parse`]) that extracts the records from the JSON text. [`search`] composes both and is the
//! call a front-end makes once per user search. Front-ends that must not block can run searches
//! through a [`worker::Searcher`] and keep the last result list with a [`snapshot::Snapshot`].
//!
//! ```no_run
//! for book in booklist::search("frank herbert dune") {
//!     println!("{}: {}", book.title(), book.author());
//! }
//! ```

mod api;
mod book;
mod error;
pub mod parse;
pub mod snapshot;
pub mod worker;

pub use api::google_books::{search_url, BASE_URL, MAX_RESULTS};
pub use api::{CONNECT_TIMEOUT, READ_TIMEOUT};
pub use book::Book;
pub use error::{Error, ErrorKind};
pub use parse::{parse, try_parse};
pub use reqwest::Url;

use log::{error, trace};

/// Fetches the body text at `url` with a single blocking GET.
///
/// The request uses the fixed [`CONNECT_TIMEOUT`] and [`READ_TIMEOUT`] and is never retried.
///
/// # Errors
///
/// An [`ErrorKind::Url`] error is returned when `url` is malformed, no request is sent.
/// An [`ErrorKind::IO`] error is returned on a transport failure such as a timeout.
/// An [`ErrorKind::Status`] error is returned when the response status is not `200 OK`.
/// An [`ErrorKind::Deserialize`] error is returned when the body is not valid text.
pub fn fetch(url: &str) -> Result<String, Error> {
    trace!("Fetch text at url of '{url}'");
    let client = api::http_client()?;
    api::fetch_with(&client, url)
}

/// Search for books matching `query`, with at most [`MAX_RESULTS`] books returned.
///
/// Every failure, whether building the url, performing the request or reading the response,
/// results in an empty list. Use [`try_search`] to find out why a search found nothing.
#[must_use]
pub fn search(query: &str) -> Vec<Book> {
    trace!("Search books matching '{query}'");
    match api::http_client() {
        Ok(client) => api::google_books::search_with(&client, query),
        Err(err) => {
            error!("Unable to create the HTTP client: {err}");
            Vec::new()
        }
    }
}

/// Search for books matching `query`, keeping the reason for a failed search.
///
/// An empty list means the search succeeded but found no books.
///
/// # Errors
///
/// An `Err` is returned when the url cannot be built ([`ErrorKind::Url`]), the request fails
/// ([`ErrorKind::IO`], [`ErrorKind::Status`]) or the response is not a valid volumes response
/// ([`ErrorKind::Deserialize`]).
pub fn try_search(query: &str) -> Result<Vec<Book>, Error> {
    trace!("Search books matching '{query}'");
    let client = api::http_client()?;
    api::google_books::try_search_with(&client, query)
}
