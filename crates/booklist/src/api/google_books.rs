use log::{info, warn};
use reqwest::Url;

use crate::{parse, Book, Error, ErrorKind};

use super::Client;

/// The Google Books volumes endpoint every search is sent to.
pub const BASE_URL: &str = "https://www.googleapis.com/books/v1/volumes";
/// The number of volumes requested per search.
pub const MAX_RESULTS: u8 = 10;

/// Builds the search url for `query`, the query text is form encoded.
///
/// # Errors
///
/// An [`ErrorKind::Url`] error is returned if the base url cannot be parsed.
pub fn search_url(query: &str) -> Result<Url, Error> {
    let mut url = Url::parse(BASE_URL).map_err(|e| Error::wrap(ErrorKind::Url, e))?;
    url.query_pairs_mut()
        .append_pair("maxResults", &MAX_RESULTS.to_string())
        .append_pair("q", query);
    Ok(url)
}

pub(crate) fn try_search_with<C: Client>(client: &C, query: &str) -> Result<Vec<Book>, Error> {
    info!("Searching for '{query}' using Google Books API");
    let url = search_url(query)?;
    let body = super::fetch_with(client, url.as_str())?;
    parse::try_parse(&body)
}

pub(crate) fn search_with<C: Client>(client: &C, query: &str) -> Vec<Book> {
    try_search_with(client, query).unwrap_or_else(|err| {
        warn!("Search for '{query}' produced no books: {err}");
        Vec::new()
    })
}
