//! Extraction of [`Book`] records from a Google Books volumes response.
//!
//! The response is expected to look like the following, where every field of `volumeInfo` is
//! optional:
//!
//! ```json
//! { "items": [ { "volumeInfo": { "title": "..", "authors": [".."], "description": ".." } } ] }
//! ```
//!
//! [`parse`] never fails: a body that cannot be read as this shape yields no records. Use
//! [`try_parse`] when the reason for an empty result matters.

use log::{trace, warn};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{book::render_authors, Book, Error, ErrorKind};

/// Parses the raw response text into a list of [`Book`]s in response order.
///
/// Empty or absent text yields an empty list, as does text that is not a valid response. The
/// failure is logged but not returned.
///
/// # Examples
///
/// ```
/// let json = r#"{"items":[{"volumeInfo":{"title":"Dune","authors":["Frank Herbert"]}}]}"#;
/// let books = booklist::parse(json);
///
/// assert_eq!(1, books.len());
/// assert_eq!("Frank Herbert", books[0].author());
/// assert_eq!("", books[0].description());
///
/// assert!(booklist::parse("not json").is_empty());
/// assert!(booklist::parse(None::<&str>).is_empty());
/// ```
#[must_use]
pub fn parse<'a, S>(raw: S) -> Vec<Book>
where
    S: Into<Option<&'a str>>,
{
    let raw = match raw.into() {
        Some(raw) if !raw.is_empty() => raw,
        _ => {
            trace!("Nothing to parse - no books");
            return Vec::new();
        }
    };

    try_parse(raw).unwrap_or_else(|err| {
        warn!("Problem parsing the books response: {err}");
        Vec::new()
    })
}

/// Parses the raw response text into a list of [`Book`]s, keeping the reason for a failure.
///
/// # Errors
///
/// An [`ErrorKind::Deserialize`] error is returned when the text is not valid JSON, is not an
/// object or has no `items` array. A response reporting `"totalItems": 0` without an `items`
/// array is a successful empty result.
pub fn try_parse(raw: &str) -> Result<Vec<Book>, Error> {
    if raw.is_empty() {
        return Ok(Vec::new());
    }

    let GoogleModel { total_items, items } =
        serde_json::from_str(raw).map_err(|e| Error::wrap(ErrorKind::Deserialize, e))?;

    let items = match (items, total_items) {
        (Some(items), _) => items,
        (None, Some(0)) => {
            trace!("Response reports zero matching volumes");
            Vec::new()
        }
        (None, _) => {
            return Err(Error::new(
                ErrorKind::Deserialize,
                "Response has no `items` array",
            ));
        }
    };

    let books = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let book = item
                .get("volumeInfo")
                .and_then(Value::as_object)
                .map(book_from_volume_info);
            if book.is_none() {
                warn!("Skipping item {index} as it has no `volumeInfo` object");
            }
            book
        })
        .collect::<Vec<_>>();

    trace!("Parsed {} book(s) from the response", books.len());
    Ok(books)
}

// Items are kept as raw values so one oddly typed field cannot reject the whole response.
#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct GoogleModel {
    #[serde(rename = "totalItems")]
    total_items: Option<u64>,
    items: Option<Vec<Value>>,
}

fn book_from_volume_info(info: &Map<String, Value>) -> Book {
    let field = |name: &str| info.get(name).map(field_text).unwrap_or_default();

    let authors = match info.get("authors") {
        Some(Value::Array(names)) => {
            let mut names = names.iter().map(field_text).collect::<Vec<_>>();
            names.retain(|name| !name.is_empty());
            render_authors(&names)
        }
        Some(other) => render_authors(&[field_text(other)]),
        None => String::new(),
    };

    Book::new(field("title"), authors, field("description"))
}

/// Renders a JSON value as display text: strings as is, `null` as empty and anything else as
/// its JSON text.
fn field_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
