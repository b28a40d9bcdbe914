//! The [`Book`] record produced for each search result item.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Characters removed from the flattened author list.
const AUTHOR_PUNCTUATION: [char; 7] = ['[', ']', '(', ')', '{', '}', '"'];

/// A single search result: title, author and description of a volume.
///
/// Fields missing from the API response are empty strings, never absent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    title: String,
    author: String,
    description: String,
}

impl Book {
    /// Creates a new [`Book`] from already rendered field values.
    #[must_use]
    pub const fn new(title: String, author: String, description: String) -> Self {
        Self {
            title,
            author,
            description,
        }
    }

    /// The title of the book.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The authors of the book as one display string, e.g. `Jane Doe,John Smith`.
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// The description of the book.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)?;
        if !self.author.is_empty() {
            write!(f, " ({})", self.author)?;
        }
        Ok(())
    }
}

/// Flattens a list of author names into a single comma separated string.
///
/// Bracket and double quote characters are stripped so the result reads as plain text.
pub(crate) fn render_authors(authors: &[String]) -> String {
    let mut rendered = authors.join(",");
    rendered.retain(|c| !AUTHOR_PUNCTUATION.contains(&c));
    rendered
}

#[cfg(test)]
mod tests {
    use super::{render_authors, Book};

    #[test]
    fn authors_are_joined_without_punctuation() {
        let authors = vec!["Jane Doe".to_owned(), "John Smith".to_owned()];
        let rendered = render_authors(&authors);

        assert_eq!("Jane Doe,John Smith", rendered);
        assert!(!rendered.contains(|c: char| "[](){}\"".contains(c)));
    }

    #[test]
    fn bracketed_names_lose_their_brackets() {
        let authors = vec!["\"Weird\" Al (Editor)".to_owned(), "{Anon}".to_owned()];
        assert_eq!("Weird Al Editor,Anon", render_authors(&authors));
    }

    #[test]
    fn no_authors_renders_empty() {
        assert_eq!("", render_authors(&[]));
    }

    #[test]
    fn display_shows_author_only_when_present() {
        let book = Book::new("Dune".to_owned(), "Frank Herbert".to_owned(), String::new());
        assert_eq!("Dune (Frank Herbert)", book.to_string());

        let book = Book::new("Dune".to_owned(), String::new(), String::new());
        assert_eq!("Dune", book.to_string());
    }
}
