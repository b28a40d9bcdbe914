use std::path::Path;

use crate::{app, file, interact};

use booklist::Book;

use clap::{Args, Subcommand};
use eyre::{eyre, Context};
use log::{trace, warn};

#[derive(Subcommand)]
#[non_exhaustive]
pub enum Commands {
    /// Search Google Books for books matching a phrase
    ///
    /// At most ten books are listed. Books found are saved so they can be shown again with the
    /// `last` command.
    #[clap(arg_required_else_help = true)]
    Search {
        /// The phrase to search for, multiple words are joined with a space
        #[clap(required = true)]
        query: Vec<String>,

        /// Report why nothing was found instead of only the empty message
        #[clap(short, long)]
        explain: bool,

        #[clap(flatten)]
        view: ViewOpts,
    },

    /// Show the books found by the last successful search
    Last {
        #[clap(flatten)]
        view: ViewOpts,
    },
}

#[derive(Debug, Args)]
pub struct ViewOpts {
    /// Choose a book from the list and show only that book
    #[clap(short, long, conflicts_with = "json")]
    interact: bool,

    /// Print the books as JSON
    #[clap(long)]
    json: bool,
}

impl Commands {
    pub fn execute(self, snapshot: &Path, quiet: bool) -> eyre::Result<String> {
        match self {
            Commands::Search {
                query,
                explain,
                view,
            } => {
                let query = query.join(" ");
                trace!("search subcommand called with the value of '{query}'");

                let outcome = app::search_in_background(&query, !quiet)?;
                if explain && outcome.as_ref().map_or(true, Vec::is_empty) {
                    return Ok(app::explain_empty(&outcome));
                }

                let books = outcome.unwrap_or_else(|err| {
                    warn!("Search for '{query}' failed: {err}");
                    Vec::new()
                });
                file::save_results(snapshot, &query, &books);
                view.show(books, quiet)
            }
            Commands::Last { view } => {
                let saved = file::restore_results(snapshot)?;
                trace!("Showing saved results of the search for '{}'", saved.query());
                view.show(saved.into_books(), quiet)
            }
        }
    }
}

impl ViewOpts {
    fn show(&self, books: Vec<Book>, quiet: bool) -> eyre::Result<String> {
        if self.json {
            return serde_json::to_string_pretty(&books)
                .wrap_err_with(|| eyre!("Cannot write the books as JSON"));
        }

        // `quiet` and `interact` cannot be used together
        if self.interact && !quiet && !books.is_empty() {
            trace!("Interact mode enabled");
            return interact::user_select_book(books).map(|book| app::render_book(&book));
        }

        Ok(app::render_books(&books))
    }
}
