use booklist::Book;
use dialoguer::Select;
use eyre::{eyre, Context, Result};

pub fn user_select<S: ToString>(prompt: &str, items: &[S]) -> Result<usize> {
    let selection = Select::with_theme(&dialoguer::theme::ColorfulTheme::default())
        .with_prompt(prompt)
        .default(0)
        .items(items)
        .interact_opt()
        .wrap_err_with(|| eyre!("User selection cancelled"))?;

    if let Some(index) = selection {
        Ok(index)
    } else {
        Err(eyre!("No selection made - cancelling operation"))
    }
}

pub fn user_select_book(mut books: Vec<Book>) -> Result<Book> {
    let items = books.iter().map(ToString::to_string).collect::<Vec<_>>();
    user_select("Choose a book", &items).map(|i| books.remove(i))
}
