//! Detail panel for a single selected book.

use serde::{Deserialize, Serialize};

use super::LookupError;
use crate::catalog::Catalog;
use crate::models::Book;

/// Full record of the selected book, ready to display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detail {
    pub id: String,
    pub title: String,
    pub author_name: String,
    pub year: i32,
    pub description: String,
    pub image: String,
    pub genres: Vec<String>,
}

impl Detail {
    /// Line under the title: `Author (Year)`
    pub fn subtitle(&self) -> String {
        format!("{} ({})", self.author_name, self.year)
    }
}

/// Project a book onto its detail view
///
/// Fails on the first author or genre id the catalog does not know.
pub fn present(catalog: &Catalog, book: &Book) -> Result<Detail, LookupError> {
    let author_name = catalog
        .author_name(&book.author)
        .ok_or_else(|| LookupError::UnknownAuthor(book.author.clone()))?;

    let genres = book
        .genres
        .iter()
        .map(|id| {
            catalog
                .genre_name(id)
                .map(str::to_string)
                .ok_or_else(|| LookupError::UnknownGenre(id.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Detail {
        id: book.id.clone(),
        title: book.title.clone(),
        author_name: author_name.to_string(),
        year: book.year(),
        description: book.description.clone(),
        image: book.image.clone(),
        genres,
    })
}
