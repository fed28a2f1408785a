//! Preview cards shown in the result list.

use serde::{Deserialize, Serialize};

use super::LookupError;
use crate::catalog::Catalog;
use crate::models::Book;

/// Abbreviated book summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preview {
    pub id: String,
    pub title: String,
    pub author_name: String,
    pub image: String,
}

/// Project a book onto its preview, resolving the author's name
pub fn summarize(catalog: &Catalog, book: &Book) -> Result<Preview, LookupError> {
    let author_name = catalog
        .author_name(&book.author)
        .ok_or_else(|| LookupError::UnknownAuthor(book.author.clone()))?;

    Ok(Preview {
        id: book.id.clone(),
        title: book.title.clone(),
        author_name: author_name.to_string(),
        image: book.image.clone(),
    })
}
