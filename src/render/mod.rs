//! Projection of books into display-ready previews and detail panels.
//!
//! [`summarize`] and [`present`] are pure and fail on dangling author or genre
//! ids. [`Renderer`] applies the configured [`IntegrityMode`]: strict passes the
//! error through, lenient logs it and substitutes a placeholder.

mod detail;
mod preview;

pub use detail::{present, Detail};
pub use preview::{summarize, Preview};

use crate::catalog::Catalog;
use crate::config::IntegrityMode;
use crate::models::Book;

/// Shown in place of an author name the catalog cannot resolve
pub const UNKNOWN_AUTHOR: &str = "Unknown author";

/// A book references an id missing from the catalog
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("unknown author id '{0}'")]
    UnknownAuthor(String),

    #[error("unknown genre id '{0}'")]
    UnknownGenre(String),
}

/// Builds previews and details under an integrity policy
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    mode: IntegrityMode,
}

impl Renderer {
    pub fn new(mode: IntegrityMode) -> Self {
        Self { mode }
    }

    pub fn preview(&self, catalog: &Catalog, book: &Book) -> Result<Preview, LookupError> {
        match summarize(catalog, book) {
            Err(err) if self.mode == IntegrityMode::Lenient => {
                tracing::warn!(book = %book.id, "{}", err);
                Ok(Preview {
                    id: book.id.clone(),
                    title: book.title.clone(),
                    author_name: UNKNOWN_AUTHOR.to_string(),
                    image: book.image.clone(),
                })
            }
            result => result,
        }
    }

    /// Previews for a slice of results, in order
    pub fn previews(&self, catalog: &Catalog, books: &[&Book]) -> Result<Vec<Preview>, LookupError> {
        books.iter().map(|book| self.preview(catalog, book)).collect()
    }

    pub fn detail(&self, catalog: &Catalog, book: &Book) -> Result<Detail, LookupError> {
        match present(catalog, book) {
            Err(err) if self.mode == IntegrityMode::Lenient => {
                tracing::warn!(book = %book.id, "{}", err);
                Ok(Detail {
                    id: book.id.clone(),
                    title: book.title.clone(),
                    author_name: catalog
                        .author_name(&book.author)
                        .unwrap_or(UNKNOWN_AUTHOR)
                        .to_string(),
                    year: book.year(),
                    description: book.description.clone(),
                    image: book.image.clone(),
                    genres: book
                        .genres
                        .iter()
                        .filter_map(|id| catalog.genre_name(id))
                        .map(str::to_string)
                        .collect(),
                })
            }
            result => result,
        }
    }
}
