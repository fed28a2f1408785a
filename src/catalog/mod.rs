//! The in-memory catalog: loading, querying and paging.
//!
//! - [`Catalog`]: books plus author/genre names; answers [`Filter`](crate::models::Filter) queries
//! - [`Cursor`]: how much of a result set has been revealed
//! - [`resolve_author`] / [`resolve_genre`]: turn user input (id or name) into a selection
//!
//! # Example
//!
//! ```rust
//! use book_connect::catalog::{Catalog, Cursor};
//! use book_connect::config::IntegrityMode;
//! use book_connect::models::Filter;
//! use std::num::NonZeroUsize;
//!
//! let catalog = Catalog::embedded(IntegrityMode::Strict).unwrap();
//! let results = catalog.query(&Filter::new().title("war"));
//!
//! let mut cursor = Cursor::new(NonZeroUsize::new(10).unwrap());
//! cursor.reset(results.len());
//! assert_eq!(cursor.remaining(), results.len().saturating_sub(10));
//! ```

mod cursor;
mod resolve;
mod store;

pub use cursor::Cursor;
pub use resolve::{resolve_author, resolve_genre, Resolution};
pub use store::Catalog;

use std::path::PathBuf;

/// Errors raised while loading a catalog
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate book id '{0}'")]
    DuplicateBook(String),

    #[error("book '{book}' references unknown author '{author}'")]
    UnknownAuthor { book: String, author: String },

    #[error("book '{book}' references unknown genre '{genre}'")]
    UnknownGenre { book: String, genre: String },
}
