//! Core data models for books, catalog files and search filters.

mod book;
mod filter;

pub use book::{Book, CatalogData, SelectOption};
pub use filter::{Filter, Selection};
