//! # Book Connect
//!
//! Browse a book catalog from the terminal: filter by title, author and genre,
//! page through the results, open a book's details and switch between a day
//! and a night theme.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Core data structures (Book, Filter, Selection)
//! - [`catalog`]: The in-memory catalog, its query engine and the pagination cursor
//! - [`render`]: Projection of books into previews and detail panels
//! - [`session`]: Event dispatch over a single browsing session
//! - [`theme`]: Day/night palettes
//! - [`ui`]: Terminal rendering and the interactive prompt
//! - [`config`]: Configuration management

pub mod catalog;
pub mod config;
pub mod models;
pub mod render;
pub mod session;
pub mod theme;
pub mod ui;

// Re-export commonly used types
pub use catalog::{Catalog, Cursor};
pub use models::{Book, Filter};
pub use session::{Event, Session, Update};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
