//! Catalog store.

use std::collections::HashMap;
use std::path::Path;

use super::CatalogError;
use crate::config::IntegrityMode;
use crate::models::{Book, CatalogData, Filter, SelectOption};

const EMBEDDED_CATALOG: &str = include_str!("../../data/catalog.json");

/// Immutable set of books, authors and genres
#[derive(Debug, Clone)]
pub struct Catalog {
    books: Vec<Book>,
    index: HashMap<String, usize>,
    authors: HashMap<String, String>,
    genres: HashMap<String, String>,
}

impl Catalog {
    /// Build a catalog, checking that ids are unique and references resolve
    ///
    /// Duplicate book ids are always rejected. Unknown author or genre
    /// references are rejected in [`IntegrityMode::Strict`] and only logged
    /// in [`IntegrityMode::Lenient`].
    pub fn new(data: CatalogData, mode: IntegrityMode) -> Result<Self, CatalogError> {
        let CatalogData {
            books,
            authors,
            genres,
        } = data;

        let mut index = HashMap::with_capacity(books.len());
        for (position, book) in books.iter().enumerate() {
            if index.insert(book.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateBook(book.id.clone()));
            }

            if !authors.contains_key(&book.author) {
                let err = CatalogError::UnknownAuthor {
                    book: book.id.clone(),
                    author: book.author.clone(),
                };
                match mode {
                    IntegrityMode::Strict => return Err(err),
                    IntegrityMode::Lenient => tracing::warn!("{}", err),
                }
            }

            for genre in book.genres.iter().filter(|g| !genres.contains_key(*g)) {
                let err = CatalogError::UnknownGenre {
                    book: book.id.clone(),
                    genre: genre.clone(),
                };
                match mode {
                    IntegrityMode::Strict => return Err(err),
                    IntegrityMode::Lenient => tracing::warn!("{}", err),
                }
            }
        }

        tracing::debug!(
            books = books.len(),
            authors = authors.len(),
            genres = genres.len(),
            "catalog loaded"
        );

        Ok(Self {
            books,
            index,
            authors,
            genres,
        })
    }

    /// Parse a catalog from JSON text
    pub fn from_json(json: &str, mode: IntegrityMode) -> Result<Self, CatalogError> {
        let data: CatalogData = serde_json::from_str(json)?;
        Self::new(data, mode)
    }

    /// Load a catalog from a JSON file
    pub fn load(path: &Path, mode: IntegrityMode) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!("Loading catalog from {}", path.display());
        Self::from_json(&json, mode)
    }

    /// The sample catalog compiled into the binary
    pub fn embedded(mode: IntegrityMode) -> Result<Self, CatalogError> {
        Self::from_json(EMBEDDED_CATALOG, mode)
    }

    /// All books matching `filter`, in catalog order
    pub fn query(&self, filter: &Filter) -> Vec<&Book> {
        let matcher = filter.matcher();
        let results: Vec<&Book> = self.books.iter().filter(|b| matcher.matches(b)).collect();
        tracing::debug!(
            title = %filter.title,
            author = %filter.author,
            genre = %filter.genre,
            matches = results.len(),
            "catalog query"
        );
        results
    }

    /// Look up a book by id
    pub fn book(&self, id: &str) -> Option<&Book> {
        self.index.get(id).map(|&i| &self.books[i])
    }

    pub fn author_name(&self, id: &str) -> Option<&str> {
        self.authors.get(id).map(String::as_str)
    }

    pub fn genre_name(&self, id: &str) -> Option<&str> {
        self.genres.get(id).map(String::as_str)
    }

    /// Author picker entries: "All Authors" first, then authors by name
    pub fn author_options(&self) -> Vec<SelectOption> {
        options("All Authors", &self.authors)
    }

    /// Genre picker entries: "All Genres" first, then genres by name
    pub fn genre_options(&self) -> Vec<SelectOption> {
        options("All Genres", &self.genres)
    }

    pub fn authors(&self) -> impl Iterator<Item = (&str, &str)> {
        self.authors.iter().map(|(id, name)| (id.as_str(), name.as_str()))
    }

    pub fn genres(&self) -> impl Iterator<Item = (&str, &str)> {
        self.genres.iter().map(|(id, name)| (id.as_str(), name.as_str()))
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

fn options(all_label: &str, names: &HashMap<String, String>) -> Vec<SelectOption> {
    let mut entries: Vec<(&String, &String)> = names.iter().collect();
    entries.sort_by(|a, b| a.1.cmp(b.1).then_with(|| a.0.cmp(b.0)));

    std::iter::once(SelectOption::new("any", all_label))
        .chain(entries.into_iter().map(|(id, name)| SelectOption::new(id, name)))
        .collect()
}
