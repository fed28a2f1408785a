//! Book model and the on-disk catalog shape.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single book in the catalog
///
/// Books are immutable once the catalog is loaded. Field names follow the
/// JSON dataset (`author`, `image`, `published`, `genres`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Unique identifier
    pub id: String,

    /// Book title
    pub title: String,

    /// Author id (key into the catalog's author map)
    pub author: String,

    /// Cover image URL
    pub image: String,

    /// Blurb shown in the detail panel
    #[serde(default)]
    pub description: String,

    /// Publication timestamp
    pub published: DateTime<Utc>,

    /// Genre ids (keys into the catalog's genre map)
    #[serde(default)]
    pub genres: Vec<String>,
}

impl Book {
    /// Publication year
    pub fn year(&self) -> i32 {
        self.published.year()
    }

    /// Check whether the book is tagged with the given genre id
    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }
}

/// Raw catalog as stored in JSON: books plus the author and genre name maps
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogData {
    #[serde(default)]
    pub books: Vec<Book>,

    #[serde(default)]
    pub authors: HashMap<String, String>,

    #[serde(default)]
    pub genres: HashMap<String, String>,
}

/// One entry of an author or genre picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Value submitted with the filter (`any` or an id)
    pub value: String,

    /// Text shown to the user
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}
