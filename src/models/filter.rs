//! Search filter submitted from the search form.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Book;

/// Value of an author or genre picker: everything, or one id
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Selection {
    #[default]
    Any,
    Only(String),
}

impl Selection {
    /// Literal used by pickers for "no restriction"
    pub const ANY: &'static str = "any";

    /// Parse a submitted picker value. Only the exact literal `any` means
    /// [`Selection::Any`]; anything else is an id.
    pub fn parse(value: &str) -> Self {
        if value == Self::ANY {
            Selection::Any
        } else {
            Selection::Only(value.to_string())
        }
    }

    /// The selected id, if any
    pub fn id(&self) -> Option<&str> {
        match self {
            Selection::Any => None,
            Selection::Only(id) => Some(id),
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Selection::Any)
    }
}

impl From<String> for Selection {
    fn from(value: String) -> Self {
        Selection::parse(&value)
    }
}

impl From<&str> for Selection {
    fn from(value: &str) -> Self {
        Selection::parse(value)
    }
}

impl From<Selection> for String {
    fn from(value: Selection) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Any => f.write_str(Selection::ANY),
            Selection::Only(id) => f.write_str(id),
        }
    }
}

/// Search predicate over the catalog
///
/// A book matches when all three parts match:
/// - its title contains `title` (case-insensitive; a blank query matches everything)
/// - its author id equals `author`, or `author` is [`Selection::Any`]
/// - its genres contain `genre`, or `genre` is [`Selection::Any`]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Filter {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub author: Selection,

    #[serde(default)]
    pub genre: Selection,
}

impl Filter {
    /// Filter matching the whole catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title query
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the author selection
    pub fn author(mut self, author: impl Into<Selection>) -> Self {
        self.author = author.into();
        self
    }

    /// Set the genre selection
    pub fn genre(mut self, genre: impl Into<Selection>) -> Self {
        self.genre = genre.into();
        self
    }

    /// True when the filter places no restriction at all
    pub fn is_unrestricted(&self) -> bool {
        self.title.trim().is_empty() && self.author.is_any() && self.genre.is_any()
    }

    /// Check a single book against the filter
    pub fn matches(&self, book: &Book) -> bool {
        self.matcher().matches(book)
    }

    /// Prepare the filter for repeated matching (lowercases the title once)
    ///
    /// A blank title matches everything; otherwise the query is used as typed,
    /// surrounding spaces included.
    pub(crate) fn matcher(&self) -> Matcher<'_> {
        let blank = self.title.trim().is_empty();
        Matcher {
            title: (!blank).then(|| self.title.to_lowercase()),
            author: self.author.id(),
            genre: self.genre.id(),
        }
    }
}

pub(crate) struct Matcher<'a> {
    title: Option<String>,
    author: Option<&'a str>,
    genre: Option<&'a str>,
}

impl Matcher<'_> {
    pub(crate) fn matches(&self, book: &Book) -> bool {
        if let Some(author) = self.author {
            if book.author != author {
                return false;
            }
        }

        if let Some(genre) = self.genre {
            if !book.has_genre(genre) {
                return false;
            }
        }

        match &self.title {
            Some(query) => book.title.to_lowercase().contains(query.as_str()),
            None => true,
        }
    }
}
