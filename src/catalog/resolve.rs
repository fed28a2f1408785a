//! Resolve author/genre picker input given by id or by display name.

use strsim::jaro_winkler;

use super::Catalog;
use crate::models::Selection;

/// Minimum similarity for a "did you mean" suggestion
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Outcome of resolving picker input against the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Input was `any`, a known id, or a known display name
    Found(Selection),
    /// Nothing matched; carries the closest display name when one is similar enough
    Unknown {
        input: String,
        suggestion: Option<String>,
    },
}

impl Resolution {
    /// Selection to filter with. Unknown input is kept verbatim, so it
    /// simply matches no books.
    pub fn into_selection(self) -> Selection {
        match self {
            Resolution::Found(selection) => selection,
            Resolution::Unknown { input, .. } => Selection::Only(input),
        }
    }
}

/// Resolve an author given by id or name (case-insensitive)
pub fn resolve_author(catalog: &Catalog, input: &str) -> Resolution {
    resolve(catalog.authors(), input)
}

/// Resolve a genre given by id or name (case-insensitive)
pub fn resolve_genre(catalog: &Catalog, input: &str) -> Resolution {
    resolve(catalog.genres(), input)
}

fn resolve<'a>(names: impl Iterator<Item = (&'a str, &'a str)>, input: &str) -> Resolution {
    let wanted = input.trim();
    if wanted.is_empty() {
        return Resolution::Found(Selection::Any);
    }

    let wanted_lower = wanted.to_lowercase();
    let mut best: Option<(f64, &str)> = None;

    for (id, name) in names {
        if id == wanted || name.to_lowercase() == wanted_lower {
            return Resolution::Found(Selection::Only(id.to_string()));
        }

        let score = jaro_winkler(&wanted_lower, &name.to_lowercase());
        if score >= SUGGESTION_THRESHOLD && best.map_or(true, |(s, _)| score > s) {
            best = Some((score, name));
        }
    }

    // Typed input is forgiving about case; ids still win above
    if wanted.eq_ignore_ascii_case(Selection::ANY) {
        return Resolution::Found(Selection::Any);
    }

    tracing::debug!(input = wanted, ?best, "no exact match");
    Resolution::Unknown {
        input: wanted.to_string(),
        suggestion: best.map(|(_, name)| name.to_string()),
    }
}
