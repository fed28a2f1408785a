//! Interaction layer: maps user events onto catalog, cursor and renderers.
//!
//! A [`Session`] is the single piece of mutable state. Each [`Event`] is handled
//! to completion by [`Session::dispatch`], which returns an [`Update`] telling
//! the front end what to redraw.

use serde::Serialize;
use std::num::NonZeroUsize;

use crate::catalog::{Catalog, Cursor};
use crate::models::{Book, Filter};
use crate::render::{Detail, LookupError, Preview, Renderer};
use crate::theme::Theme;

/// Dialogs the front end can show on top of the list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Overlay {
    Search,
    Settings,
}

/// Something the user did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Search form submitted
    SubmitSearch(Filter),
    /// "Show more" pressed
    ShowMore,
    /// A preview was clicked
    SelectBook(String),
    /// Detail panel closed
    CloseDetail,
    /// Settings form submitted
    SubmitTheme(Theme),
    OpenSearch,
    CloseSearch,
    OpenSettings,
    CloseSettings,
}

/// What changed as a result of an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "update", content = "data", rename_all = "snake_case")]
pub enum Update {
    /// The list was replaced by the first page of a new result set
    ListReplaced {
        previews: Vec<Preview>,
        remaining: usize,
        no_results: bool,
    },
    /// Another page was appended to the list
    ListExtended {
        previews: Vec<Preview>,
        remaining: usize,
    },
    DetailShown(Detail),
    DetailHidden,
    ThemeChanged(Theme),
    OverlayOpened(Overlay),
    OverlayClosed(Overlay),
    /// Nothing to do
    Ignored,
}

/// Browsing state over one catalog
#[derive(Debug)]
pub struct Session<'a> {
    catalog: &'a Catalog,
    renderer: Renderer,
    filter: Filter,
    results: Vec<&'a Book>,
    cursor: Cursor,
    active: Option<&'a Book>,
    theme: Theme,
    search_open: bool,
    settings_open: bool,
}

impl<'a> Session<'a> {
    /// Start a session showing the first page of the whole catalog
    pub fn new(catalog: &'a Catalog, page_size: NonZeroUsize, renderer: Renderer, theme: Theme) -> Self {
        let filter = Filter::new();
        let results = catalog.query(&filter);
        let mut cursor = Cursor::new(page_size);
        cursor.reset(results.len());

        Self {
            catalog,
            renderer,
            filter,
            results,
            cursor,
            active: None,
            theme,
            search_open: false,
            settings_open: false,
        }
    }

    /// Handle one event
    pub fn dispatch(&mut self, event: Event) -> Result<Update, LookupError> {
        tracing::debug!(?event, "dispatch");

        match event {
            Event::SubmitSearch(filter) => self.search(filter),
            Event::ShowMore => self.show_more(),
            Event::SelectBook(id) => self.select(&id),
            Event::CloseDetail => Ok(match self.active.take() {
                Some(_) => Update::DetailHidden,
                None => Update::Ignored,
            }),
            Event::SubmitTheme(theme) => {
                self.theme = theme;
                self.settings_open = false;
                tracing::info!(theme = theme.name(), "theme changed");
                Ok(Update::ThemeChanged(theme))
            }
            Event::OpenSearch => Ok(self.set_overlay(Overlay::Search, true)),
            Event::CloseSearch => Ok(self.set_overlay(Overlay::Search, false)),
            Event::OpenSettings => Ok(self.set_overlay(Overlay::Settings, true)),
            Event::CloseSettings => Ok(self.set_overlay(Overlay::Settings, false)),
        }
    }

    /// The list as currently shown, for an initial draw
    pub fn current_list(&self) -> Result<Update, LookupError> {
        let previews = self
            .renderer
            .previews(self.catalog, &self.results[self.cursor.visible_range()])?;
        Ok(Update::ListReplaced {
            no_results: self.results.is_empty(),
            remaining: self.cursor.remaining(),
            previews,
        })
    }

    fn search(&mut self, filter: Filter) -> Result<Update, LookupError> {
        self.results = self.catalog.query(&filter);
        self.filter = filter;
        self.cursor.reset(self.results.len());
        self.search_open = false;

        tracing::info!(
            matches = self.results.len(),
            "search returned {} books",
            self.results.len()
        );
        self.current_list()
    }

    fn show_more(&mut self) -> Result<Update, LookupError> {
        let Some(range) = self.cursor.advance() else {
            tracing::debug!("nothing more to show");
            return Ok(Update::Ignored);
        };

        let previews = self.renderer.previews(self.catalog, &self.results[range])?;
        Ok(Update::ListExtended {
            previews,
            remaining: self.cursor.remaining(),
        })
    }

    fn select(&mut self, id: &str) -> Result<Update, LookupError> {
        let Some(book) = self.catalog.book(id) else {
            tracing::warn!(id, "selected book not found, skipping");
            return Ok(Update::Ignored);
        };

        let detail = self.renderer.detail(self.catalog, book)?;
        self.active = Some(book);
        Ok(Update::DetailShown(detail))
    }

    fn set_overlay(&mut self, overlay: Overlay, open: bool) -> Update {
        let flag = match overlay {
            Overlay::Search => &mut self.search_open,
            Overlay::Settings => &mut self.settings_open,
        };

        if *flag == open {
            return Update::Ignored;
        }
        *flag = open;

        if open {
            Update::OverlayOpened(overlay)
        } else {
            Update::OverlayClosed(overlay)
        }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn results(&self) -> &[&'a Book] {
        &self.results
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Book in the detail panel, if one is open
    pub fn active(&self) -> Option<&'a Book> {
        self.active
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_open(&self, overlay: Overlay) -> bool {
        match overlay {
            Overlay::Search => self.search_open,
            Overlay::Settings => self.settings_open,
        }
    }
}
