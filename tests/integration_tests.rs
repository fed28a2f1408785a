//! Integration tests for Book Connect
//!
//! These tests drive the public API the way the terminal front end does:
//! load a catalog, open a session and feed it events.

use book_connect::catalog::{resolve_author, CatalogError, Resolution};
use book_connect::config::{load_config, write_default, IntegrityMode};
use book_connect::models::{Filter, Selection};
use book_connect::render::{Renderer, UNKNOWN_AUTHOR};
use book_connect::session::{Event, Overlay, Session, Update};
use book_connect::theme::Theme;
use book_connect::Catalog;
use std::num::NonZeroUsize;
use tempfile::tempdir;

fn page(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap()
}

fn embedded() -> Catalog {
    Catalog::embedded(IntegrityMode::Strict).expect("embedded catalog must be valid")
}

/// Five books by one author, enough for the paging example
fn five_books() -> String {
    let books: Vec<String> = (1..=5)
        .map(|i| {
            format!(
                r#"{{"id":"b{i}","title":"Book {i}","author":"a1","image":"https://img/{i}.jpg",
                    "description":"Number {i}","published":"200{i}-01-01T00:00:00.000Z","genres":["g1"]}}"#
            )
        })
        .collect();
    format!(
        r#"{{"authors":{{"a1":"Ann Author"}},"genres":{{"g1":"Fiction"}},"books":[{}]}}"#,
        books.join(",")
    )
}

const BROKEN_AUTHOR: &str = r#"{
    "authors": {"a1": "Ann Author"},
    "genres": {"g1": "Fiction"},
    "books": [
        {"id": "ok", "title": "Fine", "author": "a1", "image": "i", "description": "",
         "published": "2001-01-01T00:00:00.000Z", "genres": ["g1"]},
        {"id": "orphan", "title": "Orphan", "author": "zz", "image": "i", "description": "",
         "published": "2002-01-01T00:00:00.000Z", "genres": ["g1"]}
    ]
}"#;

#[test]
fn test_embedded_catalog_loads() {
    let catalog = embedded();
    assert_eq!(catalog.len(), 15);
    assert!(!catalog.is_empty());
    assert_eq!(catalog.author_name("a1f3c8e2"), Some("Leo Tolstoy"));
}

#[test]
fn test_unrestricted_query_returns_whole_catalog_in_order() {
    let catalog = embedded();
    let results = catalog.query(&Filter::new());

    let expected: Vec<&str> = catalog.books().iter().map(|b| b.id.as_str()).collect();
    let actual: Vec<&str> = results.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(actual, expected);
}

#[test]
fn test_title_query_is_case_insensitive_substring() {
    let catalog = embedded();
    let results = catalog.query(&Filter::new().title("WAR"));

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "War and Peace");
}

#[test]
fn test_title_query_war_excludes_peace_accord() {
    let json = r#"{
        "authors": {"a1": "Ann Author"},
        "genres": {},
        "books": [
            {"id": "1", "title": "War and Peace", "author": "a1", "image": "i",
             "published": "1869-01-01T00:00:00.000Z"},
            {"id": "2", "title": "Peace Accord", "author": "a1", "image": "i",
             "published": "1990-01-01T00:00:00.000Z"}
        ]
    }"#;
    let catalog = Catalog::from_json(json, IntegrityMode::Strict).unwrap();

    let results = catalog.query(&Filter::new().title("war"));
    let titles: Vec<&str> = results.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, vec!["War and Peace"]);
}

#[test]
fn test_title_query_trailing_space_is_significant() {
    let json = r#"{
        "authors": {"a1": "Ann Author"},
        "genres": {},
        "books": [
            {"id": "1", "title": "War and Peace", "author": "a1", "image": "i",
             "published": "1869-01-01T00:00:00.000Z"},
            {"id": "2", "title": "Star Wars", "author": "a1", "image": "i",
             "published": "1977-01-01T00:00:00.000Z"}
        ]
    }"#;
    let catalog = Catalog::from_json(json, IntegrityMode::Strict).unwrap();

    let titles = |query: &str| -> Vec<String> {
        catalog
            .query(&Filter::new().title(query))
            .iter()
            .map(|b| b.title.clone())
            .collect()
    };
    assert_eq!(titles("war "), vec!["War and Peace"]);
    assert_eq!(titles("war"), vec!["War and Peace", "Star Wars"]);
    assert_eq!(titles("   ").len(), 2);
}

#[test]
fn test_author_and_genre_filters_combine() {
    let catalog = embedded();

    let le_guin = catalog.query(&Filter::new().author("b27d4e91"));
    assert_eq!(le_guin.len(), 3);

    let le_guin_fantasy = catalog.query(&Filter::new().author("b27d4e91").genre("g02"));
    assert_eq!(le_guin_fantasy.len(), 1);
    assert_eq!(le_guin_fantasy[0].title, "A Wizard of Earthsea");

    let fantasy = catalog.query(&Filter::new().genre("g02"));
    assert!(fantasy.iter().all(|b| b.has_genre("g02")));
    assert_eq!(fantasy.len(), 4);
}

#[test]
fn test_unknown_filter_values_match_nothing() {
    let catalog = embedded();
    assert!(catalog.query(&Filter::new().author("nobody")).is_empty());
    assert!(catalog.query(&Filter::new().genre("nothing")).is_empty());
}

#[test]
fn test_paging_five_books_by_two() {
    let catalog = Catalog::from_json(&five_books(), IntegrityMode::Strict).unwrap();
    let mut session = Session::new(&catalog, page(2), Renderer::default(), Theme::Day);

    assert_eq!(session.cursor().revealed(), 2);
    assert_eq!(session.cursor().remaining(), 3);

    match session.dispatch(Event::ShowMore).unwrap() {
        Update::ListExtended {
            previews,
            remaining,
        } => {
            let ids: Vec<&str> = previews.iter().map(|p| p.id.as_str()).collect();
            assert_eq!(ids, vec!["b3", "b4"]);
            assert_eq!(remaining, 1);
        }
        other => panic!("Expected ListExtended, got {other:?}"),
    }

    match session.dispatch(Event::ShowMore).unwrap() {
        Update::ListExtended {
            previews,
            remaining,
        } => {
            assert_eq!(previews.len(), 1);
            assert_eq!(remaining, 0);
        }
        other => panic!("Expected ListExtended, got {other:?}"),
    }

    assert_eq!(session.dispatch(Event::ShowMore).unwrap(), Update::Ignored);
    assert_eq!(session.cursor().revealed(), 5);
}

#[test]
fn test_search_replaces_list_and_resets_paging() {
    let catalog = embedded();
    let mut session = Session::new(&catalog, page(2), Renderer::default(), Theme::Day);
    session.dispatch(Event::ShowMore).unwrap();
    assert_eq!(session.cursor().revealed(), 4);

    let update = session
        .dispatch(Event::SubmitSearch(Filter::new().author("c9e05a13")))
        .unwrap();
    match update {
        Update::ListReplaced {
            previews,
            remaining,
            no_results,
        } => {
            assert!(!no_results);
            assert_eq!(previews.len(), 2);
            assert!(previews.iter().all(|p| p.author_name == "Terry Pratchett"));
            assert_eq!(remaining, 1);
        }
        other => panic!("Expected ListReplaced, got {other:?}"),
    }
    assert_eq!(session.cursor().revealed(), 2);
}

#[test]
fn test_search_without_matches_reports_no_results() {
    let catalog = embedded();
    let mut session = Session::new(&catalog, page(36), Renderer::default(), Theme::Day);

    let update = session
        .dispatch(Event::SubmitSearch(Filter::new().title("zzzz")))
        .unwrap();
    assert_eq!(
        update,
        Update::ListReplaced {
            previews: vec![],
            remaining: 0,
            no_results: true,
        }
    );
    assert_eq!(session.dispatch(Event::ShowMore).unwrap(), Update::Ignored);
}

#[test]
fn test_select_and_close_detail() {
    let catalog = embedded();
    let mut session = Session::new(&catalog, page(36), Renderer::default(), Theme::Day);

    match session
        .dispatch(Event::SelectBook("d7ca2633-48fd-491a-fbce-28d9f40b160f".into()))
        .unwrap()
    {
        Update::DetailShown(detail) => {
            assert_eq!(detail.title, "Dune");
            assert_eq!(detail.subtitle(), "Frank Herbert (1965)");
            assert_eq!(detail.genres, vec!["Science Fiction".to_string()]);
        }
        other => panic!("Expected DetailShown, got {other:?}"),
    }
    assert!(session.active().is_some());

    assert_eq!(session.dispatch(Event::CloseDetail).unwrap(), Update::DetailHidden);
    assert!(session.active().is_none());
}

#[test]
fn test_select_unknown_id_is_ignored() {
    let catalog = embedded();
    let mut session = Session::new(&catalog, page(3), Renderer::default(), Theme::Night);
    let before = session.current_list().unwrap();

    assert_eq!(
        session.dispatch(Event::SelectBook("missing".into())).unwrap(),
        Update::Ignored
    );
    assert!(session.active().is_none());
    assert_eq!(session.current_list().unwrap(), before);
    assert_eq!(session.theme(), Theme::Night);
}

#[test]
fn test_overlays_and_theme() {
    let catalog = embedded();
    let mut session = Session::new(&catalog, page(36), Renderer::default(), Theme::Day);

    assert_eq!(
        session.dispatch(Event::OpenSettings).unwrap(),
        Update::OverlayOpened(Overlay::Settings)
    );
    assert!(session.is_open(Overlay::Settings));

    assert_eq!(
        session.dispatch(Event::SubmitTheme(Theme::Night)).unwrap(),
        Update::ThemeChanged(Theme::Night)
    );
    assert_eq!(session.theme(), Theme::Night);
    assert!(!session.is_open(Overlay::Settings));

    session.dispatch(Event::OpenSearch).unwrap();
    session
        .dispatch(Event::SubmitSearch(Filter::new().title("dune")))
        .unwrap();
    assert!(!session.is_open(Overlay::Search));
}

#[test]
fn test_strict_load_rejects_unknown_author() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("books.json");
    std::fs::write(&path, BROKEN_AUTHOR).unwrap();

    let result = Catalog::load(&path, IntegrityMode::Strict);
    assert!(matches!(result, Err(CatalogError::UnknownAuthor { .. })));
}

#[test]
fn test_lenient_load_renders_placeholder() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("books.json");
    std::fs::write(&path, BROKEN_AUTHOR).unwrap();

    let catalog = Catalog::load(&path, IntegrityMode::Lenient).unwrap();
    let session = Session::new(
        &catalog,
        page(10),
        Renderer::new(IntegrityMode::Lenient),
        Theme::Day,
    );

    match session.current_list().unwrap() {
        Update::ListReplaced { previews, .. } => {
            assert_eq!(previews.len(), 2);
            assert_eq!(previews[0].author_name, "Ann Author");
            assert_eq!(previews[1].author_name, UNKNOWN_AUTHOR);
        }
        other => panic!("Expected ListReplaced, got {other:?}"),
    }
}

#[test]
fn test_load_missing_catalog_file() {
    let result = Catalog::load(
        std::path::Path::new("/nonexistent/books.json"),
        IntegrityMode::Strict,
    );
    assert!(matches!(result, Err(CatalogError::Io { .. })));
}

#[test]
fn test_author_resolution_by_name() {
    let catalog = embedded();

    assert_eq!(
        resolve_author(&catalog, "jane austen").into_selection(),
        Selection::Only("e61a2c3f".into())
    );

    match resolve_author(&catalog, "Terry Pratchet") {
        Resolution::Unknown { suggestion, .. } => {
            assert_eq!(suggestion.as_deref(), Some("Terry Pratchett"));
        }
        other => panic!("Expected Unknown, got {other:?}"),
    }
}

#[test]
fn test_default_config_roundtrip_drives_session() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    write_default(&path, false).unwrap();

    let config = load_config(Some(&path)).unwrap();
    let catalog = Catalog::embedded(config.catalog.integrity).unwrap();
    let session = Session::new(
        &catalog,
        config.catalog.page_size,
        Renderer::new(config.catalog.integrity),
        Theme::Day,
    );

    // 15 books fit on one default page
    assert_eq!(session.cursor().revealed(), 15);
    assert_eq!(session.cursor().remaining(), 0);
}

#[test]
fn test_update_serializes_for_json_output() {
    let catalog = embedded();
    let mut session = Session::new(&catalog, page(1), Renderer::default(), Theme::Day);

    let update = session.dispatch(Event::ShowMore).unwrap();
    let json = serde_json::to_value(&update).unwrap();
    assert_eq!(json["update"], "list_extended");
    assert_eq!(json["data"]["remaining"], 13);
}
