//! Command parser for the interactive `browse` loop.

use crate::theme::{Theme, UnknownTheme};

/// Raw search form fields; author and genre are resolved against the catalog later
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchForm {
    pub title: String,
    pub author: Option<String>,
    pub genre: Option<String>,
}

/// One line typed at the `browse` prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `search` with no arguments opens the search form
    OpenSearch,
    /// `search [words] [author=..] [genre=..]`
    Search(SearchForm),
    /// `more`
    More,
    /// `open <id>`
    Open(String),
    /// `close`
    Close,
    /// `settings` opens the theme form
    OpenSettings,
    /// `theme [day|night]`; no argument toggles
    Theme(Option<Theme>),
    /// `list`: redraw the current page set
    List,
    Authors,
    Genres,
    Help,
    Quit,
}

/// Errors for malformed prompt input
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PromptError {
    #[error("unknown command '{0}' (type 'help')")]
    UnknownCommand(String),

    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),

    #[error("unknown search field '{0}' (expected title, author or genre)")]
    UnknownField(String),

    #[error(transparent)]
    Theme(#[from] UnknownTheme),
}

pub const HELP: &str = "\
Commands:
  search                       open the search form
  search [words] [author=..] [genre=..]
                               filter by title words, author and genre (id or name)
  more                         show the next page
  open <id>                    show a book's details
  close                        close the detail panel
  settings                     open the theme form
  theme [day|night]            switch theme (toggles without an argument)
  list                         redraw the current results
  authors | genres             list picker values
  help                         this text
  quit                         leave";

/// Parse one prompt line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, PromptError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "" => return Ok(None),
        "search" | "s" | "/" if rest.is_empty() => Command::OpenSearch,
        "search" | "s" | "/" => Command::Search(parse_search(rest)?),
        "more" | "m" | "n" => Command::More,
        "open" | "o" | "show" => {
            if rest.is_empty() {
                return Err(PromptError::MissingArgument("open"));
            }
            Command::Open(rest.to_string())
        }
        "close" | "c" => Command::Close,
        "settings" => Command::OpenSettings,
        "theme" | "t" if rest.is_empty() => Command::Theme(None),
        "theme" | "t" => Command::Theme(Some(rest.parse()?)),
        "list" | "l" => Command::List,
        "authors" => Command::Authors,
        "genres" => Command::Genres,
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => return Err(PromptError::UnknownCommand(other.to_string())),
    };

    Ok(Some(command))
}

/// Split `war and peace author=leo tolstoy genre=classics` into form fields.
///
/// Words before the first `key=` belong to the title; later words extend the
/// most recent field.
pub fn parse_search(input: &str) -> Result<SearchForm, PromptError> {
    #[derive(Clone, Copy)]
    enum Field {
        Title,
        Author,
        Genre,
    }

    let mut title = Vec::new();
    let mut author: Option<Vec<&str>> = None;
    let mut genre: Option<Vec<&str>> = None;
    let mut current = Field::Title;

    for token in input.split_whitespace() {
        let word = match token.split_once('=') {
            Some((key, value)) => {
                current = match key.to_lowercase().as_str() {
                    "title" => Field::Title,
                    "author" => Field::Author,
                    "genre" => Field::Genre,
                    _ => return Err(PromptError::UnknownField(key.to_string())),
                };
                value
            }
            None => token,
        };

        let target = match current {
            Field::Title => &mut title,
            Field::Author => author.get_or_insert_with(Vec::new),
            Field::Genre => genre.get_or_insert_with(Vec::new),
        };
        if !word.is_empty() {
            target.push(word);
        }
    }

    Ok(SearchForm {
        title: title.join(" "),
        author: author.map(|words| words.join(" ")),
        genre: genre.map(|words| words.join(" ")),
    })
}
