use anyhow::{Context, Result};
use book_connect::catalog::{resolve_author, resolve_genre, Catalog, Resolution};
use book_connect::config::{
    default_config_path, find_config_file, load_config, write_default, Config, IntegrityMode,
    LogFormat, LoggingConfig,
};
use book_connect::models::{Filter, SelectOption, Selection};
use book_connect::render::{Preview, Renderer};
use book_connect::session::{Event, Session, Update};
use book_connect::theme::Theme;
use book_connect::ui::prompt::{parse_command, Command, SearchForm, HELP};
use book_connect::ui::{self, Painter, Status};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::io::{self, BufRead, IsTerminal, Write};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Book Connect - browse, filter and page through a book catalog
#[derive(Parser, Debug)]
#[command(name = "book-connect")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Browse, filter and page through a book catalog", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short)]
    quiet: bool,

    /// Output format
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Catalog JSON file (overrides the configured one)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Books per page (overrides the configured one)
    #[arg(long, global = true)]
    page_size: Option<NonZeroUsize>,

    /// Theme: day or night (overrides the configured one)
    #[arg(long, global = true)]
    theme: Option<Theme>,

    /// Render placeholders for unknown authors/genres instead of failing
    #[arg(long, global = true)]
    lenient: bool,

    /// Show all environment variables
    #[arg(long)]
    env: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Automatic based on terminal (table if TTY, JSON otherwise)
    Auto,
    /// Table format (human-readable)
    Table,
    /// JSON format (machine-readable)
    Json,
    /// Plain text format
    Plain,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List books matching a filter
    #[command(alias = "ls")]
    List {
        /// Title substring (case-insensitive)
        #[arg(long, short)]
        title: Option<String>,

        /// Author id or name ("any" for all)
        #[arg(long, short)]
        author: Option<String>,

        /// Genre id or name ("any" for all)
        #[arg(long, short)]
        genre: Option<String>,

        /// Number of pages to reveal
        #[arg(long, short, default_value_t = 1)]
        pages: usize,

        /// Reveal every matching book
        #[arg(long, conflicts_with = "pages")]
        all: bool,
    },

    /// Show the details of one book
    Show {
        /// Book id
        id: String,
    },

    /// List authors
    Authors,

    /// List genres
    Genres,

    /// Browse interactively
    #[command(alias = "b")]
    Browse,

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Write a default configuration file
    Init {
        /// Where to write (default: the per-user config directory)
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },

    /// Print the effective configuration
    Show,
}

/// Print all available environment variables
fn print_env_vars() {
    println!("Book Connect - Environment Variables");
    println!();
    println!("Catalog:");
    println!("  BOOK_CONNECT_CATALOG__PATH        Catalog JSON file (default: embedded sample)");
    println!("  BOOK_CONNECT_CATALOG__PAGE_SIZE   Books per page (default: 36)");
    println!("  BOOK_CONNECT_CATALOG__INTEGRITY   strict | lenient (default: strict)");
    println!();
    println!("Display:");
    println!("  BOOK_CONNECT_DISPLAY__THEME       day | night | system (default: system)");
    println!("  COLORFGBG                         Consulted when the theme is 'system'");
    println!();
    println!("Logging:");
    println!("  BOOK_CONNECT_LOGGING__LEVEL       Log level (default: warn)");
    println!("  BOOK_CONNECT_LOGGING__FORMAT      text | json (default: text)");
    println!("  RUST_LOG                          Overrides the log filter entirely");
    println!();
    println!("Example:");
    println!("  export BOOK_CONNECT_CATALOG__PATH=\"./books.json\"");
    println!("  export BOOK_CONNECT_DISPLAY__THEME=\"night\"");
}

fn init_tracing(verbose: u8, quiet: bool, logging: &LoggingConfig) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => logging.level.as_str(),
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| format!("book_connect={}", level)),
    );
    let registry = tracing_subscriber::registry().with(filter);

    match logging.format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init(),
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init(),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.env {
        print_env_vars();
        return Ok(());
    }

    // Load configuration from file if specified or found in default locations
    let config_path = cli.config.clone().or_else(find_config_file);
    let mut config = load_config(config_path.as_deref())?;

    if let Some(path) = &cli.catalog {
        config.catalog.path = Some(path.clone());
    }
    if let Some(page_size) = cli.page_size {
        config.catalog.page_size = page_size;
    }
    if cli.lenient {
        config.catalog.integrity = IntegrityMode::Lenient;
    }

    init_tracing(cli.verbose, cli.quiet, &config.logging);

    if let Some(path) = &config_path {
        tracing::info!("Using config file: {}", path.display());
    }

    let format = resolve_format(cli.output);
    let theme = cli.theme.unwrap_or_else(|| config.display.theme.resolve());
    let painter = Painter::new(theme, format == OutputFormat::Table && ui::is_terminal());

    let renderer = Renderer::new(config.catalog.integrity);

    match cli.command.unwrap_or(Commands::Browse) {
        Commands::List {
            title,
            author,
            genre,
            pages,
            all,
        } => {
            let catalog = load_catalog(&config)?;
            let form = SearchForm {
                title: title.unwrap_or_default(),
                author,
                genre,
            };
            let filter = build_filter(&catalog, &form, &painter);
            let mut session = Session::new(&catalog, config.catalog.page_size, renderer, theme);

            if !filter.is_unrestricted() {
                session.dispatch(Event::SubmitSearch(filter))?;
            }

            let mut revealed_pages = 1;
            while all || revealed_pages < pages {
                if session.dispatch(Event::ShowMore)? == Update::Ignored {
                    break;
                }
                revealed_pages += 1;
            }

            output_list(&session, format, &painter)?;
        }

        Commands::Show { id } => {
            let catalog = load_catalog(&config)?;
            let book = catalog
                .book(&id)
                .with_context(|| format!("no book with id '{}'", id))?;
            let detail = renderer.detail(&catalog, book)?;

            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&detail)?),
                OutputFormat::Plain => {
                    println!("{}", detail.title);
                    println!("{}", detail.subtitle());
                    if !detail.genres.is_empty() {
                        println!("{}", detail.genres.join(", "));
                    }
                    println!();
                    println!("{}", detail.description);
                    println!("{}", detail.image);
                }
                _ => println!("{}", ui::render_detail(&detail, &painter, ui::terminal_width())),
            }
        }

        Commands::Authors => {
            let catalog = load_catalog(&config)?;
            output_options("Author", &catalog.author_options(), format, &painter)?;
        }

        Commands::Genres => {
            let catalog = load_catalog(&config)?;
            output_options("Genre", &catalog.genre_options(), format, &painter)?;
        }

        Commands::Browse => {
            let catalog = load_catalog(&config)?;
            let session = Session::new(&catalog, config.catalog.page_size, renderer, theme);
            browse(session, painter)?;
        }

        Commands::Config { command } => run_config(command, &config)?,
    }

    Ok(())
}

fn resolve_format(format: OutputFormat) -> OutputFormat {
    if format == OutputFormat::Auto {
        if io::stdout().is_terminal() {
            OutputFormat::Table
        } else {
            OutputFormat::Json
        }
    } else {
        format
    }
}

fn load_catalog(config: &Config) -> Result<Catalog> {
    let mode = config.catalog.integrity;
    let catalog = match &config.catalog.path {
        Some(path) => Catalog::load(path, mode)?,
        None => Catalog::embedded(mode)?,
    };
    tracing::debug!(books = catalog.len(), ?mode, "catalog ready");
    Ok(catalog)
}

fn run_config(command: ConfigCommands, config: &Config) -> Result<()> {
    match command {
        ConfigCommands::Init { path, force } => {
            let path = path
                .or_else(default_config_path)
                .context("no config directory on this platform; pass a path")?;
            write_default(&path, force)?;
            println!("Wrote {}", path.display());
        }
        ConfigCommands::Show => {
            print!("{}", toml::to_string_pretty(config)?);
        }
    }
    Ok(())
}

/// Turn raw form fields into a filter, warning about unknown authors/genres
fn build_filter(catalog: &Catalog, form: &SearchForm, painter: &Painter) -> Filter {
    let author = form
        .author
        .as_deref()
        .map(|input| report(resolve_author(catalog, input), "author", painter))
        .unwrap_or(Selection::Any);
    let genre = form
        .genre
        .as_deref()
        .map(|input| report(resolve_genre(catalog, input), "genre", painter))
        .unwrap_or(Selection::Any);

    Filter::new().title(form.title.clone()).author(author).genre(genre)
}

fn report(resolution: Resolution, kind: &str, painter: &Painter) -> Selection {
    if let Resolution::Unknown { input, suggestion } = &resolution {
        let msg = match suggestion {
            Some(name) => format!("Unknown {} '{}'. Did you mean '{}'?", kind, input, name),
            None => format!("Unknown {} '{}'", kind, input),
        };
        eprintln!("{}", painter.status(Status::Warning, &msg));
    }
    resolution.into_selection()
}

#[derive(Serialize)]
struct ListOutput<'a> {
    filter: &'a Filter,
    total: usize,
    revealed: usize,
    remaining: usize,
    previews: Vec<Preview>,
}

fn output_list(session: &Session<'_>, format: OutputFormat, painter: &Painter) -> Result<()> {
    let update = session.current_list()?;
    if format == OutputFormat::Table {
        if let Some(out) = ui::render_update(&update, 0, painter, ui::terminal_width()) {
            println!("{}", out);
        }
        return Ok(());
    }

    let Update::ListReplaced {
        previews,
        remaining,
        no_results,
    } = update
    else {
        return Ok(());
    };

    match format {
        OutputFormat::Json => {
            let output = ListOutput {
                filter: session.filter(),
                total: session.cursor().total(),
                revealed: session.cursor().revealed(),
                remaining,
                previews,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if no_results {
                println!("{}", ui::NO_RESULTS_MESSAGE);
            }
            for preview in &previews {
                println!("{} - {} [{}]", preview.title, preview.author_name, preview.id);
            }
            if !no_results {
                println!("{}", ui::show_more_label(remaining));
            }
        }
        _ => {
            for preview in &previews {
                println!("{}\t{}\t{}", preview.id, preview.title, preview.author_name);
            }
        }
    }

    Ok(())
}

fn output_options(
    heading: &str,
    options: &[SelectOption],
    format: OutputFormat,
    painter: &Painter,
) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(options)?),
        OutputFormat::Plain => {
            for option in options {
                println!("{}\t{}", option.value, option.label);
            }
        }
        _ => println!("{}", ui::render_options(heading, options, painter)),
    }
    Ok(())
}

/// Interactive loop: one line in, one event dispatched and drawn
fn browse(mut session: Session<'_>, mut painter: Painter) -> Result<()> {
    let width = ui::terminal_width();
    let interactive = io::stdin().is_terminal();
    let mut lines = io::stdin().lock().lines();

    println!(
        "{}",
        painter.strong(&format!(
            "Book Connect: {} books. Type 'help' for commands.",
            session.catalog().len()
        ))
    );
    draw(&session.current_list()?, 0, &painter, width);

    loop {
        let Some(line) = ask(&mut lines, "> ", interactive)? else {
            break;
        };

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("{}", painter.status(Status::Error, &e.to_string()));
                continue;
            }
        };

        let shown = session.cursor().revealed();
        let update = match command {
            Command::Quit => break,
            Command::Help => {
                println!("{}", HELP);
                continue;
            }
            Command::Authors => {
                let options = session.catalog().author_options();
                println!("{}", ui::render_options("Author", &options, &painter));
                continue;
            }
            Command::Genres => {
                let options = session.catalog().genre_options();
                println!("{}", ui::render_options("Genre", &options, &painter));
                continue;
            }
            Command::List => session.current_list()?,
            Command::Search(form) => {
                let filter = build_filter(session.catalog(), &form, &painter);
                session.dispatch(Event::SubmitSearch(filter))?
            }
            Command::OpenSearch => {
                draw(&session.dispatch(Event::OpenSearch)?, shown, &painter, width);
                match search_form(&mut lines, interactive)? {
                    Some(form) => {
                        let filter = build_filter(session.catalog(), &form, &painter);
                        session.dispatch(Event::SubmitSearch(filter))?
                    }
                    None => session.dispatch(Event::CloseSearch)?,
                }
            }
            Command::More => {
                let update = session.dispatch(Event::ShowMore)?;
                if update == Update::Ignored {
                    println!("{}", painter.muted("Nothing more to show"));
                }
                update
            }
            Command::Open(id) => {
                let update = session.dispatch(Event::SelectBook(id.clone()))?;
                if update == Update::Ignored {
                    eprintln!(
                        "{}",
                        painter.status(Status::Warning, &format!("No book with id '{}'", id))
                    );
                }
                update
            }
            Command::Close => session.dispatch(Event::CloseDetail)?,
            Command::OpenSettings => {
                draw(&session.dispatch(Event::OpenSettings)?, shown, &painter, width);
                match ask(&mut lines, "theme [day/night]: ", interactive)? {
                    Some(answer) if !is_cancel(&answer) && !answer.trim().is_empty() => {
                        match answer.parse::<Theme>() {
                            Ok(theme) => session.dispatch(Event::SubmitTheme(theme))?,
                            Err(e) => {
                                eprintln!("{}", painter.status(Status::Error, &e.to_string()));
                                session.dispatch(Event::CloseSettings)?
                            }
                        }
                    }
                    _ => session.dispatch(Event::CloseSettings)?,
                }
            }
            Command::Theme(theme) => {
                let theme = theme.unwrap_or_else(|| session.theme().toggled());
                session.dispatch(Event::SubmitTheme(theme))?
            }
        };

        if let Update::ThemeChanged(theme) = update {
            painter.set_theme(theme);
        }
        draw(&update, shown, &painter, width);
    }

    Ok(())
}

fn draw(update: &Update, shown: usize, painter: &Painter, width: usize) {
    if let Some(out) = ui::render_update(update, shown, painter, width) {
        println!("{}", out);
    }
}

/// Read one line, printing `prompt` first on a terminal. `None` at end of input.
fn ask(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    prompt: &str,
    interactive: bool,
) -> Result<Option<String>> {
    if interactive {
        print!("{}", prompt);
        io::stdout().flush()?;
    }
    Ok(lines.next().transpose()?)
}

fn is_cancel(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("cancel")
}

/// Ask for the three search fields; `None` when cancelled
fn search_form(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    interactive: bool,
) -> Result<Option<SearchForm>> {
    let mut fields = Vec::with_capacity(3);
    for prompt in ["title: ", "author [any]: ", "genre [any]: "] {
        match ask(lines, prompt, interactive)? {
            Some(answer) if !is_cancel(&answer) => fields.push(answer),
            _ => return Ok(None),
        }
    }

    let genre = fields.pop().filter(|s| !s.trim().is_empty());
    let author = fields.pop().filter(|s| !s.trim().is_empty());
    let title = fields.pop().unwrap_or_default();
    Ok(Some(SearchForm {
        title,
        author,
        genre,
    }))
}
