//! Terminal rendering for the catalog browser.
//!
//! This module turns previews, details and session updates into themed
//! terminal text: preview tables, the "Show more" indicator, the empty-result
//! message and the boxed detail panel.

pub mod prompt;

use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::models::SelectOption;
use crate::render::{Detail, Preview};
use crate::session::{Overlay, Update};
use crate::theme::{Palette, Rgb, Theme};

/// Width used when the terminal size cannot be determined
pub const DEFAULT_WIDTH: usize = 100;

/// Shown instead of the list when a search matches nothing
pub const NO_RESULTS_MESSAGE: &str = "No results found. Your filters might be too narrow.";

/// Get the current terminal width.
pub fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(DEFAULT_WIDTH)
}

/// Check if stdout is a terminal.
pub fn is_terminal() -> bool {
    std::io::stdout().is_terminal()
}

/// Status types for prefixed messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Error,
    Warning,
}

/// Status icons for prefixed messages.
pub fn status_icon(status: Status) -> &'static str {
    match status {
        Status::Success => "✓",
        Status::Error => "✗",
        Status::Warning => "⚠",
    }
}

/// Applies a theme's palette to terminal text
#[derive(Debug, Clone, Copy)]
pub struct Painter {
    palette: Palette,
    enabled: bool,
}

impl Painter {
    /// `enabled = false` produces plain text (pipes, `--plain`)
    pub fn new(theme: Theme, enabled: bool) -> Self {
        Self {
            palette: theme.palette(),
            enabled,
        }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.palette = theme.palette();
    }

    /// Body text in the theme's ink colour
    pub fn ink(&self, text: &str) -> String {
        if !self.enabled {
            return text.to_string();
        }
        let Rgb(r, g, b) = self.palette.dark;
        text.truecolor(r, g, b).to_string()
    }

    /// Bold ink, for titles
    pub fn strong(&self, text: &str) -> String {
        if !self.enabled {
            return text.to_string();
        }
        let Rgb(r, g, b) = self.palette.dark;
        text.truecolor(r, g, b).bold().to_string()
    }

    /// De-emphasised text
    pub fn muted(&self, text: &str) -> String {
        if !self.enabled {
            return text.to_string();
        }
        text.dimmed().to_string()
    }

    /// A status line with its icon
    pub fn status(&self, status: Status, msg: &str) -> String {
        let icon = status_icon(status);
        if !self.enabled {
            return format!("{} {}", icon, msg);
        }
        let icon = match status {
            Status::Success => icon.green().bold().to_string(),
            Status::Error => icon.red().bold().to_string(),
            Status::Warning => icon.yellow().bold().to_string(),
        };
        format!("{} {}", icon, self.ink(msg))
    }

    fn cell(&self, text: String) -> Cell {
        let cell = Cell::new(text);
        if !self.enabled {
            return cell;
        }
        let Rgb(r, g, b) = self.palette.dark;
        cell.fg(Color::Rgb { r, g, b })
    }
}

/// Label of the "Show more" control
pub fn show_more_label(remaining: usize) -> String {
    format!("Show more ({})", remaining)
}

/// Preview cards as a table, numbered from `offset + 1`
pub fn render_previews(previews: &[Preview], offset: usize, painter: &Painter, width: usize) -> String {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(width.min(u16::MAX as usize) as u16)
        .set_header(vec!["#", "Title", "Author", "ID"]);

    for (i, preview) in previews.iter().enumerate() {
        table.add_row(vec![
            painter.cell((offset + i + 1).to_string()),
            painter
                .cell(truncate_with_ellipsis(&preview.title, 50))
                .add_attribute(Attribute::Bold),
            painter.cell(truncate_with_ellipsis(&preview.author_name, 30)),
            painter.cell(preview.id.clone()),
        ]);
    }

    table.to_string()
}

/// The "Show more" line, dimmed once nothing remains
pub fn render_show_more(remaining: usize, painter: &Painter) -> String {
    let label = show_more_label(remaining);
    if remaining == 0 {
        painter.muted(&label)
    } else {
        painter.strong(&label)
    }
}

/// Boxed detail panel
pub fn render_detail(detail: &Detail, painter: &Painter, width: usize) -> String {
    let inner = width.clamp(40, 100).saturating_sub(4);
    let mut lines = Vec::new();

    lines.push(painter.strong(&truncate_with_ellipsis(&detail.title, inner)));
    lines.push(painter.ink(&truncate_with_ellipsis(&detail.subtitle(), inner)));
    if !detail.genres.is_empty() {
        lines.push(painter.muted(&truncate_with_ellipsis(&detail.genres.join(", "), inner)));
    }
    lines.push(String::new());
    for line in wrap(&detail.description, inner) {
        lines.push(painter.ink(&line));
    }
    lines.push(String::new());
    lines.push(painter.muted(&truncate_with_ellipsis(&detail.image, inner)));

    let rule = "─".repeat(inner + 2);
    let mut out = format!("┌{}┐\n", rule);
    for line in lines {
        // Pad by the visible width of the unstyled text
        let visible = strip_width(&line);
        out.push_str(&format!("│ {}{} │\n", line, " ".repeat(inner.saturating_sub(visible))));
    }
    out.push_str(&format!("└{}┘", rule));
    out
}

/// Picker values as a two-column table
pub fn render_options(heading: &str, options: &[SelectOption], painter: &Painter) -> String {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL)
        .set_header(vec![heading, "Value"]);

    for option in options {
        table.add_row(vec![
            painter.cell(option.label.clone()),
            painter.cell(option.value.clone()),
        ]);
    }

    table.to_string()
}

/// Render a session update. `shown` is the number of previews already on screen
/// before the update, used to continue numbering when a page is appended.
pub fn render_update(update: &Update, shown: usize, painter: &Painter, width: usize) -> Option<String> {
    match update {
        Update::ListReplaced {
            no_results: true, ..
        } => Some(painter.status(Status::Warning, NO_RESULTS_MESSAGE)),
        Update::ListReplaced {
            previews,
            remaining,
            ..
        } => Some(format!(
            "{}\n{}",
            render_previews(previews, 0, painter, width),
            render_show_more(*remaining, painter)
        )),
        Update::ListExtended {
            previews,
            remaining,
        } => Some(format!(
            "{}\n{}",
            render_previews(previews, shown, painter, width),
            render_show_more(*remaining, painter)
        )),
        Update::DetailShown(detail) => Some(render_detail(detail, painter, width)),
        Update::DetailHidden => Some(painter.muted("Detail closed")),
        Update::ThemeChanged(theme) => {
            Some(painter.status(Status::Success, &format!("Theme set to {}", theme)))
        }
        Update::OverlayOpened(Overlay::Search) => {
            Some(painter.muted("Search (blank fields match everything, 'cancel' to abort)"))
        }
        Update::OverlayOpened(Overlay::Settings) => {
            Some(painter.muted("Settings ('cancel' to abort)"))
        }
        Update::OverlayClosed(_) => None,
        Update::Ignored => None,
    }
}

/// Truncate text to fit within the specified width using unicode-aware truncation.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if max_width <= 3 {
        return "...".to_string();
    }

    if UnicodeWidthStr::width(text) <= max_width {
        return text.to_string();
    }

    let mut current_width = 0;
    let mut truncated = String::new();
    for c in text.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(1);
        if current_width + w > max_width - 3 {
            break;
        }
        current_width += w;
        truncated.push(c);
    }

    format!("{}...", truncated)
}

/// Greedy word wrap by display width
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let word_width = UnicodeWidthStr::width(word);
        let line_width = UnicodeWidthStr::width(line.as_str());

        if !line.is_empty() && line_width + 1 + word_width > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        if word_width > width {
            line.push_str(&truncate_with_ellipsis(word, width));
        } else {
            line.push_str(word);
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Display width ignoring ANSI escape sequences
fn strip_width(text: &str) -> usize {
    let mut width = 0;
    let mut in_escape = false;
    for c in text.chars() {
        match (in_escape, c) {
            (false, '\u{1b}') => in_escape = true,
            (true, 'm') => in_escape = false,
            (true, _) => {}
            (false, c) => width += UnicodeWidthChar::width(c).unwrap_or(0),
        }
    }
    width
}
