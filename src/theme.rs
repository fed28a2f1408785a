//! Day/night colour themes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An RGB colour triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.0, self.1, self.2)
    }
}

/// Foreground (`dark`) and background (`light`) colours applied globally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub dark: Rgb,
    pub light: Rgb,
}

const INK: Rgb = Rgb(10, 10, 20);
const PAPER: Rgb = Rgb(255, 255, 255);

/// Visual theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Day,
    Night,
}

impl Theme {
    pub fn name(self) -> &'static str {
        match self {
            Theme::Day => "day",
            Theme::Night => "night",
        }
    }

    /// Colours for this theme; night swaps the day pair
    pub fn palette(self) -> Palette {
        match self {
            Theme::Day => Palette {
                dark: INK,
                light: PAPER,
            },
            Theme::Night => Palette {
                dark: PAPER,
                light: INK,
            },
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Day => Theme::Night,
            Theme::Night => Theme::Day,
        }
    }

    /// Guess the theme from the terminal's colour scheme, defaulting to day
    pub fn from_system() -> Self {
        let colorfgbg = std::env::var("COLORFGBG").ok();
        let theme = theme_from_colorfgbg(colorfgbg.as_deref()).unwrap_or_default();
        tracing::debug!(?colorfgbg, theme = theme.name(), "resolved system theme");
        theme
    }
}

/// Interpret a `COLORFGBG` value (`"fg;bg"` or `"fg;default;bg"`).
///
/// Background indices 0-6 and 8 are the dark ANSI colours.
pub fn theme_from_colorfgbg(value: Option<&str>) -> Option<Theme> {
    let background: u8 = value?.rsplit(';').next()?.trim().parse().ok()?;
    Some(match background {
        0..=6 | 8 => Theme::Night,
        _ => Theme::Day,
    })
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for theme names other than `day` and `night`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme '{0}' (expected 'day' or 'night')")]
pub struct UnknownTheme(pub String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" | "light" => Ok(Theme::Day),
            "night" | "dark" => Ok(Theme::Night),
            other => Err(UnknownTheme(other.to_string())),
        }
    }
}
