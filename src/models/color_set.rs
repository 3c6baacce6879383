//! Concrete color sets and the dark/light mode selector.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::RgbColor;

/// Names of the styling slots a [`ColorSet`] fills, in declaration order.
///
/// These are the CSS custom property names (without the leading `--`) that
/// every section reads.
pub const STYLE_SLOTS: [&str; 8] = [
    "theme-bg",
    "theme-surface",
    "theme-primary",
    "theme-secondary",
    "theme-accent",
    "theme-text",
    "theme-text-secondary",
    "theme-border",
];

/// The eight colors that realize one palette in one mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorSet {
    /// Page background
    pub background: RgbColor,
    /// Cards, panels, and other raised surfaces
    pub surface: RgbColor,
    /// Primary brand color for headings and buttons
    pub primary: RgbColor,
    /// Secondary brand color
    pub secondary: RgbColor,
    /// Highlights, links, focus rings
    pub accent: RgbColor,
    /// Body text
    pub text: RgbColor,
    /// Muted text (captions, metadata)
    pub text_secondary: RgbColor,
    /// Dividers and outlines
    pub border: RgbColor,
}

impl ColorSet {
    /// Pairs each styling slot name with its color.
    ///
    /// The order matches [`STYLE_SLOTS`].
    #[must_use]
    pub const fn slots(&self) -> [(&'static str, RgbColor); 8] {
        [
            (STYLE_SLOTS[0], self.background),
            (STYLE_SLOTS[1], self.surface),
            (STYLE_SLOTS[2], self.primary),
            (STYLE_SLOTS[3], self.secondary),
            (STYLE_SLOTS[4], self.accent),
            (STYLE_SLOTS[5], self.text),
            (STYLE_SLOTS[6], self.text_secondary),
            (STYLE_SLOTS[7], self.border),
        ]
    }
}

/// Dark or light variant selector, orthogonal to palette choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Dark backgrounds with light text
    #[default]
    Dark,
    /// Light backgrounds with dark text
    Light,
}

impl Mode {
    /// All modes, dark first.
    pub const ALL: [Self; 2] = [Self::Dark, Self::Light];

    /// Returns the opposite mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Identifier used for persistence and the API.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    /// Asks the OS whether it is in dark or light mode.
    ///
    /// Falls back to [`Mode::Dark`] when the platform cannot tell.
    #[must_use]
    pub fn detect_system() -> Self {
        match dark_light::detect() {
            Ok(dark_light::Mode::Light) => Self::Light,
            Ok(dark_light::Mode::Dark | dark_light::Mode::Unspecified) | Err(_) => Self::Dark,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not `dark` or `light`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown color mode '{0}' (expected 'dark' or 'light')")]
pub struct UnknownMode(pub String);

impl FromStr for Mode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            other => Err(UnknownMode(other.to_string())),
        }
    }
}
