//! Identifiers for the alternate page compositions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the known page compositions.
///
/// Every variant arranges the same content sections; see
/// [`crate::presentation::composition`] for the arrangement of each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutVariant {
    /// Full-bleed hero, card grid
    #[default]
    Modern,
    /// Centered single column
    Classic,
    /// Text only, generous whitespace
    Minimal,
    /// Monospace console look
    Terminal,
    /// Editorial multi-column
    Magazine,
    /// Hero pinned left, content scrolling right
    Split,
    /// Everything boxed as cards
    Cards,
    /// Projects shown as a vertical timeline
    Timeline,
    /// Heavy borders, no rounding
    Brutalist,
    /// Translucent panels
    Glass,
    /// Strict three-column grid
    Grid,
    /// Persistent navigation sidebar
    Sidebar,
    /// Dense layout for small screens
    Compact,
    /// Oversized hero with the contact form first
    Spotlight,
}

impl LayoutVariant {
    /// All variants in dispatch-table order.
    pub const ALL: [Self; 14] = [
        Self::Modern,
        Self::Classic,
        Self::Minimal,
        Self::Terminal,
        Self::Magazine,
        Self::Split,
        Self::Cards,
        Self::Timeline,
        Self::Brutalist,
        Self::Glass,
        Self::Grid,
        Self::Sidebar,
        Self::Compact,
        Self::Spotlight,
    ];

    /// Identifier used for persistence, URLs, and the API.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Modern => "modern",
            Self::Classic => "classic",
            Self::Minimal => "minimal",
            Self::Terminal => "terminal",
            Self::Magazine => "magazine",
            Self::Split => "split",
            Self::Cards => "cards",
            Self::Timeline => "timeline",
            Self::Brutalist => "brutalist",
            Self::Glass => "glass",
            Self::Grid => "grid",
            Self::Sidebar => "sidebar",
            Self::Compact => "compact",
            Self::Spotlight => "spotlight",
        }
    }
}

impl fmt::Display for LayoutVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known layout.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown layout '{0}'")]
pub struct UnknownLayout(pub String);

impl FromStr for LayoutVariant {
    type Err = UnknownLayout;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|variant| variant.as_str() == s)
            .ok_or_else(|| UnknownLayout(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_modern() {
        assert_eq!(LayoutVariant::default(), LayoutVariant::Modern);
    }

    #[test]
    fn test_identifiers_are_unique() {
        let mut ids: Vec<_> = LayoutVariant::ALL.iter().map(|v| v.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 14);
    }

    #[test]
    fn test_parse_roundtrip() {
        for variant in LayoutVariant::ALL {
            assert_eq!(variant.as_str().parse::<LayoutVariant>(), Ok(variant));
            assert_eq!(
                serde_json::to_string(&variant).unwrap(),
                format!("\"{}\"", variant.as_str())
            );
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(
            "not-a-real-layout".parse::<LayoutVariant>(),
            Err(UnknownLayout("not-a-real-layout".to_string()))
        );
        assert!("".parse::<LayoutVariant>().is_err());
        assert!("MODERN".parse::<LayoutVariant>().is_err());
        assert!("grid ".parse::<LayoutVariant>().is_err());
    }
}
