//! Data models for palettes, colors, and layout identifiers.
//!
//! Models are plain data with parsing and formatting; they know nothing about
//! persistence or rendering.

pub mod color_set;
pub mod content;
pub mod layout_variant;
pub mod palette;
pub mod rgb;

// Re-export all model types
pub use color_set::{ColorSet, Mode, UnknownMode, STYLE_SLOTS};
pub use content::{Project, SiteContent};
pub use layout_variant::{LayoutVariant, UnknownLayout};
pub use palette::{Palette, PaletteName, UnknownPalette, PALETTES};
pub use rgb::RgbColor;
