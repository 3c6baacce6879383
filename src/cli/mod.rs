//! CLI command handlers for secfolio.
//!
//! Each command opens the persisted preferences through the same
//! [`SiteContext`](crate::theme::SiteContext) the web server uses, so a
//! change made here shows up the next time the site is served.

pub mod common;
pub mod config;
pub mod contact;
pub mod layout;
pub mod layouts;
pub mod palettes;
pub mod render;
pub mod theme;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use contact::ContactArgs;
pub use layout::LayoutArgs;
pub use layouts::LayoutsArgs;
pub use palettes::PalettesArgs;
pub use render::RenderArgs;
pub use theme::ThemeArgs;
