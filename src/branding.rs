//! Branding and application identity configuration.
//!
//! This module centralizes the names and paths that identify the site and its
//! tooling, so a rebrand only touches this file.

/// The human-readable display name of the application.
pub const APP_DISPLAY_NAME: &str = "secfolio";

/// The CLI binary name (lowercase, no spaces).
pub const APP_BINARY_NAME: &str = "secfolio";

/// The web server binary name.
pub const WEB_BINARY_NAME: &str = "secfolio-web";

/// The directory name for application data (config, persisted preferences).
///
/// Used in platform-specific paths:
/// - Linux: `~/.config/{APP_DATA_DIR}/`
/// - macOS: `~/Library/Application Support/{APP_DATA_DIR}/`
/// - Windows: `%APPDATA%\{APP_DATA_DIR}\`
pub const APP_DATA_DIR: &str = "secfolio";

/// Environment variable that overrides the config directory.
///
/// Tests and sandboxed deployments point this at a scratch directory.
pub const CONFIG_DIR_ENV: &str = "SECFOLIO_CONFIG_DIR";

/// Short description for help text.
pub const APP_DESCRIPTION: &str = "Security consultant portfolio with selectable palettes and layouts";
