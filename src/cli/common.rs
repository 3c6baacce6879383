//! Shared CLI plumbing: error type, exit codes, and context setup.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::config::Config;
use crate::models::{PaletteName, SiteContent};
use crate::storage::FileStore;
use crate::theme::{AppearanceState, SiteContext};

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Command completed
    Success = 0,
    /// Bad input or configuration
    ValidationError = 1,
    /// Reading or writing files failed
    IoError = 2,
}

impl ExitCode {
    /// Numeric process exit code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Error returned from a CLI command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Bad input or configuration
    #[error("{0}")]
    Validation(String),
    /// File system failure
    #[error("{0}")]
    Io(String),
}

impl CliError {
    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an I/O error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io(message.into())
    }

    /// Exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self {
            Self::Validation(_) => ExitCode::ValidationError,
            Self::Io(_) => ExitCode::IoError,
        }
    }
}

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Loads the configuration file.
pub fn load_config() -> CliResult<Config> {
    Config::load()
        .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))
}

/// Loads the site content named by `config`.
pub fn load_content(config: &Config) -> CliResult<SiteContent> {
    SiteContent::load(config.paths.content.as_deref())
        .map_err(|e| CliError::io(format!("Failed to load site content: {e:#}")))
}

/// Opens the persisted preferences and activates a site context on them.
pub fn open_context(config: &Config) -> CliResult<SiteContext> {
    let store = FileStore::open_default()
        .map_err(|e| CliError::io(format!("Failed to locate preferences: {e:#}")))?;
    let default = AppearanceState::new(
        PaletteName::default(),
        config.appearance.initial_mode.resolve(),
    );
    let mut context = SiteContext::with_default_appearance(Arc::new(store), default);
    context.activate();
    Ok(context)
}

/// Prints `value` as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON output: {e}")))?;
    println!("{json}");
    Ok(())
}
