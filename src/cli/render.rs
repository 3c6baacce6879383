//! `secfolio render` - render the site to stdout or a file.

use std::path::PathBuf;

use clap::Args;

use crate::cli::common::{load_config, load_content, open_context, CliError, CliResult};
use crate::contact::ContactForm;
use crate::models::{LayoutVariant, Mode, PaletteName};
use crate::presentation::{composition, render_page, Page};
use crate::theme::{AppearanceState, StyleSurface};

/// Render the site as HTML
///
/// Overrides apply to this render only; persisted choices are untouched.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Layout to render instead of the persisted one
    #[arg(long, value_name = "ID")]
    layout: Option<String>,

    /// Palette to render instead of the persisted one
    #[arg(long, value_name = "NAME")]
    palette: Option<String>,

    /// Mode to render instead of the persisted one
    #[arg(long, value_name = "MODE")]
    mode: Option<String>,

    /// Write to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

impl RenderArgs {
    /// Execute render command
    pub fn execute(&self) -> CliResult<()> {
        let layout = parse_opt::<LayoutVariant>(self.layout.as_deref())?;
        let palette = parse_opt::<PaletteName>(self.palette.as_deref())?;
        let mode = parse_opt::<Mode>(self.mode.as_deref())?;

        let config = load_config()?;
        let content = load_content(&config)?;
        let context = open_context(&config)?;

        let current = context.appearance();
        let appearance = AppearanceState::new(
            palette.unwrap_or(current.palette),
            mode.unwrap_or(current.mode),
        );
        let surface = StyleSurface::new();
        surface.apply(&appearance.colors());
        let snapshot = surface.snapshot();

        let notice = ContactForm::new(config.contact.clone(), content.contact_email.clone())
            .blocked_notice();

        let html = render_page(&Page {
            content: &content,
            composition: composition(layout.unwrap_or_else(|| context.layout())),
            surface: &snapshot,
            appearance,
            contact_notice: notice.as_deref(),
        })
        .map_err(|e| CliError::io(format!("Failed to render page: {e}")))?;

        match &self.output {
            Some(path) => std::fs::write(path, html).map_err(|e| {
                CliError::io(format!("Failed to write {}: {}", path.display(), e))
            }),
            None => {
                print!("{html}");
                Ok(())
            }
        }
    }
}

fn parse_opt<T>(value: Option<&str>) -> CliResult<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .map(|v| v.parse::<T>().map_err(|e| CliError::validation(e.to_string())))
        .transpose()
}
