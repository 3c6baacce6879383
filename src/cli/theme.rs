//! `secfolio theme` - inspect and change the persisted palette and mode.

use clap::{Args, Subcommand};
use serde::Serialize;

use crate::cli::common::{load_config, open_context, print_json, CliError, CliResult};
use crate::models::{Mode, PaletteName};
use crate::theme::SiteContext;

/// Palette and color mode commands
#[derive(Args, Debug)]
pub struct ThemeArgs {
    #[command(subcommand)]
    command: ThemeCommand,
}

#[derive(Subcommand, Debug)]
enum ThemeCommand {
    /// Show the current palette, mode, and resolved colors
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Select a palette by name
    Set {
        /// Palette name (see `secfolio palettes`)
        palette: String,
    },
    /// Select dark or light mode
    Mode {
        /// "dark" or "light"
        mode: String,
    },
    /// Flip between dark and light mode
    Toggle,
}

#[derive(Serialize, Debug)]
struct ThemeOutput {
    palette: PaletteName,
    mode: Mode,
    colors: Vec<SlotOutput>,
}

#[derive(Serialize, Debug)]
struct SlotOutput {
    slot: String,
    color: String,
}

impl ThemeArgs {
    /// Execute theme subcommand
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;
        let mut context = open_context(&config)?;

        match &self.command {
            ThemeCommand::Show { json } => {
                if *json {
                    return print_json(&theme_output(&context));
                }
                print_human(&context);
            }
            ThemeCommand::Set { palette } => {
                context
                    .set_palette_named(palette)
                    .map_err(|e| CliError::validation(e.to_string()))?;
                println!("Palette set to {}", context.appearance().palette);
            }
            ThemeCommand::Mode { mode } => {
                let mode = mode
                    .parse::<Mode>()
                    .map_err(|e| CliError::validation(e.to_string()))?;
                context.set_mode(mode);
                println!("Mode set to {}", context.appearance().mode);
            }
            ThemeCommand::Toggle => {
                context.toggle_mode();
                println!("Mode set to {}", context.appearance().mode);
            }
        }

        Ok(())
    }
}

fn theme_output(context: &SiteContext) -> ThemeOutput {
    let appearance = context.appearance();
    ThemeOutput {
        palette: appearance.palette,
        mode: appearance.mode,
        colors: context
            .surface_snapshot()
            .slots
            .into_iter()
            .map(|(slot, color)| SlotOutput {
                slot,
                color: color.to_hex(),
            })
            .collect(),
    }
}

fn print_human(context: &SiteContext) {
    let appearance = context.appearance();
    println!(
        "Palette: {} ({})",
        appearance.palette,
        appearance.palette.palette().display_name
    );
    println!("Mode:    {}", appearance.mode);
    println!();
    for (slot, color) in context.surface_snapshot().slots {
        println!("  --{slot:<22} {color}");
    }
}
