//! `secfolio palettes` - list the palette registry.

use clap::Args;
use serde::Serialize;

use crate::cli::common::{print_json, CliResult};
use crate::models::{ColorSet, PaletteName, PALETTES};

/// List available color palettes
#[derive(Args, Debug)]
pub struct PalettesArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize, Debug)]
struct PaletteOutput {
    name: PaletteName,
    display_name: &'static str,
    dark: ColorSet,
    light: ColorSet,
}

impl PalettesArgs {
    /// Execute palettes command
    pub fn execute(&self) -> CliResult<()> {
        if self.json {
            let output: Vec<_> = PALETTES
                .iter()
                .map(|p| PaletteOutput {
                    name: p.name,
                    display_name: p.display_name,
                    dark: p.dark,
                    light: p.light,
                })
                .collect();
            return print_json(&output);
        }

        println!("{:<12} {:<14} {:<9} {:<9}", "NAME", "DISPLAY", "DARK BG", "LIGHT BG");
        for palette in &PALETTES {
            println!(
                "{:<12} {:<14} {:<9} {:<9}",
                palette.name.as_str(),
                palette.display_name,
                palette.dark.background,
                palette.light.background
            );
        }
        Ok(())
    }
}
