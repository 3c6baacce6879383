//! `secfolio layouts` - list the page compositions.

use clap::Args;
use serde::Serialize;

use crate::cli::common::{print_json, CliResult};
use crate::models::LayoutVariant;
use crate::presentation::{Section, COMPOSITIONS};

/// List available page layouts
#[derive(Args, Debug)]
pub struct LayoutsArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize, Debug)]
struct LayoutOutput {
    id: LayoutVariant,
    display_name: &'static str,
    description: &'static str,
    sections: &'static [Section],
    columns: u8,
}

impl LayoutsArgs {
    /// Execute layouts command
    pub fn execute(&self) -> CliResult<()> {
        if self.json {
            let output: Vec<_> = COMPOSITIONS
                .iter()
                .map(|c| LayoutOutput {
                    id: c.variant,
                    display_name: c.display_name,
                    description: c.description,
                    sections: c.sections,
                    columns: c.treatment.columns,
                })
                .collect();
            return print_json(&output);
        }

        for composition in &COMPOSITIONS {
            println!(
                "{:<10} {}",
                composition.variant.as_str(),
                composition.description
            );
        }
        Ok(())
    }
}
