//! `secfolio layout` - inspect and change the persisted layout.

use clap::{Args, Subcommand};

use crate::cli::common::{load_config, open_context, CliError, CliResult};
use crate::presentation::composition;

/// Layout selection commands
#[derive(Args, Debug)]
pub struct LayoutArgs {
    #[command(subcommand)]
    command: LayoutCommand,
}

#[derive(Subcommand, Debug)]
enum LayoutCommand {
    /// Show the current layout
    Show,
    /// Select a layout by identifier
    Set {
        /// Layout identifier (see `secfolio layouts`)
        id: String,
    },
}

impl LayoutArgs {
    /// Execute layout subcommand
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;
        let mut context = open_context(&config)?;

        match &self.command {
            LayoutCommand::Show => {
                let variant = context.layout();
                println!("{} ({})", variant, composition(variant).display_name);
            }
            LayoutCommand::Set { id } => {
                context
                    .set_layout_named(id)
                    .map_err(|e| CliError::validation(e.to_string()))?;
                println!("Layout set to {}", context.layout());
            }
        }

        Ok(())
    }
}
