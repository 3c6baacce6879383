//! `secfolio contact` - contact relay diagnostics.

use clap::{Args, Subcommand};

use crate::cli::common::{load_config, load_content, CliError, CliResult};
use crate::contact::ContactForm;

/// Contact form commands
#[derive(Args, Debug)]
pub struct ContactArgs {
    #[command(subcommand)]
    command: ContactCommand,
}

#[derive(Subcommand, Debug)]
enum ContactCommand {
    /// Check that the relay credentials are configured
    Check,
}

impl ContactArgs {
    /// Execute contact subcommand
    pub fn execute(&self) -> CliResult<()> {
        match self.command {
            ContactCommand::Check => check(),
        }
    }
}

fn check() -> CliResult<()> {
    let config = load_config()?;
    let content = load_content(&config)?;
    let form = ContactForm::new(config.contact.clone(), content.contact_email);

    if let Err(e) = config.contact.check() {
        return Err(CliError::validation(format!(
            "{e}\nSet it in the [contact] section of the config file. Visitors are directed to {} until then.",
            form.fallback_email()
        )));
    }

    println!("Contact relay configured");
    println!("  Endpoint:    {}", config.contact.endpoint);
    println!("  Service ID:  {}", config.contact.service_id);
    println!("  Template ID: {}", config.contact.template_id);
    Ok(())
}
