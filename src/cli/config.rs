//! Configuration CLI commands.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use serde::Serialize;

use crate::branding::APP_DISPLAY_NAME;
use crate::cli::common::{load_config, print_json, CliError, CliResult};
use crate::config::{Config, InitialMode};
use crate::storage::file::PREFERENCES_FILE;

/// Configuration commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Write a default configuration file
    Init(ConfigInitArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Write a default configuration file
#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Overwrite an existing configuration file
    #[arg(long)]
    force: bool,
}

/// Set configuration values
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Mode shown before a visitor picks one (dark, light, or system)
    #[arg(long, value_name = "MODE")]
    initial_mode: Option<String>,

    /// JSON file replacing the embedded site content
    #[arg(long, value_name = "FILE")]
    content: Option<PathBuf>,

    /// Email relay service ID
    #[arg(long, value_name = "ID")]
    service_id: Option<String>,

    /// Email relay template ID
    #[arg(long, value_name = "ID")]
    template_id: Option<String>,

    /// Email relay public key
    #[arg(long, value_name = "KEY")]
    public_key: Option<String>,

    /// Email relay endpoint URL
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,

    /// Address offered when the contact form cannot be used
    #[arg(long, value_name = "EMAIL")]
    fallback_email: Option<String>,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput {
    config_file: String,
    preferences_file: String,
    paths: PathsOutput,
    appearance: AppearanceOutput,
    contact: ContactOutput,
}

#[derive(Serialize, Debug)]
struct PathsOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
}

#[derive(Serialize, Debug)]
struct AppearanceOutput {
    initial_mode: InitialMode,
}

#[derive(Serialize, Debug)]
struct ContactOutput {
    configured: bool,
    endpoint: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    problem: Option<String>,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Init(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;
        let output = config_output(&config)?;

        if self.json {
            print_json(&output)
        } else {
            output_human_readable(&output);
            Ok(())
        }
    }
}

impl ConfigInitArgs {
    /// Execute init command
    pub fn execute(&self) -> CliResult<()> {
        if Config::exists() && !self.force {
            return Err(CliError::validation(
                "Configuration file already exists; pass --force to overwrite it",
            ));
        }

        save(&Config::default())?;
        let path = Config::config_file_path()
            .map_err(|e| CliError::io(format!("Failed to locate config file: {e}")))?;
        println!("Wrote {}", path.display());
        Ok(())
    }
}

impl ConfigSetArgs {
    fn is_empty(&self) -> bool {
        self.initial_mode.is_none()
            && self.content.is_none()
            && self.service_id.is_none()
            && self.template_id.is_none()
            && self.public_key.is_none()
            && self.endpoint.is_none()
            && self.fallback_email.is_none()
    }

    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if self.is_empty() {
            return Err(CliError::validation(
                "At least one configuration option must be specified, see --help",
            ));
        }

        let mut config = load_config()?;

        if let Some(mode) = &self.initial_mode {
            config.appearance.initial_mode = match mode.to_lowercase().as_str() {
                "dark" => InitialMode::Dark,
                "light" => InitialMode::Light,
                "system" => InitialMode::System,
                _ => {
                    return Err(CliError::validation(
                        "Invalid initial mode. Must be 'dark', 'light', or 'system'",
                    ))
                }
            };
        }
        if let Some(content) = &self.content {
            config.paths.content = Some(content.clone());
        }
        if let Some(service_id) = &self.service_id {
            config.contact.service_id.clone_from(service_id);
        }
        if let Some(template_id) = &self.template_id {
            config.contact.template_id.clone_from(template_id);
        }
        if let Some(public_key) = &self.public_key {
            config.contact.public_key.clone_from(public_key);
        }
        if let Some(endpoint) = &self.endpoint {
            config.contact.endpoint.clone_from(endpoint);
        }
        if let Some(email) = &self.fallback_email {
            config.contact.fallback_email = Some(email.clone());
        }

        save(&config)?;
        println!("Configuration updated successfully.");
        Ok(())
    }
}

fn save(config: &Config) -> CliResult<()> {
    config
        .validate()
        .map_err(|e| CliError::validation(format!("Invalid configuration: {e:#}")))?;
    config
        .save()
        .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))
}

fn config_output(config: &Config) -> CliResult<ConfigOutput> {
    let dir = Config::config_dir()
        .map_err(|e| CliError::io(format!("Failed to locate config directory: {e}")))?;
    let problem = config.contact.check().err().map(|e| e.to_string());

    Ok(ConfigOutput {
        config_file: dir.join("config.toml").display().to_string(),
        preferences_file: dir.join(PREFERENCES_FILE).display().to_string(),
        paths: PathsOutput {
            content: config
                .paths
                .content
                .as_ref()
                .map(|p| p.display().to_string()),
        },
        appearance: AppearanceOutput {
            initial_mode: config.appearance.initial_mode,
        },
        contact: ContactOutput {
            configured: problem.is_none(),
            endpoint: config.contact.endpoint.clone(),
            problem,
        },
    })
}

/// Output configuration in human-readable format
fn output_human_readable(output: &ConfigOutput) {
    let title = format!("{APP_DISPLAY_NAME} Configuration");
    println!("{title}");
    println!("{}", "=".repeat(title.len()));
    println!();

    println!("Files:");
    println!("  Config:      {}", output.config_file);
    println!("  Preferences: {}", output.preferences_file);
    println!();

    println!("Paths:");
    match &output.paths.content {
        Some(content) => println!("  Content: {content}"),
        None => println!("  Content: (embedded)"),
    }
    println!();

    println!("Appearance:");
    println!(
        "  Initial Mode: {}",
        format!("{:?}", output.appearance.initial_mode).to_lowercase()
    );
    println!();

    println!("Contact:");
    println!("  Endpoint: {}", output.contact.endpoint);
    match &output.contact.problem {
        Some(problem) => println!("  Status:   not configured ({problem})"),
        None => println!("  Status:   configured"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_output_flags_placeholder_contact() {
        let output = config_output(&Config::default()).unwrap();
        assert!(!output.contact.configured);
        assert!(output.contact.problem.unwrap().contains("service_id"));
        assert!(output.preferences_file.ends_with(PREFERENCES_FILE));
    }
}
