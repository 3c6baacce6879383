//! secfolio - manage the portfolio's appearance and layout from the terminal.
//!
//! Every command reads and writes the same persisted preferences the web
//! server uses.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use secfolio::branding::{APP_BINARY_NAME, APP_DESCRIPTION};
use secfolio::cli::{
    ConfigArgs, ContactArgs, ExitCode, LayoutArgs, LayoutsArgs, PalettesArgs, RenderArgs,
    ThemeArgs,
};

#[derive(Parser, Debug)]
#[command(name = APP_BINARY_NAME, author, version, about = APP_DESCRIPTION, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List available color palettes
    Palettes(PalettesArgs),
    /// List available page layouts
    Layouts(LayoutsArgs),
    /// Show or change the palette and color mode
    Theme(ThemeArgs),
    /// Show or change the page layout
    Layout(LayoutArgs),
    /// Render the site as HTML
    Render(RenderArgs),
    /// Inspect configuration
    Config(ConfigArgs),
    /// Contact form diagnostics
    Contact(ContactArgs),
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so JSON and HTML output stay clean.
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = match &cli.command {
        Command::Palettes(args) => args.execute(),
        Command::Layouts(args) => args.execute(),
        Command::Theme(args) => args.execute(),
        Command::Layout(args) => args.execute(),
        Command::Render(args) => args.execute(),
        Command::Config(args) => args.execute(),
        Command::Contact(args) => args.execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code().code());
    }
    std::process::exit(ExitCode::Success.code());
}
