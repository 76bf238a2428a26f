mod cmd;
mod output;

use clap::{Parser, Subcommand};
use cmd::{config::ConfigSubcommand, generate::GenerateArgs, token::TokenSubcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "prdgen",
    about = "Generate a project requirements document from a name, description, and feature list",
    version,
    propagate_version = true
)]
struct Cli {
    /// State directory holding config.yaml and credentials (default: ~/.prdgen)
    #[arg(long, global = true, env = "PRDGEN_HOME")]
    home: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a requirements document
    Generate(GenerateArgs),

    /// Manage the stored API token
    Token {
        #[command(subcommand)]
        subcommand: TokenSubcommand,
    },

    /// Inspect and validate configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },

    /// Launch the web UI
    Ui {
        /// Port to listen on (0 = OS-assigned)
        #[arg(long, default_value = "0")]
        port: u16,

        /// Don't open browser automatically
        #[arg(long)]
        no_open: bool,

        /// Use the built-in canned generator instead of the hosted model
        #[arg(long)]
        offline: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Ui { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = prd_core::paths::state_dir(cli.home.as_deref())
        .map_err(anyhow::Error::from)
        .and_then(|home| match cli.command {
            Commands::Generate(args) => cmd::generate::run(&home, args, cli.json),
            Commands::Token { subcommand } => cmd::token::run(&home, subcommand, cli.json),
            Commands::Config { subcommand } => cmd::config::run(&home, subcommand, cli.json),
            Commands::Ui {
                port,
                no_open,
                offline,
            } => cmd::ui::run(&home, port, no_open, offline),
        });

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
