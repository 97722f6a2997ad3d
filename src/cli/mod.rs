pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "starter")]
#[command(about = "Starter CLI - run landing page and API checks against a deployment")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, conflicts_with = "json", help = "Output in human-readable text format (default)")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run deployment checks")]
    Check {
        #[command(subcommand)]
        cmd: commands::check::CheckCommands,
    },

    #[command(about = "Fetch one random greeting from a deployment")]
    Greeting {
        #[arg(long, help = "Base URL (defaults to ENVIRONMENT_URL, then PRODUCTION_URL)")]
        url: Option<String>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        match (cli.text, cli.json) {
            (false, true) => OutputFormat::Json,
            _ => OutputFormat::Text,
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let config = crate::config::config();

    match cli.command {
        Commands::Check { cmd } => commands::check::handle(cmd, config, output_format).await,
        Commands::Greeting { url } => commands::greeting::handle(url, config, output_format).await,
    }
}
