//! CLI command definitions.

pub mod auth;
pub mod site;
pub mod tables;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::{Environment, DEFAULT_API_URL};

/// Admin CLI for the CASECO site.
#[derive(Debug, Parser)]
#[command(name = "caseco-admin")]
#[command(about = "Admin CLI for the CASECO site tables", long_about = None)]
pub struct Cli {
    /// Table API base URL.
    #[arg(long, env = "API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Deployment stage.
    #[arg(long, env = "APP_ENVIRONMENT", default_value = "beta")]
    pub environment: Environment,

    /// Bearer token to send instead of the saved Cognito session.
    #[arg(long, env = "CASECO_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign in, sign out and show the current administrator.
    Auth(auth::AuthCommand),
    /// Manage table items.
    Table(tables::TableCommand),
    /// Preview public site content.
    Site(site::SiteCommand),
    /// Serve an in-memory table API for local development.
    #[cfg(feature = "mock")]
    MockServer {
        /// Address to listen on.
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: std::net::SocketAddr,
        /// Preload the built-in site content.
        #[arg(long)]
        seed: bool,
    },
}
