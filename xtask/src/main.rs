//! See <https://github.com/matklad/cargo-xtask/>
//!
//! This binary defines various auxiliary build commands, which are not
//! expressible with just `cargo`.
//!
//! The binary is integrated into the `cargo` command line by using an
//! alias in `.cargo/config`.

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod admin;
mod prelude;
mod seed;

/// Development tasks for the CASECO site
#[derive(Debug, Parser)]
#[command(name = "xtask")]
#[command(about = "Development tasks for the CASECO site", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: Global,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Silence the command output
    #[clap(long, global = true)]
    pub silent: bool,

    /// Enable verbose output
    #[clap(long, global = true)]
    pub verbose: bool,
}

impl Global {
    pub fn is_silent(&self) -> bool {
        self.silent
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Provision administrators in the Cognito user pool
    Admin(admin::AdminCommand),

    /// Seed the admin tables from the site content
    Seed(seed::SeedCommand),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.global.is_verbose() {
        "caseco_client=debug,caseco_auth=debug"
    } else {
        "caseco_client=warn,caseco_auth=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Admin(admin_cmd) => {
            admin::run(admin_cmd, cli.global)
                .await
                .context("admin command failed")?;
        }
        Commands::Seed(seed_cmd) => {
            seed::run(seed_cmd, cli.global)
                .await
                .context("seed command failed")?;
        }
    }

    Ok(())
}
