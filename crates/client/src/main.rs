//! caseco-admin CLI entry point.

use std::sync::Arc;

use caseco_auth::{AuthSession, CognitoConfig};
use caseco_client::cli::{auth, site, tables, Cli, Commands};
use caseco_client::{ClientConfig, StaticToken, TableClient};
use caseco_core::auth::TokenSource;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "caseco_client=info,caseco_auth=info,caseco_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = ClientConfig {
        environment: cli.environment,
        api_url: cli.api_url.trim_end_matches('/').to_string(),
    };
    tracing::debug!(environment = %config.environment, api_url = %config.api_url, "Starting");

    match cli.command {
        Commands::Auth(command) => {
            let session = AuthSession::cognito(&CognitoConfig::from_env()?).await?;
            auth::run(&session, command.action, cli.format, cli.quiet).await?;
        }
        Commands::Table(command) => {
            let tokens: Arc<dyn TokenSource> = match cli.token {
                Some(token) => Arc::new(StaticToken::new(token)),
                None => match CognitoConfig::from_env() {
                    Ok(cognito) => Arc::new(AuthSession::cognito(&cognito).await?),
                    Err(e) => {
                        tracing::warn!(error = %e, "Cognito not configured; sending requests without a token");
                        Arc::new(StaticToken::none())
                    }
                },
            };
            let client = TableClient::from_config(&config, tokens);
            tables::run(&client, command.action, cli.format, cli.quiet).await?;
        }
        Commands::Site(command) => {
            site::run(command, cli.format)?;
        }
        #[cfg(feature = "mock")]
        Commands::MockServer { addr, seed } => {
            let api = caseco_client::mock_api::MockTableApi::new();
            if seed {
                let content = caseco_core::content::SiteContent::builtin()?;
                api.seed_records(&caseco_core::content::SeedRecords::from(&content))
                    .await?;
            }
            api.serve(addr).await?;
        }
    }

    Ok(())
}
