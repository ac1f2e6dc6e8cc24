//! Seeds the admin tables from the site content.

mod error;
mod plan;

pub use error::{Result, SeedError};

use std::path::PathBuf;
use std::sync::Arc;

use caseco_auth::{AuthSession, CognitoConfig};
use caseco_client::{StaticToken, TableClient};
use caseco_core::auth::TokenSource;
use caseco_core::content::{SeedRecords, SiteContent, TableRecord};
use caseco_core::tables::TableName;
use dialoguer::Confirm;

use crate::prelude::*;

/// Seed the admin tables.
#[derive(Debug, clap::Parser)]
#[command(long_about = "Push the site content into the admin tables through the table API.

Manufacturers, products, navigation items and downloads are created in that
order. Existing items with the same key are replaced.

Environment variables:
  API_URL             - Table API base URL (defaults to http://localhost:3000)
  CASECO_TOKEN        - Bearer token; the saved Cognito session is used otherwise")]
pub struct SeedCommand {
    /// Table API base URL.
    #[arg(long, env = "API_URL", default_value = caseco_client::config::DEFAULT_API_URL)]
    pub api_url: String,

    /// Bearer token to send instead of the saved Cognito session.
    #[arg(long, env = "CASECO_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Content file to seed instead of the built-in content.
    #[arg(long, value_name = "PATH")]
    pub content: Option<PathBuf>,

    /// Only seed these tables.
    #[arg(long = "table", value_name = "TABLE")]
    pub tables: Vec<TableName>,

    /// Show the plan without writing anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Skip confirmation prompts.
    #[arg(long)]
    pub force: bool,
}

/// Main entry point for seed command.
pub async fn run(cmd: SeedCommand, global: crate::Global) -> Result<()> {
    let content = match &cmd.content {
        Some(path) => SiteContent::load(path)?,
        None => SiteContent::builtin()?,
    };
    let records = SeedRecords::from(&content);
    let plans = plan::plan(&records, &cmd.tables);

    if !global.is_silent() {
        aprintln!("{} {}", p_b("Target:"), cmd.api_url);
        aprintln!("{}", p_c("Seed Plan:"));
        for line in plan::format_plan(&plans) {
            aprintln!("  {}", p_g(&line));
        }
        aprintln!();
    }

    if cmd.dry_run {
        return Ok(());
    }

    if !cmd.force {
        let total: usize = plans.iter().map(|p| p.labels.len()).sum();
        let confirmed = Confirm::new()
            .with_prompt(format!("Write {total} items?"))
            .default(true)
            .interact()
            .map_err(|e| SeedError::Prompt(e.to_string()))?;

        if !confirmed {
            return Err(SeedError::UserCancelled);
        }
    }

    let tokens: Arc<dyn TokenSource> = match cmd.token {
        Some(token) => Arc::new(StaticToken::new(token)),
        None => Arc::new(AuthSession::cognito(&CognitoConfig::from_env()?).await?),
    };
    let client = TableClient::new(cmd.api_url, tokens);

    let mut failed = 0;
    let mut total = 0;
    for plan in &plans {
        let (written, errors) = match plan.table {
            TableName::Manufacturers => write_all(&client, &records.manufacturers, &global).await,
            TableName::Products => write_all(&client, &records.products, &global).await,
            TableName::NavItems => write_all(&client, &records.nav_items, &global).await,
            TableName::Downloads => write_all(&client, &records.downloads, &global).await,
        };
        total += written + errors;
        failed += errors;

        if !global.is_silent() {
            aprintln!("{} {} ({} written)", p_g("Seeded"), plan.table, written);
        }
    }

    if failed > 0 {
        return Err(SeedError::Incomplete { failed, total });
    }
    Ok(())
}

/// Creates every record, continuing past failures. Returns (written, failed).
async fn write_all<R: TableRecord>(
    client: &TableClient,
    records: &[R],
    global: &crate::Global,
) -> (usize, usize) {
    let mut written = 0;
    let mut failed = 0;
    for record in records {
        match client.create::<R, serde_json::Value>(R::TABLE, record).await {
            Ok(_) => {
                written += 1;
                if global.is_verbose() {
                    aprintln!("  {} {}", p_g("+"), record.label());
                }
            }
            Err(e) => {
                failed += 1;
                aprintln!("  {} {}: {}", p_r("x"), record.label(), e);
            }
        }
    }
    (written, failed)
}
