//! Table CLI commands.

use std::path::PathBuf;

use caseco_core::content::{
    DownloadRecord, ManufacturerRecord, NavItemRecord, ProductRecord, TableRecord,
};
use caseco_core::tables::{ItemKey, ListQuery, TableName};
use clap::{Args, Parser, Subcommand};
use serde_json::Value;

use super::OutputFormat;
use crate::client::TableClient;
use crate::error::{ClientError, Result};
use crate::output::{format_record, format_records, json};

/// Table management commands.
#[derive(Debug, Parser)]
pub struct TableCommand {
    #[command(subcommand)]
    pub action: TableAction,
}

/// Item key arguments.
#[derive(Debug, Clone, Args)]
pub struct KeyArgs {
    /// Partition key value (id, section or category).
    pub id: String,
    /// Sort key value (manufacturerId or title) for tables that have one.
    pub sort: Option<String>,
}

/// Item body arguments.
#[derive(Debug, Clone, Args)]
pub struct ItemArgs {
    /// Item as a JSON string.
    #[arg(long, conflicts_with = "file")]
    pub data: Option<String>,
    /// Path to a JSON file holding the item.
    #[arg(long)]
    pub file: Option<PathBuf>,
}

/// Available table actions.
#[derive(Debug, Subcommand)]
pub enum TableAction {
    /// List items.
    List {
        /// Table name (manufacturers, products, nav-items, downloads).
        table: TableName,
        /// Follow nextToken until every page is fetched.
        #[arg(long)]
        all: bool,
        /// Maximum items per page.
        #[arg(long)]
        limit: Option<u32>,
        /// Continue from a previous page.
        #[arg(long, conflicts_with = "all")]
        next_token: Option<String>,
        /// Extra query filters as name=value.
        #[arg(long = "filter", value_parser = parse_filter)]
        filters: Vec<(String, String)>,
    },
    /// Get an item by key.
    Get {
        table: TableName,
        #[command(flatten)]
        key: KeyArgs,
    },
    /// Create an item.
    Create {
        table: TableName,
        #[command(flatten)]
        item: ItemArgs,
    },
    /// Replace the item at a key.
    Update {
        table: TableName,
        #[command(flatten)]
        key: KeyArgs,
        #[command(flatten)]
        item: ItemArgs,
    },
    /// Delete an item by key.
    Delete {
        table: TableName,
        #[command(flatten)]
        key: KeyArgs,
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },
}

impl TableAction {
    pub fn table(&self) -> TableName {
        match self {
            Self::List { table, .. }
            | Self::Get { table, .. }
            | Self::Create { table, .. }
            | Self::Update { table, .. }
            | Self::Delete { table, .. } => *table,
        }
    }
}

fn parse_filter(value: &str) -> std::result::Result<(String, String), String> {
    match value.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected name=value, got '{value}'")),
    }
}

/// Builds the key for `table`, checking it against the table's key schema.
pub fn item_key(table: TableName, key: &KeyArgs) -> Result<ItemKey> {
    match (table.key_schema().sort, &key.sort) {
        (Some(_), Some(sort)) => Ok(ItemKey::with_sort(&key.id, sort)),
        (None, None) => Ok(ItemKey::new(&key.id)),
        (Some(attribute), None) => Err(ClientError::InvalidInput(format!(
            "{table} items are addressed by id and {attribute}"
        ))),
        (None, Some(_)) => Err(ClientError::InvalidInput(format!(
            "{table} items have no sort key"
        ))),
    }
}

/// Reads and validates an item body as a `R`.
pub async fn read_item<R: TableRecord>(item: &ItemArgs) -> Result<R> {
    let text = match (&item.data, &item.file) {
        (Some(data), _) => data.clone(),
        (None, Some(path)) => tokio::fs::read_to_string(path).await?,
        (None, None) => {
            return Err(ClientError::InvalidInput(
                "provide the item with --data or --file".to_string(),
            ))
        }
    };
    let record: R = serde_json::from_str(&text)?;
    record.validate().into_result()?;
    Ok(record)
}

/// Runs a table action against the API.
pub async fn run(
    client: &TableClient,
    action: TableAction,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    match action.table() {
        TableName::Manufacturers => run_for::<ManufacturerRecord>(client, action, format, quiet).await,
        TableName::Products => run_for::<ProductRecord>(client, action, format, quiet).await,
        TableName::NavItems => run_for::<NavItemRecord>(client, action, format, quiet).await,
        TableName::Downloads => run_for::<DownloadRecord>(client, action, format, quiet).await,
    }
}

async fn run_for<R: TableRecord>(
    client: &TableClient,
    action: TableAction,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    match action {
        TableAction::List {
            all,
            limit,
            next_token,
            filters,
            ..
        } => {
            let query = ListQuery {
                limit,
                next_token,
                filters: filters.into_iter().collect(),
            };
            if all {
                let items: Vec<R> = client.list_all(R::TABLE, &query).await?;
                println!("{}", format_records(&items, format));
            } else {
                let page = client.list::<R>(R::TABLE, &query).await?;
                match format {
                    OutputFormat::Json => println!("{}", json::format_json(&page)),
                    OutputFormat::Pretty => {
                        println!("{}", format_records(&page.items, format));
                        if let Some(token) = page.next_token.filter(|_| !quiet) {
                            println!("\nMore items available: --next-token {token}");
                        }
                    }
                }
            }
        }
        TableAction::Get { key, .. } => {
            let key = item_key(R::TABLE, &key)?;
            let item: R = client.get(R::TABLE, &key).await?;
            println!("{}", format_record(&item, format));
        }
        TableAction::Create { item, .. } => {
            let mut record: R = read_item(&item).await?;
            record.fill_key();
            let created: R = client.create(R::TABLE, &record).await?;
            if !quiet {
                println!("Created:");
            }
            println!("{}", format_record(&created, format));
        }
        TableAction::Update { key, item, .. } => {
            let key = item_key(R::TABLE, &key)?;
            let record: R = read_item(&item).await?;
            if record.key() != key {
                return Err(ClientError::InvalidInput(format!(
                    "item key {} does not match {key}",
                    record.key()
                )));
            }
            let updated: R = client.update(R::TABLE, &key, &record).await?;
            if !quiet {
                println!("Updated:");
            }
            println!("{}", format_record(&updated, format));
        }
        TableAction::Delete { key, yes, .. } => {
            let key = item_key(R::TABLE, &key)?;
            if !yes {
                let item: Value = client.get(R::TABLE, &key).await?;
                let label = serde_json::from_value::<R>(item)
                    .map(|r| r.label().to_string())
                    .unwrap_or_else(|_| key.to_string());
                let confirmed = dialoguer::Confirm::new()
                    .with_prompt(format!("Are you sure you want to delete {label}?"))
                    .default(false)
                    .interact()
                    .map_err(|e| ClientError::InvalidInput(e.to_string()))?;
                if !confirmed {
                    if !quiet {
                        println!("Cancelled");
                    }
                    return Ok(());
                }
            }
            client.delete(R::TABLE, &key).await?;
            if !quiet {
                println!("Deleted {} {key}", R::TABLE);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(subcommand)]
        action: TableAction,
    }

    fn parse(args: &[&str]) -> TableAction {
        Harness::try_parse_from(std::iter::once("caseco-admin").chain(args.iter().copied()))
            .unwrap()
            .action
    }

    #[test]
    fn list_parses_filters() {
        let action = parse(&["list", "downloads", "--limit", "10", "--filter", "category=Catalogs"]);
        let TableAction::List { table, limit, filters, all, .. } = action else {
            panic!("expected list");
        };
        assert_eq!(table, TableName::Downloads);
        assert_eq!(limit, Some(10));
        assert!(!all);
        assert_eq!(filters, vec![("category".to_string(), "Catalogs".to_string())]);
    }

    #[test]
    fn unknown_table_rejected() {
        assert!(Harness::try_parse_from(["caseco-admin", "list", "widgets"]).is_err());
    }

    #[test]
    fn bad_filter_rejected() {
        assert!(parse_filter("category").is_err());
        assert!(parse_filter("=x").is_err());
        assert_eq!(parse_filter("a=b=c").unwrap(), ("a".to_string(), "b=c".to_string()));
    }

    #[test]
    fn key_follows_table_schema() {
        let with_sort = KeyArgs {
            id: "p1".to_string(),
            sort: Some("reer".to_string()),
        };
        let without_sort = KeyArgs {
            id: "reer".to_string(),
            sort: None,
        };

        assert_eq!(
            item_key(TableName::Products, &with_sort).unwrap(),
            ItemKey::with_sort("p1", "reer")
        );
        assert!(item_key(TableName::Products, &without_sort).is_err());
        assert!(item_key(TableName::Manufacturers, &with_sort).is_err());
        assert_eq!(
            item_key(TableName::Manufacturers, &without_sort).unwrap(),
            ItemKey::new("reer")
        );
    }

    #[tokio::test]
    async fn read_item_validates() {
        let item = ItemArgs {
            data: Some(r#"{"category":"Catalogs","title":"","url":"/c.pdf"}"#.to_string()),
            file: None,
        };
        let err = read_item::<DownloadRecord>(&item).await.unwrap_err();
        let ClientError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors.get("title"), Some("Title is required"));
    }

    #[tokio::test]
    async fn read_item_requires_input() {
        let item = ItemArgs {
            data: None,
            file: None,
        };
        assert!(matches!(
            read_item::<DownloadRecord>(&item).await,
            Err(ClientError::InvalidInput(_))
        ));
    }
}
