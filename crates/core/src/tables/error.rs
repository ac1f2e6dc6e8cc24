use thiserror::Error;

use super::{TableName, TableOperation};

/// Errors raised while addressing table items.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("Unknown table: {0}")]
    UnknownTable(String),

    #[error("{operation} on {table} requires an item key")]
    MissingKey {
        operation: TableOperation,
        table: TableName,
    },

    #[error("Item in {table} is missing key attribute '{attribute}'")]
    MissingKeyAttribute {
        table: TableName,
        attribute: &'static str,
    },

    #[error("Partition key must not be empty")]
    EmptyPartitionKey,
}

/// Result type for table addressing.
pub type Result<T> = std::result::Result<T, TableError>;
