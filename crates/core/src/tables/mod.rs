//! Generic key/value table addressing.
//!
//! Every piece of editable content lives in one of four tables and is
//! addressed by a partition key plus an optional sort key. This module turns
//! those logical addresses into REST paths and maps table operations onto
//! HTTP verbs. Nothing here performs I/O.

mod error;
mod paths;
mod types;

pub use error::{Result, TableError};
pub use paths::{collection_path, encode_segment, item_path, operation_path, TABLES_BASE_PATH};
pub use types::{
    HttpMethod, ItemKey, KeySchema, ListQuery, ListResponse, TableName, TableOperation,
};
