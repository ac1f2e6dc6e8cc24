//! Pure functions mapping table addresses to REST paths.
//!
//! - collection: `/tables/{table}`
//! - item: `/tables/{table}/{id}` or `/tables/{table}/{id}/{sortKey}`
//!
//! Key segments are percent-encoded so identifiers containing `/`, spaces or
//! other reserved characters still address exactly one item.

use std::borrow::Cow;

use super::{ItemKey, Result, TableError, TableName, TableOperation};

/// Prefix shared by every table route.
pub const TABLES_BASE_PATH: &str = "/tables";

/// Percent-encodes a single path segment.
pub fn encode_segment(segment: &str) -> Cow<'_, str> {
    urlencoding::encode(segment)
}

/// Path of a table's collection, used by list and create.
///
/// # Examples
///
/// ```
/// use caseco_core::tables::{collection_path, TableName};
///
/// assert_eq!(collection_path(TableName::NavItems), "/tables/nav-items");
/// ```
pub fn collection_path(table: TableName) -> String {
    format!("{TABLES_BASE_PATH}/{table}")
}

/// Path of a single item, used by get, update and delete.
///
/// # Examples
///
/// ```
/// use caseco_core::tables::{item_path, ItemKey, TableName};
///
/// assert_eq!(
///     item_path(TableName::Manufacturers, &ItemKey::new("reer")),
///     "/tables/manufacturers/reer"
/// );
/// assert_eq!(
///     item_path(TableName::Downloads, &ItemKey::with_sort("Manuals", "EOS-4")),
///     "/tables/downloads/Manuals/EOS-4"
/// );
/// ```
pub fn item_path(table: TableName, key: &ItemKey) -> String {
    let mut path = format!(
        "{}/{}",
        collection_path(table),
        encode_segment(&key.partition)
    );
    if let Some(sort) = &key.sort {
        path.push('/');
        path.push_str(&encode_segment(sort));
    }
    path
}

/// Path for an operation, checking that item-scoped operations have a key.
pub fn operation_path(
    operation: TableOperation,
    table: TableName,
    key: Option<&ItemKey>,
) -> Result<String> {
    if !operation.is_item_scoped() {
        return Ok(collection_path(table));
    }

    match key {
        Some(key) if key.partition.is_empty() => Err(TableError::EmptyPartitionKey),
        Some(key) => Ok(item_path(table, key)),
        None => Err(TableError::MissingKey { operation, table }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_paths_for_every_table() {
        assert_eq!(collection_path(TableName::Manufacturers), "/tables/manufacturers");
        assert_eq!(collection_path(TableName::Products), "/tables/products");
        assert_eq!(collection_path(TableName::NavItems), "/tables/nav-items");
        assert_eq!(collection_path(TableName::Downloads), "/tables/downloads");
    }

    #[test]
    fn item_path_without_sort_key() {
        assert_eq!(
            item_path(TableName::Manufacturers, &ItemKey::new("micro-epsilon")),
            "/tables/manufacturers/micro-epsilon"
        );
    }

    #[test]
    fn item_path_with_sort_key() {
        assert_eq!(
            item_path(
                TableName::Products,
                &ItemKey::with_sort("product-1700000000000", "reer")
            ),
            "/tables/products/product-1700000000000/reer"
        );
    }

    #[test]
    fn item_path_encodes_reserved_characters() {
        assert_eq!(
            item_path(
                TableName::NavItems,
                &ItemKey::with_sort("Applications", "Light Curtains/EOS")
            ),
            "/tables/nav-items/Applications/Light%20Curtains%2FEOS"
        );
    }

    #[test]
    fn operation_path_collection_ignores_key() {
        let key = ItemKey::new("ignored");
        assert_eq!(
            operation_path(TableOperation::List, TableName::Downloads, Some(&key)).unwrap(),
            "/tables/downloads"
        );
        assert_eq!(
            operation_path(TableOperation::Create, TableName::Downloads, None).unwrap(),
            "/tables/downloads"
        );
    }

    #[test]
    fn operation_path_requires_key_for_item_operations() {
        assert_eq!(
            operation_path(TableOperation::Get, TableName::Products, None),
            Err(TableError::MissingKey {
                operation: TableOperation::Get,
                table: TableName::Products,
            })
        );
    }

    #[test]
    fn operation_path_rejects_empty_partition() {
        let key = ItemKey::new("");
        assert_eq!(
            operation_path(TableOperation::Delete, TableName::Manufacturers, Some(&key)),
            Err(TableError::EmptyPartitionKey)
        );
    }
}
