use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::TableError;

/// The tables exposed by the admin API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TableName {
    Manufacturers,
    Products,
    NavItems,
    Downloads,
}

impl TableName {
    /// All tables, in dashboard order.
    pub const ALL: [TableName; 4] = [
        TableName::Manufacturers,
        TableName::Products,
        TableName::NavItems,
        TableName::Downloads,
    ];

    /// Wire name used in REST paths.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manufacturers => "manufacturers",
            Self::Products => "products",
            Self::NavItems => "nav-items",
            Self::Downloads => "downloads",
        }
    }

    /// Key attributes of items stored in this table.
    pub fn key_schema(&self) -> KeySchema {
        match self {
            Self::Manufacturers => KeySchema {
                partition: "id",
                sort: None,
            },
            Self::Products => KeySchema {
                partition: "id",
                sort: Some("manufacturerId"),
            },
            Self::NavItems => KeySchema {
                partition: "section",
                sort: Some("title"),
            },
            Self::Downloads => KeySchema {
                partition: "category",
                sort: Some("title"),
            },
        }
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for TableName {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|table| table.as_str() == s)
            .ok_or_else(|| TableError::UnknownTable(s.to_string()))
    }
}

/// Names of the JSON attributes that form an item's key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeySchema {
    pub partition: &'static str,
    pub sort: Option<&'static str>,
}

impl KeySchema {
    /// Extracts the item key from a JSON item.
    ///
    /// # Errors
    ///
    /// Fails when a key attribute is absent, not a string, or when the
    /// partition key is empty.
    pub fn key_of(&self, table: TableName, item: &serde_json::Value) -> Result<ItemKey, TableError> {
        let attribute = |name: &'static str| {
            item.get(name)
                .and_then(|v| v.as_str())
                .map(str::to_string)
                .ok_or(TableError::MissingKeyAttribute {
                    table,
                    attribute: name,
                })
        };

        let partition = attribute(self.partition)?;
        if partition.is_empty() {
            return Err(TableError::EmptyPartitionKey);
        }

        let sort = self.sort.map(attribute).transpose()?;
        Ok(ItemKey { partition, sort })
    }
}

/// Composite key of a table item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey {
    pub partition: String,
    pub sort: Option<String>,
}

impl ItemKey {
    /// Key made of a partition key only.
    pub fn new(partition: impl Into<String>) -> Self {
        Self {
            partition: partition.into(),
            sort: None,
        }
    }

    /// Key made of a partition key and a sort key.
    pub fn with_sort(partition: impl Into<String>, sort: impl Into<String>) -> Self {
        Self {
            partition: partition.into(),
            sort: Some(sort.into()),
        }
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.sort {
            Some(sort) => write!(f, "{}/{}", self.partition, sort),
            None => f.write_str(&self.partition),
        }
    }
}

/// HTTP verbs used by the table API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Operations supported by the generic table client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableOperation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl TableOperation {
    /// Operation to verb lookup table.
    const VERBS: [(TableOperation, HttpMethod); 5] = [
        (TableOperation::List, HttpMethod::Get),
        (TableOperation::Get, HttpMethod::Get),
        (TableOperation::Create, HttpMethod::Post),
        (TableOperation::Update, HttpMethod::Put),
        (TableOperation::Delete, HttpMethod::Delete),
    ];

    /// HTTP verb used to perform this operation.
    pub fn method(self) -> HttpMethod {
        Self::VERBS
            .iter()
            .find(|(op, _)| *op == self)
            .map(|(_, method)| *method)
            .unwrap_or(HttpMethod::Get)
    }

    /// Whether the operation addresses a single item rather than the collection.
    pub fn is_item_scoped(self) -> bool {
        matches!(self, Self::Get | Self::Update | Self::Delete)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Get => "get",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for TableOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Query parameters for listing a table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub limit: Option<u32>,
    pub next_token: Option<String>,
    pub filters: BTreeMap<String, String>,
}

impl ListQuery {
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_next_token(mut self, token: impl Into<String>) -> Self {
        self.next_token = Some(token.into());
        self
    }

    pub fn with_filter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(name.into(), value.into());
        self
    }

    /// Query string pairs, pagination parameters first.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.filters.len() + 2);
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(token) = &self.next_token {
            pairs.push(("nextToken".to_string(), token.clone()));
        }
        pairs.extend(self.filters.iter().map(|(k, v)| (k.clone(), v.clone())));
        pairs
    }
}

/// A page of items returned by a list request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub scanned_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

impl<T> ListResponse<T> {
    /// Whether the server reported more pages after this one.
    pub fn has_more(&self) -> bool {
        self.next_token.is_some()
    }
}
