use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::engine::EngineVariant;

/// Key role recorded for primary-key members.
pub const PRIMARY_KEY_ROLE: &str = "PRI";

/// Normalized schema description produced by one introspection run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SchemaSnapshot {
    /// Contract version for this snapshot format.
    pub schema_version: String,
    /// Engine the snapshot was read from.
    pub engine: EngineVariant,
    /// Database-level metadata.
    pub database: DatabaseInfo,
    /// Tables in catalog order.
    pub tables: Vec<TableInfo>,
}

/// Database-level metadata. Probe fields are empty when the probe failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DatabaseInfo {
    /// Database name as configured, never re-queried.
    pub name: String,
    pub version: String,
    pub charset: String,
    pub collation: String,
}

/// A table with its columns in ordinal order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TableInfo {
    pub name: String,
    /// Catalog comment, or the table name when the catalog has none.
    pub comment: String,
    pub columns: Vec<ColumnInfo>,
}

impl TableInfo {
    /// Build a table entry, labelling it with its own name when the comment is empty.
    pub fn new(name: impl Into<String>, comment: impl Into<String>) -> Self {
        let name = name.into();
        let comment = comment.into();
        let comment = if comment.trim().is_empty() {
            name.clone()
        } else {
            comment
        };
        Self {
            name,
            comment,
            columns: Vec::new(),
        }
    }

    pub fn primary_key(&self) -> impl Iterator<Item = &ColumnInfo> {
        self.columns.iter().filter(|column| column.is_primary_key())
    }
}

/// Column metadata for a table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ColumnInfo {
    pub name: String,
    /// Declared type as the engine reports it (e.g. `varchar(255)`).
    pub data_type: String,
    /// `PRI` for primary-key members, empty otherwise.
    pub key: String,
    pub is_nullable: bool,
    pub comment: String,
    pub default: String,
}

impl ColumnInfo {
    pub fn is_primary_key(&self) -> bool {
        self.key == PRIMARY_KEY_ROLE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_comment_defaults_to_table_name() {
        let table = TableInfo::new("users", "");
        assert_eq!(table.comment, "users");

        let again = TableInfo::new(table.name.clone(), table.comment.clone());
        assert_eq!(again.comment, "users");
    }

    #[test]
    fn keeps_catalog_comment() {
        let table = TableInfo::new("orders", "order records");
        assert_eq!(table.comment, "order records");
    }
}
