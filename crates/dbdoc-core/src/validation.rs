use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::schema::SchemaSnapshot;

/// Validate internal consistency of a schema snapshot.
///
/// This checks:
/// - the database name is set
/// - table names are unique
/// - column names are unique within each table
/// - every table carries a non-empty comment
pub fn validate_snapshot(snapshot: &SchemaSnapshot) -> Result<()> {
    if snapshot.database.name.trim().is_empty() {
        return Err(Error::InvalidSchema("database name is empty".to_string()));
    }

    let mut tables = BTreeSet::new();
    for table in &snapshot.tables {
        if !tables.insert(table.name.as_str()) {
            return Err(Error::InvalidSchema(format!(
                "duplicate table name: {}",
                table.name
            )));
        }

        if table.comment.is_empty() {
            return Err(Error::InvalidSchema(format!(
                "table without label: {}",
                table.name
            )));
        }

        let mut columns = BTreeSet::new();
        for column in &table.columns {
            if !columns.insert(column.name.as_str()) {
                return Err(Error::InvalidSchema(format!(
                    "duplicate column name: {}.{}",
                    table.name, column.name
                )));
            }
        }
    }

    Ok(())
}
