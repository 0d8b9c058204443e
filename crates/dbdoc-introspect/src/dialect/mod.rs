//! Catalog query text for each supported engine.
//!
//! This is the only place engine-specific SQL lives. Every dialect honours
//! the same output-column contract:
//! - probe queries return one row with one scalar column
//! - the table list returns `(TableName, TableComment)`
//! - the column query returns `(ColName, ColType, ColKey, IsNullable,
//!   ColComment, ColDefault)` ordered by ordinal position

use dbdoc_core::{ColumnInfo, EngineVariant, QueryPurpose, TableInfo};

use crate::connection::{DecodeError, TextRow};
use crate::mapper;
use crate::options::IntrospectOptions;

mod mysql;
mod postgres;
mod sqlserver;

pub use mysql::MySqlDialect;
pub use postgres::PostgresDialect;
pub use sqlserver::SqlServerDialect;

/// Database-level queries issued once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeKind {
    Version,
    Charset,
    Collation,
    TableList,
}

impl ProbeKind {
    pub fn purpose(&self) -> QueryPurpose {
        match self {
            ProbeKind::Version => QueryPurpose::Version,
            ProbeKind::Charset => QueryPurpose::Charset,
            ProbeKind::Collation => QueryPurpose::Collation,
            ProbeKind::TableList => QueryPurpose::TableList,
        }
    }
}

/// Query building and row decoding for one engine's catalog layout.
pub trait Dialect: Send + Sync {
    fn engine(&self) -> EngineVariant;

    fn probe_query(&self, kind: ProbeKind, opts: &IntrospectOptions) -> String;

    fn column_query(&self, table: &str, opts: &IntrospectOptions) -> String;

    /// Decode a `(TableName, TableComment)` row.
    fn decode_table(&self, row: &TextRow) -> Result<TableInfo, DecodeError> {
        let name = row.required(0, "TableName")?;
        Ok(TableInfo::new(name, row.text(1)))
    }

    /// Decode a `(ColName, ColType, ColKey, IsNullable, ColComment, ColDefault)` row.
    fn decode_column(&self, row: &TextRow) -> Result<ColumnInfo, DecodeError> {
        Ok(ColumnInfo {
            name: row.required(0, "ColName")?,
            data_type: row.text(1),
            key: mapper::key_role(&row.text(2)),
            is_nullable: mapper::is_yes(&row.text(3)),
            comment: row.text(4),
            default: self.normalize_default(&row.text(5)),
        })
    }

    /// Engine-specific cleanup of a column default expression.
    fn normalize_default(&self, raw: &str) -> String {
        raw.to_string()
    }
}

/// Select the dialect for an engine. Resolved once per run.
pub fn dialect_for(engine: EngineVariant) -> &'static dyn Dialect {
    match engine {
        EngineVariant::MySql => &MySqlDialect,
        EngineVariant::SqlServer => &SqlServerDialect,
        EngineVariant::Postgres => &PostgresDialect,
    }
}

/// Query text for a database-level probe or the table list.
pub fn build_probe_query(kind: ProbeKind, engine: EngineVariant, opts: &IntrospectOptions) -> String {
    dialect_for(engine).probe_query(kind, opts)
}

/// Query text listing the columns of `table`.
pub fn build_column_query(table: &str, engine: EngineVariant, opts: &IntrospectOptions) -> String {
    dialect_for(engine).column_query(table, opts)
}

/// Render a string literal body, doubling embedded single quotes.
pub(crate) fn literal(value: &str) -> String {
    value.replace('\'', "''")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> IntrospectOptions {
        IntrospectOptions::new("shop")
    }

    #[test]
    fn dialect_matches_requested_engine() {
        for engine in EngineVariant::ALL {
            assert_eq!(dialect_for(engine).engine(), engine);
        }
    }

    #[test]
    fn every_engine_has_distinct_queries() {
        let opts = opts();
        for kind in [
            ProbeKind::Version,
            ProbeKind::Charset,
            ProbeKind::Collation,
            ProbeKind::TableList,
        ] {
            let texts: Vec<String> = EngineVariant::ALL
                .iter()
                .map(|engine| build_probe_query(kind, *engine, &opts))
                .collect();
            assert!(texts.iter().all(|text| !text.trim().is_empty()));
            assert_ne!(texts[0], texts[1], "{kind:?}");
            assert_ne!(texts[1], texts[2], "{kind:?}");
            assert_ne!(texts[0], texts[2], "{kind:?}");
        }

        let columns: Vec<String> = EngineVariant::ALL
            .iter()
            .map(|engine| build_column_query("users", *engine, &opts))
            .collect();
        assert_ne!(columns[0], columns[1]);
        assert_ne!(columns[1], columns[2]);
        assert_ne!(columns[0], columns[2]);
    }

    #[test]
    fn column_queries_name_the_table_and_follow_output_contract() {
        let opts = opts();
        for engine in EngineVariant::ALL {
            let sql = build_column_query("order_items", engine, &opts);
            assert!(sql.contains("'order_items'"), "{engine}: {sql}");
            for alias in ["ColName", "ColType", "ColKey", "IsNullable", "ColComment", "ColDefault"] {
                assert!(sql.contains(alias), "{engine} missing {alias}");
            }
            let name_pos = sql.find("ColName").unwrap_or(usize::MAX);
            let default_pos = sql.find("ColDefault").unwrap_or(0);
            assert!(name_pos < default_pos, "{engine}: output columns out of order");
            assert!(sql.to_lowercase().contains("order by"), "{engine}");
        }
    }

    #[test]
    fn table_list_queries_expose_name_and_comment() {
        let opts = opts();
        for engine in EngineVariant::ALL {
            let sql = build_probe_query(ProbeKind::TableList, engine, &opts);
            assert!(sql.contains("TableName"), "{engine}");
            assert!(sql.contains("TableComment"), "{engine}");
        }
    }

    #[test]
    fn mysql_queries_are_scoped_to_the_database() {
        let opts = opts();
        let tables = build_probe_query(ProbeKind::TableList, EngineVariant::MySql, &opts);
        assert!(tables.contains("table_schema = 'shop'"));
        let columns = build_column_query("users", EngineVariant::MySql, &opts);
        assert!(columns.contains("table_schema = 'shop'"));
        assert!(columns.contains("table_name = 'users'"));
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        let sql = build_column_query("o'brien", EngineVariant::Postgres, &opts());
        assert!(sql.contains("'o''brien'"));
    }

    #[test]
    fn decodes_column_rows_with_normalized_fields() {
        let row: TextRow = [
            Some("email"),
            Some("varchar(255)"),
            Some("UNI"),
            Some("YES"),
            None,
            None,
        ]
        .into_iter()
        .collect();
        let column = MySqlDialect.decode_column(&row).expect("decode column");
        assert_eq!(column.name, "email");
        assert_eq!(column.data_type, "varchar(255)");
        assert_eq!(column.key, "");
        assert!(column.is_nullable);
        assert_eq!(column.comment, "");
        assert_eq!(column.default, "");
    }

    #[test]
    fn table_rows_without_name_are_rejected() {
        let row: TextRow = [None::<&str>, Some("orphan")].into_iter().collect();
        assert!(PostgresDialect.decode_table(&row).is_err());
    }
}
