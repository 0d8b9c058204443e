use std::collections::BTreeSet;

use dbdoc_core::{
    DatabaseInfo, EngineVariant, Error, IntrospectionPhase, QueryPurpose, Result, SCHEMA_VERSION,
    SchemaSnapshot, TableInfo, validate_snapshot,
};

use crate::connection::CatalogConnection;
use crate::dialect::{Dialect, ProbeKind, dialect_for};
use crate::options::IntrospectOptions;
use crate::reader::{run_row_query, run_scalar_probe};

/// Introspect the database behind `conn` into a normalized snapshot.
///
/// Queries run strictly one after another over the single connection:
/// the three metadata probes, the table list, then one column query per
/// table in list order. Probe failures degrade the affected field to an
/// empty string; table or column failures abort the run.
pub async fn introspect<C>(
    conn: &mut C,
    engine: EngineVariant,
    opts: &IntrospectOptions,
) -> Result<SchemaSnapshot>
where
    C: CatalogConnection + ?Sized,
{
    let dialect = dialect_for(engine);
    debug_assert_eq!(dialect.engine(), engine);
    tracing::info!(event = "introspection_started", engine = %engine, database = %opts.database);

    let database = DatabaseInfo {
        name: opts.database.clone(),
        version: probe(conn, dialect, ProbeKind::Version, opts).await,
        charset: probe(conn, dialect, ProbeKind::Charset, opts).await,
        collation: probe(conn, dialect, ProbeKind::Collation, opts).await,
    };

    let table_sql = dialect.probe_query(ProbeKind::TableList, opts);
    let mut tables = run_row_query(conn, QueryPurpose::TableList, &table_sql, |row| {
        dialect.decode_table(row)
    })
    .await
    .map_err(|err| Error::introspection(IntrospectionPhase::ListingTables, err))?;
    tracing::info!(event = "tables_listed", count = tables.len());
    if opts.schema.is_none() {
        if let Some(name) = first_duplicate(&tables) {
            return Err(Error::InvalidSchema(format!(
                "duplicate table name: {name}; the table list spans several schemas, \
                 pass a schema filter (--schema) to document one of them"
            )));
        }
    }

    for table in &mut tables {
        let column_sql = dialect.column_query(&table.name, opts);
        let purpose = QueryPurpose::Columns {
            table: table.name.clone(),
        };
        table.columns = run_row_query(conn, purpose, &column_sql, |row| dialect.decode_column(row))
            .await
            .map_err(|err| {
                Error::introspection(
                    IntrospectionPhase::ReadingColumns {
                        table: table.name.clone(),
                    },
                    err,
                )
            })?;
        tracing::debug!(event = "columns_read", table = %table.name, count = table.columns.len());
    }

    let snapshot = SchemaSnapshot {
        schema_version: SCHEMA_VERSION.to_string(),
        engine,
        database,
        tables,
    };
    validate_snapshot(&snapshot)?;

    tracing::info!(event = "introspection_finished", tables = snapshot.tables.len());
    Ok(snapshot)
}

/// Same-named tables show up when an unfiltered catalog spans several schemas.
fn first_duplicate(tables: &[TableInfo]) -> Option<&str> {
    let mut seen = BTreeSet::new();
    tables
        .iter()
        .map(|table| table.name.as_str())
        .find(|name| !seen.insert(*name))
}

/// Run one metadata probe, falling back to an empty string.
async fn probe<C>(
    conn: &mut C,
    dialect: &dyn Dialect,
    kind: ProbeKind,
    opts: &IntrospectOptions,
) -> String
where
    C: CatalogConnection + ?Sized,
{
    let sql = dialect.probe_query(kind, opts);
    match run_scalar_probe(conn, kind.purpose(), &sql).await {
        Ok(Some(value)) => value,
        Ok(None) => {
            tracing::warn!(event = "probe_empty", probe = %kind.purpose());
            String::new()
        }
        Err(err) => {
            tracing::warn!(event = "probe_failed", probe = %kind.purpose(), error = %err);
            String::new()
        }
    }
}
