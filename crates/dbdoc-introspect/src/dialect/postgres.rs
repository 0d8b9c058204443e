use dbdoc_core::EngineVariant;

use super::{Dialect, ProbeKind, literal};
use crate::options::IntrospectOptions;

const DEFAULT_SCHEMA: &str = "public";

/// PostgreSQL, read through `pg_class`/`pg_attribute`/`pg_description`.
///
/// Comments are correlated by relation oid within the configured schema,
/// so same-named tables in other schemas never contribute descriptions.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresDialect;

impl Dialect for PostgresDialect {
    fn engine(&self) -> EngineVariant {
        EngineVariant::Postgres
    }

    fn probe_query(&self, kind: ProbeKind, opts: &IntrospectOptions) -> String {
        match kind {
            ProbeKind::Version => "SHOW server_version".to_string(),
            ProbeKind::Charset => "SHOW server_encoding".to_string(),
            // lc_collate stopped being a setting in PostgreSQL 16.
            ProbeKind::Collation => {
                "SELECT datcollate::text FROM pg_database WHERE datname = current_database()"
                    .to_string()
            }
            ProbeKind::TableList => {
                let relkinds = if opts.include_views {
                    "'r', 'p', 'v', 'm'"
                } else {
                    "'r', 'p'"
                };
                format!(
                    r#"
            SELECT c.relname::text     AS "TableName",
                   d.description::text AS "TableComment"
            FROM pg_class c
            JOIN pg_namespace n ON n.oid = c.relnamespace
            LEFT OUTER JOIN pg_description d
              ON d.objoid = c.oid AND d.objsubid = 0 AND d.classoid = 'pg_class'::regclass
            WHERE n.nspname = '{schema}'
              AND c.relkind IN ({relkinds})
            ORDER BY c.relname
        "#,
                    schema = literal(opts.schema_or(DEFAULT_SCHEMA)),
                )
            }
        }
    }

    fn column_query(&self, table: &str, opts: &IntrospectOptions) -> String {
        format!(
            r#"
            SELECT a.attname::text                                   AS "ColName",
                   pg_catalog.format_type(a.atttypid, a.atttypmod)   AS "ColType",
                   CASE WHEN EXISTS (
                            SELECT 1
                            FROM pg_constraint k
                            WHERE k.conrelid = c.oid
                              AND k.contype = 'p'
                              AND a.attnum = ANY (k.conkey)
                        ) THEN 'PRI' ELSE '' END                     AS "ColKey",
                   CASE WHEN a.attnotnull THEN 'NO' ELSE 'YES' END   AS "IsNullable",
                   d.description::text                               AS "ColComment",
                   pg_catalog.pg_get_expr(ad.adbin, ad.adrelid)      AS "ColDefault"
            FROM pg_attribute a
            JOIN pg_class c ON c.oid = a.attrelid
            JOIN pg_namespace n ON n.oid = c.relnamespace
            LEFT JOIN pg_description d
              ON d.objoid = c.oid AND d.objsubid = a.attnum AND d.classoid = 'pg_class'::regclass
            LEFT JOIN pg_attrdef ad ON ad.adrelid = a.attrelid AND ad.adnum = a.attnum
            WHERE n.nspname = '{schema}'
              AND c.relname = '{table}'
              AND a.attnum > 0
              AND NOT a.attisdropped
            ORDER BY a.attnum
        "#,
            schema = literal(opts.schema_or(DEFAULT_SCHEMA)),
            table = literal(table),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_public_schema() {
        let opts = IntrospectOptions::new("shop");
        let sql = PostgresDialect.probe_query(ProbeKind::TableList, &opts);
        assert!(sql.contains("n.nspname = 'public'"));
        assert!(sql.contains("ORDER BY c.relname"));

        let sql = PostgresDialect.column_query("users", &opts.with_schema("sales"));
        assert!(sql.contains("n.nspname = 'sales'"));
        assert!(sql.contains("c.relname = 'users'"));
    }
}
