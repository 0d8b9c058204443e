use dbdoc_core::EngineVariant;

use super::{Dialect, ProbeKind, literal};
use crate::options::IntrospectOptions;

/// MySQL and MariaDB, read through `information_schema`.
///
/// Catalog columns are cast to `char` since MySQL 8 reports several of
/// them with binary collations. Views carry the marker `VIEW` as their
/// table comment, which is dropped so they are labelled by name.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlDialect;

impl Dialect for MySqlDialect {
    fn engine(&self) -> EngineVariant {
        EngineVariant::MySql
    }

    fn probe_query(&self, kind: ProbeKind, opts: &IntrospectOptions) -> String {
        match kind {
            ProbeKind::Version => "select cast(@@version as char) as Version".to_string(),
            ProbeKind::Charset => {
                "select cast(@@character_set_server as char) as Charset".to_string()
            }
            ProbeKind::Collation => {
                "select cast(@@collation_server as char) as Collation".to_string()
            }
            ProbeKind::TableList => {
                let table_types = if opts.include_views {
                    "'BASE TABLE', 'VIEW'"
                } else {
                    "'BASE TABLE'"
                };
                format!(
                    r#"
            select cast(table_name as char) as TableName,
                   cast(case when table_type = 'VIEW' then '' else table_comment end as char)
                                             as TableComment
            from information_schema.tables
            where table_schema = '{database}'
              and table_type in ({table_types})
        "#,
                    database = literal(&opts.database),
                )
            }
        }
    }

    fn column_query(&self, table: &str, opts: &IntrospectOptions) -> String {
        format!(
            r#"
            select cast(column_name as char)    as ColName,
                   cast(column_type as char)    as ColType,
                   cast(column_key as char)     as ColKey,
                   cast(is_nullable as char)    as IsNullable,
                   cast(column_comment as char) as ColComment,
                   cast(column_default as char) as ColDefault
            from information_schema.columns
            where table_schema = '{database}' and table_name = '{table}'
            order by ordinal_position
        "#,
            database = literal(&opts.database),
            table = literal(table),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn views_are_opt_in() {
        let opts = IntrospectOptions::new("shop");
        let sql = MySqlDialect.probe_query(ProbeKind::TableList, &opts);
        assert!(sql.contains("in ('BASE TABLE')"));

        let sql = MySqlDialect.probe_query(ProbeKind::TableList, &opts.with_views(true));
        assert!(sql.contains("in ('BASE TABLE', 'VIEW')"));
    }

    #[test]
    fn view_comment_marker_is_blanked() {
        let sql = MySqlDialect.probe_query(ProbeKind::TableList, &IntrospectOptions::new("shop"));
        assert!(sql.contains("case when table_type = 'VIEW' then '' else table_comment end"));
    }
}
