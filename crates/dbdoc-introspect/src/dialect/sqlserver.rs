use dbdoc_core::EngineVariant;

use super::{Dialect, ProbeKind, literal};
use crate::options::IntrospectOptions;

/// SQL Server, read through `sysobjects`/`syscolumns` with comments taken
/// from the `MS_Description` extended property.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlServerDialect;

impl SqlServerDialect {
    fn object_types(opts: &IntrospectOptions) -> &'static str {
        if opts.include_views {
            "'U', 'V'"
        } else {
            "'U'"
        }
    }

    fn schema_filter(alias: &str, opts: &IntrospectOptions) -> String {
        match &opts.schema {
            Some(schema) => format!("\n              and schema_name({alias}.uid) = '{}'", literal(schema)),
            None => String::new(),
        }
    }
}

impl Dialect for SqlServerDialect {
    fn engine(&self) -> EngineVariant {
        EngineVariant::SqlServer
    }

    fn probe_query(&self, kind: ProbeKind, opts: &IntrospectOptions) -> String {
        match kind {
            ProbeKind::Version => "select cast(@@VERSION as nvarchar(4000)) as Version".to_string(),
            ProbeKind::Charset => r#"
            select case p.code_page
                     when 0 then N'UTF-16'
                     when 65001 then N'UTF-8'
                     else N'CP' + cast(p.code_page as nvarchar(10))
                   end as Charset
            from (
                select cast(collationproperty(cast(serverproperty('Collation') as nvarchar(128)), 'CodePage') as int) as code_page
            ) p
        "#
            .to_string(),
            ProbeKind::Collation => {
                "select cast(serverproperty('Collation') as nvarchar(128)) as Collation".to_string()
            }
            ProbeKind::TableList => format!(
                r#"
            select cast(so.name as nvarchar(500))   as TableName,
                   cast(sep.value as nvarchar(500)) as TableComment
            from sysobjects so
            left join sys.extended_properties sep
              on sep.major_id = so.id and sep.minor_id = 0
             and sep.class = 1 and sep.name = 'MS_Description'
            where so.xtype in ({types})
              and so.name <> 'dtproperties'{schema}
        "#,
                types = Self::object_types(opts),
                schema = Self::schema_filter("so", opts),
            ),
        }
    }

    // Length is only appended for types that carry one; `max` replaces -1.
    fn column_query(&self, table: &str, opts: &IntrospectOptions) -> String {
        format!(
            r#"
            select
                ColName = cast(a.name as nvarchar(500)),
                ColType = cast(case
                    when b.name in ('char', 'varchar', 'nchar', 'nvarchar', 'binary', 'varbinary')
                        then b.name + '(' + case
                            when columnproperty(a.id, a.name, 'PRECISION') = -1 then 'max'
                            else cast(columnproperty(a.id, a.name, 'PRECISION') as varchar(10))
                        end + ')'
                    when b.name in ('decimal', 'numeric')
                        then b.name + '(' + cast(columnproperty(a.id, a.name, 'PRECISION') as varchar(10))
                            + ',' + cast(isnull(columnproperty(a.id, a.name, 'SCALE'), 0) as varchar(10)) + ')'
                    when b.name in ('datetime2', 'datetimeoffset', 'time')
                        then b.name + '(' + cast(isnull(columnproperty(a.id, a.name, 'SCALE'), 0) as varchar(10)) + ')'
                    else b.name
                end as nvarchar(500)),
                ColKey = case when exists (
                        select 1
                        from sys.indexes i
                        join sys.index_columns ic
                          on ic.object_id = i.object_id and ic.index_id = i.index_id
                        where i.is_primary_key = 1
                          and ic.object_id = a.id
                          and ic.column_id = a.colid
                    ) then 'PRI' else '' end,
                IsNullable = case when a.isnullable = 1 then 'YES' else 'NO' end,
                ColComment = cast(isnull(g.value, '') as nvarchar(4000)),
                ColDefault = cast(isnull(e.text, '') as nvarchar(4000))
            from syscolumns a
            left join systypes b on a.xusertype = b.xusertype
            inner join sysobjects d on a.id = d.id and d.xtype in ({types}) and d.name <> 'dtproperties'
            left join syscomments e on a.cdefault = e.id
            left join sys.extended_properties g
              on g.major_id = a.id and g.minor_id = a.colid
             and g.class = 1 and g.name = 'MS_Description'
            where d.name = '{table}'{schema}
            order by a.colorder
        "#,
            types = Self::object_types(opts),
            table = literal(table),
            schema = Self::schema_filter("d", opts),
        )
    }

    /// SQL Server stores defaults wrapped in parentheses, e.g. `((0))`.
    fn normalize_default(&self, raw: &str) -> String {
        let mut value = raw.trim();
        while let Some(inner) = strip_wrapping_parens(value) {
            value = inner.trim();
        }
        value.to_string()
    }
}

/// Remove one pair of parentheses when the opening one closes at the very end.
fn strip_wrapping_parens(value: &str) -> Option<&str> {
    let inner = value.strip_prefix('(')?.strip_suffix(')')?;
    let mut depth = 0usize;
    let mut in_string = false;
    for ch in inner.chars() {
        match ch {
            '\'' => in_string = !in_string,
            '(' if !in_string => depth += 1,
            ')' if !in_string => {
                if depth == 0 {
                    return None;
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    (depth == 0).then_some(inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_redundant_default_parens() {
        let dialect = SqlServerDialect;
        assert_eq!(dialect.normalize_default("((0))"), "0");
        assert_eq!(dialect.normalize_default("(getdate())"), "getdate()");
        assert_eq!(dialect.normalize_default("('(n/a)')"), "'(n/a)'");
        assert_eq!(dialect.normalize_default("((1)+(2))"), "(1)+(2)");
        assert_eq!(dialect.normalize_default(""), "");
    }

    #[test]
    fn schema_filter_is_optional() {
        let opts = IntrospectOptions::new("shop");
        let sql = SqlServerDialect.column_query("users", &opts);
        assert!(!sql.contains("schema_name"));

        let sql = SqlServerDialect.column_query("users", &opts.with_schema("sales"));
        assert!(sql.contains("schema_name(d.uid) = 'sales'"));
    }

    #[test]
    fn length_is_not_appended_to_every_type() {
        let sql = SqlServerDialect.column_query("users", &IntrospectOptions::new("shop"));
        assert!(sql.contains("else b.name"));
        assert!(sql.contains("'max'"));
    }
}
