use std::fmt::Write;

use chrono::{DateTime, SecondsFormat, Utc};
use dbdoc_core::{SchemaSnapshot, TableInfo};

/// Render a snapshot as a Markdown data dictionary.
pub fn render_markdown(snapshot: &SchemaSnapshot, generated_at: DateTime<Utc>) -> String {
    let mut out = String::new();
    let db = &snapshot.database;

    // Writing into a String cannot fail.
    let _ = writeln!(out, "# {}", cell(&db.name));
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "_Generated by dbdoc from {} on {}_",
        snapshot.engine,
        generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "## Database");
    let _ = writeln!(out);
    let _ = writeln!(out, "| Name | Version | Charset | Collation |");
    let _ = writeln!(out, "| --- | --- | --- | --- |");
    let _ = writeln!(
        out,
        "| {} | {} | {} | {} |",
        cell(&db.name),
        cell(&db.version),
        cell(&db.charset),
        cell(&db.collation)
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "## Tables");
    let _ = writeln!(out);
    if snapshot.tables.is_empty() {
        let _ = writeln!(out, "_No tables found._");
    }
    for table in &snapshot.tables {
        if table.comment == table.name {
            let _ = writeln!(out, "- {}", code(&table.name));
        } else {
            let _ = writeln!(out, "- {}: {}", code(&table.name), cell(&table.comment));
        }
    }

    for table in &snapshot.tables {
        let _ = writeln!(out);
        render_table(&mut out, table);
    }

    out
}

fn render_table(out: &mut String, table: &TableInfo) {
    if table.comment == table.name {
        let _ = writeln!(out, "### {}", cell(&table.name));
    } else {
        let _ = writeln!(out, "### {} ({})", cell(&table.name), cell(&table.comment));
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "| # | Name | Type | Key | Nullable | Default | Comment |");
    let _ = writeln!(out, "| --- | --- | --- | --- | --- | --- | --- |");
    for (index, column) in table.columns.iter().enumerate() {
        let _ = writeln!(
            out,
            "| {} | {} | {} | {} | {} | {} | {} |",
            index + 1,
            cell(&column.name),
            cell(&column.data_type),
            cell(&column.key),
            if column.is_nullable { "YES" } else { "NO" },
            cell(&column.default),
            cell(&column.comment)
        );
    }
}

/// Escape text so it stays inside one table cell.
fn cell(text: &str) -> String {
    text.replace('\r', "")
        .replace('|', "\\|")
        .replace('\n', "<br>")
}

/// Wrap text in an inline code span whose fence outlasts any backtick run inside it.
fn code(text: &str) -> String {
    let text = text.replace('\r', "").replace('\n', " ");
    let mut longest = 0;
    let mut run = 0;
    for ch in text.chars() {
        if ch == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    if longest == 0 {
        return format!("`{text}`");
    }
    let fence = "`".repeat(longest + 1);
    format!("{fence} {text} {fence}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use dbdoc_core::{ColumnInfo, DatabaseInfo, EngineVariant, SCHEMA_VERSION};

    fn shop() -> SchemaSnapshot {
        let mut users = TableInfo::new("users", "");
        users.columns = vec![
            ColumnInfo {
                name: "id".to_string(),
                data_type: "int".to_string(),
                key: "PRI".to_string(),
                is_nullable: false,
                ..ColumnInfo::default()
            },
            ColumnInfo {
                name: "email".to_string(),
                data_type: "varchar(255)".to_string(),
                is_nullable: true,
                comment: "login | contact\naddress".to_string(),
                ..ColumnInfo::default()
            },
        ];
        SchemaSnapshot {
            schema_version: SCHEMA_VERSION.to_string(),
            engine: EngineVariant::MySql,
            database: DatabaseInfo {
                name: "shop".to_string(),
                version: "8.0.36".to_string(),
                charset: "utf8mb4".to_string(),
                collation: String::new(),
            },
            tables: vec![users, TableInfo::new("orders", "order records")],
        }
    }

    #[test]
    fn backticks_in_table_names_keep_the_code_span() {
        let mut snapshot = shop();
        snapshot.tables = vec![TableInfo::new("odd`name", "")];
        let doc = render_markdown(&snapshot, Utc::now());
        assert!(doc.contains("- `` odd`name ``\n"), "{doc}");
    }

    #[test]
    fn renders_data_dictionary() {
        let generated_at = Utc
            .with_ymd_and_hms(2026, 10, 19, 8, 30, 0)
            .single()
            .expect("valid timestamp");
        let doc = render_markdown(&shop(), generated_at);

        assert!(doc.starts_with("# shop\n"));
        assert!(doc.contains("_Generated by dbdoc from mysql on 2026-10-19T08:30:00Z_"));
        assert!(doc.contains("| shop | 8.0.36 | utf8mb4 |  |"));
        assert!(doc.contains("- `users`\n"));
        assert!(doc.contains("- `orders`: order records\n"));
        assert!(doc.contains("### users\n"));
        assert!(doc.contains("### orders (order records)\n"));
        assert!(doc.contains("| 1 | id | int | PRI | NO |  |  |"));
        assert!(doc.contains("| 2 | email | varchar(255) |  | YES |  | login \\| contact<br>address |"));

        assert_eq!(code("users"), "`users`");
        assert_eq!(code("odd`name"), "`` odd`name ``");
        assert_eq!(code("two``ticks"), "``` two``ticks ```");

        let users_at = doc.find("### users").unwrap_or(usize::MAX);
        let orders_at = doc.find("### orders").unwrap_or(0);
        assert!(users_at < orders_at, "tables keep snapshot order");
    }
}
