//! Document rendering for schema snapshots.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use dbdoc_core::{Error, Result, SchemaSnapshot};
use serde::Deserialize;

mod atomic;
mod markdown;

use atomic::write_bytes_atomic;
use markdown::render_markdown;

/// Output document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[serde(alias = "md")]
    #[value(alias = "md")]
    Markdown,
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            OutputFormat::Json => "json",
        }
    }
}

/// Render a snapshot into the requested format.
pub fn render(
    snapshot: &SchemaSnapshot,
    format: OutputFormat,
    generated_at: DateTime<Utc>,
) -> Result<String> {
    match format {
        OutputFormat::Markdown => Ok(render_markdown(snapshot, generated_at)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(snapshot).map_err(|err| Error::Render(err.to_string()))
        }
    }
}

/// Render and write `<dir>/<database>.<ext>`, returning the path written.
pub fn write_document(
    snapshot: &SchemaSnapshot,
    format: OutputFormat,
    dir: &Path,
    generated_at: DateTime<Utc>,
) -> Result<PathBuf> {
    let document = render(snapshot, format, generated_at)?;
    let path = dir.join(format!(
        "{}.{}",
        file_stem(&snapshot.database.name),
        format.extension()
    ));
    write_bytes_atomic(&path, document.as_bytes())?;
    Ok(path)
}

fn file_stem(database: &str) -> String {
    let stem: String = database
        .chars()
        .map(|ch| match ch {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            other => other,
        })
        .collect();
    let stem = stem.trim_matches('.').trim();
    if stem.is_empty() {
        "schema".to_string()
    } else {
        stem.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dbdoc_core::{DatabaseInfo, EngineVariant, SCHEMA_VERSION, TableInfo};

    fn snapshot(name: &str) -> SchemaSnapshot {
        SchemaSnapshot {
            schema_version: SCHEMA_VERSION.to_string(),
            engine: EngineVariant::MySql,
            database: DatabaseInfo {
                name: name.to_string(),
                ..DatabaseInfo::default()
            },
            tables: vec![TableInfo::new("users", "")],
        }
    }

    #[test]
    fn file_stem_strips_path_separators() {
        assert_eq!(file_stem("shop"), "shop");
        assert_eq!(file_stem("../etc/passwd"), "_etc_passwd");
        assert_eq!(file_stem(".."), "schema");
    }

    #[test]
    fn writes_json_document() {
        let dir = std::env::temp_dir().join(format!("dbdoc-render-{}", std::process::id()));
        let path = write_document(&snapshot("shop"), OutputFormat::Json, &dir, Utc::now())
            .expect("write document");
        assert_eq!(path, dir.join("shop.json"));

        let content = std::fs::read_to_string(&path).expect("read document");
        let decoded: SchemaSnapshot = serde_json::from_str(&content).expect("parse document");
        assert_eq!(decoded, snapshot("shop"));

        std::fs::remove_dir_all(&dir).ok();
    }
}
