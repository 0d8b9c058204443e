use std::path::{Path, PathBuf};

use dbdoc_core::{ConnectionConfig, EngineVariant};
use serde::Deserialize;

use crate::render::OutputFormat;
use crate::{CliError, ConnectionArgs, OutputArgs};

const DEFAULT_OUTPUT_DIR: &str = "docs";

/// Contents of a `dbdoc.toml` file. Every field may be overridden by a flag.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileSettings {
    #[serde(default)]
    pub connection: ConnectionSettings,
    #[serde(default)]
    pub output: OutputSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConnectionSettings {
    pub engine: Option<EngineVariant>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub database: Option<String>,
    pub schema: Option<String>,
    pub include_views: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSettings {
    pub format: Option<OutputFormat>,
    pub dir: Option<PathBuf>,
}

/// Fully resolved settings for one generate run.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub connection: ConnectionConfig,
    pub format: OutputFormat,
    pub out_dir: PathBuf,
}

pub fn load_file_settings(path: &Path) -> Result<FileSettings, CliError> {
    let content = std::fs::read_to_string(path).map_err(|source| CliError::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| CliError::ParseConfig {
        path: path.to_path_buf(),
        source,
    })
}

/// Merge file settings with command-line flags; flags win.
pub fn resolve(
    file: FileSettings,
    conn: &ConnectionArgs,
    output: &OutputArgs,
) -> Result<RunSettings, CliError> {
    let settings = file.connection;
    let engine = conn
        .engine
        .or(settings.engine)
        .ok_or_else(|| missing("engine"))?;

    let connection = ConnectionConfig {
        engine,
        host: conn
            .host
            .clone()
            .or(settings.host)
            .unwrap_or_else(|| "localhost".to_string()),
        port: conn.port.or(settings.port),
        user: conn.user.clone().or(settings.user).ok_or_else(|| missing("user"))?,
        password: conn
            .password
            .clone()
            .or(settings.password)
            .unwrap_or_default(),
        database: conn
            .database
            .clone()
            .or(settings.database)
            .ok_or_else(|| missing("database"))?,
        schema: conn.schema.clone().or(settings.schema),
        include_views: conn.include_views || settings.include_views.unwrap_or(false),
    };
    connection.validate()?;

    Ok(RunSettings {
        connection,
        format: output
            .format
            .or(file.output.format)
            .unwrap_or(OutputFormat::Markdown),
        out_dir: output
            .out
            .clone()
            .or(file.output.dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
    })
}

fn missing(field: &str) -> CliError {
    CliError::InvalidConfig(format!(
        "`{field}` must be set in the config file or on the command line"
    ))
}
