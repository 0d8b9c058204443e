mod logging;
mod render;
mod settings;

use std::path::PathBuf;
use std::time::Instant;

use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use dbdoc_core::{EngineVariant, Error as CoreError, redact_connection};
use dbdoc_introspect::{
    IntrospectOptions, ProbeKind, build_column_query, build_probe_query, connect, introspect,
};
use render::OutputFormat;
use settings::FileSettings;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to read config file {path}: {source}")]
    ReadConfig {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    ParseConfig {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("logging error: {0}")]
    Logging(String),
}

#[derive(Parser, Debug)]
#[command(name = "dbdoc", version, about = "Document a database schema from its catalog")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Introspect a live database and write its documentation.
    Generate(GenerateArgs),
    /// Print the catalog queries issued for an engine, without connecting.
    Queries(QueriesArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// TOML file with `[connection]` and `[output]` tables.
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,
    #[command(flatten)]
    connection: ConnectionArgs,
    #[command(flatten)]
    output: OutputArgs,
    /// Also write JSON log lines to this file.
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ConnectionArgs {
    /// Database engine: mysql, sqlserver, postgres (or legacy code 1, 2, 3).
    #[arg(long)]
    pub engine: Option<EngineVariant>,
    #[arg(long)]
    pub host: Option<String>,
    #[arg(long)]
    pub port: Option<u16>,
    #[arg(long, short = 'u')]
    pub user: Option<String>,
    #[arg(long, env = "DBDOC_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
    #[arg(long, short = 'd')]
    pub database: Option<String>,
    /// Schema to document (PostgreSQL defaults to `public`).
    #[arg(long)]
    pub schema: Option<String>,
    /// Document views alongside tables.
    #[arg(long)]
    pub include_views: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct OutputArgs {
    #[arg(long, short = 'f', value_enum)]
    pub format: Option<OutputFormat>,
    /// Directory the document is written to.
    #[arg(long, short = 'o', value_name = "DIR")]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct QueriesArgs {
    #[arg(long)]
    engine: EngineVariant,
    #[arg(long, short = 'd')]
    database: String,
    #[arg(long)]
    schema: Option<String>,
    #[arg(long)]
    include_views: bool,
    /// Print the column query for this table (repeatable).
    #[arg(long, short = 't', value_name = "TABLE")]
    table: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Generate(args) => run_generate(args).await,
        Command::Queries(args) => {
            print!("{}", render_queries(&args));
            Ok(())
        }
    }
}

async fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let GenerateArgs {
        config,
        connection,
        output,
        log_file,
    } = args;

    let file = match &config {
        Some(path) => settings::load_file_settings(path)?,
        None => FileSettings::default(),
    };
    let run = settings::resolve(file, &connection, &output)?;

    logging::init_logging(log_file.as_deref())?;

    let target = redact_connection(&run.connection);
    tracing::info!(event = "run_started", engine = %run.connection.engine, target = %target);
    let timer = Instant::now();

    let mut conn = connect(&run.connection).await?;
    let opts = IntrospectOptions::from(&run.connection);
    let snapshot = introspect(conn.as_mut(), run.connection.engine, &opts)
        .await
        .inspect_err(|err| tracing::error!(event = "run_failed", error = %err))?;
    drop(conn);

    let path = render::write_document(&snapshot, run.format, &run.out_dir, Utc::now())?;
    tracing::info!(event = "document_written", path = %path.display(), format = ?run.format);

    let duration_ms = timer.elapsed().as_millis() as u64;
    tracing::info!(event = "run_finished", status = "success", duration_ms = duration_ms);

    Ok(())
}

fn render_queries(args: &QueriesArgs) -> String {
    let opts = IntrospectOptions {
        database: args.database.clone(),
        schema: args.schema.clone(),
        include_views: args.include_views,
    };

    let mut out = String::new();
    for kind in [
        ProbeKind::Version,
        ProbeKind::Charset,
        ProbeKind::Collation,
        ProbeKind::TableList,
    ] {
        out.push_str(&format!("-- {}\n", kind.purpose()));
        out.push_str(build_probe_query(kind, args.engine, &opts).trim());
        out.push_str(";\n\n");
    }
    for table in &args.table {
        out.push_str(&format!("-- columns of {table}\n"));
        out.push_str(build_column_query(table, args.engine, &opts).trim());
        out.push_str(";\n\n");
    }
    out
}
