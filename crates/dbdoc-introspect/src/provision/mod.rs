//! Opening and liveness-checking catalog connections.

use dbdoc_core::{ConnectionConfig, EngineVariant, Error, Result, redact_connection};

use crate::connection::CatalogConnection;

mod mysql;
mod postgres;
mod sqlserver;

pub use mysql::MySqlCatalog;
pub use postgres::PgCatalog;
pub use sqlserver::SqlServerCatalog;

/// Open a connection for the configured engine and verify it is alive.
///
/// Failures are reported as [`Error::Connection`] with the password redacted.
pub async fn connect(config: &ConnectionConfig) -> Result<Box<dyn CatalogConnection>> {
    config.validate()?;
    let target = redact_connection(config);
    tracing::info!(event = "connecting", target = %target);

    let conn: Box<dyn CatalogConnection> = match config.engine {
        EngineVariant::MySql => Box::new(MySqlCatalog::connect(config).await.map_err(|err| {
            Error::Connection(format!("{target}: {err}"))
        })?),
        EngineVariant::SqlServer => {
            Box::new(SqlServerCatalog::connect(config).await.map_err(|err| {
                Error::Connection(format!("{target}: {err}"))
            })?)
        }
        EngineVariant::Postgres => Box::new(PgCatalog::connect(config).await.map_err(|err| {
            Error::Connection(format!("{target}: {err}"))
        })?),
    };

    tracing::info!(event = "connected", engine = %config.engine);
    Ok(conn)
}
