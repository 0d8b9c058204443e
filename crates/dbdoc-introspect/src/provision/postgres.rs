use async_trait::async_trait;
use futures::TryStreamExt;
use sqlx::postgres::{PgConnectOptions, PgConnection, PgRow};
use sqlx::{Connection, Row};

use dbdoc_core::ConnectionConfig;

use crate::connection::{CatalogConnection, DriverError, RowVisitor, TextRow};

/// A single PostgreSQL connection used for catalog reads.
#[derive(Debug)]
pub struct PgCatalog {
    conn: PgConnection,
}

impl PgCatalog {
    pub async fn connect(config: &ConnectionConfig) -> Result<Self, sqlx::Error> {
        let options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port())
            .username(&config.user)
            .password(&config.password)
            .database(&config.database);

        let mut conn = PgConnection::connect_with(&options).await?;
        conn.ping().await?;
        Ok(Self { conn })
    }

    /// Wrap an already-open connection, e.g. one checked out of a pool.
    pub fn from_connection(conn: PgConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl CatalogConnection for PgCatalog {
    async fn visit_rows(&mut self, sql: &str, visit: &mut RowVisitor<'_>) -> Result<(), DriverError> {
        let mut rows = sqlx::query(sql).fetch(&mut self.conn);
        while let Some(row) = rows.try_next().await? {
            if visit(text_row(&row)).is_break() {
                break;
            }
        }
        Ok(())
    }
}

fn text_row(row: &PgRow) -> TextRow {
    TextRow::new(
        (0..row.len())
            .map(|index| row.try_get::<Option<String>, _>(index).ok().flatten())
            .collect(),
    )
}
