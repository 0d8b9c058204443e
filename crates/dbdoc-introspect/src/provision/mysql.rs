use async_trait::async_trait;
use futures::TryStreamExt;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection, MySqlRow};
use sqlx::{Connection, Row};

use dbdoc_core::ConnectionConfig;

use crate::connection::{CatalogConnection, DriverError, RowVisitor, TextRow};

/// A single MySQL connection used for catalog reads.
#[derive(Debug)]
pub struct MySqlCatalog {
    conn: MySqlConnection,
}

impl MySqlCatalog {
    pub async fn connect(config: &ConnectionConfig) -> Result<Self, sqlx::Error> {
        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port())
            .username(&config.user)
            .password(&config.password)
            .database(&config.database);

        let mut conn = MySqlConnection::connect_with(&options).await?;
        conn.ping().await?;
        Ok(Self { conn })
    }
}

#[async_trait]
impl CatalogConnection for MySqlCatalog {
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

fn text_row(row: &MySqlRow) -> TextRow {
    TextRow::new((0..row.len()).map(|index| text_value(row, index)).collect())
}

// Some information_schema columns arrive as VARBINARY; read those lossily.
fn text_value(row: &MySqlRow, index: usize) -> Option<String> {
    match row.try_get::<Option<String>, _>(index) {
        Ok(value) => value,
        Err(_) => row
            .try_get::<Option<Vec<u8>>, _>(index)
            .ok()
            .flatten()
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned()),
    }
}
