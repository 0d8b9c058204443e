use async_trait::async_trait;
use tiberius::{AuthMethod, Client, Config, EncryptionLevel, Row};
use tokio::net::TcpStream;
use tokio_util::compat::{Compat, TokioAsyncWriteCompatExt};

use dbdoc_core::ConnectionConfig;

use crate::connection::{CatalogConnection, DriverError, RowVisitor, TextRow};

/// A single SQL Server connection used for catalog reads.
pub struct SqlServerCatalog {
    client: Client<Compat<TcpStream>>,
}

impl SqlServerCatalog {
    pub async fn connect(config: &ConnectionConfig) -> Result<Self, tiberius::error::Error> {
        let mut tds = Config::new();
        tds.host(&config.host);
        tds.port(config.port());
        tds.database(&config.database);
        tds.authentication(AuthMethod::sql_server(&config.user, &config.password));
        // Only the login packet is encrypted; catalog reads go in the clear.
        tds.encryption(EncryptionLevel::Off);
        tds.trust_cert();

        let tcp = TcpStream::connect(tds.get_addr())
            .await
            .map_err(|err| tiberius::error::Error::Io {
                kind: err.kind(),
                message: err.to_string(),
            })?;
        tcp.set_nodelay(true).ok();

        let mut client = Client::connect(tds, tcp.compat_write()).await?;
        client.simple_query("SELECT 1").await?.into_row().await?;
        Ok(Self { client })
    }
}

#[async_trait]
impl CatalogConnection for SqlServerCatalog {
    // The TDS stream must be drained before the next request, so the
    // result set is read to the end before rows are handed out.
    async fn visit_rows(&mut self, sql: &str, visit: &mut RowVisitor<'_>) -> Result<(), DriverError> {
        let rows = self.client.simple_query(sql).await?.into_first_result().await?;
        for row in &rows {
            if visit(text_row(row)).is_break() {
                break;
            }
        }
        Ok(())
    }
}

fn text_row(row: &Row) -> TextRow {
    TextRow::new((0..row.len()).map(|index| text_value(row, index)).collect())
}

fn text_value(row: &Row, index: usize) -> Option<String> {
    if let Ok(value) = row.try_get::<&str, _>(index) {
        return value.map(str::to_string);
    }
    if let Ok(value) = row.try_get::<i32, _>(index) {
        return value.map(|number| number.to_string());
    }
    row.try_get::<i64, _>(index)
        .ok()
        .flatten()
        .map(|number| number.to_string())
}
