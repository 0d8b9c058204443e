use std::ops::ControlFlow;

use dbdoc_core::{Error, QueryPurpose, Result};

use crate::connection::{CatalogConnection, DecodeError, TextRow};

/// Run a single-value probe. `Ok(None)` means the query returned no row.
///
/// Only the first column of the first row is read; NULL reads as empty text.
pub async fn run_scalar_probe<C>(
    conn: &mut C,
    purpose: QueryPurpose,
    sql: &str,
) -> Result<Option<String>>
where
    C: CatalogConnection + ?Sized,
{
    let mut value = None;
    conn.visit_rows(sql, &mut |row: TextRow| {
        value = Some(row.text(0));
        ControlFlow::Break(())
    })
    .await
    .map_err(|err| Error::catalog_query(purpose, err.to_string()))?;

    Ok(value)
}

/// Run a row query and decode every row. An empty result is not an error.
///
/// Decoding stops at the first row that cannot be decoded; the failure is
/// reported with the query's purpose.
pub async fn run_row_query<C, T, F>(
    conn: &mut C,
    purpose: QueryPurpose,
    sql: &str,
    mut decode: F,
) -> Result<Vec<T>>
where
    C: CatalogConnection + ?Sized,
    T: Send,
    F: FnMut(&TextRow) -> std::result::Result<T, DecodeError> + Send,
{
    let mut records = Vec::new();
    let mut failure = None;

    let outcome = conn
        .visit_rows(sql, &mut |row: TextRow| match decode(&row) {
            Ok(record) => {
                records.push(record);
                ControlFlow::Continue(())
            }
            Err(err) => {
                failure = Some(err);
                ControlFlow::Break(())
            }
        })
        .await;

    if let Err(err) = outcome {
        return Err(Error::catalog_query(purpose, err.to_string()));
    }
    if let Some(err) = failure {
        return Err(Error::catalog_query(purpose, err.to_string()));
    }

    tracing::debug!(event = "catalog_rows_read", purpose = %purpose, rows = records.len());
    Ok(records)
}
