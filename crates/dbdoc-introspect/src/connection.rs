use std::ops::ControlFlow;

use async_trait::async_trait;
use thiserror::Error;

/// Error reported by a database driver while running a catalog query.
pub type DriverError = Box<dyn std::error::Error + Send + Sync>;

/// Callback receiving each result row; `Break` stops the iteration early.
pub type RowVisitor<'a> = dyn FnMut(TextRow) -> ControlFlow<()> + Send + 'a;

/// An open connection able to run catalog queries.
///
/// Implementations own the result cursor for the duration of one
/// `visit_rows` call and must release it before returning, whether the
/// query succeeds, returns no rows, fails, or the visitor breaks early.
#[async_trait]
pub trait CatalogConnection: Send {
    async fn visit_rows(&mut self, sql: &str, visit: &mut RowVisitor<'_>) -> Result<(), DriverError>;
}

/// One result row with every value rendered as text. NULL is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextRow {
    values: Vec<Option<String>>,
}

impl TextRow {
    pub fn new(values: Vec<Option<String>>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.values.get(index).and_then(|value| value.as_deref())
    }

    /// Value at `index`, with NULL and absent columns read as empty text.
    pub fn text(&self, index: usize) -> String {
        self.get(index).unwrap_or_default().to_string()
    }

    /// Value at `index` that must be present and non-empty.
    pub fn required(&self, index: usize, field: &'static str) -> Result<String, DecodeError> {
        match self.get(index) {
            Some(value) if !value.is_empty() => Ok(value.to_string()),
            _ => Err(DecodeError::Missing { index, field }),
        }
    }
}

impl<S: Into<String>> FromIterator<Option<S>> for TextRow {
    fn from_iter<I: IntoIterator<Item = Option<S>>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(|value| value.map(Into::into)).collect())
    }
}

/// A row could not be turned into a typed record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("column {index} ({field}) is missing")]
    Missing { index: usize, field: &'static str },
}
