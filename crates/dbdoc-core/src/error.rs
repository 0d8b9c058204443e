use std::fmt;

use thiserror::Error;

/// Core error type shared across dbdoc crates.
#[derive(Debug, Error)]
pub enum Error {
    /// Unrecognized engine variant or unusable connection settings.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// The connection could not be opened or failed its liveness check.
    #[error("connection error: {0}")]
    Connection(String),
    /// A single catalog query failed to execute or decode.
    #[error("catalog query failed ({purpose}): {message}")]
    CatalogQuery { purpose: QueryPurpose, message: String },
    /// A structural catalog query failed; no snapshot is produced.
    #[error("introspection aborted while {phase}")]
    Introspection {
        phase: IntrospectionPhase,
        #[source]
        source: Box<Error>,
    },
    /// The snapshot violates internal invariants.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),
    /// Failure writing or reading local files.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// The document renderer could not encode the snapshot.
    #[error("render error: {0}")]
    Render(String),
}

impl Error {
    pub fn catalog_query(purpose: QueryPurpose, message: impl Into<String>) -> Self {
        Error::CatalogQuery {
            purpose,
            message: message.into(),
        }
    }

    /// Wrap a structural failure with the phase it happened in.
    pub fn introspection(phase: IntrospectionPhase, source: Error) -> Self {
        Error::Introspection {
            phase,
            source: Box::new(source),
        }
    }
}

/// Which catalog query a failure belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryPurpose {
    Version,
    Charset,
    Collation,
    TableList,
    Columns { table: String },
}

impl fmt::Display for QueryPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryPurpose::Version => f.write_str("version probe"),
            QueryPurpose::Charset => f.write_str("charset probe"),
            QueryPurpose::Collation => f.write_str("collation probe"),
            QueryPurpose::TableList => f.write_str("table list"),
            QueryPurpose::Columns { table } => write!(f, "columns of table `{table}`"),
        }
    }
}

/// Structural phase of an introspection run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntrospectionPhase {
    ListingTables,
    ReadingColumns { table: String },
}

impl fmt::Display for IntrospectionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntrospectionPhase::ListingTables => f.write_str("listing tables"),
            IntrospectionPhase::ReadingColumns { table } => {
                write!(f, "reading columns of table `{table}`")
            }
        }
    }
}

/// Convenience alias for results returned by dbdoc crates.
pub type Result<T> = std::result::Result<T, Error>;
