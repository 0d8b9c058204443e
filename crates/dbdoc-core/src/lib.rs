//! Core contracts and helpers for dbdoc.
//!
//! This crate defines the normalized schema snapshot, the engine selector,
//! connection configuration, and the error taxonomy shared by the
//! introspection layer and the CLI.

pub mod config;
pub mod engine;
pub mod error;
pub mod redaction;
pub mod schema;
pub mod validation;

pub use config::ConnectionConfig;
pub use engine::EngineVariant;
pub use error::{Error, IntrospectionPhase, QueryPurpose, Result};
pub use redaction::{RedactedConnection, redact_connection};
pub use schema::{ColumnInfo, DatabaseInfo, PRIMARY_KEY_ROLE, SchemaSnapshot, TableInfo};
pub use validation::validate_snapshot;

/// Current contract version for serialized snapshots.
pub const SCHEMA_VERSION: &str = "0.1";
