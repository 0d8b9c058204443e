//! Schema introspection for MySQL, SQL Server and PostgreSQL.
//!
//! The [`dialect`] module builds catalog queries, [`reader`] runs them over a
//! [`CatalogConnection`], and [`introspect`] assembles the results into a
//! [`SchemaSnapshot`]. [`connect`] opens the connection for a configured engine.

pub mod assembler;
pub mod connection;
pub mod dialect;
pub mod mapper;
pub mod options;
pub mod provision;
pub mod reader;

pub use assembler::introspect;
pub use connection::{CatalogConnection, DecodeError, DriverError, RowVisitor, TextRow};
pub use dialect::{Dialect, ProbeKind, build_column_query, build_probe_query, dialect_for};
pub use options::IntrospectOptions;
pub use provision::{MySqlCatalog, PgCatalog, SqlServerCatalog, connect};
pub use reader::{run_row_query, run_scalar_probe};

pub use dbdoc_core::SchemaSnapshot;
