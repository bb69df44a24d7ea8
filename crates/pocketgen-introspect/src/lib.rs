//! Schema sources: turn a schema file or a record store catalog into a
//! [`SchemaDocument`] the core compiler understands.

pub mod adapter;
pub mod document;
pub mod error;
pub mod options;
pub mod sqlite;

pub use adapter::Adapter;
pub use document::{DocumentAdapter, DocumentFormat, load_document};
pub use error::{Result, SourceError};
pub use options::IntrospectOptions;
pub use sqlite::{SqliteCatalogAdapter, introspect_sqlite, introspect_sqlite_with_options};

pub use pocketgen_core::SchemaDocument;
