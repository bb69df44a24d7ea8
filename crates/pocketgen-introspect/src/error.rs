use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading a schema from a source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("collection {collection}: invalid catalog row: {reason}")]
    InvalidCatalogRow { collection: String, reason: String },
    #[error("unsupported schema source: {0}")]
    UnsupportedSource(String),
}

pub type Result<T> = std::result::Result<T, SourceError>;
