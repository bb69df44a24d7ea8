use std::path::PathBuf;

use thiserror::Error;

/// Everything that can abort a CLI run.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration in {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error(transparent)]
    Source(#[from] pocketgen_introspect::SourceError),
    #[error(transparent)]
    Compile(#[from] pocketgen_core::Error),
    #[error(transparent)]
    Render(#[from] pocketgen_render::RenderError),
    #[error("json serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("logging error: {0}")]
    Logging(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type CliResult<T> = std::result::Result<T, CliError>;
