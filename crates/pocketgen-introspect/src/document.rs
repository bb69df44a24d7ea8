use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::info;

use pocketgen_core::SchemaDocument;

use crate::adapter::Adapter;
use crate::error::{Result, SourceError};
use crate::options::IntrospectOptions;

/// Serialization of a schema document on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
}

impl DocumentFormat {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Parse document text in this format.
    pub fn parse(self, text: &str, path: &Path) -> Result<SchemaDocument> {
        match self {
            Self::Yaml => serde_yaml::from_str(text).map_err(|source| SourceError::Yaml {
                path: path.to_path_buf(),
                source,
            }),
            Self::Json => serde_json::from_str(text).map_err(|source| SourceError::Json {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

/// Schema source backed by a YAML or JSON file.
#[derive(Debug, Clone)]
pub struct DocumentAdapter {
    path: PathBuf,
    format: DocumentFormat,
}

impl DocumentAdapter {
    /// Create an adapter, detecting the format from the extension.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let format = DocumentFormat::from_path(&path)
            .ok_or_else(|| SourceError::UnsupportedSource(path.display().to_string()))?;
        Ok(Self { path, format })
    }

    pub fn format(&self) -> DocumentFormat {
        self.format
    }
}

#[async_trait]
impl Adapter for DocumentAdapter {
    fn source(&self) -> &'static str {
        "document"
    }

    async fn load(&self, _opts: &IntrospectOptions) -> Result<SchemaDocument> {
        load_document(&self.path, self.format)
    }
}

/// Read and parse a schema document from disk.
pub fn load_document(path: &Path, format: DocumentFormat) -> Result<SchemaDocument> {
    let text = fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let document = format.parse(&text, path)?;

    info!(
        event = "document_loaded",
        path = %path.display(),
        collections = document.collections.len()
    );

    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_format_from_extension() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("schema.yaml")),
            Some(DocumentFormat::Yaml)
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("schema.YML")),
            Some(DocumentFormat::Yaml)
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("schema.json")),
            Some(DocumentFormat::Json)
        );
        assert_eq!(DocumentFormat::from_path(Path::new("data.db")), None);
        assert_eq!(DocumentFormat::from_path(Path::new("schema")), None);
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        let err = DocumentAdapter::new("schema.toml").unwrap_err();
        assert!(matches!(err, SourceError::UnsupportedSource(_)));
    }
}
