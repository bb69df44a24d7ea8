use std::path::Path;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::info;

use pocketgen_core::SchemaDocument;

use crate::adapter::Adapter;
use crate::error::Result;
use crate::options::IntrospectOptions;

pub mod mapper;
mod queries;

/// Adapter for the record store's SQLite data file.
#[derive(Debug, Clone)]
pub struct SqliteCatalogAdapter {
    pool: SqlitePool,
}

impl SqliteCatalogAdapter {
    /// Create a new adapter using a pre-configured pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open an existing data file read-only.
    pub async fn connect(path: &Path) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            .create_if_missing(false);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        Ok(Self::new(pool))
    }
}

#[async_trait::async_trait]
impl Adapter for SqliteCatalogAdapter {
    fn source(&self) -> &'static str {
        "sqlite"
    }

    async fn load(&self, opts: &IntrospectOptions) -> Result<SchemaDocument> {
        introspect(&self.pool, opts).await
    }
}

/// Read the catalog with default options.
pub async fn introspect_sqlite(pool: &SqlitePool) -> Result<SchemaDocument> {
    introspect_sqlite_with_options(pool, IntrospectOptions::default()).await
}

/// Read the catalog with caller-provided options.
pub async fn introspect_sqlite_with_options(
    pool: &SqlitePool,
    opts: IntrospectOptions,
) -> Result<SchemaDocument> {
    introspect(pool, &opts).await
}

async fn introspect(pool: &SqlitePool, opts: &IntrospectOptions) -> Result<SchemaDocument> {
    let raw = queries::list_collections(pool).await?;
    let total = raw.len();
    let collections = mapper::map_collections(raw, opts)?;

    info!(
        event = "catalog_loaded",
        collections = collections.len(),
        skipped = total - collections.len()
    );

    Ok(SchemaDocument { collections })
}
