use async_trait::async_trait;

use pocketgen_core::SchemaDocument;

use crate::error::Result;
use crate::options::IntrospectOptions;

/// Trait implemented by every schema source.
#[async_trait]
pub trait Adapter {
    /// Returns the source identifier (e.g. `sqlite`).
    fn source(&self) -> &'static str;

    /// Load the raw collections and their field declarations.
    async fn load(&self, opts: &IntrospectOptions) -> Result<SchemaDocument>;
}
