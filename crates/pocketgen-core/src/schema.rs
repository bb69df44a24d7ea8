use schemars::schema::RootSchema;
use schemars::schema_for;

use crate::bundle::CompiledSchema;
use crate::collection::SchemaDocument;

/// JSON Schema describing the compiler output.
pub fn bundle_json_schema() -> RootSchema {
    schema_for!(CompiledSchema)
}

/// JSON Schema describing the raw schema document accepted as input.
pub fn document_json_schema() -> RootSchema {
    schema_for!(SchemaDocument)
}
