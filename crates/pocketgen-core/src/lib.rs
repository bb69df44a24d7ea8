//! Field-type model and schema compiler for pocketgen.
//!
//! Turns a list of collections with raw field declarations into per-collection
//! bundles of read/create/update/expand shapes plus symbolic parse/serialize
//! rules. Performs no I/O; sources and renderers live in sibling crates.

pub mod bundle;
pub mod codec;
pub mod collection;
pub mod compiler;
pub mod error;
pub mod field;
pub mod kind;
pub mod options;
pub mod parser;
pub mod schema;
pub mod types;

pub use bundle::{CollectionBundle, CompiledSchema, ExpandEntry, ReadField, WriteField};
pub use codec::{Codec, CodecError, ModelValue, PatchOp, Sentinel};
pub use collection::{Collection, CollectionSchema, SchemaDocument};
pub use compiler::{compile, compile_with_options, parse_collections};
pub use error::{Error, ErrorKind, FieldError, Result};
pub use field::FieldModel;
pub use kind::{FieldKind, KindDescriptor, REGISTRY};
pub use options::{CompileOptions, EmptyListPolicy};
pub use parser::parse_field;
pub use schema::{bundle_json_schema, document_json_schema};
pub use types::{Cardinality, Flavor, TypeRef};
