use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::codec::{Codec, PatchOp};
use crate::kind::FieldKind;
use crate::types::{Cardinality, TypeRef};

/// Output of one compilation run, one bundle per input collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CompiledSchema {
    pub collections: Vec<CollectionBundle>,
}

impl CompiledSchema {
    /// Find a bundle by collection name.
    pub fn collection(&self, name: &str) -> Option<&CollectionBundle> {
        self.collections.iter().find(|bundle| bundle.name == name)
    }

    /// Pretty JSON encoding; identical input yields identical text.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Generated declarations for a single collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CollectionBundle {
    /// Collection name as known by the remote store.
    pub name: String,
    /// Store-assigned collection id, when the source provides one.
    pub id: Option<String>,
    /// Generated record type name (from the singular name).
    pub type_name: String,
    /// Generated name for the plural form.
    pub plural_type_name: String,
    /// Fields of a fetched record, in declaration order.
    pub read: Vec<ReadField>,
    /// Fields accepted when creating a record.
    pub create: Vec<WriteField>,
    /// Fields accepted when updating a record, including patch companions.
    pub update: Vec<WriteField>,
    /// One entry per relation field.
    pub expand: Vec<ExpandEntry>,
}

impl CollectionBundle {
    pub fn read_field(&self, name: &str) -> Option<&ReadField> {
        self.read.iter().find(|field| field.name == name)
    }

    pub fn create_field(&self, name: &str) -> Option<&WriteField> {
        self.create.iter().find(|field| field.name == name)
    }

    pub fn update_field(&self, name: &str) -> Option<&WriteField> {
        self.update.iter().find(|field| field.name == name)
    }

    pub fn has_expand(&self) -> bool {
        !self.expand.is_empty()
    }
}

/// A field of the read shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ReadField {
    pub name: String,
    pub kind: FieldKind,
    /// Type once decoded.
    pub model_type: TypeRef,
    /// Type as sent by the remote store.
    pub wire_type: TypeRef,
    /// Wire → model rule; `None` means the value passes through.
    pub parse: Option<Codec>,
    /// Model → wire rule; `None` means the value passes through.
    pub serialize: Option<Codec>,
    pub doc: Option<String>,
}

/// A field of the create or update shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WriteField {
    /// In-memory property name.
    pub name: String,
    /// Key the remote store expects; differs from `name` for patch companions.
    pub wire_key: String,
    pub kind: FieldKind,
    pub model_type: TypeRef,
    pub wire_type: TypeRef,
    /// Whether the property may be omitted.
    pub optional: bool,
    pub serialize: Option<Codec>,
    pub doc: Option<String>,
}

impl WriteField {
    /// Patch operation when this is an append/prepend/remove companion.
    pub fn patch_op(&self) -> Option<PatchOp> {
        match self.serialize {
            Some(Codec::ArrayPatch { op }) => Some(op),
            _ => None,
        }
    }

    pub fn is_companion(&self) -> bool {
        self.patch_op().is_some()
    }
}

/// Expansion entry for a relation field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ExpandEntry {
    /// Relation field name.
    pub field: String,
    /// Name of the resolved target collection.
    pub target_collection: String,
    /// Generated record type name of the target.
    pub target_type_name: String,
    pub cardinality: Cardinality,
}
