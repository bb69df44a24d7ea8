use std::collections::BTreeSet;

use convert_case::{Case, Casing};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::field::FieldModel;
use crate::parser::parse_field;

/// Raw schema as handed over by a schema source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SchemaDocument {
    pub collections: Vec<CollectionSchema>,
}

/// One collection before its fields are validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CollectionSchema {
    /// Store-assigned id; relation targets may refer to it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    /// Name used for a single record, defaults to `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub singular: Option<String>,
    /// Name used for many records, defaults to `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plural: Option<String>,
    /// Raw field declarations in declaration order.
    #[serde(default, alias = "properties")]
    pub fields: Vec<Value>,
}

impl CollectionSchema {
    pub fn new(name: impl Into<String>, fields: Vec<Value>) -> Self {
        Self {
            id: None,
            name: name.into(),
            singular: None,
            plural: None,
            fields,
        }
    }
}

/// A collection whose fields have all been validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    pub id: Option<String>,
    pub name: String,
    pub singular: Option<String>,
    pub plural: Option<String>,
    pub fields: Vec<FieldModel>,
}

impl Collection {
    /// Validate every field of `schema`, stopping at the first failure.
    ///
    /// Relation targets are left unresolved; that needs the full set of
    /// collections.
    pub fn parse(position: usize, schema: &CollectionSchema) -> Result<Self> {
        if schema.name.is_empty() {
            return Err(Error::EmptyCollectionName { position });
        }

        let mut seen = BTreeSet::new();
        let mut fields = Vec::with_capacity(schema.fields.len());

        for (index, raw) in schema.fields.iter().enumerate() {
            let field = parse_field(raw).map_err(|source| Error::Field {
                collection: schema.name.clone(),
                position: index,
                source,
            })?;

            if !seen.insert(field.name().to_string()) {
                return Err(Error::DuplicateField {
                    collection: schema.name.clone(),
                    field: field.name().to_string(),
                });
            }

            fields.push(field);
        }

        let mut companions = BTreeSet::new();
        for name in fields.iter().flat_map(FieldModel::companion_names) {
            if seen.contains(&name) || !companions.insert(name.clone()) {
                return Err(Error::DuplicateField {
                    collection: schema.name.clone(),
                    field: name,
                });
            }
        }

        Ok(Self {
            id: schema.id.clone(),
            name: schema.name.clone(),
            singular: schema.singular.clone(),
            plural: schema.plural.clone(),
            fields,
        })
    }

    pub fn singular(&self) -> &str {
        self.singular.as_deref().unwrap_or(&self.name)
    }

    pub fn plural(&self) -> &str {
        self.plural.as_deref().unwrap_or(&self.name)
    }

    /// Generated record type name.
    pub fn type_name(&self) -> String {
        self.singular().to_case(Case::Pascal)
    }

    pub fn plural_type_name(&self) -> String {
        self.plural().to_case(Case::Pascal)
    }
}
