//! Schema compiler: raw collections in, generated declaration bundles out.
//!
//! Two phases. Phase one validates each collection on its own. Phase two
//! indexes every collection and resolves relation targets, which may point
//! forward, backward or at the owning collection itself.

use std::collections::BTreeMap;

use tracing::debug;

use crate::bundle::{CollectionBundle, CompiledSchema, ExpandEntry};
use crate::collection::{Collection, SchemaDocument};
use crate::error::{Error, Result};
use crate::options::CompileOptions;

/// Compile with default options.
pub fn compile(document: &SchemaDocument) -> Result<CompiledSchema> {
    compile_with_options(document, &CompileOptions::default())
}

/// Compile every collection; any error aborts the whole run.
pub fn compile_with_options(
    document: &SchemaDocument,
    options: &CompileOptions,
) -> Result<CompiledSchema> {
    let collections = parse_collections(document)?;
    let index = CollectionIndex::build(&collections)?;

    let bundles = collections
        .iter()
        .map(|collection| assemble(collection, &index, options))
        .collect::<Result<Vec<_>>>()?;

    debug!(
        event = "schema_compiled",
        collections = bundles.len(),
        "compiled schema"
    );

    Ok(CompiledSchema {
        collections: bundles,
    })
}

/// Phase one: validate all fields of all collections.
pub fn parse_collections(document: &SchemaDocument) -> Result<Vec<Collection>> {
    document
        .collections
        .iter()
        .enumerate()
        .map(|(position, schema)| {
            let collection = Collection::parse(position, schema)?;
            debug!(
                event = "collection_parsed",
                collection = %collection.name,
                fields = collection.fields.len()
            );
            Ok(collection)
        })
        .collect()
}

/// Lookup of collections by id and by name.
struct CollectionIndex<'a> {
    by_id: BTreeMap<&'a str, &'a Collection>,
    by_name: BTreeMap<&'a str, &'a Collection>,
}

impl<'a> CollectionIndex<'a> {
    fn build(collections: &'a [Collection]) -> Result<Self> {
        let mut by_id = BTreeMap::new();
        let mut by_name = BTreeMap::new();
        let mut type_names = BTreeMap::new();
        let mut plural_type_names = BTreeMap::new();

        for collection in collections {
            if by_name
                .insert(collection.name.as_str(), collection)
                .is_some()
            {
                return Err(Error::DuplicateCollection {
                    collection: collection.name.clone(),
                });
            }

            if let Some(id) = collection.id.as_deref() {
                if by_id.insert(id, collection).is_some() {
                    return Err(Error::DuplicateCollectionId {
                        collection: collection.name.clone(),
                        id: id.to_string(),
                    });
                }
            }

            claim_type_name(&mut type_names, collection, collection.type_name())?;
            claim_type_name(&mut plural_type_names, collection, collection.plural_type_name())?;
        }

        Ok(Self { by_id, by_name })
    }

    /// Ids take precedence over names.
    fn resolve(&self, target: &str) -> Option<&'a Collection> {
        self.by_id
            .get(target)
            .or_else(|| self.by_name.get(target))
            .copied()
    }
}

/// Generated names must be usable as identifiers and distinct across
/// collections, otherwise the rendered declarations would not compile.
fn claim_type_name(
    taken: &mut BTreeMap<String, String>,
    collection: &Collection,
    type_name: String,
) -> Result<()> {
    if !is_type_identifier(&type_name) {
        return Err(Error::InvalidTypeName {
            collection: collection.name.clone(),
            type_name,
        });
    }

    if let Some(other) = taken.get(&type_name) {
        return Err(Error::DuplicateTypeName {
            collection: collection.name.clone(),
            other: other.clone(),
            type_name,
        });
    }

    taken.insert(type_name, collection.name.clone());
    Ok(())
}

fn is_type_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Phase two for one collection: resolve relations and derive every shape.
fn assemble(
    collection: &Collection,
    index: &CollectionIndex<'_>,
    options: &CompileOptions,
) -> Result<CollectionBundle> {
    let mut read = Vec::new();
    let mut create = Vec::new();
    let mut update = Vec::new();
    let mut expand = Vec::new();

    for field in &collection.fields {
        if let Some(relation) = field.as_relation() {
            let target = index.resolve(&relation.target).ok_or_else(|| {
                Error::UnresolvedRelation {
                    collection: collection.name.clone(),
                    field: relation.name.clone(),
                    target: relation.target.clone(),
                }
            })?;

            expand.push(ExpandEntry {
                field: relation.name.clone(),
                target_collection: target.name.clone(),
                target_type_name: target.type_name(),
                cardinality: relation.cardinality,
            });
        }

        read.extend(field.read_field(options));
        create.extend(field.create_field(options));
        update.extend(field.update_fields(options));
    }

    debug!(
        event = "collection_assembled",
        collection = %collection.name,
        read = read.len(),
        create = create.len(),
        update = update.len(),
        expand = expand.len()
    );

    Ok(CollectionBundle {
        name: collection.name.clone(),
        id: collection.id.clone(),
        type_name: collection.type_name(),
        plural_type_name: collection.plural_type_name(),
        read,
        create,
        update,
        expand,
    })
}
