//! Template-facing view of a compiled schema.
//!
//! Every piece of TypeScript text is computed here so templates only lay
//! out declarations.

use serde::Serialize;

use pocketgen_core::{CollectionBundle, CompiledSchema, ExpandEntry, ReadField, WriteField};

use crate::typescript::{
    accessor, is_identifier, parse_expr, property_key, serialize_expr, string_literal, type_text,
};

const RECORD: &str = "record";

#[derive(Debug, Clone, Serialize)]
pub struct RenderContext {
    pub generator: &'static str,
    pub collections: Vec<CollectionView>,
}

impl RenderContext {
    pub fn from_schema(schema: &CompiledSchema) -> Self {
        Self {
            generator: "pocketgen",
            collections: schema.collections.iter().map(CollectionView::new).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CollectionView {
    pub name: String,
    /// Quoted collection name, used as an interface key.
    pub name_literal: String,
    pub type_name: String,
    pub plural_type_name: String,
    /// Whether the source declared `id` itself; otherwise the template adds it.
    pub has_id_field: bool,
    pub read: Vec<FieldView>,
    pub create: Vec<FieldView>,
    pub update: Vec<FieldView>,
    pub has_companions: bool,
    /// Destructuring bindings that pull companions out of an update payload.
    pub companion_bindings: Vec<String>,
    pub has_expand: bool,
    pub expand: Vec<ExpandView>,
    /// Union of property names accepted by `fields`.
    pub field_names: String,
}

impl CollectionView {
    fn new(bundle: &CollectionBundle) -> Self {
        let mut companion_bindings = Vec::new();
        let update = bundle
            .update
            .iter()
            .map(|field| {
                if field.is_companion() {
                    let local = companion_local(field, companion_bindings.len());
                    companion_bindings.push(binding(&field.name, &local));
                    FieldView::companion(field, &local)
                } else {
                    FieldView::write(field)
                }
            })
            .collect();

        let has_id_field = bundle.read_field("id").is_some();
        let field_names = (!has_id_field)
            .then_some("id")
            .into_iter()
            .chain(bundle.read.iter().map(|field| field.name.as_str()))
            .map(string_literal)
            .collect::<Vec<_>>()
            .join("|");

        Self {
            name: bundle.name.clone(),
            name_literal: string_literal(&bundle.name),
            type_name: bundle.type_name.clone(),
            plural_type_name: bundle.plural_type_name.clone(),
            has_id_field,
            read: bundle.read.iter().map(FieldView::read).collect(),
            create: bundle.create.iter().map(FieldView::write).collect(),
            update,
            has_companions: !companion_bindings.is_empty(),
            companion_bindings,
            has_expand: bundle.has_expand(),
            expand: bundle.expand.iter().map(ExpandView::new).collect(),
            field_names,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldView {
    pub name: String,
    /// Property key in the model type.
    pub key: String,
    /// Property key in the serialized type.
    pub wire_key: String,
    pub optional: bool,
    pub model_type: String,
    pub wire_type: String,
    /// Wire → model expression; absent when the value passes through.
    pub parser: Option<String>,
    /// Model → wire expression; absent when the spread already covers it.
    pub serializer: Option<String>,
    pub doc: Option<String>,
}

impl FieldView {
    fn read(field: &ReadField) -> Self {
        let value = accessor(RECORD, &field.name);
        let key = property_key(&field.name);
        Self {
            name: field.name.clone(),
            wire_key: key.clone(),
            key,
            optional: false,
            model_type: type_text(&field.model_type),
            wire_type: type_text(&field.wire_type),
            parser: field.parse.map(|codec| parse_expr(codec, &value)),
            serializer: field.serialize.map(|codec| serialize_expr(codec, &value)),
            doc: field.doc.clone(),
        }
    }

    fn write(field: &WriteField) -> Self {
        let value = accessor(RECORD, &field.name);
        Self {
            name: field.name.clone(),
            key: property_key(&field.name),
            wire_key: property_key(&field.wire_key),
            optional: field.optional,
            model_type: type_text(&field.model_type),
            wire_type: type_text(&field.wire_type),
            parser: None,
            serializer: field.serialize.map(|codec| serialize_expr(codec, &value)),
            doc: field.doc.clone(),
        }
    }

    fn companion(field: &WriteField, local: &str) -> Self {
        let serializer = field
            .serialize
            .map(|codec| serialize_expr(codec, local))
            .unwrap_or_else(|| local.to_string());
        Self {
            serializer: Some(serializer),
            ..Self::write(field)
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExpandView {
    pub key: String,
    /// Member access on the serialized `expand` object.
    pub value: String,
    pub target_type_name: String,
    pub multiple: bool,
}

impl ExpandView {
    fn new(entry: &ExpandEntry) -> Self {
        Self {
            key: property_key(&entry.field),
            value: accessor("expand", &entry.field),
            target_type_name: entry.target_type_name.clone(),
            multiple: entry.cardinality.is_multiple(),
        }
    }
}

fn companion_local(field: &WriteField, index: usize) -> String {
    if is_identifier(&field.name) {
        field.name.clone()
    } else {
        format!("patch{index}")
    }
}

fn binding(name: &str, local: &str) -> String {
    if name == local {
        local.to_string()
    } else {
        format!("{}: {local}", string_literal(name))
    }
}
