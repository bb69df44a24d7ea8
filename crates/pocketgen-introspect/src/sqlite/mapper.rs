//! Translation from the record store's catalog dialect to the canonical
//! declaration vocabulary.

use serde_json::{Map, Value};
use tracing::debug;

use pocketgen_core::{Cardinality, CollectionSchema};

use crate::error::{Result, SourceError};
use crate::options::IntrospectOptions;

use super::queries::RawCollection;

const ID_FIELD: &str = "id";

pub fn map_collections(
    raw: Vec<RawCollection>,
    opts: &IntrospectOptions,
) -> Result<Vec<CollectionSchema>> {
    raw.into_iter()
        .filter(|collection| opts.include_system_collections || !collection.system)
        .map(|collection| map_collection(collection, opts))
        .collect()
}

fn map_collection(raw: RawCollection, opts: &IntrospectOptions) -> Result<CollectionSchema> {
    let parsed: Value =
        serde_json::from_str(&raw.fields).map_err(|err| SourceError::InvalidCatalogRow {
            collection: raw.name.clone(),
            reason: format!("fields column is not valid JSON: {err}"),
        })?;

    let Value::Array(items) = parsed else {
        return Err(SourceError::InvalidCatalogRow {
            collection: raw.name,
            reason: "fields column is not a JSON array".to_string(),
        });
    };

    let fields = items
        .into_iter()
        .filter(|field| opts.include_id_field || !is_id_field(field))
        .map(map_field)
        .collect::<Vec<_>>();

    debug!(
        event = "catalog_collection_mapped",
        collection = %raw.name,
        kind = %raw.kind,
        fields = fields.len()
    );

    let mut schema = CollectionSchema::new(raw.name, fields);
    schema.id = Some(raw.id);
    Ok(schema)
}

fn is_id_field(field: &Value) -> bool {
    field.get("name").and_then(Value::as_str) == Some(ID_FIELD)
}

/// Store kind tag to canonical tag; unknown tags pass through unchanged.
pub fn canonical_kind(tag: &str) -> &str {
    match tag {
        "text" => "plainText",
        "editor" => "richText",
        "bool" => "boolean",
        "date" => "datetime",
        other => other,
    }
}

/// Single when at most one value may be selected.
pub fn mode_from_max_select(max_select: &Value) -> Option<Cardinality> {
    let max = max_select.as_f64()?;
    Some(if max <= 1.0 {
        Cardinality::Single
    } else {
        Cardinality::Multiple
    })
}

/// Rewrite one field declaration. Anything malformed is left for the core
/// parser to report.
pub fn map_field(raw: Value) -> Value {
    let Value::Object(mut field) = raw else {
        return raw;
    };

    let kind = match field.get("type").and_then(Value::as_str) {
        Some(tag) => canonical_kind(tag).to_string(),
        None => return Value::Object(field),
    };

    match kind.as_str() {
        "relation" => {
            rename(&mut field, "collectionId", "to");
            insert_mode(&mut field);
        }
        "select" => {
            rename(&mut field, "values", "options");
            insert_mode(&mut field);
        }
        "file" => insert_mode(&mut field),
        _ => {}
    }

    field.insert("type".to_string(), Value::String(kind));
    Value::Object(field)
}

fn rename(field: &mut Map<String, Value>, from: &str, to: &str) {
    if field.contains_key(to) {
        return;
    }
    if let Some(value) = field.remove(from) {
        field.insert(to.to_string(), value);
    }
}

fn insert_mode(field: &mut Map<String, Value>) {
    if field.contains_key("mode") {
        return;
    }
    let mode = field.get("maxSelect").and_then(mode_from_max_select);
    if let Some(mode) = mode {
        field.insert("mode".to_string(), Value::String(mode.as_str().to_string()));
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn raw(name: &str, system: bool, fields: Value) -> RawCollection {
        RawCollection {
            id: format!("pbc_{name}"),
            name: name.to_string(),
            kind: "base".to_string(),
            system,
            fields: fields.to_string(),
        }
    }

    #[test]
    fn maps_store_dialect_to_canonical_tags() {
        assert_eq!(canonical_kind("text"), "plainText");
        assert_eq!(canonical_kind("editor"), "richText");
        assert_eq!(canonical_kind("bool"), "boolean");
        assert_eq!(canonical_kind("date"), "datetime");
        assert_eq!(canonical_kind("geoPoint"), "geoPoint");
        assert_eq!(canonical_kind("mystery"), "mystery");
    }

    #[test]
    fn relation_gets_target_and_mode() {
        let mapped = map_field(json!({
            "name": "driver",
            "type": "relation",
            "collectionId": "pbc_drivers",
            "maxSelect": 1,
            "minSelect": 0,
            "required": true
        }));

        assert_eq!(mapped["to"], json!("pbc_drivers"));
        assert_eq!(mapped["mode"], json!("single"));
        assert_eq!(mapped["required"], json!(true));
        assert!(mapped.get("collectionId").is_none());
    }

    #[test]
    fn select_and_file_modes_follow_max_select() {
        let select = map_field(json!({
            "name": "tags",
            "type": "select",
            "values": ["a", "b"],
            "maxSelect": 2
        }));
        assert_eq!(select["options"], json!(["a", "b"]));
        assert_eq!(select["mode"], json!("multiple"));

        let file = map_field(json!({ "name": "avatar", "type": "file", "maxSelect": 0 }));
        assert_eq!(file["mode"], json!("single"));
    }

    #[test]
    fn missing_max_select_leaves_mode_out() {
        let mapped = map_field(json!({ "name": "avatar", "type": "file" }));
        assert!(mapped.get("mode").is_none());
    }

    #[test]
    fn filters_system_collections_and_id_field() {
        let fields = json!([
            { "name": "id", "type": "text", "required": true },
            { "name": "title", "type": "text" }
        ]);
        let rows = vec![raw("_superusers", true, json!([])), raw("posts", false, fields)];

        let mapped = map_collections(rows, &IntrospectOptions::default()).expect("map");
        assert_eq!(mapped.len(), 1);
        assert_eq!(mapped[0].name, "posts");
        assert_eq!(mapped[0].id.as_deref(), Some("pbc_posts"));
        assert_eq!(mapped[0].fields.len(), 1);
        assert_eq!(mapped[0].fields[0]["type"], json!("plainText"));
    }

    #[test]
    fn options_keep_system_collections_and_id_field() {
        let fields = json!([{ "name": "id", "type": "text" }]);
        let rows = vec![raw("_superusers", true, fields)];
        let opts = IntrospectOptions {
            include_system_collections: true,
            include_id_field: true,
        };

        let mapped = map_collections(rows, &opts).expect("map");
        assert_eq!(mapped.len(), 1);
        assert_eq!(mapped[0].fields.len(), 1);
    }

    #[test]
    fn rejects_fields_that_are_not_an_array() {
        let rows = vec![raw("posts", false, json!({ "title": "text" }))];
        let err = map_collections(rows, &IntrospectOptions::default()).unwrap_err();
        assert!(matches!(err, SourceError::InvalidCatalogRow { ref collection, .. } if collection == "posts"));
    }
}
