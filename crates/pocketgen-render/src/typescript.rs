//! TypeScript text for symbolic types and codecs.

use pocketgen_core::{Codec, Flavor, Sentinel, TypeRef};

/// TypeScript type expression for `ty`.
pub fn type_text(ty: &TypeRef) -> String {
    match ty {
        TypeRef::String | TypeRef::FileRef => "string".to_string(),
        TypeRef::Number => "number".to_string(),
        TypeRef::Boolean => "boolean".to_string(),
        TypeRef::Unknown => "unknown".to_string(),
        TypeRef::Temporal => "Date".to_string(),
        TypeRef::Flavored { flavor } => flavor_type(*flavor).to_string(),
        TypeRef::RecordId => "RecordId".to_string(),
        TypeRef::Binary => "File".to_string(),
        TypeRef::GeoPoint => "GeoPoint".to_string(),
        TypeRef::Literals { values } => values
            .iter()
            .map(|value| string_literal(value))
            .collect::<Vec<_>>()
            .join("|"),
        TypeRef::List { item } => {
            let inner = type_text(item);
            if inner.contains('|') {
                format!("Array<{inner}>")
            } else {
                format!("{inner}[]")
            }
        }
        TypeRef::Nullable { inner } => format!("{}|null", type_text(inner)),
        TypeRef::Clearable { inner } => {
            let empty = if inner.is_list() { "[]" } else { "\"\"" };
            format!("{}|undefined|{empty}", type_text(inner))
        }
    }
}

/// Name of the helper type declared for a flavor.
pub fn flavor_type(flavor: Flavor) -> &'static str {
    match flavor {
        Flavor::Email => "Email",
        Flavor::Url => "Url",
        Flavor::RichText => "RichText",
    }
}

/// Wire → model expression applied to `value`.
pub fn parse_expr(codec: Codec, value: &str) -> String {
    match codec {
        Codec::Temporal => format!("parseISO({value})"),
        Codec::NullableTemporal => format!("{value} === \"\" ? null : parseISO({value})"),
        Codec::EmptyAsNull {
            sentinel: Sentinel::EmptyString,
        } => format!("{value} === \"\" ? null : {value}"),
        Codec::EmptyAsNull {
            sentinel: Sentinel::EmptyList,
        } => format!("{value}.length === 0 ? null : {value}"),
        Codec::ArrayPatch { .. } => value.to_string(),
    }
}

/// Model → wire expression applied to `value`.
pub fn serialize_expr(codec: Codec, value: &str) -> String {
    match codec {
        Codec::Temporal => format!("formatISO({value})"),
        Codec::NullableTemporal => format!("{value} ? formatISO({value}) : \"\""),
        Codec::EmptyAsNull {
            sentinel: Sentinel::EmptyString,
        } => format!("{value} ?? \"\""),
        Codec::EmptyAsNull {
            sentinel: Sentinel::EmptyList,
        } => format!("{value} ?? []"),
        Codec::ArrayPatch { .. } => value.to_string(),
    }
}

pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Object property key, quoted when `name` is not an identifier.
pub fn property_key(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        string_literal(name)
    }
}

/// Member access on `object`.
pub fn accessor(object: &str, name: &str) -> String {
    if is_identifier(name) {
        format!("{object}.{name}")
    } else {
        format!("{object}[{}]", string_literal(name))
    }
}

/// Double-quoted string literal.
pub fn string_literal(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}
