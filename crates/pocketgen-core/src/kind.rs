//! Field kind registry.
//!
//! The only place a `type` tag is turned into validation behavior. Adding a
//! kind means one [`FieldKind`] variant, one [`FieldModel`] variant and one
//! [`REGISTRY`] entry.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::FieldError;
use crate::field::FieldModel;
use crate::parser::{self, Declaration};

/// Closed set of supported field kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum FieldKind {
    #[serde(rename = "plainText")]
    PlainText,
    #[serde(rename = "richText")]
    RichText,
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "url")]
    Url,
    #[serde(rename = "number")]
    Number,
    #[serde(rename = "relation")]
    Relation,
    #[serde(rename = "datetime")]
    DateTime,
    #[serde(rename = "autodate")]
    AutoDateTime,
    #[serde(rename = "boolean")]
    Boolean,
    #[serde(rename = "json")]
    Json,
    #[serde(rename = "select")]
    Select,
    #[serde(rename = "file")]
    File,
    #[serde(rename = "geoPoint")]
    GeoPoint,
    #[serde(rename = "password")]
    Password,
}

impl FieldKind {
    /// Tag used in raw declarations.
    pub fn tag(self) -> &'static str {
        match self {
            Self::PlainText => "plainText",
            Self::RichText => "richText",
            Self::Email => "email",
            Self::Url => "url",
            Self::Number => "number",
            Self::Relation => "relation",
            Self::DateTime => "datetime",
            Self::AutoDateTime => "autodate",
            Self::Boolean => "boolean",
            Self::Json => "json",
            Self::Select => "select",
            Self::File => "file",
            Self::GeoPoint => "geoPoint",
            Self::Password => "password",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        lookup(tag).map(|descriptor| descriptor.kind)
    }
}

/// Registry entry: tag plus the validator/constructor for that kind.
pub struct KindDescriptor {
    pub kind: FieldKind,
    pub tag: &'static str,
    pub(crate) build: fn(&Declaration<'_>) -> Result<FieldModel, FieldError>,
}

impl std::fmt::Debug for KindDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KindDescriptor")
            .field("kind", &self.kind)
            .field("tag", &self.tag)
            .finish_non_exhaustive()
    }
}

const fn entry(
    kind: FieldKind,
    tag: &'static str,
    build: fn(&Declaration<'_>) -> Result<FieldModel, FieldError>,
) -> KindDescriptor {
    KindDescriptor { kind, tag, build }
}

pub static REGISTRY: [KindDescriptor; 14] = [
    entry(FieldKind::PlainText, "plainText", parser::build_plain_text),
    entry(FieldKind::RichText, "richText", parser::build_rich_text),
    entry(FieldKind::Email, "email", parser::build_email),
    entry(FieldKind::Url, "url", parser::build_url),
    entry(FieldKind::Number, "number", parser::build_number),
    entry(FieldKind::Relation, "relation", parser::build_relation),
    entry(FieldKind::DateTime, "datetime", parser::build_date_time),
    entry(FieldKind::AutoDateTime, "autodate", parser::build_auto_date_time),
    entry(FieldKind::Boolean, "boolean", parser::build_boolean),
    entry(FieldKind::Json, "json", parser::build_json),
    entry(FieldKind::Select, "select", parser::build_select),
    entry(FieldKind::File, "file", parser::build_file),
    entry(FieldKind::GeoPoint, "geoPoint", parser::build_geo_point),
    entry(FieldKind::Password, "password", parser::build_password),
];

/// Find the descriptor registered for `tag`.
pub fn lookup(tag: &str) -> Option<&'static KindDescriptor> {
    REGISTRY.iter().find(|descriptor| descriptor.tag == tag)
}
