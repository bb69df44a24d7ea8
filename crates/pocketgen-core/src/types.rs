use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Whether a field holds one value or a sequence of values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    Single,
    Multiple,
}

impl Cardinality {
    /// Accepted spellings of the `mode` property.
    pub const VALUES: &'static [&'static str] = &["single", "multiple"];

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "single" => Some(Self::Single),
            "multiple" => Some(Self::Multiple),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Multiple => "multiple",
        }
    }

    pub fn is_multiple(self) -> bool {
        matches!(self, Self::Multiple)
    }

    /// Wrap `item` in a list when the cardinality is multiple.
    pub fn apply(self, item: TypeRef) -> TypeRef {
        match self {
            Self::Single => item,
            Self::Multiple => TypeRef::list(item),
        }
    }
}

/// Semantic marker attached to a string without changing its representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Flavor {
    Email,
    Url,
    RichText,
}

impl Flavor {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Url => "url",
            Self::RichText => "rich_text",
        }
    }
}

/// Target-language independent description of a field's value type.
///
/// Renderers map each variant onto concrete source text; nothing in the core
/// depends on a particular output language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeRef {
    String,
    Number,
    Boolean,
    /// Arbitrary JSON.
    Unknown,
    /// A point in time.
    Temporal,
    Flavored {
        flavor: Flavor,
    },
    /// Identifier of a related record.
    RecordId,
    /// Name of a file already stored by the remote store.
    FileRef,
    /// Raw file payload sent on create/update.
    Binary,
    /// `{ lat, lon }` coordinate pair.
    GeoPoint,
    /// One of a fixed set of string literals.
    Literals {
        values: Vec<String>,
    },
    List {
        item: Box<TypeRef>,
    },
    Nullable {
        inner: Box<TypeRef>,
    },
    /// The inner value, absent, or the wire empty sentinel of its shape.
    Clearable {
        inner: Box<TypeRef>,
    },
}

impl TypeRef {
    pub fn list(item: TypeRef) -> Self {
        Self::List {
            item: Box::new(item),
        }
    }

    pub fn nullable(inner: TypeRef) -> Self {
        Self::Nullable {
            inner: Box::new(inner),
        }
    }

    pub fn clearable(inner: TypeRef) -> Self {
        Self::Clearable {
            inner: Box::new(inner),
        }
    }

    pub fn flavored(flavor: Flavor) -> Self {
        Self::Flavored { flavor }
    }

    pub fn literals(values: &[String]) -> Self {
        Self::Literals {
            values: values.to_vec(),
        }
    }

    /// Nullable wrapper applied only when `nullable` is set.
    pub fn nullable_if(self, nullable: bool) -> Self {
        if nullable { Self::nullable(self) } else { self }
    }

    /// True when the type admits the null value.
    pub fn is_nullable(&self) -> bool {
        matches!(self, Self::Nullable { .. })
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::List { .. })
    }
}
