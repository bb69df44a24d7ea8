use thiserror::Error;

/// Classification of every failure the core can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing/empty/non-string `name` or `type`, or a non-object declaration.
    MalformedDeclaration,
    /// `type` tag not present in the kind registry.
    UnknownKind,
    /// Kind-specific required property absent.
    MissingProperty,
    /// Property present with the wrong primitive type.
    WrongPropertyType,
    /// Value outside a closed set such as `mode`.
    InvalidEnumValue,
    /// Required non-empty string/array is empty or holds an empty string.
    EmptyValue,
    /// Relation target does not name any supplied collection.
    UnresolvedRelation,
    /// Field, collection or generated type name declared twice.
    DuplicateName,
}

/// Validation failure for a single raw field declaration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("invalid field: expected an object, got {actual}")]
    NotAnObject { actual: &'static str },
    #[error("missing field name")]
    MissingName,
    #[error("field name must be a string (is of type {actual})")]
    NameNotString { actual: &'static str },
    #[error("field name cannot be empty string")]
    EmptyName,
    #[error("field {field}: type is missing")]
    MissingKind { field: String },
    #[error("field {field}: type is a {actual}. Must be a non-empty string")]
    KindNotString { field: String, actual: &'static str },
    #[error("field {field}: type is an empty string. Must be a non-empty string")]
    EmptyKind { field: String },
    #[error("field {field}: unknown field kind \"{kind}\"")]
    UnknownKind { field: String, kind: String },
    #[error("{kind} field {field}: property \"{property}\" is missing")]
    MissingProperty {
        field: String,
        kind: &'static str,
        property: &'static str,
    },
    #[error("{kind} field {field}: property \"{property}\" is of type {actual}. Must be {expected}")]
    WrongPropertyType {
        field: String,
        kind: &'static str,
        property: &'static str,
        actual: &'static str,
        expected: &'static str,
    },
    #[error("{kind} field {field}: property \"{property}\" is empty string. Must be non-empty string")]
    EmptyString {
        field: String,
        kind: &'static str,
        property: &'static str,
    },
    #[error("{kind} field {field}: property \"{property}\" is \"{value}\". Must be one of {allowed:?}")]
    InvalidEnumValue {
        field: String,
        kind: &'static str,
        property: &'static str,
        value: String,
        allowed: &'static [&'static str],
    },
    #[error("{kind} field {field}: property \"{property}\" is empty array. Must be non-empty array of {element}")]
    EmptyArray {
        field: String,
        kind: &'static str,
        property: &'static str,
        element: &'static str,
    },
    #[error("{kind} field {field}: property \"{property}\" contains value {value} of type {actual}. All values must be {expected}")]
    WrongElementType {
        field: String,
        kind: &'static str,
        property: &'static str,
        value: String,
        actual: &'static str,
        expected: &'static str,
    },
    #[error("{kind} field {field}: property \"{property}\" contains value empty string. All values must be non-empty strings")]
    EmptyStringElement {
        field: String,
        kind: &'static str,
        property: &'static str,
    },
}

impl FieldError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotAnObject { .. }
            | Self::MissingName
            | Self::NameNotString { .. }
            | Self::EmptyName
            | Self::MissingKind { .. }
            | Self::KindNotString { .. }
            | Self::EmptyKind { .. } => ErrorKind::MalformedDeclaration,
            Self::UnknownKind { .. } => ErrorKind::UnknownKind,
            Self::MissingProperty { .. } => ErrorKind::MissingProperty,
            Self::WrongPropertyType { .. } | Self::WrongElementType { .. } => {
                ErrorKind::WrongPropertyType
            }
            Self::InvalidEnumValue { .. } => ErrorKind::InvalidEnumValue,
            Self::EmptyString { .. } | Self::EmptyArray { .. } | Self::EmptyStringElement { .. } => {
                ErrorKind::EmptyValue
            }
        }
    }

    /// Name of the offending field when the declaration carried a usable one.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::NotAnObject { .. }
            | Self::MissingName
            | Self::NameNotString { .. }
            | Self::EmptyName => None,
            Self::MissingKind { field }
            | Self::KindNotString { field, .. }
            | Self::EmptyKind { field }
            | Self::UnknownKind { field, .. }
            | Self::MissingProperty { field, .. }
            | Self::WrongPropertyType { field, .. }
            | Self::EmptyString { field, .. }
            | Self::InvalidEnumValue { field, .. }
            | Self::EmptyArray { field, .. }
            | Self::WrongElementType { field, .. }
            | Self::EmptyStringElement { field, .. } => Some(field.as_str()),
        }
    }

    /// Name of the offending kind-specific property, if any.
    pub fn property(&self) -> Option<&'static str> {
        match self {
            Self::MissingProperty { property, .. }
            | Self::WrongPropertyType { property, .. }
            | Self::EmptyString { property, .. }
            | Self::InvalidEnumValue { property, .. }
            | Self::EmptyArray { property, .. }
            | Self::WrongElementType { property, .. }
            | Self::EmptyStringElement { property, .. } => Some(*property),
            _ => None,
        }
    }
}

/// Compilation error; aborts the whole run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("collection {collection}: failed to parse field #{position}: {source}")]
    Field {
        collection: String,
        position: usize,
        #[source]
        source: FieldError,
    },
    #[error("collection {collection}: duplicate field name \"{field}\"")]
    DuplicateField { collection: String, field: String },
    #[error("collection #{position}: name cannot be empty string")]
    EmptyCollectionName { position: usize },
    #[error("duplicate collection name \"{collection}\"")]
    DuplicateCollection { collection: String },
    #[error("collection {collection}: duplicate collection id \"{id}\"")]
    DuplicateCollectionId { collection: String, id: String },
    #[error(
        "collection {collection}: relation field {field} references non-existent collection \"{target}\""
    )]
    UnresolvedRelation {
        collection: String,
        field: String,
        target: String,
    },
    #[error("collection {collection}: generated type name \"{type_name}\" is not a valid identifier")]
    InvalidTypeName {
        collection: String,
        type_name: String,
    },
    #[error(
        "collection {collection}: generated type name \"{type_name}\" is already used by collection {other}"
    )]
    DuplicateTypeName {
        collection: String,
        other: String,
        type_name: String,
    },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Field { source, .. } => source.kind(),
            Self::DuplicateField { .. }
            | Self::DuplicateCollection { .. }
            | Self::DuplicateCollectionId { .. }
            | Self::DuplicateTypeName { .. } => ErrorKind::DuplicateName,
            Self::EmptyCollectionName { .. } | Self::InvalidTypeName { .. } => {
                ErrorKind::MalformedDeclaration
            }
            Self::UnresolvedRelation { .. } => ErrorKind::UnresolvedRelation,
        }
    }

    /// Collection the error is attributed to, when known.
    pub fn collection(&self) -> Option<&str> {
        match self {
            Self::Field { collection, .. }
            | Self::DuplicateField { collection, .. }
            | Self::DuplicateCollection { collection }
            | Self::DuplicateCollectionId { collection, .. }
            | Self::UnresolvedRelation { collection, .. }
            | Self::InvalidTypeName { collection, .. }
            | Self::DuplicateTypeName { collection, .. } => Some(collection.as_str()),
            Self::EmptyCollectionName { .. } => None,
        }
    }
}

/// Convenience alias for compiler results.
pub type Result<T> = std::result::Result<T, Error>;
