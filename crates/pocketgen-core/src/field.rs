//! Validated field models and their shape derivations.
//!
//! Every derivation is an exhaustive match over [`FieldModel`], so a new kind
//! cannot be added without deciding each of its shapes.

use crate::bundle::{ReadField, WriteField};
use crate::codec::{Codec, PatchOp, Sentinel};
use crate::kind::FieldKind;
use crate::options::{CompileOptions, EmptyListPolicy};
use crate::types::{Cardinality, Flavor, TypeRef};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextField {
    pub name: String,
    pub required: bool,
}

/// Shared by rich text, email and url.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlavoredTextField {
    pub name: String,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberField {
    pub name: String,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationField {
    pub name: String,
    /// Target collection id or name; resolved by the compiler.
    pub target: String,
    pub cardinality: Cardinality,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeField {
    pub name: String,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectField {
    pub name: String,
    pub options: Vec<String>,
    pub cardinality: Cardinality,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileField {
    pub name: String,
    pub cardinality: Cardinality,
    pub required: bool,
}

/// Kinds without attributes beyond their name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainField {
    pub name: String,
}

/// A parsed field declaration, one variant per kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldModel {
    PlainText(TextField),
    RichText(FlavoredTextField),
    Email(FlavoredTextField),
    Url(FlavoredTextField),
    Number(NumberField),
    Relation(RelationField),
    DateTime(DateTimeField),
    AutoDateTime(PlainField),
    Boolean(PlainField),
    Json(PlainField),
    Select(SelectField),
    File(FileField),
    GeoPoint(PlainField),
    Password(PlainField),
}

impl FieldModel {
    pub fn name(&self) -> &str {
        match self {
            Self::PlainText(field) => &field.name,
            Self::RichText(field) | Self::Email(field) | Self::Url(field) => &field.name,
            Self::Number(field) => &field.name,
            Self::Relation(field) => &field.name,
            Self::DateTime(field) => &field.name,
            Self::Select(field) => &field.name,
            Self::File(field) => &field.name,
            Self::AutoDateTime(field)
            | Self::Boolean(field)
            | Self::Json(field)
            | Self::GeoPoint(field)
            | Self::Password(field) => &field.name,
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Self::PlainText(_) => FieldKind::PlainText,
            Self::RichText(_) => FieldKind::RichText,
            Self::Email(_) => FieldKind::Email,
            Self::Url(_) => FieldKind::Url,
            Self::Number(_) => FieldKind::Number,
            Self::Relation(_) => FieldKind::Relation,
            Self::DateTime(_) => FieldKind::DateTime,
            Self::AutoDateTime(_) => FieldKind::AutoDateTime,
            Self::Boolean(_) => FieldKind::Boolean,
            Self::Json(_) => FieldKind::Json,
            Self::Select(_) => FieldKind::Select,
            Self::File(_) => FieldKind::File,
            Self::GeoPoint(_) => FieldKind::GeoPoint,
            Self::Password(_) => FieldKind::Password,
        }
    }

    pub fn cardinality(&self) -> Option<Cardinality> {
        match self {
            Self::Relation(field) => Some(field.cardinality),
            Self::Select(field) => Some(field.cardinality),
            Self::File(field) => Some(field.cardinality),
            _ => None,
        }
    }

    /// Update-shape names this field adds next to its own: model names and
    /// wire keys of the multi-valued file companions.
    pub fn companion_names(&self) -> Vec<String> {
        match self {
            Self::File(field) if field.cardinality.is_multiple() => PatchOp::ALL
                .into_iter()
                .flat_map(|op| [op.model_name(&field.name), op.wire_key(&field.name)])
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn as_relation(&self) -> Option<&RelationField> {
        match self {
            Self::Relation(field) => Some(field),
            _ => None,
        }
    }

    fn flavor(&self) -> Option<Flavor> {
        match self {
            Self::RichText(_) => Some(Flavor::RichText),
            Self::Email(_) => Some(Flavor::Email),
            Self::Url(_) => Some(Flavor::Url),
            _ => None,
        }
    }

    /// Decoded type of a fetched value; `None` keeps the field out of the
    /// read shape.
    pub fn read_type(&self, options: &CompileOptions) -> Option<TypeRef> {
        let ty = match self {
            Self::PlainText(_) => TypeRef::String,
            Self::RichText(field) | Self::Email(field) | Self::Url(field) => {
                let flavor = self.flavor()?;
                TypeRef::flavored(flavor).nullable_if(!field.required)
            }
            Self::Number(_) => TypeRef::Number,
            Self::Relation(field) => match field.cardinality {
                Cardinality::Single => TypeRef::RecordId.nullable_if(!field.required),
                Cardinality::Multiple => TypeRef::list(TypeRef::RecordId)
                    .nullable_if(!field.required && nulls_empty_lists(options)),
            },
            Self::DateTime(field) => TypeRef::Temporal.nullable_if(!field.required),
            Self::AutoDateTime(_) => TypeRef::Temporal,
            Self::Boolean(_) => TypeRef::Boolean,
            Self::Json(_) => TypeRef::Unknown,
            Self::Select(field) => field.cardinality.apply(TypeRef::literals(&field.options)),
            Self::File(field) => field.cardinality.apply(TypeRef::FileRef),
            Self::GeoPoint(_) => TypeRef::GeoPoint,
            Self::Password(_) => return None,
        };
        Some(ty)
    }

    /// Type as exchanged with the remote store.
    pub fn wire_type(&self) -> TypeRef {
        match self {
            Self::PlainText(_)
            | Self::RichText(_)
            | Self::Email(_)
            | Self::Url(_)
            | Self::Password(_)
            | Self::DateTime(_)
            | Self::AutoDateTime(_) => TypeRef::String,
            Self::Number(_) => TypeRef::Number,
            Self::Relation(field) => field.cardinality.apply(TypeRef::String),
            Self::Boolean(_) => TypeRef::Boolean,
            Self::Json(_) => TypeRef::Unknown,
            Self::Select(field) => field.cardinality.apply(TypeRef::literals(&field.options)),
            Self::File(field) => field.cardinality.apply(TypeRef::FileRef),
            Self::GeoPoint(_) => TypeRef::GeoPoint,
        }
    }

    /// Rule linking the wire and model representations, if they differ.
    pub fn codec(&self, options: &CompileOptions) -> Option<Codec> {
        const EMPTY_STRING: Codec = Codec::EmptyAsNull {
            sentinel: Sentinel::EmptyString,
        };

        match self {
            Self::RichText(field) | Self::Email(field) | Self::Url(field) => {
                (!field.required).then_some(EMPTY_STRING)
            }
            Self::Relation(field) if field.required => None,
            Self::Relation(field) => match field.cardinality {
                Cardinality::Single => Some(EMPTY_STRING),
                Cardinality::Multiple => nulls_empty_lists(options).then_some(Codec::EmptyAsNull {
                    sentinel: Sentinel::EmptyList,
                }),
            },
            Self::DateTime(field) if field.required => Some(Codec::Temporal),
            Self::DateTime(_) => Some(Codec::NullableTemporal),
            Self::AutoDateTime(_) => Some(Codec::Temporal),
            Self::PlainText(_)
            | Self::Number(_)
            | Self::Boolean(_)
            | Self::Json(_)
            | Self::Select(_)
            | Self::File(_)
            | Self::GeoPoint(_)
            | Self::Password(_) => None,
        }
    }

    pub fn doc(&self) -> Option<String> {
        match self {
            Self::PlainText(field) if field.required => Some("Must not be empty string.".to_string()),
            Self::Number(field) if field.required => Some("Must be nonzero.".to_string()),
            _ => None,
        }
    }

    pub fn read_field(&self, options: &CompileOptions) -> Option<ReadField> {
        let model_type = self.read_type(options)?;
        let codec = self.codec(options);

        Some(ReadField {
            name: self.name().to_string(),
            kind: self.kind(),
            model_type,
            wire_type: self.wire_type(),
            parse: codec,
            serialize: codec,
            doc: self.doc(),
        })
    }

    /// Create-shape entry; `None` for server-assigned fields.
    pub fn create_field(&self, options: &CompileOptions) -> Option<WriteField> {
        match self {
            Self::AutoDateTime(_) => None,
            Self::File(field) => {
                let binary = field.cardinality.apply(TypeRef::Binary);
                Some(self.write_field(binary.clone(), binary, !field.required, None))
            }
            Self::Password(_) => {
                Some(self.write_field(TypeRef::String, TypeRef::String, false, None))
            }
            _ => {
                let model_type = self.read_type(options)?;
                Some(self.write_field(model_type, self.wire_type(), false, self.codec(options)))
            }
        }
    }

    /// Update-shape entries: the base field plus, for multi-valued files,
    /// the append/prepend/remove companions.
    pub fn update_fields(&self, options: &CompileOptions) -> Vec<WriteField> {
        match self {
            Self::AutoDateTime(_) => Vec::new(),
            Self::File(field) => {
                let clearable = TypeRef::clearable(field.cardinality.apply(TypeRef::Binary));
                let mut fields = vec![self.write_field(clearable.clone(), clearable, true, None)];

                if field.cardinality.is_multiple() {
                    fields.extend(PatchOp::ALL.into_iter().map(|op| file_companion(field, op)));
                }
                fields
            }
            _ => self.create_field(options).into_iter().collect(),
        }
    }

    fn write_field(
        &self,
        model_type: TypeRef,
        wire_type: TypeRef,
        optional: bool,
        serialize: Option<Codec>,
    ) -> WriteField {
        WriteField {
            name: self.name().to_string(),
            wire_key: self.name().to_string(),
            kind: self.kind(),
            model_type,
            wire_type,
            optional,
            serialize,
            doc: self.doc(),
        }
    }
}

fn nulls_empty_lists(options: &CompileOptions) -> bool {
    options.empty_list == EmptyListPolicy::Null
}

fn file_companion(field: &FileField, op: PatchOp) -> WriteField {
    let item = match op {
        PatchOp::Append | PatchOp::Prepend => TypeRef::Binary,
        PatchOp::Remove => TypeRef::FileRef,
    };
    let ty = TypeRef::list(item);

    WriteField {
        name: op.model_name(&field.name),
        wire_key: op.wire_key(&field.name),
        kind: FieldKind::File,
        model_type: ty.clone(),
        wire_type: ty,
        optional: true,
        serialize: Some(Codec::ArrayPatch { op }),
        doc: None,
    }
}
