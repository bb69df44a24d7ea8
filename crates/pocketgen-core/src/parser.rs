//! Validation of raw field declarations into [`FieldModel`]s.

use serde_json::{Map, Value};

use crate::error::FieldError;
use crate::field::{
    DateTimeField, FieldModel, FileField, FlavoredTextField, NumberField, PlainField,
    RelationField, SelectField, TextField,
};
use crate::kind::{self, FieldKind};
use crate::types::Cardinality;

/// Parse one raw declaration into a validated field model.
///
/// Checks `name`, then `type`, then the kind-specific properties. Nothing is
/// coerced: a value of the wrong shape is always an error.
pub fn parse_field(raw: &Value) -> Result<FieldModel, FieldError> {
    let Value::Object(map) = raw else {
        return Err(FieldError::NotAnObject {
            actual: json_type(raw),
        });
    };

    let name = match map.get("name") {
        None => return Err(FieldError::MissingName),
        Some(Value::String(name)) => name.as_str(),
        Some(other) => {
            return Err(FieldError::NameNotString {
                actual: json_type(other),
            });
        }
    };
    if name.is_empty() {
        return Err(FieldError::EmptyName);
    }

    let tag = match map.get("type") {
        None => {
            return Err(FieldError::MissingKind {
                field: name.to_string(),
            });
        }
        Some(Value::String(tag)) => tag.as_str(),
        Some(other) => {
            return Err(FieldError::KindNotString {
                field: name.to_string(),
                actual: json_type(other),
            });
        }
    };
    if tag.is_empty() {
        return Err(FieldError::EmptyKind {
            field: name.to_string(),
        });
    }

    let descriptor = kind::lookup(tag).ok_or_else(|| FieldError::UnknownKind {
        field: name.to_string(),
        kind: tag.to_string(),
    })?;

    let declaration = Declaration {
        name,
        kind: descriptor.kind,
        properties: map,
    };
    (descriptor.build)(&declaration)
}

/// JSON type name used in error messages.
pub fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A declaration whose `name` and `type` are already known to be valid.
pub(crate) struct Declaration<'a> {
    name: &'a str,
    kind: FieldKind,
    properties: &'a Map<String, Value>,
}

impl<'a> Declaration<'a> {
    fn name(&self) -> String {
        self.name.to_string()
    }

    fn missing(&self, property: &'static str) -> FieldError {
        FieldError::MissingProperty {
            field: self.name(),
            kind: self.kind.tag(),
            property,
        }
    }

    fn wrong_type(
        &self,
        property: &'static str,
        value: &Value,
        expected: &'static str,
    ) -> FieldError {
        FieldError::WrongPropertyType {
            field: self.name(),
            kind: self.kind.tag(),
            property,
            actual: json_type(value),
            expected,
        }
    }

    fn require(&self, property: &'static str) -> Result<&'a Value, FieldError> {
        self.properties
            .get(property)
            .ok_or_else(|| self.missing(property))
    }

    /// Optional boolean, `false` when absent.
    fn flag(&self, property: &'static str) -> Result<bool, FieldError> {
        match self.properties.get(property) {
            None => Ok(false),
            Some(Value::Bool(flag)) => Ok(*flag),
            Some(other) => Err(self.wrong_type(property, other, "boolean")),
        }
    }

    fn string(&self, property: &'static str) -> Result<&'a str, FieldError> {
        match self.require(property)? {
            Value::String(text) => Ok(text.as_str()),
            other => Err(self.wrong_type(property, other, "string")),
        }
    }

    fn non_empty_string(&self, property: &'static str) -> Result<&'a str, FieldError> {
        let text = self.string(property)?;
        if text.is_empty() {
            return Err(FieldError::EmptyString {
                field: self.name(),
                kind: self.kind.tag(),
                property,
            });
        }
        Ok(text)
    }

    fn cardinality(&self, property: &'static str) -> Result<Cardinality, FieldError> {
        let tag = self.non_empty_string(property)?;
        Cardinality::from_tag(tag).ok_or_else(|| FieldError::InvalidEnumValue {
            field: self.name(),
            kind: self.kind.tag(),
            property,
            value: tag.to_string(),
            allowed: Cardinality::VALUES,
        })
    }

    fn non_empty_string_list(&self, property: &'static str) -> Result<Vec<String>, FieldError> {
        let value = self.require(property)?;
        let Value::Array(items) = value else {
            return Err(self.wrong_type(property, value, "non-empty array of strings"));
        };

        if items.is_empty() {
            return Err(FieldError::EmptyArray {
                field: self.name(),
                kind: self.kind.tag(),
                property,
                element: "strings",
            });
        }

        let mut values = Vec::with_capacity(items.len());
        for item in items {
            match item {
                Value::String(text) if text.is_empty() => {
                    return Err(FieldError::EmptyStringElement {
                        field: self.name(),
                        kind: self.kind.tag(),
                        property,
                    });
                }
                Value::String(text) => values.push(text.clone()),
                other => {
                    return Err(FieldError::WrongElementType {
                        field: self.name(),
                        kind: self.kind.tag(),
                        property,
                        value: other.to_string(),
                        actual: json_type(other),
                        expected: "non-empty strings",
                    });
                }
            }
        }

        Ok(values)
    }
}

pub(crate) fn build_plain_text(decl: &Declaration<'_>) -> Result<FieldModel, FieldError> {
    Ok(FieldModel::PlainText(TextField {
        name: decl.name(),
        required: decl.flag("required")?,
    }))
}

fn flavored_text(decl: &Declaration<'_>) -> Result<FlavoredTextField, FieldError> {
    Ok(FlavoredTextField {
        name: decl.name(),
        required: decl.flag("required")?,
    })
}

pub(crate) fn build_rich_text(decl: &Declaration<'_>) -> Result<FieldModel, FieldError> {
    flavored_text(decl).map(FieldModel::RichText)
}

pub(crate) fn build_email(decl: &Declaration<'_>) -> Result<FieldModel, FieldError> {
    flavored_text(decl).map(FieldModel::Email)
}

pub(crate) fn build_url(decl: &Declaration<'_>) -> Result<FieldModel, FieldError> {
    flavored_text(decl).map(FieldModel::Url)
}

pub(crate) fn build_number(decl: &Declaration<'_>) -> Result<FieldModel, FieldError> {
    Ok(FieldModel::Number(NumberField {
        name: decl.name(),
        required: decl.flag("required")?,
    }))
}

pub(crate) fn build_relation(decl: &Declaration<'_>) -> Result<FieldModel, FieldError> {
    let target = decl.non_empty_string("to")?.to_string();
    let cardinality = decl.cardinality("mode")?;
    let required = decl.flag("required")?;

    Ok(FieldModel::Relation(RelationField {
        name: decl.name(),
        target,
        cardinality,
        required,
    }))
}

pub(crate) fn build_date_time(decl: &Declaration<'_>) -> Result<FieldModel, FieldError> {
    Ok(FieldModel::DateTime(DateTimeField {
        name: decl.name(),
        required: decl.flag("required")?,
    }))
}

pub(crate) fn build_auto_date_time(decl: &Declaration<'_>) -> Result<FieldModel, FieldError> {
    Ok(FieldModel::AutoDateTime(PlainField { name: decl.name() }))
}

pub(crate) fn build_boolean(decl: &Declaration<'_>) -> Result<FieldModel, FieldError> {
    Ok(FieldModel::Boolean(PlainField { name: decl.name() }))
}

pub(crate) fn build_json(decl: &Declaration<'_>) -> Result<FieldModel, FieldError> {
    Ok(FieldModel::Json(PlainField { name: decl.name() }))
}

pub(crate) fn build_select(decl: &Declaration<'_>) -> Result<FieldModel, FieldError> {
    let options = decl.non_empty_string_list("options")?;
    let cardinality = decl.cardinality("mode")?;

    Ok(FieldModel::Select(SelectField {
        name: decl.name(),
        options,
        cardinality,
    }))
}

pub(crate) fn build_file(decl: &Declaration<'_>) -> Result<FieldModel, FieldError> {
    let cardinality = decl.cardinality("mode")?;
    let required = decl.flag("required")?;

    Ok(FieldModel::File(FileField {
        name: decl.name(),
        cardinality,
        required,
    }))
}

pub(crate) fn build_geo_point(decl: &Declaration<'_>) -> Result<FieldModel, FieldError> {
    Ok(FieldModel::GeoPoint(PlainField { name: decl.name() }))
}

pub(crate) fn build_password(decl: &Declaration<'_>) -> Result<FieldModel, FieldError> {
    Ok(FieldModel::Password(PlainField { name: decl.name() }))
}
