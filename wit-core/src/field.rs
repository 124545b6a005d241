//! Field definitions and the closed set of field types
//!
//! A field type is one of three shapes:
//!
//! - [`SimpleType`]: a single simple [`Kind`]
//! - [`ListType`]: a list whose elements share a simple component kind
//! - [`EnumType`]: a simple base kind plus an ordered set of permitted values
//!
//! Container kinds never nest. A list of enums or an enum over lists is
//! rejected when the type is built, so a constructed [`FieldType`] is always
//! well formed.

use chrono::DateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::kind::{Kind, ParseKindError};

/// Errors raised while converting field types and values into the model
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    #[error("unknown kind '{0}'")]
    UnknownKind(String),

    #[error("kind '{0}' is not a simple kind")]
    NotSimple(Kind),

    #[error("component type of a list must be a simple kind, got '{0}'")]
    InvalidComponentType(Kind),

    #[error("base type of an enum must be a simple kind, got '{0}'")]
    InvalidBaseType(Kind),

    #[error("list field type is missing its component type")]
    MissingComponentType,

    #[error("enum field type is missing its base type")]
    MissingBaseType,

    #[error("value {value} is not a valid {kind}: {reason}")]
    InvalidValue { kind: Kind, value: String, reason: String },
}

impl From<ParseKindError> for ConversionError {
    fn from(err: ParseKindError) -> Self {
        ConversionError::UnknownKind(err.0)
    }
}

/// A field type carrying only a simple kind tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSimpleType")]
pub struct SimpleType {
    pub(crate) kind: Kind,
}

#[derive(Deserialize)]
struct RawSimpleType {
    kind: Kind,
}

impl TryFrom<RawSimpleType> for SimpleType {
    type Error = ConversionError;

    fn try_from(raw: RawSimpleType) -> Result<Self, Self::Error> {
        SimpleType::new(raw.kind)
    }
}

impl SimpleType {
    /// Create a simple type, rejecting the container kinds
    pub fn new(kind: Kind) -> Result<Self, ConversionError> {
        if kind.is_simple() {
            Ok(Self { kind })
        } else {
            Err(ConversionError::NotSimple(kind))
        }
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Check a single JSON value against this kind and return its model form.
    ///
    /// `null` is accepted for every kind and stays `null`.
    pub fn convert_to_model(&self, value: &Value) -> Result<Value, ConversionError> {
        if value.is_null() {
            return Ok(Value::Null);
        }

        let invalid = |reason: &str| ConversionError::InvalidValue {
            kind: self.kind,
            value: value.to_string(),
            reason: reason.to_string(),
        };

        match self.kind {
            Kind::String | Kind::Markup => {
                value.as_str().ok_or_else(|| invalid("expected a string"))?;
            }
            Kind::Integer | Kind::Duration => {
                if !(value.is_i64() || value.is_u64()) {
                    return Err(invalid("expected an integer"));
                }
            }
            Kind::Float => {
                if !value.is_number() {
                    return Err(invalid("expected a number"));
                }
            }
            Kind::Boolean => {
                value.as_bool().ok_or_else(|| invalid("expected a boolean"))?;
            }
            Kind::Instant => {
                let raw = value.as_str().ok_or_else(|| invalid("expected an RFC 3339 timestamp"))?;
                DateTime::parse_from_rfc3339(raw).map_err(|e| invalid(&e.to_string()))?;
            }
            Kind::Url => {
                let raw = value.as_str().ok_or_else(|| invalid("expected a URL string"))?;
                url::Url::parse(raw).map_err(|e| invalid(&e.to_string()))?;
            }
            Kind::WorkItem | Kind::User | Kind::Iteration | Kind::Area | Kind::Label | Kind::Codebase => {
                value.as_str().ok_or_else(|| invalid("expected an identifier string"))?;
            }
            Kind::Enum | Kind::List => return Err(ConversionError::NotSimple(self.kind)),
        }

        Ok(value.clone())
    }
}

/// A list of values that all share one simple component kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListType {
    pub component_type: SimpleType,
}

impl ListType {
    pub fn new(component: Kind) -> Result<Self, ConversionError> {
        let component_type =
            SimpleType::new(component).map_err(|_| ConversionError::InvalidComponentType(component))?;
        Ok(Self { component_type })
    }
}

/// An ordered set of permitted values over a simple base kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumType {
    pub base_type: SimpleType,
    pub values: Vec<Value>,
}

impl EnumType {
    /// Build an enum type, converting every value through the base type.
    ///
    /// Fails on the first value the base type rejects.
    pub fn new(base: Kind, values: &[Value]) -> Result<Self, ConversionError> {
        let base_type = SimpleType::new(base).map_err(|_| ConversionError::InvalidBaseType(base))?;
        let values = values
            .iter()
            .map(|value| base_type.convert_to_model(value))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { base_type, values })
    }
}

/// The closed polymorphic set of field types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldType {
    Simple(SimpleType),
    List(ListType),
    Enum(EnumType),
}

impl FieldType {
    /// Shorthand for a simple field type
    pub fn simple(kind: Kind) -> Result<Self, ConversionError> {
        SimpleType::new(kind).map(FieldType::Simple)
    }

    /// The kind tag this type reports on the wire
    pub fn kind(&self) -> Kind {
        match self {
            FieldType::Simple(simple) => simple.kind(),
            FieldType::List(_) => Kind::List,
            FieldType::Enum(_) => Kind::Enum,
        }
    }
}

/// A named field of a work item type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required: bool,
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

impl FieldDefinition {
    pub fn new(label: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            label: label.into(),
            description: String::new(),
            required: false,
            field_type,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_simple_type_rejects_containers() {
        assert_eq!(SimpleType::new(Kind::List), Err(ConversionError::NotSimple(Kind::List)));
        assert_eq!(SimpleType::new(Kind::Enum), Err(ConversionError::NotSimple(Kind::Enum)));
        assert!(SimpleType::new(Kind::Url).is_ok());
    }

    #[test]
    fn test_list_component_must_be_simple() {
        assert_eq!(ListType::new(Kind::Enum), Err(ConversionError::InvalidComponentType(Kind::Enum)));
        assert_eq!(ListType::new(Kind::List), Err(ConversionError::InvalidComponentType(Kind::List)));
        assert_eq!(ListType::new(Kind::Label).unwrap().component_type.kind(), Kind::Label);
    }

    #[test]
    fn test_enum_base_must_be_simple() {
        let err = EnumType::new(Kind::List, &[json!("a")]).unwrap_err();
        assert_eq!(err, ConversionError::InvalidBaseType(Kind::List));
    }

    #[test]
    fn test_enum_values_converted_by_base_type() {
        let enum_type = EnumType::new(Kind::String, &[json!("low"), json!("high")]).unwrap();
        assert_eq!(enum_type.values, vec![json!("low"), json!("high")]);

        let err = EnumType::new(Kind::Integer, &[json!(1), json!("two")]).unwrap_err();
        assert!(matches!(err, ConversionError::InvalidValue { kind: Kind::Integer, .. }));
    }

    #[test]
    fn test_convert_to_model_per_kind() {
        let check = |kind: Kind, value: Value| SimpleType::new(kind).unwrap().convert_to_model(&value);

        assert!(check(Kind::String, json!("x")).is_ok());
        assert!(check(Kind::String, json!(1)).is_err());
        assert!(check(Kind::Integer, json!(3)).is_ok());
        assert!(check(Kind::Integer, json!(3.5)).is_err());
        assert!(check(Kind::Float, json!(3)).is_ok());
        assert!(check(Kind::Float, json!(3.5)).is_ok());
        assert!(check(Kind::Boolean, json!(true)).is_ok());
        assert!(check(Kind::Boolean, json!("true")).is_err());
        assert!(check(Kind::Instant, json!("2017-03-01T12:00:00Z")).is_ok());
        assert!(check(Kind::Instant, json!("yesterday")).is_err());
        assert!(check(Kind::Url, json!("https://example.com/x")).is_ok());
        assert!(check(Kind::Url, json!("not a url")).is_err());
        assert!(check(Kind::User, json!("6c5610be-30b2-4880-9fec-81e4f8e4fd76")).is_ok());
        assert_eq!(check(Kind::Markup, Value::Null).unwrap(), Value::Null);
    }

    #[test]
    fn test_field_type_storage_shape() {
        let field_type = FieldType::Enum(EnumType::new(Kind::String, &[json!("low"), json!("high")]).unwrap());
        let stored = serde_json::to_value(&field_type).unwrap();
        assert_eq!(
            stored,
            json!({"type": "enum", "base_type": {"kind": "string"}, "values": ["low", "high"]})
        );

        let restored: FieldType = serde_json::from_value(stored).unwrap();
        assert_eq!(restored, field_type);
    }

    #[test]
    fn test_stored_field_type_with_container_component_rejected() {
        let stored = json!({"type": "list", "component_type": {"kind": "enum"}});
        assert!(serde_json::from_value::<FieldType>(stored).is_err());
    }

    #[test]
    fn test_field_type_kind() {
        assert_eq!(FieldType::simple(Kind::Area).unwrap().kind(), Kind::Area);
        assert_eq!(FieldType::List(ListType::new(Kind::User).unwrap()).kind(), Kind::List);
    }
}
