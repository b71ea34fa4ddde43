//! Semantic types and coerced values.

use std::fmt;

use chrono::NaiveDateTime;

use crate::decimal::Decimal;
use crate::reflect::SlotError;

/// Declared semantic type of a mappable field.
///
/// `Unsupported` carries the Rust type name of a field that has no coercion;
/// it only arises from inferred discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticType {
    Integer,
    Decimal,
    String,
    DateTime,
    Boolean,
    Unsupported(&'static str),
}

impl SemanticType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SemanticType::Integer => "Integer",
            SemanticType::Decimal => "Decimal",
            SemanticType::String => "String",
            SemanticType::DateTime => "DateTime",
            SemanticType::Boolean => "Boolean",
            SemanticType::Unsupported(name) => name,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, SemanticType::Unsupported(_))
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw string after successful coercion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Integer(i32),
    Decimal(Decimal),
    String(String),
    DateTime(NaiveDateTime),
    Boolean(bool),
}

/// Layout used when formatting date/time values.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

impl Value {
    pub fn semantic_type(&self) -> SemanticType {
        match self {
            Value::Integer(_) => SemanticType::Integer,
            Value::Decimal(_) => SemanticType::Decimal,
            Value::String(_) => SemanticType::String,
            Value::DateTime(_) => SemanticType::DateTime,
            Value::Boolean(_) => SemanticType::Boolean,
        }
    }
}

/// Canonical formatting; the output coerces back to an equal value.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{v}"),
            Value::Decimal(v) => write!(f, "{v}"),
            Value::String(v) => f.write_str(v),
            Value::DateTime(v) => write!(f, "{}", v.format(DATE_TIME_FORMAT)),
            Value::Boolean(v) => write!(f, "{v}"),
        }
    }
}

/// Conversion from a coerced [`Value`] into a field's Rust type.
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Result<Self, SlotError>;
}

/// Read access to a field as a [`Value`]; `None` means unset.
pub trait ToValue {
    fn to_value(&self) -> Option<Value>;
}

macro_rules! scalar_value {
    ($ty:ty, $variant:ident, $name:literal) => {
        impl FromValue for $ty {
            fn from_value(value: Value) -> Result<Self, SlotError> {
                match value {
                    Value::$variant(v) => Ok(v),
                    other => Err(SlotError::TypeMismatch {
                        expected: $name,
                        found: other.semantic_type(),
                    }),
                }
            }
        }

        impl ToValue for $ty {
            fn to_value(&self) -> Option<Value> {
                Some(Value::$variant(self.clone()))
            }
        }
    };
}

scalar_value!(i32, Integer, "i32");
scalar_value!(Decimal, Decimal, "Decimal");
scalar_value!(String, String, "String");
scalar_value!(NaiveDateTime, DateTime, "NaiveDateTime");
scalar_value!(bool, Boolean, "bool");

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self, SlotError> {
        T::from_value(value).map(Some)
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Option<Value> {
        self.as_ref().and_then(ToValue::to_value)
    }
}
