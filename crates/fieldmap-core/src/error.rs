//! Error types for record mapping.

use thiserror::Error;

use crate::value::SemanticType;

/// Why a single field of a record could not be mapped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingErrorKind {
    /// The record names a field the target type does not have.
    #[error("no such field")]
    UnknownField,

    /// A required field was blank or absent.
    #[error("required, but no value was provided")]
    MissingRequiredValue,

    /// The raw value does not parse as the field's semantic type.
    #[error("\"{raw}\" is not a valid {semantic_type}")]
    ConversionFailure {
        semantic_type: SemanticType,
        raw: String,
    },

    /// The field's descriptor names a type that cannot be coerced or assigned.
    #[error("semantic type {0} is not supported")]
    UnsupportedSemanticType(SemanticType),
}

impl MappingErrorKind {
    /// Short, value-free label used in log output.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::UnknownField => "unknown field",
            Self::MissingRequiredValue => "missing required value",
            Self::ConversionFailure { .. } => "conversion failure",
            Self::UnsupportedSemanticType(_) => "unsupported semantic type",
        }
    }
}

/// Error surfaced by a mapping call: the first field that failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{target}.{field}: {kind}")]
pub struct MappingError {
    /// Name of the target type being populated.
    pub target: &'static str,
    /// Offending field name, as it appeared in the record.
    pub field: String,
    pub kind: MappingErrorKind,
}

impl MappingError {
    pub fn new(target: &'static str, field: impl Into<String>, kind: MappingErrorKind) -> Self {
        Self {
            target,
            field: field.into(),
            kind,
        }
    }

    pub fn unknown_field(target: &'static str, field: impl Into<String>) -> Self {
        Self::new(target, field, MappingErrorKind::UnknownField)
    }

    pub fn missing_required(target: &'static str, field: impl Into<String>) -> Self {
        Self::new(target, field, MappingErrorKind::MissingRequiredValue)
    }

    pub fn conversion_failure(
        target: &'static str,
        field: impl Into<String>,
        semantic_type: SemanticType,
        raw: impl Into<String>,
    ) -> Self {
        Self::new(
            target,
            field,
            MappingErrorKind::ConversionFailure {
                semantic_type,
                raw: raw.into(),
            },
        )
    }

    pub fn unsupported(
        target: &'static str,
        field: impl Into<String>,
        semantic_type: SemanticType,
    ) -> Self {
        Self::new(
            target,
            field,
            MappingErrorKind::UnsupportedSemanticType(semantic_type),
        )
    }
}

pub type Result<T> = std::result::Result<T, MappingError>;
