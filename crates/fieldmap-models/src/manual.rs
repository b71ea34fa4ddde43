//! Building blocks for hand-written mappers.
//!
//! They apply the same blank and coercion rules as the generic strategies,
//! so a hand-written mapper built from them fails exactly where the others do.

use fieldmap_core::coerce::is_blank;
use fieldmap_core::{MappingError, MappingErrorKind, Result};

/// Parses a required value; blank or absent input is an error.
pub(crate) fn required<T>(
    target: &'static str,
    field: &str,
    raw: Option<&str>,
    parse: impl FnOnce(&str) -> std::result::Result<T, MappingErrorKind>,
) -> Result<T> {
    match raw {
        Some(raw) if !is_blank(Some(raw)) => {
            parse(raw).map_err(|kind| MappingError::new(target, field, kind))
        }
        _ => Err(MappingError::missing_required(target, field)),
    }
}

/// Parses an optional value; blank or absent input is `None`.
pub(crate) fn optional<T>(
    target: &'static str,
    field: &str,
    raw: Option<&str>,
    parse: impl FnOnce(&str) -> std::result::Result<T, MappingErrorKind>,
) -> Result<Option<T>> {
    match raw {
        Some(raw) if !is_blank(Some(raw)) => parse(raw)
            .map(Some)
            .map_err(|kind| MappingError::new(target, field, kind)),
        _ => Ok(None),
    }
}

/// String "parser": the raw text unchanged.
pub(crate) fn text(raw: &str) -> std::result::Result<String, MappingErrorKind> {
    Ok(raw.to_string())
}
