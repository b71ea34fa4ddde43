//! Coercion engine: raw record strings to typed [`Value`]s.
//!
//! All parsing is culture-invariant and strict. A value that does not match
//! its semantic type is rejected with [`MappingErrorKind::ConversionFailure`];
//! nothing is truncated, rounded or replaced by a default.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use crate::decimal::Decimal;
use crate::error::MappingErrorKind;
use crate::value::{SemanticType, Value};

/// Date-time layouts tried after RFC 3339, in order.
const DATE_TIME_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
];

/// Date-only layouts; the time of day is midnight.
const DATE_LAYOUTS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

/// True for an absent value or one made only of whitespace.
pub fn is_blank(raw: Option<&str>) -> bool {
    raw.is_none_or(|value| value.trim().is_empty())
}

/// Converts `raw` to `semantic_type`.
///
/// Blank input yields `Ok(None)` for optional fields and
/// [`MappingErrorKind::MissingRequiredValue`] for required ones.
pub fn coerce(
    semantic_type: SemanticType,
    raw: Option<&str>,
    required: bool,
) -> Result<Option<Value>, MappingErrorKind> {
    if !semantic_type.is_supported() {
        return Err(MappingErrorKind::UnsupportedSemanticType(semantic_type));
    }
    let raw = match raw {
        Some(raw) if !raw.trim().is_empty() => raw,
        _ if required => return Err(MappingErrorKind::MissingRequiredValue),
        _ => return Ok(None),
    };

    let value = match semantic_type {
        SemanticType::Integer => Value::Integer(parse_int32(raw)?),
        SemanticType::Decimal => Value::Decimal(parse_decimal(raw)?),
        SemanticType::Boolean => Value::Boolean(parse_boolean(raw)?),
        SemanticType::DateTime => Value::DateTime(parse_datetime(raw)?),
        SemanticType::String => Value::String(raw.to_string()),
        SemanticType::Unsupported(_) => {
            return Err(MappingErrorKind::UnsupportedSemanticType(semantic_type));
        }
    };
    Ok(Some(value))
}

fn conversion_failure(semantic_type: SemanticType, raw: &str) -> MappingErrorKind {
    MappingErrorKind::ConversionFailure {
        semantic_type,
        raw: raw.to_string(),
    }
}

/// Optional surrounding whitespace, optional sign, decimal digits.
pub fn parse_int32(raw: &str) -> Result<i32, MappingErrorKind> {
    raw.trim()
        .parse()
        .map_err(|_| conversion_failure(SemanticType::Integer, raw))
}

pub fn parse_decimal(raw: &str) -> Result<Decimal, MappingErrorKind> {
    raw.parse()
        .map_err(|_| conversion_failure(SemanticType::Decimal, raw))
}

/// `true` or `false` in any letter case.
pub fn parse_boolean(raw: &str) -> Result<bool, MappingErrorKind> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if trimmed.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(conversion_failure(SemanticType::Boolean, raw))
    }
}

/// Parses a date or date-time. Values with a UTC offset are converted to UTC.
pub fn parse_datetime(raw: &str) -> Result<NaiveDateTime, MappingErrorKind> {
    let trimmed = raw.trim();
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(with_offset.naive_utc());
    }
    if let Some(parsed) = DATE_TIME_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(trimmed, layout).ok())
    {
        return Ok(parsed);
    }
    DATE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDate::parse_from_str(trimmed, layout).ok())
        .map(|date| date.and_time(NaiveTime::MIN))
        .ok_or_else(|| conversion_failure(SemanticType::DateTime, raw))
}

/// Canonical text for a value. Coercing the result gives back an equal value.
pub fn format_value(value: &Value) -> String {
    value.to_string()
}
