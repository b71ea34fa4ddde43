use std::fmt;

use chrono::NaiveDateTime;
use fieldmap_core::coerce::{parse_boolean, parse_datetime, parse_decimal, parse_int32};
use fieldmap_core::{
    Decimal, ManualMap, MappingError, Record, Reflect, Result, SemanticType, ensure_present,
};
use fieldmap_derive::Reflect;

use crate::manual::{optional, required, text};

/// Sample record type using inferred discovery: every public field is
/// mapped, and the Rust types decide what is required.
///
/// `revision` has no coercion, so any record naming it fails with
/// [`UnsupportedSemanticType`](fieldmap_core::MappingErrorKind::UnsupportedSemanticType).
#[derive(Debug, Clone, Default, PartialEq, Eq, Reflect)]
#[reflect(inferred)]
pub struct InferredModel {
    pub custom_identifier: i32,
    pub label: String,
    pub value: Decimal,
    pub created_on: NaiveDateTime,
    pub is_deleted: bool,
    pub foo: String,
    pub bar: String,
    pub number: Option<i32>,
    pub decimal: Option<Decimal>,
    pub another_date: Option<NaiveDateTime>,
    pub revision: Option<u64>,
}

const REQUIRED: &[&str] = &["CustomIdentifier", "Value", "CreatedOn", "IsDeleted"];

impl ManualMap for InferredModel {
    fn map_by_hand(record: &Record) -> Result<Self> {
        const TARGET: &str = InferredModel::TYPE_NAME;
        let mut model = InferredModel::default();
        for (field, raw) in record.iter() {
            match field {
                "CustomIdentifier" => {
                    model.custom_identifier = required(TARGET, field, raw, parse_int32)?;
                }
                "Label" => {
                    if let Some(label) = optional(TARGET, field, raw, text)? {
                        model.label = label;
                    }
                }
                "Value" => model.value = required(TARGET, field, raw, parse_decimal)?,
                "CreatedOn" => model.created_on = required(TARGET, field, raw, parse_datetime)?,
                "IsDeleted" => model.is_deleted = required(TARGET, field, raw, parse_boolean)?,
                "Foo" => {
                    if let Some(foo) = optional(TARGET, field, raw, text)? {
                        model.foo = foo;
                    }
                }
                "Bar" => {
                    if let Some(bar) = optional(TARGET, field, raw, text)? {
                        model.bar = bar;
                    }
                }
                "Number" => model.number = optional(TARGET, field, raw, parse_int32)?,
                "Decimal" => model.decimal = optional(TARGET, field, raw, parse_decimal)?,
                "AnotherDate" => {
                    model.another_date = optional(TARGET, field, raw, parse_datetime)?;
                }
                "Revision" => {
                    return Err(MappingError::unsupported(
                        TARGET,
                        field,
                        SemanticType::Unsupported("u64"),
                    ));
                }
                _ => return Err(MappingError::unknown_field(TARGET, field)),
            }
        }
        ensure_present(TARGET, REQUIRED, record)?;
        Ok(model)
    }
}

impl fmt::Display for InferredModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}: {} (created on: {}, is deleted: {})",
            self.label,
            self.custom_identifier,
            self.value,
            self.created_on.format("%m/%d/%Y"),
            self.is_deleted
        )
    }
}
