use std::fmt;

use chrono::NaiveDateTime;
use fieldmap_core::coerce::{parse_boolean, parse_datetime, parse_decimal, parse_int32};
use fieldmap_core::{Decimal, ManualMap, MappingError, Record, Reflect, Result, ensure_present};
use fieldmap_derive::Reflect;

use crate::manual::{optional, required, text};
use crate::status::RecordStatus;

/// Sample record type using declarative discovery.
///
/// `id` carries no mapping metadata: records may name it, but it is never
/// assigned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Reflect)]
pub struct Model {
    pub id: i32,
    #[mappable(integer, required)]
    pub custom_identifier: i32,
    #[mappable(string, required)]
    pub label: String,
    #[mappable(decimal, required)]
    pub value: Decimal,
    #[mappable(datetime)]
    pub created_on: Option<NaiveDateTime>,
    #[mappable(boolean, required)]
    pub is_deleted: bool,
    #[mappable(string)]
    pub foo: Option<String>,
    #[mappable(string)]
    pub bar: Option<String>,
    #[mappable(integer)]
    pub number: Option<i32>,
    #[mappable(decimal)]
    pub decimal: Option<Decimal>,
    #[mappable(datetime)]
    pub another_date: Option<NaiveDateTime>,
}

const REQUIRED: &[&str] = &["CustomIdentifier", "Label", "Value", "IsDeleted"];

impl Model {
    pub fn status(&self) -> RecordStatus {
        if self.is_deleted {
            RecordStatus::DELETED
        } else {
            RecordStatus::ACTIVE
        }
    }

    fn map_property(&mut self, field: &str, raw: Option<&str>) -> Result<()> {
        const TARGET: &str = Model::TYPE_NAME;
        match field {
            "Id" => {}
            "CustomIdentifier" => self.custom_identifier = required(TARGET, field, raw, parse_int32)?,
            "Label" => self.label = required(TARGET, field, raw, text)?,
            "Value" => self.value = required(TARGET, field, raw, parse_decimal)?,
            "CreatedOn" => self.created_on = optional(TARGET, field, raw, parse_datetime)?,
            "IsDeleted" => self.is_deleted = required(TARGET, field, raw, parse_boolean)?,
            "Foo" => self.foo = optional(TARGET, field, raw, text)?,
            "Bar" => self.bar = optional(TARGET, field, raw, text)?,
            "Number" => self.number = optional(TARGET, field, raw, parse_int32)?,
            "Decimal" => self.decimal = optional(TARGET, field, raw, parse_decimal)?,
            "AnotherDate" => self.another_date = optional(TARGET, field, raw, parse_datetime)?,
            _ => return Err(MappingError::unknown_field(TARGET, field)),
        }
        Ok(())
    }
}

impl ManualMap for Model {
    fn map_by_hand(record: &Record) -> Result<Self> {
        let mut model = Model::default();
        for (field, raw) in record.iter() {
            model.map_property(field, raw)?;
        }
        ensure_present(Model::TYPE_NAME, REQUIRED, record)?;
        Ok(model)
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let created_on = self
            .created_on
            .map(|date| date.format("%m/%d/%Y").to_string())
            .unwrap_or_default();
        write!(
            f,
            "{}-{}: {} (created on: {created_on}, is deleted: {})",
            self.label, self.custom_identifier, self.value, self.is_deleted
        )
    }
}
