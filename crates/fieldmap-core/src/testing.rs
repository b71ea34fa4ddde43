//! Hand-written target types for unit tests.

use crate::coerce::{is_blank, parse_decimal, parse_int32};
use crate::decimal::Decimal;
use crate::error::{MappingError, Result};
use crate::mapper::{ManualMap, ensure_present};
use crate::record::Record;
use crate::reflect::{
    Discovery, FieldBinding, FieldInfo, MappableAttribute, Reflect, SlotError, StaticType,
};
use crate::value::{FromValue, SemanticType, ToValue, Value};

/// Declarative type with one unannotated field.
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct Ticket {
    pub internal: i32,
    pub code: i32,
    pub amount: Decimal,
    pub note: Option<String>,
}

const TICKET_FIELDS: &[FieldInfo] = &[
    FieldInfo {
        name: "Internal",
        static_type: StaticType::Int32,
        nullable: false,
        attribute: None,
    },
    FieldInfo {
        name: "Code",
        static_type: StaticType::Int32,
        nullable: false,
        attribute: Some(MappableAttribute {
            semantic_type: SemanticType::Integer,
            required: true,
        }),
    },
    FieldInfo {
        name: "Amount",
        static_type: StaticType::Decimal,
        nullable: false,
        attribute: Some(MappableAttribute {
            semantic_type: SemanticType::Decimal,
            required: true,
        }),
    },
    FieldInfo {
        name: "Note",
        static_type: StaticType::String,
        nullable: true,
        attribute: Some(MappableAttribute {
            semantic_type: SemanticType::String,
            required: false,
        }),
    },
];

impl Reflect for Ticket {
    const TYPE_NAME: &'static str = "Ticket";
    const DISCOVERY: Discovery = Discovery::Declarative;

    fn field_infos() -> &'static [FieldInfo] {
        TICKET_FIELDS
    }

    fn set_field(&mut self, name: &str, value: Value) -> std::result::Result<(), SlotError> {
        match name {
            "Internal" => self.internal = FromValue::from_value(value)?,
            "Code" => self.code = FromValue::from_value(value)?,
            "Amount" => self.amount = FromValue::from_value(value)?,
            "Note" => self.note = FromValue::from_value(value)?,
            _ => return Err(SlotError::NoSuchField(name.to_string())),
        }
        Ok(())
    }

    fn get_field(&self, name: &str) -> std::result::Result<Option<Value>, SlotError> {
        match name {
            "Internal" => Ok(self.internal.to_value()),
            "Code" => Ok(self.code.to_value()),
            "Amount" => Ok(self.amount.to_value()),
            "Note" => Ok(self.note.to_value()),
            _ => Err(SlotError::NoSuchField(name.to_string())),
        }
    }

    fn field_bindings() -> Vec<FieldBinding<Self>> {
        vec![
            FieldBinding {
                name: "Internal",
                get: |target| target.internal.to_value(),
                set: |target, value| {
                    target.internal = FromValue::from_value(value)?;
                    Ok(())
                },
            },
            FieldBinding {
                name: "Code",
                get: |target| target.code.to_value(),
                set: |target, value| {
                    target.code = FromValue::from_value(value)?;
                    Ok(())
                },
            },
            FieldBinding {
                name: "Amount",
                get: |target| target.amount.to_value(),
                set: |target, value| {
                    target.amount = FromValue::from_value(value)?;
                    Ok(())
                },
            },
            FieldBinding {
                name: "Note",
                get: |target| target.note.to_value(),
                set: |target, value| {
                    target.note = FromValue::from_value(value)?;
                    Ok(())
                },
            },
        ]
    }
}

impl ManualMap for Ticket {
    fn map_by_hand(record: &Record) -> Result<Self> {
        let mut ticket = Ticket::default();
        for (name, raw) in record.iter() {
            match name {
                "Internal" => {}
                "Code" | "Amount" if is_blank(raw) => {
                    return Err(MappingError::missing_required("Ticket", name));
                }
                "Code" => {
                    ticket.code = parse_int32(raw.unwrap_or_default())
                        .map_err(|kind| MappingError::new("Ticket", name, kind))?;
                }
                "Amount" => {
                    ticket.amount = parse_decimal(raw.unwrap_or_default())
                        .map_err(|kind| MappingError::new("Ticket", name, kind))?;
                }
                "Note" => {
                    ticket.note = raw.filter(|v| !v.trim().is_empty()).map(str::to_string);
                }
                _ => return Err(MappingError::unknown_field("Ticket", name)),
            }
        }
        ensure_present("Ticket", &["Code", "Amount"], record)?;
        Ok(ticket)
    }
}

/// Inferred type that no test maps, so its cache entries stay cold until a
/// test touches them explicitly.
#[derive(Debug, Default)]
pub(crate) struct Untouched {
    pub flag: bool,
}

const UNTOUCHED_FIELDS: &[FieldInfo] = &[FieldInfo {
    name: "Flag",
    static_type: StaticType::Bool,
    nullable: false,
    attribute: None,
}];

impl Reflect for Untouched {
    const TYPE_NAME: &'static str = "Untouched";
    const DISCOVERY: Discovery = Discovery::Inferred;

    fn field_infos() -> &'static [FieldInfo] {
        UNTOUCHED_FIELDS
    }

    fn set_field(&mut self, name: &str, value: Value) -> std::result::Result<(), SlotError> {
        match name {
            "Flag" => self.flag = FromValue::from_value(value)?,
            _ => return Err(SlotError::NoSuchField(name.to_string())),
        }
        Ok(())
    }

    fn get_field(&self, name: &str) -> std::result::Result<Option<Value>, SlotError> {
        match name {
            "Flag" => Ok(self.flag.to_value()),
            _ => Err(SlotError::NoSuchField(name.to_string())),
        }
    }

    fn field_bindings() -> Vec<FieldBinding<Self>> {
        vec![FieldBinding {
            name: "Flag",
            get: |target| target.flag.to_value(),
            set: |target, value| {
                target.flag = FromValue::from_value(value)?;
                Ok(())
            },
        }]
    }
}

/// Declarative type whose bindings cover only `Label`.
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct Partial {
    pub code: i32,
    pub label: Option<String>,
}

const PARTIAL_FIELDS: &[FieldInfo] = &[
    FieldInfo {
        name: "Code",
        static_type: StaticType::Int32,
        nullable: false,
        attribute: Some(MappableAttribute {
            semantic_type: SemanticType::Integer,
            required: true,
        }),
    },
    FieldInfo {
        name: "Label",
        static_type: StaticType::String,
        nullable: true,
        attribute: Some(MappableAttribute {
            semantic_type: SemanticType::String,
            required: false,
        }),
    },
];

impl Reflect for Partial {
    const TYPE_NAME: &'static str = "Partial";
    const DISCOVERY: Discovery = Discovery::Declarative;

    fn field_infos() -> &'static [FieldInfo] {
        PARTIAL_FIELDS
    }

    fn set_field(&mut self, name: &str, value: Value) -> std::result::Result<(), SlotError> {
        match name {
            "Code" => self.code = FromValue::from_value(value)?,
            "Label" => self.label = FromValue::from_value(value)?,
            _ => return Err(SlotError::NoSuchField(name.to_string())),
        }
        Ok(())
    }

    fn get_field(&self, name: &str) -> std::result::Result<Option<Value>, SlotError> {
        match name {
            "Code" => Ok(self.code.to_value()),
            "Label" => Ok(self.label.to_value()),
            _ => Err(SlotError::NoSuchField(name.to_string())),
        }
    }

    fn field_bindings() -> Vec<FieldBinding<Self>> {
        vec![FieldBinding {
            name: "Label",
            get: |target| target.label.to_value(),
            set: |target, value| {
                target.label = FromValue::from_value(value)?;
                Ok(())
            },
        }]
    }
}
