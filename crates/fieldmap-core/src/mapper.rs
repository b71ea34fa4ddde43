//! Mapping façade.
//!
//! [`map`] populates a fresh `T` from a [`Record`] using one of four
//! interchangeable [`Strategy`] values. They differ in how field metadata is
//! found and how values are assigned, never in the outcome: for the same
//! record every strategy returns an equal instance or the same error.
//!
//! Entries are processed in record order and the first failing entry ends
//! the call. Required fields that never appear in the record are reported
//! after all entries, in declaration order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::accessor::{AccessorLookup, resolve_accessors};
use crate::coerce::coerce;
use crate::error::{MappingError, Result};
use crate::record::Record;
use crate::reflect::{Reflect, SlotError};
use crate::registry::{FieldDescriptor, FieldTable, Lookup, describe_fields, describe_fields_uncached};
use crate::value::Value;

/// How [`map`] resolves field metadata and assigns values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// The type's hand-written [`ManualMap`] implementation.
    Manual,
    /// Descriptors discovered on every call, by-name assignment.
    DeclarativeReflective,
    /// Descriptors cached per type, by-name assignment.
    CachedReflective,
    /// Accessors cached per type, direct assignment.
    #[default]
    CachedAccessor,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Manual,
        Strategy::DeclarativeReflective,
        Strategy::CachedReflective,
        Strategy::CachedAccessor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Manual => "manual",
            Strategy::DeclarativeReflective => "declarative-reflective",
            Strategy::CachedReflective => "cached-reflective",
            Strategy::CachedAccessor => "cached-accessor",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == normalized)
            .ok_or_else(|| format!("Unknown mapping strategy: {s}"))
    }
}

/// A hand-written mapper for `Self`.
///
/// Implementations must behave exactly like the generic strategies: same
/// coercion rules, same error for the same record.
pub trait ManualMap: Sized {
    fn map_by_hand(record: &Record) -> Result<Self>;
}

/// Types every [`Strategy`] can produce.
pub trait Mappable: Reflect + ManualMap {}

impl<T: Reflect + ManualMap> Mappable for T {}

pub fn map<T: Mappable>(strategy: Strategy, record: &Record) -> Result<T> {
    match strategy {
        Strategy::Manual => map_manual(record),
        Strategy::DeclarativeReflective => map_declarative(record),
        Strategy::CachedReflective => map_cached(record),
        Strategy::CachedAccessor => map_with_accessors(record),
    }
}

pub fn map_manual<T: ManualMap>(record: &Record) -> Result<T> {
    T::map_by_hand(record)
}

/// Discovers the descriptors of `T` from scratch and assigns by name.
pub fn map_declarative<T: Reflect>(record: &Record) -> Result<T> {
    map_reflective(&describe_fields_uncached::<T>(), record)
}

/// Uses the cached descriptors of `T` and assigns by name.
pub fn map_cached<T: Reflect>(record: &Record) -> Result<T> {
    map_reflective(&describe_fields::<T>(), record)
}

/// Uses the cached accessors of `T`.
pub fn map_with_accessors<T: Reflect>(record: &Record) -> Result<T> {
    let accessors = resolve_accessors::<T>();
    let mut target = T::default();
    let mut required_seen = 0;

    for (name, raw) in record.iter() {
        let accessor = match accessors.lookup(name) {
            AccessorLookup::Bound(accessor) => accessor,
            AccessorLookup::Ignored => {
                trace!(target_type = T::TYPE_NAME, field = name, "skipping unmapped field");
                continue;
            }
            AccessorLookup::Unknown => return Err(MappingError::unknown_field(T::TYPE_NAME, name)),
        };
        let descriptor = accessor.descriptor();
        if descriptor.required {
            required_seen += 1;
        }
        if let Some(value) = coerce_entry::<T>(descriptor, raw)? {
            accessor
                .set(&mut target, value)
                .map_err(|err| slot_failure::<T>(descriptor, err))?;
        }
    }

    if required_seen < accessors.required_count() {
        check_required(T::TYPE_NAME, accessors.required(), record)?;
    }
    Ok(target)
}

fn map_reflective<T: Reflect>(fields: &FieldTable, record: &Record) -> Result<T> {
    let mut target = T::default();
    let mut required_seen = 0;

    for (name, raw) in record.iter() {
        let descriptor = match fields.lookup(name) {
            Lookup::Mapped(descriptor) => descriptor,
            Lookup::Ignored => {
                trace!(target_type = T::TYPE_NAME, field = name, "skipping unmapped field");
                continue;
            }
            Lookup::Unknown => return Err(MappingError::unknown_field(T::TYPE_NAME, name)),
        };
        if descriptor.required {
            required_seen += 1;
        }
        if let Some(value) = coerce_entry::<T>(descriptor, raw)? {
            target
                .set_field(descriptor.name, value)
                .map_err(|err| slot_failure::<T>(descriptor, err))?;
        }
    }

    if required_seen < fields.required_count() {
        check_required(T::TYPE_NAME, fields.required(), record)?;
    }
    Ok(target)
}

fn coerce_entry<T: Reflect>(descriptor: &FieldDescriptor, raw: Option<&str>) -> Result<Option<Value>> {
    let value = coerce(descriptor.semantic_type, raw, descriptor.required)
        .map_err(|kind| MappingError::new(T::TYPE_NAME, descriptor.name, kind))?;
    trace!(
        target_type = T::TYPE_NAME,
        field = descriptor.name,
        raw = raw,
        assigned = value.is_some(),
        "coerced field"
    );
    Ok(value)
}

fn slot_failure<T: Reflect>(descriptor: &FieldDescriptor, err: SlotError) -> MappingError {
    match err {
        SlotError::NoSuchField(name) => MappingError::unknown_field(T::TYPE_NAME, name),
        SlotError::TypeMismatch { .. } => {
            MappingError::unsupported(T::TYPE_NAME, descriptor.name, descriptor.semantic_type)
        }
    }
}

fn check_required<'a>(
    target: &'static str,
    mut required: impl Iterator<Item = &'a FieldDescriptor>,
    record: &Record,
) -> Result<()> {
    match required.find(|descriptor| !record.contains_key(descriptor.name)) {
        Some(missing) => Err(MappingError::missing_required(target, missing.name)),
        None => Ok(()),
    }
}

/// Fails with the first of `required` (in the given order) that `record`
/// does not name at all. Blank values are caught during coercion, so only
/// absence is checked here.
pub fn ensure_present(target: &'static str, required: &[&str], record: &Record) -> Result<()> {
    match required.iter().find(|name| !record.contains_key(name)) {
        Some(missing) => Err(MappingError::missing_required(target, *missing)),
        None => Ok(()),
    }
}
