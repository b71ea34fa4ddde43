//! Field descriptor registry.
//!
//! Turns a type's [`FieldInfo`] table into the ordered set of
//! [`FieldDescriptor`]s the coercion engine works from. Both discovery modes
//! produce descriptors of the same shape:
//!
//! - **Declarative**: a field's [`MappableAttribute`] supplies its semantic
//!   type and requiredness. Fields without one are remembered as ignored so
//!   that records naming them are skipped rather than rejected.
//! - **Inferred**: the semantic type follows from the Rust type, and a field
//!   is required unless it is an `Option` or a `String`.
//!
//! Field names must be unique. When a hand-written [`Reflect`] impl repeats
//! one, the first declaration wins and later ones are dropped with a warning,
//! so every strategy sees the same single field.
//!
//! [`describe_fields`] memoizes the result per type for the rest of the
//! process; [`describe_fields_uncached`] redoes the discovery every call.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, LazyLock};

use tracing::warn;

use crate::reflect::{Discovery, FieldInfo, MappableAttribute, Reflect, StaticType};
use crate::type_cache::TypeCache;
use crate::value::SemanticType;

static FIELD_TABLES: LazyLock<TypeCache> = LazyLock::new(|| TypeCache::new("field descriptors"));

/// Mapping rules for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub semantic_type: SemanticType,
    pub nullable: bool,
    pub required: bool,
}

impl FieldDescriptor {
    fn declared(info: &FieldInfo, attribute: MappableAttribute) -> Self {
        Self {
            name: info.name,
            semantic_type: attribute.semantic_type,
            nullable: info.nullable,
            required: attribute.required,
        }
    }

    fn inferred(info: &FieldInfo) -> Self {
        Self {
            name: info.name,
            semantic_type: info.static_type.semantic_type(),
            nullable: info.nullable,
            required: !info.nullable && info.static_type != StaticType::String,
        }
    }
}

/// Result of looking a record key up in a [`FieldTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    Mapped(&'a FieldDescriptor),
    /// The field exists but is excluded from mapping.
    Ignored,
    Unknown,
}

/// Ordered field descriptors of one target type.
#[derive(Debug, Clone)]
pub struct FieldTable {
    type_name: &'static str,
    discovery: Discovery,
    descriptors: Vec<FieldDescriptor>,
    ignored: Vec<&'static str>,
    index: HashMap<&'static str, usize>,
    required_count: usize,
}

impl FieldTable {
    /// Runs discovery for `T` without consulting the cache.
    pub fn discover<T: Reflect>() -> Self {
        Self::from_infos(T::TYPE_NAME, T::DISCOVERY, T::field_infos())
    }

    pub fn from_infos(type_name: &'static str, discovery: Discovery, infos: &[FieldInfo]) -> Self {
        let mut descriptors = Vec::with_capacity(infos.len());
        let mut ignored = Vec::new();
        let mut seen = HashSet::with_capacity(infos.len());
        for info in infos {
            if !seen.insert(info.name) {
                warn!(
                    target_type = type_name,
                    field = info.name,
                    "duplicate field name, keeping the first declaration"
                );
                continue;
            }
            let descriptor = match discovery {
                Discovery::Declarative => match info.attribute {
                    Some(attribute) => FieldDescriptor::declared(info, attribute),
                    None => {
                        ignored.push(info.name);
                        continue;
                    }
                },
                Discovery::Inferred => FieldDescriptor::inferred(info),
            };
            descriptors.push(descriptor);
        }

        let index: HashMap<_, _> = descriptors
            .iter()
            .enumerate()
            .map(|(position, descriptor)| (descriptor.name, position))
            .collect();

        let required_count = descriptors.iter().filter(|d| d.required).count();
        Self {
            type_name,
            discovery,
            descriptors,
            ignored,
            index,
            required_count,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn discovery(&self) -> Discovery {
        self.discovery
    }

    /// Mapped descriptors in declaration order.
    pub fn descriptors(&self) -> &[FieldDescriptor] {
        &self.descriptors
    }

    /// Fields that exist but carry no mapping metadata.
    pub fn ignored(&self) -> &[&'static str] {
        &self.ignored
    }

    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.index.get(name).map(|&position| &self.descriptors[position])
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn lookup(&self, name: &str) -> Lookup<'_> {
        match self.get(name) {
            Some(descriptor) => Lookup::Mapped(descriptor),
            None if self.ignored.iter().any(|ignored| *ignored == name) => Lookup::Ignored,
            None => Lookup::Unknown,
        }
    }

    pub fn required(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.descriptors.iter().filter(|d| d.required)
    }

    pub fn required_count(&self) -> usize {
        self.required_count
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

/// Returns the memoized descriptors of `T`, discovering them on first use.
///
/// Every caller receives the same `Arc`, including callers racing on the
/// first access.
pub fn describe_fields<T: Reflect>() -> Arc<FieldTable> {
    FIELD_TABLES.get_or_insert_with::<T, _>(FieldTable::discover::<T>)
}

/// Discovers the descriptors of `T` from scratch.
pub fn describe_fields_uncached<T: Reflect>() -> FieldTable {
    FieldTable::discover::<T>()
}

/// Whether [`describe_fields`] has already populated `T`.
pub fn is_described<T: Reflect>() -> bool {
    FIELD_TABLES.contains::<T>()
}
