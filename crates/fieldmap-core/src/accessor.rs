//! Accessor cache.
//!
//! Pairs every mapped [`FieldDescriptor`] of a type with the direct get/set
//! functions generated for that field. The binding pass runs once per type;
//! afterwards [`resolve_accessors`] is a cache lookup and each assignment is
//! a plain function call, with no by-name dispatch. A descriptor whose type
//! supplies no binding falls back to [`Reflect::set_field`] and
//! [`Reflect::get_field`], so it maps the same way on every strategy.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

use tracing::warn;

use crate::reflect::{FieldBinding, Getter, Reflect, Setter, SlotError};
use crate::registry::{FieldDescriptor, FieldTable, describe_fields};
use crate::type_cache::TypeCache;
use crate::value::Value;

static ACCESSOR_TABLES: LazyLock<TypeCache> = LazyLock::new(|| TypeCache::new("accessors"));

enum Slot<T> {
    Direct { get: Getter<T>, set: Setter<T> },
    ByName,
}

/// A descriptor bound to direct read/write functions on `T`.
pub struct Accessor<T> {
    descriptor: FieldDescriptor,
    slot: Slot<T>,
}

impl<T> Accessor<T> {
    pub fn name(&self) -> &'static str {
        self.descriptor.name
    }

    pub fn descriptor(&self) -> &FieldDescriptor {
        &self.descriptor
    }

    /// Whether the field goes through generated functions rather than the
    /// by-name slots.
    pub fn is_direct(&self) -> bool {
        matches!(self.slot, Slot::Direct { .. })
    }
}

impl<T: Reflect> Accessor<T> {
    pub fn get(&self, target: &T) -> Option<Value> {
        match &self.slot {
            Slot::Direct { get, .. } => get(target),
            Slot::ByName => target.get_field(self.name()).ok().flatten(),
        }
    }

    pub fn set(&self, target: &mut T, value: Value) -> Result<(), SlotError> {
        match &self.slot {
            Slot::Direct { set, .. } => set(target, value),
            Slot::ByName => target.set_field(self.name(), value),
        }
    }
}

impl<T> fmt::Debug for Accessor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accessor")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

/// Result of looking a record key up in an [`AccessorTable`].
#[derive(Debug)]
pub enum AccessorLookup<'a, T> {
    Bound(&'a Accessor<T>),
    Ignored,
    Unknown,
}

/// All accessors of one target type, addressable by field name.
pub struct AccessorTable<T> {
    type_name: &'static str,
    accessors: Vec<Accessor<T>>,
    ignored: Vec<&'static str>,
    index: HashMap<&'static str, usize>,
    required_count: usize,
}

impl<T> AccessorTable<T> {
    /// Binds each descriptor in `fields` to the matching entry of `bindings`.
    pub fn bind(fields: &FieldTable, bindings: &[FieldBinding<T>]) -> Self {
        let mut accessors = Vec::with_capacity(fields.len());
        for descriptor in fields.descriptors() {
            let slot = match bindings.iter().find(|b| b.name == descriptor.name) {
                Some(binding) => Slot::Direct {
                    get: binding.get,
                    set: binding.set,
                },
                None => {
                    warn!(
                        target_type = fields.type_name(),
                        field = descriptor.name,
                        "descriptor has no field binding, using by-name slots"
                    );
                    Slot::ByName
                }
            };
            accessors.push(Accessor {
                descriptor: *descriptor,
                slot,
            });
        }

        let index = accessors
            .iter()
            .enumerate()
            .map(|(position, accessor)| (accessor.name(), position))
            .collect();
        let required_count = accessors.iter().filter(|a| a.descriptor.required).count();
        Self {
            type_name: fields.type_name(),
            accessors,
            ignored: fields.ignored().to_vec(),
            index,
            required_count,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn get(&self, name: &str) -> Option<&Accessor<T>> {
        self.index.get(name).map(|&position| &self.accessors[position])
    }

    pub fn lookup(&self, name: &str) -> AccessorLookup<'_, T> {
        match self.get(name) {
            Some(accessor) => AccessorLookup::Bound(accessor),
            None if self.ignored.iter().any(|ignored| *ignored == name) => {
                AccessorLookup::Ignored
            }
            None => AccessorLookup::Unknown,
        }
    }

    /// Accessors in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Accessor<T>> {
        self.accessors.iter()
    }

    pub fn required(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.accessors
            .iter()
            .map(Accessor::descriptor)
            .filter(|d| d.required)
    }

    pub fn required_count(&self) -> usize {
        self.required_count
    }

    pub fn len(&self) -> usize {
        self.accessors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accessors.is_empty()
    }
}

/// Returns the cached accessors of `T`, binding them on first use.
pub fn resolve_accessors<T: Reflect>() -> Arc<AccessorTable<T>> {
    ACCESSOR_TABLES.get_or_insert_with::<T, _>(|| {
        AccessorTable::bind(&describe_fields::<T>(), &T::field_bindings())
    })
}

/// Whether [`resolve_accessors`] has already bound `T`.
pub fn is_resolved<T: Reflect>() -> bool {
    ACCESSOR_TABLES.contains::<T>()
}
