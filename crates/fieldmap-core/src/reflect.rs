//! Statically declared field tables for target types.
//!
//! Target types describe their public fields once, at compile time, through
//! the [`Reflect`] trait. The trait is normally generated by
//! `#[derive(Reflect)]` from `fieldmap-derive`, but a hand-written impl is
//! equally valid. Everything the registry and the accessor cache know about
//! a type comes from here; nothing is discovered at run time.
//!
//! # Example
//!
//! ```ignore
//! use fieldmap_derive::Reflect;
//!
//! #[derive(Default, Reflect)]
//! pub struct Order {
//!     #[mappable(integer, required)]
//!     pub order_id: i32,
//!     #[mappable(string)]
//!     pub note: Option<String>,
//! }
//! ```

use thiserror::Error;

use crate::value::{SemanticType, Value};

/// How the descriptor registry discovers mappable fields of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Discovery {
    /// Only fields carrying [`MappableAttribute`] metadata are mapped; other
    /// public fields are known but skipped.
    Declarative,
    /// Every public field is mapped; type and requiredness follow from the
    /// field's Rust type.
    Inferred,
}

/// Rust type of a field, as far as coercion is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StaticType {
    Int32,
    Decimal,
    Bool,
    DateTime,
    String,
    /// Any other type, by name. It has no coercion.
    Other(&'static str),
}

impl StaticType {
    pub fn semantic_type(self) -> SemanticType {
        match self {
            StaticType::Int32 => SemanticType::Integer,
            StaticType::Decimal => SemanticType::Decimal,
            StaticType::Bool => SemanticType::Boolean,
            StaticType::DateTime => SemanticType::DateTime,
            StaticType::String => SemanticType::String,
            StaticType::Other(name) => SemanticType::Unsupported(name),
        }
    }
}

/// Explicit mapping metadata on a field (`#[mappable(decimal, required)]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MappableAttribute {
    pub semantic_type: SemanticType,
    pub required: bool,
}

/// One public field of a target type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldInfo {
    /// Name used as the record key.
    pub name: &'static str,
    pub static_type: StaticType,
    /// The field is an `Option<_>`.
    pub nullable: bool,
    pub attribute: Option<MappableAttribute>,
}

/// Failure to read or write a field by name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlotError {
    #[error("no field named {0}")]
    NoSuchField(String),
    #[error("field of type {expected} cannot hold a {found} value")]
    TypeMismatch {
        expected: &'static str,
        found: SemanticType,
    },
}

pub type Getter<T> = fn(&T) -> Option<Value>;
pub type Setter<T> = fn(&mut T, Value) -> Result<(), SlotError>;

/// Direct get/set functions for one field of `T`.
pub struct FieldBinding<T> {
    pub name: &'static str,
    pub get: Getter<T>,
    pub set: Setter<T>,
}

impl<T> Clone for FieldBinding<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FieldBinding<T> {}

/// Compile-time description of a mappable target type.
pub trait Reflect: Default + Send + Sync + 'static {
    /// Type name used in error messages.
    const TYPE_NAME: &'static str;

    const DISCOVERY: Discovery;

    /// Public fields in declaration order. Names are unique; a repeated
    /// name is ignored after its first entry.
    fn field_infos() -> &'static [FieldInfo];

    /// Assigns `value` to the field called `name`, checking its type.
    fn set_field(&mut self, name: &str, value: Value) -> Result<(), SlotError>;

    /// Reads the field called `name`; `Ok(None)` means unset.
    fn get_field(&self, name: &str) -> Result<Option<Value>, SlotError>;

    /// One binding per entry of [`Reflect::field_infos`]. Fields left out
    /// are reached through [`Reflect::set_field`] and [`Reflect::get_field`].
    fn field_bindings() -> Vec<FieldBinding<Self>>;
}
