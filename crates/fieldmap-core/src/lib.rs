//! Mapping of string-keyed records onto typed Rust values.
//!
//! A [`Record`] is an ordered list of field names with optional raw string
//! values, as produced by form posts, CSV rows or key/value configuration.
//! [`map`] turns one into a fresh instance of a [`Reflect`] type, coercing
//! each value to the field's semantic type and enforcing required fields.
//!
//! Four [`Strategy`] values produce identical results and differ only in
//! cost: a hand-written mapper, discovery on every call, cached discovery,
//! and cached direct accessors.

pub mod accessor;
pub mod batch;
pub mod coerce;
pub mod decimal;
pub mod error;
pub mod mapper;
pub mod marked;
pub mod options;
pub mod record;
pub mod reflect;
pub mod registry;
pub mod source;
pub mod value;

mod type_cache;

#[cfg(test)]
pub(crate) mod testing;

pub use accessor::{Accessor, AccessorLookup, AccessorTable, resolve_accessors};
pub use batch::{BatchOutcome, RecordFailure, map_batch};
pub use coerce::{coerce, format_value, is_blank};
pub use decimal::{Decimal, ParseDecimalError};
pub use error::{MappingError, MappingErrorKind, Result};
pub use mapper::{
    ManualMap, Mappable, Strategy, ensure_present, map, map_cached, map_declarative, map_manual,
    map_with_accessors,
};
pub use marked::{MarkedValues, enumerate_marked_values};
pub use options::BatchOptions;
pub use record::Record;
pub use reflect::{Discovery, Reflect};
pub use registry::{FieldDescriptor, FieldTable, describe_fields, describe_fields_uncached};
pub use source::{SourceError, read_csv_path, read_csv_records};
pub use value::{SemanticType, Value};
