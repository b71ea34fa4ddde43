//! Sample target types for `fieldmap-core`.
//!
//! [`Model`] uses declarative discovery, [`InferredModel`] inferred
//! discovery; both come with hand-written mappers so that every
//! [`Strategy`](fieldmap_core::Strategy) applies to them. [`map_record`]
//! selects the type by [`TargetTypeTag`].

pub mod fixtures;
pub mod inferred;
pub mod model;
pub mod status;
pub mod target;

mod manual;

pub use inferred::InferredModel;
pub use model::Model;
pub use status::RecordStatus;
pub use target::{MappedInstance, TargetTypeTag, map_record};
