//! Enumeration of marker-tagged associated constants.
//!
//! `#[marked_values]` (from `fieldmap-derive`) on an inherent `impl` block
//! collects its public constants of type `Self` and implements
//! [`MarkedValues`] with them:
//!
//! ```ignore
//! #[marked_values]
//! impl Status {
//!     pub const ACTIVE: Status = Status::new(1, "Active");
//!     pub const DELETED: Status = Status::new(2, "Deleted");
//! }
//!
//! assert_eq!(enumerate_marked_values::<Status>(), &[Status::ACTIVE, Status::DELETED]);
//! ```

/// A type whose marked constants can be listed.
pub trait MarkedValues: Sized + 'static {
    /// Marked constants in declaration order.
    fn items() -> &'static [Self];
}

/// Returns every marked constant of `T`, in declaration order.
pub fn enumerate_marked_values<T: MarkedValues>() -> &'static [T] {
    T::items()
}
