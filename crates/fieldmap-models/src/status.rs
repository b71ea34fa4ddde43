use std::fmt;

use fieldmap_core::enumerate_marked_values;
use fieldmap_derive::marked_values;

/// Lifecycle state of a mapped record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordStatus {
    pub code: i32,
    pub name: &'static str,
}

#[marked_values]
impl RecordStatus {
    pub const ACTIVE: RecordStatus = RecordStatus::new(1, "Active");
    pub const DELETED: RecordStatus = RecordStatus::new(2, "Deleted");
    pub const ARCHIVED: Self = RecordStatus::new(3, "Archived");

    /// Placeholder for codes that match no marked status.
    const UNKNOWN: RecordStatus = RecordStatus::new(0, "Unknown");

    pub const fn new(code: i32, name: &'static str) -> Self {
        Self { code, name }
    }

    /// Looks a status up by code among the marked statuses.
    pub fn from_code(code: i32) -> Self {
        enumerate_marked_values::<RecordStatus>()
            .iter()
            .copied()
            .find(|status| status.code == code)
            .unwrap_or(Self::UNKNOWN)
    }

    pub fn is_known(&self) -> bool {
        *self != Self::UNKNOWN
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
