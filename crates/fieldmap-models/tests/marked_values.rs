use fieldmap_core::{MarkedValues, enumerate_marked_values};
use fieldmap_derive::marked_values;
use fieldmap_models::RecordStatus;

#[test]
fn lists_public_constants_in_declaration_order() {
    let names: Vec<_> = enumerate_marked_values::<RecordStatus>()
        .iter()
        .map(|status| status.name)
        .collect();
    assert_eq!(names, ["Active", "Deleted", "Archived"]);
    assert_eq!(RecordStatus::MARKED_VALUES, RecordStatus::items());
}

#[test]
fn enumeration_is_stable() {
    assert_eq!(
        enumerate_marked_values::<RecordStatus>(),
        enumerate_marked_values::<RecordStatus>()
    );
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Priority(u8);

#[marked_values]
impl Priority {
    pub const LOW: Priority = Priority(1);
    pub const HIGH: Self = Priority(9);
    pub const LEVELS: u8 = 2;
    pub const MEDIUM: Priority = Priority(5);

    pub fn is_urgent(&self) -> bool {
        self.0 > 5
    }
}

#[test]
fn other_items_in_the_block_are_kept_but_not_listed() {
    assert_eq!(
        enumerate_marked_values::<Priority>(),
        &[Priority::LOW, Priority::HIGH, Priority::MEDIUM]
    );
    assert_eq!(Priority::LEVELS, 2);
    assert!(Priority::HIGH.is_urgent());
}

#[derive(Debug, PartialEq)]
pub struct Empty;

#[marked_values]
impl Empty {}

#[test]
fn types_without_constants_list_nothing() {
    assert!(enumerate_marked_values::<Empty>().is_empty());
}
