//! Display slots
//!
//! A slot is a fixed-position layer showing at most one digit image. Slots
//! are grouped by the calendar field they display and owned by a
//! [`SlotPool`] for the lifetime of the watchface.

pub mod pool;

pub use pool::{Slot, SlotGroup, SlotPool};

use crate::resources::ImageCategory;

/// Maximum slots in one group
pub const MAX_SLOTS_PER_GROUP: usize = 4;

/// Maximum slots across all groups
pub const MAX_SLOTS: usize = MAX_SLOTS_PER_GROUP * GroupKind::ALL.len();

/// Slot group, one per displayed calendar field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GroupKind {
    /// Hour tens/ones and minute tens/ones
    Time,
    /// Month and day of month, order set by the date format
    Date,
    /// Two digits of the year or of the seconds
    Year,
    /// Weekday label
    Day,
}

impl GroupKind {
    /// All groups, in storage order
    pub const ALL: [GroupKind; 4] = [
        GroupKind::Time,
        GroupKind::Date,
        GroupKind::Year,
        GroupKind::Day,
    ];

    /// Storage index of the group
    pub const fn index(self) -> usize {
        match self {
            GroupKind::Time => 0,
            GroupKind::Date => 1,
            GroupKind::Year => 2,
            GroupKind::Day => 3,
        }
    }

    /// Image set the group's slots draw from
    pub const fn category(self) -> ImageCategory {
        match self {
            GroupKind::Time => ImageCategory::Time,
            GroupKind::Date => ImageCategory::Date,
            GroupKind::Year => ImageCategory::Year,
            GroupKind::Day => ImageCategory::Day,
        }
    }

    /// Number of slots in the group
    pub const fn slot_count(self) -> usize {
        match self {
            GroupKind::Time | GroupKind::Date => 4,
            GroupKind::Year => 2,
            GroupKind::Day => 1,
        }
    }
}

/// Address of a slot: its group and its index within the group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SlotId {
    pub group: GroupKind,
    pub index: u8,
}

impl SlotId {
    pub const fn new(group: GroupKind, index: u8) -> Self {
        Self { group, index }
    }

    /// Time group slot (0 hour tens, 1 hour ones, 2 minute tens, 3 minute ones)
    pub const fn time(index: u8) -> Self {
        Self::new(GroupKind::Time, index)
    }

    /// Flat index across all groups, unique per slot
    pub const fn linear(self) -> usize {
        self.group.index() * MAX_SLOTS_PER_GROUP + self.index as usize
    }
}

/// Outcome of a slot update request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SlotUpdate {
    /// Slot already showed the requested value; nothing was touched
    Unchanged,
    /// Image swapped in place without animation
    Replaced,
    /// A slide transition was started
    SlideStarted,
    /// Slot is animating; the value will be applied when it settles
    Deferred,
    /// Slot is animating; the value was discarded
    Dropped,
}

impl SlotUpdate {
    /// Check whether the request changed what the slot shows or will show
    pub const fn is_change(self) -> bool {
        matches!(self, SlotUpdate::Replaced | SlotUpdate::SlideStarted)
    }
}
