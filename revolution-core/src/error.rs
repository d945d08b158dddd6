//! Slot error type

use crate::resources::ImageCategory;
use crate::slot::SlotId;
use crate::traits::ImageError;

/// Errors from slot loading and updating
///
/// All failures are local to one slot. Callers updating several slots on
/// the same tick log the error and carry on with the remaining slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SlotError {
    /// Value outside the image table of its category
    ///
    /// Only a decomposition bug can produce this; nothing was changed.
    InvalidDigit {
        /// Category of the slot
        category: ImageCategory,
        /// Rejected value
        value: u8,
    },
    /// Load requested on a slot that still holds an image
    ///
    /// Contract violation: the slot must be unloaded (or slid out) first.
    SlotOccupied(SlotId),
    /// Slot id not allocated in the pool
    UnknownSlot(SlotId),
    /// Platform could not load the image; the slot is left empty
    ImageLoad(ImageError),
}

impl From<ImageError> for SlotError {
    fn from(e: ImageError) -> Self {
        SlotError::ImageLoad(e)
    }
}

impl core::fmt::Display for SlotError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidDigit { category, value } => {
                write!(f, "invalid value {value} for {category:?} images")
            }
            Self::SlotOccupied(id) => write!(f, "slot {:?}/{} already holds an image", id.group, id.index),
            Self::UnknownSlot(id) => write!(f, "slot {:?}/{} not allocated", id.group, id.index),
            Self::ImageLoad(e) => write!(f, "image load failed: {e:?}"),
        }
    }
}

impl core::error::Error for SlotError {}
