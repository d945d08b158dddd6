//! Digit image resources
//!
//! Maps logical digit values to bundled bitmap resources and keeps track of
//! how many images are currently decoded.
//!
//! The watch has room for only a handful of decoded bitmaps, so nothing is
//! cached across slots: each visible slot decodes its own image and frees
//! it as soon as its value changes. The "cache" therefore has a capacity
//! equal to the number of on-screen slots.

use crate::error::SlotError;
use crate::traits::{ImageHandle, ImageProvider, ResourceId};

/// Image set a slot draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ImageCategory {
    /// Large 70x70 hour/minute digits
    Time,
    /// 20x20 day/month digits
    Date,
    /// 10x10 year or seconds digits
    Year,
    /// 20x10 weekday labels
    Day,
}

/// Number of images per category
pub const NUMBER_OF_TIME_IMAGES: usize = 10;
pub const NUMBER_OF_DATE_IMAGES: usize = 10;
pub const NUMBER_OF_YEAR_IMAGES: usize = 10;
pub const NUMBER_OF_DAY_IMAGES: usize = 7;

/// Resource id of the menu icon; digit resources follow it
pub const RESOURCE_ID_MENU_ICON: ResourceId = ResourceId(0);

const fn resource_table<const N: usize>(first: u16) -> [ResourceId; N] {
    let mut table = [ResourceId(0); N];
    let mut i = 0;
    while i < N {
        table[i] = ResourceId(first + i as u16);
        i += 1;
    }
    table
}

pub const TIME_IMAGE_RESOURCE_IDS: [ResourceId; NUMBER_OF_TIME_IMAGES] = resource_table(1);
pub const DATE_IMAGE_RESOURCE_IDS: [ResourceId; NUMBER_OF_DATE_IMAGES] = resource_table(11);
pub const YEAR_IMAGE_RESOURCE_IDS: [ResourceId; NUMBER_OF_YEAR_IMAGES] = resource_table(21);
pub const DAY_IMAGE_RESOURCE_IDS: [ResourceId; NUMBER_OF_DAY_IMAGES] = resource_table(31);

impl ImageCategory {
    /// Static resource table of this category
    pub fn table(self) -> &'static [ResourceId] {
        match self {
            ImageCategory::Time => &TIME_IMAGE_RESOURCE_IDS,
            ImageCategory::Date => &DATE_IMAGE_RESOURCE_IDS,
            ImageCategory::Year => &YEAR_IMAGE_RESOURCE_IDS,
            ImageCategory::Day => &DAY_IMAGE_RESOURCE_IDS,
        }
    }

    /// Number of valid values (digits 0-9, or weekdays 0-6)
    pub fn len(self) -> u8 {
        self.table().len() as u8
    }

    /// Check whether `value` has an image in this category
    pub fn contains(self, value: u8) -> bool {
        value < self.len()
    }

    /// Look up the resource for `value`
    pub fn resource_id(self, value: u8) -> Result<ResourceId, SlotError> {
        self.table()
            .get(value as usize)
            .copied()
            .ok_or(SlotError::InvalidDigit {
                category: self,
                value,
            })
    }
}

/// Digit image loader with an outstanding-image counter
///
/// Every successful [`acquire`](Self::acquire) must be paired with exactly
/// one [`release`](Self::release). Only the slot pool calls these, which is
/// what guarantees the pairing.
#[derive(Debug, Default)]
pub struct DigitResourceCache {
    /// Images acquired and not yet released
    outstanding: u8,
    /// Highest `outstanding` value seen
    peak: u8,
}

impl DigitResourceCache {
    /// Create an empty cache
    pub const fn new() -> Self {
        Self {
            outstanding: 0,
            peak: 0,
        }
    }

    /// Decode the image for `(category, value)`
    pub(crate) fn acquire<I: ImageProvider>(
        &mut self,
        images: &mut I,
        category: ImageCategory,
        value: u8,
    ) -> Result<ImageHandle, SlotError> {
        let resource = category.resource_id(value)?;
        let handle = images.load(resource)?;

        self.outstanding = self.outstanding.saturating_add(1);
        self.peak = self.peak.max(self.outstanding);
        trace!("acquired resource {} ({} outstanding)", resource.0, self.outstanding);

        Ok(handle)
    }

    /// Free an image obtained from [`acquire`](Self::acquire)
    pub(crate) fn release<I: ImageProvider>(&mut self, images: &mut I, handle: ImageHandle) {
        images.unload(handle);
        self.outstanding = self.outstanding.saturating_sub(1);
        trace!("released image ({} outstanding)", self.outstanding);
    }

    /// Number of images currently decoded
    pub fn outstanding(&self) -> u8 {
        self.outstanding
    }

    /// Highest number of images decoded at the same time
    pub fn peak(&self) -> u8 {
        self.peak
    }
}
