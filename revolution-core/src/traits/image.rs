//! Bitmap image provider trait

/// Identifier of a bitmap resource bundled with the watchface
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ResourceId(pub u16);

/// Errors that can occur when loading an image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ImageError {
    /// Not enough heap for the decoded bitmap
    OutOfMemory,
    /// Resource id not present in the app bundle
    UnknownResource,
}

/// Handle to platform-allocated pixel memory
///
/// Deliberately neither `Clone` nor `Copy`: the only way to free the
/// memory is to move the handle into [`ImageProvider::unload`], so a handle
/// can be released at most once.
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ImageHandle {
    raw: u32,
}

impl ImageHandle {
    /// Wrap a platform handle value
    ///
    /// Only image providers should create handles.
    pub const fn new(raw: u32) -> Self {
        Self { raw }
    }

    /// Platform handle value
    pub const fn raw(&self) -> u32 {
        self.raw
    }
}

/// Trait for loading and freeing bitmap images
pub trait ImageProvider {
    /// Decode a bundled resource into a new image
    fn load(&mut self, resource: ResourceId) -> Result<ImageHandle, ImageError>;

    /// Free the image's pixel memory
    fn unload(&mut self, image: ImageHandle);
}
