//! Drawing surface trait

use super::image::ImageHandle;
use crate::geometry::Rect;

/// Identifier of a platform layer
///
/// Each slot owns one surface; each slot group has a parent surface the
/// slot surfaces are children of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SurfaceId(pub u8);

/// Trait for placing images on layers
///
/// No drawing logic is required beyond placement. All frames are in screen
/// coordinates.
pub trait Compositor {
    /// Attach an image to a surface, occupying `frame` when the surface is at rest
    fn attach_image(&mut self, surface: SurfaceId, image: &ImageHandle, frame: Rect);

    /// Detach an image from its surface
    fn detach_image(&mut self, surface: SurfaceId, image: &ImageHandle);

    /// Move a surface
    fn set_frame(&mut self, surface: SurfaceId, frame: Rect);

    /// Invert the colors of the whole window
    fn set_inverted(&mut self, _inverted: bool) {}
}
