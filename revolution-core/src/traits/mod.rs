//! Platform capability traits
//!
//! These traits define the interface between the watchface logic and the
//! platform services it runs on (layer compositor, bitmap loader,
//! animation scheduler, wall clock).

pub mod animation;
pub mod clock;
pub mod compositor;
pub mod image;

pub use animation::{AnimationScheduler, AnimationToken, SlidePhase};
pub use clock::Clock;
pub use compositor::{Compositor, SurfaceId};
pub use image::{ImageError, ImageHandle, ImageProvider, ResourceId};

/// Everything a watchface needs from the platform
///
/// Implemented automatically for any type providing all four capabilities.
pub trait Platform: Compositor + ImageProvider + AnimationScheduler + Clock {}

impl<T: Compositor + ImageProvider + AnimationScheduler + Clock> Platform for T {}
