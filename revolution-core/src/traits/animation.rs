//! Animation scheduler trait
//!
//! Animations are fire-and-forget. The platform moves the surface on its
//! own timer and later hands the [`AnimationToken`] back to
//! [`Watchface::on_animation_stopped`](crate::Watchface::on_animation_stopped).
//! That completion is the only resumption point of the slide state machine.

use super::compositor::SurfaceId;
use crate::geometry::Rect;
use crate::slot::SlotId;

/// Which half of a slide an animation belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SlidePhase {
    /// Resting frame to exit frame
    Out,
    /// Entry frame to resting frame
    In,
}

/// Completion tag carried by every scheduled animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnimationToken {
    /// Slot being animated
    pub slot: SlotId,
    /// Slide half
    pub phase: SlidePhase,
}

impl AnimationToken {
    /// Token for a slide-out
    pub const fn slide_out(slot: SlotId) -> Self {
        Self {
            slot,
            phase: SlidePhase::Out,
        }
    }

    /// Token for a slide-in
    pub const fn slide_in(slot: SlotId) -> Self {
        Self {
            slot,
            phase: SlidePhase::In,
        }
    }
}

/// Trait for the platform animation scheduler
pub trait AnimationScheduler {
    /// Linearly move `surface` from `from` to `to` over `duration_ms`
    ///
    /// When the animation stops (finished or cancelled) the platform must
    /// deliver `token` back to the watchface exactly once, unless the
    /// animation was removed with [`unschedule`](Self::unschedule).
    fn animate(&mut self, surface: SurfaceId, from: Rect, to: Rect, duration_ms: u16, token: AnimationToken);

    /// Remove a scheduled animation; its token must not be delivered afterwards
    fn unschedule(&mut self, token: AnimationToken);
}
