//! Slide animation of time digits
//!
//! Drives the two-phase slide of each animated slot. Progress comes only
//! from animation-stopped events delivered by the platform.

pub mod machine;

pub use machine::{AnimationState, SlotAnimator};
