//! Platform-agnostic core for the Revolution watchfaces
//!
//! This crate contains all watchface logic that does not depend on a
//! specific watch platform:
//!
//! - Platform capability traits (compositor, image provider, animation
//!   scheduler, clock)
//! - Slot pool with strict load/unload pairing of digit images
//! - Digit resource tables
//! - Per-slot slide animation state machine
//! - Time decomposition into per-slot digits
//! - Watchface configuration, presets and persistence
//!
//! The platform port owns the event loop. It forwards tick and
//! animation-stopped events to [`Watchface`] and implements the traits in
//! [`traits`] on top of its window and bitmap services.

#![no_std]
#![deny(unsafe_code)]

// proptest's assertion macros expand to `format!`
#[cfg(test)]
#[macro_use]
extern crate std;

#[macro_use]
mod fmt;

pub mod animator;
pub mod config;
pub mod display;
pub mod error;
pub mod geometry;
pub mod resources;
pub mod slot;
pub mod time;
pub mod traits;
pub mod watchface;

#[cfg(test)]
mod mock;

pub use error::SlotError;
pub use geometry::Rect;
pub use time::{TickUnits, TimeSnapshot};
pub use watchface::Watchface;
