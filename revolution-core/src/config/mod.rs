//! Watchface configuration and screen layout

pub mod layout;
#[cfg(feature = "serde")]
pub mod persist;
pub mod types;

pub use layout::{GroupLayout, ScreenLayout, SlotSpec, REVOLUTION_LAYOUT};
pub use types::*;
