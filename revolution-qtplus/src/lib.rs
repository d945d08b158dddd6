//! Quick Tap Plus overlay
//!
//! A status screen pushed over the watchface when the wrist is flicked.
//! It shows battery charge, bluetooth connection, and optionally the time
//! and the current weather pushed from the phone:
//!
//! ```text
//! ┌──────────────────────┐
//! │       12:34          │  optional clock row
//! │ [bat]  87%           │
//! │ [bt]   Paired        │
//! │ [icon] 71.6°F        │  optional weather row
//! │        Clouds        │
//! └──────────────────────┘
//! ```
//!
//! This crate holds the overlay's logic only: settings flags, the
//! show/hide/autohide state machine, the weather channel and the row
//! layout. The platform port owns the window, timers and text layers, and
//! acts on the [`OverlayAction`] and [`ViewUpdate`] values returned here.

#![no_std]
#![deny(unsafe_code)]

// proptest's assertion macros expand to `format!`
#[cfg(test)]
#[macro_use]
extern crate std;

#[macro_use]
mod fmt;

pub mod overlay;
pub mod settings;
pub mod weather;

pub use overlay::{battery_text, bluetooth_text, clock_text, Overlay, OverlayAction, ViewUpdate};
pub use settings::{OverlayLayout, QtpSettings};
pub use weather::{icon_for_condition, TupleValue, WeatherError, WeatherIcon, WeatherKey, WeatherState};
