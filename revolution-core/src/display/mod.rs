//! Display update dispatch

pub mod updater;

pub use updater::{decompose_two_digit, DisplayUpdater, TickReport, UpdateContext};
