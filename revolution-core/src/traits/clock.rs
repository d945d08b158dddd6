//! Wall clock trait

use crate::time::TimeSnapshot;

/// Trait for reading the platform clock
///
/// Both calls must be cheap and synchronous; they are made on every tick.
pub trait Clock {
    /// Current local time
    fn now(&self) -> TimeSnapshot;

    /// Whether the user selected 24-hour display
    fn is_24h_format(&self) -> bool;
}
