//! Watchface configuration
//!
//! Every Revolution variant runs the same core; they differ only in the
//! values below. Configuration is persisted as postcard-serialized bytes
//! (see [`persist`](super::persist)).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::time::TickUnits;

/// Shortest accepted slide duration (ms)
pub const MIN_ANIMATION_DURATION_MS: u16 = 100;

/// Longest accepted slide duration (ms)
pub const MAX_ANIMATION_DURATION_MS: u16 = 2000;

/// Order of the two date parts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DateFormat {
    /// Month then day (12 09)
    #[default]
    American,
    /// Day then month (09 12)
    European,
}

/// What a busy slot does with a new value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BusyPolicy {
    /// Remember the latest value and show it once the slot settles
    #[default]
    QueueLatest,
    /// Discard the value; the slot shows it only if it is requested again
    Drop,
}

/// Errors from configuration validation and persistence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Stored bytes are not a valid configuration
    Deserialize,
    /// Output buffer too small
    Serialize,
    /// Stored configuration was written by another version
    VersionMismatch { found: u16, expected: u16 },
    /// Slide duration outside the accepted range
    InvalidDuration(u16),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Deserialize => write!(f, "stored configuration is corrupt"),
            Self::Serialize => write!(f, "configuration does not fit the buffer"),
            Self::VersionMismatch { found, expected } => {
                write!(f, "configuration version {found}, expected {expected}")
            }
            Self::InvalidDuration(ms) => write!(
                f,
                "animation duration {ms} ms outside {MIN_ANIMATION_DURATION_MS}..={MAX_ANIMATION_DURATION_MS}"
            ),
        }
    }
}

impl core::error::Error for ConfigError {}

/// Per-variant watchface settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WatchfaceConfig {
    /// Slide time digits in and out when they change
    pub animation_enabled: bool,
    /// Duration of each slide half (ms)
    pub animation_duration_ms: u16,
    /// Order of month and day
    pub date_format: DateFormat,
    /// Show the two-digit year instead of the seconds
    pub show_year_instead_of_seconds: bool,
    /// White on black instead of black on white
    pub invert_colors: bool,
    /// Leave the hour tens slot blank when its digit is 0
    pub hide_leading_zero: bool,
    /// Handling of updates to a slot that is still sliding
    pub busy_policy: BusyPolicy,
}

impl Default for WatchfaceConfig {
    fn default() -> Self {
        Self::revolution()
    }
}

impl WatchfaceConfig {
    /// Animated face with seconds
    pub const fn revolution() -> Self {
        Self {
            animation_enabled: true,
            animation_duration_ms: 500,
            date_format: DateFormat::American,
            show_year_instead_of_seconds: false,
            invert_colors: false,
            hide_leading_zero: false,
            busy_policy: BusyPolicy::QueueLatest,
        }
    }

    /// Static face, minute ticks only
    pub const fn revolution_lite() -> Self {
        Self {
            animation_enabled: false,
            animation_duration_ms: 500,
            date_format: DateFormat::American,
            show_year_instead_of_seconds: true,
            invert_colors: false,
            hide_leading_zero: true,
            busy_policy: BusyPolicy::QueueLatest,
        }
    }

    /// Animated face with day before month
    pub const fn revolution_european() -> Self {
        Self {
            date_format: DateFormat::European,
            ..Self::revolution()
        }
    }

    /// Check values that the type system does not
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ms = self.animation_duration_ms;
        if !(MIN_ANIMATION_DURATION_MS..=MAX_ANIMATION_DURATION_MS).contains(&ms) {
            return Err(ConfigError::InvalidDuration(ms));
        }
        Ok(())
    }

    /// Tick granularity the face needs from the platform
    pub const fn tick_units(&self) -> TickUnits {
        if self.show_year_instead_of_seconds {
            TickUnits::MINUTE
        } else {
            TickUnits::SECOND
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        for config in [
            WatchfaceConfig::revolution(),
            WatchfaceConfig::revolution_lite(),
            WatchfaceConfig::revolution_european(),
        ] {
            assert_eq!(config.validate(), Ok(()));
        }
    }

    #[test]
    fn test_european_differs_only_in_date_format() {
        let european = WatchfaceConfig::revolution_european();
        assert_eq!(european.date_format, DateFormat::European);
        assert_eq!(
            WatchfaceConfig {
                date_format: DateFormat::American,
                ..european
            },
            WatchfaceConfig::revolution()
        );
    }

    #[test]
    fn test_duration_bounds() {
        let mut config = WatchfaceConfig::revolution();
        config.animation_duration_ms = 99;
        assert_eq!(config.validate(), Err(ConfigError::InvalidDuration(99)));
        config.animation_duration_ms = 2001;
        assert_eq!(config.validate(), Err(ConfigError::InvalidDuration(2001)));
        config.animation_duration_ms = 100;
        assert_eq!(config.validate(), Ok(()));
        config.animation_duration_ms = 2000;
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_tick_units() {
        assert_eq!(WatchfaceConfig::revolution().tick_units(), TickUnits::SECOND);
        assert_eq!(WatchfaceConfig::revolution_lite().tick_units(), TickUnits::MINUTE);
    }
}
