//! Overlay show/hide state and view updates
//!
//! The overlay is either hidden or shown. Taps toggle it; with autohide a
//! shown overlay asks the platform for a hide timer. Weather tuples are
//! always stored, but only produce a view refresh while the overlay is on
//! screen.

use core::fmt::Write;

use heapless::String;

use crate::settings::{QtpSettings, WINDOW_TIMEOUT_MS};
use crate::weather::{TupleValue, WeatherError, WeatherIcon, WeatherKey, WeatherState};

/// Overlay visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OverlayState {
    Hidden,
    Shown,
}

/// What the platform must do after an input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OverlayAction {
    /// Build and push the overlay window
    Show {
        /// Start a hide timer of this length
        autohide_ms: Option<u32>,
    },
    /// Pop and free the overlay window
    Hide {
        /// Cancel the pending hide timer
        cancel_timer: bool,
    },
    /// Nothing to do
    None,
}

/// Layer that must be refreshed on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewUpdate<'a> {
    Temperature(&'a str),
    Description(&'a str),
    Icon(WeatherIcon),
}

/// Quick Tap Plus overlay
#[derive(Debug, Clone)]
pub struct Overlay {
    settings: QtpSettings,
    state: OverlayState,
    weather: WeatherState,
}

impl Overlay {
    pub fn new(settings: QtpSettings) -> Self {
        Self {
            settings,
            state: OverlayState::Hidden,
            weather: WeatherState::new(),
        }
    }

    pub fn settings(&self) -> QtpSettings {
        self.settings
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn is_showing(&self) -> bool {
        self.state == OverlayState::Shown
    }

    pub fn weather(&self) -> &WeatherState {
        &self.weather
    }

    /// Wrist flick: toggle the overlay
    pub fn on_tap(&mut self) -> OverlayAction {
        match self.state {
            OverlayState::Hidden => self.show(),
            OverlayState::Shown => self.hide(true),
        }
    }

    /// Back button while shown
    pub fn on_back(&mut self) -> OverlayAction {
        match self.state {
            OverlayState::Shown => self.hide(true),
            OverlayState::Hidden => OverlayAction::None,
        }
    }

    /// Autohide timer fired
    pub fn on_timeout(&mut self) -> OverlayAction {
        match self.state {
            OverlayState::Shown => self.hide(false),
            OverlayState::Hidden => {
                debug!("QTP: timeout while hidden ignored");
                OverlayAction::None
            }
        }
    }

    /// Store a weather tuple and report the layer to refresh, if any
    pub fn on_weather_update(
        &mut self,
        key: u32,
        value: TupleValue<'_>,
    ) -> Result<Option<ViewUpdate<'_>>, WeatherError> {
        let key = WeatherKey::from_key(key).ok_or(WeatherError::UnknownKey(key))?;
        if !self.settings.show_weather() {
            debug!("QTP: weather disabled, tuple ignored");
            return Ok(None);
        }

        self.weather.apply(key, value)?;
        debug!("QTP: weather {} received", key);
        if !self.is_showing() {
            return Ok(None);
        }

        let degrees_f = self.settings.degrees_f();
        Ok(match key {
            WeatherKey::TemperatureF if degrees_f => Some(ViewUpdate::Temperature(&self.weather.temperature_f)),
            WeatherKey::TemperatureC if !degrees_f => Some(ViewUpdate::Temperature(&self.weather.temperature_c)),
            WeatherKey::Description => Some(ViewUpdate::Description(&self.weather.description)),
            WeatherKey::Icon => Some(ViewUpdate::Icon(self.weather.icon)),
            _ => None,
        })
    }

    /// Weather sync failed: show the temperature placeholder
    pub fn on_sync_error(&mut self) -> Option<ViewUpdate<'_>> {
        warn!("QTP: weather sync error");
        self.weather.reset_temperature();
        if !self.is_showing() {
            return None;
        }
        Some(ViewUpdate::Temperature(self.weather.temperature(self.settings.degrees_f())))
    }

    fn show(&mut self) -> OverlayAction {
        self.state = OverlayState::Shown;
        let autohide_ms = self.settings.autohide().then_some(WINDOW_TIMEOUT_MS);
        OverlayAction::Show { autohide_ms }
    }

    fn hide(&mut self, timer_pending: bool) -> OverlayAction {
        self.state = OverlayState::Hidden;
        OverlayAction::Hide {
            cancel_timer: timer_pending && self.settings.autohide(),
        }
    }
}

/// Battery row text, e.g. "87%"
pub fn battery_text(percent: u8) -> String<8> {
    let mut text = String::new();
    // At most "255%", always fits
    let _ = write!(text, "{}%", percent);
    text
}

/// Bluetooth row text
pub fn bluetooth_text(connected: bool) -> &'static str {
    if connected {
        "Paired"
    } else {
        "Not Paired"
    }
}

/// Clock row text, "21:05" or "9:05 PM"
pub fn clock_text(hour: u8, minute: u8, is_24h: bool) -> String<8> {
    let mut text = String::new();
    if is_24h {
        let _ = write!(text, "{:02}:{:02}", hour, minute);
    } else {
        let display = match hour % 12 {
            0 => 12,
            h => h,
        };
        let suffix = if hour < 12 { "AM" } else { "PM" };
        let _ = write!(text, "{}:{:02} {}", display, minute, suffix);
    }
    text
}
