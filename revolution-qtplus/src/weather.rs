//! Weather channel
//!
//! The phone pushes weather as key/value tuples. Integer keys carry the
//! icon, string keys carry preformatted text ("71.6°F").

use heapless::String;

/// Maximum temperature text length in bytes
pub const MAX_TEMPERATURE_LEN: usize = 16;
/// Maximum city name length in bytes
pub const MAX_CITY_LEN: usize = 24;
/// Maximum description length in bytes
pub const MAX_DESCRIPTION_LEN: usize = 32;

/// Shown until the first temperature arrives
pub const TEMPERATURE_PLACEHOLDER_F: &str = "---\u{B0}F";
pub const TEMPERATURE_PLACEHOLDER_C: &str = "---\u{B0}C";
/// Shown after a sync error
pub const TEMPERATURE_SYNC_ERROR: &str = "--\u{B0}F";

/// Tuple keys of the weather channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WeatherKey {
    /// Icon index (integer)
    Icon,
    /// Temperature in Fahrenheit (string)
    TemperatureF,
    /// City name (string)
    City,
    /// Short description (string)
    Description,
    /// Temperature in Celsius (string)
    TemperatureC,
}

// Wire values
const KEY_ICON: u32 = 0x0;
const KEY_TEMP_F: u32 = 0x1;
const KEY_CITY: u32 = 0x2;
const KEY_DESC: u32 = 0x3;
const KEY_TEMP_C: u32 = 0x4;

impl WeatherKey {
    /// Parse a key from its wire value
    pub fn from_key(key: u32) -> Option<Self> {
        match key {
            KEY_ICON => Some(WeatherKey::Icon),
            KEY_TEMP_F => Some(WeatherKey::TemperatureF),
            KEY_CITY => Some(WeatherKey::City),
            KEY_DESC => Some(WeatherKey::Description),
            KEY_TEMP_C => Some(WeatherKey::TemperatureC),
            _ => None,
        }
    }

    /// Convert to wire value
    pub fn to_key(self) -> u32 {
        match self {
            WeatherKey::Icon => KEY_ICON,
            WeatherKey::TemperatureF => KEY_TEMP_F,
            WeatherKey::City => KEY_CITY,
            WeatherKey::Description => KEY_DESC,
            WeatherKey::TemperatureC => KEY_TEMP_C,
        }
    }
}

/// Weather icon, in bundled resource order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WeatherIcon {
    ClearDay,
    ClearNight,
    AtmosphereNight,
    AtmosphereDay,
    Cloudy,
    Thunderstorm,
    Rain,
    Snow,
    /// No weather data
    None,
}

impl WeatherIcon {
    const ALL: [WeatherIcon; 9] = [
        WeatherIcon::ClearDay,
        WeatherIcon::ClearNight,
        WeatherIcon::AtmosphereNight,
        WeatherIcon::AtmosphereDay,
        WeatherIcon::Cloudy,
        WeatherIcon::Thunderstorm,
        WeatherIcon::Rain,
        WeatherIcon::Snow,
        WeatherIcon::None,
    ];

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn index(self) -> u8 {
        self as u8
    }
}

/// Map an OpenWeatherMap condition id to an icon
///
/// Ids past the known ranges map to clear sky.
pub fn icon_for_condition(condition: u16, is_day: bool) -> WeatherIcon {
    match condition {
        0..=100 if is_day => WeatherIcon::ClearDay,
        0..=100 => WeatherIcon::ClearNight,
        101..=232 => WeatherIcon::Thunderstorm,
        233..=600 => WeatherIcon::Rain,
        601..=700 => WeatherIcon::Snow,
        701..=800 if is_day => WeatherIcon::AtmosphereDay,
        701..=800 => WeatherIcon::AtmosphereNight,
        801..=900 => WeatherIcon::Cloudy,
        901..=949 => WeatherIcon::Thunderstorm,
        _ => WeatherIcon::ClearDay,
    }
}

/// Whether `now` falls between sunrise and sunset (unix seconds)
pub fn is_daytime(now: u64, sunrise: u64, sunset: u64) -> bool {
    now > sunrise && now < sunset
}

/// Value of a received tuple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TupleValue<'a> {
    Int(i32),
    Str(&'a str),
}

/// Errors from applying a weather tuple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WeatherError {
    /// Key not part of the weather channel
    UnknownKey(u32),
    /// Integer sent for a string key or the reverse
    WrongType(WeatherKey),
    /// Icon index outside the icon table
    InvalidIcon(i32),
    /// Text longer than the field
    TooLong(WeatherKey),
}

/// Last weather received from the phone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherState {
    pub icon: WeatherIcon,
    pub temperature_f: String<MAX_TEMPERATURE_LEN>,
    pub temperature_c: String<MAX_TEMPERATURE_LEN>,
    pub city: String<MAX_CITY_LEN>,
    pub description: String<MAX_DESCRIPTION_LEN>,
}

impl Default for WeatherState {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherState {
    /// Initial values shown before the phone answers
    pub fn new() -> Self {
        Self {
            icon: WeatherIcon::None,
            temperature_f: text(TEMPERATURE_PLACEHOLDER_F),
            temperature_c: text(TEMPERATURE_PLACEHOLDER_C),
            city: String::new(),
            description: String::new(),
        }
    }

    /// Store a received tuple
    ///
    /// A rejected tuple leaves the state unchanged.
    pub fn apply(&mut self, key: WeatherKey, value: TupleValue<'_>) -> Result<(), WeatherError> {
        match (key, value) {
            (WeatherKey::Icon, TupleValue::Int(raw)) => {
                self.icon = u8::try_from(raw)
                    .ok()
                    .and_then(WeatherIcon::from_index)
                    .ok_or(WeatherError::InvalidIcon(raw))?;
            }
            (WeatherKey::TemperatureF, TupleValue::Str(s)) => replace(&mut self.temperature_f, key, s)?,
            (WeatherKey::TemperatureC, TupleValue::Str(s)) => replace(&mut self.temperature_c, key, s)?,
            (WeatherKey::City, TupleValue::Str(s)) => replace(&mut self.city, key, s)?,
            (WeatherKey::Description, TupleValue::Str(s)) => replace(&mut self.description, key, s)?,
            (key, _) => return Err(WeatherError::WrongType(key)),
        }
        Ok(())
    }

    /// Temperature text in the selected unit
    pub fn temperature(&self, degrees_f: bool) -> &str {
        if degrees_f {
            &self.temperature_f
        } else {
            &self.temperature_c
        }
    }

    /// Replace both temperatures with the sync error placeholder
    pub fn reset_temperature(&mut self) {
        self.temperature_f = text(TEMPERATURE_SYNC_ERROR);
        self.temperature_c = text(TEMPERATURE_SYNC_ERROR);
    }
}

fn replace<const N: usize>(field: &mut String<N>, key: WeatherKey, value: &str) -> Result<(), WeatherError> {
    let mut next = String::new();
    next.push_str(value).map_err(|_| WeatherError::TooLong(key))?;
    *field = next;
    Ok(())
}

fn text<const N: usize>(s: &str) -> String<N> {
    let mut out = String::new();
    // Constants above all fit their fields
    let _ = out.push_str(s);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_key_roundtrip() {
        for raw in 0..5 {
            let key = WeatherKey::from_key(raw).unwrap();
            assert_eq!(key.to_key(), raw);
        }
        assert_eq!(WeatherKey::from_key(5), None);
    }

    #[test]
    fn test_icon_mapping() {
        assert_eq!(icon_for_condition(50, true), WeatherIcon::ClearDay);
        assert_eq!(icon_for_condition(50, false), WeatherIcon::ClearNight);
        assert_eq!(icon_for_condition(211, true), WeatherIcon::Thunderstorm);
        assert_eq!(icon_for_condition(301, true), WeatherIcon::Rain);
        assert_eq!(icon_for_condition(500, true), WeatherIcon::Rain);
        assert_eq!(icon_for_condition(600, true), WeatherIcon::Rain);
        assert_eq!(icon_for_condition(601, true), WeatherIcon::Snow);
        assert_eq!(icon_for_condition(701, true), WeatherIcon::AtmosphereDay);
        assert_eq!(icon_for_condition(800, false), WeatherIcon::AtmosphereNight);
        assert_eq!(icon_for_condition(803, false), WeatherIcon::Cloudy);
        assert_eq!(icon_for_condition(901, true), WeatherIcon::Thunderstorm);
        assert_eq!(icon_for_condition(950, true), WeatherIcon::ClearDay);
    }

    #[test]
    fn test_daytime() {
        assert!(is_daytime(1_000, 500, 2_000));
        assert!(!is_daytime(500, 500, 2_000));
        assert!(!is_daytime(3_000, 500, 2_000));
    }

    #[test]
    fn test_initial_state() {
        let state = WeatherState::new();
        assert_eq!(state.icon, WeatherIcon::None);
        assert_eq!(state.icon.index(), 8);
        assert_eq!(state.temperature(true), "---\u{B0}F");
        assert_eq!(state.temperature(false), "---\u{B0}C");
    }

    #[test]
    fn test_apply_values() {
        let mut state = WeatherState::new();
        state.apply(WeatherKey::Icon, TupleValue::Int(4)).unwrap();
        state.apply(WeatherKey::TemperatureF, TupleValue::Str("71.6\u{B0}F")).unwrap();
        state.apply(WeatherKey::Description, TupleValue::Str("Clouds")).unwrap();

        assert_eq!(state.icon, WeatherIcon::Cloudy);
        assert_eq!(state.temperature(true), "71.6\u{B0}F");
        assert_eq!(state.description.as_str(), "Clouds");
    }

    #[test]
    fn test_rejected_values_keep_state() {
        let mut state = WeatherState::new();
        assert_eq!(
            state.apply(WeatherKey::Icon, TupleValue::Int(9)),
            Err(WeatherError::InvalidIcon(9))
        );
        assert_eq!(
            state.apply(WeatherKey::Icon, TupleValue::Int(-1)),
            Err(WeatherError::InvalidIcon(-1))
        );
        assert_eq!(
            state.apply(WeatherKey::City, TupleValue::Int(1)),
            Err(WeatherError::WrongType(WeatherKey::City))
        );
        assert_eq!(
            state.apply(WeatherKey::City, TupleValue::Str("Llanfairpwllgwyngyllgogerychwyrndrobwll")),
            Err(WeatherError::TooLong(WeatherKey::City))
        );
        assert_eq!(state, WeatherState::new());
    }

    #[test]
    fn test_reset_temperature() {
        let mut state = WeatherState::new();
        state.apply(WeatherKey::TemperatureC, TupleValue::Str("22\u{B0}C")).unwrap();
        state.reset_temperature();
        assert_eq!(state.temperature(false), "--\u{B0}F");
    }

    proptest! {
        #[test]
        fn prop_day_night_only_differs_for_clear_and_atmosphere(condition in 0u16..1000) {
            let day = icon_for_condition(condition, true);
            let night = icon_for_condition(condition, false);
            if (0..=100).contains(&condition) || (701..=800).contains(&condition) {
                prop_assert_ne!(day, night);
            } else {
                prop_assert_eq!(day, night);
            }
            prop_assert_ne!(day, WeatherIcon::None);
        }
    }
}
