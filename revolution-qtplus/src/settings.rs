//! Overlay settings and row layout

/// Screen size
pub const SCREEN_WIDTH: i16 = 144;
pub const SCREEN_HEIGHT: i16 = 168;

/// Time before an autohiding overlay disappears (ms)
pub const WINDOW_TIMEOUT_MS: u32 = 2000;

pub const PADDING_X: i16 = 5;
pub const PADDING_Y: i16 = 5;
pub const ICON_SIZE: i16 = 32;
pub const TIME_HEIGHT: i16 = 32;

/// X of the status texts, right of the icons
pub const TEXT_X: i16 = 40;

const BATTERY_BASE_Y: i16 = 0;
const BLUETOOTH_BASE_Y: i16 = ICON_SIZE + 5;
const WEATHER_BASE_Y: i16 = ICON_SIZE * 2 + 10;

/// Settings bit flags, as stored by the watchface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QtpSettings(u8);

impl QtpSettings {
    pub const SHOW_TIME: Self = Self(1);
    pub const SHOW_WEATHER: Self = Self(2);
    pub const AUTOHIDE: Self = Self(4);
    pub const DEGREES_F: Self = Self(8);
    pub const INVERT: Self = Self(16);

    const ALL_BITS: u8 = 0x1F;

    /// Build from stored bits, dropping unknown bits
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & Self::ALL_BITS)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn show_time(self) -> bool {
        self.contains(Self::SHOW_TIME)
    }

    pub const fn show_weather(self) -> bool {
        self.contains(Self::SHOW_WEATHER)
    }

    pub const fn autohide(self) -> bool {
        self.contains(Self::AUTOHIDE)
    }

    pub const fn degrees_f(self) -> bool {
        self.contains(Self::DEGREES_F)
    }

    pub const fn invert(self) -> bool {
        self.contains(Self::INVERT)
    }

    /// Extra offset of every status row when the clock row is shown
    const fn row_offset(self) -> i16 {
        if self.show_time() {
            TIME_HEIGHT + PADDING_Y
        } else {
            PADDING_Y
        }
    }

    pub const fn battery_y(self) -> i16 {
        BATTERY_BASE_Y + self.row_offset()
    }

    pub const fn bluetooth_y(self) -> i16 {
        BLUETOOTH_BASE_Y + self.row_offset()
    }

    pub const fn weather_y(self) -> i16 {
        WEATHER_BASE_Y + self.row_offset()
    }
}

impl core::ops::BitOr for QtpSettings {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

/// Layer frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    pub x: i16,
    pub y: i16,
    pub w: i16,
    pub h: i16,
}

impl Frame {
    pub const fn new(x: i16, y: i16, w: i16, h: i16) -> Self {
        Self { x, y, w, h }
    }
}

/// Frames of the weather row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherFrames {
    pub icon: Frame,
    pub temperature: Frame,
    pub description: Frame,
}

/// Frames of every overlay layer for one settings value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayLayout {
    pub time: Option<Frame>,
    pub battery_icon: Frame,
    pub battery_text: Frame,
    pub bluetooth_icon: Frame,
    pub bluetooth_text: Frame,
    pub weather: Option<WeatherFrames>,
    /// Full-screen inverter layer
    pub inverter: Option<Frame>,
}

impl OverlayLayout {
    pub const fn for_settings(settings: QtpSettings) -> Self {
        let time = if settings.show_time() {
            Some(Frame::new(PADDING_X, PADDING_Y, SCREEN_WIDTH - PADDING_X, TIME_HEIGHT))
        } else {
            None
        };

        let weather = if settings.show_weather() {
            let y = settings.weather_y();
            let text_x = PADDING_X + ICON_SIZE + 5;
            Some(WeatherFrames {
                icon: Frame::new(PADDING_X, y, ICON_SIZE, ICON_SIZE),
                temperature: Frame::new(text_x, y, SCREEN_WIDTH, ICON_SIZE),
                description: Frame::new(text_x, y + ICON_SIZE, SCREEN_WIDTH - PADDING_X, ICON_SIZE),
            })
        } else {
            None
        };

        let inverter = if settings.invert() {
            Some(Frame::new(0, 0, SCREEN_WIDTH, SCREEN_HEIGHT))
        } else {
            None
        };

        Self {
            time,
            battery_icon: Frame::new(PADDING_X, settings.battery_y(), ICON_SIZE, ICON_SIZE),
            battery_text: Frame::new(TEXT_X, settings.battery_y(), SCREEN_WIDTH - ICON_SIZE, ICON_SIZE),
            bluetooth_icon: Frame::new(PADDING_X, settings.bluetooth_y(), ICON_SIZE, ICON_SIZE),
            bluetooth_text: Frame::new(TEXT_X, settings.bluetooth_y(), SCREEN_WIDTH - ICON_SIZE, ICON_SIZE),
            weather,
            inverter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags() {
        let settings = QtpSettings::SHOW_WEATHER | QtpSettings::DEGREES_F;
        assert!(settings.show_weather());
        assert!(settings.degrees_f());
        assert!(!settings.show_time());
        assert!(!settings.autohide());
        assert!(!settings.invert());
        assert_eq!(settings.bits(), 10);
        assert_eq!(QtpSettings::from_bits_truncate(0xFF).bits(), 0x1F);
    }

    #[test]
    fn test_rows_without_time() {
        let settings = QtpSettings::default();
        assert_eq!(settings.battery_y(), 5);
        assert_eq!(settings.bluetooth_y(), 42);
        assert_eq!(settings.weather_y(), 79);
    }

    #[test]
    fn test_rows_shift_down_with_time() {
        let settings = QtpSettings::SHOW_TIME;
        assert_eq!(settings.battery_y(), 37);
        assert_eq!(settings.bluetooth_y(), 74);
        assert_eq!(settings.weather_y(), 111);
    }

    #[test]
    fn test_layout_optional_rows() {
        let bare = OverlayLayout::for_settings(QtpSettings::default());
        assert!(bare.time.is_none());
        assert!(bare.weather.is_none());
        assert!(bare.inverter.is_none());

        let full = OverlayLayout::for_settings(
            QtpSettings::SHOW_TIME | QtpSettings::SHOW_WEATHER | QtpSettings::INVERT,
        );
        assert_eq!(full.time, Some(Frame::new(5, 5, 139, 32)));
        let weather = full.weather.unwrap();
        assert_eq!(weather.icon, Frame::new(5, 111, 32, 32));
        assert_eq!(weather.description.y, 143);
        assert_eq!(full.inverter, Some(Frame::new(0, 0, 144, 168)));
    }
}
