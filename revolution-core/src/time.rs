//! Time snapshot and tick units
//!
//! A [`TimeSnapshot`] is read once per tick from the platform clock and
//! stays immutable for the whole update pass. [`TickUnits`] tells the
//! watchface which calendar units changed at that tick.

/// Calendar time read from the platform clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeSnapshot {
    /// Hour of day (0-23)
    pub hour: u8,
    /// Minute (0-59)
    pub minute: u8,
    /// Second (0-59)
    pub second: u8,
    /// Day of week (0 = Sunday .. 6 = Saturday)
    pub weekday: u8,
    /// Day of month (1-31)
    pub day: u8,
    /// Month (1-12)
    pub month: u8,
    /// Full year, e.g. 2013
    pub year: u16,
}

impl TimeSnapshot {
    /// Create a snapshot with only the time-of-day fields set
    ///
    /// Date fields default to Sunday 1 January 2000.
    pub const fn at(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            hour,
            minute,
            second,
            weekday: 0,
            day: 1,
            month: 1,
            year: 2000,
        }
    }

    /// Set the date fields
    pub const fn on(self, year: u16, month: u8, day: u8, weekday: u8) -> Self {
        Self {
            year,
            month,
            day,
            weekday,
            ..self
        }
    }

    /// Hour as shown on the dial
    ///
    /// 24-hour format returns the hour unchanged. 12-hour format maps
    /// 0 and 12 to 12, and 13-23 to 1-11.
    pub const fn display_hour(&self, is_24h: bool) -> u8 {
        if is_24h {
            return self.hour;
        }
        match self.hour % 12 {
            0 => 12,
            h => h,
        }
    }
}

/// Set of calendar units that changed at a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickUnits(u8);

impl TickUnits {
    pub const SECOND: Self = Self(1 << 0);
    pub const MINUTE: Self = Self(1 << 1);
    pub const HOUR: Self = Self(1 << 2);
    pub const DAY: Self = Self(1 << 3);
    pub const MONTH: Self = Self(1 << 4);
    pub const YEAR: Self = Self(1 << 5);

    /// No unit changed
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Every unit changed (used for the initial full draw)
    pub const fn all() -> Self {
        Self(0x3F)
    }

    /// Raw bit value
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Build from raw bits, dropping unknown bits
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & 0x3F)
    }

    /// Check whether all units in `other` are set
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Check whether any unit in `other` is set
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Union of two sets
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Check whether no unit is set
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Units that change when the clock moves from `prev` to `next`
    ///
    /// A change of a larger unit implies all smaller units, matching how
    /// platform tick services report rollovers.
    pub fn between(prev: &TimeSnapshot, next: &TimeSnapshot) -> Self {
        let mut units = Self::empty();
        if prev.year != next.year {
            units = units.union(Self::YEAR);
        }
        if units.contains(Self::YEAR) || prev.month != next.month {
            units = units.union(Self::MONTH);
        }
        if units.contains(Self::MONTH) || prev.day != next.day {
            units = units.union(Self::DAY);
        }
        if units.contains(Self::DAY) || prev.hour != next.hour {
            units = units.union(Self::HOUR);
        }
        if units.contains(Self::HOUR) || prev.minute != next.minute {
            units = units.union(Self::MINUTE);
        }
        if units.contains(Self::MINUTE) || prev.second != next.second {
            units = units.union(Self::SECOND);
        }
        units
    }
}

impl core::ops::BitOr for TickUnits {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}
