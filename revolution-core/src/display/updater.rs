//! Time decomposition and slot dispatch
//!
//! Turns a [`TimeSnapshot`] into per-slot digits and hands each one to the
//! slot animator, or straight to the pool when animation is off. Groups are
//! only touched on the ticks where their field can change.

use crate::animator::SlotAnimator;
use crate::config::types::{DateFormat, WatchfaceConfig};
use crate::error::SlotError;
use crate::slot::{GroupKind, SlotId, SlotPool, SlotUpdate};
use crate::time::{TickUnits, TimeSnapshot};
use crate::traits::{AnimationScheduler, Compositor, ImageProvider};

/// Split `value % 100` into `(slot, digit)` pairs for two adjacent slots
///
/// Digits are taken least-significant first, so the ones digit (for
/// `base_slot + 1`) comes before the tens digit (for `base_slot`).
pub const fn decompose_two_digit(value: u16, base_slot: u8) -> [(u8, u8); 2] {
    let value = value % 100;
    [
        (base_slot + 1, (value % 10) as u8),
        (base_slot, (value / 10) as u8),
    ]
}

/// Units whose change can move the hour or minute digits
const MINUTE_OR_COARSER: TickUnits = TickUnits::MINUTE
    .union(TickUnits::HOUR)
    .union(TickUnits::DAY)
    .union(TickUnits::MONTH)
    .union(TickUnits::YEAR);

/// Everything a dispatch pass mutates
pub struct UpdateContext<'a, P> {
    pub pool: &'a mut SlotPool,
    /// Present when time digits slide
    pub animator: Option<&'a mut SlotAnimator>,
    pub platform: &'a mut P,
}

impl<P> UpdateContext<'_, P>
where
    P: ImageProvider + Compositor + AnimationScheduler,
{
    fn apply(&mut self, id: SlotId, target: Option<u8>) -> Result<SlotUpdate, SlotError> {
        match self.animator.as_deref_mut() {
            Some(animator) => animator.update_slot(self.pool, id, target, self.platform),
            None => self.pool.replace_digit(id, target, self.platform),
        }
    }
}

/// Summary of one update pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    /// Slots whose image was replaced or started sliding
    pub changed: u8,
    /// Slots busy sliding; the value was queued or dropped
    pub busy: u8,
    /// Slots whose update failed
    pub failed: u8,
}

impl TickReport {
    fn record(&mut self, id: SlotId, result: Result<SlotUpdate, SlotError>) {
        match result {
            Ok(update) if update.is_change() => self.changed += 1,
            Ok(SlotUpdate::Deferred | SlotUpdate::Dropped) => self.busy += 1,
            Ok(_) => {}
            Err(e) => {
                warn!(
                    "slot {}/{} update failed: {:?}",
                    id.group.index(),
                    id.index,
                    e
                );
                self.failed += 1;
            }
        }
    }

    fn merge(self, other: Self) -> Self {
        Self {
            changed: self.changed + other.changed,
            busy: self.busy + other.busy,
            failed: self.failed + other.failed,
        }
    }
}

/// Per-face decomposition rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayUpdater {
    date_format: DateFormat,
    show_year_instead_of_seconds: bool,
    hide_leading_zero: bool,
}

impl DisplayUpdater {
    pub const fn from_config(config: &WatchfaceConfig) -> Self {
        Self {
            date_format: config.date_format,
            show_year_instead_of_seconds: config.show_year_instead_of_seconds,
            hide_leading_zero: config.hide_leading_zero,
        }
    }

    /// Digits of the time group, by slot index
    pub fn time_digits(&self, now: &TimeSnapshot, is_24h: bool) -> [Option<u8>; 4] {
        let mut digits = [None; 4];
        let hour = now.display_hour(is_24h) as u16;
        for (slot, digit) in decompose_two_digit(hour, 0)
            .into_iter()
            .chain(decompose_two_digit(now.minute as u16, 2))
        {
            let blank = self.hide_leading_zero && slot == 0 && digit == 0;
            digits[slot as usize] = if blank { None } else { Some(digit) };
        }
        digits
    }

    /// Digits of the date group, by slot index
    pub fn date_digits(&self, now: &TimeSnapshot) -> [u8; 4] {
        let (first, second) = match self.date_format {
            DateFormat::American => (now.month, now.day),
            DateFormat::European => (now.day, now.month),
        };
        let mut digits = [0; 4];
        for (slot, digit) in decompose_two_digit(first as u16, 0)
            .into_iter()
            .chain(decompose_two_digit(second as u16, 2))
        {
            digits[slot as usize] = digit;
        }
        digits
    }

    /// Hours and minutes
    pub fn on_minute_tick<P>(&self, now: &TimeSnapshot, is_24h: bool, ctx: &mut UpdateContext<'_, P>) -> TickReport
    where
        P: ImageProvider + Compositor + AnimationScheduler,
    {
        let mut report = TickReport::default();
        for (index, target) in self.time_digits(now, is_24h).into_iter().enumerate() {
            let id = SlotId::time(index as u8);
            report.record(id, ctx.apply(id, target));
        }
        report
    }

    /// Seconds, when the year/second group shows seconds
    pub fn on_second_tick<P>(&self, now: &TimeSnapshot, ctx: &mut UpdateContext<'_, P>) -> TickReport
    where
        P: ImageProvider + Compositor + AnimationScheduler,
    {
        if self.show_year_instead_of_seconds {
            return TickReport::default();
        }
        self.update_pair(GroupKind::Year, now.second as u16, 0, ctx)
    }

    /// Weekday and date
    pub fn on_day_tick<P>(&self, now: &TimeSnapshot, ctx: &mut UpdateContext<'_, P>) -> TickReport
    where
        P: ImageProvider + Compositor + AnimationScheduler,
    {
        let mut report = TickReport::default();
        let id = SlotId::new(GroupKind::Day, 0);
        report.record(id, ctx.apply(id, Some(now.weekday)));

        for (index, digit) in self.date_digits(now).into_iter().enumerate() {
            let id = SlotId::new(GroupKind::Date, index as u8);
            report.record(id, ctx.apply(id, Some(digit)));
        }
        report
    }

    /// Two-digit year, when the year/second group shows the year
    pub fn on_year_tick<P>(&self, now: &TimeSnapshot, ctx: &mut UpdateContext<'_, P>) -> TickReport
    where
        P: ImageProvider + Compositor + AnimationScheduler,
    {
        if !self.show_year_instead_of_seconds {
            return TickReport::default();
        }
        self.update_pair(GroupKind::Year, now.year, 0, ctx)
    }

    /// Update every group whose field may have changed
    pub fn on_tick<P>(
        &self,
        units: TickUnits,
        now: &TimeSnapshot,
        is_24h: bool,
        ctx: &mut UpdateContext<'_, P>,
    ) -> TickReport
    where
        P: ImageProvider + Compositor + AnimationScheduler,
    {
        let mut report = TickReport::default();
        if units.intersects(TickUnits::DAY | TickUnits::MONTH | TickUnits::YEAR) {
            report = report.merge(self.on_day_tick(now, ctx));
        }
        if units.contains(TickUnits::YEAR) {
            report = report.merge(self.on_year_tick(now, ctx));
        }
        if units.intersects(MINUTE_OR_COARSER) {
            report = report.merge(self.on_minute_tick(now, is_24h, ctx));
        }
        if units.contains(TickUnits::SECOND) {
            report = report.merge(self.on_second_tick(now, ctx));
        }
        report
    }

    /// Draw every group from scratch
    pub fn display_all<P>(&self, now: &TimeSnapshot, is_24h: bool, ctx: &mut UpdateContext<'_, P>) -> TickReport
    where
        P: ImageProvider + Compositor + AnimationScheduler,
    {
        self.on_tick(TickUnits::all(), now, is_24h, ctx)
    }

    fn update_pair<P>(
        &self,
        group: GroupKind,
        value: u16,
        base_slot: u8,
        ctx: &mut UpdateContext<'_, P>,
    ) -> TickReport
    where
        P: ImageProvider + Compositor + AnimationScheduler,
    {
        let mut report = TickReport::default();
        for (index, digit) in decompose_two_digit(value, base_slot) {
            let id = SlotId::new(group, index);
            report.record(id, ctx.apply(id, Some(digit)));
        }
        report
    }
}
