//! Watchface orchestrator
//!
//! Owns the slot pool, the animator and the decomposition rules of one
//! watchface, and maps the platform's lifecycle and event callbacks onto
//! them. The platform port keeps one `Watchface` per running face and
//! forwards:
//!
//! - window load to [`init`](Watchface::init)
//! - tick events to [`on_tick`](Watchface::on_tick)
//! - animation-stopped events to [`on_animation_stopped`](Watchface::on_animation_stopped)
//! - window unload to [`deinit`](Watchface::deinit)

use crate::animator::SlotAnimator;
use crate::config::layout::{ScreenLayout, REVOLUTION_LAYOUT};
use crate::config::types::WatchfaceConfig;
use crate::display::{DisplayUpdater, TickReport, UpdateContext};
use crate::error::SlotError;
use crate::slot::SlotPool;
use crate::time::TickUnits;
use crate::traits::{AnimationToken, Platform};

/// Lifecycle of a watchface instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Lifecycle {
    /// Constructed, no slots allocated
    Created,
    /// Slots allocated, handling events
    Running,
    /// Slots destroyed; late events are ignored
    TornDown,
}

/// One running watchface
#[derive(Debug)]
pub struct Watchface {
    config: WatchfaceConfig,
    layout: &'static ScreenLayout,
    pool: SlotPool,
    animator: Option<SlotAnimator>,
    updater: DisplayUpdater,
    lifecycle: Lifecycle,
}

impl Watchface {
    /// Create a watchface with the standard Revolution layout
    pub fn new(config: WatchfaceConfig) -> Self {
        Self::with_layout(config, &REVOLUTION_LAYOUT)
    }

    pub fn with_layout(config: WatchfaceConfig, layout: &'static ScreenLayout) -> Self {
        let animator = config
            .animation_enabled
            .then(|| SlotAnimator::from_config(&config));

        Self {
            config,
            layout,
            pool: SlotPool::new(),
            animator,
            updater: DisplayUpdater::from_config(&config),
            lifecycle: Lifecycle::Created,
        }
    }

    pub fn config(&self) -> &WatchfaceConfig {
        &self.config
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn pool(&self) -> &SlotPool {
        &self.pool
    }

    /// Slide animator, if animation is enabled
    pub fn animator(&self) -> Option<&SlotAnimator> {
        self.animator.as_ref()
    }

    /// Tick granularity to subscribe to
    pub fn tick_units(&self) -> TickUnits {
        self.config.tick_units()
    }

    /// Allocate all slots and draw the current time
    pub fn init<P: Platform>(&mut self, platform: &mut P) -> TickReport {
        if self.lifecycle != Lifecycle::Created {
            warn!("init called twice");
            return TickReport::default();
        }

        platform.set_inverted(self.config.invert_colors);
        for group in &self.layout.groups {
            self.pool.create_slots(group, platform);
        }
        self.lifecycle = Lifecycle::Running;

        let now = platform.now();
        let is_24h = platform.is_24h_format();
        let updater = self.updater;
        let report = updater.display_all(&now, is_24h, &mut self.context(platform));
        info!(
            "watchface started: animation {}, {} images loaded",
            self.config.animation_enabled,
            self.pool.outstanding_images()
        );
        report
    }

    /// Handle a tick event
    pub fn on_tick<P: Platform>(&mut self, units: TickUnits, platform: &mut P) -> TickReport {
        if self.lifecycle != Lifecycle::Running {
            debug!("tick ignored outside running state");
            return TickReport::default();
        }

        let now = platform.now();
        let is_24h = platform.is_24h_format();
        let updater = self.updater;
        let report = updater.on_tick(units, &now, is_24h, &mut self.context(platform));
        if report.failed > 0 {
            warn!("{} slots failed to update", report.failed);
        }
        report
    }

    /// Handle an animation-stopped event
    pub fn on_animation_stopped<P: Platform>(
        &mut self,
        token: AnimationToken,
        finished: bool,
        platform: &mut P,
    ) -> Result<(), SlotError> {
        if self.lifecycle != Lifecycle::Running {
            warn!("animation event after teardown ignored");
            return Ok(());
        }
        match self.animator.as_mut() {
            Some(animator) => animator.on_animation_stopped(token, finished, &mut self.pool, platform),
            None => {
                warn!("animation event without animator ignored");
                Ok(())
            }
        }
    }

    /// Unschedule all animations, then free every image and slot
    pub fn deinit<P: Platform>(&mut self, platform: &mut P) {
        if self.lifecycle == Lifecycle::TornDown {
            return;
        }
        if let Some(animator) = self.animator.as_mut() {
            animator.cancel_all(&self.pool, platform);
        }
        self.pool.destroy_all(platform);
        self.lifecycle = Lifecycle::TornDown;
        info!("watchface stopped");
    }

    fn context<'a, P: Platform>(&'a mut self, platform: &'a mut P) -> UpdateContext<'a, P> {
        UpdateContext {
            pool: &mut self.pool,
            animator: self.animator.as_mut(),
            platform,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animator::AnimationState;
    use crate::mock::MockPlatform;
    use crate::slot::{GroupKind, SlotId};
    use crate::time::TimeSnapshot;

    fn digits(face: &Watchface, kind: GroupKind) -> std::vec::Vec<Option<u8>> {
        face.pool().group(kind).unwrap().digits().iter().copied().collect()
    }

    fn settle(face: &mut Watchface, platform: &mut MockPlatform) {
        while let Some(token) = platform.complete_next() {
            face.on_animation_stopped(token, true, platform).unwrap();
        }
    }

    #[test]
    fn test_init_draws_everything() {
        let mut platform = MockPlatform::new();
        platform.now = TimeSnapshot::at(9, 41, 7).on(2013, 12, 9, 1);
        let mut face = Watchface::new(WatchfaceConfig::revolution_lite());

        let report = face.init(&mut platform);

        assert_eq!(face.lifecycle(), Lifecycle::Running);
        assert_eq!(report.failed, 0);
        assert_eq!(digits(&face, GroupKind::Time), [None, Some(9), Some(4), Some(1)]);
        assert_eq!(digits(&face, GroupKind::Date), [Some(1), Some(2), Some(0), Some(9)]);
        assert_eq!(digits(&face, GroupKind::Year), [Some(1), Some(3)]);
        assert_eq!(digits(&face, GroupKind::Day), [Some(1)]);
        assert_eq!(platform.inverted, Some(false));
        assert!(face.animator().is_none());
    }

    #[test]
    fn test_midnight_rollover_static() {
        let mut platform = MockPlatform::new();
        let before = TimeSnapshot::at(23, 59, 59).on(2013, 12, 31, 2);
        let after = TimeSnapshot::at(0, 0, 0).on(2014, 1, 1, 3);
        platform.now = before;
        let mut face = Watchface::new(WatchfaceConfig {
            animation_enabled: false,
            ..WatchfaceConfig::revolution()
        });
        face.init(&mut platform);
        assert_eq!(digits(&face, GroupKind::Time), [Some(2), Some(3), Some(5), Some(9)]);

        platform.now = after;
        face.on_tick(TickUnits::between(&before, &after), &mut platform);

        assert_eq!(digits(&face, GroupKind::Time), [Some(0), Some(0), Some(0), Some(0)]);
        // One image per slot, nothing left over from 23:59
        assert_eq!(platform.live_images(), 11);
        assert_eq!(face.pool().outstanding_images(), 11);
        assert!(platform.animations.is_empty());
    }

    #[test]
    fn test_animated_minute_change() {
        let mut platform = MockPlatform::new();
        platform.now = TimeSnapshot::at(10, 29, 0);
        let mut face = Watchface::new(WatchfaceConfig::revolution());
        face.init(&mut platform);
        settle(&mut face, &mut platform);
        let started = platform.animations.len();

        platform.now = TimeSnapshot::at(10, 30, 0);
        face.on_tick(TickUnits::MINUTE | TickUnits::SECOND, &mut platform);
        let animator = face.animator().unwrap();
        assert_eq!(animator.state(SlotId::time(2)), AnimationState::SlidingOut(Some(3)));
        assert_eq!(animator.state(SlotId::time(3)), AnimationState::SlidingOut(Some(0)));
        assert_eq!(animator.state(SlotId::time(0)), AnimationState::Idle);

        settle(&mut face, &mut platform);
        assert_eq!(digits(&face, GroupKind::Time), [Some(1), Some(0), Some(3), Some(0)]);
        // Two slides out, two slides in
        assert_eq!(platform.animations.len(), started + 4);
    }

    #[test]
    fn test_teardown_releases_everything() {
        let mut platform = MockPlatform::new();
        platform.now = TimeSnapshot::at(10, 29, 0);
        let mut face = Watchface::new(WatchfaceConfig::revolution());
        face.init(&mut platform);
        assert!(platform.has_pending());
        let pending = platform.pending_tokens();

        face.deinit(&mut platform);

        assert_eq!(face.pool().outstanding_images(), 0);
        assert_eq!(platform.live_images(), 0);
        assert!(!platform.has_pending());
        for token in &pending {
            assert!(platform.unscheduled.contains(token));
        }
        assert!(face.pool().group(GroupKind::Time).is_none());

        // A late completion must not touch freed state
        face.on_animation_stopped(pending[0], true, &mut platform).unwrap();
        assert_eq!(face.on_tick(TickUnits::MINUTE, &mut platform), TickReport::default());
        assert_eq!(platform.live_images(), 0);
    }

    #[test]
    fn test_events_before_init_are_ignored() {
        let mut platform = MockPlatform::new();
        let mut face = Watchface::new(WatchfaceConfig::revolution());

        assert_eq!(face.on_tick(TickUnits::all(), &mut platform), TickReport::default());
        assert!(platform.loads.is_empty());
        assert_eq!(face.lifecycle(), Lifecycle::Created);
    }

    #[test]
    fn test_invert_forwarded() {
        let mut platform = MockPlatform::new();
        let mut face = Watchface::new(WatchfaceConfig {
            invert_colors: true,
            ..WatchfaceConfig::revolution_lite()
        });
        face.init(&mut platform);
        assert_eq!(platform.inverted, Some(true));
    }

    #[test]
    fn test_tick_subscription() {
        assert_eq!(Watchface::new(WatchfaceConfig::revolution()).tick_units(), TickUnits::SECOND);
        assert_eq!(
            Watchface::new(WatchfaceConfig::revolution_lite()).tick_units(),
            TickUnits::MINUTE
        );
    }

    #[test]
    fn test_twelve_hour_platform_setting() {
        let mut platform = MockPlatform::new();
        platform.is_24h = false;
        platform.now = TimeSnapshot::at(15, 5, 0);
        let mut face = Watchface::new(WatchfaceConfig::revolution_lite());
        face.init(&mut platform);
        assert_eq!(digits(&face, GroupKind::Time), [None, Some(3), Some(0), Some(5)]);
    }
}
