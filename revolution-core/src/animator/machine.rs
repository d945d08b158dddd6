//! Per-slot slide state machine
//!
//! ```text
//!             update(new)                 out stopped
//!   Idle ───────────────────► SlidingOut ─────────────► SlidingIn
//!    ▲   (slot showed a digit)  (target)   unload old,      │
//!    │                                     load target      │ in stopped
//!    └──────────────────────────────────────────────────────┘
//! ```
//!
//! An empty slot skips straight to SlidingIn; a blank target returns to
//! Idle after the slide-out. While a slot is not Idle its image belongs to
//! the running animation and further updates are queued or dropped.

use crate::config::types::{BusyPolicy, WatchfaceConfig};
use crate::error::SlotError;
use crate::slot::{SlotId, SlotPool, SlotUpdate, MAX_SLOTS};
use crate::traits::{AnimationScheduler, AnimationToken, Compositor, ImageProvider, SlidePhase};

/// Animation state of one slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnimationState {
    /// At rest, showing its resident digit or nothing
    Idle,
    /// Old digit leaving; the target is shown once it is gone
    SlidingOut(Option<u8>),
    /// New digit entering
    SlidingIn,
}

/// A running transition, dropped when the slot returns to Idle
#[derive(Debug, Clone, Copy)]
struct Transition {
    slot: SlotId,
    state: AnimationState,
    /// Latest value requested while busy
    queued: Option<Option<u8>>,
}

impl Transition {
    fn token(&self) -> AnimationToken {
        match self.state {
            AnimationState::SlidingIn => AnimationToken::slide_in(self.slot),
            _ => AnimationToken::slide_out(self.slot),
        }
    }
}

/// Slide animator for all slots of a watchface
#[derive(Debug)]
pub struct SlotAnimator {
    duration_ms: u16,
    policy: BusyPolicy,
    transitions: [Option<Transition>; MAX_SLOTS],
}

impl SlotAnimator {
    pub const fn new(duration_ms: u16, policy: BusyPolicy) -> Self {
        Self {
            duration_ms,
            policy,
            transitions: [None; MAX_SLOTS],
        }
    }

    pub const fn from_config(config: &WatchfaceConfig) -> Self {
        Self::new(config.animation_duration_ms, config.busy_policy)
    }

    /// Duration of each slide half (ms)
    pub fn duration_ms(&self) -> u16 {
        self.duration_ms
    }

    /// Current state of a slot
    pub fn state(&self, id: SlotId) -> AnimationState {
        self.transitions
            .get(id.linear())
            .copied()
            .flatten()
            .map_or(AnimationState::Idle, |t| t.state)
    }

    /// Check whether a slot is sliding
    pub fn is_animating(&self, id: SlotId) -> bool {
        self.state(id) != AnimationState::Idle
    }

    /// Number of slots currently sliding
    pub fn in_flight(&self) -> usize {
        self.transitions.iter().flatten().count()
    }

    /// Request that `id` show `target` (`None` for blank)
    ///
    /// Slots without slide frames are updated in place.
    pub fn update_slot<P>(
        &mut self,
        pool: &mut SlotPool,
        id: SlotId,
        target: Option<u8>,
        platform: &mut P,
    ) -> Result<SlotUpdate, SlotError>
    where
        P: ImageProvider + Compositor + AnimationScheduler,
    {
        let slot = pool.slot(id).ok_or(SlotError::UnknownSlot(id))?;
        let category = id.group.category();
        if let Some(value) = target {
            if !category.contains(value) {
                return Err(SlotError::InvalidDigit { category, value });
            }
        }

        if let Some(transition) = self.transitions[id.linear()].as_mut() {
            let destination = match transition.state {
                AnimationState::SlidingOut(target) => target,
                _ => slot.resident_digit(),
            };
            if target == destination {
                // Latest request is what the running slide already shows
                transition.queued = None;
                return Ok(SlotUpdate::Unchanged);
            }
            if transition.queued == Some(target) {
                return Ok(SlotUpdate::Unchanged);
            }
            return Ok(match self.policy {
                BusyPolicy::QueueLatest => {
                    transition.queued = Some(target);
                    SlotUpdate::Deferred
                }
                BusyPolicy::Drop => {
                    debug!("slot {}/{} busy, update dropped", id.group.index(), id.index);
                    SlotUpdate::Dropped
                }
            });
        }

        if slot.resident_digit() == target {
            return Ok(SlotUpdate::Unchanged);
        }
        let Some(path) = slot.slide() else {
            return pool.replace_digit(id, target, platform);
        };

        match (slot.is_empty(), target) {
            (true, Some(value)) => self.slide_in(pool, id, value, None, platform),
            (false, _) => {
                platform.animate(
                    slot.surface(),
                    slot.bounds(),
                    path.exit,
                    self.duration_ms,
                    AnimationToken::slide_out(id),
                );
                self.transitions[id.linear()] = Some(Transition {
                    slot: id,
                    state: AnimationState::SlidingOut(target),
                    queued: None,
                });
                Ok(SlotUpdate::SlideStarted)
            }
            // Empty and blank is the unchanged case handled above
            (true, None) => Ok(SlotUpdate::Unchanged),
        }
    }

    /// Advance the slot named by `token` after its animation stopped
    ///
    /// `finished` is false when the platform cut the animation short; the
    /// slot then snaps to its end frame. Tokens that do not match the
    /// slot's current state are stale and ignored.
    pub fn on_animation_stopped<P>(
        &mut self,
        token: AnimationToken,
        finished: bool,
        pool: &mut SlotPool,
        platform: &mut P,
    ) -> Result<(), SlotError>
    where
        P: ImageProvider + Compositor + AnimationScheduler,
    {
        let id = token.slot;
        let Some(transition) = self.transitions.get(id.linear()).copied().flatten() else {
            warn!("stale animation token for idle slot {}/{}", id.group.index(), id.index);
            return Ok(());
        };
        let Some(slot) = pool.slot(id) else {
            self.transitions[id.linear()] = None;
            return Ok(());
        };
        let bounds = slot.bounds();
        let surface = slot.surface();

        match (transition.state, token.phase) {
            (AnimationState::SlidingOut(target), SlidePhase::Out) => {
                pool.unload_digit(id, platform);
                match target {
                    Some(value) => self.slide_in(pool, id, value, transition.queued, platform).map(|_| ()),
                    None => {
                        platform.set_frame(surface, bounds);
                        self.settle(pool, id, transition.queued, platform)
                    }
                }
            }
            (AnimationState::SlidingIn, SlidePhase::In) => {
                if !finished {
                    platform.set_frame(surface, bounds);
                }
                self.settle(pool, id, transition.queued, platform)
            }
            _ => {
                warn!("stale animation token for slot {}/{}", id.group.index(), id.index);
                Ok(())
            }
        }
    }

    /// Unschedule every running animation and put the slots back at rest
    ///
    /// Images stay resident; the pool frees them afterwards.
    pub fn cancel_all<P>(&mut self, pool: &SlotPool, platform: &mut P)
    where
        P: Compositor + AnimationScheduler,
    {
        for entry in self.transitions.iter_mut() {
            let Some(transition) = entry.take() else {
                continue;
            };
            platform.unschedule(transition.token());
            if let Some(slot) = pool.slot(transition.slot) {
                platform.set_frame(slot.surface(), slot.bounds());
            }
        }
    }

    /// Load `value` off-screen and slide it to the resting frame
    fn slide_in<P>(
        &mut self,
        pool: &mut SlotPool,
        id: SlotId,
        value: u8,
        queued: Option<Option<u8>>,
        platform: &mut P,
    ) -> Result<SlotUpdate, SlotError>
    where
        P: ImageProvider + Compositor + AnimationScheduler,
    {
        let slot = pool.slot(id).ok_or(SlotError::UnknownSlot(id))?;
        let (surface, bounds) = (slot.surface(), slot.bounds());
        let Some(path) = slot.slide() else {
            self.transitions[id.linear()] = None;
            return pool.replace_digit(id, Some(value), platform);
        };

        platform.set_frame(surface, path.entry);
        if let Err(e) = pool.load_digit(id, value, platform) {
            platform.set_frame(surface, bounds);
            self.transitions[id.linear()] = None;
            return Err(e);
        }

        platform.animate(
            surface,
            path.entry,
            bounds,
            self.duration_ms,
            AnimationToken::slide_in(id),
        );
        self.transitions[id.linear()] = Some(Transition {
            slot: id,
            state: AnimationState::SlidingIn,
            queued,
        });
        Ok(SlotUpdate::SlideStarted)
    }

    /// Return to Idle, then apply the value requested while busy
    fn settle<P>(
        &mut self,
        pool: &mut SlotPool,
        id: SlotId,
        queued: Option<Option<u8>>,
        platform: &mut P,
    ) -> Result<(), SlotError>
    where
        P: ImageProvider + Compositor + AnimationScheduler,
    {
        self.transitions[id.linear()] = None;
        if let Some(target) = queued {
            trace!("slot {}/{} catching up", id.group.index(), id.index);
            self.update_slot(pool, id, target, platform)?;
        }
        Ok(())
    }
}
