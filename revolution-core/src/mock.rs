//! Recording platform for unit tests

use std::collections::{BTreeMap, VecDeque};
use std::vec::Vec;

use crate::geometry::Rect;
use crate::time::TimeSnapshot;
use crate::traits::{
    AnimationScheduler, AnimationToken, Clock, Compositor, ImageError, ImageHandle, ImageProvider,
    ResourceId, SurfaceId,
};

/// One `animate` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationCall {
    pub surface: SurfaceId,
    pub from: Rect,
    pub to: Rect,
    pub duration_ms: u16,
    pub token: AnimationToken,
}

/// Fake watch platform
///
/// Panics on double unload, on attaching to an occupied surface and on
/// detaching an image that is not attached, so misuse fails the test.
#[derive(Debug)]
pub struct MockPlatform {
    /// Every resource loaded, in order
    pub loads: Vec<ResourceId>,
    /// Number of images freed
    pub unloads: usize,
    /// Every animation started, in order
    pub animations: Vec<AnimationCall>,
    /// Tokens removed with `unschedule`
    pub unscheduled: Vec<AnimationToken>,
    /// Time returned by the clock
    pub now: TimeSnapshot,
    pub is_24h: bool,
    /// Last inversion requested
    pub inverted: Option<bool>,
    live: BTreeMap<u32, ResourceId>,
    attached: BTreeMap<SurfaceId, u32>,
    frames: BTreeMap<SurfaceId, Rect>,
    pending: VecDeque<AnimationCall>,
    next_handle: u32,
    failures: usize,
}

impl MockPlatform {
    pub fn new() -> Self {
        Self {
            loads: Vec::new(),
            unloads: 0,
            animations: Vec::new(),
            unscheduled: Vec::new(),
            now: TimeSnapshot::at(12, 0, 0),
            is_24h: true,
            inverted: None,
            live: BTreeMap::new(),
            attached: BTreeMap::new(),
            frames: BTreeMap::new(),
            pending: VecDeque::new(),
            next_handle: 1,
            failures: 0,
        }
    }

    /// Make the next `count` loads fail with `OutOfMemory`
    pub fn fail_loads(&mut self, count: usize) {
        self.failures = count;
    }

    /// Images loaded and not yet freed
    pub fn live_images(&self) -> usize {
        self.live.len()
    }

    /// Resource of the image attached to `surface`
    pub fn shown(&self, surface: SurfaceId) -> Option<ResourceId> {
        let raw = self.attached.get(&surface)?;
        self.live.get(raw).copied()
    }

    /// Current frame of `surface`
    pub fn frame(&self, surface: SurfaceId) -> Option<Rect> {
        self.frames.get(&surface).copied()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Tokens of the animations still running
    pub fn pending_tokens(&self) -> Vec<AnimationToken> {
        self.pending.iter().map(|a| a.token).collect()
    }

    /// Finish the oldest running animation, moving its surface to the end frame
    pub fn complete_next(&mut self) -> Option<AnimationToken> {
        let anim = self.pending.pop_front()?;
        self.frames.insert(anim.surface, anim.to);
        Some(anim.token)
    }

    /// Stop a specific animation without moving its surface
    pub fn take_pending(&mut self, token: AnimationToken) -> Option<AnimationToken> {
        let pos = self.pending.iter().position(|a| a.token == token)?;
        self.pending.remove(pos).map(|a| a.token)
    }
}

impl ImageProvider for MockPlatform {
    fn load(&mut self, resource: ResourceId) -> Result<ImageHandle, ImageError> {
        self.loads.push(resource);
        if self.failures > 0 {
            self.failures -= 1;
            return Err(ImageError::OutOfMemory);
        }
        let raw = self.next_handle;
        self.next_handle += 1;
        self.live.insert(raw, resource);
        Ok(ImageHandle::new(raw))
    }

    fn unload(&mut self, image: ImageHandle) {
        assert!(self.live.remove(&image.raw()).is_some(), "double unload of {:?}", image);
        assert!(
            !self.attached.values().any(|raw| *raw == image.raw()),
            "unloading attached image {:?}",
            image
        );
        self.unloads += 1;
    }
}

impl Compositor for MockPlatform {
    fn attach_image(&mut self, surface: SurfaceId, image: &ImageHandle, _frame: Rect) {
        let previous = self.attached.insert(surface, image.raw());
        assert!(previous.is_none(), "surface {:?} already has an image", surface);
    }

    fn detach_image(&mut self, surface: SurfaceId, image: &ImageHandle) {
        assert_eq!(self.attached.remove(&surface), Some(image.raw()));
    }

    fn set_frame(&mut self, surface: SurfaceId, frame: Rect) {
        self.frames.insert(surface, frame);
    }

    fn set_inverted(&mut self, inverted: bool) {
        self.inverted = Some(inverted);
    }
}

impl AnimationScheduler for MockPlatform {
    fn animate(&mut self, surface: SurfaceId, from: Rect, to: Rect, duration_ms: u16, token: AnimationToken) {
        assert!(
            !self.pending.iter().any(|a| a.surface == surface),
            "surface {:?} animated twice",
            surface
        );
        let call = AnimationCall {
            surface,
            from,
            to,
            duration_ms,
            token,
        };
        self.frames.insert(surface, from);
        self.animations.push(call);
        self.pending.push_back(call);
    }

    fn unschedule(&mut self, token: AnimationToken) {
        self.pending.retain(|a| a.token != token);
        self.unscheduled.push(token);
    }
}

impl Clock for MockPlatform {
    fn now(&self) -> TimeSnapshot {
        self.now
    }

    fn is_24h_format(&self) -> bool {
        self.is_24h
    }
}
