//! Slot pool
//!
//! Owns every slot of the watchface and is the only caller of the digit
//! resource cache. A slot's digit and its image handle are stored together,
//! so a slot either shows a digit and owns its image, or is empty.

use heapless::Vec;

use super::{GroupKind, SlotId, SlotUpdate, MAX_SLOTS_PER_GROUP};
use crate::config::layout::{GroupLayout, SlotSpec};
use crate::error::SlotError;
use crate::geometry::Rect;
use crate::resources::DigitResourceCache;
use crate::traits::{Compositor, ImageHandle, ImageProvider, SurfaceId};

/// Digit currently shown by a slot, with the image that draws it
#[derive(Debug)]
struct ResidentImage {
    digit: u8,
    image: ImageHandle,
}

/// Off-screen frames of an animated slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SlidePath {
    /// Where the outgoing image ends up
    pub exit: Rect,
    /// Where the incoming image starts
    pub entry: Rect,
}

/// One display slot
#[derive(Debug)]
pub struct Slot {
    index: u8,
    bounds: Rect,
    surface: SurfaceId,
    slide: Option<SlidePath>,
    resident: Option<ResidentImage>,
}

impl Slot {
    fn from_spec(index: u8, spec: &SlotSpec, clip: Rect) -> Self {
        let slide = spec.slide.map(|edges| SlidePath {
            exit: edges.exit.offscreen_frame(spec.bounds, clip),
            entry: edges.entry.offscreen_frame(spec.bounds, clip),
        });

        Self {
            index,
            bounds: spec.bounds,
            surface: spec.surface,
            slide,
            resident: None,
        }
    }

    /// Position within the group
    pub fn index(&self) -> u8 {
        self.index
    }

    /// Resting frame
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Layer owned by the slot
    pub fn surface(&self) -> SurfaceId {
        self.surface
    }

    /// Off-screen frames, if the slot can slide
    pub fn slide(&self) -> Option<SlidePath> {
        self.slide
    }

    /// Digit currently shown
    pub fn resident_digit(&self) -> Option<u8> {
        self.resident.as_ref().map(|r| r.digit)
    }

    /// Image currently attached
    pub fn image(&self) -> Option<&ImageHandle> {
        self.resident.as_ref().map(|r| &r.image)
    }

    /// Check whether the slot shows nothing
    pub fn is_empty(&self) -> bool {
        self.resident.is_none()
    }
}

/// Slots of one group, in index order
#[derive(Debug)]
pub struct SlotGroup {
    kind: GroupKind,
    parent: SurfaceId,
    clip: Rect,
    slots: Vec<Slot, MAX_SLOTS_PER_GROUP>,
}

impl SlotGroup {
    fn from_layout(layout: &GroupLayout) -> Self {
        let mut slots = Vec::new();
        for (index, spec) in layout.slots.iter().take(MAX_SLOTS_PER_GROUP).enumerate() {
            // Cannot overflow, the iterator is bounded by the capacity
            let _ = slots.push(Slot::from_spec(index as u8, spec, layout.clip));
        }

        Self {
            kind: layout.kind,
            parent: layout.parent,
            clip: layout.clip,
            slots,
        }
    }

    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    /// Parent layer of the slot layers
    pub fn parent(&self) -> SurfaceId {
        self.parent
    }

    /// Visible area of the group
    pub fn clip(&self) -> Rect {
        self.clip
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Digits shown by each slot, in index order
    pub fn digits(&self) -> Vec<Option<u8>, MAX_SLOTS_PER_GROUP> {
        self.slots.iter().map(Slot::resident_digit).collect()
    }
}

/// Owner of all slot groups and of the digit images they show
#[derive(Debug, Default)]
pub struct SlotPool {
    groups: [Option<SlotGroup>; 4],
    cache: DigitResourceCache,
}

impl SlotPool {
    /// Create a pool with no groups allocated
    pub const fn new() -> Self {
        Self {
            groups: [None, None, None, None],
            cache: DigitResourceCache::new(),
        }
    }

    /// Allocate the slots of a group, all empty and at their resting frames
    ///
    /// A group that is already allocated is kept as is.
    pub fn create_slots<C: Compositor>(
        &mut self,
        layout: &GroupLayout,
        compositor: &mut C,
    ) -> &SlotGroup {
        let storage = &mut self.groups[layout.kind.index()];
        if storage.is_some() {
            warn!("slot group {} already allocated", layout.kind.index());
        }

        storage.get_or_insert_with(|| {
            let group = SlotGroup::from_layout(layout);
            for slot in group.slots() {
                compositor.set_frame(slot.surface, slot.bounds);
            }
            debug!(
                "allocated {} slots for group {}",
                group.slots.len(),
                layout.kind.index()
            );
            group
        })
    }

    /// Load `value` into an empty slot
    ///
    /// The image is attached to the slot's surface at its resting frame.
    /// Rejected values and occupied slots leave everything untouched. A
    /// failed image load leaves the slot empty.
    pub fn load_digit<P>(&mut self, id: SlotId, value: u8, platform: &mut P) -> Result<(), SlotError>
    where
        P: ImageProvider + Compositor,
    {
        let category = id.group.category();
        let slot = find_mut(&mut self.groups, id).ok_or(SlotError::UnknownSlot(id))?;

        if !category.contains(value) {
            return Err(SlotError::InvalidDigit { category, value });
        }
        if slot.resident.is_some() {
            error!("load into occupied slot {}/{}", id.group.index(), id.index);
            return Err(SlotError::SlotOccupied(id));
        }

        let image = match self.cache.acquire(platform, category, value) {
            Ok(image) => image,
            Err(e) => {
                warn!("slot {}/{} left empty: image load failed", id.group.index(), id.index);
                return Err(e);
            }
        };

        platform.attach_image(slot.surface, &image, slot.bounds);
        slot.resident = Some(ResidentImage { digit: value, image });
        Ok(())
    }

    /// Empty a slot, freeing its image
    ///
    /// Returns false if the slot was already empty or is not allocated.
    pub fn unload_digit<P>(&mut self, id: SlotId, platform: &mut P) -> bool
    where
        P: ImageProvider + Compositor,
    {
        let Some(slot) = find_mut(&mut self.groups, id) else {
            return false;
        };
        let Some(resident) = slot.resident.take() else {
            return false;
        };

        platform.detach_image(slot.surface, &resident.image);
        self.cache.release(platform, resident.image);
        true
    }

    /// Swap the slot's digit in place, without animation
    ///
    /// `None` leaves the slot blank. The old image is freed before the new
    /// one is loaded, so a failed load leaves the slot empty.
    pub fn replace_digit<P>(
        &mut self,
        id: SlotId,
        target: Option<u8>,
        platform: &mut P,
    ) -> Result<SlotUpdate, SlotError>
    where
        P: ImageProvider + Compositor,
    {
        let slot = self.slot(id).ok_or(SlotError::UnknownSlot(id))?;
        let category = id.group.category();
        if let Some(value) = target {
            if !category.contains(value) {
                return Err(SlotError::InvalidDigit { category, value });
            }
        }
        if slot.resident_digit() == target {
            return Ok(SlotUpdate::Unchanged);
        }

        self.unload_digit(id, platform);
        if let Some(value) = target {
            self.load_digit(id, value, platform)?;
        }
        Ok(SlotUpdate::Replaced)
    }

    /// Unload every slot of a group, then drop the group
    ///
    /// Returns the number of images freed.
    pub fn destroy_slots<P>(&mut self, kind: GroupKind, platform: &mut P) -> usize
    where
        P: ImageProvider + Compositor,
    {
        let Some(mut group) = self.groups[kind.index()].take() else {
            return 0;
        };

        let mut freed = 0;
        for slot in group.slots.iter_mut() {
            if let Some(resident) = slot.resident.take() {
                platform.detach_image(slot.surface, &resident.image);
                self.cache.release(platform, resident.image);
                freed += 1;
            }
        }
        debug!("destroyed group {}, {} images freed", kind.index(), freed);
        freed
    }

    /// Drop every allocated group
    pub fn destroy_all<P>(&mut self, platform: &mut P)
    where
        P: ImageProvider + Compositor,
    {
        for kind in GroupKind::ALL {
            self.destroy_slots(kind, platform);
        }
    }

    pub fn group(&self, kind: GroupKind) -> Option<&SlotGroup> {
        self.groups[kind.index()].as_ref()
    }

    pub fn slot(&self, id: SlotId) -> Option<&Slot> {
        self.group(id.group)?.slots.get(id.index as usize)
    }

    /// Number of digit images currently decoded
    pub fn outstanding_images(&self) -> u8 {
        self.cache.outstanding()
    }

    pub fn cache(&self) -> &DigitResourceCache {
        &self.cache
    }
}

fn find_mut(groups: &mut [Option<SlotGroup>; 4], id: SlotId) -> Option<&mut Slot> {
    groups[id.group.index()]
        .as_mut()?
        .slots
        .get_mut(id.index as usize)
}
