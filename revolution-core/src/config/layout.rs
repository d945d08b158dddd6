//! Screen layout
//!
//! Static slot geometry of the Revolution face on a 144x168 screen:
//!
//! ```text
//! ┌──────────────────────┐ 0
//! │  [ H ]      [ H ]    │
//! │                      │  four 70x70 time slots, 2x2 grid
//! │  [ M ]      [ M ]    │
//! ├──────────────────────┤ 144
//! │ day  [dd][dd] [mm][mm]  yy│  date strip
//! └──────────────────────┘ 168
//! ```
//!
//! Only time slots animate. Each one leaves toward a fixed edge and the
//! next slot in the conveyor order (0 → 1 → 3 → 2 → 0) enters from that
//! same edge, so the digits appear to rotate around the grid without two
//! adjacent slots ever crossing paths.

use crate::geometry::{Edge, Rect};
use crate::slot::GroupKind;
use crate::traits::SurfaceId;

pub const SCREEN_WIDTH: i16 = 144;
pub const SCREEN_HEIGHT: i16 = 168;

pub const TIME_IMAGE_WIDTH: i16 = 70;
pub const TIME_IMAGE_HEIGHT: i16 = 70;

pub const DATE_IMAGE_WIDTH: i16 = 20;
pub const DATE_IMAGE_HEIGHT: i16 = 20;

pub const YEAR_IMAGE_WIDTH: i16 = 10;
pub const YEAR_IMAGE_HEIGHT: i16 = 10;

pub const DAY_IMAGE_WIDTH: i16 = 20;
pub const DAY_IMAGE_HEIGHT: i16 = 10;

pub const MARGIN: i16 = 1;
pub const TIME_SLOT_SPACE: i16 = 2;
pub const DATE_PART_SPACE: i16 = 4;

/// Top of the date strip; the time grid is square
pub const DATE_CONTAINER_Y: i16 = SCREEN_WIDTH;
pub const DATE_CONTAINER_HEIGHT: i16 = SCREEN_HEIGHT - SCREEN_WIDTH;

const DATE_LAYER_WIDTH: i16 = DATE_IMAGE_WIDTH * 4 + MARGIN * 2 + DATE_PART_SPACE;
const DATE_LAYER_X: i16 = (SCREEN_WIDTH - DATE_LAYER_WIDTH) / 2;

/// Exit and entry edges of an animated slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SlideEdges {
    /// Edge the outgoing digit slides toward
    pub exit: Edge,
    /// Edge the incoming digit slides in from
    pub entry: Edge,
}

/// Static description of one slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotSpec {
    /// Resting frame
    pub bounds: Rect,
    /// Layer owned by the slot
    pub surface: SurfaceId,
    /// Slide edges, or None for slots that never animate
    pub slide: Option<SlideEdges>,
}

/// Static description of a slot group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupLayout {
    /// Which group this is
    pub kind: GroupKind,
    /// Parent layer the slot layers are children of
    pub parent: SurfaceId,
    /// Visible area; slides start and end just outside it
    pub clip: Rect,
    /// Slots in index order
    pub slots: &'static [SlotSpec],
}

/// Layout of all four groups, in [`GroupKind`] order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub groups: [GroupLayout; 4],
}

impl ScreenLayout {
    /// Layout of one group
    pub fn group(&self, kind: GroupKind) -> &GroupLayout {
        &self.groups[kind.index()]
    }
}

/// Resting frame of a time slot
pub const fn frame_for_time_slot(index: i16) -> Rect {
    let x = MARGIN + (index % 2) * (TIME_IMAGE_WIDTH + TIME_SLOT_SPACE);
    let y = MARGIN + (index / 2) * (TIME_IMAGE_HEIGHT + TIME_SLOT_SPACE);
    Rect::new(x, y, TIME_IMAGE_WIDTH, TIME_IMAGE_HEIGHT)
}

/// Resting frame of a date slot (two parts of two digits)
pub const fn frame_for_date_slot(index: i16) -> Rect {
    let mut x = DATE_LAYER_X + index * (DATE_IMAGE_WIDTH + MARGIN);
    if index >= 2 {
        // Extra space between the two date parts
        x += DATE_PART_SPACE - MARGIN;
    }
    let y = DATE_CONTAINER_Y + DATE_CONTAINER_HEIGHT - DATE_IMAGE_HEIGHT - MARGIN;
    Rect::new(x, y, DATE_IMAGE_WIDTH, DATE_IMAGE_HEIGHT)
}

/// Resting frame of a year/second slot, right-aligned in the date strip
pub const fn frame_for_year_slot(index: i16) -> Rect {
    let layer_x = SCREEN_WIDTH - 2 * (YEAR_IMAGE_WIDTH + MARGIN);
    let x = layer_x + index * (YEAR_IMAGE_WIDTH + MARGIN);
    let y = DATE_CONTAINER_Y + DATE_CONTAINER_HEIGHT - YEAR_IMAGE_HEIGHT - MARGIN;
    Rect::new(x, y, YEAR_IMAGE_WIDTH, YEAR_IMAGE_HEIGHT)
}

/// Resting frame of the weekday slot, left-aligned in the date strip
pub const fn frame_for_day_slot() -> Rect {
    let y = DATE_CONTAINER_Y + DATE_CONTAINER_HEIGHT - DAY_IMAGE_HEIGHT - MARGIN;
    Rect::new(MARGIN, y, DAY_IMAGE_WIDTH, DAY_IMAGE_HEIGHT)
}

const fn slide(exit: Edge, entry: Edge) -> Option<SlideEdges> {
    Some(SlideEdges { exit, entry })
}

const fn fixed(bounds: Rect, surface: u8) -> SlotSpec {
    SlotSpec {
        bounds,
        surface: SurfaceId(surface),
        slide: None,
    }
}

/// Parent layers
pub const ROOT_SURFACE: SurfaceId = SurfaceId(16);
pub const DATE_SURFACE: SurfaceId = SurfaceId(17);
pub const YEAR_SURFACE: SurfaceId = SurfaceId(18);
pub const DAY_SURFACE: SurfaceId = SurfaceId(19);

const TIME_SLOTS: [SlotSpec; 4] = [
    SlotSpec {
        bounds: frame_for_time_slot(0),
        surface: SurfaceId(0),
        slide: slide(Edge::Top, Edge::Left),
    },
    SlotSpec {
        bounds: frame_for_time_slot(1),
        surface: SurfaceId(1),
        slide: slide(Edge::Right, Edge::Top),
    },
    SlotSpec {
        bounds: frame_for_time_slot(2),
        surface: SurfaceId(2),
        slide: slide(Edge::Left, Edge::Bottom),
    },
    SlotSpec {
        bounds: frame_for_time_slot(3),
        surface: SurfaceId(3),
        slide: slide(Edge::Bottom, Edge::Right),
    },
];

const DATE_SLOTS: [SlotSpec; 4] = [
    fixed(frame_for_date_slot(0), 4),
    fixed(frame_for_date_slot(1), 5),
    fixed(frame_for_date_slot(2), 6),
    fixed(frame_for_date_slot(3), 7),
];

const YEAR_SLOTS: [SlotSpec; 2] = [
    fixed(frame_for_year_slot(0), 8),
    fixed(frame_for_year_slot(1), 9),
];

const DAY_SLOTS: [SlotSpec; 1] = [fixed(frame_for_day_slot(), 10)];

const TIME_CLIP: Rect = Rect::new(0, 0, SCREEN_WIDTH, SCREEN_WIDTH);
const DATE_CLIP: Rect = Rect::new(0, DATE_CONTAINER_Y, SCREEN_WIDTH, DATE_CONTAINER_HEIGHT);

/// The Revolution face layout shared by all variants
pub static REVOLUTION_LAYOUT: ScreenLayout = ScreenLayout {
    groups: [
        GroupLayout {
            kind: GroupKind::Time,
            parent: ROOT_SURFACE,
            clip: TIME_CLIP,
            slots: &TIME_SLOTS,
        },
        GroupLayout {
            kind: GroupKind::Date,
            parent: DATE_SURFACE,
            clip: DATE_CLIP,
            slots: &DATE_SLOTS,
        },
        GroupLayout {
            kind: GroupKind::Year,
            parent: YEAR_SURFACE,
            clip: DATE_CLIP,
            slots: &YEAR_SLOTS,
        },
        GroupLayout {
            kind: GroupKind::Day,
            parent: DAY_SURFACE,
            clip: DATE_CLIP,
            slots: &DAY_SLOTS,
        },
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_grid() {
        assert_eq!(frame_for_time_slot(0), Rect::new(1, 1, 70, 70));
        assert_eq!(frame_for_time_slot(1), Rect::new(73, 1, 70, 70));
        assert_eq!(frame_for_time_slot(2), Rect::new(1, 73, 70, 70));
        assert_eq!(frame_for_time_slot(3), Rect::new(73, 73, 70, 70));
    }

    #[test]
    fn test_date_strip() {
        assert_eq!(frame_for_date_slot(0), Rect::new(29, 147, 20, 20));
        assert_eq!(frame_for_date_slot(1), Rect::new(50, 147, 20, 20));
        assert_eq!(frame_for_date_slot(2), Rect::new(74, 147, 20, 20));
        assert_eq!(frame_for_date_slot(3), Rect::new(95, 147, 20, 20));
        assert_eq!(frame_for_year_slot(0), Rect::new(122, 157, 10, 10));
        assert_eq!(frame_for_year_slot(1), Rect::new(133, 157, 10, 10));
        assert_eq!(frame_for_day_slot(), Rect::new(1, 157, 20, 10));
    }

    #[test]
    fn test_groups_in_kind_order() {
        for kind in GroupKind::ALL {
            let group = REVOLUTION_LAYOUT.group(kind);
            assert_eq!(group.kind, kind);
            assert_eq!(group.slots.len(), kind.slot_count());
        }
    }

    #[test]
    fn test_slots_stay_inside_their_clip() {
        for group in &REVOLUTION_LAYOUT.groups {
            for spec in group.slots {
                assert!(spec.bounds.x >= group.clip.x);
                assert!(spec.bounds.right() <= group.clip.right());
                assert!(spec.bounds.y >= group.clip.y);
                assert!(spec.bounds.bottom() <= group.clip.bottom());
            }
        }
    }

    #[test]
    fn test_surfaces_are_unique() {
        let mut seen = std::vec::Vec::new();
        for group in &REVOLUTION_LAYOUT.groups {
            assert!(!seen.contains(&group.parent));
            seen.push(group.parent);
            for spec in group.slots {
                assert!(!seen.contains(&spec.surface));
                seen.push(spec.surface);
            }
        }
    }

    #[test]
    fn test_time_slots_form_a_conveyor() {
        // Each slot enters from the edge its predecessor exits toward
        const ORDER: [usize; 4] = [0, 1, 3, 2];
        for i in 0..ORDER.len() {
            let prev = TIME_SLOTS[ORDER[i]].slide.unwrap();
            let next = TIME_SLOTS[ORDER[(i + 1) % ORDER.len()]].slide.unwrap();
            assert_eq!(prev.exit, next.entry);
        }
    }

    #[test]
    fn test_only_time_slots_animate() {
        for group in &REVOLUTION_LAYOUT.groups {
            let animated = group.slots.iter().all(|s| s.slide.is_some());
            assert_eq!(animated, group.kind == GroupKind::Time);
        }
    }
}
