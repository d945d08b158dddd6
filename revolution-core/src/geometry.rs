//! Screen geometry
//!
//! All frames are in screen coordinates (pixels, origin top-left).
//! Off-screen frames may have negative origins.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    /// Left edge
    pub x: i16,
    /// Top edge
    pub y: i16,
    /// Width
    pub w: i16,
    /// Height
    pub h: i16,
}

impl Rect {
    /// Empty rectangle at the origin
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Create a rectangle from origin and size
    pub const fn new(x: i16, y: i16, w: i16, h: i16) -> Self {
        Self { x, y, w, h }
    }

    /// One past the rightmost column
    pub const fn right(&self) -> i16 {
        self.x + self.w
    }

    /// One past the bottom row
    pub const fn bottom(&self) -> i16 {
        self.y + self.h
    }

    /// Same size, moved to a new origin
    pub const fn with_origin(&self, x: i16, y: i16) -> Self {
        Self::new(x, y, self.w, self.h)
    }

    /// Check whether two rectangles overlap
    pub const fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Screen edge a sliding image leaves toward or enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    /// Frame just outside `clip` on this edge, keeping the other axis of `rest`
    ///
    /// `rest` is the slot's resting frame; the returned frame has the same
    /// size and is fully outside the clip area.
    pub const fn offscreen_frame(self, rest: Rect, clip: Rect) -> Rect {
        match self {
            Edge::Top => rest.with_origin(rest.x, clip.y - rest.h),
            Edge::Bottom => rest.with_origin(rest.x, clip.bottom()),
            Edge::Left => rest.with_origin(clip.x - rest.w, rest.y),
            Edge::Right => rest.with_origin(clip.right(), rest.y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLIP: Rect = Rect::new(0, 0, 144, 144);
    const SLOT: Rect = Rect::new(1, 1, 70, 70);

    #[test]
    fn test_offscreen_frames() {
        assert_eq!(Edge::Top.offscreen_frame(SLOT, CLIP), Rect::new(1, -70, 70, 70));
        assert_eq!(Edge::Bottom.offscreen_frame(SLOT, CLIP), Rect::new(1, 144, 70, 70));
        assert_eq!(Edge::Left.offscreen_frame(SLOT, CLIP), Rect::new(-70, 1, 70, 70));
        assert_eq!(Edge::Right.offscreen_frame(SLOT, CLIP), Rect::new(144, 1, 70, 70));
    }

    #[test]
    fn test_offscreen_frames_leave_clip() {
        for edge in [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right] {
            let frame = edge.offscreen_frame(SLOT, CLIP);
            assert!(!frame.intersects(&CLIP));
            assert_eq!((frame.w, frame.h), (SLOT.w, SLOT.h));
        }
    }

    #[test]
    fn test_intersects() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(a.intersects(&Rect::new(9, 9, 5, 5)));
        assert!(!a.intersects(&Rect::new(10, 0, 5, 5)));
        assert!(!a.intersects(&Rect::new(0, -5, 5, 5)));
    }
}
