//! Per-frame dirty-rectangle queue.
//!
//! Bounded, cleared by the frame driver at the end of every frame. The
//! queue itself never grows; a rect that does not fit is dropped and
//! the push reports it, letting the renderer escalate to a whole-map
//! redraw so the region is not lost.

use isoblit_core::config::MAX_DIRTY_RECTS;
use isoblit_core::geom::Rect;
use isoblit_core::BoundedVec;

/// Bounded queue of screen rectangles needing repaint this frame.
#[derive(Debug, Default)]
pub struct DirtyRects {
    rects: BoundedVec<Rect, MAX_DIRTY_RECTS>,
}

impl DirtyRects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a rectangle. Returns `false` when the queue is saturated
    /// and the rect was dropped.
    pub fn push(&mut self, rect: Rect) -> bool {
        if rect.is_empty() {
            return true;
        }
        self.rects.push(rect).is_ok()
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rect> {
        self.rects.iter()
    }

    pub fn clear(&mut self) {
        self.rects.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overflow_reports_drop() {
        let mut q = DirtyRects::new();
        for i in 0..MAX_DIRTY_RECTS as i16 {
            assert!(q.push(Rect::new(i, 0, 1, 1)));
        }
        assert!(!q.push(Rect::new(0, 1, 1, 1)));
        assert_eq!(q.len(), MAX_DIRTY_RECTS);
    }

    #[test]
    fn test_empty_rects_ignored() {
        let mut q = DirtyRects::new();
        assert!(q.push(Rect::new(0, 0, 0, 5)));
        assert!(q.is_empty());
    }

    #[test]
    fn test_clear_ends_frame() {
        let mut q = DirtyRects::new();
        q.push(Rect::new(0, 0, 4, 4));
        q.clear();
        assert!(q.is_empty());
        assert!(q.push(Rect::new(1, 1, 2, 2)));
    }
}
