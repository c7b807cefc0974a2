//! Movable bitmap-backed screen rectangles.

use isoblit_bitmap::BitmapId;
use isoblit_core::geom::{Rect, ScreenVec};

/// A sprite: screen position, logical size and a non-owning bitmap
/// reference. Small enough that the frame driver always repaints it
/// whole instead of clipping sub-rectangles.
#[derive(Debug, Clone)]
pub struct Sprite {
    dirty: bool,
    position: ScreenVec,
    size: ScreenVec,
    bitmap: BitmapId,
}

impl Sprite {
    /// New sprites start dirty: they have never been painted.
    pub fn new(position: ScreenVec, size: ScreenVec, bitmap: BitmapId) -> Self {
        Self {
            dirty: true,
            position,
            size,
            bitmap,
        }
    }

    pub fn position(&self) -> ScreenVec {
        self.position
    }

    pub fn size(&self) -> ScreenVec {
        self.size
    }

    pub fn bitmap(&self) -> BitmapId {
        self.bitmap
    }

    /// Current painted screen area.
    pub fn footprint(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    pub fn set_position(&mut self, position: ScreenVec) {
        self.position = position;
        self.dirty = true;
    }

    pub fn set_bitmap(&mut self, bitmap: BitmapId) {
        self.bitmap = bitmap;
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bitmap() -> BitmapId {
        isoblit_bitmap::Catalog::new().register("S.BMP").unwrap()
    }

    #[test]
    fn test_new_sprite_is_dirty() {
        let s = Sprite::new(ScreenVec::new(10, 20), ScreenVec::new(16, 16), bitmap());
        assert!(s.is_dirty());
        assert_eq!(s.footprint(), Rect::new(10, 20, 16, 16));
    }

    #[test]
    fn test_mutation_redirties() {
        let mut s = Sprite::new(ScreenVec::new(0, 0), ScreenVec::new(8, 8), bitmap());
        s.clear_dirty();
        s.set_position(ScreenVec::new(4, 0));
        assert!(s.is_dirty());

        s.clear_dirty();
        s.set_bitmap(bitmap());
        assert!(s.is_dirty());
    }
}
