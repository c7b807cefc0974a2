use glam::I16Vec2;

use crate::config::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, PROJECTION_ORIGIN_X, PROJECTION_ORIGIN_Y, TILEMAP_HEIGHT,
    TILEMAP_WIDTH, TILE_HALF_HEIGHT, TILE_HALF_WIDTH, TILE_HEIGHT, TILE_WIDTH,
};

/// Coordinate in screen-pixel space.
pub type ScreenVec = I16Vec2;

/// Coordinate in world (tile-grid) space.
pub type WorldVec = I16Vec2;

/// Axis-aligned rectangle in screen-pixel space. Used only for dirty
/// tracking and blit clipping, never in world space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i16,
    pub y: i16,
    pub w: i16,
    pub h: i16,
}

impl Rect {
    pub fn new(x: i16, y: i16, w: i16, h: i16) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_origin_size(origin: ScreenVec, size: ScreenVec) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            w: size.x,
            h: size.y,
        }
    }

    /// The whole physical display.
    pub fn display() -> Self {
        Self::new(0, 0, DISPLAY_WIDTH, DISPLAY_HEIGHT)
    }

    pub fn right(&self) -> i16 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i16 {
        self.y + self.h
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Grow the rectangle by `dx`/`dy` pixels on every side.
    pub fn inflate(&self, dx: i16, dy: i16) -> Self {
        Self {
            x: self.x - dx,
            y: self.y - dy,
            w: self.w + 2 * dx,
            h: self.h + 2 * dy,
        }
    }

    /// Intersection of two rectangles, `None` when they do not overlap.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());
        if x2 > x && y2 > y {
            Some(Rect::new(x, y, x2 - x, y2 - y))
        } else {
            None
        }
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.intersect(other).is_some()
    }
}

/// Diamond projection from tile-grid space to screen-pixel space.
/// Returns the screen anchor of the tile: the top-center of its painted
/// diamond. Pure and total.
pub fn world_to_screen(w: WorldVec) -> ScreenVec {
    let x = (w.x - w.y) * TILE_HALF_WIDTH + PROJECTION_ORIGIN_X;
    let y = (w.x + w.y) * TILE_HALF_HEIGHT + PROJECTION_ORIGIN_Y;
    ScreenVec::new(x, y)
}

/// Exact algebraic inverse of [`world_to_screen`], floor rounding.
///
/// Only used to map a dirty screen rectangle back onto candidate tiles,
/// so the binding requirement is conservative coverage, not pixel-exact
/// hit testing. On tile anchors it is an exact integer identity.
pub fn screen_to_world(s: ScreenVec) -> WorldVec {
    let dx = f32::from(s.x - PROJECTION_ORIGIN_X) / f32::from(TILE_HALF_WIDTH);
    let dy = f32::from(s.y - PROJECTION_ORIGIN_Y) / f32::from(TILE_HALF_HEIGHT);

    let wx = ((dx + dy) / 2.0).floor() as i16;
    let wy = ((dy - dx) / 2.0).floor() as i16;

    WorldVec::new(wx, wy)
}

/// Screen footprint of one tile's painted diamond bitmap.
pub fn tile_screen_rect(tile: WorldVec) -> Rect {
    let anchor = world_to_screen(tile);
    Rect::new(anchor.x - TILE_HALF_WIDTH, anchor.y, TILE_WIDTH, TILE_HEIGHT)
}

/// Conservative range of tiles whose painted footprint may intersect a
/// dirty screen rectangle, clamped to grid bounds.
///
/// The rect is inflated by one full tile so that tiles whose anchor
/// lies outside the rect but whose diamond still reaches into it are
/// covered. All four corners are transformed independently and the
/// per-axis min/max taken: the projection is not axis-aligned, so
/// transforming only two opposite corners would miss tiles.
pub fn tile_range_for_rect(rect: &Rect) -> (WorldVec, WorldVec) {
    let r = rect.inflate(TILE_WIDTH, TILE_HEIGHT);

    let corners = [
        screen_to_world(ScreenVec::new(r.x, r.y)),
        screen_to_world(ScreenVec::new(r.right(), r.y)),
        screen_to_world(ScreenVec::new(r.x, r.bottom())),
        screen_to_world(ScreenVec::new(r.right(), r.bottom())),
    ];

    let mut min = corners[0];
    let mut max = corners[0];
    for c in &corners[1..] {
        min = min.min(*c);
        max = max.max(*c);
    }

    let max_tx = i16::from(TILEMAP_WIDTH) - 1;
    let max_ty = i16::from(TILEMAP_HEIGHT) - 1;
    let min = min.clamp(WorldVec::ZERO, WorldVec::new(max_tx, max_ty));
    let max = max.clamp(WorldVec::ZERO, WorldVec::new(max_tx, max_ty));

    (min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_whole_grid() {
        for ty in 0..TILEMAP_HEIGHT as i16 {
            for tx in 0..TILEMAP_WIDTH as i16 {
                let tile = WorldVec::new(tx, ty);
                assert_eq!(screen_to_world(world_to_screen(tile)), tile);
            }
        }
    }

    #[test]
    fn test_inverse_is_total_off_grid() {
        // Negative and far coordinates must not panic or wrap oddly.
        let far = WorldVec::new(-40, 90);
        assert_eq!(screen_to_world(world_to_screen(far)), far);
    }

    /// Every tile whose painted diamond footprint intersects `rect`
    /// must fall inside the computed range (superset requirement).
    fn assert_range_covers_footprints(rect: &Rect) {
        let (min, max) = tile_range_for_rect(rect);
        for ty in 0..TILEMAP_HEIGHT as i16 {
            for tx in 0..TILEMAP_WIDTH as i16 {
                let tile = WorldVec::new(tx, ty);
                if tile_screen_rect(tile).intersects(rect) {
                    assert!(
                        tx >= min.x && tx <= max.x && ty >= min.y && ty <= max.y,
                        "tile ({tx},{ty}) intersects {rect:?} but range is {min:?}..{max:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_range_superset_on_tile_seam() {
        // Rectangle centered exactly on the seam between (1,1) and (2,1).
        let seam = world_to_screen(WorldVec::new(2, 1));
        let rect = Rect::new(seam.x - TILE_HALF_WIDTH - 4, seam.y - 4, 8, 8);
        assert_range_covers_footprints(&rect);
    }

    #[test]
    fn test_range_superset_inside_single_tile() {
        // Small rectangle fully interior to tile (2,3)'s footprint.
        let anchor = world_to_screen(WorldVec::new(2, 3));
        let rect = Rect::new(anchor.x - 2, anchor.y + 6, 4, 4);
        assert_range_covers_footprints(&rect);

        let (min, max) = tile_range_for_rect(&rect);
        assert!(min.x <= 2 && max.x >= 2);
        assert!(min.y <= 3 && max.y >= 3);
    }

    #[test]
    fn test_rect_intersection() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        assert_eq!(a.intersect(&b), Some(Rect::new(5, 5, 5, 5)));

        let c = Rect::new(10, 0, 5, 5);
        assert!(a.intersect(&c).is_none(), "edge-adjacent rects do not overlap");
    }

    #[test]
    fn test_range_clamped_to_grid() {
        // A rect far off the top-left of the world still yields a valid
        // (possibly over-wide) in-bounds range.
        let rect = Rect::new(-500, -500, 10, 10);
        let (min, max) = tile_range_for_rect(&rect);
        assert!(min.x >= 0 && min.y >= 0);
        assert!(max.x < TILEMAP_WIDTH as i16 && max.y < TILEMAP_HEIGHT as i16);
    }
}
