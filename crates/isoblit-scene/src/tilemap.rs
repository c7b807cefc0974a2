//! Fixed-grid tilemap with bounded index types.
//!
//! Grid dimensions and the kind-slot count are compile-time constants;
//! [`TilePos`] and [`TileKind`] make out-of-range coordinates and kind
//! indices unrepresentable instead of runtime-checked.

use isoblit_bitmap::BitmapId;
use isoblit_core::config::{MAX_TILE_KINDS, TILEMAP_HEIGHT, TILEMAP_WIDTH};
use isoblit_core::geom::WorldVec;

/// In-bounds tile coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilePos {
    x: u8,
    y: u8,
}

impl TilePos {
    /// `None` when the coordinate lies outside the grid.
    pub fn new(x: u8, y: u8) -> Option<Self> {
        if x < TILEMAP_WIDTH && y < TILEMAP_HEIGHT {
            Some(Self { x, y })
        } else {
            None
        }
    }

    pub fn x(&self) -> u8 {
        self.x
    }

    pub fn y(&self) -> u8 {
        self.y
    }

    pub fn to_world(self) -> WorldVec {
        WorldVec::new(i16::from(self.x), i16::from(self.y))
    }

    /// All grid positions in row-major order.
    pub fn all() -> impl Iterator<Item = TilePos> {
        (0..TILEMAP_HEIGHT)
            .flat_map(|y| (0..TILEMAP_WIDTH).map(move |x| TilePos { x, y }))
    }
}

/// Valid tile-kind index (always `< MAX_TILE_KINDS`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileKind(u8);

impl TileKind {
    pub fn new(kind: u8) -> Option<Self> {
        if kind < MAX_TILE_KINDS {
            Some(Self(kind))
        } else {
            None
        }
    }

    pub fn index(&self) -> usize {
        usize::from(self.0)
    }
}

/// The world grid: tile-kind indices plus kind-to-bitmap bindings and
/// the whole-map dirty flag.
///
/// The flag goes up on kind-binding changes and bulk regeneration; it
/// comes back down only when the frame driver finishes a full redraw.
/// Single-tile edits go through the incremental dirty-rect path instead.
#[derive(Debug)]
pub struct Tilemap {
    dirty: bool,
    kinds: [Option<BitmapId>; MAX_TILE_KINDS as usize],
    tiles: [[u8; TILEMAP_WIDTH as usize]; TILEMAP_HEIGHT as usize],
}

impl Tilemap {
    /// A new map starts fully dirty: nothing on the panel matches it yet.
    pub fn new() -> Self {
        Self {
            dirty: true,
            kinds: [None; MAX_TILE_KINDS as usize],
            tiles: [[0; TILEMAP_WIDTH as usize]; TILEMAP_HEIGHT as usize],
        }
    }

    /// Bind a kind slot to a bitmap. Affects every tile of that kind,
    /// so the whole map is invalidated.
    pub fn bind_kind(&mut self, kind: TileKind, bitmap: BitmapId) {
        self.kinds[kind.index()] = Some(bitmap);
        self.dirty = true;
    }

    /// Store one tile's kind. Does not touch the dirty flag; callers
    /// invalidate the single tile through the renderer.
    pub fn set(&mut self, pos: TilePos, kind: TileKind) {
        self.tiles[usize::from(pos.y)][usize::from(pos.x)] = kind.0;
    }

    /// Overwrite the whole grid and invalidate it (level regeneration).
    pub fn fill(&mut self, mut kind_at: impl FnMut(TilePos) -> TileKind) {
        for pos in TilePos::all() {
            self.tiles[usize::from(pos.y)][usize::from(pos.x)] = kind_at(pos).0;
        }
        self.dirty = true;
    }

    pub fn kind_of(&self, pos: TilePos) -> TileKind {
        TileKind(self.tiles[usize::from(pos.y)][usize::from(pos.x)])
    }

    /// The bitmap bound to a tile's kind, if any.
    pub fn bitmap_for(&self, pos: TilePos) -> Option<BitmapId> {
        self.kinds[self.kind_of(pos).index()]
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

impl Default for Tilemap {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_unrepresentable() {
        assert!(TilePos::new(TILEMAP_WIDTH - 1, TILEMAP_HEIGHT - 1).is_some());
        assert!(TilePos::new(TILEMAP_WIDTH, 0).is_none());
        assert!(TilePos::new(0, TILEMAP_HEIGHT).is_none());
        assert!(TileKind::new(MAX_TILE_KINDS).is_none());
        assert!(TileKind::new(0).is_some());
    }

    #[test]
    fn test_set_does_not_mark_dirty() {
        let mut map = Tilemap::new();
        map.clear_dirty();
        let pos = TilePos::new(2, 2).unwrap();
        let kind = TileKind::new(1).unwrap();
        map.set(pos, kind);
        assert_eq!(map.kind_of(pos), kind);
        assert!(!map.is_dirty(), "single-tile edits use the incremental path");
    }

    #[test]
    fn test_bind_kind_marks_dirty() {
        let mut map = Tilemap::new();
        map.clear_dirty();
        // BitmapId construction goes through a catalog.
        let mut catalog = isoblit_bitmap::Catalog::new();
        let id = catalog.register("GRASS.BMP").unwrap();
        map.bind_kind(TileKind::new(0).unwrap(), id);
        assert!(map.is_dirty());
        assert_eq!(map.bitmap_for(TilePos::new(0, 0).unwrap()), Some(id));
    }

    #[test]
    fn test_all_positions_cover_grid() {
        let count = TilePos::all().count();
        assert_eq!(
            count,
            usize::from(TILEMAP_WIDTH) * usize::from(TILEMAP_HEIGHT)
        );
    }
}
