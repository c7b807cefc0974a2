//! Single source of truth for the fixed display and world geometry.
//! One panel, one tile size, one grid size for the whole program;
//! nothing here is runtime-configurable.

/// Physical display width in pixels (ILI9341-class panel, landscape).
pub const DISPLAY_WIDTH: i16 = 320;

/// Physical display height in pixels.
pub const DISPLAY_HEIGHT: i16 = 240;

/// Half the painted width of one diamond tile.
pub const TILE_HALF_WIDTH: i16 = 16;

/// Half the painted height of one diamond tile.
pub const TILE_HALF_HEIGHT: i16 = 8;

/// Full painted width of one diamond tile.
pub const TILE_WIDTH: i16 = TILE_HALF_WIDTH * 2;

/// Full painted height of one diamond tile.
pub const TILE_HEIGHT: i16 = TILE_HALF_HEIGHT * 2;

/// Screen x of the world-origin tile anchor.
pub const PROJECTION_ORIGIN_X: i16 = 160;

/// Screen y of the world-origin tile anchor.
pub const PROJECTION_ORIGIN_Y: i16 = 64;

/// Tilemap width in tiles. All tilemaps share one size.
pub const TILEMAP_WIDTH: u8 = 5;

/// Tilemap height in tiles.
pub const TILEMAP_HEIGHT: u8 = 7;

/// Number of kind-to-bitmap binding slots per tilemap.
pub const MAX_TILE_KINDS: u8 = 4;

/// Sprite slots per scene.
pub const MAX_SPRITES: usize = 8;

/// Dirty-rectangle queue capacity per frame.
pub const MAX_DIRTY_RECTS: usize = 16;

/// Bitmap catalog capacity.
pub const MAX_BITMAPS: usize = 8;

/// Streaming row buffer size: one full display row of 24-bit pixels.
pub const MAX_ROW_BYTES: usize = DISPLAY_WIDTH as usize * 3;
