//! Frame driver and scene mutation API.
//!
//! Owns the display, the storage backend, the bitmap catalog, the
//! active-scene slot and the per-frame dirty-rect queue. Game logic
//! mutates the scene through this type so every mutation leaves the
//! right dirty state behind, then calls [`Renderer::render_frame`] once
//! per tick.

use isoblit_bitmap::{BitmapId, Catalog, Storage};
use isoblit_core::color::BACKGROUND;
use isoblit_core::config::MAX_DIRTY_RECTS;
use isoblit_core::geom::{tile_range_for_rect, tile_screen_rect, Rect, ScreenVec};
use isoblit_core::BoundedVec;
use isoblit_scene::{DirtyRects, Scene, Sprite, SpriteId, TileKind, TilePos, Tilemap};

use crate::blit;
use crate::display::Display;
use crate::glyphs;
use crate::irq::InterruptPolicy;

/// Scene renderer: dirty tracking plus the per-frame redraw pass.
pub struct Renderer<D: Display, S: Storage, I: InterruptPolicy> {
    display: D,
    storage: S,
    irq: I,
    catalog: Catalog,
    scene: Option<Scene>,
    dirty: DirtyRects,
}

impl<D: Display, S: Storage, I: InterruptPolicy> Renderer<D, S, I> {
    pub fn new(display: D, storage: S, irq: I) -> Self {
        Self {
            display,
            storage,
            irq,
            catalog: Catalog::new(),
            scene: None,
            dirty: DirtyRects::new(),
        }
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Register a bitmap file with the catalog.
    pub fn register_bitmap(&mut self, name: &str) -> Option<BitmapId> {
        self.catalog.register(name)
    }

    /// Make a scene active, returning the previous one. The incoming
    /// scene is invalidated wholesale so its first frame is a full
    /// redraw; rects queued against the old scene are discarded.
    pub fn set_active_scene(&mut self, mut scene: Scene) -> Option<Scene> {
        scene.invalidate_all();
        self.dirty.clear();
        self.scene.replace(scene)
    }

    /// Deactivate the scene and blank the panel.
    pub fn reset(&mut self) -> Option<Scene> {
        self.dirty.clear();
        self.display.clear(BACKGROUND);
        self.scene.take()
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    /// Bind a tile kind to a bitmap. Rebinding affects every tile of
    /// that kind, so the whole scene is invalidated.
    pub fn bind_tile_kind(&mut self, kind: TileKind, bitmap: BitmapId) {
        let Some(scene) = self.scene.as_mut() else {
            return;
        };
        scene.tilemap_mut().bind_kind(kind, bitmap);
        scene.invalidate_all();
    }

    pub fn add_sprite(&mut self, sprite: Sprite) -> Option<SpriteId> {
        self.scene.as_mut()?.add_sprite(sprite)
    }

    /// Remove a sprite and queue its footprint so the tiles underneath
    /// are repainted.
    pub fn remove_sprite(&mut self, id: SpriteId) {
        let Some(scene) = self.scene.as_mut() else {
            return;
        };
        if let Some(sprite) = scene.remove_sprite(id) {
            self.push_rect(sprite.footprint());
        }
    }

    /// Move a sprite. Both the vacated and the newly covered screen
    /// area are queued for tile repair.
    pub fn move_sprite(&mut self, id: SpriteId, position: ScreenVec) {
        let Some(scene) = self.scene.as_mut() else {
            return;
        };
        let Some(sprite) = scene.sprite_mut(id) else {
            return;
        };
        let old = sprite.footprint();
        sprite.set_position(position);
        let new = sprite.footprint();
        self.push_rect(old);
        self.push_rect(new);
    }

    /// Swap a sprite's bitmap in place. The footprint is queued because
    /// the new bitmap's transparent pixels expose the tiles behind it.
    pub fn set_sprite_bitmap(&mut self, id: SpriteId, bitmap: BitmapId) {
        let Some(scene) = self.scene.as_mut() else {
            return;
        };
        let Some(sprite) = scene.sprite_mut(id) else {
            return;
        };
        sprite.set_bitmap(bitmap);
        let rect = sprite.footprint();
        self.push_rect(rect);
    }

    /// Mark a sprite for repaint and queue its current footprint.
    /// Callers invalidating around their own position changes do so
    /// both before and after the move.
    pub fn invalidate_sprite(&mut self, id: SpriteId) {
        let Some(scene) = self.scene.as_mut() else {
            return;
        };
        let Some(sprite) = scene.sprite_mut(id) else {
            return;
        };
        sprite.mark_dirty();
        let rect = sprite.footprint();
        self.push_rect(rect);
    }

    /// Change one tile's kind through the incremental path.
    pub fn set_tile(&mut self, pos: TilePos, kind: TileKind) {
        let Some(scene) = self.scene.as_mut() else {
            return;
        };
        scene.tilemap_mut().set(pos, kind);
        self.invalidate_tile(pos);
    }

    /// Queue one tile's screen rectangle. Does not set the whole-map
    /// flag; this is the incremental path.
    pub fn invalidate_tile(&mut self, pos: TilePos) {
        if self.scene.is_none() {
            return;
        }
        self.push_rect(tile_screen_rect(pos.to_world()));
    }

    /// Mark the whole tilemap dirty. Cascades to every sprite: the full
    /// tile repaint will paint over them, so they must repaint after.
    pub fn invalidate_tilemap(&mut self) {
        if let Some(scene) = self.scene.as_mut() {
            scene.invalidate_all();
        }
    }

    /// Draw a HUD integer overlay on top of the composited frame.
    pub fn draw_integer(&mut self, x: i16, y: i16, scale: i16, mirrored: bool, value: i32) {
        glyphs::draw_integer(&mut self.display, x, y, scale, mirrored, value);
    }

    fn push_rect(&mut self, rect: Rect) {
        if !self.dirty.push(rect) {
            // Queue saturated: degrade to a larger-than-necessary
            // redraw instead of losing the region.
            log::warn!("dirty-rect queue saturated, falling back to full redraw");
            if let Some(scene) = self.scene.as_mut() {
                scene.invalidate_all();
            }
        }
    }

    /// Run one redraw pass. Interrupts are suppressed for the whole
    /// invocation: window transactions on the shared bus must not be
    /// interleaved with interrupt traffic.
    ///
    /// A storage failure skips that one tile or sprite and leaves its
    /// dirty state for a retry next frame; it never halts the pass.
    pub fn render_frame(&mut self) {
        let Self {
            display,
            storage,
            irq,
            catalog,
            scene,
            dirty,
        } = self;

        let _guard = irq.suppress();
        let Some(scene) = scene.as_mut() else {
            return;
        };

        let mut tile_paints = 0u32;

        if scene.tilemap().is_dirty() {
            // Full redraw: clear, then every tile clipped to the panel.
            display.clear(BACKGROUND);
            let clip = Rect::display();
            let mut all_painted = true;
            for pos in TilePos::all() {
                if paint_tile(display, storage, catalog, scene.tilemap(), pos, &clip) {
                    tile_paints += 1;
                } else {
                    all_painted = false;
                }
            }
            if all_painted {
                scene.tilemap_mut().clear_dirty();
            }
            // Everything was just painted over.
            for sprite in scene.sprites_mut() {
                sprite.mark_dirty();
            }
            dirty.clear();
        } else {
            // Tile repair inside a queued rect paints over any sprite
            // overlapping it; those sprites must repaint afterwards.
            for sprite in scene.sprites_mut() {
                if dirty.iter().any(|r| sprite.footprint().intersects(r)) {
                    sprite.mark_dirty();
                }
            }

            let mut unresolved: BoundedVec<Rect, MAX_DIRTY_RECTS> = BoundedVec::new();
            for rect in dirty.iter() {
                let (min, max) = tile_range_for_rect(rect);
                let mut rect_ok = true;
                for ty in min.y..=max.y {
                    for tx in min.x..=max.x {
                        let Some(pos) = TilePos::new(tx as u8, ty as u8) else {
                            continue;
                        };
                        if !tile_screen_rect(pos.to_world()).intersects(rect) {
                            continue;
                        }
                        if paint_tile(display, storage, catalog, scene.tilemap(), pos, rect) {
                            tile_paints += 1;
                        } else {
                            rect_ok = false;
                        }
                    }
                }
                if !rect_ok {
                    let _ = unresolved.push(*rect);
                }
            }

            dirty.clear();
            for rect in unresolved.iter() {
                dirty.push(*rect);
            }
        }

        let mut sprite_paints = 0u32;
        for sprite in scene.sprites_mut() {
            if !sprite.is_dirty() {
                continue;
            }
            if paint_sprite(display, storage, catalog, sprite) {
                sprite.clear_dirty();
                sprite_paints += 1;
            }
        }

        log::debug!("frame: {tile_paints} tile paints, {sprite_paints} sprite paints");
    }
}

fn paint_tile<D: Display, S: Storage>(
    display: &mut D,
    storage: &mut S,
    catalog: &mut Catalog,
    map: &Tilemap,
    pos: TilePos,
    clip: &Rect,
) -> bool {
    let Some(id) = map.bitmap_for(pos) else {
        return true; // unbound kind: nothing to paint
    };
    let Some(bitmap) = catalog.get_mut(id) else {
        return true;
    };
    let rect = tile_screen_rect(pos.to_world());
    let origin = ScreenVec::new(rect.x, rect.y);
    let size = ScreenVec::new(rect.w, rect.h);
    match blit::blit(display, storage, bitmap, origin, size, clip) {
        Ok(()) => true,
        Err(err) => {
            log::warn!("tile ({}, {}) paint skipped: {err}", pos.x(), pos.y());
            false
        }
    }
}

fn paint_sprite<D: Display, S: Storage>(
    display: &mut D,
    storage: &mut S,
    catalog: &mut Catalog,
    sprite: &Sprite,
) -> bool {
    let Some(bitmap) = catalog.get_mut(sprite.bitmap()) else {
        return true;
    };
    // Sprites are small; repaint them whole.
    let clip = sprite.footprint();
    match blit::blit(
        display,
        storage,
        bitmap,
        sprite.position(),
        sprite.size(),
        &clip,
    ) {
        Ok(()) => true,
        Err(err) => {
            log::warn!("sprite paint skipped: {err}");
            false
        }
    }
}
