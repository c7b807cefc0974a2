//! A scene: one tilemap plus a bounded, ordered sprite list.

use isoblit_core::config::MAX_SPRITES;

use crate::sprite::Sprite;
use crate::tilemap::Tilemap;

/// Stable handle to a sprite slot. Paint order is slot order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteId(u8);

/// One renderable world: the tilemap and up to [`MAX_SPRITES`] sprites.
#[derive(Debug)]
pub struct Scene {
    tilemap: Tilemap,
    sprites: [Option<Sprite>; MAX_SPRITES],
}

impl Scene {
    pub fn new(tilemap: Tilemap) -> Self {
        Self {
            tilemap,
            sprites: std::array::from_fn(|_| None),
        }
    }

    pub fn tilemap(&self) -> &Tilemap {
        &self.tilemap
    }

    pub fn tilemap_mut(&mut self) -> &mut Tilemap {
        &mut self.tilemap
    }

    /// Add a sprite into the first free slot. Capacity overflow drops
    /// the sprite (bounded-resource degradation, not a fault).
    pub fn add_sprite(&mut self, sprite: Sprite) -> Option<SpriteId> {
        for (i, slot) in self.sprites.iter_mut().enumerate() {
            if slot.is_none() {
                *slot = Some(sprite);
                return Some(SpriteId(i as u8));
            }
        }
        log::warn!("scene sprite list full, dropping sprite");
        None
    }

    pub fn remove_sprite(&mut self, id: SpriteId) -> Option<Sprite> {
        self.sprites[usize::from(id.0)].take()
    }

    pub fn sprite(&self, id: SpriteId) -> Option<&Sprite> {
        self.sprites[usize::from(id.0)].as_ref()
    }

    pub fn sprite_mut(&mut self, id: SpriteId) -> Option<&mut Sprite> {
        self.sprites[usize::from(id.0)].as_mut()
    }

    /// Occupied sprite slots in paint order.
    pub fn sprites(&self) -> impl Iterator<Item = &Sprite> {
        self.sprites.iter().filter_map(Option::as_ref)
    }

    pub fn sprites_mut(&mut self) -> impl Iterator<Item = &mut Sprite> {
        self.sprites.iter_mut().filter_map(Option::as_mut)
    }

    /// Mark the tilemap and every sprite dirty. Used when a scene
    /// becomes active (its first frame must be a full redraw) and when
    /// a full tile repaint will paint over previously drawn sprites.
    pub fn invalidate_all(&mut self) {
        self.tilemap.mark_dirty();
        for sprite in self.sprites_mut() {
            sprite.mark_dirty();
        }
    }
}
