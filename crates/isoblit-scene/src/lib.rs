pub mod dirty;
pub mod scene;
pub mod sprite;
pub mod tilemap;

pub use dirty::DirtyRects;
pub use scene::{Scene, SpriteId};
pub use sprite::Sprite;
pub use tilemap::{TileKind, TilePos, Tilemap};
