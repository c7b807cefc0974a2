pub mod bounded;
pub mod color;
pub mod config;
pub mod geom;

pub use bounded::BoundedVec;
pub use geom::{Rect, ScreenVec, WorldVec};
