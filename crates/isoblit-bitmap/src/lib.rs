pub mod catalog;
pub mod format;
pub mod mem;
pub mod storage;

pub use catalog::{Bitmap, BitmapId, Catalog};
pub use format::{BitmapError, BitmapMeta};
pub use mem::MemStorage;
pub use storage::{Storage, StorageError};
