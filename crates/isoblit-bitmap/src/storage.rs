//! Seam to the external block-storage device.
//!
//! The real firmware reads bitmap rows off an SD card through a FAT
//! layer; the renderer only needs open/seek/read/close by filename.
//! Reads are synchronous and bounded by one row's worth of bytes.

/// Errors surfaced by a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("file not found: {0}")]
    NotFound(String),

    #[error("storage device error: {0}")]
    Device(String),
}

/// Block-storage abstraction consumed by the streaming blit engine.
///
/// `read` returns the number of bytes actually read; a short count is
/// not an error at this layer; callers classify truncation.
pub trait Storage {
    type Handle;

    fn open(&mut self, name: &str) -> Result<Self::Handle, StorageError>;

    fn seek(&mut self, handle: &mut Self::Handle, offset: u32) -> Result<(), StorageError>;

    fn read(&mut self, handle: &mut Self::Handle, buf: &mut [u8]) -> Result<usize, StorageError>;

    fn close(&mut self, handle: Self::Handle);
}
