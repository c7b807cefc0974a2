//! Minimal bitmap-file header format.
//!
//! The consumed files are uncompressed, bottom-up, 24-bit BGR pixel
//! arrays behind a fixed-size header. Exactly two header fields matter:
//! the 4-byte little-endian offset to pixel data and the 4-byte
//! little-endian pixel width, from which the padded row stride is
//! derived. Everything else in the header is ignored, and the renderer
//! never writes bitmap files.

use crate::storage::StorageError;

/// Byte offset of the LE32 pixel-data-offset field.
pub const PIXEL_OFFSET_FIELD: usize = 10;

/// Byte offset of the LE32 pixel-width field.
pub const WIDTH_FIELD: usize = 18;

/// Number of header bytes the renderer reads.
pub const HEADER_BYTES: usize = 26;

/// Bytes per pixel in the stored row format (BGR).
pub const BYTES_PER_PIXEL: usize = 3;

/// Row stride in bytes: pixel width in bytes padded to a 4-byte boundary.
pub fn row_stride(width: u32) -> u32 {
    ((width * BYTES_PER_PIXEL as u32) + 3) & !3
}

/// Header metadata resolved once per bitmap (lazy binding).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapMeta {
    pub pixel_offset: u32,
    pub width: u32,
    pub row_stride: u32,
}

/// Errors raised while reading a bitmap through storage.
#[derive(Debug, thiserror::Error)]
pub enum BitmapError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("truncated header: {0} bytes, need {HEADER_BYTES}")]
    TruncatedHeader(usize),

    #[error("short read: expected {expected} bytes, got {actual}")]
    ShortRead { expected: usize, actual: usize },
}

/// Parse the two consumed fields out of a raw header buffer.
pub fn parse_header(bytes: &[u8]) -> Result<BitmapMeta, BitmapError> {
    if bytes.len() < HEADER_BYTES {
        return Err(BitmapError::TruncatedHeader(bytes.len()));
    }

    let field = |at: usize| {
        u32::from_le_bytes(bytes[at..at + 4].try_into().expect("4-byte slice"))
    };

    let pixel_offset = field(PIXEL_OFFSET_FIELD);
    let width = field(WIDTH_FIELD);

    Ok(BitmapMeta {
        pixel_offset,
        width,
        row_stride: row_stride(width),
    })
}
