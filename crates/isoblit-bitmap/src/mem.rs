//! In-memory storage backend.
//!
//! Stands in for the SD card on the host: named byte blobs with
//! open/seek/read counters so tests can assert exactly how much I/O a
//! frame performed. Also provides a synthesizer for minimal headered
//! bitmaps.

use crate::format::{BYTES_PER_PIXEL, HEADER_BYTES, PIXEL_OFFSET_FIELD, WIDTH_FIELD};
use crate::storage::{Storage, StorageError};

/// Open-file state for [`MemStorage`].
#[derive(Debug)]
pub struct MemHandle {
    file: usize,
    pos: usize,
}

/// In-memory named-file store with I/O counters.
#[derive(Debug, Default)]
pub struct MemStorage {
    files: Vec<(String, Vec<u8>)>,
    opens: u32,
    seeks: u32,
    reads: u32,
    open_log: Vec<String>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a named file.
    pub fn insert(&mut self, name: &str, bytes: Vec<u8>) {
        if let Some(entry) = self.files.iter_mut().find(|(n, _)| n == name) {
            entry.1 = bytes;
        } else {
            self.files.push((name.to_owned(), bytes));
        }
    }

    /// Truncate an existing file to `len` bytes (for short-read tests).
    pub fn truncate(&mut self, name: &str, len: usize) {
        if let Some(entry) = self.files.iter_mut().find(|(n, _)| n == name) {
            entry.1.truncate(len);
        }
    }

    pub fn opens(&self) -> u32 {
        self.opens
    }

    pub fn seeks(&self) -> u32 {
        self.seeks
    }

    pub fn reads(&self) -> u32 {
        self.reads
    }

    /// Names passed to `open` since the last counter reset, in order.
    pub fn open_log(&self) -> &[String] {
        &self.open_log
    }

    pub fn reset_counters(&mut self) {
        self.opens = 0;
        self.seeks = 0;
        self.reads = 0;
        self.open_log.clear();
    }
}

impl Storage for MemStorage {
    type Handle = MemHandle;

    fn open(&mut self, name: &str) -> Result<MemHandle, StorageError> {
        self.opens += 1;
        self.open_log.push(name.to_owned());
        let file = self
            .files
            .iter()
            .position(|(n, _)| n == name)
            .ok_or_else(|| StorageError::NotFound(name.to_owned()))?;
        Ok(MemHandle { file, pos: 0 })
    }

    fn seek(&mut self, handle: &mut MemHandle, offset: u32) -> Result<(), StorageError> {
        self.seeks += 1;
        handle.pos = offset as usize;
        Ok(())
    }

    fn read(&mut self, handle: &mut MemHandle, buf: &mut [u8]) -> Result<usize, StorageError> {
        self.reads += 1;
        let bytes = &self.files[handle.file].1;
        let start = handle.pos.min(bytes.len());
        let n = buf.len().min(bytes.len() - start);
        buf[..n].copy_from_slice(&bytes[start..start + n]);
        handle.pos = start + n;
        Ok(n)
    }

    fn close(&mut self, _handle: MemHandle) {}
}

/// Build a minimal headered bottom-up BGR bitmap. `pixel` is called in
/// top-down (x, y) order and returns (r, g, b); pure black encodes the
/// transparency key.
pub fn synth_bitmap(
    width: u32,
    height: u32,
    pixel: impl Fn(u32, u32) -> (u8, u8, u8),
) -> Vec<u8> {
    let stride = crate::format::row_stride(width) as usize;
    let mut out = vec![0u8; HEADER_BYTES + stride * height as usize];

    out[0] = b'B';
    out[1] = b'M';
    out[PIXEL_OFFSET_FIELD..PIXEL_OFFSET_FIELD + 4]
        .copy_from_slice(&(HEADER_BYTES as u32).to_le_bytes());
    out[WIDTH_FIELD..WIDTH_FIELD + 4].copy_from_slice(&width.to_le_bytes());
    out[WIDTH_FIELD + 4..WIDTH_FIELD + 8].copy_from_slice(&height.to_le_bytes());

    for y in 0..height {
        // Row 0 in the file is the bottommost image row.
        let row_start = HEADER_BYTES + (height - 1 - y) as usize * stride;
        for x in 0..width {
            let (r, g, b) = pixel(x, y);
            let at = row_start + x as usize * BYTES_PER_PIXEL;
            out[at] = b;
            out[at + 1] = g;
            out[at + 2] = r;
        }
    }

    out
}
