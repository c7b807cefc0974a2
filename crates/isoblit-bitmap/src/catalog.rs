//! Bitmap catalog: per-bitmap metadata keyed by small handles.
//!
//! A [`Bitmap`] never holds decoded pixels, only the source filename
//! and, once resolved, the header metadata needed to seek rows.
//! Scene objects reference catalog entries by [`BitmapId`], keeping the
//! references non-owning and copyable.

use isoblit_core::config::MAX_BITMAPS;
use isoblit_core::BoundedVec;

use crate::format::{self, BitmapError, BitmapMeta, HEADER_BYTES};
use crate::storage::Storage;

/// Non-owning handle to a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapId(u8);

/// One streamable bitmap: a filename plus lazily bound header metadata.
#[derive(Debug)]
pub struct Bitmap {
    name: String,
    meta: Option<BitmapMeta>,
}

impl Bitmap {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            meta: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolve header metadata through an already-open handle.
    /// The header is read exactly once; later calls return the cached
    /// value without touching storage.
    pub fn resolve<S: Storage>(
        &mut self,
        storage: &mut S,
        handle: &mut S::Handle,
    ) -> Result<BitmapMeta, BitmapError> {
        if let Some(meta) = self.meta {
            return Ok(meta);
        }

        let mut header = [0u8; HEADER_BYTES];
        storage.seek(handle, 0)?;
        let got = storage.read(handle, &mut header)?;
        if got < HEADER_BYTES {
            return Err(BitmapError::TruncatedHeader(got));
        }

        let meta = format::parse_header(&header)?;
        log::debug!(
            "resolved {}: pixel_offset={} stride={}",
            self.name,
            meta.pixel_offset,
            meta.row_stride
        );
        self.meta = Some(meta);
        Ok(meta)
    }
}

/// Bounded arena of bitmaps, registered once at level setup.
#[derive(Debug, Default)]
pub struct Catalog {
    bitmaps: BoundedVec<Bitmap, MAX_BITMAPS>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a bitmap by filename. Re-registering a name returns the
    /// existing handle. Returns `None` when the catalog is full.
    pub fn register(&mut self, name: &str) -> Option<BitmapId> {
        for (i, bmp) in self.bitmaps.iter().enumerate() {
            if bmp.name == name {
                return Some(BitmapId(i as u8));
            }
        }

        let id = BitmapId(self.bitmaps.len() as u8);
        match self.bitmaps.push(Bitmap::new(name)) {
            Ok(()) => Some(id),
            Err(_) => {
                log::warn!("bitmap catalog full, dropping {name}");
                None
            }
        }
    }

    pub fn get(&self, id: BitmapId) -> Option<&Bitmap> {
        self.bitmaps.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: BitmapId) -> Option<&mut Bitmap> {
        self.bitmaps.get_mut(id.0 as usize)
    }
}
