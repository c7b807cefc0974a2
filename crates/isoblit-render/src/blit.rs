//! Streaming bitmap blit.
//!
//! Pixel data never fits in RAM, so each blit re-reads only the rows it
//! needs from storage through a single row buffer, then writes opaque
//! pixel runs to the display as coalesced window transactions. Pure
//! black (all channels zero) is the transparency key.

use isoblit_bitmap::{Bitmap, BitmapError, Storage};
use isoblit_core::color::rgb_to_native;
use isoblit_core::config::MAX_ROW_BYTES;
use isoblit_core::geom::{Rect, ScreenVec};

use crate::display::Display;

const BYTES_PER_PIXEL: usize = 3;

/// Blit a bitmap anchored at `origin` with logical size `size`,
/// restricted to `clip` and the physical display.
///
/// Opens the backing file once per call; an open failure returns before
/// any display write. Header metadata is resolved lazily on the first
/// blit of each bitmap. A storage error mid-stream aborts this one
/// paint; rows already emitted stay on the panel.
pub fn blit<D: Display, S: Storage>(
    display: &mut D,
    storage: &mut S,
    bitmap: &mut Bitmap,
    origin: ScreenVec,
    size: ScreenVec,
    clip: &Rect,
) -> Result<(), BitmapError> {
    let mut handle = storage.open(bitmap.name())?;
    let result = blit_rows(display, storage, bitmap, &mut handle, origin, size, clip);
    storage.close(handle);
    result
}

fn blit_rows<D: Display, S: Storage>(
    display: &mut D,
    storage: &mut S,
    bitmap: &mut Bitmap,
    handle: &mut S::Handle,
    origin: ScreenVec,
    size: ScreenVec,
    clip: &Rect,
) -> Result<(), BitmapError> {
    let meta = bitmap.resolve(storage, handle)?;

    let target = Rect::from_origin_size(origin, size);
    let visible = target
        .intersect(clip)
        .and_then(|r| r.intersect(&Rect::display()));
    let Some(visible) = visible else {
        return Ok(());
    };

    // Column/row sub-range in bitmap-local coordinates.
    let first_col = u32::from((visible.x - origin.x) as u16);
    let needed = visible.w as usize * BYTES_PER_PIXEL;
    let top = visible.y - origin.y;
    let bottom = top + visible.h; // exclusive

    let mut row = [0u8; MAX_ROW_BYTES];

    // Rows are stored bottom-up; walking screen rows bottom to top
    // keeps the file offsets ascending.
    for local_y in (top..bottom).rev() {
        let file_row = (size.y - 1 - local_y) as u32;
        let offset =
            meta.pixel_offset + file_row * meta.row_stride + first_col * BYTES_PER_PIXEL as u32;
        storage.seek(handle, offset)?;
        let got = storage.read(handle, &mut row[..needed])?;
        if got < needed {
            return Err(BitmapError::ShortRead {
                expected: needed,
                actual: got,
            });
        }
        emit_row_spans(display, &row[..needed], visible.x, origin.y + local_y);
    }

    Ok(())
}

/// Scan one row left to right, coalescing consecutive opaque pixels
/// into spans. A span flushes on a transparent pixel or at row end.
fn emit_row_spans<D: Display>(display: &mut D, row: &[u8], screen_x: i16, screen_y: i16) {
    let pixels = row.len() / BYTES_PER_PIXEL;
    let mut run_start: Option<usize> = None;

    for i in 0..=pixels {
        let opaque = i < pixels && {
            let p = &row[i * BYTES_PER_PIXEL..(i + 1) * BYTES_PER_PIXEL];
            p[0] != 0 || p[1] != 0 || p[2] != 0
        };

        match (opaque, run_start) {
            (true, None) => run_start = Some(i),
            (false, Some(start)) => {
                flush_span(display, row, start, i, screen_x, screen_y);
                run_start = None;
            }
            _ => {}
        }
    }
}

fn flush_span<D: Display>(
    display: &mut D,
    row: &[u8],
    start: usize,
    end: usize,
    screen_x: i16,
    screen_y: i16,
) {
    display.begin_window(screen_x + start as i16, screen_y, (end - start) as i16, 1);
    for i in start..end {
        let b = row[i * BYTES_PER_PIXEL];
        let g = row[i * BYTES_PER_PIXEL + 1];
        let r = row[i * BYTES_PER_PIXEL + 2];
        display.push_pixel(rgb_to_native(r, g, b));
    }
    display.end_window();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::RecordingDisplay;
    use isoblit_bitmap::mem::{synth_bitmap, MemStorage};
    use isoblit_bitmap::StorageError;

    const WHITE: (u8, u8, u8) = (255, 255, 255);
    const KEY: (u8, u8, u8) = (0, 0, 0);

    fn setup(name: &str, bytes: Vec<u8>) -> (RecordingDisplay, MemStorage, Bitmap) {
        let mut storage = MemStorage::new();
        storage.insert(name, bytes);
        (RecordingDisplay::new(), storage, Bitmap::new(name))
    }

    #[test]
    fn test_span_coalescing() {
        // transparent, opaque x5, transparent, opaque x3, transparent
        let bytes = synth_bitmap(11, 1, |x, _| match x {
            1..=5 | 7..=9 => WHITE,
            _ => KEY,
        });
        let (mut display, mut storage, mut bmp) = setup("SPANS.BMP", bytes);

        blit(
            &mut display,
            &mut storage,
            &mut bmp,
            ScreenVec::new(100, 50),
            ScreenVec::new(11, 1),
            &Rect::display(),
        )
        .unwrap();

        let windows = display.windows();
        assert_eq!(windows.len(), 2, "exactly two write-window transactions");
        assert_eq!((windows[0].x, windows[0].w), (101, 5));
        assert_eq!((windows[1].x, windows[1].w), (107, 3));
        assert_eq!(windows[0].y, 50);
        assert!(windows[0].pixels.iter().all(|&c| c == 0xFFFF));
    }

    #[test]
    fn test_fully_transparent_row_writes_nothing() {
        let bytes = synth_bitmap(8, 2, |_, _| KEY);
        let (mut display, mut storage, mut bmp) = setup("VOID.BMP", bytes);

        blit(
            &mut display,
            &mut storage,
            &mut bmp,
            ScreenVec::new(0, 0),
            ScreenVec::new(8, 2),
            &Rect::display(),
        )
        .unwrap();

        assert!(display.windows().is_empty());
        // The rows were still addressed through storage.
        assert!(storage.seeks() >= 2);
    }

    #[test]
    fn test_clip_restricts_rows_and_columns() {
        let bytes = synth_bitmap(8, 8, |_, _| WHITE);
        let (mut display, mut storage, mut bmp) = setup("SOLID.BMP", bytes);

        // Only the 4x2 region at (2,3) of the bitmap.
        let clip = Rect::new(12, 23, 4, 2);
        blit(
            &mut display,
            &mut storage,
            &mut bmp,
            ScreenVec::new(10, 20),
            ScreenVec::new(8, 8),
            &clip,
        )
        .unwrap();

        let windows = display.windows();
        assert_eq!(windows.len(), 2, "one span per clipped row");
        for w in windows {
            assert_eq!(w.w, 4);
            assert!(w.x == 12 && (w.y == 23 || w.y == 24));
            assert_eq!(w.pixels.len(), 4);
        }
        // Bottom-up emission: lower screen row first.
        assert_eq!(windows[0].y, 24);
        assert_eq!(windows[1].y, 23);
    }

    #[test]
    fn test_display_edge_clipping() {
        let bytes = synth_bitmap(8, 8, |_, _| WHITE);
        let (mut display, mut storage, mut bmp) = setup("EDGE.BMP", bytes);

        // Anchored half off the left display edge.
        blit(
            &mut display,
            &mut storage,
            &mut bmp,
            ScreenVec::new(-4, 0),
            ScreenVec::new(8, 8),
            &Rect::display(),
        )
        .unwrap();

        for w in display.windows() {
            assert_eq!((w.x, w.w), (0, 4));
        }
        assert_eq!(display.windows().len(), 8);
    }

    #[test]
    fn test_open_failure_writes_nothing() {
        let mut display = RecordingDisplay::new();
        let mut storage = MemStorage::new();
        let mut bmp = Bitmap::new("MISSING.BMP");

        let err = blit(
            &mut display,
            &mut storage,
            &mut bmp,
            ScreenVec::new(0, 0),
            ScreenVec::new(8, 8),
            &Rect::display(),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            BitmapError::Storage(StorageError::NotFound(_))
        ));
        assert!(display.windows().is_empty());
        assert_eq!(display.clears(), 0);
    }

    #[test]
    fn test_short_read_aborts_paint() {
        let bytes = synth_bitmap(8, 4, |_, _| WHITE);
        let full_len = bytes.len();
        let (mut display, mut storage, mut bmp) = setup("TRUNC.BMP", bytes);
        // Cut the file inside the topmost image row (last row read).
        storage.truncate("TRUNC.BMP", full_len - 10);

        let err = blit(
            &mut display,
            &mut storage,
            &mut bmp,
            ScreenVec::new(0, 0),
            ScreenVec::new(8, 4),
            &Rect::display(),
        )
        .unwrap_err();

        assert!(matches!(err, BitmapError::ShortRead { .. }));
        // Rows before the truncation point were already streamed.
        assert!(display.windows().len() < 4);
    }

    #[test]
    fn test_outside_clip_is_a_cheap_noop() {
        let bytes = synth_bitmap(8, 8, |_, _| WHITE);
        let (mut display, mut storage, mut bmp) = setup("FAR.BMP", bytes);

        let clip = Rect::new(200, 200, 10, 10);
        blit(
            &mut display,
            &mut storage,
            &mut bmp,
            ScreenVec::new(0, 0),
            ScreenVec::new(8, 8),
            &clip,
        )
        .unwrap();

        assert!(display.windows().is_empty());
    }
}
