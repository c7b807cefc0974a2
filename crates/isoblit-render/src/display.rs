//! Seam to the physical display driver.
//!
//! The controller exposes windowed writes: open a write window sized to
//! a pixel run, stream converted colors into it, close it. Per-window
//! setup commands dominate the transport cost, which is why the blit
//! engine coalesces opaque pixels into spans.

/// Display write interface consumed by the renderer.
pub trait Display {
    /// Fill the whole panel with one native color.
    fn clear(&mut self, color: u16);

    /// Open a write-window transaction at `(x, y)` spanning `w`×`h`
    /// pixels. The blit engine always uses `h = 1`.
    fn begin_window(&mut self, x: i16, y: i16, w: i16, h: i16);

    /// Stream one native-format pixel into the open window.
    fn push_pixel(&mut self, color: u16);

    /// Close the current write-window transaction.
    fn end_window(&mut self);
}

/// One recorded write-window transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    pub x: i16,
    pub y: i16,
    pub w: i16,
    pub h: i16,
    pub pixels: Vec<u16>,
}

/// Recording display double: counts clears and captures every window
/// with its streamed pixels, in issue order.
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    clears: u32,
    windows: Vec<Window>,
    open: bool,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clears(&self) -> u32 {
        self.clears
    }

    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    /// Total pixels streamed across all windows.
    pub fn pixel_writes(&self) -> usize {
        self.windows.iter().map(|w| w.pixels.len()).sum()
    }

    pub fn reset(&mut self) {
        self.clears = 0;
        self.windows.clear();
    }
}

impl Display for RecordingDisplay {
    fn clear(&mut self, _color: u16) {
        self.clears += 1;
    }

    fn begin_window(&mut self, x: i16, y: i16, w: i16, h: i16) {
        debug_assert!(!self.open, "window transaction already open");
        self.windows.push(Window {
            x,
            y,
            w,
            h,
            pixels: Vec::new(),
        });
        self.open = true;
    }

    fn push_pixel(&mut self, color: u16) {
        debug_assert!(self.open, "push_pixel outside a window transaction");
        if let Some(window) = self.windows.last_mut() {
            window.pixels.push(color);
        }
    }

    fn end_window(&mut self) {
        debug_assert!(self.open, "end_window without begin_window");
        self.open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_transactions_in_order() {
        let mut d = RecordingDisplay::new();
        d.clear(0x001F);
        d.begin_window(5, 7, 2, 1);
        d.push_pixel(0xFFFF);
        d.push_pixel(0x0000);
        d.end_window();

        assert_eq!(d.clears(), 1);
        assert_eq!(d.windows().len(), 1);
        assert_eq!(d.windows()[0].pixels, vec![0xFFFF, 0x0000]);
        assert_eq!(d.pixel_writes(), 2);
    }
}
