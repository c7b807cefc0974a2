//! Color conversion for the 16-bit (RGB565) display path.

/// Convert 8-bit RGB channels to the display's native RGB565 format.
pub fn rgb_to_native(r: u8, g: u8, b: u8) -> u16 {
    let r = u16::from(r >> 3);
    let g = u16::from(g >> 2);
    let b = u16::from(b >> 3);
    (r << 11) | (g << 5) | b
}

/// Background color used for the full-redraw clear (native blue).
pub const BACKGROUND: u16 = 0x001F;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primaries() {
        assert_eq!(rgb_to_native(255, 0, 0), 0xF800);
        assert_eq!(rgb_to_native(0, 255, 0), 0x07E0);
        assert_eq!(rgb_to_native(0, 0, 255), 0x001F);
        assert_eq!(rgb_to_native(0, 0, 0), 0x0000);
        assert_eq!(rgb_to_native(255, 255, 255), 0xFFFF);
    }
}
