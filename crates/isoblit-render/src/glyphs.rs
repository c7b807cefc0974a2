//! Numeric overlay: 3x5 digit glyphs streamed through the display
//! window interface. Used for score/HUD values that sit on top of the
//! composited scene; each glyph is one window transaction.

use crate::display::Display;

/// 3-bit-wide rows, top to bottom, for digits 0-9.
const FONT: [[u8; 5]; 10] = [
    [0b111, 0b101, 0b101, 0b101, 0b111], // 0
    [0b010, 0b110, 0b010, 0b010, 0b111], // 1
    [0b111, 0b001, 0b111, 0b100, 0b111], // 2
    [0b111, 0b001, 0b111, 0b001, 0b111], // 3
    [0b101, 0b101, 0b111, 0b001, 0b001], // 4
    [0b111, 0b100, 0b111, 0b001, 0b111], // 5
    [0b111, 0b100, 0b111, 0b101, 0b111], // 6
    [0b111, 0b001, 0b001, 0b001, 0b001], // 7
    [0b111, 0b101, 0b111, 0b101, 0b111], // 8
    [0b111, 0b101, 0b111, 0b001, 0b111], // 9
];

const GLYPH_COLS: i16 = 3;
const GLYPH_ROWS: i16 = 5;

const ON: u16 = 0xFFFF;
const OFF: u16 = 0x0000;

/// Draw a decimal integer at `(x, y)`, each glyph cell scaled to
/// `scale`x`scale` pixels. `mirrored` flips the glyphs vertically for
/// the second board of a head-to-head setup.
pub fn draw_integer<D: Display>(
    display: &mut D,
    x: i16,
    y: i16,
    scale: i16,
    mirrored: bool,
    value: i32,
) {
    let digits = value.to_string();
    let mut cursor_x = x;

    for c in digits.chars() {
        let Some(digit) = c.to_digit(10) else {
            continue; // sign characters take no cell
        };
        let glyph = &FONT[digit as usize];

        display.begin_window(cursor_x, y, GLYPH_COLS * scale, GLYPH_ROWS * scale);
        for row in 0..GLYPH_ROWS {
            let bits = if mirrored {
                glyph[(GLYPH_ROWS - 1 - row) as usize]
            } else {
                glyph[row as usize]
            };
            for _ in 0..scale {
                for col in 0..GLYPH_COLS {
                    let color = if bits & (1 << (GLYPH_COLS - 1 - col)) != 0 {
                        ON
                    } else {
                        OFF
                    };
                    for _ in 0..scale {
                        display.push_pixel(color);
                    }
                }
            }
        }
        display.end_window();

        cursor_x += (GLYPH_COLS + 1) * scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::RecordingDisplay;

    #[test]
    fn test_one_window_per_digit() {
        let mut d = RecordingDisplay::new();
        draw_integer(&mut d, 10, 10, 1, false, 42);
        assert_eq!(d.windows().len(), 2);
        assert_eq!((d.windows()[0].x, d.windows()[0].y), (10, 10));
        assert_eq!((d.windows()[1].x, d.windows()[1].y), (14, 10));
        for w in d.windows() {
            assert_eq!((w.w, w.h), (3, 5));
            assert_eq!(w.pixels.len(), 15);
        }
    }

    #[test]
    fn test_glyph_bit_pattern() {
        let mut d = RecordingDisplay::new();
        draw_integer(&mut d, 0, 0, 1, false, 7);
        // Digit 7: solid top row, then right column only.
        let px = &d.windows()[0].pixels;
        assert_eq!(&px[0..3], &[ON, ON, ON]);
        assert_eq!(&px[3..6], &[OFF, OFF, ON]);
    }

    #[test]
    fn test_mirrored_flips_rows() {
        let mut normal = RecordingDisplay::new();
        let mut flipped = RecordingDisplay::new();
        draw_integer(&mut normal, 0, 0, 1, false, 7);
        draw_integer(&mut flipped, 0, 0, 1, true, 7);

        let n = &normal.windows()[0].pixels;
        let f = &flipped.windows()[0].pixels;
        assert_eq!(&n[0..3], &f[12..15]);
        assert_eq!(&n[12..15], &f[0..3]);
    }

    #[test]
    fn test_scale_multiplies_cells() {
        let mut d = RecordingDisplay::new();
        draw_integer(&mut d, 0, 0, 2, false, 1);
        let w = &d.windows()[0];
        assert_eq!((w.w, w.h), (6, 10));
        assert_eq!(w.pixels.len(), 60);
    }

    #[test]
    fn test_negative_sign_skipped() {
        let mut d = RecordingDisplay::new();
        draw_integer(&mut d, 0, 0, 1, false, -5);
        assert_eq!(d.windows().len(), 1, "only the digit gets a window");
    }
}
