/// The number of pixel columns on the display.
pub const DISPLAY_WIDTH: usize = 64;

/// The number of pixel rows on the display.
pub const DISPLAY_HEIGHT: usize = 32;

/// One frame of pixels, indexed as `[y][x]`; 1 is lit.
pub type Frame = [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// # FrameBuffer
///
/// The 64x32 monochrome bitmap sprites are XORed onto. Coordinates wrap per
/// pixel, so a sprite drawn off one edge continues from the opposite edge.
pub struct FrameBuffer {
    pixels: Frame,
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            pixels: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
        }
    }

    /// Unsets every pixel.
    pub fn clear(&mut self) {
        self.pixels = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
    }

    /// XORs `sprite` onto the bitmap at `(x, y)`, one byte per 8-pixel row
    /// with the most significant bit leftmost. Returns true iff a lit pixel
    /// went dark.
    pub fn draw(&mut self, sprite: &[u8], x: u8, y: u8) -> bool {
        let mut erased = 0x0;
        for (row, byte) in sprite.iter().enumerate() {
            let py = (y as usize + row) % DISPLAY_HEIGHT;
            for bit in 0..8 {
                let px = (x as usize + bit) % DISPLAY_WIDTH;
                let pixel = (byte >> (7 - bit)) & 0x1;
                erased |= pixel & self.pixels[py][px];
                self.pixels[py][px] ^= pixel;
            }
        }
        erased == 0x1
    }

    /// The current pixels.
    pub fn frame(&self) -> &Frame {
        &self.pixels
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_plants_the_sprite() {
        let mut buffer = FrameBuffer::new();
        // The 0 glyph with a 1x 1y offset.
        let erased = buffer.draw(&[0xF0, 0x90, 0x90, 0x90, 0xF0], 1, 1);
        let mut expected: Frame = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        expected[1][1..5].copy_from_slice(&[1, 1, 1, 1]);
        expected[2][1..5].copy_from_slice(&[1, 0, 0, 1]);
        expected[3][1..5].copy_from_slice(&[1, 0, 0, 1]);
        expected[4][1..5].copy_from_slice(&[1, 0, 0, 1]);
        expected[5][1..5].copy_from_slice(&[1, 1, 1, 1]);
        assert!(!erased);
        assert!(buffer
            .frame()
            .iter()
            .zip(expected.iter())
            .all(|(a, b)| a[..] == b[..]));
    }

    #[test]
    fn test_draw_xors() {
        let mut buffer = FrameBuffer::new();
        buffer.draw(&[0x50], 0, 0);
        // 0 1 0 1 xor 1 1 1 1
        let erased = buffer.draw(&[0xF0], 0, 0);
        assert!(erased);
        assert_eq!(buffer.frame()[0][0..4], [1, 0, 1, 0]);
    }

    #[test]
    fn test_redrawing_erases() {
        let mut buffer = FrameBuffer::new();
        assert!(!buffer.draw(&[0xFF], 4, 2));
        assert!(buffer.draw(&[0xFF], 4, 2));
        assert_eq!(buffer.frame()[2], [0; DISPLAY_WIDTH]);
    }

    #[test]
    fn test_draw_wraps_the_right_edge() {
        let mut buffer = FrameBuffer::new();
        buffer.draw(&[0xC0], (DISPLAY_WIDTH - 1) as u8, 0);
        assert_eq!(buffer.frame()[0][DISPLAY_WIDTH - 1], 1);
        assert_eq!(buffer.frame()[0][0], 1);
    }

    #[test]
    fn test_draw_wraps_the_bottom_edge() {
        let mut buffer = FrameBuffer::new();
        buffer.draw(&[0x80, 0x80], 0, (DISPLAY_HEIGHT - 1) as u8);
        assert_eq!(buffer.frame()[DISPLAY_HEIGHT - 1][0], 1);
        assert_eq!(buffer.frame()[0][0], 1);
    }

    #[test]
    fn test_clear_unsets_everything() {
        let mut buffer = FrameBuffer::new();
        buffer.draw(&[0xFF], 0, 0);
        buffer.clear();
        assert!(buffer.frame().iter().all(|row| row[..] == [0; DISPLAY_WIDTH][..]));
    }
}
