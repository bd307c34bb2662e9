use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, SPRITE_WIDTH};

/// A single row of pixels, each either 0 (off) or 1 (on)
pub type Row = [u8; DISPLAY_WIDTH];

/// # Frame buffer
/// The 64x32 monochrome display, indexed as `[y][x]`.
///
/// It only ever changes by being cleared or by having a sprite XORed onto it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    pixels: [Row; DISPLAY_HEIGHT],
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            pixels: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
        }
    }

    pub fn width(&self) -> usize {
        DISPLAY_WIDTH
    }

    pub fn height(&self) -> usize {
        DISPLAY_HEIGHT
    }

    pub fn clear(&mut self) {
        self.pixels = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
    }

    /// XOR a sprite onto the display with its top left corner at `(x, y)`.
    ///
    /// Each byte of `sprite` is one row, most significant bit leftmost. Pixels
    /// that would land right of the last column or below the last row are
    /// clipped. Returns whether any lit pixel was switched off.
    pub fn draw_sprite(&mut self, x: usize, y: usize, sprite: &[u8]) -> bool {
        let mut collision = false;
        for (row, byte) in sprite.iter().enumerate() {
            let py = y + row;
            if py >= DISPLAY_HEIGHT {
                break;
            }
            for bit in 0..SPRITE_WIDTH {
                let px = x + bit;
                if px >= DISPLAY_WIDTH {
                    break;
                }
                let pixel = (byte >> (7 - bit)) & 0x1;
                collision |= (pixel & self.pixels[py][px]) == 1;
                self.pixels[py][px] ^= pixel;
            }
        }
        collision
    }

    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.pixels[y][x] == 1
    }

    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.pixels.iter()
    }

    pub fn is_blank(&self) -> bool {
        self.rows().all(|row| row.iter().all(|p| *p == 0))
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}
