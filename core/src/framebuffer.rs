/// Horizontal resolution in pixels.
pub const DISPLAY_WIDTH: usize = 64;

/// Vertical resolution in pixels.
pub const DISPLAY_HEIGHT: usize = 32;

/// The monochrome screen: a 64x32 grid of on/off pixels, indexed `[y][x]`.
///
/// Sprites are XOR-composited, so drawing the same sprite twice at the same
/// coordinates restores the previous picture exactly. A dirty flag records
/// whether any pixel changed; the console resets it at the start of each
/// frame tick so hosts only re-render frames that differ.
pub struct FrameBuffer {
    pixels: [[bool; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
    dirty: bool,
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            pixels: [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            dirty: false,
        }
    }

    /// Switches every pixel off and marks the screen dirty.
    pub fn clear(&mut self) {
        self.pixels = [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        self.dirty = true;
    }

    /// XOR-composites a sprite of up to 15 rows at `(x, y)`.
    ///
    /// Each row byte contributes its set bits left-to-right from the high
    /// bit; coordinates wrap at the screen edges. Returns the collision
    /// flag: whether any pixel was switched from on to off.
    pub fn draw_sprite(&mut self, x: u8, y: u8, rows: &[u8]) -> bool {
        let mut collision = false;
        for (row, &bits) in rows.iter().enumerate() {
            if bits == 0 {
                continue;
            }
            let py = (y as usize + row) % DISPLAY_HEIGHT;
            for col in 0..8 {
                if bits & (0x80 >> col) == 0 {
                    continue;
                }
                let px = (x as usize + col) % DISPLAY_WIDTH;
                collision |= self.pixels[py][px];
                self.pixels[py][px] ^= true;
                self.dirty = true;
            }
        }
        collision
    }

    pub fn is_set(&self, x: usize, y: usize) -> bool {
        self.pixels[y][x]
    }

    /// The whole pixel grid, for rendering.
    pub fn pixels(&self) -> &[[bool; DISPLAY_WIDTH]; DISPLAY_HEIGHT] {
        &self.pixels
    }

    /// Whether any pixel changed since the dirty flag was last reset.
    pub fn dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn reset_dirty(&mut self) {
        self.dirty = false;
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
    fn test_draw_sets_pixels_from_high_bit() {
        let mut fb = FrameBuffer::new();
        let collision = fb.draw_sprite(1, 2, &[0b1010_0000]);
        assert!(!collision);
        assert!(fb.is_set(1, 2));
        assert!(!fb.is_set(2, 2));
        assert!(fb.is_set(3, 2));
        assert!(fb.dirty());
    }

    #[test]
    fn test_draw_is_its_own_inverse() {
        let mut fb = FrameBuffer::new();
        fb.draw_sprite(4, 4, &[0xF0, 0x90, 0xF0]);
        let collision = fb.draw_sprite(4, 4, &[0xF0, 0x90, 0xF0]);
        // The second draw erased every pixel the first one set.
        assert!(collision);
        assert!(fb.pixels().iter().flatten().all(|&px| !px));
    }

    #[test]
    fn test_draw_collision_only_on_erase() {
        let mut fb = FrameBuffer::new();
        fb.draw_sprite(0, 0, &[0b1000_0000]);
        // Disjoint bits toggle nothing off.
        assert!(!fb.draw_sprite(0, 0, &[0b0100_0000]));
        // Overlapping bit flips 1 -> 0.
        assert!(fb.draw_sprite(0, 0, &[0b1000_0000]));
    }

    #[test]
    fn test_draw_wraps_both_edges() {
        let mut fb = FrameBuffer::new();
        fb.draw_sprite(62, 31, &[0b1111_0000, 0b1111_0000]);
        // Columns 62, 63 then wrap to 0, 1; row 31 then wrap to 0.
        for y in [31, 0] {
            for x in [62, 63, 0, 1] {
                assert!(fb.is_set(x, y), "expected ({}, {}) set", x, y);
            }
        }
    }

    #[test]
    fn test_zero_rows_contribute_nothing() {
        let mut fb = FrameBuffer::new();
        assert!(!fb.draw_sprite(0, 0, &[0x00, 0x00]));
        assert!(!fb.dirty());
    }

    #[test]
    fn test_clear_marks_dirty() {
        let mut fb = FrameBuffer::new();
        fb.draw_sprite(0, 0, &[0xFF]);
        fb.reset_dirty();
        fb.clear();
        assert!(fb.dirty());
        assert!(!fb.is_set(0, 0));
    }
}
