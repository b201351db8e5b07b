use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// 64x32 monochrome framebuffer.
///
/// Coordinates wrap modulo the screen dimensions independently per axis, so
/// sprite drawing near an edge continues on the opposite side. The only
/// mutation paths are [`Display::clear`] and the per-pixel
/// [`Display::draw_xor`]; both set a dirty flag the host can poll to schedule
/// redraws.
pub struct Display {
    vram: [bool; SCREEN_WIDTH * SCREEN_HEIGHT],
    dirty: bool,
}

impl Display {
    pub fn new() -> Self {
        Display {
            vram: [false; SCREEN_WIDTH * SCREEN_HEIGHT],
            dirty: false,
        }
    }

    /// Turn every pixel off.
    pub fn clear(&mut self) {
        for pixel in self.vram.iter_mut() {
            *pixel = false;
        }
        self.dirty = true;
    }

    /// State of the pixel at (x, y), wrapped into the screen.
    pub fn is_on(&self, x: u8, y: u8) -> bool {
        self.vram[Self::index(x, y)]
    }

    /// Flip the pixel at (x, y), wrapped into the screen.
    pub fn draw_xor(&mut self, x: u8, y: u8) {
        self.vram[Self::index(x, y)] ^= true;
        self.dirty = true;
    }

    /// Row-major pixel states, `SCREEN_WIDTH * SCREEN_HEIGHT` entries.
    pub fn pixels(&self) -> &[bool] {
        &self.vram
    }

    /// Returns whether the framebuffer changed since the last call, clearing
    /// the flag.
    pub fn take_dirty(&mut self) -> bool {
        let dirty = self.dirty;
        self.dirty = false;
        dirty
    }

    fn index(x: u8, y: u8) -> usize {
        let x = x as usize % SCREEN_WIDTH;
        let y = y as usize % SCREEN_HEIGHT;
        y * SCREEN_WIDTH + x
    }
}

impl Default for Display {
    fn default() -> Self {
        Display::new()
    }
}
