use crate::error::Chip8Error;
use crate::font;
use crate::{MEM_SIZE, PROGRAM_START};

/// Largest ROM image that fits between the program start and the top of
/// memory.
pub const MAX_ROM_SIZE: usize = MEM_SIZE - PROGRAM_START as usize;

/// Flat 4096-byte store.
///
/// `Memory` does no address arithmetic of its own: callers are expected to
/// mask addresses into the 12-bit space before handing them over, and an
/// out-of-range address is treated as a caller bug, not a runtime condition.
pub struct Memory {
    bytes: [u8; MEM_SIZE],
}

impl Memory {
    /// A zeroed memory. Note that this does not place a digit sprite table
    /// anywhere; see [`Memory::load_font`].
    pub fn new() -> Self {
        Memory {
            bytes: [0u8; MEM_SIZE],
        }
    }

    /// Copy a raw ROM image to the program start address. The image must fit
    /// in the 3584 bytes above 0x200; an oversized image is rejected before
    /// any byte is copied, so memory is never left partially initialised.
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<(), Chip8Error> {
        if rom.len() > MAX_ROM_SIZE {
            return Err(Chip8Error::RomTooLarge {
                size: rom.len(),
                max_size: MAX_ROM_SIZE,
            });
        }
        let start = PROGRAM_START as usize;
        self.bytes[start..start + rom.len()].copy_from_slice(rom);
        Ok(())
    }

    /// Write the conventional digit sprite table at the address `LD F, Vx`
    /// expects. Optional: hosts may inject their own table instead.
    pub fn load_font(&mut self) {
        let start = font::FONT_START as usize;
        self.bytes[start..start + font::DIGIT_SPRITES.len()].copy_from_slice(&font::DIGIT_SPRITES);
    }

    pub fn read(&self, addr: u16) -> u8 {
        self.bytes[addr as usize]
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        self.bytes[addr as usize] = value;
    }
}

impl Default for Memory {
    fn default() -> Self {
        Memory::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_memory_is_zeroed() {
        let m = Memory::new();
        assert!((0..MEM_SIZE).all(|a| m.read(a as u16) == 0));
    }

    #[test]
    fn rom_lands_at_program_start() {
        let mut m = Memory::new();
        m.load_rom(&[0xDE, 0xAD, 0xBE, 0xEF]).unwrap();
        assert_eq!(m.read(0x1FF), 0x00);
        assert_eq!(m.read(0x200), 0xDE);
        assert_eq!(m.read(0x201), 0xAD);
        assert_eq!(m.read(0x202), 0xBE);
        assert_eq!(m.read(0x203), 0xEF);
        assert_eq!(m.read(0x204), 0x00);
    }

    #[test]
    fn rom_may_fill_memory_exactly() {
        let mut m = Memory::new();
        m.load_rom(&[0xAA; MAX_ROM_SIZE]).unwrap();
        assert_eq!(m.read(0x0FFF), 0xAA);
    }

    #[test]
    fn oversized_rom_is_rejected_untouched() {
        let mut m = Memory::new();
        let err = m.load_rom(&[0xAA; MAX_ROM_SIZE + 1]).unwrap_err();
        assert_eq!(
            err,
            Chip8Error::RomTooLarge {
                size: MAX_ROM_SIZE + 1,
                max_size: MAX_ROM_SIZE
            }
        );
        // Nothing was copied.
        assert_eq!(m.read(0x200), 0x00);
    }

    #[test]
    fn font_loads_at_address_zero() {
        let mut m = Memory::new();
        m.load_font();
        // '0' glyph
        assert_eq!(m.read(0x000), 0xF0);
        assert_eq!(m.read(0x004), 0xF0);
        // 'F' glyph starts at 15 * 5
        assert_eq!(m.read(75), 0xF0);
        assert_eq!(m.read(79), 0x80);
    }

    #[test]
    fn write_then_read_round_trips() {
        let mut m = Memory::new();
        m.write(0x300, 0x42);
        assert_eq!(m.read(0x300), 0x42);
    }
}
