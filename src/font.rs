//! The conventional hexadecimal digit sprites, 5 bytes per glyph.
//!
//! The core itself never depends on this table: `LD F, Vx` only computes
//! `I = Vx * 5`, which assumes *some* 16-entry sprite table lives at address
//! 0. Hosts that want stock ROMs to render digits should call
//! [`crate::Memory::load_font`] (or write their own table) before execution.

/// Number of bytes per digit sprite.
pub const SPRITE_LEN: usize = 5;

/// Address `LD F, Vx` points into. A host injecting its own font must place
/// it here.
pub const FONT_START: u16 = 0x000;

/// Sprites for the hex digits '0' through 'F', each 8x5 pixels with only the
/// high nibble of each row in use.
pub const DIGIT_SPRITES: [u8; SPRITE_LEN * 16] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // '0'
    0x20, 0x60, 0x20, 0x20, 0x70, // '1'
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // '2'
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // '3'
    0x90, 0x90, 0xF0, 0x10, 0x10, // '4'
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // '5'
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // '6'
    0xF0, 0x10, 0x20, 0x40, 0x40, // '7'
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // '8'
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // '9'
    0xF0, 0x90, 0xF0, 0x90, 0x90, // 'A'
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // 'B'
    0xF0, 0x80, 0x80, 0x80, 0xF0, // 'C'
    0xE0, 0x90, 0x90, 0x90, 0xE0, // 'D'
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // 'E'
    0xF0, 0x80, 0xF0, 0x80, 0x80, // 'F'
];
