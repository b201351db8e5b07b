//! Core of a CHIP-8 virtual machine: 4KB of memory, 16 8-bit registers, a
//! 16-level call stack, a 64x32 monochrome framebuffer, a 16-key pad and two
//! 60Hz countdown timers.
//!
//! The crate deliberately contains no windowing, rendering, key mapping or
//! pacing logic. A host loop is expected to call [`Chip8::step`] repeatedly to
//! advance execution, call [`Chip8::timer_interrupt`] at a fixed 60Hz cadence,
//! forward keyboard events into the [`Keypad`], and render the [`Display`]
//! contents however it likes. Execution is synchronous and deterministic apart
//! from the `RND` instruction.

mod error;
mod instr;
mod utils;

pub mod display;
pub mod font;
pub mod keypad;
pub mod memory;

mod interpreter;

pub use display::Display;
pub use error::Chip8Error;
pub use interpreter::Chip8;
pub use keypad::Keypad;
pub use memory::Memory;

/// Total addressable memory.
pub const MEM_SIZE: usize = 4096;
/// ROM images are loaded at this offset; the region below it is reserved for
/// the interpreter (conventionally holding the digit sprite table).
pub const PROGRAM_START: u16 = 0x200;
/// Addresses are 12 bits wide; the interpreter masks every address it forms
/// with this before touching memory.
pub const ADDR_MASK: u16 = 0x0FFF;

pub const SCREEN_WIDTH: usize = 64;
pub const SCREEN_HEIGHT: usize = 32;

pub const NUM_REGISTERS: usize = 16;
pub const NUM_KEYS: usize = 16;
pub const STACK_DEPTH: usize = 16;
