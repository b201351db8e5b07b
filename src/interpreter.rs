use rand::Rng;
use wasm_bindgen::prelude::*;

use crate::display::Display;
use crate::error::Chip8Error;
use crate::font;
use crate::instr::{decode, Instruction};
use crate::keypad::Keypad;
use crate::memory::Memory;
use crate::utils;
use crate::{ADDR_MASK, NUM_REGISTERS, PROGRAM_START, STACK_DEPTH};

/// Whether normal fetch/decode is suspended waiting for a keypress destined
/// for a specific V register (`LD Vx, K`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyWait {
    Idle,
    WaitingFor(u8),
}

/// The CHIP-8 interpreter: registers, program counter, call stack, index
/// register, timers and key-wait state, plus ownership of the memory,
/// display and keypad it drives.
///
/// The interpreter is the sole mutator of its own state and the sole caller
/// into its collaborators during execution; the host reaches the
/// collaborators through the accessors (or the flattened wasm methods) in
/// between calls. There is no internal clock: `step()` advances exactly one
/// unit of work and `timer_interrupt()` must be driven at 60Hz by the host.
#[wasm_bindgen]
pub struct Chip8 {
    memory: Memory,
    display: Display,
    keypad: Keypad,

    registers: [u8; NUM_REGISTERS],
    pc: u16,
    stack: [u16; STACK_DEPTH],
    sp: usize,
    reg_i: u16,

    reg_dt: u8,
    reg_st: u8,

    speaker_on: bool,
    key_wait: KeyWait,
}

#[wasm_bindgen]
impl Chip8 {
    /// A machine at the initial entry state: zeroed memory and registers,
    /// PC at the program start address, everything idle.
    pub fn new() -> Self {
        utils::set_panic_hook();

        Chip8 {
            memory: Memory::new(),
            display: Display::new(),
            keypad: Keypad::new(),
            registers: [0; NUM_REGISTERS],
            pc: PROGRAM_START,
            stack: [0; STACK_DEPTH],
            sp: 0,
            reg_i: 0,
            reg_dt: 0,
            reg_st: 0,
            speaker_on: false,
            key_wait: KeyWait::Idle,
        }
    }

    /// A machine with a ROM image already loaded at the entry point.
    pub fn with_rom(rom: &[u8]) -> Result<Chip8, Chip8Error> {
        let mut chip8 = Chip8::new();
        chip8.memory.load_rom(rom)?;
        Ok(chip8)
    }

    /// Write the bundled digit sprite table into low memory so `LD F, Vx`
    /// points at real glyphs.
    pub fn load_font(&mut self) {
        self.memory.load_font();
    }

    /// Perform exactly one unit of work: either a key-wait poll or one
    /// instruction fetch + execute, never both.
    ///
    /// While waiting for a key, nothing is fetched; the call that consumes a
    /// valid key-down event only loads the register and returns. A stack
    /// fault aborts the offending instruction and is surfaced to the host;
    /// an unknown opcode is reported as a diagnostic and skipped.
    pub fn step(&mut self) -> Result<(), Chip8Error> {
        // The speaker line is sampled once per call, before anything runs.
        self.speaker_on = self.reg_st != 0;

        if let KeyWait::WaitingFor(reg) = self.key_wait {
            let keycode = match self.keypad.keydown_event() {
                Some(keycode) => keycode,
                None => return Ok(()),
            };
            self.keypad.clear_keydown_event();
            // A press that was released before we polled is stale; drop the
            // event and keep waiting.
            if self.keypad.is_key_down(keycode) {
                self.registers[usize::from(reg)] = keycode;
                self.key_wait = KeyWait::Idle;
            }
            return Ok(());
        }

        let opcode = self.fetch();
        self.exec(decode(opcode))
    }

    /// Decrement both timers toward zero. The host must call this at 60Hz,
    /// independently of how often it calls `step()`.
    pub fn timer_interrupt(&mut self) {
        if self.reg_dt > 0 {
            self.reg_dt -= 1;
        }
        if self.reg_st > 0 {
            self.reg_st -= 1;
        }
    }

    /// Speaker line as sampled at the start of the most recent `step()` call.
    pub fn is_speaker_on(&self) -> bool {
        self.speaker_on
    }

    // Flattened component operations, primarily for the wasm host (JS cannot
    // hold borrows into the interpreter). Rust hosts may prefer the accessor
    // methods below.

    pub fn read(&self, addr: u16) -> u8 {
        self.memory.read(addr)
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        self.memory.write(addr, value);
    }

    pub fn clear_display(&mut self) {
        self.display.clear();
    }

    pub fn is_pixel_on(&self, x: u8, y: u8) -> bool {
        self.display.is_on(x, y)
    }

    /// Pointer to the row-major `bool` framebuffer, for rendering directly
    /// out of wasm linear memory.
    pub fn screen_buffer_ptr(&self) -> *const bool {
        self.display.pixels().as_ptr()
    }

    /// Whether the framebuffer changed since the last call; clears the flag.
    pub fn take_dirty(&mut self) -> bool {
        self.display.take_dirty()
    }

    pub fn key_down(&mut self, keycode: u8) {
        self.keypad.key_down(keycode);
    }

    pub fn key_up(&mut self, keycode: u8) {
        self.keypad.key_up(keycode);
    }

    pub fn is_key_down(&self, keycode: u8) -> bool {
        self.keypad.is_key_down(keycode)
    }
}

/// Component accessors for Rust hosts.
impl Chip8 {
    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    pub fn display(&self) -> &Display {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut Display {
        &mut self.display
    }

    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    pub fn keypad_mut(&mut self) -> &mut Keypad {
        &mut self.keypad
    }
}

impl Chip8 {
    /// Big-endian opcode at PC. PC moves past the instruction here, before
    /// dispatch, so handlers observe the post-increment value (CALL pushes
    /// the address of the *next* instruction).
    fn fetch(&mut self) -> u16 {
        let hi = u16::from(self.memory.read(self.pc & ADDR_MASK));
        let lo = u16::from(self.memory.read(self.pc.wrapping_add(1) & ADDR_MASK));
        self.pc = self.pc.wrapping_add(2);
        hi << 8 | lo
    }

    fn exec(&mut self, instruction: Instruction) -> Result<(), Chip8Error> {
        match instruction {
            Instruction::Cls => self.display.clear(),
            Instruction::Ret => {
                if self.sp == 0 {
                    return Err(Chip8Error::StackUnderflow);
                }
                self.sp -= 1;
                self.pc = self.stack[self.sp];
            }
            Instruction::Jp { addr } => self.pc = addr,
            Instruction::Call { addr } => {
                if self.sp == STACK_DEPTH {
                    return Err(Chip8Error::StackOverflow);
                }
                self.stack[self.sp] = self.pc;
                self.sp += 1;
                self.pc = addr;
            }
            Instruction::SeImm { x, byte } => {
                if self.registers[x] == byte {
                    self.skip();
                }
            }
            Instruction::SneImm { x, byte } => {
                if self.registers[x] != byte {
                    self.skip();
                }
            }
            Instruction::SeReg { x, y } => {
                if self.registers[x] == self.registers[y] {
                    self.skip();
                }
            }
            Instruction::LdImm { x, byte } => self.registers[x] = byte,
            Instruction::AddImm { x, byte } => {
                self.registers[x] = self.registers[x].wrapping_add(byte);
            }
            Instruction::LdReg { x, y } => self.registers[x] = self.registers[y],
            Instruction::Or { x, y } => self.registers[x] |= self.registers[y],
            Instruction::And { x, y } => self.registers[x] &= self.registers[y],
            Instruction::Xor { x, y } => self.registers[x] ^= self.registers[y],
            Instruction::Add { x, y } => {
                let original = self.registers[x];
                self.registers[x] = self.registers[x].wrapping_add(self.registers[y]);
                let carry = self.registers[x] < original;
                self.set_vf(carry);
            }
            Instruction::Sub { x, y } => {
                self.set_vf(self.registers[x] > self.registers[y]);
                self.registers[x] = self.registers[x].wrapping_sub(self.registers[y]);
            }
            Instruction::Shr { x } => {
                self.set_vf(self.registers[x] & 0x01 != 0);
                self.registers[x] >>= 1;
            }
            Instruction::Subn { x, y } => {
                self.set_vf(self.registers[y] > self.registers[x]);
                self.registers[x] = self.registers[y].wrapping_sub(self.registers[x]);
            }
            Instruction::Shl { x } => {
                self.set_vf(self.registers[x] & 0x80 != 0);
                self.registers[x] <<= 1;
            }
            Instruction::SneReg { x, y } => {
                if self.registers[x] != self.registers[y] {
                    self.skip();
                }
            }
            Instruction::LdI { addr } => self.reg_i = addr,
            Instruction::JpV0 { addr } => {
                // The sum can spill past 12 bits; it is folded back into the
                // address space rather than left to index out of range.
                self.pc = addr.wrapping_add(u16::from(self.registers[0])) & ADDR_MASK;
            }
            Instruction::Rnd { x, byte } => {
                self.registers[x] = rand::thread_rng().gen::<u8>() & byte;
            }
            Instruction::Drw { x, y, n } => {
                let mut collision = false;
                for row in 0..n {
                    let line = self
                        .memory
                        .read(self.reg_i.wrapping_add(u16::from(row)) & ADDR_MASK);
                    for bit in 0..8u8 {
                        // MSB is the leftmost pixel; each coordinate wraps
                        // around the screen independently.
                        if line & (0x80u8 >> bit) == 0 {
                            continue;
                        }
                        let px = self.registers[x].wrapping_add(bit);
                        let py = self.registers[y].wrapping_add(row);
                        collision |= self.display.is_on(px, py);
                        self.display.draw_xor(px, py);
                    }
                }
                self.set_vf(collision);
            }
            Instruction::Skp { x } => {
                if self.keypad.is_key_down(self.registers[x]) {
                    self.skip();
                }
            }
            Instruction::Sknp { x } => {
                if !self.keypad.is_key_down(self.registers[x]) {
                    self.skip();
                }
            }
            Instruction::LdFromDt { x } => self.registers[x] = self.reg_dt,
            Instruction::LdKey { x } => {
                self.key_wait = KeyWait::WaitingFor(x as u8);
                // A press from before this instruction must not satisfy the
                // wait.
                self.keypad.clear_keydown_event();
            }
            Instruction::LdToDt { x } => self.reg_dt = self.registers[x],
            Instruction::LdToSt { x } => self.reg_st = self.registers[x],
            Instruction::AddI { x } => {
                self.reg_i = self.reg_i.wrapping_add(u16::from(self.registers[x]));
            }
            Instruction::LdFont { x } => {
                let digit = self.registers[x];
                self.reg_i = if digit > 0x0F {
                    0x0000
                } else {
                    u16::from(digit) * font::SPRITE_LEN as u16
                };
            }
            Instruction::LdBcd { x } => {
                let value = self.registers[x];
                self.memory.write(self.reg_i & ADDR_MASK, value / 100);
                self.memory
                    .write(self.reg_i.wrapping_add(1) & ADDR_MASK, (value % 100) / 10);
                self.memory
                    .write(self.reg_i.wrapping_add(2) & ADDR_MASK, value % 10);
            }
            Instruction::StRegs { x } => {
                for reg in 0..=x {
                    self.memory.write(
                        self.reg_i.wrapping_add(reg as u16) & ADDR_MASK,
                        self.registers[reg],
                    );
                }
            }
            Instruction::LdRegs { x } => {
                for reg in 0..=x {
                    self.registers[reg] = self
                        .memory
                        .read(self.reg_i.wrapping_add(reg as u16) & ADDR_MASK);
                }
            }
            Instruction::Unknown { opcode } => {
                crate::diagnostic!(
                    "unknown opcode {:04X} at pc {:03X}",
                    opcode,
                    self.pc.wrapping_sub(2)
                );
            }
        }
        Ok(())
    }

    /// Skip the next instruction (SE/SNE/SKP/SKNP).
    fn skip(&mut self) {
        self.pc = self.pc.wrapping_add(2);
    }

    fn set_vf(&mut self, value: bool) {
        self.registers[0xF] = value as u8;
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Chip8::new()
    }
}
