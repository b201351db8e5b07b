//! Opcode decoding.
//!
//! Decoding is a pure function from a 16-bit opcode to a tagged
//! [`Instruction`] variant, driven by an ordered table of
//! (required bits, fixed-bit mask) patterns. The first entry whose fixed bits
//! match wins; table order disambiguates families that share a leading nibble
//! (the `8xy_` group by trailing nibble, the `Fx__` group by trailing byte).
//! An opcode matching no entry decodes to [`Instruction::Unknown`].

/// One decoded CHIP-8 instruction. Register operands are pre-extracted as
/// indices into the V register file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Instruction {
    /// 00E0: clear the framebuffer.
    Cls,
    /// 00EE: return from subroutine.
    Ret,
    /// 1nnn: jump.
    Jp { addr: u16 },
    /// 2nnn: call subroutine.
    Call { addr: u16 },
    /// 3xkk: skip next if Vx == kk.
    SeImm { x: usize, byte: u8 },
    /// 4xkk: skip next if Vx != kk.
    SneImm { x: usize, byte: u8 },
    /// 5xy0: skip next if Vx == Vy.
    SeReg { x: usize, y: usize },
    /// 6xkk: Vx = kk.
    LdImm { x: usize, byte: u8 },
    /// 7xkk: Vx += kk, no carry flag.
    AddImm { x: usize, byte: u8 },
    /// 8xy0: Vx = Vy.
    LdReg { x: usize, y: usize },
    /// 8xy1: Vx |= Vy.
    Or { x: usize, y: usize },
    /// 8xy2: Vx &= Vy.
    And { x: usize, y: usize },
    /// 8xy3: Vx ^= Vy.
    Xor { x: usize, y: usize },
    /// 8xy4: Vx += Vy, VF = carry.
    Add { x: usize, y: usize },
    /// 8xy5: Vx -= Vy, VF = no borrow.
    Sub { x: usize, y: usize },
    /// 8xy6: VF = LSB of Vx, then Vx >>= 1.
    Shr { x: usize },
    /// 8xy7: Vx = Vy - Vx, VF = no borrow.
    Subn { x: usize, y: usize },
    /// 8xyE: VF = MSB of Vx, then Vx <<= 1.
    Shl { x: usize },
    /// 9xy0: skip next if Vx != Vy.
    SneReg { x: usize, y: usize },
    /// Annn: I = nnn.
    LdI { addr: u16 },
    /// Bnnn: jump to nnn + V0.
    JpV0 { addr: u16 },
    /// Cxkk: Vx = random byte AND kk.
    Rnd { x: usize, byte: u8 },
    /// Dxyn: draw n-byte sprite from [I] at (Vx, Vy), VF = collision.
    Drw { x: usize, y: usize, n: u8 },
    /// Ex9E: skip next if key Vx is held.
    Skp { x: usize },
    /// ExA1: skip next if key Vx is not held.
    Sknp { x: usize },
    /// Fx07: Vx = DT.
    LdFromDt { x: usize },
    /// Fx0A: block until a key-down event for a held key, Vx = keycode.
    LdKey { x: usize },
    /// Fx15: DT = Vx.
    LdToDt { x: usize },
    /// Fx18: ST = Vx.
    LdToSt { x: usize },
    /// Fx1E: I += Vx, 16-bit wraparound, no flag.
    AddI { x: usize },
    /// Fx29: I = digit sprite address for Vx.
    LdFont { x: usize },
    /// Fx33: BCD of Vx at [I], [I+1], [I+2].
    LdBcd { x: usize },
    /// Fx55: store V0..=Vx at [I].
    StRegs { x: usize },
    /// Fx65: load V0..=Vx from [I].
    LdRegs { x: usize },
    /// Anything that matched no pattern; skipped with a diagnostic.
    Unknown { opcode: u16 },
}

type DecodeFn = fn(u16) -> Instruction;

struct Pattern {
    opcode: u16,
    mask: u16,
    decode: DecodeFn,
}

use Instruction::*;

#[rustfmt::skip]
static DECODE_TABLE: [Pattern; 34] = [
    Pattern { opcode: 0x00E0, mask: 0xFFFF, decode: |_| Cls },
    Pattern { opcode: 0x00EE, mask: 0xFFFF, decode: |_| Ret },
    Pattern { opcode: 0x1000, mask: 0xF000, decode: |op| Jp { addr: addr(op) } },
    Pattern { opcode: 0x2000, mask: 0xF000, decode: |op| Call { addr: addr(op) } },
    Pattern { opcode: 0x3000, mask: 0xF000, decode: |op| SeImm { x: x(op), byte: byte(op) } },
    Pattern { opcode: 0x4000, mask: 0xF000, decode: |op| SneImm { x: x(op), byte: byte(op) } },
    Pattern { opcode: 0x5000, mask: 0xF00F, decode: |op| SeReg { x: x(op), y: y(op) } },
    Pattern { opcode: 0x6000, mask: 0xF000, decode: |op| LdImm { x: x(op), byte: byte(op) } },
    Pattern { opcode: 0x7000, mask: 0xF000, decode: |op| AddImm { x: x(op), byte: byte(op) } },
    Pattern { opcode: 0x8000, mask: 0xF00F, decode: |op| LdReg { x: x(op), y: y(op) } },
    Pattern { opcode: 0x8001, mask: 0xF00F, decode: |op| Or { x: x(op), y: y(op) } },
    Pattern { opcode: 0x8002, mask: 0xF00F, decode: |op| And { x: x(op), y: y(op) } },
    Pattern { opcode: 0x8003, mask: 0xF00F, decode: |op| Xor { x: x(op), y: y(op) } },
    Pattern { opcode: 0x8004, mask: 0xF00F, decode: |op| Add { x: x(op), y: y(op) } },
    Pattern { opcode: 0x8005, mask: 0xF00F, decode: |op| Sub { x: x(op), y: y(op) } },
    Pattern { opcode: 0x8006, mask: 0xF00F, decode: |op| Shr { x: x(op) } },
    Pattern { opcode: 0x8007, mask: 0xF00F, decode: |op| Subn { x: x(op), y: y(op) } },
    Pattern { opcode: 0x800E, mask: 0xF00F, decode: |op| Shl { x: x(op) } },
    Pattern { opcode: 0x9000, mask: 0xF00F, decode: |op| SneReg { x: x(op), y: y(op) } },
    Pattern { opcode: 0xA000, mask: 0xF000, decode: |op| LdI { addr: addr(op) } },
    Pattern { opcode: 0xB000, mask: 0xF000, decode: |op| JpV0 { addr: addr(op) } },
    Pattern { opcode: 0xC000, mask: 0xF000, decode: |op| Rnd { x: x(op), byte: byte(op) } },
    Pattern { opcode: 0xD000, mask: 0xF000, decode: |op| Drw { x: x(op), y: y(op), n: nibble(op) } },
    Pattern { opcode: 0xE09E, mask: 0xF0FF, decode: |op| Skp { x: x(op) } },
    Pattern { opcode: 0xE0A1, mask: 0xF0FF, decode: |op| Sknp { x: x(op) } },
    Pattern { opcode: 0xF007, mask: 0xF0FF, decode: |op| LdFromDt { x: x(op) } },
    Pattern { opcode: 0xF00A, mask: 0xF0FF, decode: |op| LdKey { x: x(op) } },
    Pattern { opcode: 0xF015, mask: 0xF0FF, decode: |op| LdToDt { x: x(op) } },
    Pattern { opcode: 0xF018, mask: 0xF0FF, decode: |op| LdToSt { x: x(op) } },
    Pattern { opcode: 0xF01E, mask: 0xF0FF, decode: |op| AddI { x: x(op) } },
    Pattern { opcode: 0xF029, mask: 0xF0FF, decode: |op| LdFont { x: x(op) } },
    Pattern { opcode: 0xF033, mask: 0xF0FF, decode: |op| LdBcd { x: x(op) } },
    Pattern { opcode: 0xF055, mask: 0xF0FF, decode: |op| StRegs { x: x(op) } },
    Pattern { opcode: 0xF065, mask: 0xF0FF, decode: |op| LdRegs { x: x(op) } },
];

/// Decode a single opcode. First table match wins.
pub(crate) fn decode(opcode: u16) -> Instruction {
    DECODE_TABLE
        .iter()
        .find(|entry| opcode & entry.mask == entry.opcode)
        .map(|entry| (entry.decode)(opcode))
        .unwrap_or(Unknown { opcode })
}

/// First V register index encoded in an opcode (bits 8..12).
fn x(op: u16) -> usize {
    ((op & 0x0F00) >> 8) as usize
}

/// Second V register index encoded in an opcode (bits 4..8).
fn y(op: u16) -> usize {
    ((op & 0x00F0) >> 4) as usize
}

/// Byte immediate (low byte).
fn byte(op: u16) -> u8 {
    (op & 0x00FF) as u8
}

/// 12-bit address immediate.
fn addr(op: u16) -> u16 {
    op & 0x0FFF
}

/// Nibble immediate (low nibble).
fn nibble(op: u16) -> u8 {
    (op & 0x000F) as u8
}
