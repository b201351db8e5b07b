//! End-to-end tests driving the core exactly the way a host harness does:
//! ROM bytes in, repeated `step()` plus 60Hz `timer_interrupt()` calls, key
//! events forwarded, display and memory observed from outside.

use chip8_core::{Chip8, Chip8Error};

fn assemble(words: &[u16]) -> Vec<u8> {
    words
        .iter()
        .flat_map(|word| vec![(word >> 8) as u8, (word & 0xFF) as u8])
        .collect()
}

#[test]
fn oversized_rom_is_a_load_time_error() {
    let rom = vec![0u8; 3585];
    match Chip8::with_rom(&rom) {
        Err(Chip8Error::RomTooLarge { size, max_size }) => {
            assert_eq!(size, 3585);
            assert_eq!(max_size, 3584);
        }
        other => panic!("expected RomTooLarge, got {:?}", other.map(|_| ())),
    }
    assert!(Chip8::with_rom(&vec![0u8; 3584]).is_ok());
}

#[test]
fn draws_a_font_digit() {
    let rom = assemble(&[
        0x6200, // V2 = digit 0
        0xF229, // I = sprite address for V2
        0x6000, // V0 = 0
        0x6100, // V1 = 0
        0xD015, // DRW V0, V1, 5
    ]);
    let mut chip8 = Chip8::with_rom(&rom).unwrap();
    chip8.load_font();
    for _ in 0..5 {
        chip8.step().unwrap();
    }
    // The '0' glyph: 0xF0, 0x90, 0x90, 0x90, 0xF0.
    let glyph = [0xF0u8, 0x90, 0x90, 0x90, 0xF0];
    for (y, row) in glyph.iter().enumerate() {
        for x in 0..8u8 {
            let expected = row & (0x80u8 >> x) != 0;
            assert_eq!(
                chip8.is_pixel_on(x, y as u8),
                expected,
                "pixel ({}, {})",
                x,
                y
            );
        }
    }
    assert!(chip8.take_dirty());
    assert!(!chip8.take_dirty());
}

#[test]
fn delay_timer_loop_runs_at_host_cadence() {
    let rom = assemble(&[
        0x6A05, // VA = 5
        0xFA15, // DT = VA
        0xFB07, // VB = DT          <- loop head, 0x204
        0x3B00, // SE VB, 0
        0x1204, // JP 0x204
        0xA400, // I = 0x400
        0x6C07, // VC = 7
        0xFC33, // BCD VC at I
        0x1210, // spin             <- 0x210
    ]);
    let mut chip8 = Chip8::with_rom(&rom).unwrap();
    // One timer interrupt per simulated frame, a handful of steps in between;
    // the exact ratio must not matter to the core.
    for _ in 0..60 {
        for _ in 0..4 {
            chip8.step().unwrap();
        }
        chip8.timer_interrupt();
    }
    assert_eq!(chip8.read(0x400), 0);
    assert_eq!(chip8.read(0x401), 0);
    assert_eq!(chip8.read(0x402), 7);
}

#[test]
fn key_wait_observed_from_the_host_side() {
    let rom = assemble(&[
        0xF00A, // LD V0, K
        0xA400, // I = 0x400
        0xF033, // BCD V0
        0x1206, // spin
    ]);
    let mut chip8 = Chip8::with_rom(&rom).unwrap();
    chip8.step().unwrap(); // enters the wait
    for _ in 0..5 {
        chip8.step().unwrap(); // polls, nothing happens
    }
    assert_eq!(chip8.read(0x402), 0);

    chip8.key_down(0xC);
    assert!(chip8.is_key_down(0xC));
    for _ in 0..4 {
        chip8.step().unwrap();
    }
    // V0 received 0xC = 12, written out as BCD.
    assert_eq!(chip8.read(0x400), 0);
    assert_eq!(chip8.read(0x401), 1);
    assert_eq!(chip8.read(0x402), 2);
}

#[test]
fn speaker_follows_the_sound_timer() {
    let rom = assemble(&[
        0x6A3C, // VA = 60
        0xFA18, // ST = VA
        0x1204, // spin
    ]);
    let mut chip8 = Chip8::with_rom(&rom).unwrap();
    chip8.step().unwrap();
    chip8.step().unwrap();
    chip8.step().unwrap();
    assert!(chip8.is_speaker_on());

    for _ in 0..60 {
        chip8.timer_interrupt();
    }
    chip8.step().unwrap();
    assert!(!chip8.is_speaker_on());
}

#[test]
fn stack_fault_reaches_the_host() {
    let rom = assemble(&[0x00EE]);
    let mut chip8 = Chip8::with_rom(&rom).unwrap();
    assert_eq!(chip8.step(), Err(Chip8Error::StackUnderflow));
}
