/// The number of addressable bytes in memory.
pub const MEMORY_CAPACITY: usize = 0xFFF;

/// Where program images are loaded and execution begins.
pub const PROGRAM_ORIGIN: u16 = 0x200;

/// The number of return addresses the stack can hold.
pub const STACK_DEPTH: usize = 16;

/// The number of CPU cycles executed per second.
pub const CLOCK_HZ: u64 = 1_000;

/// The rate at which the delay and sound timers count down.
pub const TIMER_HZ: u64 = 60;

/// The number of CPU cycles between timer decrements.
/// Integer division approximates TIMER_HZ against the fixed clock.
pub const CYCLES_PER_TIMER_TICK: u64 = CLOCK_HZ / TIMER_HZ;

/// Where the font sprite sheet lives in memory, below the program origin.
pub const FONT_ORIGIN: u16 = 0x000;

/// The number of bytes in one font glyph.
pub const GLYPH_SIZE: u16 = 5;

/// Sprite data for the hexadecimal digits 0..F.
///
/// Each glyph is 5 bytes, one byte per row, drawn 4 pixels wide in the high
/// nibble. The glyph for digit `d` starts at `FONT_ORIGIN + d * GLYPH_SIZE`.
pub const FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
