use std::ops::{Index, IndexMut};

/// One of the 16 general-purpose 8-bit registers.
///
/// VF doubles as the flags register: arithmetic carry/borrow, shift-out bits,
/// and sprite collisions all land there, so programs treat it as scratch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Register {
    V0,
    V1,
    V2,
    V3,
    V4,
    V5,
    V6,
    V7,
    V8,
    V9,
    VA,
    VB,
    VC,
    VD,
    VE,
    VF,
}

impl Register {
    /// Selects the register named by the low nibble of `value`.
    pub fn from_nibble(value: u8) -> Self {
        match value & 0xF {
            0x0 => Register::V0,
            0x1 => Register::V1,
            0x2 => Register::V2,
            0x3 => Register::V3,
            0x4 => Register::V4,
            0x5 => Register::V5,
            0x6 => Register::V6,
            0x7 => Register::V7,
            0x8 => Register::V8,
            0x9 => Register::V9,
            0xA => Register::VA,
            0xB => Register::VB,
            0xC => Register::VC,
            0xD => Register::VD,
            0xE => Register::VE,
            _ => Register::VF,
        }
    }

    /// The register's position in the file.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// # Registers
///
/// The whole register file:
/// - (v) the 16 general-purpose 8-bit registers V0..VF
/// - (index) the 16-bit memory address register
/// - (delay, sound) the two 8-bit countdown timers
///
/// Everything powers on at zero and is mutated only by operations and timer
/// ticks.
pub struct Registers {
    v: [u8; 16],
    pub index: u16,
    pub delay: u8,
    pub sound: u8,
}

impl Registers {
    pub fn new() -> Self {
        Registers {
            v: [0; 16],
            index: 0,
            delay: 0,
            sound: 0,
        }
    }

    /// Returns every register to its power-on value.
    pub fn reset(&mut self) {
        self.v = [0; 16];
        self.index = 0;
        self.delay = 0;
        self.sound = 0;
    }

    /// The registers V0..=x as a slice, for bulk memory transfers.
    pub fn up_to(&self, x: Register) -> &[u8] {
        &self.v[..=x.index()]
    }

    /// The registers V0..=x as a mutable slice, for bulk memory transfers.
    pub fn up_to_mut(&mut self, x: Register) -> &mut [u8] {
        &mut self.v[..=x.index()]
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<Register> for Registers {
    type Output = u8;

    fn index(&self, register: Register) -> &u8 {
        &self.v[register.index()]
    }
}

impl IndexMut<Register> for Registers {
    fn index_mut(&mut self, register: Register) -> &mut u8 {
        &mut self.v[register.index()]
    }
}
