use crate::constants::PROGRAM_ORIGIN;

/// # Program counter
///
/// Points at the next instruction to fetch. The counter moves in 2-byte
/// steps: once per fetch, and once more when a skip condition holds.
/// Control-flow operations overwrite it directly.
pub struct ProgramCounter {
    address: u16,
}

impl ProgramCounter {
    pub fn new() -> Self {
        ProgramCounter {
            address: PROGRAM_ORIGIN,
        }
    }

    /// The address of the next fetch.
    pub fn address(&self) -> u16 {
        self.address
    }

    /// Steps over one instruction.
    pub fn increment(&mut self) {
        self.address = self.address.wrapping_add(0x2);
    }

    /// Jumps straight to `address`.
    pub fn set(&mut self, address: u16) {
        self.address = address;
    }

    /// Returns to the program origin.
    pub fn reset(&mut self) {
        self.address = PROGRAM_ORIGIN;
    }
}

impl Default for ProgramCounter {
    fn default() -> Self {
        Self::new()
    }
}
