use crate::constants::MEMORY_CAPACITY;
use crate::error::Error;

/// A validated address into [`Memory`].
///
/// Construction rejects anything outside the addressable range; the surviving
/// value is masked against the capacity so it can index memory without
/// further checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pointer(usize);

impl Pointer {
    pub fn new(address: usize) -> Result<Self, Error> {
        if address >= MEMORY_CAPACITY {
            Err(Error::InvalidAddress(address))
        } else {
            Ok(Pointer(address & MEMORY_CAPACITY))
        }
    }

    /// The raw address.
    pub fn address(self) -> usize {
        self.0
    }
}

/// # Memory
///
/// The machine's flat byte-addressable store. The font sprite sheet occupies
/// the bottom of the address space and program images start at the program
/// origin; neither region is enforced here beyond the capacity bound.
///
/// Every multi-byte transfer is validated as a whole before a single byte
/// moves, so a failed access never partially applies.
pub struct Memory {
    bytes: Box<[u8]>,
}

impl Memory {
    pub fn new() -> Self {
        Memory {
            bytes: vec![0; MEMORY_CAPACITY].into_boxed_slice(),
        }
    }

    /// Copies `source` into memory starting at `destination`.
    pub fn write(&mut self, source: &[u8], destination: Pointer) -> Result<(), Error> {
        let start = destination.address();
        self.validate_range(start, source.len())?;
        self.bytes[start..start + source.len()].copy_from_slice(source);
        Ok(())
    }

    /// Fills `destination` from memory starting at `source`.
    pub fn read(&self, destination: &mut [u8], source: Pointer) -> Result<(), Error> {
        let start = source.address();
        self.validate_range(start, destination.len())?;
        destination.copy_from_slice(&self.bytes[start..start + destination.len()]);
        Ok(())
    }

    /// Zeroes every byte.
    pub fn reset(&mut self) {
        for byte in self.bytes.iter_mut() {
            *byte = 0;
        }
    }

    /// Checks that `[start, start + length)` stays inside the addressable
    /// range. Zero-length ranges are always valid.
    fn validate_range(&self, start: usize, length: usize) -> Result<(), Error> {
        if length > 0 {
            Pointer::new(start + length - 1)?;
        }
        Ok(())
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
