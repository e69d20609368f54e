/// # Instructions
///
/// Chip-8 instructions are single 16-bit words. Which operation a word names
/// is cased on some combination of:
/// - `(n, _, _, _)` broad categorization; applies to every word
/// - `(_, _, _, n)` specific behavior within a category
/// - `(_, _, n, n)` more specific behavior within a category
/// - `(_, n, n, n)` a fixed function that takes no variables (e.g. 00E0)
///
/// Nibbles that don't select the operation usually carry its data:
/// - `(_, n, n, n)` a 12-bit memory address
/// - `(_, _, n, n)` a byte assigned to and/or compared with Vx
/// - `(_, n, _, _)` the register Vx, or the range of registers V0..Vx
/// - `(_, _, n, _)` the register Vy
///
/// Decomposition is total: every word yields a full set of fields, and only
/// the dispatcher decides whether their combination is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction(u16);

impl Instruction {
    pub fn new(word: u16) -> Self {
        Instruction(word)
    }

    /// The raw 16-bit word.
    pub fn word(self) -> u16 {
        self.0
    }

    /// The instruction's component nibbles.
    pub fn nibbles(self) -> (u8, u8, u8, u8) {
        (((self.0 & 0xF000) >> 12) as u8, self.x(), self.y(), self.n())
    }

    /// The second nibble.
    /// `[_x__]`
    pub fn x(self) -> u8 {
        ((self.0 & 0x0F00) >> 8) as u8
    }

    /// The third nibble.
    /// `[__y_]`
    pub fn y(self) -> u8 {
        ((self.0 & 0x00F0) >> 4) as u8
    }

    /// The least significant nibble.
    /// `[___n]`
    pub fn n(self) -> u8 {
        (self.0 & 0x000F) as u8
    }

    /// The least significant byte.
    /// `[__nn]`
    pub fn nn(self) -> u8 {
        (self.0 & 0x00FF) as u8
    }

    /// The word without its most significant nibble.
    /// `[_nnn]`
    pub fn addr(self) -> u16 {
        self.0 & 0x0FFF
    }
}
