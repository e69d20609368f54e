use crate::constants::{FONT_ORIGIN, GLYPH_SIZE};
use crate::cpu::Cpu;
use crate::error::Error;
use crate::instruction::Instruction;
use crate::memory::Pointer;
use crate::registers::Register;

/// # Operations
///
/// Every operation the machine implements, with its operands already decoded
/// into registers, addresses, and immediates. The set is closed: words that
/// name nothing here fault at decode instead of executing as garbage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// `00E0` - clear the display
    ClearDisplay,
    /// `00EE` - PC = STACK.pop()
    Return,
    /// `1NNN` - PC = NNN
    Jump { address: u16 },
    /// `2NNN` - STACK.push(PC); PC = NNN
    Call { address: u16 },
    /// `3XNN` - if Vx == NN then PC += 2
    SkipEqual { x: Register, nn: u8 },
    /// `4XNN` - if Vx != NN then PC += 2
    SkipNotEqual { x: Register, nn: u8 },
    /// `5XY_` - if Vx == Vy then PC += 2
    SkipRegisterEqual { x: Register, y: Register },
    /// `6XNN` - Vx = NN
    Load { x: Register, nn: u8 },
    /// `7XNN` - Vx += NN, dropping the carry
    AddImmediate { x: Register, nn: u8 },
    /// `8XY0` - Vx = Vy
    Copy { x: Register, y: Register },
    /// `8XY1` - Vx |= Vy
    Or { x: Register, y: Register },
    /// `8XY2` - Vx &= Vy
    And { x: Register, y: Register },
    /// `8XY3` - Vx ^= Vy
    Xor { x: Register, y: Register },
    /// `8XY4` - Vx += Vy; VF = carry
    Add { x: Register, y: Register },
    /// `8XY5` - Vx -= Vy; VF = !borrow
    Subtract { x: Register, y: Register },
    /// `8XY6` - VF = Vx & 1; Vx >>= 1
    ShiftRight { x: Register },
    /// `8XY7` - Vx = Vy - Vx; VF = !borrow
    SubtractFrom { x: Register, y: Register },
    /// `8XYE` - VF = Vx >> 7; Vx <<= 1
    ShiftLeft { x: Register },
    /// `9XY_` - if Vx != Vy then PC += 2
    SkipRegisterNotEqual { x: Register, y: Register },
    /// `ANNN` - I = NNN
    LoadIndex { address: u16 },
    /// `BNNN` - PC = V0 + NNN
    JumpRelative { address: u16 },
    /// `CXNN` - Vx = random byte & NN
    Random { x: Register, nn: u8 },
    /// `DXYN` - draw the N-row sprite at I to (Vx, Vy); VF = collision
    Draw { x: Register, y: Register, n: u8 },
    /// `EX9E` - if key Vx is down then PC += 2
    SkipKeyPressed { x: Register },
    /// `EXA1` - if key Vx is up then PC += 2
    SkipKeyNotPressed { x: Register },
    /// `FX07` - Vx = DT
    LoadDelay { x: Register },
    /// `FX0A` - block until a key is pressed; Vx = key
    WaitKey { x: Register },
    /// `FX15` - DT = Vx
    StoreDelay { x: Register },
    /// `FX18` - ST = Vx
    StoreSound { x: Register },
    /// `FX1E` - I += Vx, dropping the carry
    AddIndex { x: Register },
    /// `FX29` - I = the font glyph for digit Vx
    LoadGlyph { x: Register },
    /// `FX33` - memory[I..I+3] = the decimal digits of Vx
    StoreDecimal { x: Register },
    /// `FX55` - memory[I..=I+X] = V0..=Vx
    StoreRegisters { x: Register },
    /// `FX65` - V0..=Vx = memory[I..=I+X]
    LoadRegisters { x: Register },
}

impl Operation {
    /// Selects the operation a word names.
    ///
    /// Only the 0x0, 0x8, 0xE, and 0xF categories discriminate on their low
    /// nibbles; `5XY_` and `9XY_` accept any low nibble. A word that selects
    /// nothing faults with [`Error::InvalidInstruction`].
    pub fn decode(instruction: Instruction) -> Result<Self, Error> {
        let x = Register::from_nibble(instruction.x());
        let y = Register::from_nibble(instruction.y());
        let operation = match instruction.nibbles() {
            (0x0, 0x0, 0xE, 0x0) => Operation::ClearDisplay,
            (0x0, 0x0, 0xE, 0xE) => Operation::Return,
            (0x1, ..) => Operation::Jump {
                address: instruction.addr(),
            },
            (0x2, ..) => Operation::Call {
                address: instruction.addr(),
            },
            (0x3, ..) => Operation::SkipEqual {
                x,
                nn: instruction.nn(),
            },
            (0x4, ..) => Operation::SkipNotEqual {
                x,
                nn: instruction.nn(),
            },
            (0x5, ..) => Operation::SkipRegisterEqual { x, y },
            (0x6, ..) => Operation::Load {
                x,
                nn: instruction.nn(),
            },
            (0x7, ..) => Operation::AddImmediate {
                x,
                nn: instruction.nn(),
            },
            (0x8, .., 0x0) => Operation::Copy { x, y },
            (0x8, .., 0x1) => Operation::Or { x, y },
            (0x8, .., 0x2) => Operation::And { x, y },
            (0x8, .., 0x3) => Operation::Xor { x, y },
            (0x8, .., 0x4) => Operation::Add { x, y },
            (0x8, .., 0x5) => Operation::Subtract { x, y },
            (0x8, .., 0x6) => Operation::ShiftRight { x },
            (0x8, .., 0x7) => Operation::SubtractFrom { x, y },
            (0x8, .., 0xE) => Operation::ShiftLeft { x },
            (0x9, ..) => Operation::SkipRegisterNotEqual { x, y },
            (0xA, ..) => Operation::LoadIndex {
                address: instruction.addr(),
            },
            (0xB, ..) => Operation::JumpRelative {
                address: instruction.addr(),
            },
            (0xC, ..) => Operation::Random {
                x,
                nn: instruction.nn(),
            },
            (0xD, ..) => Operation::Draw {
                x,
                y,
                n: instruction.n(),
            },
            (0xE, .., 0x9, 0xE) => Operation::SkipKeyPressed { x },
            (0xE, .., 0xA, 0x1) => Operation::SkipKeyNotPressed { x },
            (0xF, .., 0x0, 0x7) => Operation::LoadDelay { x },
            (0xF, .., 0x0, 0xA) => Operation::WaitKey { x },
            (0xF, .., 0x1, 0x5) => Operation::StoreDelay { x },
            (0xF, .., 0x1, 0x8) => Operation::StoreSound { x },
            (0xF, .., 0x1, 0xE) => Operation::AddIndex { x },
            (0xF, .., 0x2, 0x9) => Operation::LoadGlyph { x },
            (0xF, .., 0x3, 0x3) => Operation::StoreDecimal { x },
            (0xF, .., 0x5, 0x5) => Operation::StoreRegisters { x },
            (0xF, .., 0x6, 0x5) => Operation::LoadRegisters { x },
            _ => return Err(Error::InvalidInstruction(instruction.word())),
        };
        Ok(operation)
    }
}

impl Cpu {
    /// Applies one decoded operation to the machine.
    ///
    /// The program counter has already stepped past the word being executed:
    /// skips step it once more, and `2NNN` pushes it as the return address.
    pub(crate) fn execute(&mut self, operation: Operation) -> Result<(), Error> {
        match operation {
            Operation::ClearDisplay => self.display.clear(),
            Operation::Return => {
                let address = self.stack.pop()?;
                self.program_counter.set(address);
            }
            Operation::Jump { address } => self.program_counter.set(address),
            Operation::Call { address } => {
                self.stack.push(self.program_counter.address())?;
                self.program_counter.set(address);
            }
            Operation::SkipEqual { x, nn } => {
                if self.registers[x] == nn {
                    self.program_counter.increment();
                }
            }
            Operation::SkipNotEqual { x, nn } => {
                if self.registers[x] != nn {
                    self.program_counter.increment();
                }
            }
            Operation::SkipRegisterEqual { x, y } => {
                if self.registers[x] == self.registers[y] {
                    self.program_counter.increment();
                }
            }
            Operation::Load { x, nn } => self.registers[x] = nn,
            Operation::AddImmediate { x, nn } => {
                self.registers[x] = self.registers[x].wrapping_add(nn);
            }
            Operation::Copy { x, y } => self.registers[x] = self.registers[y],
            Operation::Or { x, y } => {
                let value = self.registers[y];
                self.registers[x] |= value;
            }
            Operation::And { x, y } => {
                let value = self.registers[y];
                self.registers[x] &= value;
            }
            Operation::Xor { x, y } => {
                let value = self.registers[y];
                self.registers[x] ^= value;
            }
            Operation::Add { x, y } => {
                let (value, carry) = self.registers[x].overflowing_add(self.registers[y]);
                self.registers[x] = value;
                self.registers[Register::VF] = if carry { 0x1 } else { 0x0 };
            }
            Operation::Subtract { x, y } => {
                let (value, borrow) = self.registers[x].overflowing_sub(self.registers[y]);
                self.registers[x] = value;
                self.registers[Register::VF] = if borrow { 0x0 } else { 0x1 };
            }
            Operation::ShiftRight { x } => {
                self.registers[Register::VF] = self.registers[x] & 0x1;
                self.registers[x] >>= 0x1;
            }
            Operation::SubtractFrom { x, y } => {
                let (value, borrow) = self.registers[y].overflowing_sub(self.registers[x]);
                self.registers[x] = value;
                self.registers[Register::VF] = if borrow { 0x0 } else { 0x1 };
            }
            Operation::ShiftLeft { x } => {
                self.registers[Register::VF] = self.registers[x] >> 0x7;
                self.registers[x] <<= 0x1;
            }
            Operation::SkipRegisterNotEqual { x, y } => {
                if self.registers[x] != self.registers[y] {
                    self.program_counter.increment();
                }
            }
            Operation::LoadIndex { address } => self.registers.index = address,
            Operation::JumpRelative { address } => {
                self.program_counter
                    .set(u16::from(self.registers[Register::V0]) + address);
            }
            Operation::Random { x, nn } => {
                let byte: u8 = rand::random();
                self.registers[x] = byte & nn;
            }
            Operation::Draw { x, y, n } => {
                let mut rows = [0x0; 0xF];
                let sprite = &mut rows[..n as usize];
                // A sprite with no rows reads nothing, so a dangling I is
                // not a fault.
                if !sprite.is_empty() {
                    let source = Pointer::new(self.registers.index as usize)?;
                    self.memory.read(sprite, source)?;
                }
                let erased = self.display.draw_sprite(sprite, self.registers[x], self.registers[y]);
                self.registers[Register::VF] = if erased { 0x1 } else { 0x0 };
            }
            Operation::SkipKeyPressed { x } => {
                if self.keyboard.is_pressed(self.registers[x]) {
                    self.program_counter.increment();
                }
            }
            Operation::SkipKeyNotPressed { x } => {
                if !self.keyboard.is_pressed(self.registers[x]) {
                    self.program_counter.increment();
                }
            }
            Operation::LoadDelay { x } => self.registers[x] = self.registers.delay,
            Operation::WaitKey { x } => {
                // A cancelled wait leaves Vx alone; the operation still
                // retires so the machine can stop.
                if let Some(key) = self.keyboard.wait_for_key_press() {
                    self.registers[x] = key;
                }
            }
            Operation::StoreDelay { x } => self.registers.delay = self.registers[x],
            Operation::StoreSound { x } => self.registers.sound = self.registers[x],
            Operation::AddIndex { x } => {
                self.registers.index = self
                    .registers
                    .index
                    .wrapping_add(u16::from(self.registers[x]));
            }
            Operation::LoadGlyph { x } => {
                self.registers.index = FONT_ORIGIN + u16::from(self.registers[x]) * GLYPH_SIZE;
            }
            Operation::StoreDecimal { x } => {
                let value = self.registers[x];
                let digits = [value / 100, value / 10 % 10, value % 10];
                let destination = Pointer::new(self.registers.index as usize)?;
                self.memory.write(&digits, destination)?;
            }
            Operation::StoreRegisters { x } => {
                let destination = Pointer::new(self.registers.index as usize)?;
                self.memory.write(self.registers.up_to(x), destination)?;
            }
            Operation::LoadRegisters { x } => {
                let source = Pointer::new(self.registers.index as usize)?;
                self.memory.read(self.registers.up_to_mut(x), source)?;
            }
        }
        Ok(())
    }
}
