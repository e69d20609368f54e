use std::sync::Arc;

use crate::constants::{FONT, FONT_ORIGIN, PROGRAM_ORIGIN};
use crate::display::Display;
use crate::error::Error;
use crate::instruction::Instruction;
use crate::keyboard::Keyboard;
use crate::memory::{Memory, Pointer};
use crate::operations::Operation;
use crate::program_counter::ProgramCounter;
use crate::registers::{Register, Registers};
use crate::stack::Stack;

/// # Cpu
///
/// The whole machine: register file, program counter, call stack, and memory,
/// plus handles to the display it draws on and the keyboard it samples. One
/// call to [`cycle`](Cpu::cycle) fetches, decodes, and executes a single
/// instruction; timers tick separately so the caller owns both cadences.
pub struct Cpu {
    pub(crate) registers: Registers,
    pub(crate) program_counter: ProgramCounter,
    pub(crate) stack: Stack,
    pub(crate) memory: Memory,
    pub(crate) display: Arc<dyn Display>,
    pub(crate) keyboard: Arc<dyn Keyboard>,
}

impl Cpu {
    pub fn new(display: Arc<dyn Display>, keyboard: Arc<dyn Keyboard>) -> Self {
        Cpu {
            registers: Registers::new(),
            program_counter: ProgramCounter::new(),
            stack: Stack::new(),
            memory: Memory::new(),
            display,
            keyboard,
        }
    }

    /// Images memory with the font sprite sheet and `program`, replacing
    /// whatever was loaded before.
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), Error> {
        self.memory.reset();
        self.memory.write(&FONT, Pointer::new(FONT_ORIGIN as usize)?)?;
        self.memory
            .write(program, Pointer::new(PROGRAM_ORIGIN as usize)?)?;
        Ok(())
    }

    /// Fetches, decodes, and executes one instruction.
    pub fn cycle(&mut self) -> Result<(), Error> {
        let instruction = self.fetch()?;
        let operation = Operation::decode(instruction)?;
        log::trace!(
            "{:#06X} -> {:?} v={:02X?} i={:#05X} pc={:#05X}",
            instruction.word(),
            operation,
            self.registers.up_to(Register::VF),
            self.registers.index,
            self.program_counter.address(),
        );
        self.execute(operation)
    }

    /// Counts both timers down, stopping at zero.
    pub fn tick_timers(&mut self) {
        self.registers.delay = self.registers.delay.saturating_sub(1);
        self.registers.sound = self.registers.sound.saturating_sub(1);
    }

    /// Returns execution state to power-on: registers cleared, the stack
    /// emptied, the program counter at the origin. Memory keeps its image.
    pub fn reset(&mut self) {
        self.registers.reset();
        self.program_counter.reset();
        self.stack.reset();
    }

    /// Reads the big-endian word at the program counter and steps over it.
    fn fetch(&mut self) -> Result<Instruction, Error> {
        let mut word = [0x0; 2];
        let source = Pointer::new(self.program_counter.address() as usize)?;
        self.memory.read(&mut word, source)?;
        self.program_counter.increment();
        Ok(Instruction::new(u16::from(word[0]) << 8 | u16::from(word[1])))
    }
}

#[cfg(test)]
mod test_cpu {
    use std::sync::Arc;

    use super::*;
    use crate::constants::MEMORY_CAPACITY;
    use crate::display::testing::RecordingDisplay;
    use crate::display::NullDisplay;
    use crate::keyboard::NullKeyboard;

    fn cpu() -> Cpu {
        Cpu::new(Arc::new(NullDisplay), Arc::new(NullKeyboard))
    }

    #[test]
    fn test_fetch_combines_big_endian_words() {
        let mut cpu = cpu();
        cpu.memory
            .write(&[0xAB, 0xCD], Pointer::new(0x200).unwrap())
            .unwrap();
        let instruction = cpu.fetch().unwrap();
        assert_eq!(instruction.word(), 0xABCD);
        assert_eq!(cpu.program_counter.address(), 0x202);
    }

    #[test]
    fn test_cycle_steps_past_the_faulting_word() {
        let mut cpu = cpu();
        cpu.memory
            .write(&[0xFF, 0xFF], Pointer::new(0x200).unwrap())
            .unwrap();
        assert_eq!(cpu.cycle(), Err(Error::InvalidInstruction(0xFFFF)));
        assert_eq!(cpu.program_counter.address(), 0x202);
    }

    #[test]
    fn test_fetch_faults_at_the_memory_edge() {
        let mut cpu = cpu();
        cpu.program_counter.set(0xFFE);
        assert_eq!(cpu.cycle(), Err(Error::InvalidAddress(0xFFF)));
    }

    #[test]
    fn test_fetch_faults_past_the_memory_edge() {
        let mut cpu = cpu();
        cpu.program_counter.set(0x1000);
        assert_eq!(cpu.cycle(), Err(Error::InvalidAddress(0x1000)));
    }

    #[test]
    fn test_load_program_images_the_font_and_the_program() {
        let mut cpu = cpu();
        cpu.load_program(&[0xAB, 0xCD]).unwrap();
        let mut font = [0x0; 1];
        cpu.memory
            .read(&mut font, Pointer::new(FONT_ORIGIN as usize).unwrap())
            .unwrap();
        assert_eq!(font, [0xF0]);
        let mut program = [0x0; 2];
        cpu.memory
            .read(&mut program, Pointer::new(PROGRAM_ORIGIN as usize).unwrap())
            .unwrap();
        assert_eq!(program, [0xAB, 0xCD]);
    }

    #[test]
    fn test_load_program_clears_the_previous_image() {
        let mut cpu = cpu();
        cpu.memory
            .write(&[0xFF], Pointer::new(0x900).unwrap())
            .unwrap();
        cpu.load_program(&[0xAB]).unwrap();
        let mut byte = [0xFF; 1];
        cpu.memory.read(&mut byte, Pointer::new(0x900).unwrap()).unwrap();
        assert_eq!(byte, [0x0]);
    }

    #[test]
    fn test_load_program_bounds() {
        let mut cpu = cpu();
        let largest = MEMORY_CAPACITY - PROGRAM_ORIGIN as usize;
        assert!(cpu.load_program(&vec![0x0; largest]).is_ok());
        assert_eq!(
            cpu.load_program(&vec![0x0; largest + 1]),
            Err(Error::InvalidAddress(MEMORY_CAPACITY))
        );
    }

    #[test]
    fn test_tick_timers_saturate_at_zero() {
        let mut cpu = cpu();
        cpu.registers.delay = 0x2;
        cpu.tick_timers();
        assert_eq!(cpu.registers.delay, 0x1);
        assert_eq!(cpu.registers.sound, 0x0);
        cpu.tick_timers();
        cpu.tick_timers();
        assert_eq!(cpu.registers.delay, 0x0);
    }

    #[test]
    fn test_reset_keeps_the_memory_image() {
        let mut cpu = cpu();
        cpu.load_program(&[0xAB]).unwrap();
        cpu.registers[Register::V1] = 0x7;
        cpu.program_counter.set(0x400);
        cpu.stack.push(0x202).unwrap();
        cpu.reset();
        assert_eq!(cpu.registers[Register::V1], 0x0);
        assert_eq!(cpu.program_counter.address(), PROGRAM_ORIGIN);
        assert_eq!(cpu.stack.depth(), 0);
        let mut byte = [0x0; 1];
        cpu.memory
            .read(&mut byte, Pointer::new(PROGRAM_ORIGIN as usize).unwrap())
            .unwrap();
        assert_eq!(byte, [0xAB]);
    }

    #[test]
    fn test_programs_execute_from_the_origin() {
        let mut cpu = cpu();
        // LD V0, 0xA; LD V1, 0x5; ADD V0, V1
        cpu.load_program(&[0x60, 0x0A, 0x61, 0x05, 0x80, 0x14]).unwrap();
        for _ in 0..3 {
            cpu.cycle().unwrap();
        }
        assert_eq!(cpu.registers[Register::V0], 0xF);
        assert_eq!(cpu.registers[Register::VF], 0x0);
        assert_eq!(cpu.program_counter.address(), 0x206);
    }

    #[test]
    fn test_glyphs_are_imaged_for_drawing() {
        let display = Arc::new(RecordingDisplay::new(false));
        let mut cpu = Cpu::new(display.clone(), Arc::new(NullKeyboard));
        // LD V0, 0x2; LD F, V0; DRW V1, V1, 5
        cpu.load_program(&[0x60, 0x02, 0xF0, 0x29, 0xD1, 0x15]).unwrap();
        for _ in 0..3 {
            cpu.cycle().unwrap();
        }
        let draws = display.draws.lock().unwrap();
        assert_eq!(*draws, vec![(vec![0xF0, 0x10, 0xF0, 0x80, 0xF0], 0x0, 0x0)]);
    }
}
