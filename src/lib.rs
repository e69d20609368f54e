pub use cpu::Cpu;
pub use display::{Display, NullDisplay};
pub use error::Error;
pub use instruction::Instruction;
pub use keyboard::{Keyboard, NullKeyboard};
pub use memory::{Memory, Pointer};
pub use operations::Operation;
pub use program_counter::ProgramCounter;
pub use registers::{Register, Registers};
pub use stack::Stack;
pub use vm::Vm;

pub mod constants;
mod cpu;
mod display;
mod error;
mod instruction;
mod keyboard;
mod memory;
mod operations;
mod program_counter;
mod registers;
mod stack;
mod vm;
