use crate::constants::STACK_DEPTH;
use crate::error::Error;

/// # Stack
///
/// Return addresses for in-flight subroutine calls, most recent last. Depth
/// is fixed; programs that nest deeper than [`STACK_DEPTH`] calls fault
/// rather than clobbering memory.
pub struct Stack {
    frames: Vec<u16>,
}

impl Stack {
    pub fn new() -> Self {
        Stack {
            frames: Vec::with_capacity(STACK_DEPTH),
        }
    }

    /// Pushes a return address.
    pub fn push(&mut self, address: u16) -> Result<(), Error> {
        if self.frames.len() >= STACK_DEPTH {
            return Err(Error::StackOverflow);
        }
        self.frames.push(address);
        Ok(())
    }

    /// Pops the most recent return address.
    pub fn pop(&mut self) -> Result<u16, Error> {
        self.frames.pop().ok_or(Error::StackUnderflow)
    }

    /// The number of calls in flight.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Drops every frame.
    pub fn reset(&mut self) {
        self.frames.clear();
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}
