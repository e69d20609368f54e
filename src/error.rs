use thiserror::Error;

/// Faults that stop the virtual machine.
///
/// Every variant is fatal to the cycle that raised it: the operation aborts,
/// the error propagates to the scheduler, and the recurring cycle is
/// cancelled. The only recovery is an explicit reset.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The fetched word doesn't decode to any defined operation.
    #[error("invalid instruction {0:#06X}")]
    InvalidInstruction(u16),

    /// A memory access fell outside the addressable range.
    #[error("invalid memory address {0:#05X}")]
    InvalidAddress(usize),

    /// A subroutine call was made with no stack frames left.
    #[error("stack overflow")]
    StackOverflow,

    /// A return was executed with no call in flight.
    #[error("stack underflow")]
    StackUnderflow,
}
