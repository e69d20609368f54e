/// The 16-key hexadecimal keypad the machine samples.
///
/// Like [`Display`](crate::Display), calls arrive from the cycle thread while
/// a UI layer feeds key state concurrently, so implementations serialize
/// internally and take `&self`.
pub trait Keyboard: Send + Sync {
    /// Whether `key` is currently held. Keys are 0x0..=0xF; what an
    /// implementation makes of larger values is its own business.
    fn is_pressed(&self, key: u8) -> bool;

    /// Blocks until a key is pressed and returns it.
    ///
    /// Returns `None` only when the wait is cancelled via
    /// [`cancel_waits`](Keyboard::cancel_waits); the in-flight operation then
    /// finishes without writing a register and the machine is free to stop.
    fn wait_for_key_press(&self) -> Option<u8>;

    /// Unblocks the pending wait, and any wait entered before
    /// [`resume_waits`](Keyboard::resume_waits). Invoked when the machine
    /// stops or resets.
    fn cancel_waits(&self) {}

    /// Re-arms blocking waits after a cancel. Invoked when cycling
    /// (re)starts.
    fn resume_waits(&self) {}
}

/// A keyboard with no keys behind it. Waiting reports key 0 immediately
/// rather than stalling the machine forever.
pub struct NullKeyboard;

impl Keyboard for NullKeyboard {
    fn is_pressed(&self, _key: u8) -> bool {
        false
    }

    fn wait_for_key_press(&self) -> Option<u8> {
        Some(0x0)
    }
}
