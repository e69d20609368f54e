use std::sync::{Condvar, Mutex};

use vm8::Keyboard;

/// Key state shared between the event loop and the machine.
struct KeyState {
    /// Which pad keys are currently held.
    held: [bool; 16],
    /// The most recent press no wait has consumed yet.
    last_press: Option<u8>,
    /// Whether blocking waits are armed; closed while the machine stops.
    open: bool,
}

/// # EventKeyboard
///
/// The 16-key pad, fed by the SDL2 event loop. Presses and releases arrive
/// on the main thread while the machine samples and blocks from its own, so
/// everything sits behind one lock with a condvar to wake blocked waits.
///
/// A press is remembered until the next wait consumes it, so a key hit just
/// before the machine asks still counts.
pub struct EventKeyboard {
    state: Mutex<KeyState>,
    pressed: Condvar,
}

impl EventKeyboard {
    pub fn new() -> Self {
        EventKeyboard {
            state: Mutex::new(KeyState {
                held: [false; 16],
                last_press: None,
                open: true,
            }),
            pressed: Condvar::new(),
        }
    }

    /// Marks `key` held and wakes any blocked wait. Keys are masked onto the
    /// pad.
    pub fn press(&self, key: u8) {
        let mut state = self.state.lock().unwrap();
        let key = key & 0xF;
        state.held[key as usize] = true;
        state.last_press = Some(key);
        self.pressed.notify_all();
    }

    /// Marks `key` released.
    pub fn release(&self, key: u8) {
        let mut state = self.state.lock().unwrap();
        state.held[(key & 0xF) as usize] = false;
    }
}

impl Default for EventKeyboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Keyboard for EventKeyboard {
    fn is_pressed(&self, key: u8) -> bool {
        self.state.lock().unwrap().held[(key & 0xF) as usize]
    }

    fn wait_for_key_press(&self) -> Option<u8> {
        let mut state = self.state.lock().unwrap();
        loop {
            if !state.open {
                return None;
            }
            if let Some(key) = state.last_press.take() {
                return Some(key);
            }
            state = self.pressed.wait(state).unwrap();
        }
    }

    fn cancel_waits(&self) {
        self.state.lock().unwrap().open = false;
        self.pressed.notify_all();
    }

    fn resume_waits(&self) {
        self.state.lock().unwrap().open = true;
    }
}
