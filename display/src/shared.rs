use std::sync::Mutex;

use vm8::Display;

use crate::frame::{Frame, FrameBuffer};

/// # SharedFrame
///
/// A [`FrameBuffer`] behind a lock, shared between the cycling machine and a
/// render loop. Draws mark the frame dirty, and
/// [`take_frame`](SharedFrame::take_frame) hands the pixels over only when
/// something changed so the renderer can skip untouched frames.
pub struct SharedFrame {
    inner: Mutex<Inner>,
}

struct Inner {
    buffer: FrameBuffer,
    dirty: bool,
}

impl SharedFrame {
    pub fn new() -> Self {
        SharedFrame {
            inner: Mutex::new(Inner {
                buffer: FrameBuffer::new(),
                dirty: false,
            }),
        }
    }

    /// The pixels, if they changed since the last take.
    pub fn take_frame(&self) -> Option<Frame> {
        let mut inner = self.inner.lock().unwrap();
        if inner.dirty {
            inner.dirty = false;
            Some(*inner.buffer.frame())
        } else {
            None
        }
    }
}

impl Default for SharedFrame {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for SharedFrame {
    fn clear(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.buffer.clear();
        inner.dirty = true;
    }

    fn draw_sprite(&self, sprite: &[u8], x: u8, y: u8) -> bool {
        let mut inner = self.inner.lock().unwrap();
        let erased = inner.buffer.draw(sprite, x, y);
        inner.dirty = true;
        erased
    }
}
