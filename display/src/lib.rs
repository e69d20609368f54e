pub use frame::{Frame, FrameBuffer, DISPLAY_HEIGHT, DISPLAY_WIDTH};
pub use shared::SharedFrame;
pub use window::Window;

mod frame;
mod shared;
mod window;
