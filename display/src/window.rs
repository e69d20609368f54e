use sdl2::pixels::PixelFormatEnum;

use crate::frame::{Frame, DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// The size multiplier for each pixel.
const SCALE: usize = 10;

/// # Window
///
/// An SDL2 window that renders frames scaled up, white on black.
pub struct Window {
    canvas: sdl2::render::WindowCanvas,
}

impl Window {
    /// Opens a centered window bound to an sdl2 context.
    pub fn new(sdl: &sdl2::Sdl, title: &str) -> Result<Self, String> {
        let video = sdl.video()?;
        let window = video
            .window(
                title,
                (DISPLAY_WIDTH * SCALE) as u32,
                (DISPLAY_HEIGHT * SCALE) as u32,
            )
            .position_centered()
            .opengl()
            .build()
            .map_err(|error| error.to_string())?;
        let canvas = window
            .into_canvas()
            .build()
            .map_err(|error| error.to_string())?;
        Ok(Window { canvas })
    }

    /// Formats a frame for rendering as an SDL2 RGB24 texture by
    /// concatenating its rows, triplicating each pixel into an RGB triple,
    /// and scaling the binary state to full intensity.
    fn frame_to_texture(frame: &Frame) -> Vec<u8> {
        frame
            .iter()
            .flat_map(|row| row.iter())
            .flat_map(|pixel| std::iter::repeat(pixel).take(3))
            .map(|pixel| pixel * 255)
            .collect()
    }

    /// Uploads one frame to the canvas and presents it.
    pub fn render(&mut self, frame: &Frame) -> Result<(), String> {
        let texture_creator = self.canvas.texture_creator();
        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGB24,
                DISPLAY_WIDTH as u32,
                DISPLAY_HEIGHT as u32,
            )
            .map_err(|error| error.to_string())?;
        texture.with_lock(None, |buffer: &mut [u8], _pitch: usize| {
            buffer.copy_from_slice(&Window::frame_to_texture(frame));
        })?;
        self.canvas.copy(&texture, None, None)?;
        self.canvas.present();
        Ok(())
    }
}
