use sdl2::pixels::PixelFormatEnum;

use crab8_core::{FrameBuffer, DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// An SDL2 window that mirrors the console's 64x32 monochrome screen.
///
/// Each logical pixel is scaled up to a `scale`-sized square. `render`
/// should only be called on frames where the framebuffer actually
/// changed; the caller decides that via the console's dirty flag.
pub struct Display {
    canvas: sdl2::render::WindowCanvas,
}

impl Display {
    /// Opens a centered window on the given SDL context.
    pub fn new(sdl: &sdl2::Sdl, scale: u32) -> Result<Self, String> {
        let video = sdl.video()?;
        let window = video
            .window(
                "Crab-8",
                DISPLAY_WIDTH as u32 * scale,
                DISPLAY_HEIGHT as u32 * scale,
            )
            .position_centered()
            .opengl()
            .build()
            .map_err(|e| e.to_string())?;
        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        Ok(Display { canvas })
    }

    /// Flattens the framebuffer into an RGB24 byte stream: rows are
    /// concatenated, each pixel becomes three identical channel bytes,
    /// and a lit pixel is full white.
    fn frame_to_texture(frame: &FrameBuffer) -> Vec<u8> {
        frame
            .pixels()
            .iter()
            .flat_map(|row| row.iter())
            .flat_map(|&on| {
                let channel = if on { 255 } else { 0 };
                [channel; 3]
            })
            .collect()
    }

    /// Uploads the framebuffer as a streaming texture and presents it.
    pub fn render(&mut self, frame: &FrameBuffer) -> Result<(), String> {
        let texture_creator = self.canvas.texture_creator();
        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGB24,
                DISPLAY_WIDTH as u32,
                DISPLAY_HEIGHT as u32,
            )
            .map_err(|e| e.to_string())?;

        texture.with_lock(None, |buffer: &mut [u8], _pitch: usize| {
            buffer.copy_from_slice(&Display::frame_to_texture(frame));
        })?;

        self.canvas.copy(&texture, None, None)?;
        self.canvas.present();
        Ok(())
    }
}
