//! Owns the color buffer and paints [`Frame`]s into it.

use super::framebuffer::FrameBuffer;
use crate::colors::Color;
use crate::engine::{DrawCommand, Frame};

/// Radius of vertex markers in wireframe mode, in pixels.
pub const VERTEX_MARKER_RADIUS: i32 = 3;

pub struct Renderer {
    color_buffer: Vec<u32>,
    width: u32,
    height: u32,
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width * height) as usize;
        Self {
            color_buffer: vec![crate::colors::BACKGROUND.to_argb(); size],
            width,
            height,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        let size = (width * height) as usize;
        self.color_buffer = vec![crate::colors::BACKGROUND.to_argb(); size];
        self.width = width;
        self.height = height;
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn clear(&mut self, color: Color) {
        self.color_buffer.fill(color.to_argb());
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(Color::from_argb(
                self.color_buffer[(y as u32 * self.width + x as u32) as usize],
            ))
        } else {
            None
        }
    }

    pub fn as_framebuffer(&mut self) -> FrameBuffer<'_> {
        FrameBuffer::new(&mut self.color_buffer, self.width, self.height)
    }

    /// Clear to the frame's background and paint its commands in order.
    pub fn draw(&mut self, frame: &Frame) {
        let mut fb = self.as_framebuffer();
        fb.clear(frame.background.to_argb());

        for command in &frame.commands {
            match command {
                DrawCommand::Line { from, to, color } => {
                    fb.draw_line(*from, *to, color.to_argb());
                }
                DrawCommand::Polygon {
                    points,
                    fill,
                    outline,
                } => {
                    fb.fill_polygon(points, fill.to_argb());
                    if let Some(outline) = outline {
                        fb.draw_outline(points, outline.to_argb());
                    }
                }
                DrawCommand::Outline { points, color } => {
                    fb.draw_outline(points, color.to_argb());
                }
                DrawCommand::Point { at, color } => {
                    fb.fill_disc(*at, VERTEX_MARKER_RADIUS, color.to_argb());
                }
            }
        }
    }

    /// The color buffer as bytes, in the layout of an ARGB8888 texture.
    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: u32 has no padding and a stricter alignment than u8; the
        // slice covers exactly the buffer's bytes and borrows it immutably.
        unsafe {
            std::slice::from_raw_parts(
                self.color_buffer.as_ptr() as *const u8,
                self.color_buffer.len() * 4,
            )
        }
    }
}
