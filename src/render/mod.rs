//! Host-side rasterization of [`Frame`](crate::engine::Frame)s into an ARGB
//! color buffer.
//!
//! There is no depth buffer: commands are painted in order, so the painter's
//! ordering produced by shading decides what ends up on top.

mod framebuffer;
mod renderer;

pub use framebuffer::FrameBuffer;
pub use renderer::Renderer;
