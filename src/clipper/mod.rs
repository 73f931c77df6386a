//! 2D clipping against an axis-aligned rectangular window.
//!
//! - [`line`]: Cohen–Sutherland segment clipping driven by region outcodes.
//! - [`polygon`]: Sutherland–Hodgman polygon clipping, one boundary at a time.
//!
//! Both are pure functions over [`Rect`] and can be used on their own or by
//! the engine to trim its render output to the configured clip window.

pub mod line;
pub mod polygon;
pub mod rect;

pub use line::{clip_line, Outcode};
pub use polygon::clip_polygon;
pub use rect::Rect;
