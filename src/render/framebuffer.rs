//! Pixel-level drawing onto a borrowed color buffer.

use crate::clipper::{clip_line, Rect};
use crate::projection::ScreenPoint;

/// A view into a row-major ARGB color buffer.
///
/// Borrowed rather than owned so it can be created temporarily around any
/// buffer of the right size. All drawing silently ignores pixels outside the
/// buffer.
pub struct FrameBuffer<'a> {
    color_buffer: &'a mut [u32],
    width: u32,
    height: u32,
}

impl<'a> FrameBuffer<'a> {
    pub fn new(color_buffer: &'a mut [u32], width: u32, height: u32) -> Self {
        debug_assert_eq!(
            color_buffer.len(),
            (width * height) as usize,
            "Color buffer size doesn't match dimensions"
        );
        Self {
            color_buffer,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn clear(&mut self, color: u32) {
        self.color_buffer.fill(color);
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some((y as u32 * self.width + x as u32) as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if let Some(index) = self.index(x, y) {
            self.color_buffer[index] = color;
        }
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|index| self.color_buffer[index])
    }

    /// Fill the pixels of row `y` from `x0` to `x1` inclusive.
    fn fill_span(&mut self, y: i32, x0: i32, x1: i32, color: u32) {
        if y < 0 || y >= self.height as i32 {
            return;
        }
        let x0 = x0.max(0);
        let x1 = x1.min(self.width as i32 - 1);
        if x0 > x1 {
            return;
        }
        let row = (y as u32 * self.width) as usize;
        self.color_buffer[row + x0 as usize..=row + x1 as usize].fill(color);
    }

    /// The part of `from`–`to` that lands on the buffer, in whole pixels.
    fn visible_segment(
        &self,
        from: ScreenPoint,
        to: ScreenPoint,
    ) -> Option<(ScreenPoint, ScreenPoint)> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        let bounds = Rect::from_size(f64::from(self.width - 1), f64::from(self.height - 1));
        let (a, b) = clip_line(from.to_vec2(), to.to_vec2(), &bounds)?;
        Some((ScreenPoint::from_vec2(a), ScreenPoint::from_vec2(b)))
    }

    /// Bresenham's line algorithm, both endpoints included.
    ///
    /// The segment is first clipped to the buffer, so the walk never leaves
    /// it. Integer-only: an error term tracks the distance between the ideal
    /// line and the current pixel and decides when to step along the minor
    /// axis.
    pub fn draw_line(&mut self, from: ScreenPoint, to: ScreenPoint, color: u32) {
        let Some((from, to)) = self.visible_segment(from, to) else {
            return;
        };
        let (x0, y0, x1, y1) = (from.x, from.y, to.x, to.y);
        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        let x_incr_direction = if x0 < x1 { 1 } else { -1 };
        let y_incr_direction = if y0 < y1 { 1 } else { -1 };

        let mut err = dx - dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.set_pixel(x, y, color);
            if x == x1 && y == y1 {
                break;
            }

            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += x_incr_direction;
            }
            if e2 < dx {
                err += dx;
                y += y_incr_direction;
            }
        }
    }

    /// Closed outline through `points`.
    pub fn draw_outline(&mut self, points: &[ScreenPoint], color: u32) {
        let n = points.len();
        if n < 2 {
            if let Some(p) = points.first() {
                self.set_pixel(p.x, p.y, color);
            }
            return;
        }
        for i in 0..n {
            self.draw_line(points[i], points[(i + 1) % n], color);
        }
    }

    /// Scanline fill with the even-odd rule, sampling at pixel centres.
    ///
    /// Handles concave polygons. Fewer than three points fills nothing.
    pub fn fill_polygon(&mut self, points: &[ScreenPoint], color: u32) {
        if points.len() < 3 {
            return;
        }

        let (min_y, max_y) = points
            .iter()
            .fold((i32::MAX, i32::MIN), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)));
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        let mut crossings: Vec<f64> = Vec::with_capacity(points.len());
        for y in min_y..=max_y {
            let sample_y = f64::from(y) + 0.5;
            crossings.clear();

            for (i, a) in points.iter().enumerate() {
                let b = &points[(i + 1) % points.len()];
                let (ay, by) = (f64::from(a.y), f64::from(b.y));
                // Half-open on y so shared vertices are counted once.
                if (ay <= sample_y) != (by <= sample_y) {
                    let t = (sample_y - ay) / (by - ay);
                    crossings.push(f64::from(a.x) + t * f64::from(b.x - a.x));
                }
            }

            crossings.sort_by(f64::total_cmp);
            for pair in crossings.chunks_exact(2) {
                let x0 = (pair[0] - 0.5).ceil() as i32;
                let x1 = (pair[1] - 0.5).floor() as i32;
                self.fill_span(y, x0, x1, color);
            }
        }
    }

    /// Filled disc, used for vertex markers.
    pub fn fill_disc(&mut self, center: ScreenPoint, radius: i32, color: u32) {
        let radius = radius.max(0);
        for dy in -radius..=radius {
            let half = f64::from(radius * radius - dy * dy).sqrt() as i32;
            self.fill_span(
                center.y.saturating_add(dy),
                center.x.saturating_sub(half),
                center.x.saturating_add(half),
                color,
            );
        }
    }
}
