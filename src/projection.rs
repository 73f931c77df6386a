//! Pinhole perspective projection to integer screen coordinates.
//!
//! # Coordinate System
//!
//! - Camera space: X right, Y up, Z away from the viewer. The viewer sits at
//!   `z = -distance` looking toward +Z.
//! - Screen space: origin top-left, X right, **Y down**. World +Y therefore
//!   maps to smaller screen y; this sign is fixed for the whole crate.
//!
//! ```text
//! screen_x =  x * scale / (z + distance) + width  / 2
//! screen_y = -y * scale / (z + distance) + height / 2
//! ```
//!
//! On the singular plane `z = -distance` the division is replaced by an
//! orthographic mapping, so every finite input produces a finite output.

use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::math::EPSILON;

/// An integer pixel position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(f64::from(self.x), f64::from(self.y))
    }

    /// Round a sub-pixel position; out-of-range values saturate.
    pub fn from_vec2(v: Vec2) -> Self {
        Self::new(v.x.round() as i32, v.y.round() as i32)
    }
}

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    width: u32,
    height: u32,
    /// Distance from the viewer to the z = 0 plane.
    distance: f64,
    /// Pixels per world unit at z = 0.
    scale: f64,
}

impl Projector {
    pub fn new(width: u32, height: u32, distance: f64, scale: f64) -> Self {
        Self {
            width,
            height,
            distance,
            scale,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Updates the viewport (typically called on window resize).
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Viewport centre in screen space.
    pub fn center(&self) -> Vec2 {
        Vec2::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }

    /// Project to a sub-pixel screen position.
    pub fn project_f(&self, v: Vec3) -> Vec2 {
        let center = self.center();
        let depth = v.z + self.distance;

        let factor = if depth.abs() < EPSILON {
            self.scale
        } else {
            self.scale / depth
        };

        let projected = Vec2::new(v.x * factor + center.x, -v.y * factor + center.y);
        if projected.is_finite() {
            projected
        } else {
            center
        }
    }

    /// Project to an integer pixel position.
    pub fn project(&self, v: Vec3) -> ScreenPoint {
        ScreenPoint::from_vec2(self.project_f(v))
    }

    pub fn project_all(&self, vertices: &[Vec3]) -> Vec<ScreenPoint> {
        vertices.iter().map(|&v| self.project(v)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projector() -> Projector {
        Projector::new(800, 600, 5.0, 300.0)
    }

    #[test]
    fn origin_maps_to_center() {
        assert_eq!(projector().project(Vec3::ZERO), ScreenPoint::new(400, 300));
    }

    #[test]
    fn positive_y_points_up_on_screen() {
        let p = projector().project(Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(p, ScreenPoint::new(400, 240));
    }

    #[test]
    fn perspective_divides_by_depth() {
        // x * 300 / (5 + 5) + 400
        let p = projector().project(Vec3::new(2.0, 0.0, 5.0));
        assert_eq!(p, ScreenPoint::new(460, 300));
    }

    #[test]
    fn farther_points_move_toward_center() {
        let near = projector().project(Vec3::new(1.0, 1.0, -1.0));
        let far = projector().project(Vec3::new(1.0, 1.0, 3.0));
        assert!(near.x > far.x);
        assert!(near.y < far.y);
    }

    #[test]
    fn singular_plane_uses_orthographic_fallback() {
        let p = projector().project_f(Vec3::new(1.0, -1.0, -5.0));
        assert!(p.is_finite());
        assert_eq!(
            projector().project(Vec3::new(1.0, -1.0, -5.0)),
            ScreenPoint::new(700, 600)
        );
    }

    #[test]
    fn non_finite_input_maps_to_center() {
        let p = projector().project(Vec3::new(f64::INFINITY, 0.0, 0.0));
        assert_eq!(p, ScreenPoint::new(400, 300));
    }

    #[test]
    fn near_singular_depth_saturates_instead_of_overflowing() {
        let p = projector().project(Vec3::new(1.0, 1.0, -5.0 + 1e-8));
        assert_eq!(p.x, i32::MAX);
        assert_eq!(p.y, i32::MIN);
    }
}
