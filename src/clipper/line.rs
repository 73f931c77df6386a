//! Cohen–Sutherland segment clipping.
//!
//! Each endpoint is classified by a 4-bit [`Outcode`]. Segments with both
//! codes zero are accepted as-is, segments whose codes share a bit lie
//! entirely on the outside of one boundary and are rejected. Everything else
//! is clipped one boundary at a time until one of those two cases holds.

use std::ops::{BitAnd, BitOr};

use super::rect::Rect;
use crate::math::vec2::Vec2;
use crate::math::EPSILON;

/// Each pass moves one endpoint onto one boundary line; two endpoints
/// against two axes each is the most a segment ever needs.
const MAX_CLIP_PASSES: usize = 4;

/// Region code of a point relative to a clip rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Outcode(u8);

impl Outcode {
    pub const INSIDE: Self = Self(0);
    pub const LEFT: Self = Self(1);
    pub const RIGHT: Self = Self(2);
    pub const BOTTOM: Self = Self(4);
    pub const TOP: Self = Self(8);

    /// Classify `p` against `rect`. `TOP` means `y > ymax`.
    pub fn of(p: Vec2, rect: &Rect) -> Self {
        let mut code = Self::INSIDE;
        if p.x < rect.xmin() {
            code = code | Self::LEFT;
        } else if p.x > rect.xmax() {
            code = code | Self::RIGHT;
        }
        if p.y < rect.ymin() {
            code = code | Self::BOTTOM;
        } else if p.y > rect.ymax() {
            code = code | Self::TOP;
        }
        code
    }

    pub fn is_inside(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }
}

impl BitOr for Outcode {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for Outcode {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

/// Clip the segment `p0`–`p1` to `rect`.
///
/// Returns the visible part with endpoints in input order, or `None` when
/// nothing of the segment lies inside the rectangle.
pub fn clip_line(p0: Vec2, p1: Vec2, rect: &Rect) -> Option<(Vec2, Vec2)> {
    if !p0.is_finite() || !p1.is_finite() {
        return None;
    }

    let (mut a, mut b) = (p0, p1);
    let mut code_a = Outcode::of(a, rect);
    let mut code_b = Outcode::of(b, rect);
    let mut passes = 0;

    loop {
        if (code_a | code_b).is_inside() {
            return Some((a, b));
        }
        if !(code_a & code_b).is_inside() || passes == MAX_CLIP_PASSES {
            return None;
        }

        let clip_a = !code_a.is_inside();
        let code_out = if clip_a { code_a } else { code_b };
        let clipped = intersect_boundary(a, b, code_out, rect);

        if clip_a {
            a = clipped;
            code_a = Outcode::of(a, rect);
        } else {
            b = clipped;
            code_b = Outcode::of(b, rect);
        }
        passes += 1;
    }
}

/// Intersection of the line through `a` and `b` with the highest-priority
/// boundary flagged in `code`, tested in the order top, bottom, right, left.
fn intersect_boundary(a: Vec2, b: Vec2, code: Outcode, rect: &Rect) -> Vec2 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;

    if code.contains(Outcode::TOP) || code.contains(Outcode::BOTTOM) {
        let y = if code.contains(Outcode::TOP) {
            rect.ymax()
        } else {
            rect.ymin()
        };
        // A horizontal segment never straddles a horizontal boundary.
        let x = if dy.abs() > EPSILON {
            a.x + dx * (y - a.y) / dy
        } else {
            a.x
        };
        Vec2::new(x, y)
    } else {
        let x = if code.contains(Outcode::RIGHT) {
            rect.xmax()
        } else {
            rect.xmin()
        };
        let y = if dx.abs() > EPSILON {
            a.y + dy * (x - a.x) / dx
        } else {
            a.y
        };
        Vec2::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn window() -> Rect {
        Rect::new(0.0, 0.0, 100.0, 50.0).unwrap()
    }

    fn assert_point(actual: Vec2, x: f64, y: f64) {
        assert_relative_eq!(actual.x, x, epsilon = 1e-9);
        assert_relative_eq!(actual.y, y, epsilon = 1e-9);
    }

    #[test]
    fn outcodes_classify_all_regions() {
        let r = window();
        assert_eq!(Outcode::of(Vec2::new(50.0, 25.0), &r), Outcode::INSIDE);
        assert_eq!(Outcode::of(Vec2::new(-1.0, 25.0), &r), Outcode::LEFT);
        assert_eq!(Outcode::of(Vec2::new(101.0, 25.0), &r), Outcode::RIGHT);
        assert_eq!(Outcode::of(Vec2::new(50.0, -1.0), &r), Outcode::BOTTOM);
        assert_eq!(Outcode::of(Vec2::new(50.0, 51.0), &r), Outcode::TOP);
        assert_eq!(
            Outcode::of(Vec2::new(-1.0, 51.0), &r),
            Outcode::LEFT | Outcode::TOP
        );
        // Boundary points count as inside.
        assert_eq!(Outcode::of(Vec2::new(100.0, 0.0), &r), Outcode::INSIDE);
    }

    #[test]
    fn inside_segment_is_unchanged() {
        let r = window();
        let (a, b) = (Vec2::new(10.0, 10.0), Vec2::new(90.0, 40.0));
        assert_eq!(clip_line(a, b, &r), Some((a, b)));
    }

    #[test]
    fn segment_in_shared_outside_region_is_rejected() {
        let r = window();
        assert_eq!(
            clip_line(Vec2::new(-10.0, 5.0), Vec2::new(-1.0, 45.0), &r),
            None
        );
        assert_eq!(
            clip_line(Vec2::new(10.0, 60.0), Vec2::new(90.0, 55.0), &r),
            None
        );
    }

    #[test]
    fn crossing_segment_is_clipped_on_both_ends() {
        let r = window();
        let (a, b) = clip_line(Vec2::new(-50.0, 25.0), Vec2::new(150.0, 25.0), &r).unwrap();
        assert_point(a, 0.0, 25.0);
        assert_point(b, 100.0, 25.0);
    }

    #[test]
    fn diagonal_segment_is_clipped_to_corners() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0).unwrap();
        let (a, b) = clip_line(Vec2::new(-5.0, -5.0), Vec2::new(15.0, 15.0), &r).unwrap();
        assert_point(a, 0.0, 0.0);
        assert_point(b, 10.0, 10.0);
    }

    #[test]
    fn vertical_segment_does_not_divide_by_zero() {
        let r = window();
        let (a, b) = clip_line(Vec2::new(20.0, -30.0), Vec2::new(20.0, 80.0), &r).unwrap();
        assert_point(a, 20.0, 0.0);
        assert_point(b, 20.0, 50.0);
    }

    #[test]
    fn outside_segment_passing_corner_is_rejected() {
        // Both endpoints outside different regions, line misses the window.
        let r = Rect::new(0.0, 0.0, 10.0, 10.0).unwrap();
        assert_eq!(
            clip_line(Vec2::new(-5.0, 8.0), Vec2::new(2.0, 20.0), &r),
            None
        );
    }

    #[test]
    fn clipping_twice_is_idempotent() {
        let r = window();
        let once = clip_line(Vec2::new(-30.0, -10.0), Vec2::new(130.0, 70.0), &r).unwrap();
        let twice = clip_line(once.0, once.1, &r).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn non_finite_endpoints_are_rejected() {
        let r = window();
        assert_eq!(
            clip_line(Vec2::new(f64::NAN, 0.0), Vec2::new(1.0, 1.0), &r),
            None
        );
    }
}
