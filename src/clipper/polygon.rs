//! Sutherland–Hodgman polygon clipping against a rectangular window.
//!
//! The window's four boundaries are visited counter-clockwise (bottom,
//! right, top, left). Each is an axis-aligned half-plane, so the inside test
//! is a single coordinate comparison and stays exact for windows of zero
//! width or height. The subject polygon is clipped against one boundary at a
//! time; each pass feeds the next.

use super::rect::Rect;
use crate::math::vec2::Vec2;
use crate::math::EPSILON;

/// One boundary of the clip window.
#[derive(Debug, Clone, Copy)]
enum ClipEdge {
    Bottom(f64),
    Right(f64),
    Top(f64),
    Left(f64),
}

impl ClipEdge {
    /// Signed half-plane value of `p`. Non-negative = inside.
    fn signed_distance(&self, p: Vec2) -> f64 {
        match *self {
            ClipEdge::Bottom(ymin) => p.y - ymin,
            ClipEdge::Right(xmax) => xmax - p.x,
            ClipEdge::Top(ymax) => ymax - p.y,
            ClipEdge::Left(xmin) => p.x - xmin,
        }
    }

    /// Pin the coordinate this boundary constrains, so interpolation error
    /// cannot leave a crossing point a hair outside.
    fn snap(&self, p: Vec2) -> Vec2 {
        match *self {
            ClipEdge::Bottom(y) | ClipEdge::Top(y) => Vec2::new(p.x, y),
            ClipEdge::Right(x) | ClipEdge::Left(x) => Vec2::new(x, p.y),
        }
    }

    /// Clip a closed polygon against this boundary.
    fn clip(&self, polygon: &[Vec2]) -> Vec<Vec2> {
        let mut output = Vec::with_capacity(polygon.len() + 1);

        for (i, &current) in polygon.iter().enumerate() {
            let next = polygon[(i + 1) % polygon.len()];

            let d1 = self.signed_distance(current);
            let d2 = self.signed_distance(next);

            let current_inside = d1 >= 0.0;
            let next_inside = d2 >= 0.0;

            if current_inside {
                output.push(current);
                if !next_inside {
                    output.extend(intersection(current, next, d1, d2).map(|p| self.snap(p)));
                }
            } else if next_inside {
                output.extend(intersection(current, next, d1, d2).map(|p| self.snap(p)));
            }
        }

        output
    }
}

/// Point where `current`–`next` crosses the edge line, given both signed
/// distances. `None` when the segment runs parallel to the edge.
fn intersection(current: Vec2, next: Vec2, d1: f64, d2: f64) -> Option<Vec2> {
    let denominator = d1 - d2;
    if denominator.abs() < EPSILON {
        return None;
    }
    Some(current.lerp(next, d1 / denominator))
}

fn boundary_edges(rect: &Rect) -> [ClipEdge; 4] {
    [
        ClipEdge::Bottom(rect.ymin()),
        ClipEdge::Right(rect.xmax()),
        ClipEdge::Top(rect.ymax()),
        ClipEdge::Left(rect.xmin()),
    ]
}

/// Clip a closed polygon to `rect`.
///
/// The result may contain fewer than 3 points, which means the polygon was
/// clipped away entirely. Inputs with fewer than 3 points are returned empty.
pub fn clip_polygon(polygon: &[Vec2], rect: &Rect) -> Vec<Vec2> {
    if polygon.len() < 3 || polygon.iter().any(|p| !p.is_finite()) {
        return Vec::new();
    }

    let mut result = polygon.to_vec();
    for edge in boundary_edges(rect) {
        if result.is_empty() {
            break;
        }
        result = edge.clip(&result);
    }

    result
}

/// Returns true when a clipped polygon still has area to draw.
pub fn is_renderable(polygon: &[Vec2]) -> bool {
    polygon.len() >= 3
}


#[cfg(test)]
mod proptest_clip_polygon {
    use super::*;
    use crate::clipper::rect::strategies::{point_beyond, point_in, rect};
    use proptest::prelude::*;

    const TOLERANCE: f64 = 1e-6;

    /// Regular polygon centred at `(u, v)` across the window, sized to keep a
    /// margin from every boundary. Collapses to repeated centre points when
    /// the window has no room.
    fn convex_inside(r: &Rect, sides: usize, u: f64, v: f64, size: f64, phase: f64) -> Vec<Vec2> {
        let centre = point_in(r, u, v);
        let room = (centre.x - r.xmin())
            .min(r.xmax() - centre.x)
            .min(centre.y - r.ymin())
            .min(r.ymax() - centre.y);
        let radius = if room > TOLERANCE { 0.9 * size * room } else { 0.0 };
        (0..sides)
            .map(|i| {
                let a = phase + std::f64::consts::TAU * i as f64 / sides as f64;
                Vec2::new(centre.x + radius * a.cos(), centre.y + radius * a.sin())
            })
            .collect()
    }

    proptest! {
        #[test]
        fn convex_polygons_inside_are_returned_unchanged(
            r in rect(),
            sides in 3usize..12,
            (u, v) in (0.0f64..=1.0, 0.0f64..=1.0),
            size in 0.0f64..=1.0,
            phase in 0.0f64..std::f64::consts::TAU,
        ) {
            let polygon = convex_inside(&r, sides, u, v, size, phase);
            prop_assert_eq!(clip_polygon(&polygon, &r), polygon);
        }

        #[test]
        fn polygons_beyond_one_boundary_are_removed(
            r in rect(),
            side in 0u8..4,
            points in prop::collection::vec((1e-3f64..300.0, -1000.0f64..1000.0), 3..10),
        ) {
            let polygon: Vec<Vec2> = points
                .iter()
                .map(|&(offset, along)| point_beyond(&r, side, offset, along))
                .collect();
            prop_assert!(clip_polygon(&polygon, &r).is_empty());
        }

        #[test]
        fn clipped_polygons_stay_in_window(
            r in rect(),
            points in prop::collection::vec((-600.0f64..1100.0, -600.0f64..1100.0), 3..12),
        ) {
            let polygon: Vec<Vec2> = points.into_iter().map(Vec2::from).collect();
            for p in clip_polygon(&polygon, &r) {
                prop_assert!(
                    p.x >= r.xmin() - TOLERANCE
                        && p.x <= r.xmax() + TOLERANCE
                        && p.y >= r.ymin() - TOLERANCE
                        && p.y <= r.ymax() + TOLERANCE,
                    "{:?} escapes {:?}",
                    p,
                    r
                );
            }
        }
    }
}
