use crate::error::GeometryError;
use crate::math::vec2::Vec2;

/// An axis-aligned clip window.
///
/// Always satisfies `xmin <= xmax` and `ymin <= ymax`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    xmin: f64,
    ymin: f64,
    xmax: f64,
    ymax: f64,
}

impl Rect {
    /// Creates a rectangle from its bounds, rejecting inverted or non-finite ones.
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Result<Self, GeometryError> {
        let finite = [xmin, ymin, xmax, ymax].iter().all(|v| v.is_finite());
        if !finite || xmin > xmax || ymin > ymax {
            return Err(GeometryError::InvalidRect {
                xmin,
                ymin,
                xmax,
                ymax,
            });
        }
        Ok(Self {
            xmin,
            ymin,
            xmax,
            ymax,
        })
    }

    /// Creates the rectangle spanned by two opposite corners in any order.
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        Self {
            xmin: a.x.min(b.x),
            ymin: a.y.min(b.y),
            xmax: a.x.max(b.x),
            ymax: a.y.max(b.y),
        }
    }

    /// Creates the rectangle `(0, 0)..(width, height)`.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::from_corners(Vec2::ZERO, Vec2::new(width, height))
    }

    pub fn xmin(&self) -> f64 {
        self.xmin
    }

    pub fn ymin(&self) -> f64 {
        self.ymin
    }

    pub fn xmax(&self) -> f64 {
        self.xmax
    }

    pub fn ymax(&self) -> f64 {
        self.ymax
    }

    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.xmin && p.x <= self.xmax && p.y >= self.ymin && p.y <= self.ymax
    }

    /// Corners in counter-clockwise order starting at `(xmin, ymin)`.
    pub fn corners(&self) -> [Vec2; 4] {
        [
            Vec2::new(self.xmin, self.ymin),
            Vec2::new(self.xmax, self.ymin),
            Vec2::new(self.xmax, self.ymax),
            Vec2::new(self.xmin, self.ymax),
        ]
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverted_bounds_are_rejected() {
        assert!(matches!(
            Rect::new(10.0, 0.0, 0.0, 10.0),
            Err(GeometryError::InvalidRect { .. })
        ));
        assert!(Rect::new(0.0, 0.0, f64::NAN, 1.0).is_err());
    }

    #[test]
    fn degenerate_rect_is_allowed() {
        assert!(Rect::new(5.0, 5.0, 5.0, 5.0).is_ok());
    }

    #[test]
    fn corners_normalize_order() {
        let r = Rect::from_corners(Vec2::new(10.0, 2.0), Vec2::new(-1.0, 8.0));
        assert_eq!(r, Rect::new(-1.0, 2.0, 10.0, 8.0).unwrap());
        assert!(r.contains(Vec2::new(-1.0, 8.0)));
        assert!(!r.contains(Vec2::new(-1.1, 5.0)));
    }
}
