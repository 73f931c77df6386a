//! Affine transforms for 3D vertex sets.
//!
//! Three pieces live here:
//! - [`TransformStack`] composes an ordered list of matrices once and applies
//!   the product to every vertex.
//! - [`Transform`] holds accumulated parameters (position, Euler rotation,
//!   scale) with a fluent API and turns them into a single matrix.
//! - [`TransformPolicy`] selects how an [`Object3D`](crate::object::Object3D)
//!   keeps its state between frames.

use crate::math::{mat4::Mat4, vec3::Vec3};

/// How an object accumulates transforms across frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransformPolicy {
    /// Every transform call multiplies the current vertex array in place.
    ///
    /// Repeated calls compound rounding error. At f64 precision, rotating a
    /// unit cube 1000 times by a small angle and back again stays within
    /// 1e-4 of the original.
    MutateInPlace,
    /// Transform calls only accumulate parameters; vertices are recomputed
    /// from the pristine base set on every query, so there is no drift.
    #[default]
    RecomputeFromBase,
}

/// Transform every vertex by `matrix` via homogeneous extension.
pub fn apply_matrix(matrix: &Mat4, vertices: &[Vec3]) -> Vec<Vec3> {
    vertices.iter().map(|&v| matrix.transform_point(v)).collect()
}

/// In-place variant of [`apply_matrix`].
pub fn apply_matrix_in_place(matrix: &Mat4, vertices: &mut [Vec3]) {
    for v in vertices.iter_mut() {
        *v = matrix.transform_point(*v);
    }
}

/// An ordered product of matrices.
///
/// Matrices are multiplied left to right in push order, so the **last**
/// pushed matrix acts on the vertices **first**:
///
/// ```
/// use clipshade::transform::TransformStack;
/// use clipshade::math::vec3::Vec3;
///
/// let mut stack = TransformStack::new();
/// stack.translate(2.0, 2.0, 0.0).scale(1.5, 1.5, 1.5);
/// // scaled first, then translated
/// assert_eq!(stack.apply(&[Vec3::ONE])[0], Vec3::new(3.5, 3.5, 1.5));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TransformStack {
    matrices: Vec<Mat4>,
}

impl TransformStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, matrix: Mat4) -> &mut Self {
        self.matrices.push(matrix);
        self
    }

    pub fn translate(&mut self, dx: f64, dy: f64, dz: f64) -> &mut Self {
        self.push(Mat4::translation(dx, dy, dz))
    }

    pub fn scale(&mut self, sx: f64, sy: f64, sz: f64) -> &mut Self {
        self.push(Mat4::scaling(sx, sy, sz))
    }

    pub fn rotate_x(&mut self, angle: f64) -> &mut Self {
        self.push(Mat4::rotation_x(angle))
    }

    pub fn rotate_y(&mut self, angle: f64) -> &mut Self {
        self.push(Mat4::rotation_y(angle))
    }

    pub fn rotate_z(&mut self, angle: f64) -> &mut Self {
        self.push(Mat4::rotation_z(angle))
    }

    pub fn len(&self) -> usize {
        self.matrices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matrices.is_empty()
    }

    pub fn clear(&mut self) {
        self.matrices.clear();
    }

    /// The product of all pushed matrices; identity when empty.
    pub fn compose(&self) -> Mat4 {
        self.matrices
            .iter()
            .fold(Mat4::identity(), |acc, &m| acc * m)
    }

    /// Compose once, then transform every vertex.
    pub fn apply(&self, vertices: &[Vec3]) -> Vec<Vec3> {
        apply_matrix(&self.compose(), vertices)
    }
}

/// Accumulated transform parameters: position, rotation (Euler angles), scale.
///
/// Provides a fluent API where mutating methods return `&mut Self` for chaining:
///
/// ```
/// use clipshade::transform::Transform;
///
/// let mut transform = Transform::new();
/// transform
///     .set_position_xyz(5.0, 2.0, 0.0)
///     .rotate_y(0.1)
///     .set_scale_uniform(2.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    position: Vec3,
    rotation: Vec3, // Euler angles in radians: x=pitch, y=yaw, z=roll
    scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Create a new transform with default values (position=0, rotation=0, scale=1).
    pub fn new() -> Self {
        Self::default()
    }

    // ============ Position ============

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position_xyz(&mut self, x: f64, y: f64, z: f64) -> &mut Self {
        self.position = Vec3::new(x, y, z);
        self
    }

    /// Translate by a delta vector.
    pub fn translate(&mut self, delta: Vec3) -> &mut Self {
        self.position = self.position + delta;
        self
    }

    // ============ Rotation ============

    /// Get the rotation (Euler angles in radians).
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    /// Rotate around the X axis (pitch).
    pub fn rotate_x(&mut self, angle: f64) -> &mut Self {
        self.rotation.x += angle;
        self
    }

    /// Rotate around the Y axis (yaw).
    pub fn rotate_y(&mut self, angle: f64) -> &mut Self {
        self.rotation.y += angle;
        self
    }

    /// Rotate around the Z axis (roll).
    pub fn rotate_z(&mut self, angle: f64) -> &mut Self {
        self.rotation.z += angle;
        self
    }

    // ============ Scale ============

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: Vec3) -> &mut Self {
        self.scale = scale;
        self
    }

    /// Set uniform scale (same value for x, y, z).
    pub fn set_scale_uniform(&mut self, s: f64) -> &mut Self {
        self.scale = Vec3::new(s, s, s);
        self
    }

    /// Multiply the current scale by a factor vector.
    pub fn scale_by(&mut self, factor: Vec3) -> &mut Self {
        self.scale.x *= factor.x;
        self.scale.y *= factor.y;
        self.scale.z *= factor.z;
        self
    }

    // ============ Matrix Generation ============

    /// Generate the transformation matrix.
    ///
    /// Order: Translation * RotationY * RotationX * RotationZ * Scale
    /// (scale first, then roll, pitch, yaw, then translation), so rotations
    /// always spin the object about its own origin.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::translation(self.position.x, self.position.y, self.position.z)
            * Mat4::rotation_y(self.rotation.y)
            * Mat4::rotation_x(self.rotation.x)
            * Mat4::rotation_z(self.rotation.z)
            * Mat4::scaling(self.scale.x, self.scale.y, self.scale.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_4;

    #[test]
    fn test_default() {
        let t = Transform::default();
        assert_eq!(t.position(), Vec3::ZERO);
        assert_eq!(t.rotation(), Vec3::ZERO);
        assert_eq!(t.scale(), Vec3::ONE);
        assert_eq!(t.to_matrix(), Mat4::identity());
    }

    #[test]
    fn test_fluent_api() {
        let mut t = Transform::new();
        t.set_position_xyz(1.0, 2.0, 3.0)
            .rotate_y(0.5)
            .set_scale_uniform(2.0);

        assert_eq!(t.position(), Vec3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(t.rotation().y, 0.5);
        assert_eq!(t.scale(), Vec3::new(2.0, 2.0, 2.0));
    }

    #[test]
    fn test_scale_by() {
        let mut t = Transform::new();
        t.set_scale(Vec3::new(2.0, 3.0, 4.0)).scale_by(Vec3::ONE * 2.0);
        assert_eq!(t.scale(), Vec3::new(4.0, 6.0, 8.0));
    }

    #[test]
    fn empty_stack_is_identity() {
        assert_eq!(TransformStack::new().compose(), Mat4::identity());
    }

    #[test]
    fn stack_applies_rightmost_first() {
        // T * S * R on the unit x vector: rotate 45°, scale 1.5, translate (2, 2).
        let mut stack = TransformStack::new();
        stack
            .translate(2.0, 2.0, 0.0)
            .scale(1.5, 1.5, 1.5)
            .rotate_z(FRAC_PI_4);
        let out = stack.apply(&[Vec3::new(1.0, 0.0, 0.0)])[0];
        let leg = 1.5 * FRAC_PI_4.cos();
        assert_relative_eq!(out.x, 2.0 + leg, epsilon = 1e-12);
        assert_relative_eq!(out.y, 2.0 + leg, epsilon = 1e-12);
        assert_relative_eq!(out.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn in_place_matches_copying_apply() {
        let m = Mat4::rotation_x(0.7) * Mat4::translation(0.0, 1.0, -2.0);
        let mut vertices = vec![Vec3::ONE, Vec3::new(-1.0, 2.0, 0.5)];
        let copied = apply_matrix(&m, &vertices);
        apply_matrix_in_place(&m, &mut vertices);
        assert_eq!(copied, vertices);
    }
}
