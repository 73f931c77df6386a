//! Directional lighting for flat-shaded faces.

use crate::colors::Color;
use crate::error::GeometryError;
use crate::math::vec3::Vec3;
use crate::math::EPSILON;

/// Share of the base colour every visible face receives regardless of light.
pub const AMBIENT_FLOOR: f64 = 0.3;
/// Share of the base colour added at full diffuse intensity.
pub const DIFFUSE_WEIGHT: f64 = 0.7;

/// A directional light that illuminates the scene uniformly from a direction.
///
/// Directional lights are ideal for simulating distant light sources like the sun,
/// where all rays are effectively parallel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// Unit vector pointing from the surface toward the light.
    direction: Vec3,
    /// Multiplier for the diffuse term (default: 1.0).
    intensity: f64,
}

impl Default for DirectionalLight {
    /// Upper right, in front of the object (toward the viewer).
    fn default() -> Self {
        let k = 1.0 / 3.0_f64.sqrt();
        Self {
            direction: Vec3::new(k, k, -k),
            intensity: 1.0,
        }
    }
}

impl DirectionalLight {
    /// Create a light shining from `direction`. The vector is normalized;
    /// a zero vector has no direction and is rejected.
    pub fn new(direction: Vec3) -> Result<Self, GeometryError> {
        let direction = direction
            .try_normalize(EPSILON)
            .ok_or(GeometryError::ZeroVector)?;
        Ok(Self {
            direction,
            intensity: 1.0,
        })
    }

    pub fn with_intensity(mut self, intensity: f64) -> Self {
        self.intensity = intensity;
        self
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Diffuse intensity for a unit surface normal, in `[0.0, 1.0]`.
    pub fn intensity(&self, normal: Vec3) -> f64 {
        let lambert = normal.dot(self.direction).max(0.0) * self.intensity;
        if lambert.is_nan() {
            return 0.0;
        }
        lambert.clamp(0.0, 1.0)
    }

    /// Flat-shade `base` for a face with the given unit normal.
    pub fn shade(&self, base: Color, normal: Vec3) -> Color {
        base.scaled(AMBIENT_FLOOR + DIFFUSE_WEIGHT * self.intensity(normal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_direct_illumination() {
        let light = DirectionalLight::new(Vec3::new(0.0, 0.0, -1.0)).unwrap();
        let normal = Vec3::new(0.0, 0.0, -1.0);
        assert_relative_eq!(light.intensity(normal), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_no_illumination() {
        let light = DirectionalLight::new(Vec3::new(0.0, 0.0, -1.0)).unwrap();
        let normal = Vec3::new(0.0, 0.0, 1.0);
        assert_eq!(light.intensity(normal), 0.0);
    }

    #[test]
    fn test_angled_illumination() {
        let light = DirectionalLight::new(Vec3::new(0.0, 1.0, 0.0)).unwrap();
        let normal = Vec3::new(0.0, 1.0, 1.0).try_normalize(EPSILON).unwrap();
        // cos(45)
        assert_relative_eq!(light.intensity(normal), 0.5_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn intensity_is_clamped() {
        let light = DirectionalLight::new(Vec3::UP).unwrap().with_intensity(3.0);
        assert_eq!(light.intensity(Vec3::UP), 1.0);
    }

    #[test]
    fn zero_direction_is_rejected() {
        assert_eq!(
            DirectionalLight::new(Vec3::ZERO),
            Err(GeometryError::ZeroVector)
        );
    }

    #[test]
    fn default_light_is_unit_length() {
        assert_relative_eq!(
            DirectionalLight::default().direction().magnitude(),
            1.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn shading_keeps_ambient_floor() {
        let light = DirectionalLight::new(Vec3::UP).unwrap();
        let base = Color::rgb(100, 200, 250);
        assert_eq!(light.shade(base, -Vec3::UP), Color::rgb(30, 60, 75));
        assert_eq!(light.shade(base, Vec3::UP), base);
    }
}
