//! Small linear-algebra kit used by the clippers and the 3D pipeline.

pub mod mat4;
pub mod vec2;
pub mod vec3;
pub mod vec4;

/// Threshold below which a denominator or magnitude is treated as zero.
pub const EPSILON: f64 = 1e-9;
