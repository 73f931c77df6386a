//! View configuration: viewport, projection constants, clip window, lighting.

use crate::clipper::Rect;
use crate::error::ConfigError;
use crate::light::DirectionalLight;
use crate::math::vec3::Vec3;
use crate::projection::Projector;
use crate::transform::TransformPolicy;

pub const WINDOW_WIDTH: u32 = 800;
pub const WINDOW_HEIGHT: u32 = 600;
pub const FPS: u64 = 60;
pub const FRAME_TARGET_TIME: f64 = 1000.0 / FPS as f64;

/// Distance from the viewer to the z = 0 plane, in world units.
pub const PROJECTION_DISTANCE: f64 = 5.0;
/// Pixels per world unit at z = 0.
pub const PROJECTION_SCALE: f64 = 300.0;

/// Per-frame rotation applied in auto-rotate mode (radians about X, Y).
pub const AUTO_ROTATE_STEP: (f64, f64) = (0.01, 0.02);

/// Everything the engine needs to turn scene state into draw commands.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewConfig {
    pub width: u32,
    pub height: u32,
    pub distance: f64,
    pub scale: f64,
    /// Window used for the clip demo and, when `clip_output` is set, for
    /// trimming every frame.
    pub clip_window: Rect,
    pub clip_output: bool,
    pub light: DirectionalLight,
    pub policy: TransformPolicy,
    pub auto_rotate_step: (f64, f64),
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
            distance: PROJECTION_DISTANCE,
            scale: PROJECTION_SCALE,
            clip_window: Rect::from_corners((200.0, 150.0).into(), (500.0, 400.0).into()),
            clip_output: false,
            light: DirectionalLight::default(),
            policy: TransformPolicy::default(),
            auto_rotate_step: AUTO_ROTATE_STEP,
        }
    }
}

impl ViewConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_projection(mut self, distance: f64, scale: f64) -> Self {
        self.distance = distance;
        self.scale = scale;
        self
    }

    pub fn with_clip_window(mut self, clip_window: Rect) -> Self {
        self.clip_window = clip_window;
        self
    }

    pub fn with_clip_output(mut self, clip_output: bool) -> Self {
        self.clip_output = clip_output;
        self
    }

    /// Light shining from `direction`; the vector must be non-zero.
    pub fn with_light(mut self, direction: Vec3, intensity: f64) -> Result<Self, ConfigError> {
        self.light = DirectionalLight::new(direction)?.with_intensity(intensity);
        Ok(self)
    }

    pub fn with_policy(mut self, policy: TransformPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroViewport {
                width: self.width,
                height: self.height,
            });
        }
        if !(self.distance.is_finite() && self.distance > 0.0) {
            return Err(ConfigError::InvalidDistance(self.distance));
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(ConfigError::InvalidScale(self.scale));
        }
        Ok(())
    }

    pub fn projector(&self) -> Projector {
        Projector::new(self.width, self.height, self.distance, self.scale)
    }
}
