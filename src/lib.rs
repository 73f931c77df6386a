//! A small CPU geometry pipeline: 2D line and polygon clipping, 3D transform
//! stacks, perspective projection, flat shading with backface culling and
//! painter's ordering.
//!
//! The core is pure. [`Engine::step`] takes a [`SceneState`] and the frame's
//! [`Command`]s and returns the next state plus a [`Frame`] of draw commands
//! in pixel coordinates. Drawing those commands into pixels is left to the
//! host; [`render::Renderer`] is a CPU implementation and the `window`
//! feature adds an SDL2 front end.
//!
//! # Quick Start
//!
//! ```
//! use clipshade::prelude::*;
//!
//! let engine = Engine::new(ViewConfig::default()).unwrap();
//! let state = SceneState::with_builtin_shapes(TransformPolicy::RecomputeFromBase);
//! let (state, frame) = engine.step(state, &[Command::Rotate(0.3, 0.5)]);
//! assert!(!frame.commands.is_empty());
//! # let _ = state;
//! ```

pub mod clipper;
pub mod colors;
pub mod config;
pub mod engine;
pub mod error;
pub mod light;
pub mod math;
pub mod object;
pub mod projection;
pub mod render;
pub mod shading;
pub mod shapes;
pub mod transform;
#[cfg(feature = "window")]
pub mod window;

pub use engine::{Command, DrawCommand, Engine, Frame, RenderMode, SceneState};
pub use error::{ConfigError, GeometryError, LoadError};

/// Prelude module for convenient imports.
pub mod prelude {
    // Clipping
    pub use crate::clipper::{clip_line, clip_polygon, Outcode, Rect};

    // Engine
    pub use crate::config::ViewConfig;
    pub use crate::engine::{Command, DrawCommand, Engine, Frame, RenderMode, SceneState};

    // Geometry
    pub use crate::object::{Edge, Face, Object3D};
    pub use crate::shapes;
    pub use crate::transform::{TransformPolicy, TransformStack};

    // Shading
    pub use crate::colors::{Color, Palette, ShapeKind};
    pub use crate::light::DirectionalLight;
    pub use crate::projection::{Projector, ScreenPoint};

    // Math
    pub use crate::math::mat4::Mat4;
    pub use crate::math::vec2::Vec2;
    pub use crate::math::vec3::Vec3;
}
