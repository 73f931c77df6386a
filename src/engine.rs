//! Frame stepping.
//!
//! The [`Engine`] holds only configuration. All mutable state lives in a
//! [`SceneState`] value that the host owns and threads through
//! [`Engine::step`], which applies the frame's input commands and returns the
//! next state together with the [`Frame`] to draw.

use crate::clipper::{clip_line, clip_polygon, Rect};
use crate::colors::{self, Color, Palette, ShapeKind};
use crate::config::ViewConfig;
use crate::error::ConfigError;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::object::Object3D;
use crate::projection::{Projector, ScreenPoint};
use crate::shading::{shade_faces, wireframe_edges};
use crate::shapes;
use crate::transform::TransformPolicy;

/// Subject polygon shown by the clip demo.
pub const DEMO_POLYGON: [(f64, f64); 5] = [
    (100.0, 100.0),
    (200.0, 150.0),
    (300.0, 100.0),
    (250.0, 200.0),
    (150.0, 200.0),
];

/// Segments shown by the clip demo, clipped with Cohen–Sutherland.
pub const DEMO_SEGMENTS: [((f64, f64), (f64, f64)); 4] = [
    ((120.0, 300.0), (600.0, 350.0)),
    ((350.0, 100.0), (350.0, 500.0)),
    ((550.0, 120.0), (700.0, 500.0)),
    ((180.0, 420.0), (520.0, 130.0)),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Every edge as a line plus vertex markers; no culling or shading.
    Wireframe,
    /// Backface-culled, flat-shaded faces in painter's order.
    #[default]
    Solid,
}

impl RenderMode {
    pub fn toggled(self) -> Self {
        match self {
            RenderMode::Wireframe => RenderMode::Solid,
            RenderMode::Solid => RenderMode::Wireframe,
        }
    }
}

impl std::fmt::Display for RenderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderMode::Wireframe => write!(f, "Wireframe"),
            RenderMode::Solid => write!(f, "Solid"),
        }
    }
}

/// What the frame shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Objects,
    ClipDemo,
}

/// Discrete input for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Translate(Vec3),
    /// Uniform scale factor.
    Scale(f64),
    RotateX(f64),
    RotateY(f64),
    RotateZ(f64),
    /// Rotate about X, then Y.
    Rotate(f64, f64),
    Reset,
    ToggleRenderMode,
    ToggleAutoRotate,
    Select(usize),
    NextObject,
    ToggleClipDemo,
}

/// A model in the scene with its palette.
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: String,
    pub kind: ShapeKind,
    pub object: Object3D,
    pub palette: Palette,
}

impl SceneObject {
    pub fn builtin(kind: ShapeKind, policy: TransformPolicy) -> Option<Self> {
        let object = shapes::shape(kind)?.with_policy(policy);
        Some(Self {
            name: kind.to_string(),
            kind,
            object,
            palette: Palette::for_shape(kind),
        })
    }

    pub fn custom(name: impl Into<String>, object: Object3D) -> Self {
        Self {
            name: name.into(),
            kind: ShapeKind::Custom,
            object,
            palette: Palette::for_shape(ShapeKind::Custom),
        }
    }
}

/// Everything that changes between frames.
#[derive(Debug, Clone)]
pub struct SceneState {
    objects: Vec<SceneObject>,
    selected: usize,
    render_mode: RenderMode,
    auto_rotate: bool,
    view: View,
    frame_index: u64,
}

impl SceneState {
    pub fn new(objects: Vec<SceneObject>) -> Self {
        Self {
            objects,
            selected: 0,
            render_mode: RenderMode::default(),
            auto_rotate: false,
            view: View::default(),
            frame_index: 0,
        }
    }

    /// Cube, pyramid and sphere, with the cube selected.
    pub fn with_builtin_shapes(policy: TransformPolicy) -> Self {
        let objects = [ShapeKind::Cube, ShapeKind::Pyramid, ShapeKind::Sphere]
            .into_iter()
            .filter_map(|kind| SceneObject::builtin(kind, policy))
            .collect();
        Self::new(objects)
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn push_object(&mut self, object: SceneObject) {
        self.objects.push(object);
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> Option<&SceneObject> {
        self.objects.get(self.selected)
    }

    fn selected_mut(&mut self) -> Option<&mut Object3D> {
        self.objects.get_mut(self.selected).map(|o| &mut o.object)
    }

    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    pub fn auto_rotate(&self) -> bool {
        self.auto_rotate
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::Translate(d) => {
                if let Some(object) = self.selected_mut() {
                    object.translate(d.x, d.y, d.z);
                }
            }
            Command::Scale(factor) => {
                if let Some(object) = self.selected_mut() {
                    object.scale(factor, factor, factor);
                }
            }
            Command::RotateX(angle) => {
                if let Some(object) = self.selected_mut() {
                    object.rotate_x(angle);
                }
            }
            Command::RotateY(angle) => {
                if let Some(object) = self.selected_mut() {
                    object.rotate_y(angle);
                }
            }
            Command::RotateZ(angle) => {
                if let Some(object) = self.selected_mut() {
                    object.rotate_z(angle);
                }
            }
            Command::Rotate(ax, ay) => {
                if let Some(object) = self.selected_mut() {
                    object.rotate(ax, ay);
                }
            }
            Command::Reset => {
                if let Some(object) = self.selected_mut() {
                    object.reset();
                }
            }
            Command::ToggleRenderMode => {
                self.render_mode = self.render_mode.toggled();
                log::info!("render mode: {}", self.render_mode);
            }
            Command::ToggleAutoRotate => {
                self.auto_rotate = !self.auto_rotate;
                log::info!("auto-rotate: {}", self.auto_rotate);
            }
            Command::Select(index) => {
                if index < self.objects.len() {
                    self.selected = index;
                    log::info!("selected {}", self.objects[index].name);
                } else {
                    log::warn!(
                        "ignoring selection {index}: scene has {} objects",
                        self.objects.len()
                    );
                }
            }
            Command::NextObject => {
                if !self.objects.is_empty() {
                    self.apply(Command::Select((self.selected + 1) % self.objects.len()));
                }
            }
            Command::ToggleClipDemo => {
                self.view = match self.view {
                    View::Objects => View::ClipDemo,
                    View::ClipDemo => View::Objects,
                };
            }
        }
    }
}

/// One primitive for the host to draw. Coordinates are final pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line {
        from: ScreenPoint,
        to: ScreenPoint,
        color: Color,
    },
    /// Filled polygon, optionally outlined.
    Polygon {
        points: Vec<ScreenPoint>,
        fill: Color,
        outline: Option<Color>,
    },
    /// Closed polygon outline.
    Outline {
        points: Vec<ScreenPoint>,
        color: Color,
    },
    /// Vertex marker.
    Point { at: ScreenPoint, color: Color },
}

/// Ordered draw commands for one frame. Later commands paint over earlier ones.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub background: Color,
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    fn new(commands: Vec<DrawCommand>) -> Self {
        Self {
            background: colors::BACKGROUND,
            commands,
        }
    }

    pub fn polygons(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Polygon { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }
}

fn to_screen(points: &[Vec2]) -> Vec<ScreenPoint> {
    points.iter().map(|&p| ScreenPoint::from_vec2(p)).collect()
}

fn to_plane(points: &[ScreenPoint]) -> Vec<Vec2> {
    points.iter().map(|p| p.to_vec2()).collect()
}

/// Closing-edge-inclusive line segments of a polygon outline.
fn outline_segments(points: &[ScreenPoint]) -> impl Iterator<Item = (ScreenPoint, ScreenPoint)> + '_ {
    let n = points.len();
    (0..n).map(move |i| (points[i], points[(i + 1) % n]))
}

/// Trim a draw command to `window`. Returns nothing when fully clipped.
fn clip_command(command: DrawCommand, window: &Rect) -> Vec<DrawCommand> {
    match command {
        DrawCommand::Line { from, to, color } => {
            clip_line(from.to_vec2(), to.to_vec2(), window)
                .map(|(a, b)| DrawCommand::Line {
                    from: ScreenPoint::from_vec2(a),
                    to: ScreenPoint::from_vec2(b),
                    color,
                })
                .into_iter()
                .collect()
        }
        DrawCommand::Polygon {
            points,
            fill,
            outline,
        } => {
            let clipped = clip_polygon(&to_plane(&points), window);
            if clipped.len() < 3 {
                return Vec::new();
            }
            vec![DrawCommand::Polygon {
                points: to_screen(&clipped),
                fill,
                outline,
            }]
        }
        DrawCommand::Outline { points, color } => outline_segments(&points)
            .flat_map(|(from, to)| clip_command(DrawCommand::Line { from, to, color }, window))
            .collect(),
        DrawCommand::Point { at, color } => {
            if window.contains(at.to_vec2()) {
                vec![DrawCommand::Point { at, color }]
            } else {
                Vec::new()
            }
        }
    }
}

/// Turns scene state into frames.
#[derive(Debug, Clone)]
pub struct Engine {
    config: ViewConfig,
    projector: Projector,
}

impl Engine {
    pub fn new(config: ViewConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            projector: config.projector(),
            config,
        })
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn projector(&self) -> &Projector {
        &self.projector
    }

    /// Updates the viewport (typically called on window resize).
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::warn!("ignoring resize to {width}x{height}");
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.projector.set_viewport(width, height);
    }

    /// Apply this frame's commands, advance auto-rotation and build the frame.
    pub fn step(&self, mut state: SceneState, commands: &[Command]) -> (SceneState, Frame) {
        for &command in commands {
            state.apply(command);
        }

        if state.auto_rotate {
            let (ax, ay) = self.config.auto_rotate_step;
            if let Some(object) = state.selected_mut() {
                object.rotate(ax, ay);
            }
        }

        let frame = self.render(&state);
        state.frame_index += 1;
        (state, frame)
    }

    /// Build the frame for `state` without changing it.
    pub fn render(&self, state: &SceneState) -> Frame {
        match state.view {
            View::ClipDemo => self.clip_demo_frame(),
            View::Objects => {
                let commands = match state.selected() {
                    Some(selected) => self.object_commands(selected, state.render_mode),
                    None => Vec::new(),
                };
                Frame::new(self.finish(commands))
            }
        }
    }

    fn object_commands(&self, selected: &SceneObject, mode: RenderMode) -> Vec<DrawCommand> {
        let vertices = selected.object.world_vertices();

        match mode {
            RenderMode::Wireframe => {
                let lines = wireframe_edges(&vertices, selected.object.edges(), &self.projector)
                    .into_iter()
                    .map(|segment| DrawCommand::Line {
                        from: segment.from,
                        to: segment.to,
                        color: colors::WIREFRAME,
                    });
                let markers = vertices.iter().map(|&v| DrawCommand::Point {
                    at: self.projector.project(v),
                    color: colors::VERTEX,
                });
                lines.chain(markers).collect()
            }
            RenderMode::Solid => shade_faces(
                &vertices,
                selected.object.faces(),
                &self.projector,
                &self.config.light,
                &selected.palette,
            )
            .into_iter()
            .map(|record| DrawCommand::Polygon {
                points: record.points,
                fill: record.color,
                outline: Some(colors::OUTLINE),
            })
            .collect(),
        }
    }

    fn finish(&self, commands: Vec<DrawCommand>) -> Vec<DrawCommand> {
        if !self.config.clip_output {
            return commands;
        }
        let window = self.config.clip_window;
        commands
            .into_iter()
            .flat_map(|command| clip_command(command, &window))
            .collect()
    }

    /// The 2D clipping demonstration: subject polygon, clip window, clipped
    /// polygon and a few clipped segments.
    pub fn clip_demo_frame(&self) -> Frame {
        let window = self.config.clip_window;
        let subject: Vec<Vec2> = DEMO_POLYGON.iter().map(|&p| p.into()).collect();

        let mut commands = vec![
            DrawCommand::Outline {
                points: to_screen(&subject),
                color: colors::SUBJECT,
            },
            DrawCommand::Outline {
                points: to_screen(&window.corners()),
                color: colors::CLIP_WINDOW,
            },
        ];

        let clipped = clip_polygon(&subject, &window);
        if clipped.len() >= 3 {
            commands.push(DrawCommand::Outline {
                points: to_screen(&clipped),
                color: colors::CLIPPED,
            });
        }

        commands.extend(DEMO_SEGMENTS.iter().filter_map(|&(a, b)| {
            let (from, to) = clip_line(a.into(), b.into(), &window)?;
            Some(DrawCommand::Line {
                from: ScreenPoint::from_vec2(from),
                to: ScreenPoint::from_vec2(to),
                color: colors::WIREFRAME,
            })
        }));

        Frame::new(commands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> Engine {
        Engine::new(ViewConfig::default()).unwrap()
    }

    fn scene() -> SceneState {
        SceneState::with_builtin_shapes(TransformPolicy::RecomputeFromBase)
    }

    #[test]
    fn invalid_config_is_rejected() {
        assert!(Engine::new(ViewConfig::new().with_viewport(0, 0)).is_err());
    }

    #[test]
    fn builtin_scene_selects_cube() {
        let state = scene();
        assert_eq!(state.objects().len(), 3);
        assert_eq!(state.selected().unwrap().kind, ShapeKind::Cube);
    }

    #[test]
    fn solid_frame_draws_visible_faces_only() {
        let (state, frame) = engine().step(scene(), &[Command::Rotate(0.4, 0.6)]);
        let polygons = frame.polygons().count();
        assert!(polygons > 0 && polygons <= 3, "{polygons} faces drawn");
        assert_eq!(state.frame_index(), 1);
    }

    #[test]
    fn wireframe_frame_draws_every_edge() {
        let (_, frame) = engine().step(scene(), &[Command::ToggleRenderMode]);
        assert_eq!(frame.lines().count(), 12);
        assert_eq!(frame.polygons().count(), 0);
    }

    #[test]
    fn reset_restores_selected_object() {
        let engine = engine();
        let before = engine.render(&scene());
        let (state, _) = engine.step(
            scene(),
            &[
                Command::Translate(Vec3::new(0.5, 0.0, 0.0)),
                Command::Scale(1.1),
                Command::RotateY(0.3),
            ],
        );
        let (_, after) = engine.step(state, &[Command::Reset]);
        assert_eq!(before, after);
    }

    #[test]
    fn auto_rotate_changes_frames() {
        let engine = engine();
        let (state, first) = engine.step(scene(), &[Command::ToggleAutoRotate]);
        assert!(state.auto_rotate());
        let (_, second) = engine.step(state, &[]);
        assert_ne!(first, second);
    }

    #[test]
    fn selection_is_bounds_checked() {
        let engine = engine();
        let (state, _) = engine.step(scene(), &[Command::Select(2)]);
        assert_eq!(state.selected().unwrap().kind, ShapeKind::Sphere);
        let (state, _) = engine.step(state, &[Command::Select(7)]);
        assert_eq!(state.selected_index(), 2);
        let (state, _) = engine.step(state, &[Command::NextObject]);
        assert_eq!(state.selected_index(), 0);
    }

    #[test]
    fn transforms_only_touch_selected_object() {
        let (state, _) = engine().step(
            scene(),
            &[Command::Select(1), Command::Translate(Vec3::new(1.0, 0.0, 0.0))],
        );
        let cube = &state.objects()[0].object;
        assert_eq!(&*cube.world_vertices(), cube.base_vertices());
        assert_ne!(
            &*state.objects()[1].object.world_vertices(),
            state.objects()[1].object.base_vertices()
        );
    }

    #[test]
    fn empty_scene_renders_nothing() {
        let (_, frame) = engine().step(SceneState::new(Vec::new()), &[Command::NextObject]);
        assert!(frame.commands.is_empty());
    }

    #[test]
    fn clip_output_keeps_commands_inside_window() {
        let config = ViewConfig::default().with_clip_output(true);
        let window = config.clip_window;
        let engine = Engine::new(config).unwrap();
        let (state, solid) = engine.step(scene(), &[Command::Scale(1.5)]);
        let (_, wire) = engine.step(state, &[Command::ToggleRenderMode]);

        // Rounding to whole pixels can push a clipped point half a pixel out.
        let inside = |p: &ScreenPoint| {
            let v = p.to_vec2();
            v.x >= window.xmin() - 0.5
                && v.x <= window.xmax() + 0.5
                && v.y >= window.ymin() - 0.5
                && v.y <= window.ymax() + 0.5
        };
        for command in solid.commands.iter().chain(&wire.commands) {
            match command {
                DrawCommand::Line { from, to, .. } => assert!(inside(from) && inside(to)),
                DrawCommand::Polygon { points, .. } | DrawCommand::Outline { points, .. } => {
                    assert!(points.len() >= 3 && points.iter().all(inside))
                }
                DrawCommand::Point { at, .. } => assert!(inside(at)),
            }
        }
    }

    #[test]
    fn clip_demo_shows_clipped_polygon() {
        let (state, frame) = engine().step(scene(), &[Command::ToggleClipDemo]);
        assert_eq!(state.view(), View::ClipDemo);
        let clipped = frame.commands.iter().any(|c| {
            matches!(c, DrawCommand::Outline { color, .. } if *color == colors::CLIPPED)
        });
        assert!(clipped);
        assert!(frame.lines().count() >= 1);
    }
}
