//! Colours and per-shape face palettes.
//!
//! Packed colours use ARGB8888, the layout the frame buffer stores.

/// An opaque 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Multiply every channel by `factor`, clamped to `0..=255`.
    pub fn scaled(self, factor: f64) -> Self {
        let channel = |c: u8| {
            let v = f64::from(c) * factor;
            if v.is_nan() {
                0
            } else {
                v.clamp(0.0, 255.0).round() as u8
            }
        };
        Self::rgb(channel(self.r), channel(self.g), channel(self.b))
    }

    /// Pack into ARGB8888 with full alpha.
    pub const fn to_argb(self) -> u32 {
        0xFF00_0000 | ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    pub const fn from_argb(argb: u32) -> Self {
        Self::rgb((argb >> 16) as u8, (argb >> 8) as u8, argb as u8)
    }
}

pub const BACKGROUND: Color = Color::rgb(20, 20, 30);
pub const WIREFRAME: Color = Color::rgb(255, 255, 255);
pub const OUTLINE: Color = Color::rgb(50, 50, 50);
pub const VERTEX: Color = Color::rgb(255, 0, 0);
pub const SUBJECT: Color = Color::rgb(255, 0, 0);
pub const CLIP_WINDOW: Color = Color::rgb(0, 255, 0);
pub const CLIPPED: Color = Color::rgb(0, 0, 255);

/// Which built-in model an object was created from; selects its palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Cube,
    Pyramid,
    Sphere,
    /// Loaded from a file or built by hand.
    Custom,
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShapeKind::Cube => write!(f, "Cube"),
            ShapeKind::Pyramid => write!(f, "Pyramid"),
            ShapeKind::Sphere => write!(f, "Sphere"),
            ShapeKind::Custom => write!(f, "Custom"),
        }
    }
}

/// Explicit face-index to colour mapping.
///
/// Faces beyond the listed colours get `fallback`; indices never wrap around.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Color>,
    fallback: Color,
}

impl Palette {
    pub fn new(colors: Vec<Color>, fallback: Color) -> Self {
        Self { colors, fallback }
    }

    /// Every face gets the same colour.
    pub fn uniform(color: Color) -> Self {
        Self::new(Vec::new(), color)
    }

    pub fn for_shape(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Cube => {
                let colors = vec![
                    Color::rgb(255, 100, 100),
                    Color::rgb(100, 255, 100),
                    Color::rgb(100, 100, 255),
                    Color::rgb(255, 255, 100),
                    Color::rgb(255, 100, 255),
                    Color::rgb(100, 255, 255),
                ];
                let fallback = colors[0];
                Self::new(colors, fallback)
            }
            ShapeKind::Pyramid => Self::new(
                vec![
                    Color::rgb(255, 180, 60),
                    Color::rgb(60, 180, 255),
                    Color::rgb(180, 255, 60),
                    Color::rgb(255, 60, 180),
                    Color::rgb(160, 160, 160),
                ],
                Color::rgb(160, 160, 160),
            ),
            ShapeKind::Sphere => Self::uniform(Color::rgb(200, 100, 50)),
            ShapeKind::Custom => Self::uniform(Color::rgb(180, 180, 200)),
        }
    }

    pub fn color_for(&self, face_index: usize) -> Color {
        self.colors.get(face_index).copied().unwrap_or(self.fallback)
    }

    pub fn fallback(&self) -> Color {
        self.fallback
    }
}
