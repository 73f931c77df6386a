//! Error types for fallible construction and model loading.
//!
//! Per-frame geometry never fails: degenerate faces and out-of-range indices
//! are skipped where they occur. These errors only surface when building
//! inputs (rectangles, lights, models, configuration).

/// Invalid geometric input rejected at construction time.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("invalid rectangle: ({xmin}, {ymin})..({xmax}, {ymax}) has min greater than max")]
    InvalidRect {
        xmin: f64,
        ymin: f64,
        xmax: f64,
        ymax: f64,
    },
    #[error("vector has zero or non-finite length")]
    ZeroVector,
    #[error("face has {0} vertices, at least 3 are required")]
    FaceTooSmall(usize),
    #[error("vertex index {index} out of range for {len} vertices")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Failure to load a model description from disk.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read OBJ file: {0}")]
    Obj(#[from] tobj::LoadError),
    #[error("model contains no vertices")]
    Empty,
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Rejected view configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("viewport must be non-empty, got {width}x{height}")]
    ZeroViewport { width: u32, height: u32 },
    #[error("projection distance must be positive and finite, got {0}")]
    InvalidDistance(f64),
    #[error("projection scale must be positive and finite, got {0}")]
    InvalidScale(f64),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}
