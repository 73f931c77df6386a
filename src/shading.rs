//! Face normals, backface culling, flat shading and painter's ordering.
//!
//! The input is an object's camera-space vertices (after all transforms,
//! before projection). The viewer looks toward +Z, so a face whose outward
//! normal has a positive z component faces away and is culled.
//!
//! Depth ordering is a painter's algorithm over the mean z of each face:
//! faces are emitted farthest first and later faces paint over earlier ones.
//! Intersecting or interlocking faces can come out in the wrong order; there
//! is no per-pixel depth test.

use std::cmp::Ordering;

use crate::colors::{Color, Palette};
use crate::light::DirectionalLight;
use crate::math::vec3::Vec3;
use crate::math::EPSILON;
use crate::object::{Edge, Face};
use crate::projection::{Projector, ScreenPoint};

/// One visible, shaded face ready for drawing. Rebuilt every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceRenderRecord {
    /// Index of the face in its object, also its palette key.
    pub face_index: usize,
    /// Mean camera-space z of the face's vertices; larger is farther away.
    pub depth: f64,
    pub points: Vec<ScreenPoint>,
    pub color: Color,
}

/// A projected wireframe edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeSegment {
    pub from: ScreenPoint,
    pub to: ScreenPoint,
}

/// Look up all of a face's vertices, or `None` if the face is malformed.
fn face_vertices(vertices: &[Vec3], face: &Face) -> Option<Vec<Vec3>> {
    if face.len() < 3 {
        return None;
    }
    face.indices()
        .iter()
        .map(|&index| vertices.get(index).copied())
        .collect()
}

/// Unit normal from the first two edges at the face's first vertex.
///
/// Returns `None` for zero-length or collinear edges.
pub fn face_normal(points: &[Vec3]) -> Option<Vec3> {
    let [a, b, c] = points.get(..3)? else {
        return None;
    };
    (*b - *a).cross(*c - *a).try_normalize(EPSILON)
}

/// Whether a face with this outward normal faces away from the viewer.
pub fn is_back_facing(normal: Vec3) -> bool {
    normal.z > 0.0
}

/// Mean z of the given points.
pub fn depth_key(points: &[Vec3]) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    points.iter().map(|p| p.z).sum::<f64>() / points.len() as f64
}

/// Farthest first. Stable, so equal depths keep face order.
pub fn sort_back_to_front(records: &mut [FaceRenderRecord]) {
    records.sort_by(|a, b| b.depth.partial_cmp(&a.depth).unwrap_or(Ordering::Equal));
}

/// Cull, light, project and depth-sort the faces of one object.
pub fn shade_faces(
    vertices: &[Vec3],
    faces: &[Face],
    projector: &Projector,
    light: &DirectionalLight,
    palette: &Palette,
) -> Vec<FaceRenderRecord> {
    let mut records = Vec::with_capacity(faces.len());

    for (face_index, face) in faces.iter().enumerate() {
        let Some(points) = face_vertices(vertices, face) else {
            log::debug!("skipping face {face_index}: index out of range");
            continue;
        };

        let Some(normal) = face_normal(&points) else {
            log::debug!("skipping face {face_index}: degenerate normal");
            continue;
        };

        if is_back_facing(normal) {
            continue;
        }

        records.push(FaceRenderRecord {
            face_index,
            depth: depth_key(&points),
            points: points.iter().map(|&p| projector.project(p)).collect(),
            color: light.shade(palette.color_for(face_index), normal),
        });
    }

    sort_back_to_front(&mut records);
    records
}

/// Project every edge. No culling, lighting or ordering.
pub fn wireframe_edges(
    vertices: &[Vec3],
    edges: &[Edge],
    projector: &Projector,
) -> Vec<EdgeSegment> {
    edges
        .iter()
        .filter_map(|&Edge(a, b)| {
            let (Some(&from), Some(&to)) = (vertices.get(a), vertices.get(b)) else {
                log::debug!("skipping edge ({a}, {b}): index out of range");
                return None;
            };
            Some(EdgeSegment {
                from: projector.project(from),
                to: projector.project(to),
            })
        })
        .collect()
}
