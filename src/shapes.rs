//! Built-in models.
//!
//! All faces wind counter-clockwise when seen from outside, so the cross
//! product of their first two edges is the outward normal.

use std::f64::consts::{PI, TAU};

use crate::colors::ShapeKind;
use crate::math::vec3::Vec3;
use crate::object::{Edge, Face, Object3D};

pub const CUBE_VERTICES: [[f64; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
];

#[rustfmt::skip]
pub const CUBE_EDGES: [(usize, usize); 12] = [
    (0, 1), (1, 2), (2, 3), (3, 0),
    (4, 5), (5, 6), (6, 7), (7, 4),
    (0, 4), (1, 5), (2, 6), (3, 7),
];

pub const CUBE_FACES: [[usize; 4]; 6] = [
    [0, 3, 2, 1], // front  (z = -1, toward the viewer)
    [4, 5, 6, 7], // back   (z = +1)
    [0, 1, 5, 4], // bottom (y = -1)
    [3, 7, 6, 2], // top    (y = +1)
    [0, 4, 7, 3], // left   (x = -1)
    [1, 2, 6, 5], // right  (x = +1)
];

pub const PYRAMID_VERTICES: [[f64; 3]; 5] = [
    [0.0, 1.0, 0.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, -1.0, -1.0],
    [-1.0, -1.0, -1.0],
];

#[rustfmt::skip]
pub const PYRAMID_EDGES: [(usize, usize); 8] = [
    (0, 1), (0, 2), (0, 3), (0, 4),
    (1, 2), (2, 3), (3, 4), (4, 1),
];

pub const PYRAMID_SIDES: [[usize; 3]; 4] = [
    [0, 3, 4], // front
    [0, 1, 2], // back
    [0, 2, 3], // right
    [0, 4, 1], // left
];

pub const PYRAMID_BASE: [usize; 4] = [1, 4, 3, 2];

pub const DEFAULT_SPHERE_SEGMENTS: usize = 16;

fn object_from_tables(
    vertices: &[[f64; 3]],
    edges: &[(usize, usize)],
    faces: Vec<Face>,
) -> Object3D {
    Object3D::new(
        vertices.iter().map(|&v| Vec3::from(v)).collect(),
        edges.iter().map(|&(a, b)| Edge(a, b)).collect(),
        faces,
    )
}

fn faces_from_tables<'a>(tables: impl IntoIterator<Item = &'a [usize]>) -> Vec<Face> {
    tables
        .into_iter()
        .filter_map(|indices| Face::new(indices.to_vec()).ok())
        .collect()
}

/// Axis-aligned cube of half-size 1 centred on the origin.
pub fn cube() -> Object3D {
    let faces = faces_from_tables(CUBE_FACES.iter().map(|f| &f[..]));
    object_from_tables(&CUBE_VERTICES, &CUBE_EDGES, faces)
}

/// Square pyramid with its apex on +Y.
pub fn pyramid() -> Object3D {
    let sides = PYRAMID_SIDES.iter().map(|f| &f[..]);
    let faces = faces_from_tables(sides.chain(std::iter::once(&PYRAMID_BASE[..])));
    object_from_tables(&PYRAMID_VERTICES, &PYRAMID_EDGES, faces)
}

/// UV sphere with `segments` latitude bands and `segments` longitude slices.
///
/// Each latitude ring (including both poles) holds `segments` vertices, so
/// pole vertices are duplicated. Bands touching a pole use triangles instead
/// of quads so that no face starts with two coincident vertices.
pub fn sphere(radius: f64, segments: usize) -> Object3D {
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity((segments + 1) * segments);

    for i in 0..=segments {
        let lat = PI * i as f64 / segments as f64 - PI / 2.0;
        for j in 0..segments {
            let lon = TAU * j as f64 / segments as f64;
            vertices.push(Vec3::new(
                radius * lat.cos() * lon.cos(),
                radius * lat.sin(),
                radius * lat.cos() * lon.sin(),
            ));
        }
    }

    let mut faces = Vec::with_capacity(segments * segments);
    for i in 0..segments {
        for j in 0..segments {
            let current = i * segments + j;
            let next_row = (i + 1) * segments + j;
            let next_col = i * segments + (j + 1) % segments;
            let next_both = (i + 1) * segments + (j + 1) % segments;

            let indices = if i == 0 {
                vec![current, next_row, next_both]
            } else if i == segments - 1 {
                vec![current, next_row, next_col]
            } else {
                vec![current, next_row, next_both, next_col]
            };
            faces.extend(Face::new(indices).ok());
        }
    }

    Object3D::new(vertices, Vec::new(), faces)
}

/// Build the built-in model for `kind`. `Custom` has no built-in geometry.
pub fn shape(kind: ShapeKind) -> Option<Object3D> {
    match kind {
        ShapeKind::Cube => Some(cube()),
        ShapeKind::Pyramid => Some(pyramid()),
        ShapeKind::Sphere => Some(sphere(1.0, DEFAULT_SPHERE_SEGMENTS)),
        ShapeKind::Custom => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::EPSILON;

    /// Every face normal must point away from the object's centroid.
    fn assert_outward(object: &Object3D) {
        let vertices = object.base_vertices();
        let centroid = vertices.iter().fold(Vec3::ZERO, |acc, &v| acc + v) / vertices.len() as f64;

        for (i, face) in object.faces().iter().enumerate() {
            let idx = face.indices();
            let (a, b, c) = (vertices[idx[0]], vertices[idx[1]], vertices[idx[2]]);
            let normal = (b - a).cross(c - a);
            let face_center =
                idx.iter().fold(Vec3::ZERO, |acc, &k| acc + vertices[k]) / idx.len() as f64;
            assert!(normal.magnitude() > EPSILON, "face {i} is degenerate");
            assert!(
                normal.dot(face_center - centroid) > 0.0,
                "face {i} normal points inward"
            );
        }
    }

    #[test]
    fn cube_faces_point_outward() {
        let cube = cube();
        assert_eq!(cube.faces().len(), 6);
        assert_eq!(cube.edges().len(), 12);
        assert_outward(&cube);
        assert!(cube.validate().is_ok());
    }

    #[test]
    fn pyramid_faces_point_outward() {
        let pyramid = pyramid();
        assert_eq!(pyramid.faces().len(), 5);
        assert_outward(&pyramid);
        assert!(pyramid.validate().is_ok());
    }

    #[test]
    fn sphere_faces_point_outward() {
        let sphere = sphere(1.0, DEFAULT_SPHERE_SEGMENTS);
        assert_eq!(sphere.vertex_count(), 17 * 16);
        assert_eq!(sphere.faces().len(), 16 * 16);
        assert_outward(&sphere);
        assert!(sphere.validate().is_ok());
    }

    #[test]
    fn custom_shape_has_no_builtin() {
        assert!(shape(ShapeKind::Custom).is_none());
        assert!(shape(ShapeKind::Sphere).is_some());
    }
}
