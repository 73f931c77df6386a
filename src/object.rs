//! Polyhedral objects: vertices plus edge and face topology.
//!
//! An [`Object3D`] owns an immutable base vertex set and, depending on its
//! [`TransformPolicy`], either a mutable working copy or a set of accumulated
//! transform parameters. Objects can be built by hand, taken from
//! [`shapes`](crate::shapes), or loaded from Wavefront OBJ files.

use std::borrow::Cow;
use std::collections::HashSet;
use std::io::BufRead;
use std::path::Path;

use crate::error::{GeometryError, LoadError};
use crate::math::{mat4::Mat4, vec3::Vec3};
use crate::transform::{apply_matrix, apply_matrix_in_place, Transform, TransformPolicy};

/// An unordered pair of vertex indices drawn as a line in wireframe mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge(pub usize, pub usize);

impl Edge {
    /// The same edge with the smaller index first.
    pub fn normalized(self) -> Self {
        if self.0 <= self.1 {
            self
        } else {
            Edge(self.1, self.0)
        }
    }
}

/// An ordered loop of at least three vertex indices.
///
/// Winding of the first three vertices fixes the outward normal: counter-
/// clockwise when seen from outside the object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    indices: Vec<usize>,
}

impl Face {
    pub fn new(indices: Vec<usize>) -> Result<Self, GeometryError> {
        if indices.len() < 3 {
            return Err(GeometryError::FaceTooSmall(indices.len()));
        }
        Ok(Self { indices })
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Boundary edges of the loop, including the closing one.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        let n = self.indices.len();
        (0..n).map(move |i| Edge(self.indices[i], self.indices[(i + 1) % n]))
    }
}

/// Unique edges of all faces in first-seen order.
fn edges_from_faces(faces: &[Face]) -> Vec<Edge> {
    let mut seen = HashSet::new();
    faces
        .iter()
        .flat_map(Face::edges)
        .filter(|edge| seen.insert(edge.normalized()))
        .collect()
}

/// A transformable polyhedron.
#[derive(Debug, Clone)]
pub struct Object3D {
    base: Vec<Vec3>,
    /// Working copy mutated under [`TransformPolicy::MutateInPlace`].
    current: Vec<Vec3>,
    edges: Vec<Edge>,
    faces: Vec<Face>,
    policy: TransformPolicy,
    transform: Transform,
}

impl Object3D {
    /// Create an object. When `edges` is empty they are derived from `faces`.
    pub fn new(vertices: Vec<Vec3>, edges: Vec<Edge>, faces: Vec<Face>) -> Self {
        let edges = if edges.is_empty() {
            edges_from_faces(&faces)
        } else {
            edges
        };
        Self {
            current: vertices.clone(),
            base: vertices,
            edges,
            faces,
            policy: TransformPolicy::default(),
            transform: Transform::default(),
        }
    }

    /// Select the transform policy. Resets any accumulated state.
    pub fn with_policy(mut self, policy: TransformPolicy) -> Self {
        self.policy = policy;
        self.reset();
        self
    }

    /// Load every object in an OBJ file and merge them into one.
    ///
    /// Polygons are kept as n-gons (no triangulation).
    pub fn from_obj<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let (models, _materials) = tobj::load_obj(path.as_ref(), &obj_load_options())?;
        let object = Self::from_tobj_models(&models)?;
        log::info!(
            "loaded {} vertices and {} faces from {}",
            object.vertex_count(),
            object.faces.len(),
            path.as_ref().display()
        );
        Ok(object)
    }

    /// Parse OBJ data from a reader. Material libraries are not read.
    pub fn from_obj_reader<R: BufRead>(reader: &mut R) -> Result<Self, LoadError> {
        let (models, _materials) = tobj::load_obj_buf(reader, &obj_load_options(), |_| {
            Err(tobj::LoadError::OpenFileFailed)
        })?;
        Self::from_tobj_models(&models)
    }

    fn from_tobj_models(models: &[tobj::Model]) -> Result<Self, LoadError> {
        let mut vertices = Vec::new();
        let mut faces = Vec::new();

        for model in models {
            let mesh = &model.mesh;
            let offset = vertices.len();

            vertices.extend(
                mesh.positions
                    .chunks_exact(3)
                    .map(|p| Vec3::new(f64::from(p[0]), f64::from(p[1]), f64::from(p[2]))),
            );

            let index = |i: &u32| offset + *i as usize;
            if mesh.face_arities.is_empty() {
                for triangle in mesh.indices.chunks_exact(3) {
                    faces.push(Face::new(triangle.iter().map(index).collect())?);
                }
            } else {
                let mut start = 0;
                for &arity in &mesh.face_arities {
                    let end = start + arity as usize;
                    let Some(loop_indices) = mesh.indices.get(start..end) else {
                        break;
                    };
                    // Points and lines carry no surface.
                    if arity >= 3 {
                        faces.push(Face::new(loop_indices.iter().map(index).collect())?);
                    }
                    start = end;
                }
            }
        }

        if vertices.is_empty() {
            return Err(LoadError::Empty);
        }

        let object = Self::new(vertices, Vec::new(), faces);
        object.validate()?;
        Ok(object)
    }

    /// Check every edge and face index against the vertex count.
    pub fn validate(&self) -> Result<(), GeometryError> {
        let len = self.base.len();
        let edge_indices = self.edges.iter().flat_map(|e| [e.0, e.1]);
        let face_indices = self.faces.iter().flat_map(|f| f.indices().iter().copied());
        match edge_indices.chain(face_indices).find(|&index| index >= len) {
            Some(index) => Err(GeometryError::IndexOutOfRange { index, len }),
            None => Ok(()),
        }
    }

    // ============ Accessors ============

    pub fn base_vertices(&self) -> &[Vec3] {
        &self.base
    }

    pub fn vertex_count(&self) -> usize {
        self.base.len()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn policy(&self) -> TransformPolicy {
        self.policy
    }

    /// Accumulated transform parameters.
    ///
    /// Under [`TransformPolicy::MutateInPlace`] these are informational only;
    /// the vertices already carry every applied transform.
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    // ============ Transform Requests ============

    fn apply_in_place(&mut self, matrix: Mat4) {
        if self.policy == TransformPolicy::MutateInPlace {
            apply_matrix_in_place(&matrix, &mut self.current);
        }
    }

    pub fn translate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.transform.translate(Vec3::new(dx, dy, dz));
        self.apply_in_place(Mat4::translation(dx, dy, dz));
    }

    pub fn scale(&mut self, sx: f64, sy: f64, sz: f64) {
        self.transform.scale_by(Vec3::new(sx, sy, sz));
        self.apply_in_place(Mat4::scaling(sx, sy, sz));
    }

    pub fn rotate_x(&mut self, angle: f64) {
        self.transform.rotate_x(angle);
        self.apply_in_place(Mat4::rotation_x(angle));
    }

    pub fn rotate_y(&mut self, angle: f64) {
        self.transform.rotate_y(angle);
        self.apply_in_place(Mat4::rotation_y(angle));
    }

    pub fn rotate_z(&mut self, angle: f64) {
        self.transform.rotate_z(angle);
        self.apply_in_place(Mat4::rotation_z(angle));
    }

    /// Rotate about X, then Y.
    pub fn rotate(&mut self, angle_x: f64, angle_y: f64) {
        self.rotate_x(angle_x);
        self.rotate_y(angle_y);
    }

    /// Restore the pristine vertices and clear accumulated parameters.
    pub fn reset(&mut self) {
        self.current.clone_from(&self.base);
        self.transform = Transform::default();
    }

    /// Vertices with every requested transform applied.
    pub fn world_vertices(&self) -> Cow<'_, [Vec3]> {
        match self.policy {
            TransformPolicy::MutateInPlace => Cow::Borrowed(&self.current),
            TransformPolicy::RecomputeFromBase => {
                Cow::Owned(apply_matrix(&self.transform.to_matrix(), &self.base))
            }
        }
    }
}

fn obj_load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        single_index: true,
        triangulate: false,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    }
}
