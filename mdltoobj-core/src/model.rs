//! Model data structures

use crate::material::Material;
use nalgebra::{Point2, Point3};
use serde::{Deserialize, Serialize};

/// Vertex position
pub type Vertex = Point3<f64>;

/// Texture coordinate
pub type Uv = Point2<f64>;

/// Polygon as raw signed indices.
///
/// Non-negative indices count from the start of the owning model's vertex
/// array, negative ones count back from its end.
pub type Face = Vec<i32>;

/// A named mesh with its material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub name: String,
    pub material: Material,
    pub smooth_shading: bool,
    pub vertices: Vec<Vertex>,
    /// Either empty or paired one-to-one with `vertices`
    pub uvs: Vec<Uv>,
    pub faces: Vec<Face>,
}

impl Model {
    /// Create an empty model whose material shares its name
    pub fn named<S: Into<String>>(name: S) -> Self {
        let name = name.into();
        Self {
            material: Material::named(name.clone()),
            name,
            smooth_shading: false,
            vertices: Vec::new(),
            uvs: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of texture coordinates
    pub fn uv_count(&self) -> usize {
        self.uvs.len()
    }

    /// Get the number of faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if the model carries texture coordinates
    pub fn has_uvs(&self) -> bool {
        !self.uvs.is_empty()
    }

    /// Check if the model lacks vertices or faces
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Add a vertex without texture coordinate
    pub fn push_vertex(&mut self, vertex: Vertex) -> usize {
        let index = self.vertices.len();
        self.vertices.push(vertex);
        index
    }

    /// Add a vertex together with its texture coordinate
    pub fn push_vertex_uv(&mut self, vertex: Vertex, uv: Uv) -> usize {
        self.uvs.push(uv);
        self.push_vertex(vertex)
    }

    /// Add a face
    pub fn push_face(&mut self, face: Face) {
        self.faces.push(face);
    }

    /// Check whether UVs are absent or paired one-to-one with vertices
    pub fn has_paired_uvs(&self) -> bool {
        self.uvs.is_empty() || self.uvs.len() == self.vertices.len()
    }

    /// Remove faces referencing missing vertices, returning how many were dropped
    pub fn retain_valid_faces(&mut self) -> usize {
        let before = self.faces.len();
        let vertex_count = self.vertices.len();
        self.faces
            .retain(|face| face.iter().all(|&index| index_in_range(index, vertex_count)));
        before - self.faces.len()
    }
}

fn index_in_range(index: i32, count: usize) -> bool {
    let count = count as i64;
    let index = i64::from(index);
    index < count && index >= -count
}

impl Default for Model {
    fn default() -> Self {
        Self::named(String::new())
    }
}
