//! Base primitive shapes shared by every instance of a draw.

use crate::{options::PrimitiveShape, transform::VertexInput};

/// Vertices (and optional triangle-list indices) of a base primitive in its
/// local frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveMesh {
    /// Local-space vertices.
    pub vertices: Vec<VertexInput>,
    /// Triangle-list indices; `None` draws `vertices` as a triangle list.
    pub indices: Option<Vec<u16>>,
}

/// Octahedron triangles over the vertices of [`PrimitiveMesh::octahedron`],
/// upper half (+y) first.
const OCTAHEDRON_FACES: [[u16; 3]; 8] = [
    [0, 2, 4],
    [4, 2, 1],
    [1, 2, 5],
    [5, 2, 0],
    [4, 3, 0],
    [1, 3, 4],
    [5, 3, 1],
    [0, 3, 5],
];

impl PrimitiveMesh {
    /// Mesh for a configured shape.
    #[must_use]
    pub fn from_shape(shape: PrimitiveShape) -> Self {
        match shape {
            PrimitiveShape::Quad => Self::quad(),
            PrimitiveShape::Cross => Self::cross(),
            PrimitiveShape::Octahedron => Self::octahedron(),
        }
    }

    /// Non-indexed mesh from a raw triangle list.
    #[must_use]
    pub fn triangles(vertices: Vec<VertexInput>) -> Self {
        Self {
            vertices,
            indices: None,
        }
    }

    /// Unit quad centered on the origin in the xy plane, facing +z.
    #[must_use]
    pub fn quad() -> Self {
        Self {
            vertices: vec![
                VertexInput::new(-0.5, -0.5, 0.0),
                VertexInput::new(0.5, -0.5, 0.0),
                VertexInput::new(0.5, 0.5, 0.0),
                VertexInput::new(-0.5, 0.5, 0.0),
            ],
            indices: Some(vec![0, 1, 2, 2, 3, 0]),
        }
    }

    /// Two unit quads crossing along the y axis (xy and zy planes).
    #[must_use]
    pub fn cross() -> Self {
        Self {
            vertices: vec![
                VertexInput::new(-0.5, -0.5, 0.0),
                VertexInput::new(0.5, -0.5, 0.0),
                VertexInput::new(0.5, 0.5, 0.0),
                VertexInput::new(-0.5, 0.5, 0.0),
                VertexInput::new(0.0, -0.5, 0.5),
                VertexInput::new(0.0, -0.5, -0.5),
                VertexInput::new(0.0, 0.5, -0.5),
                VertexInput::new(0.0, 0.5, 0.5),
            ],
            indices: Some(vec![0, 1, 2, 2, 3, 0, 4, 5, 6, 6, 7, 4]),
        }
    }

    /// Octahedron with vertices at distance 0.5 on each axis, outward CCW
    /// winding.
    #[must_use]
    pub fn octahedron() -> Self {
        let r = 0.5;
        Self {
            vertices: vec![
                VertexInput::new(r, 0.0, 0.0),
                VertexInput::new(-r, 0.0, 0.0),
                VertexInput::new(0.0, r, 0.0),
                VertexInput::new(0.0, -r, 0.0),
                VertexInput::new(0.0, 0.0, r),
                VertexInput::new(0.0, 0.0, -r),
            ],
            indices: Some(OCTAHEDRON_FACES.concat()),
        }
    }

    /// Number of vertices one instance emits: the index count when indexed,
    /// the vertex count otherwise.
    #[must_use]
    pub fn draw_count(&self) -> u32 {
        self.indices
            .as_ref()
            .map_or(self.vertices.len(), Vec::len) as u32
    }

    /// Vertices in draw order, resolving indices.
    #[must_use]
    pub fn expanded(&self) -> Vec<VertexInput> {
        match &self.indices {
            Some(indices) => indices
                .iter()
                .filter_map(|&i| self.vertices.get(usize::from(i)).copied())
                .collect(),
            None => self.vertices.clone(),
        }
    }
}
