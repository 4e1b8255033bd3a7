//! Structure-of-arrays mesh buffer container.

use crate::math::{Vec2, Vec3, Vec4};

use super::attributes::VertexAttributes;

/// Flat per-attribute buffer form of a mesh.
///
/// One parallel array per attribute channel, each indexed by vertex index,
/// plus a triangle index list. This is the exchange format mesh containers
/// and the geometry pipeline agree on; the array-of-structures view lives in
/// [`Vertex`](super::Vertex) lists produced by
/// [`to_vertices`](Self::to_vertices).
///
/// A channel is considered populated only when its buffer length matches
/// [`vertex_count`](Self::vertex_count) exactly; buffers of any other length
/// are treated as absent by the conversion functions.
#[derive(Clone, Default, PartialEq)]
pub struct MeshBuffers {
    positions: Vec<Vec3>,
    colors: Vec<Vec4>,
    normals: Vec<Vec3>,
    tangents: Vec<Vec4>,
    uv0: Vec<Vec2>,
    uv2: Vec<Vec2>,
    uv3: Vec<Vec4>,
    uv4: Vec<Vec4>,
    indices: Vec<u32>,
}

impl MeshBuffers {
    /// Create an empty mesh with no buffers populated.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the position buffer.
    pub fn with_positions(mut self, positions: Vec<Vec3>) -> Self {
        self.positions = positions;
        self
    }

    /// Set the color buffer.
    pub fn with_colors(mut self, colors: Vec<Vec4>) -> Self {
        self.colors = colors;
        self
    }

    /// Set the normal buffer.
    pub fn with_normals(mut self, normals: Vec<Vec3>) -> Self {
        self.normals = normals;
        self
    }

    /// Set the tangent buffer.
    pub fn with_tangents(mut self, tangents: Vec<Vec4>) -> Self {
        self.tangents = tangents;
        self
    }

    /// Set texture channel 0.
    pub fn with_uv0(mut self, uv0: Vec<Vec2>) -> Self {
        self.uv0 = uv0;
        self
    }

    /// Set texture channel 1.
    pub fn with_uv2(mut self, uv2: Vec<Vec2>) -> Self {
        self.uv2 = uv2;
        self
    }

    /// Set generalized texture channel 2.
    pub fn with_uv3(mut self, uv3: Vec<Vec4>) -> Self {
        self.uv3 = uv3;
        self
    }

    /// Set generalized texture channel 3.
    pub fn with_uv4(mut self, uv4: Vec<Vec4>) -> Self {
        self.uv4 = uv4;
        self
    }

    /// Set the triangle index buffer.
    pub fn with_indices(mut self, indices: Vec<u32>) -> Self {
        self.indices = indices;
        self
    }

    /// Get the number of vertices (length of the position buffer).
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get the position buffer.
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Get the color buffer.
    pub fn colors(&self) -> &[Vec4] {
        &self.colors
    }

    /// Get the normal buffer.
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// Get the tangent buffer.
    pub fn tangents(&self) -> &[Vec4] {
        &self.tangents
    }

    /// Get texture channel 0.
    pub fn uv0(&self) -> &[Vec2] {
        &self.uv0
    }

    /// Get texture channel 1.
    pub fn uv2(&self) -> &[Vec2] {
        &self.uv2
    }

    /// Get generalized texture channel 2.
    pub fn uv3(&self) -> &[Vec4] {
        &self.uv3
    }

    /// Get generalized texture channel 3.
    pub fn uv4(&self) -> &[Vec4] {
        &self.uv4
    }

    /// Get the triangle index buffer.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Replace the position buffer.
    pub fn set_positions(&mut self, positions: Vec<Vec3>) {
        self.positions = positions;
    }

    /// Replace the color buffer.
    pub fn set_colors(&mut self, colors: Vec<Vec4>) {
        self.colors = colors;
    }

    /// Replace the normal buffer.
    pub fn set_normals(&mut self, normals: Vec<Vec3>) {
        self.normals = normals;
    }

    /// Replace the tangent buffer.
    pub fn set_tangents(&mut self, tangents: Vec<Vec4>) {
        self.tangents = tangents;
    }

    /// Replace texture channel 0.
    pub fn set_uv0(&mut self, uv0: Vec<Vec2>) {
        self.uv0 = uv0;
    }

    /// Replace texture channel 1.
    pub fn set_uv2(&mut self, uv2: Vec<Vec2>) {
        self.uv2 = uv2;
    }

    /// Replace generalized texture channel 2.
    pub fn set_uv3(&mut self, uv3: Vec<Vec4>) {
        self.uv3 = uv3;
    }

    /// Replace generalized texture channel 3.
    pub fn set_uv4(&mut self, uv4: Vec<Vec4>) {
        self.uv4 = uv4;
    }

    /// Replace the triangle index buffer.
    ///
    /// Index data does not survive [`set_vertices`](Self::set_vertices);
    /// callers reattach it here afterward.
    pub fn set_indices(&mut self, indices: Vec<u32>) {
        self.indices = indices;
    }

    /// Drop every attribute buffer and the index buffer.
    pub fn clear(&mut self) {
        self.positions.clear();
        self.colors.clear();
        self.normals.clear();
        self.tangents.clear();
        self.uv0.clear();
        self.uv2.clear();
        self.uv3.clear();
        self.uv4.clear();
        self.indices.clear();
    }

    /// Get the raw bytes of a single attribute buffer.
    ///
    /// `attribute` must name exactly one channel; combined masks and empty
    /// buffers yield `None`. Useful for handing buffers to a GPU upload path
    /// without copying.
    pub fn attribute_bytes(&self, attribute: VertexAttributes) -> Option<&[u8]> {
        let bytes: &[u8] = if attribute == VertexAttributes::POSITION {
            bytemuck::cast_slice(&self.positions)
        } else if attribute == VertexAttributes::COLOR {
            bytemuck::cast_slice(&self.colors)
        } else if attribute == VertexAttributes::NORMAL {
            bytemuck::cast_slice(&self.normals)
        } else if attribute == VertexAttributes::TANGENT {
            bytemuck::cast_slice(&self.tangents)
        } else if attribute == VertexAttributes::TEXTURE0 {
            bytemuck::cast_slice(&self.uv0)
        } else if attribute == VertexAttributes::TEXTURE1 {
            bytemuck::cast_slice(&self.uv2)
        } else if attribute == VertexAttributes::TEXTURE2 {
            bytemuck::cast_slice(&self.uv3)
        } else if attribute == VertexAttributes::TEXTURE3 {
            bytemuck::cast_slice(&self.uv4)
        } else {
            return None;
        };
        (!bytes.is_empty()).then_some(bytes)
    }
}

impl std::fmt::Debug for MeshBuffers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeshBuffers")
            .field("vertex_count", &self.vertex_count())
            .field("colors", &self.colors.len())
            .field("normals", &self.normals.len())
            .field("tangents", &self.tangents.len())
            .field("uv0", &self.uv0.len())
            .field("uv2", &self.uv2.len())
            .field("uv3", &self.uv3.len())
            .field("uv4", &self.uv4.len())
            .field("indices", &self.indices.len())
            .finish()
    }
}
