//! # BrushMesh Core
//!
//! CPU-side vertex attribute model for CSG mesh operations.
//!
//! Boolean mesh algorithms synthesize new vertices at arbitrary points along
//! edges (plane-clip intersections, splits) and must preserve whatever subset
//! of attributes each source mesh actually carries. This crate provides the
//! pieces those algorithms build on:
//!
//! - [`mesh::Vertex`] - a per-vertex record with optional attribute channels
//!   and an attribute-aware interpolation operator
//! - [`mesh::MeshBuffers`] - the flat structure-of-arrays buffer form meshes
//!   exchange with the geometry pipeline
//! - [`mesh::attribute_arrays`] and the [`mesh::MeshBuffers`] conversion
//!   methods - bidirectional translation between the two forms, with optional
//!   coordinate-space transforms

pub mod math;
pub mod mesh;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
