//! Error types for vertex list conversions.

use super::attributes::VertexAttributes;

/// Errors that can occur when converting vertex lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// A vertex list that must be non-empty was empty.
    EmptyVertexList,
    /// A vertex carries a different attribute set than the first vertex of
    /// its list.
    NonUniformAttributes {
        /// Index of the offending vertex.
        index: usize,
        /// Attribute set of the first vertex.
        expected: VertexAttributes,
        /// Attribute set found at `index`.
        found: VertexAttributes,
    },
}

impl std::fmt::Display for MeshError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyVertexList => write!(f, "vertex list is empty"),
            Self::NonUniformAttributes {
                index,
                expected,
                found,
            } => {
                write!(
                    f,
                    "vertex {index} carries attributes {found:?}, expected {expected:?}"
                )
            }
        }
    }
}

impl std::error::Error for MeshError {}
