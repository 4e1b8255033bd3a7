//! Per-vertex attribute model and mesh buffer conversions.
//!
//! This module provides the data types and operations CSG-style geometry
//! algorithms build on:
//!
//! - [`Vertex`] - per-vertex record with optional attribute channels and
//!   weighted interpolation
//! - [`VertexAttributes`] - bitmask naming the eight recognized channels
//! - [`MeshBuffers`] - the structure-of-arrays buffer form
//! - [`attribute_arrays`] / [`MeshBuffers::to_vertices`] /
//!   [`MeshBuffers::set_vertices`] - conversions between the two forms

mod attributes;
mod buffers;
mod convert;
mod error;
mod vertex;

pub use attributes::VertexAttributes;
pub use buffers::MeshBuffers;
pub use convert::{attribute_arrays, AttributeArrays, validate_uniform_attributes};
pub use error::MeshError;
pub use vertex::Vertex;
