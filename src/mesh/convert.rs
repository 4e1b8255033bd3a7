//! Conversions between the buffer form and vertex lists.
//!
//! Three operations cover the data flow of a CSG pass:
//!
//! - [`attribute_arrays`] - vertex list → one freshly allocated array per
//!   requested channel
//! - [`MeshBuffers::to_vertices`] - buffer form → vertex list, lenient
//! - [`MeshBuffers::set_vertices`] - vertex list → buffer form, wholesale
//!   replacement
//!
//! Attribute presence is decided once per list, never per vertex: extraction
//! from a vertex list trusts the first element's presence mask, extraction
//! from buffers trusts each buffer's length matching the vertex count. A
//! presence mismatch between the two sides of an operation is resolved by
//! policy, never raised as an error.

use crate::math::{Mat4, rotate_direction, transform_direction, transform_point, Vec2, Vec3, Vec4};

use super::attributes::VertexAttributes;
use super::buffers::MeshBuffers;
use super::error::MeshError;
use super::vertex::Vertex;

/// One freshly allocated array per extracted attribute channel.
///
/// Channels that were not requested, or that the source list does not carry,
/// are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeArrays {
    /// Positions, transformed as points when a transform was supplied.
    pub positions: Option<Vec<Vec3>>,
    /// Colors, copied verbatim.
    pub colors: Option<Vec<Vec4>>,
    /// Normals, transformed as directions when a transform was supplied.
    pub normals: Option<Vec<Vec3>>,
    /// Tangents, direction rotated only, handedness preserved.
    pub tangents: Option<Vec<Vec4>>,
    /// Texture channel 0, copied verbatim.
    pub uv0: Option<Vec<Vec2>>,
    /// Texture channel 1, copied verbatim.
    pub uv2: Option<Vec<Vec2>>,
    /// Generalized texture channel 2, copied verbatim.
    pub uv3: Option<Vec<Vec4>>,
    /// Generalized texture channel 3, copied verbatim.
    pub uv4: Option<Vec<Vec4>>,
}

/// Rotate a tangent's direction, keeping its handedness sign.
fn rotate_tangent(m: &Mat4, tangent: &Vec4) -> Vec4 {
    let dir = rotate_direction(m, &tangent.xyz());
    Vec4::new(dir.x, dir.y, dir.z, tangent.w)
}

/// Extract per-channel arrays from a vertex list.
///
/// A channel is extracted when it is in `request` **and** present on the
/// first vertex of the list; the first element is the presence template for
/// the whole list, so a channel some later vertex happens to carry is still
/// skipped. An empty list yields all-`None` arrays.
///
/// With a transform, positions are transformed as points, normals as
/// directions, and tangent directions are rotated only. Colors and texture
/// channels are never transformed.
///
/// Input vertices are not mutated; every returned array has the same length
/// as the input list.
pub fn attribute_arrays(
    vertices: &[Vertex],
    request: VertexAttributes,
    transform: Option<&Mat4>,
) -> AttributeArrays {
    let template = vertices
        .first()
        .map(Vertex::attributes)
        .unwrap_or_else(VertexAttributes::empty);
    let wanted = request & template;

    let mut arrays = AttributeArrays::default();

    if wanted.contains(VertexAttributes::POSITION) {
        arrays.positions = Some(match transform {
            Some(m) => vertices
                .iter()
                .map(|v| transform_point(m, &v.position()))
                .collect(),
            None => vertices.iter().map(Vertex::position).collect(),
        });
    }
    if wanted.contains(VertexAttributes::COLOR) {
        arrays.colors = Some(
            vertices
                .iter()
                .map(|v| v.color().unwrap_or_else(Vec4::zeros))
                .collect(),
        );
    }
    if wanted.contains(VertexAttributes::NORMAL) {
        arrays.normals = Some(match transform {
            Some(m) => vertices
                .iter()
                .map(|v| transform_direction(m, &v.normal().unwrap_or_else(Vec3::zeros)))
                .collect(),
            None => vertices
                .iter()
                .map(|v| v.normal().unwrap_or_else(Vec3::zeros))
                .collect(),
        });
    }
    if wanted.contains(VertexAttributes::TANGENT) {
        arrays.tangents = Some(match transform {
            Some(m) => vertices
                .iter()
                .map(|v| rotate_tangent(m, &v.tangent().unwrap_or_else(Vec4::zeros)))
                .collect(),
            None => vertices
                .iter()
                .map(|v| v.tangent().unwrap_or_else(Vec4::zeros))
                .collect(),
        });
    }
    if wanted.contains(VertexAttributes::TEXTURE0) {
        arrays.uv0 = Some(
            vertices
                .iter()
                .map(|v| v.uv0().unwrap_or_else(Vec2::zeros))
                .collect(),
        );
    }
    if wanted.contains(VertexAttributes::TEXTURE1) {
        arrays.uv2 = Some(
            vertices
                .iter()
                .map(|v| v.uv2().unwrap_or_else(Vec2::zeros))
                .collect(),
        );
    }
    if wanted.contains(VertexAttributes::TEXTURE2) {
        arrays.uv3 = Some(
            vertices
                .iter()
                .map(|v| v.uv3().unwrap_or_else(Vec4::zeros))
                .collect(),
        );
    }
    if wanted.contains(VertexAttributes::TEXTURE3) {
        arrays.uv4 = Some(
            vertices
                .iter()
                .map(|v| v.uv4().unwrap_or_else(Vec4::zeros))
                .collect(),
        );
    }

    arrays
}

/// Check that every vertex carries the same attribute set as the first.
///
/// The conversion functions trust the first element without scanning; this
/// is the explicit opt-in check for callers assembling lists from mixed
/// sources. An empty list is trivially uniform.
pub fn validate_uniform_attributes(vertices: &[Vertex]) -> Result<(), MeshError> {
    let Some(first) = vertices.first() else {
        return Ok(());
    };
    let expected = first.attributes();
    for (index, vertex) in vertices.iter().enumerate().skip(1) {
        let found = vertex.attributes();
        if found != expected {
            return Err(MeshError::NonUniformAttributes {
                index,
                expected,
                found,
            });
        }
    }
    Ok(())
}

/// Does this buffer hold one element per vertex?
///
/// Anything else marks the channel absent for the whole list. A non-empty
/// buffer of the wrong length is suspicious enough to warn about.
fn buffer_matches<T>(buffer: &[T], vertex_count: usize, name: &str) -> bool {
    if buffer.len() == vertex_count {
        !buffer.is_empty()
    } else {
        if !buffer.is_empty() {
            log::warn!(
                "{name} buffer length {} does not match vertex count {vertex_count}, treating channel as absent",
                buffer.len()
            );
        }
        false
    }
}

impl MeshBuffers {
    /// Build a vertex list from the buffer form.
    ///
    /// One [`Vertex`] per index in `0..vertex_count()`. A channel is present
    /// on every output vertex when its buffer length equals the vertex count
    /// exactly, and absent on every output vertex otherwise; there is no
    /// partial presence. An empty mesh yields an empty list.
    ///
    /// With a local-to-world transform, positions are transformed as points,
    /// normals as directions, and tangent directions rotated only.
    pub fn to_vertices(&self, transform: Option<&Mat4>) -> Vec<Vertex> {
        let count = self.vertex_count();
        let has_colors = buffer_matches(self.colors(), count, "color");
        let has_normals = buffer_matches(self.normals(), count, "normal");
        let has_tangents = buffer_matches(self.tangents(), count, "tangent");
        let has_uv0 = buffer_matches(self.uv0(), count, "uv0");
        let has_uv2 = buffer_matches(self.uv2(), count, "uv2");
        let has_uv3 = buffer_matches(self.uv3(), count, "uv3");
        let has_uv4 = buffer_matches(self.uv4(), count, "uv4");

        let mut vertices = Vec::with_capacity(count);
        for i in 0..count {
            let position = self.positions()[i];
            let mut vertex = Vertex::new(match transform {
                Some(m) => transform_point(m, &position),
                None => position,
            });
            if has_colors {
                vertex.set_color(self.colors()[i]);
            }
            if has_normals {
                let normal = self.normals()[i];
                vertex.set_normal(match transform {
                    Some(m) => transform_direction(m, &normal),
                    None => normal,
                });
            }
            if has_tangents {
                let tangent = self.tangents()[i];
                vertex.set_tangent(match transform {
                    Some(m) => rotate_tangent(m, &tangent),
                    None => tangent,
                });
            }
            if has_uv0 {
                vertex.set_uv0(self.uv0()[i]);
            }
            if has_uv2 {
                vertex.set_uv2(self.uv2()[i]);
            }
            if has_uv3 {
                vertex.set_uv3(self.uv3()[i]);
            }
            if has_uv4 {
                vertex.set_uv4(self.uv4()[i]);
            }
            vertices.push(vertex);
        }
        vertices
    }

    /// Replace this mesh's buffers wholesale from a vertex list.
    ///
    /// Clears every existing buffer, the index buffer included, before
    /// assigning the new ones; callers must reattach index data via
    /// [`set_indices`](Self::set_indices) afterward. Only channels present
    /// on the first vertex are assigned.
    ///
    /// With a world-to-local transform, positions are transformed as points,
    /// normals as directions, and tangent directions rotated only.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::EmptyVertexList`] when `vertices` is empty; the
    /// mesh is left untouched in that case.
    pub fn set_vertices(
        &mut self,
        vertices: &[Vertex],
        transform: Option<&Mat4>,
    ) -> Result<(), MeshError> {
        if vertices.is_empty() {
            return Err(MeshError::EmptyVertexList);
        }

        let arrays = attribute_arrays(vertices, VertexAttributes::all(), transform);
        self.clear();

        if let Some(positions) = arrays.positions {
            self.set_positions(positions);
        }
        if let Some(colors) = arrays.colors {
            self.set_colors(colors);
        }
        if let Some(normals) = arrays.normals {
            self.set_normals(normals);
        }
        if let Some(tangents) = arrays.tangents {
            self.set_tangents(tangents);
        }
        if let Some(uv0) = arrays.uv0 {
            self.set_uv0(uv0);
        }
        if let Some(uv2) = arrays.uv2 {
            self.set_uv2(uv2);
        }
        if let Some(uv3) = arrays.uv3 {
            self.set_uv3(uv3);
        }
        if let Some(uv4) = arrays.uv4 {
            self.set_uv4(uv4);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn quad_vertices() -> Vec<Vertex> {
        (0..4)
            .map(|i| {
                let x = (i % 2) as f32;
                let y = (i / 2) as f32;
                Vertex::new(Vec3::new(x, y, 0.0))
                    .with_normal(Vec3::new(0.0, 0.0, 1.0))
                    .with_uv0(Vec2::new(x, y))
            })
            .collect()
    }

    fn quad_mesh() -> MeshBuffers {
        MeshBuffers::new()
            .with_positions(vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
            ])
            .with_normals(vec![Vec3::new(0.0, 0.0, 1.0); 4])
            .with_tangents(vec![Vec4::new(1.0, 0.0, 0.0, -1.0); 4])
            .with_uv0(vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(0.0, 1.0),
                Vec2::new(1.0, 1.0),
            ])
            .with_indices(vec![0, 1, 2, 2, 1, 3])
    }

    #[test]
    fn test_attribute_arrays_extracts_present_channels() {
        let vertices = quad_vertices();
        let arrays = attribute_arrays(&vertices, VertexAttributes::all(), None);

        assert_eq!(arrays.positions.as_ref().map(Vec::len), Some(4));
        assert_eq!(arrays.normals.as_ref().map(Vec::len), Some(4));
        assert_eq!(arrays.uv0.as_ref().map(Vec::len), Some(4));
        assert_eq!(arrays.colors, None);
        assert_eq!(arrays.tangents, None);
        assert_eq!(arrays.uv2, None);
    }

    #[test]
    fn test_attribute_arrays_respects_request() {
        let vertices = quad_vertices();
        let arrays = attribute_arrays(&vertices, VertexAttributes::POSITION, None);

        assert!(arrays.positions.is_some());
        assert_eq!(arrays.normals, None);
        assert_eq!(arrays.uv0, None);
    }

    #[test]
    fn test_attribute_arrays_gates_on_first_vertex() {
        // The second vertex carries a color the first lacks; the channel is
        // skipped for the whole list.
        let vertices = vec![
            Vertex::new(Vec3::zeros()),
            Vertex::new(Vec3::new(1.0, 0.0, 0.0)).with_color(Vec4::new(1.0, 1.0, 1.0, 1.0)),
        ];
        let arrays = attribute_arrays(&vertices, VertexAttributes::all(), None);

        assert!(arrays.positions.is_some());
        assert_eq!(arrays.colors, None);
    }

    #[test]
    fn test_attribute_arrays_empty_list() {
        let arrays = attribute_arrays(&[], VertexAttributes::all(), None);
        assert_eq!(arrays, AttributeArrays::default());
    }

    #[test]
    fn test_attribute_arrays_translation_moves_points_not_directions() {
        let vertices = quad_vertices();
        let m = Mat4::new_translation(&Vec3::new(0.0, 0.0, 5.0));
        let arrays = attribute_arrays(&vertices, VertexAttributes::all(), Some(&m));

        assert_eq!(arrays.positions.unwrap()[0], Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(arrays.normals.unwrap()[0], Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(arrays.uv0.unwrap()[1], Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_attribute_arrays_tangent_rotated_not_scaled() {
        let vertices = vec![
            Vertex::new(Vec3::zeros()).with_tangent(Vec4::new(1.0, 0.0, 0.0, -1.0)),
            Vertex::new(Vec3::new(1.0, 0.0, 0.0)).with_tangent(Vec4::new(1.0, 0.0, 0.0, -1.0)),
        ];
        let m = Mat4::new_scaling(4.0);
        let arrays = attribute_arrays(&vertices, VertexAttributes::TANGENT, Some(&m));

        let tangent = arrays.tangents.unwrap()[0];
        assert!((tangent - Vec4::new(1.0, 0.0, 0.0, -1.0)).norm() < 1e-5);
    }

    #[test]
    fn test_to_vertices_presence_follows_buffers() {
        let vertices = quad_mesh().to_vertices(None);
        assert_eq!(vertices.len(), 4);

        let expected = VertexAttributes::POSITION
            | VertexAttributes::NORMAL
            | VertexAttributes::TANGENT
            | VertexAttributes::TEXTURE0;
        for vertex in &vertices {
            assert_eq!(vertex.attributes(), expected);
        }
        assert_eq!(vertices[3].uv0(), Some(Vec2::new(1.0, 1.0)));
    }

    #[test]
    fn test_to_vertices_length_mismatch_drops_channel() {
        // Three colors for four vertices: the channel is absent everywhere.
        let mesh = quad_mesh().with_colors(vec![Vec4::new(1.0, 0.0, 0.0, 1.0); 3]);
        let vertices = mesh.to_vertices(None);

        assert!(vertices.iter().all(|v| v.color().is_none()));
    }

    #[test]
    fn test_to_vertices_empty_mesh() {
        assert!(MeshBuffers::new().to_vertices(None).is_empty());
    }

    #[test]
    fn test_to_vertices_applies_transform() {
        let m = Mat4::new_translation(&Vec3::new(1.0, 2.0, 3.0));
        let vertices = quad_mesh().to_vertices(Some(&m));

        assert_eq!(vertices[0].position(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(vertices[0].normal(), Some(Vec3::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_set_vertices_rejects_empty_list() {
        let mut mesh = quad_mesh();
        let result = mesh.set_vertices(&[], None);

        assert_eq!(result, Err(MeshError::EmptyVertexList));
        // Untouched on failure.
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.indices().len(), 6);
    }

    #[test]
    fn test_set_vertices_replaces_buffers_and_invalidates_indices() {
        let mut mesh = quad_mesh();
        let vertices = vec![
            Vertex::new(Vec3::zeros()).with_color(Vec4::new(1.0, 0.0, 0.0, 1.0)),
            Vertex::new(Vec3::new(1.0, 0.0, 0.0)).with_color(Vec4::new(0.0, 1.0, 0.0, 1.0)),
            Vertex::new(Vec3::new(0.0, 1.0, 0.0)).with_color(Vec4::new(0.0, 0.0, 1.0, 1.0)),
        ];

        mesh.set_vertices(&vertices, None).unwrap();

        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.colors().len(), 3);
        // Channels the new vertices lack are gone, not stale.
        assert!(mesh.normals().is_empty());
        assert!(mesh.uv0().is_empty());
        // Index data is invalidated and must be reattached by the caller.
        assert!(mesh.indices().is_empty());
    }

    #[test]
    fn test_set_vertices_applies_transform() {
        let mut mesh = MeshBuffers::new();
        let vertices = vec![
            Vertex::new(Vec3::new(1.0, 0.0, 0.0)).with_normal(Vec3::new(0.0, 1.0, 0.0)),
            Vertex::new(Vec3::new(2.0, 0.0, 0.0)).with_normal(Vec3::new(0.0, 1.0, 0.0)),
        ];
        let world_to_local = Mat4::new_translation(&Vec3::new(-1.0, 0.0, 0.0));

        mesh.set_vertices(&vertices, Some(&world_to_local)).unwrap();

        assert_eq!(mesh.positions()[0], Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(mesh.positions()[1], Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(mesh.normals()[0], Vec3::new(0.0, 1.0, 0.0));
    }

    #[rstest]
    #[case(VertexAttributes::POSITION)]
    #[case(VertexAttributes::NORMAL)]
    #[case(VertexAttributes::TANGENT)]
    #[case(VertexAttributes::TEXTURE0)]
    fn test_round_trip_preserves_buffers_bitwise(#[case] attribute: VertexAttributes) {
        let original = quad_mesh();
        let vertices = original.to_vertices(None);

        let mut rebuilt = MeshBuffers::new();
        rebuilt.set_vertices(&vertices, None).unwrap();

        assert_eq!(
            original.attribute_bytes(attribute),
            rebuilt.attribute_bytes(attribute)
        );
    }

    #[test]
    fn test_round_trip_absent_channels_stay_absent() {
        let original = quad_mesh();
        let vertices = original.to_vertices(None);

        let mut rebuilt = MeshBuffers::new();
        rebuilt.set_vertices(&vertices, None).unwrap();

        assert!(rebuilt.colors().is_empty());
        assert!(rebuilt.uv3().is_empty());
    }

    #[test]
    fn test_validate_uniform_attributes_accepts_uniform_list() {
        assert_eq!(validate_uniform_attributes(&quad_vertices()), Ok(()));
        assert_eq!(validate_uniform_attributes(&[]), Ok(()));
    }

    #[test]
    fn test_validate_uniform_attributes_reports_first_offender() {
        let mut vertices = quad_vertices();
        vertices[2] = Vertex::new(Vec3::zeros());

        let result = validate_uniform_attributes(&vertices);
        assert_eq!(
            result,
            Err(MeshError::NonUniformAttributes {
                index: 2,
                expected: VertexAttributes::POSITION
                    | VertexAttributes::NORMAL
                    | VertexAttributes::TEXTURE0,
                found: VertexAttributes::POSITION,
            })
        );
    }
}
