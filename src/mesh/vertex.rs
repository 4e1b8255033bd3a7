//! Per-vertex attribute record and interpolation.
//!
//! A [`Vertex`] holds one value slot per attribute channel together with a
//! presence mask. Channels a mesh never carried stay absent through
//! conversions and interpolation instead of being filled with defaults, so
//! geometry algorithms can round-trip meshes without inventing data.

use crate::math::{Vec2, Vec3, Vec4};

use super::attributes::VertexAttributes;

/// A single mesh vertex with optional attribute channels.
///
/// Position is treated as mandatory for any vertex that takes part in
/// geometry operations; every other channel is optional and gated on the
/// presence mask. Setters record presence, getters return `None` for absent
/// channels, so "absent" never collides with "present with a zero value".
///
/// Vertex lists handed to the conversion functions are expected to be
/// attribute-uniform: the first element is used as the presence template for
/// the whole list. See
/// [`validate_uniform_attributes`](super::validate_uniform_attributes) for an
/// explicit check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    position: Vec3,
    color: Vec4,
    normal: Vec3,
    tangent: Vec4,
    uv0: Vec2,
    uv2: Vec2,
    uv3: Vec4,
    uv4: Vec4,
    attributes: VertexAttributes,
}

impl Default for Vertex {
    /// The all-absent vertex: no channels present, all value slots zero.
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            color: Vec4::zeros(),
            normal: Vec3::zeros(),
            tangent: Vec4::zeros(),
            uv0: Vec2::zeros(),
            uv2: Vec2::zeros(),
            uv3: Vec4::zeros(),
            uv4: Vec4::zeros(),
            attributes: VertexAttributes::empty(),
        }
    }
}

impl Vertex {
    /// Create a vertex with only a position.
    pub fn new(position: Vec3) -> Self {
        let mut vertex = Self::default();
        vertex.set_position(position);
        vertex
    }

    /// Get the presence mask.
    pub fn attributes(&self) -> VertexAttributes {
        self.attributes
    }

    /// Check whether every channel in `attributes` is present.
    pub fn has(&self, attributes: VertexAttributes) -> bool {
        self.attributes.contains(attributes)
    }

    /// Get the position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Get the color, if present.
    pub fn color(&self) -> Option<Vec4> {
        self.has(VertexAttributes::COLOR).then_some(self.color)
    }

    /// Get the normal, if present.
    pub fn normal(&self) -> Option<Vec3> {
        self.has(VertexAttributes::NORMAL).then_some(self.normal)
    }

    /// Get the tangent, if present.
    pub fn tangent(&self) -> Option<Vec4> {
        self.has(VertexAttributes::TANGENT).then_some(self.tangent)
    }

    /// Get texture channel 0, if present.
    pub fn uv0(&self) -> Option<Vec2> {
        self.has(VertexAttributes::TEXTURE0).then_some(self.uv0)
    }

    /// Get texture channel 1, if present.
    pub fn uv2(&self) -> Option<Vec2> {
        self.has(VertexAttributes::TEXTURE1).then_some(self.uv2)
    }

    /// Get generalized texture channel 2, if present.
    pub fn uv3(&self) -> Option<Vec4> {
        self.has(VertexAttributes::TEXTURE2).then_some(self.uv3)
    }

    /// Get generalized texture channel 3, if present.
    pub fn uv4(&self) -> Option<Vec4> {
        self.has(VertexAttributes::TEXTURE3).then_some(self.uv4)
    }

    /// Set the position and mark it present.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.attributes |= VertexAttributes::POSITION;
    }

    /// Set the color and mark it present.
    pub fn set_color(&mut self, color: Vec4) {
        self.color = color;
        self.attributes |= VertexAttributes::COLOR;
    }

    /// Set the normal and mark it present.
    pub fn set_normal(&mut self, normal: Vec3) {
        self.normal = normal;
        self.attributes |= VertexAttributes::NORMAL;
    }

    /// Set the tangent and mark it present.
    pub fn set_tangent(&mut self, tangent: Vec4) {
        self.tangent = tangent;
        self.attributes |= VertexAttributes::TANGENT;
    }

    /// Set texture channel 0 and mark it present.
    pub fn set_uv0(&mut self, uv0: Vec2) {
        self.uv0 = uv0;
        self.attributes |= VertexAttributes::TEXTURE0;
    }

    /// Set texture channel 1 and mark it present.
    pub fn set_uv2(&mut self, uv2: Vec2) {
        self.uv2 = uv2;
        self.attributes |= VertexAttributes::TEXTURE1;
    }

    /// Set generalized texture channel 2 and mark it present.
    pub fn set_uv3(&mut self, uv3: Vec4) {
        self.uv3 = uv3;
        self.attributes |= VertexAttributes::TEXTURE2;
    }

    /// Set generalized texture channel 3 and mark it present.
    pub fn set_uv4(&mut self, uv4: Vec4) {
        self.uv4 = uv4;
        self.attributes |= VertexAttributes::TEXTURE3;
    }

    /// Set the color (builder form).
    pub fn with_color(mut self, color: Vec4) -> Self {
        self.set_color(color);
        self
    }

    /// Set the normal (builder form).
    pub fn with_normal(mut self, normal: Vec3) -> Self {
        self.set_normal(normal);
        self
    }

    /// Set the tangent (builder form).
    pub fn with_tangent(mut self, tangent: Vec4) -> Self {
        self.set_tangent(tangent);
        self
    }

    /// Set texture channel 0 (builder form).
    pub fn with_uv0(mut self, uv0: Vec2) -> Self {
        self.set_uv0(uv0);
        self
    }

    /// Set texture channel 1 (builder form).
    pub fn with_uv2(mut self, uv2: Vec2) -> Self {
        self.set_uv2(uv2);
        self
    }

    /// Set generalized texture channel 2 (builder form).
    pub fn with_uv3(mut self, uv3: Vec4) -> Self {
        self.set_uv3(uv3);
        self
    }

    /// Set generalized texture channel 3 (builder form).
    pub fn with_uv4(mut self, uv4: Vec4) -> Self {
        self.set_uv4(uv4);
        self
    }

    /// Weighted blend of two vertices: `self * (1 - weight) + other * weight`.
    ///
    /// Position is always blended. Every other channel is handled
    /// independently: blended when both sides carry it, taken unchanged from
    /// whichever side carries it otherwise, and left absent when neither
    /// does. The fallback lets CSG algorithms split an edge whose endpoints
    /// ended up with asymmetric attribute sets after earlier clips without
    /// dropping the data that is there.
    ///
    /// The weight is not clamped; values outside `[0, 1]` extrapolate.
    /// Blended normals and tangents are not renormalized, keeping this a
    /// pure affine blend. Call [`normalize`](Self::normalize) on the result
    /// if unit length matters.
    pub fn interpolate(&self, other: &Vertex, weight: f32) -> Vertex {
        let s = 1.0 - weight;
        let mut result = Vertex::new(self.position * s + other.position * weight);

        if let Some(color) = blend(self.color(), other.color(), |a, b| a * s + b * weight) {
            result.set_color(color);
        }
        if let Some(normal) = blend(self.normal(), other.normal(), |a, b| a * s + b * weight) {
            result.set_normal(normal);
        }
        if let Some(tangent) = blend(self.tangent(), other.tangent(), |a, b| a * s + b * weight) {
            result.set_tangent(tangent);
        }
        if let Some(uv0) = blend(self.uv0(), other.uv0(), |a, b| a * s + b * weight) {
            result.set_uv0(uv0);
        }
        if let Some(uv2) = blend(self.uv2(), other.uv2(), |a, b| a * s + b * weight) {
            result.set_uv2(uv2);
        }
        if let Some(uv3) = blend(self.uv3(), other.uv3(), |a, b| a * s + b * weight) {
            result.set_uv3(uv3);
        }
        if let Some(uv4) = blend(self.uv4(), other.uv4(), |a, b| a * s + b * weight) {
            result.set_uv4(uv4);
        }
        result
    }

    /// Renormalize the normal and the tangent direction in place.
    ///
    /// The tangent's w component (handedness) is left untouched. Channels
    /// that are absent or zero-length are unchanged.
    pub fn normalize(&mut self) {
        if self.has(VertexAttributes::NORMAL) {
            if let Some(normal) = self.normal.try_normalize(0.0) {
                self.normal = normal;
            }
        }
        if self.has(VertexAttributes::TANGENT) {
            if let Some(dir) = self.tangent.xyz().try_normalize(0.0) {
                self.tangent = Vec4::new(dir.x, dir.y, dir.z, self.tangent.w);
            }
        }
    }
}

/// Combine two optional channel values: blend when both are present, fall
/// back to whichever side is present otherwise.
fn blend<T>(a: Option<T>, b: Option<T>, mix: impl FnOnce(T, T) -> T) -> Option<T> {
    match (a, b) {
        (Some(a), Some(b)) => Some(mix(a, b)),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    }
}
