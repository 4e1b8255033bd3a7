//! Attribute channel bitmask.

use bitflags::bitflags;

bitflags! {
    /// Set of per-vertex attribute channels.
    ///
    /// Used both as a request mask when extracting attribute arrays and as
    /// the presence mask stored inside [`Vertex`](super::Vertex).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct VertexAttributes: u16 {
        /// Vertex position (float3).
        const POSITION = 1 << 0;
        /// Vertex color, RGBA (float4).
        const COLOR = 1 << 1;
        /// Vertex normal (float3).
        const NORMAL = 1 << 2;
        /// Vertex tangent (float4, w = handedness).
        const TANGENT = 1 << 3;
        /// Texture coordinates, channel 0 (float2).
        const TEXTURE0 = 1 << 4;
        /// Texture coordinates, channel 1 (float2).
        const TEXTURE1 = 1 << 5;
        /// Generalized texture coordinates, channel 2 (float4).
        const TEXTURE2 = 1 << 6;
        /// Generalized texture coordinates, channel 3 (float4).
        const TEXTURE3 = 1 << 7;
    }
}
