//! Vertex data structures and layouts for chunk meshes.
//!
//! This module defines the interleaved vertex format produced by the mesher and
//! a backend-neutral description of its attributes, so a rendering harness can
//! bind the buffers without knowing the struct.

use cgmath::Point3;

use crate::voxels::block::block_side::BlockSide;

/// A vertex of a chunk mesh.
///
/// Positions are chunk-local; the mesh sink receives the chunk's world offset
/// separately.
///
/// # Memory Layout
/// - Position: [f32; 3] (12 bytes)
/// - Normal: [f32; 3] (12 bytes)
/// - Texture Coordinates: [f32; 2] (8 bytes)
///
/// Total size: 32 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Chunk-local position of the corner
    pub position: [f32; 3],
    /// Outward normal of the face this vertex belongs to
    pub normal: [f32; 3],
    /// Atlas UV coordinates (normalized 0.0-1.0)
    pub uv: [f32; 2],
}

/// One attribute of the vertex layout.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Shader input location
    pub location: u32,
    /// Byte offset inside a vertex
    pub offset: usize,
    /// Number of `f32` components
    pub components: usize,
}

impl Vertex {
    /// Size of one vertex in bytes.
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();

    /// Creates a new vertex at a chunk-local corner.
    ///
    /// # Arguments
    /// * `corner` - Chunk-local lattice point of the corner
    /// * `side` - The face the corner belongs to, which provides the normal
    /// * `uv` - Atlas coordinates of the corner
    pub fn new(corner: Point3<usize>, side: BlockSide, uv: [f32; 2]) -> Self {
        Vertex {
            position: [corner.x as f32, corner.y as f32, corner.z as f32],
            normal: side.normal(),
            uv,
        }
    }

    /// Describes how the vertex fields are laid out in memory.
    ///
    /// # Shader Attributes
    /// - `location = 0`: position (vec3<f32>)
    /// - `location = 1`: normal (vec3<f32>)
    /// - `location = 2`: uv (vec2<f32>)
    pub fn layout() -> [VertexAttribute; 3] {
        let float = std::mem::size_of::<f32>();
        [
            VertexAttribute {
                location: 0,
                offset: 0,
                components: 3,
            },
            VertexAttribute {
                location: 1,
                offset: 3 * float,
                components: 3,
            },
            VertexAttribute {
                location: 2,
                offset: 6 * float,
                components: 2,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_covers_the_whole_stride() {
        assert_eq!(Vertex::STRIDE, 32);
        let last = Vertex::layout()[2];
        assert_eq!(last.offset + last.components * 4, Vertex::STRIDE);
    }

    #[test]
    fn casts_to_bytes() {
        let vertex = Vertex::new(Point3::new(1, 2, 3), BlockSide::TOP, [0.5, 0.25]);
        let bytes: &[u8] = bytemuck::bytes_of(&vertex);
        assert_eq!(bytes.len(), Vertex::STRIDE);
        let floats: &[f32] = bytemuck::cast_slice(bytes);
        assert_eq!(floats, &[1.0, 2.0, 3.0, 0.0, 1.0, 0.0, 0.5, 0.25]);
    }
}
