//! Mesh data structures for chunk rendering.
//!
//! A chunk produces two independent meshes per build: one for opaque blocks
//! and one for translucent blocks (water and ice), so the harness can draw the
//! translucent geometry in a separate blended pass.

use cgmath::Vector3;

use super::{face::Face, vertex::Vertex};

/// A vertex buffer with its triangle index buffer.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ChunkMesh {
    /// Interleaved vertex data, four vertices per face
    pub vertices: Vec<Vertex>,
    /// Triangle indices into `vertices`, six per face
    pub indices: Vec<u32>,
}

impl ChunkMesh {
    /// Creates a new, empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one face as two triangles.
    pub fn push_face(&mut self, face: &Face) {
        let faces_so_far = self.face_count() as u32;
        self.vertices.extend_from_slice(&face.vertices());
        self.indices
            .extend_from_slice(&Self::generate_face_indices(faces_so_far));
    }

    /// Generates index data for a face, offset by the number of faces already in the mesh.
    ///
    /// # Returns
    /// Six indices forming the triangles (ll, lr, ur) and (ll, ur, ul).
    pub fn generate_face_indices(num_faces_generated: u32) -> [u32; 6] {
        let base = num_faces_generated * 4;
        [base, base + 1, base + 2, base, base + 2, base + 3]
    }

    /// Number of quads in the mesh.
    pub fn face_count(&self) -> usize {
        self.vertices.len() / 4
    }

    /// `true` when the mesh holds no geometry.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertex data as raw bytes, ready for upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index data as raw bytes, ready for upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// Which buffer of a chunk a draw submission binds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DrawKind {
    /// Depth-writing geometry drawn first.
    Opaque,
    /// Blended geometry drawn after all opaque geometry.
    Transparent,
}

/// The perspective a harness draws the terrain from.
///
/// The terrain core does not branch on this; it identifies the pass to sinks
/// that record per-pass statistics or pick a shader.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RenderPass {
    /// Color pass from the player's camera.
    PlayerView,
    /// Depth-only pass from the light, for shadow mapping.
    LightView,
}

impl RenderPass {
    /// The buffers this pass draws. Depth-only passes skip translucent geometry.
    pub fn draw_kinds(self) -> &'static [DrawKind] {
        match self {
            RenderPass::PlayerView => &[DrawKind::Opaque, DrawKind::Transparent],
            RenderPass::LightView => &[DrawKind::Opaque],
        }
    }
}

/// The opaque and transparent meshes of one chunk.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ChunkMeshes {
    /// Faces of every block except water and ice
    pub opaque: ChunkMesh,
    /// Faces of water and ice blocks
    pub transparent: ChunkMesh,
}

impl ChunkMeshes {
    /// The mesh bound for a given draw kind.
    pub fn get(&self, kind: DrawKind) -> &ChunkMesh {
        match kind {
            DrawKind::Opaque => &self.opaque,
            DrawKind::Transparent => &self.transparent,
        }
    }

    /// Both meshes tagged with their draw kind, opaque first.
    pub fn passes(&self) -> [(DrawKind, &ChunkMesh); 2] {
        [
            (DrawKind::Opaque, &self.opaque),
            (DrawKind::Transparent, &self.transparent),
        ]
    }
}

/// Receives chunk meshes from [`crate::voxels::terrain::Terrain::draw`].
///
/// `origin` is the chunk's world offset; vertex positions are relative to it.
pub trait MeshSink {
    /// Consumes the meshes of one chunk.
    fn submit(&mut self, origin: Vector3<i32>, meshes: &ChunkMeshes);
}

impl<F> MeshSink for F
where
    F: FnMut(Vector3<i32>, &ChunkMeshes),
{
    fn submit(&mut self, origin: Vector3<i32>, meshes: &ChunkMeshes) {
        self(origin, meshes)
    }
}

#[cfg(test)]
mod tests {
    use crate::voxels::block::{block_side::BlockSide, block_type::BlockType};

    use super::*;

    #[test]
    fn indices_follow_the_face_count() {
        let mut mesh = ChunkMesh::new();
        mesh.push_face(&Face::new(0, 0, 0, BlockType::STONE, BlockSide::TOP));
        mesh.push_face(&Face::new(0, 0, 0, BlockType::STONE, BlockSide::FRONT));
        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3, 4, 5, 6, 4, 6, 7]);
        assert_eq!(mesh.index_bytes().len(), 12 * 4);
    }

    #[test]
    fn light_pass_skips_translucent_geometry() {
        assert_eq!(RenderPass::LightView.draw_kinds(), &[DrawKind::Opaque]);
        assert_eq!(RenderPass::PlayerView.draw_kinds().len(), 2);
    }
}
