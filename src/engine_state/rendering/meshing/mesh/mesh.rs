//! Chunk mesh construction.
//!
//! Turns the culled voxels of one chunk into the list of quads that the external
//! renderer draws. Building is a pure function of the chunk's voxels and face masks;
//! the chunk decides when a rebuild is needed.

use cgmath::Point3;

use crate::engine_state::{
    rendering::Vertex,
    voxels::{
        block::{block_side::BlockSide, Voxel},
        chunk::{CHUNK_DIMENSION, CHUNK_PLANE_SIZE},
    },
};

use super::face::Quad;

/// Renderable geometry for one chunk.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ChunkMesh {
    /// One quad per visible voxel face, in chunk storage order
    pub quads: Vec<Quad>,
}

impl ChunkMesh {
    /// Builds the mesh for a chunk.
    ///
    /// # Arguments
    /// * `origin` - World position of the chunk's minimum corner
    /// * `voxels` - The chunk's voxels in storage order (x fastest, then y, then z)
    ///
    /// Only solid voxels contribute, and only through faces whose visibility bit is set.
    pub fn build(origin: Point3<i32>, voxels: &[Voxel]) -> Self {
        let mut quads = Vec::new();

        for (index, voxel) in voxels.iter().enumerate() {
            if !voxel.is_visible() {
                continue;
            }

            let index = index as i32;
            let x = index % CHUNK_DIMENSION;
            let y = (index / CHUNK_DIMENSION) % CHUNK_DIMENSION;
            let z = index / CHUNK_PLANE_SIZE as i32;
            let position = Point3::new(
                (origin.x + x) as f32,
                (origin.y + y) as f32,
                (origin.z + z) as f32,
            );

            for side in BlockSide::all() {
                if voxel.is_face_visible(side) {
                    quads.push(Quad::new(position, side, voxel.texture_index(side)));
                }
            }
        }

        ChunkMesh { quads }
    }

    /// Number of quads in the mesh.
    pub fn quad_count(&self) -> usize {
        self.quads.len()
    }

    /// `true` when nothing in the chunk is visible.
    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    /// Interleaved vertex and index buffers for upload.
    pub fn vertex_data(&self) -> (Vec<Vertex>, Vec<u32>) {
        let mut vertices = Vec::with_capacity(self.quads.len() * 4);
        let mut indices = Vec::with_capacity(self.quads.len() * 6);

        for (i, quad) in self.quads.iter().enumerate() {
            vertices.extend_from_slice(&quad.vertices());
            indices.extend_from_slice(&Quad::indices(i as u32));
        }

        (vertices, indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::{
        block::{block_type::BlockType, ALL_FACES},
        chunk::CHUNK_SIZE,
    };

    #[test]
    fn test_single_exposed_voxel_emits_six_quads() {
        let mut voxels = vec![Voxel::EMPTY; CHUNK_SIZE];
        let mut voxel = Voxel::new(BlockType::STONE);
        voxel.visible_faces = ALL_FACES;
        // (1, 2, 3) in storage order
        voxels[1 + 2 * CHUNK_DIMENSION as usize + 3 * CHUNK_PLANE_SIZE] = voxel;

        let mesh = ChunkMesh::build(Point3::new(16, 0, -16), &voxels);

        assert_eq!(mesh.quad_count(), 6);
        let bottom = mesh
            .quads
            .iter()
            .find(|q| q.side == BlockSide::BOTTOM)
            .map(|q| q.corners[0]);
        assert_eq!(bottom, Some(Point3::new(17.0, 2.0, -13.0)));

        let (vertices, indices) = mesh.vertex_data();
        assert_eq!(vertices.len(), 24);
        assert_eq!(indices.len(), 36);
    }

    #[test]
    fn test_air_masks_are_ignored() {
        let mut voxels = vec![Voxel::EMPTY; CHUNK_SIZE];
        // A stale mask on an air voxel must never produce geometry.
        voxels[0].visible_faces = ALL_FACES;
        assert!(ChunkMesh::build(Point3::new(0, 0, 0), &voxels).is_empty());
    }
}
