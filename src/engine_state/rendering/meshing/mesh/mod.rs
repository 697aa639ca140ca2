//! Mesh generation for voxel rendering.
//!
//! # Architecture
//! - [`ChunkMesh`]: the quads of one chunk, rebuilt whenever its face masks change
//! - [`Quad`]: one visible voxel face with world-space corners and atlas coordinates

mod face;
mod mesh;

pub use face::Quad;
pub use mesh::ChunkMesh;
