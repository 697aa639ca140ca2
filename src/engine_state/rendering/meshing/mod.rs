//! Mesh generation for voxel chunks.
//!
//! Chunks own their [`ChunkMesh`] as derived state: it is rebuilt lazily from the
//! chunk's face masks the first time the chunk is drawn after a cull, and handed
//! to a [`QuadSink`](super::QuadSink) on every draw.

mod mesh;

pub use mesh::*;
