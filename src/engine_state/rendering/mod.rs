//! Rendering seam for the voxel engine.
//!
//! The engine does not talk to a graphics API. Each frame the world traversal hands
//! the quads of every visible chunk to a [`QuadSink`], which an embedding
//! application implements on top of whatever immediate-mode or buffered renderer
//! it uses. [`DrawRecorder`] is the sink used by the headless driver and the tests.

use std::collections::BTreeMap;

use super::voxels::world::chunk_key::ChunkKey;

pub mod atlas;
pub mod meshing;
mod vertex;

// Re-export commonly used types
pub use meshing::{ChunkMesh, Quad};
pub use vertex::Vertex;

/// Receiver of chunk geometry during a world draw.
pub trait QuadSink {
    /// Called once per drawn chunk with all of its visible faces.
    fn submit(&mut self, chunk: ChunkKey, quads: &[Quad]);
}

/// A sink that records what was drawn instead of drawing it.
#[derive(Debug, Default)]
pub struct DrawRecorder {
    /// Quads submitted per chunk during the current frame
    pub frame: BTreeMap<ChunkKey, usize>,
    /// Total quads submitted since creation
    pub total_quads: u64,
    /// Total chunk submissions since creation
    pub total_submissions: u64,
}

impl DrawRecorder {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets the per-frame record, keeping the running totals.
    pub fn begin_frame(&mut self) {
        self.frame.clear();
    }

    /// Number of quads submitted in the current frame.
    pub fn frame_quads(&self) -> usize {
        self.frame.values().sum()
    }
}

impl QuadSink for DrawRecorder {
    fn submit(&mut self, chunk: ChunkKey, quads: &[Quad]) {
        *self.frame.entry(chunk).or_insert(0) += quads.len();
        self.total_quads += quads.len() as u64;
        self.total_submissions += 1;
    }
}
