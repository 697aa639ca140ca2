//! # Chunk Module
//!
//! This module provides the `Chunk` struct: a dense 16x16x16 block of voxels, the
//! unit of generation, face culling, rendering and streaming.
//!
//! ## Neighbour Queries
//!
//! A chunk never holds a reference to the world that owns it. Whenever it needs a
//! voxel outside its own bounds (face culling at the chunk edge) the caller passes
//! the world in as a [`VoxelLookup`], and the chunk redirects the query there using
//! its world-space origin plus the local offset.
//!
//! ## Derived Geometry
//!
//! The renderable mesh is derived state. Culling drops it; the next draw rebuilds it
//! through [`Chunk::ensure_mesh`] before submitting. A stale mesh would show seams,
//! so there is no way to draw without passing through that check.

use cgmath::{Point3, Vector3};

use crate::engine_state::rendering::{ChunkMesh, QuadSink};

use super::block::{block_side::BlockSide, block_type::BlockType, FaceMask, Voxel};
use super::world::{chunk_key::ChunkKey, VoxelLookup};

pub mod chunk_generation;

use chunk_generation::TerrainGenerator;

/// The dimension (width, height, depth) of a chunk in blocks.
pub const CHUNK_DIMENSION: i32 = 16;
/// The number of blocks in a single 2D plane of a chunk (CHUNK_DIMENSION²).
pub const CHUNK_PLANE_SIZE: usize = (CHUNK_DIMENSION * CHUNK_DIMENSION) as usize;
/// The total number of blocks in a chunk (CHUNK_DIMENSION³).
pub const CHUNK_SIZE: usize = CHUNK_PLANE_SIZE * CHUNK_DIMENSION as usize;

/// Represents a 16x16x16 collection of voxels in the world.
pub struct Chunk {
    /// The position of this chunk in chunk coordinates (not block coordinates).
    pub position: ChunkKey,

    /// Voxel storage in row-major order (x, then y, then z).
    voxels: Vec<Voxel>,

    /// Cached geometry, `None` whenever the face masks changed since the last build.
    mesh: Option<ChunkMesh>,

    /// Draw generation in which this chunk was last submitted.
    last_drawn: u64,
}

impl Chunk {
    /// Creates a new, completely empty chunk (all voxels are air).
    pub fn empty(position: ChunkKey) -> Self {
        Chunk {
            position,
            voxels: vec![Voxel::EMPTY; CHUNK_SIZE],
            mesh: None,
            last_drawn: 0,
        }
    }

    /// Creates a chunk where every voxel has the given type.
    pub fn filled(position: ChunkKey, block_type: BlockType) -> Self {
        Chunk {
            voxels: vec![Voxel::new(block_type); CHUNK_SIZE],
            ..Chunk::empty(position)
        }
    }

    /// Creates a chunk from block types in storage order.
    ///
    /// Missing trailing entries stay air; extra entries are ignored.
    pub fn from_blocks(position: ChunkKey, blocks: impl IntoIterator<Item = BlockType>) -> Self {
        let mut chunk = Chunk::empty(position);
        for (voxel, block_type) in chunk.voxels.iter_mut().zip(blocks) {
            *voxel = Voxel::new(block_type);
        }
        chunk
    }

    /// Creates and populates a chunk with the given terrain generator.
    ///
    /// The returned chunk is not culled yet; the world culls it on insertion.
    pub fn generate(position: ChunkKey, generator: &TerrainGenerator) -> Self {
        Chunk::from_blocks(position, generator.generate(position))
    }

    /// World-space block coordinate of the chunk's minimum corner.
    pub fn origin(&self) -> Point3<i32> {
        self.position.origin()
    }

    /// `true` if the local coordinate lies inside this chunk.
    #[inline]
    pub fn contains_local(x: i32, y: i32, z: i32) -> bool {
        (0..CHUNK_DIMENSION).contains(&x)
            && (0..CHUNK_DIMENSION).contains(&y)
            && (0..CHUNK_DIMENSION).contains(&z)
    }

    #[inline]
    fn index(x: i32, y: i32, z: i32) -> usize {
        (x + CHUNK_DIMENSION * y) as usize + CHUNK_PLANE_SIZE * z as usize
    }

    /// Gets the voxel at chunk-relative coordinates, or `None` outside the chunk.
    pub fn local_voxel(&self, x: i32, y: i32, z: i32) -> Option<&Voxel> {
        if Self::contains_local(x, y, z) {
            self.voxels.get(Self::index(x, y, z))
        } else {
            None
        }
    }

    /// Gets the voxel at chunk-relative coordinates, following the query into the
    /// world when the coordinate lies outside this chunk.
    ///
    /// # Arguments
    /// * `world` - Where out-of-range queries are redirected
    /// * `x`, `y`, `z` - Chunk-relative coordinates, possibly out of range
    ///
    /// # Returns
    /// The voxel, or [`Voxel::EMPTY`] if the world has nothing there.
    pub fn voxel(&self, world: &impl VoxelLookup, x: i32, y: i32, z: i32) -> Voxel {
        match self.local_voxel(x, y, z) {
            Some(voxel) => *voxel,
            None => world.voxel(self.origin() + Vector3::new(x, y, z)),
        }
    }

    /// All voxels in storage order.
    pub fn voxels(&self) -> &[Voxel] {
        &self.voxels
    }

    /// Number of non-air voxels.
    pub fn solid_count(&self) -> usize {
        self.voxels.iter().filter(|v| v.is_solid()).count()
    }

    /// Computes fresh visibility masks for every voxel without modifying the chunk.
    ///
    /// Neighbours are resolved through [`Chunk::voxel`], so faces on the chunk
    /// boundary are culled against whatever the world holds next door (air if the
    /// neighbouring chunk is not loaded).
    pub fn face_masks(&self, world: &impl VoxelLookup) -> Vec<FaceMask> {
        let mut masks = Vec::with_capacity(CHUNK_SIZE);

        for z in 0..CHUNK_DIMENSION {
            for y in 0..CHUNK_DIMENSION {
                for x in 0..CHUNK_DIMENSION {
                    let mut voxel = self.voxels[Self::index(x, y, z)];
                    let neighbours = BlockSide::all().map(|side| {
                        let offset = side.offset();
                        self.voxel(world, x + offset.x, y + offset.y, z + offset.z)
                    });
                    voxel.cull(neighbours);
                    masks.push(voxel.visible_faces);
                }
            }
        }

        masks
    }

    /// Stores masks produced by [`Chunk::face_masks`] and invalidates the cached mesh.
    pub fn apply_face_masks(&mut self, masks: Vec<FaceMask>) {
        for (voxel, mask) in self.voxels.iter_mut().zip(masks) {
            voxel.visible_faces = mask;
        }
        self.mesh = None;
    }

    /// Recomputes every voxel's face mask against the given world.
    ///
    /// Only usable when `world` does not own this chunk; the world itself goes
    /// through [`Chunk::face_masks`] and [`Chunk::apply_face_masks`] separately.
    pub fn cull_faces(&mut self, world: &impl VoxelLookup) {
        let masks = self.face_masks(world);
        self.apply_face_masks(masks);
    }

    /// `true` if the cached mesh reflects the current face masks.
    pub fn is_mesh_current(&self) -> bool {
        self.mesh.is_some()
    }

    /// Builds the mesh if the face masks changed since the last build.
    pub fn ensure_mesh(&mut self) -> &ChunkMesh {
        let origin = self.origin();
        let voxels = &self.voxels;
        self.mesh.get_or_insert_with(|| ChunkMesh::build(origin, voxels))
    }

    /// The draw generation in which this chunk was last submitted.
    pub fn last_drawn(&self) -> u64 {
        self.last_drawn
    }

    /// Submits the chunk's geometry, at most once per draw generation.
    ///
    /// # Returns
    /// `false` if the chunk was already drawn in `generation`, `true` otherwise.
    pub fn draw(&mut self, generation: u64, sink: &mut impl QuadSink) -> bool {
        if self.last_drawn == generation {
            return false;
        }
        self.last_drawn = generation;

        let position = self.position;
        let mesh = self.ensure_mesh();
        sink.submit(position, &mesh.quads);
        true
    }
}
