//! # World Module
//!
//! This module provides the `World` struct which owns every loaded chunk and
//! coordinates chunk loading, culling, eviction and drawing.
//!
//! ## Architecture
//!
//! The world is sparse: only chunks that the render traversal has discovered are
//! generated. A chunk moves through three states:
//!
//! - **Unloaded**: no entry anywhere
//! - **Queued**: its key sits in the pending-load queue
//! - **Loaded**: the chunk lives in the chunk map, generated and culled
//!
//! Keys are discovered by [`World::draw`] (see `traversal`), loaded a few at a time
//! by [`World::update`] (see `streaming`), and may fall back to Unloaded through
//! eviction once the loaded-chunk budget is exhausted.
//!
//! ## Culling Across Chunks
//!
//! Chunk faces on the boundary depend on the neighbouring chunk. Whenever a chunk
//! enters or leaves the map, the loaded chunks next to it are culled again so that
//! both sides of every shared boundary stay consistent.

use std::collections::{HashSet, VecDeque};

use cgmath::Point3;
use log::debug;
use lru::LruCache;
use serde::{Deserialize, Serialize};

use super::{
    block::Voxel,
    chunk::{
        chunk_generation::{GenerationConfig, TerrainGenerator},
        Chunk, CHUNK_DIMENSION,
    },
};

pub mod chunk_key;
mod streaming;
mod traversal;

use chunk_key::{ChunkKey, WorldBounds};
pub use traversal::TraversalStats;

/// Anything that can answer "which voxel is at this world position".
///
/// Chunks resolve queries that leave their own bounds through this trait, and the
/// player collides against it.
pub trait VoxelLookup {
    /// The voxel at a world-space block coordinate, [`Voxel::EMPTY`] if there is none.
    fn voxel(&self, position: Point3<i32>) -> Voxel;
}

/// Tunables for the world.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Playable volume in chunk coordinates
    pub bounds: WorldBounds,
    /// Maximum number of chunks generated per call to [`World::update`]
    pub loads_per_update: usize,
    /// Loaded-chunk budget
    pub max_loaded_chunks: usize,
    /// Whether to evict stale chunks once the budget is reached
    pub evict_when_full: bool,
    /// Chunks whose centre is farther than this from the eye are not drawn
    pub view_distance: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            bounds: WorldBounds::default(),
            loads_per_update: 1,
            max_loaded_chunks: 1024,
            evict_when_full: true,
            view_distance: 80.0,
        }
    }
}

/// Represents a voxel world composed of multiple chunks.
///
/// The world exclusively owns its chunks. The chunk map is an unbounded
/// [`LruCache`] so that recency (promoted whenever a chunk is drawn) is available
/// for eviction; the budget is enforced by the world, not by the cache.
pub struct World {
    config: WorldConfig,
    generator: TerrainGenerator,

    /// Loaded chunks, most recently drawn first.
    chunks: LruCache<ChunkKey, Chunk>,

    /// Keys waiting to be generated, in discovery order.
    pending: VecDeque<ChunkKey>,
    /// Mirror of `pending` for de-duplication.
    queued: HashSet<ChunkKey>,

    /// Incremented at the start of every draw.
    generation: u64,
}

impl World {
    /// Creates a new, empty world.
    ///
    /// # Arguments
    /// * `config` - Bounds, streaming budget and view distance
    /// * `generation` - Terrain strategy used for every chunk this world loads
    pub fn new(config: WorldConfig, generation: &GenerationConfig) -> Self {
        let generator = TerrainGenerator::new(generation, &config.bounds);
        debug!(
            "Creating world with bounds {} and {:?} terrain",
            config.bounds,
            generator.method()
        );

        World {
            config,
            generator,
            chunks: LruCache::unbounded(),
            pending: VecDeque::new(),
            queued: HashSet::new(),
            generation: 0,
        }
    }

    /// The configuration this world was created with.
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// The playable volume.
    pub fn bounds(&self) -> &WorldBounds {
        &self.config.bounds
    }

    /// The generation of the most recent draw, 0 before the first one.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a chunk is loaded at the given key.
    pub fn is_loaded(&self, key: ChunkKey) -> bool {
        self.chunks.contains(&key)
    }

    /// Whether a key is waiting in the load queue.
    pub fn is_queued(&self, key: ChunkKey) -> bool {
        self.queued.contains(&key)
    }

    /// Number of loaded chunks.
    pub fn loaded_count(&self) -> usize {
        self.chunks.len()
    }

    /// Keys of all loaded chunks, most recently used first.
    pub fn loaded_keys(&self) -> impl Iterator<Item = ChunkKey> + '_ {
        self.chunks.iter().map(|(key, _)| *key)
    }

    /// Keys waiting to be loaded, in the order they will be processed.
    pub fn pending(&self) -> impl Iterator<Item = ChunkKey> + '_ {
        self.pending.iter().copied()
    }

    /// Read-only access to a loaded chunk. Does not affect recency.
    pub fn chunk(&self, key: ChunkKey) -> Option<&Chunk> {
        self.chunks.peek(&key)
    }

    /// Queues a key for loading.
    ///
    /// # Returns
    /// `false` if the key is outside the world, already loaded or already queued.
    pub fn request_load(&mut self, key: ChunkKey) -> bool {
        if !self.config.bounds.contains(key) || self.chunks.contains(&key) {
            return false;
        }
        if !self.queued.insert(key) {
            return false;
        }
        self.pending.push_back(key);
        true
    }

    /// Inserts a generated chunk, culls it and re-culls its loaded neighbours.
    ///
    /// # Returns
    /// `false`, leaving the world untouched, if the chunk's key is out of bounds or
    /// already loaded.
    pub fn insert_chunk(&mut self, chunk: Chunk) -> bool {
        let key = chunk.position;
        if !self.config.bounds.contains(key) || self.chunks.contains(&key) {
            return false;
        }

        if self.queued.remove(&key) {
            self.pending.retain(|pending| *pending != key);
        }

        self.chunks.put(key, chunk);
        self.cull_chunk(key);
        self.cull_neighbours(key);
        true
    }

    /// Removes a chunk and re-culls its loaded neighbours, whose boundary faces
    /// now border unloaded (air) space.
    pub fn unload_chunk(&mut self, key: ChunkKey) -> Option<Chunk> {
        let chunk = self.chunks.pop(&key)?;
        self.cull_neighbours(key);
        Some(chunk)
    }

    /// Recomputes the face masks of one loaded chunk against the current world.
    ///
    /// # Returns
    /// `false` if no chunk is loaded at `key`.
    pub fn cull_chunk(&mut self, key: ChunkKey) -> bool {
        let Some(chunk) = self.chunks.peek(&key) else {
            return false;
        };
        let masks = chunk.face_masks(&*self);

        match self.chunks.peek_mut(&key) {
            Some(chunk) => {
                chunk.apply_face_masks(masks);
                true
            }
            None => false,
        }
    }

    fn cull_neighbours(&mut self, key: ChunkKey) {
        for neighbour in key.neighbours() {
            self.cull_chunk(neighbour);
        }
    }
}

impl VoxelLookup for World {
    /// Looks up a voxel by world block coordinate.
    ///
    /// Never loads, mutates or promotes anything; unloaded and out-of-bounds
    /// positions read as [`Voxel::EMPTY`].
    fn voxel(&self, position: Point3<i32>) -> Voxel {
        let key = ChunkKey::containing(position);
        if !self.config.bounds.contains(key) {
            return Voxel::EMPTY;
        }

        self.chunks
            .peek(&key)
            .and_then(|chunk| {
                chunk.local_voxel(
                    position.x.rem_euclid(CHUNK_DIMENSION),
                    position.y.rem_euclid(CHUNK_DIMENSION),
                    position.z.rem_euclid(CHUNK_DIMENSION),
                )
            })
            .copied()
            .unwrap_or(Voxel::EMPTY)
    }
}
