//! # Voxel Engine Core
//!
//! This module contains the voxel data model and the streaming world built on it.
//!
//! ## Architecture
//!
//! The voxel system is organized into several key components:
//!
//! * **Block**: Block types, face directions and the two-byte `Voxel` cell
//! * **Chunk**: Fixed-size 3D arrays of voxels, terrain generation and cached meshes
//! * **World**: Sparse chunk map, load queue, eviction and the visibility flood fill
//!
//! ## Data Flow
//!
//! 1. `World::draw` floods outwards from the camera and queues unloaded visible chunks
//! 2. `World::update` generates queued chunks and culls them and their neighbours
//! 3. The next `World::draw` rebuilds stale meshes and submits them
//!
//! Everything runs on the caller's thread, in that order, once per frame.

pub mod block;
pub mod chunk;
pub mod world;
