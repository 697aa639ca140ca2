//! # Chunk Key Module
//!
//! Chunk coordinates and the playable-volume predicate.
//!
//! A [`ChunkKey`] is a plain 3-tuple of chunk coordinates (not block coordinates).
//! It hashes and orders structurally, so there is no bit packing and therefore no
//! silent wraparound: coordinates outside the supported range are rejected by
//! [`WorldBounds`] instead of aliasing onto some other chunk.

use std::fmt;

use cgmath::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine_state::voxels::{block::block_side::BlockSide, chunk::CHUNK_DIMENSION};

/// Largest chunk coordinate magnitude whose block coordinates (origin plus one
/// chunk) still fit in an `i32`.
pub const MAX_CHUNK_COORDINATE: i32 = i32::MAX / CHUNK_DIMENSION - 1;

/// Errors raised when a chunk coordinate is used outside the world.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorldError {
    /// The key lies outside the configured world bounds.
    #[error("chunk {key} is outside the world bounds {bounds}")]
    OutOfBounds {
        /// The offending key
        key: ChunkKey,
        /// The bounds it was checked against
        bounds: WorldBounds,
    },
}

/// Integer coordinates of a chunk in the chunk grid.
///
/// Ordering is lexicographic on `(x, y, z)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkKey {
    /// Chunk X coordinate
    pub x: i32,
    /// Chunk Y coordinate
    pub y: i32,
    /// Chunk Z coordinate
    pub z: i32,
}

impl ChunkKey {
    /// Creates a key from raw chunk coordinates.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        ChunkKey { x, y, z }
    }

    /// `true` if every block of this chunk has an `i32` block coordinate.
    pub fn is_supported(&self) -> bool {
        let supported = -MAX_CHUNK_COORDINATE..=MAX_CHUNK_COORDINATE;
        supported.contains(&self.x) && supported.contains(&self.y) && supported.contains(&self.z)
    }

    /// The key of the chunk containing the given block coordinate.
    ///
    /// Uses floor division so that block `-1` belongs to chunk `-1`, not chunk `0`.
    pub fn containing(block: Point3<i32>) -> Self {
        ChunkKey {
            x: block.x.div_euclid(CHUNK_DIMENSION),
            y: block.y.div_euclid(CHUNK_DIMENSION),
            z: block.z.div_euclid(CHUNK_DIMENSION),
        }
    }

    /// The key of the chunk containing a world-space point, e.g. the camera.
    pub fn containing_point(point: Point3<f32>) -> Self {
        Self::containing(Point3::new(
            point.x.floor() as i32,
            point.y.floor() as i32,
            point.z.floor() as i32,
        ))
    }

    /// World-space block coordinate of this chunk's minimum corner.
    ///
    /// Only meaningful for [supported](ChunkKey::is_supported) keys.
    pub fn origin(&self) -> Point3<i32> {
        Point3::new(
            self.x * CHUNK_DIMENSION,
            self.y * CHUNK_DIMENSION,
            self.z * CHUNK_DIMENSION,
        )
    }

    /// Geometric centre of the chunk in world space.
    pub fn center(&self) -> Point3<f32> {
        let size = CHUNK_DIMENSION as f32;
        let half = size * 0.5;
        Point3::new(
            self.x as f32 * size + half,
            self.y as f32 * size + half,
            self.z as f32 * size + half,
        )
    }

    /// The key across the given face, or `None` if it would overflow.
    pub fn neighbour(&self, side: BlockSide) -> Option<ChunkKey> {
        let Vector3 { x, y, z } = side.offset();
        Some(ChunkKey {
            x: self.x.checked_add(x)?,
            y: self.y.checked_add(y)?,
            z: self.z.checked_add(z)?,
        })
    }

    /// All six axis neighbours in [`BlockSide::all`] order.
    pub fn neighbours(&self) -> impl Iterator<Item = ChunkKey> + '_ {
        BlockSide::all()
            .into_iter()
            .filter_map(move |side| self.neighbour(side))
    }
}

impl fmt::Display for ChunkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Inclusive box of chunk keys that make up the playable world.
///
/// The default world is wide in X/Z and shallow in Y.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldBounds {
    /// Smallest valid key on every axis
    pub min: ChunkKey,
    /// Largest valid key on every axis
    pub max: ChunkKey,
}

impl Default for WorldBounds {
    fn default() -> Self {
        WorldBounds {
            min: ChunkKey::new(-32, 0, -32),
            max: ChunkKey::new(31, 3, 31),
        }
    }
}

impl fmt::Display for WorldBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} ..= {}]", self.min, self.max)
    }
}

impl WorldBounds {
    /// Creates bounds from two inclusive corners.
    pub fn new(min: ChunkKey, max: ChunkKey) -> Self {
        WorldBounds { min, max }
    }

    /// `true` if the key lies inside the playable volume.
    ///
    /// Keys outside the supported coordinate range are never contained, whatever
    /// the bounds say.
    pub fn contains(&self, key: ChunkKey) -> bool {
        key.is_supported()
            && (self.min.x..=self.max.x).contains(&key.x)
            && (self.min.y..=self.max.y).contains(&key.y)
            && (self.min.z..=self.max.z).contains(&key.z)
    }

    /// Returns the key unchanged when it is inside the world, an error otherwise.
    pub fn validate(&self, key: ChunkKey) -> Result<ChunkKey, WorldError> {
        if self.contains(key) {
            Ok(key)
        } else {
            Err(WorldError::OutOfBounds { key, bounds: *self })
        }
    }

    /// `false` when some axis has `min > max`, i.e. the world would be empty.
    pub fn is_well_formed(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z
    }

    /// `false` when a corner lies outside the supported coordinate range.
    pub fn is_supported(&self) -> bool {
        self.min.is_supported() && self.max.is_supported()
    }

    /// Block-space centre of the playable volume.
    pub fn center(&self) -> Point3<f32> {
        let (min, max) = (self.min.center(), self.max.center());
        Point3::new(
            (min.x + max.x) * 0.5,
            (min.y + max.y) * 0.5,
            (min.z + max.z) * 0.5,
        )
    }

    /// Number of chunk keys inside the bounds.
    pub fn volume(&self) -> u64 {
        if !self.is_well_formed() {
            return 0;
        }
        let extent = |lo: i32, hi: i32| (hi as i64 - lo as i64 + 1) as u64;
        extent(self.min.x, self.max.x) * extent(self.min.y, self.max.y) * extent(self.min.z, self.max.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0, 0 ; "origin")]
    #[test_case(15, 0 ; "last block of first chunk")]
    #[test_case(16, 1 ; "first block of second chunk")]
    #[test_case(-1, -1 ; "negative rounds down")]
    #[test_case(-16, -1 ; "negative boundary")]
    #[test_case(-17, -2 ; "past negative boundary")]
    fn test_containing_uses_floor_division(block: i32, chunk: i32) {
        let key = ChunkKey::containing(Point3::new(block, block, block));
        assert_eq!(key, ChunkKey::new(chunk, chunk, chunk));
    }

    #[test]
    fn test_containing_point_floors_fractional_coordinates() {
        let key = ChunkKey::containing_point(Point3::new(-0.25, 15.99, 16.0));
        assert_eq!(key, ChunkKey::new(-1, 0, 1));
    }

    #[test]
    fn test_neighbours_follow_block_side_order() {
        let key = ChunkKey::new(1, 2, 3);
        let neighbours: Vec<_> = key.neighbours().collect();
        assert_eq!(
            neighbours,
            vec![
                ChunkKey::new(1, 3, 3),
                ChunkKey::new(1, 1, 3),
                ChunkKey::new(1, 2, 4),
                ChunkKey::new(1, 2, 2),
                ChunkKey::new(2, 2, 3),
                ChunkKey::new(0, 2, 3),
            ]
        );
    }

    #[test]
    fn test_neighbours_never_wrap() {
        let key = ChunkKey::new(i32::MAX, 0, 0);
        assert_eq!(key.neighbour(BlockSide::WEST), None);
        assert_eq!(key.neighbours().count(), 5);
    }

    #[test]
    fn test_bounds_validate_rejects_outside_keys() {
        let bounds = WorldBounds::new(ChunkKey::new(-1, 0, -1), ChunkKey::new(1, 0, 1));
        assert!(bounds.validate(ChunkKey::new(1, 0, -1)).is_ok());
        assert_eq!(
            bounds.validate(ChunkKey::new(0, 1, 0)),
            Err(WorldError::OutOfBounds {
                key: ChunkKey::new(0, 1, 0),
                bounds,
            })
        );
        assert_eq!(bounds.volume(), 9);
    }

    #[test]
    fn test_default_bounds_center_on_origin() {
        let center = WorldBounds::default().center();
        assert_eq!(center, Point3::new(0.0, 32.0, 0.0));
    }

    #[test]
    fn test_supported_range_keeps_block_coordinates_in_i32() {
        let edge = ChunkKey::new(MAX_CHUNK_COORDINATE, -MAX_CHUNK_COORDINATE, 0);
        assert!(edge.is_supported());
        let origin = edge.origin();
        assert!(origin.x.checked_add(CHUNK_DIMENSION).is_some());
        assert!(origin.y.checked_sub(CHUNK_DIMENSION).is_some());

        assert!(!ChunkKey::new(MAX_CHUNK_COORDINATE + 1, 0, 0).is_supported());
        assert!(!ChunkKey::new(0, 0, i32::MIN).is_supported());
    }

    #[test]
    fn test_contains_refuses_unsupported_keys() {
        let bounds = WorldBounds::new(ChunkKey::new(0, 0, 0), ChunkKey::new(i32::MAX, 0, 0));
        assert!(!bounds.is_supported());
        assert!(bounds.contains(ChunkKey::new(MAX_CHUNK_COORDINATE, 0, 0)));
        assert!(!bounds.contains(ChunkKey::new(MAX_CHUNK_COORDINATE + 1, 0, 0)));
        assert!(WorldBounds::default().is_supported());
    }

    #[test]
    fn test_inverted_bounds_are_empty() {
        let bounds = WorldBounds::new(ChunkKey::new(1, 0, 0), ChunkKey::new(0, 0, 0));
        assert!(!bounds.is_well_formed());
        assert_eq!(bounds.volume(), 0);
        assert!(!bounds.contains(ChunkKey::new(0, 0, 0)));
    }
}
