//! # Block Type Module
//!
//! This module defines the different types of blocks in the voxel world and the
//! conversion between the compact on-voxel integer and the rich enum.

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

use super::BlockTypeSize;

/// Enumerates all possible block types in the voxel world.
///
/// The `FromPrimitive` derive allows conversion from the `BlockTypeSize` stored
/// inside every [`Voxel`](super::Voxel).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
pub enum BlockType {
    /// An air block, which is non-solid and transparent.
    AIR = 0,

    /// A basic dirt block.
    DIRT = 1,

    /// A grass block with different textures on top and sides.
    GRASS = 2,

    /// A stone block, used for the deep layers of generated terrain.
    STONE = 3,

    /// A wooden block with a bark texture on all sides.
    WOOD = 4,
}

impl BlockType {
    /// Converts a `BlockTypeSize` to a `BlockType`.
    ///
    /// Unknown values map to `None` so that callers can decide how to treat
    /// corrupted or future block ids.
    pub fn from_int(btype: BlockTypeSize) -> Option<Self> {
        FromPrimitive::from_u8(btype)
    }

    /// Picks a random solid block type (never `BlockType::AIR`) from the given generator.
    pub fn random_solid(rng: &mut fastrand::Rng) -> Self {
        Self::from_int(rng.u8(1..=4)).unwrap_or(BlockType::DIRT)
    }

    /// Whether this block lets light (and the camera) through.
    pub fn is_transparent(self) -> bool {
        self == BlockType::AIR
    }
}
