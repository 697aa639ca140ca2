//! # Block Side Module
//!
//! This module defines the six faces of a voxel and the order in which they are
//! stored in a voxel's visibility mask. The same order is used by the culling pass
//! that writes the mask and by the mesher that reads it back, so the two can never
//! disagree about which bit belongs to which face.

use cgmath::Vector3;

/// Represents the six possible faces of a voxel block.
///
/// Each variant's discriminant is the bit index used in
/// [`FaceMask`](super::FaceMask). The order is:
/// [TOP, BOTTOM, NORTH, SOUTH, WEST, EAST]
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The top face (facing positive Y)
    TOP = 0,

    /// The bottom face (facing negative Y)
    BOTTOM = 1,

    /// The north face (facing positive Z)
    NORTH = 2,

    /// The south face (facing negative Z)
    SOUTH = 3,

    /// The west face (facing positive X)
    WEST = 4,

    /// The east face (facing negative X)
    EAST = 5,
}

impl BlockSide {
    /// Returns an array containing all six block faces in mask order.
    ///
    /// This is useful for iterating over all possible faces of a block.
    /// The order is: [TOP, BOTTOM, NORTH, SOUTH, WEST, EAST]
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::TOP,
            BlockSide::BOTTOM,
            BlockSide::NORTH,
            BlockSide::SOUTH,
            BlockSide::WEST,
            BlockSide::EAST,
        ]
    }

    /// Unit offset from a voxel to the neighbour sharing this face.
    pub fn offset(self) -> Vector3<i32> {
        match self {
            BlockSide::TOP => Vector3::new(0, 1, 0),
            BlockSide::BOTTOM => Vector3::new(0, -1, 0),
            BlockSide::NORTH => Vector3::new(0, 0, 1),
            BlockSide::SOUTH => Vector3::new(0, 0, -1),
            BlockSide::WEST => Vector3::new(1, 0, 0),
            BlockSide::EAST => Vector3::new(-1, 0, 0),
        }
    }

    /// The face on the neighbouring voxel that touches this one.
    pub fn opposite(self) -> BlockSide {
        match self {
            BlockSide::TOP => BlockSide::BOTTOM,
            BlockSide::BOTTOM => BlockSide::TOP,
            BlockSide::NORTH => BlockSide::SOUTH,
            BlockSide::SOUTH => BlockSide::NORTH,
            BlockSide::WEST => BlockSide::EAST,
            BlockSide::EAST => BlockSide::WEST,
        }
    }

    /// The single bit representing this face inside a visibility mask.
    #[inline]
    pub fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits_are_distinct_and_fit_in_six() {
        let mut seen = 0u8;
        for side in BlockSide::all() {
            assert_eq!(seen & side.bit(), 0);
            seen |= side.bit();
        }
        assert_eq!(seen, 0b0011_1111);
    }

    #[test]
    fn test_opposite_offsets_cancel() {
        for side in BlockSide::all() {
            assert_eq!(side.offset() + side.opposite().offset(), Vector3::new(0, 0, 0));
            assert_eq!(side.opposite().opposite(), side);
        }
    }
}
