//! # Block Module
//!
//! This module provides the single-cell voxel state used everywhere in the engine:
//! a compact block type plus a 6-bit mask recording which faces border transparent
//! space and therefore need to be rendered.

use block_side::BlockSide;
use block_type::BlockType;

pub mod block_side;
pub mod block_type;

/// The underlying integer type used to represent block types in memory.
pub type BlockTypeSize = u8;

/// Six face-visibility bits, indexed by [`BlockSide`] discriminant.
pub type FaceMask = u8;

/// Mask with every face bit set.
pub const ALL_FACES: FaceMask = 0b0011_1111;

/// Maps each block type to its atlas tile index for each face.
///
/// The outer array is indexed by `BlockType` as a `usize`.
/// The inner array follows the `BlockSide` order:
/// [Top, Bottom, North, South, West, East]
pub static BLOCK_TYPE_TO_TEXTURE_INDICES: [[u8; 6]; 5] = [
    [0, 0, 0, 0, 0, 0],       // AIR (never emitted)
    [2, 2, 2, 2, 2, 2],       // DIRT
    [0, 2, 3, 3, 3, 3],       // GRASS (top: 0, bottom: dirt, sides: 3)
    [1, 1, 1, 1, 1, 1],       // STONE
    [21, 21, 20, 20, 20, 20], // WOOD (rings on the caps, bark on the sides)
];

/// Represents a single voxel cell in the world.
///
/// # Memory Layout
/// Two bytes, no padding. Worlds hold millions of these, so the `#[repr(C)]`
/// layout is kept tight and `Pod` so chunk storage can be viewed as raw bytes.
#[repr(C)]
#[derive(Copy, Clone, Default, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct Voxel {
    /// The type of this voxel, encoded as a `BlockTypeSize`. Zero is air.
    pub block_type: BlockTypeSize,
    /// Faces bordering transparent space, one bit per [`BlockSide`].
    pub visible_faces: FaceMask,
}

impl Voxel {
    /// The read-only air voxel handed out for every query that falls outside the
    /// generated world. Lookups return it by value, so nothing can write through it.
    pub const EMPTY: Voxel = Voxel {
        block_type: BlockType::AIR as BlockTypeSize,
        visible_faces: 0,
    };

    /// Creates a new voxel of the specified type with no visible faces.
    pub fn new(block_type: BlockType) -> Self {
        Voxel {
            block_type: block_type as BlockTypeSize,
            visible_faces: 0,
        }
    }

    /// `true` for air.
    #[inline]
    pub fn is_transparent(&self) -> bool {
        self.block_type == BlockType::AIR as BlockTypeSize
    }

    /// `true` for anything the player collides with.
    #[inline]
    pub fn is_solid(&self) -> bool {
        !self.is_transparent()
    }

    /// Recomputes the visibility mask from the six neighbouring voxels.
    ///
    /// # Arguments
    /// * `neighbours` - The adjacent voxels, in [`BlockSide::all`] order
    ///
    /// A face is visible iff this voxel is solid and the neighbour across that
    /// face is transparent. Air voxels always end up with an empty mask.
    pub fn cull(&mut self, neighbours: [Voxel; 6]) {
        if self.is_transparent() {
            self.visible_faces = 0;
            return;
        }

        let mut mask = 0;
        for side in BlockSide::all() {
            if neighbours[side as usize].is_transparent() {
                mask |= side.bit();
            }
        }
        self.visible_faces = mask;
    }

    /// Whether the given face survived culling.
    #[inline]
    pub fn is_face_visible(&self, side: BlockSide) -> bool {
        self.visible_faces & side.bit() != 0
    }

    /// Whether any face of this voxel needs to be drawn.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.is_solid() && self.visible_faces != 0
    }

    /// Atlas tile index for one face of this voxel.
    ///
    /// Unknown block ids fall back to the first tile rather than panicking.
    pub fn texture_index(&self, side: BlockSide) -> u8 {
        BLOCK_TYPE_TO_TEXTURE_INDICES
            .get(self.block_type as usize)
            .map(|faces| faces[side as usize])
            .unwrap_or(0)
    }
}
