//! Texture atlas addressing.
//!
//! Block textures live in a single 256×256 texel atlas split into a 16×16 grid of
//! 16×16-texel tiles. Tile indices run row-major from the top-left corner.

/// Width and height of the atlas in texels.
pub const ATLAS_SIZE: u32 = 256;
/// Width and height of a single tile in texels.
pub const TILE_SIZE: u32 = 16;
/// Number of tiles along one edge of the atlas.
pub const TILES_PER_ROW: u32 = ATLAS_SIZE / TILE_SIZE;

/// Normalised texture rectangle of one atlas tile.
///
/// `u` spans `[u0, u1)` and `v` spans `[v0, v1)`, where
/// `u0 = tile_x / 256` and `u1 = (tile_x + 16) / 256` (likewise for `v`).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AtlasUv {
    /// Left edge
    pub u0: f32,
    /// Top edge
    pub v0: f32,
    /// Right edge (exclusive)
    pub u1: f32,
    /// Bottom edge (exclusive)
    pub v1: f32,
}

impl AtlasUv {
    /// Looks up the texture rectangle for a tile index.
    pub fn for_tile(index: u8) -> Self {
        let index = index as u32;
        let tile_x = (index % TILES_PER_ROW) * TILE_SIZE;
        let tile_y = (index / TILES_PER_ROW) * TILE_SIZE;
        let atlas = ATLAS_SIZE as f32;

        AtlasUv {
            u0: tile_x as f32 / atlas,
            v0: tile_y as f32 / atlas,
            u1: (tile_x + TILE_SIZE) as f32 / atlas,
            v1: (tile_y + TILE_SIZE) as f32 / atlas,
        }
    }

    /// Texel-space offset of the tile's top-left corner.
    pub fn texel_offset(&self) -> (u32, u32) {
        (
            (self.u0 * ATLAS_SIZE as f32).round() as u32,
            (self.v0 * ATLAS_SIZE as f32).round() as u32,
        )
    }
}
