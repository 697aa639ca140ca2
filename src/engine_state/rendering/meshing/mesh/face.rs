use cgmath::Point3;

use crate::engine_state::{
    rendering::{atlas::AtlasUv, Vertex},
    voxels::block::block_side::BlockSide,
};

/// A single textured quad: one visible face of one voxel.
///
/// Corners are in world space and wound counter-clockwise when viewed from outside
/// the voxel, so `(c1 - c0) × (c2 - c0)` points along the face normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    /// The four corners in drawing order
    pub corners: [Point3<f32>; 4],
    /// Atlas rectangle for this face
    pub uv: AtlasUv,
    /// Which side of the voxel this quad covers
    pub side: BlockSide,
}

impl Quad {
    /// Creates the quad for one face of a unit voxel.
    ///
    /// # Arguments
    /// * `origin` - World position of the voxel's minimum corner
    /// * `side` - Which face to build
    /// * `texture_index` - Atlas tile for the face
    pub fn new(origin: Point3<f32>, side: BlockSide, texture_index: u8) -> Self {
        let Point3 { x, y, z } = origin;
        let s = 1.0;

        let corners = match side {
            BlockSide::TOP => [
                Point3::new(x, y + s, z),
                Point3::new(x, y + s, z + s),
                Point3::new(x + s, y + s, z + s),
                Point3::new(x + s, y + s, z),
            ],
            BlockSide::BOTTOM => [
                Point3::new(x, y, z),
                Point3::new(x + s, y, z),
                Point3::new(x + s, y, z + s),
                Point3::new(x, y, z + s),
            ],
            BlockSide::NORTH => [
                Point3::new(x, y, z + s),
                Point3::new(x + s, y, z + s),
                Point3::new(x + s, y + s, z + s),
                Point3::new(x, y + s, z + s),
            ],
            BlockSide::SOUTH => [
                Point3::new(x, y, z),
                Point3::new(x, y + s, z),
                Point3::new(x + s, y + s, z),
                Point3::new(x + s, y, z),
            ],
            BlockSide::WEST => [
                Point3::new(x + s, y, z),
                Point3::new(x + s, y + s, z),
                Point3::new(x + s, y + s, z + s),
                Point3::new(x + s, y, z + s),
            ],
            BlockSide::EAST => [
                Point3::new(x, y, z),
                Point3::new(x, y, z + s),
                Point3::new(x, y + s, z + s),
                Point3::new(x, y + s, z),
            ],
        };

        Quad {
            corners,
            uv: AtlasUv::for_tile(texture_index),
            side,
        }
    }

    /// Expands the quad into four vertices carrying atlas coordinates.
    pub fn vertices(&self) -> [Vertex; 4] {
        let AtlasUv { u0, v0, u1, v1 } = self.uv;
        [
            Vertex::new(self.corners[0], u0, v1),
            Vertex::new(self.corners[1], u1, v1),
            Vertex::new(self.corners[2], u1, v0),
            Vertex::new(self.corners[3], u0, v0),
        ]
    }

    /// Index data for a quad, offset by the number of quads emitted before it.
    ///
    /// # Returns
    /// Six indices forming two triangles that keep the quad's winding.
    pub fn indices(num_quads_generated: u32) -> [u32; 6] {
        let base = num_quads_generated * 4;
        [base, base + 1, base + 2, base, base + 2, base + 3]
    }
}
