//! Vertex data structures for voxel rendering.
//!
//! This module defines the flat vertex format handed to the external renderer when
//! it wants interleaved data instead of [`Quad`](super::meshing::Quad)s.

use cgmath::Point3;

/// A vertex of a voxel face.
///
/// # Memory Layout
/// - Position: 3x f32 (12 bytes)
/// - Texture Coordinates: [f32; 2] (8 bytes)
///
/// Total size: 20 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in world space
    pub position: [f32; 3],
    /// Atlas texture coordinates (normalised 0.0-1.0)
    pub tex_coords: [f32; 2],
}

impl Vertex {
    /// Creates a new vertex.
    ///
    /// # Arguments
    /// * `pos` - The 3D position of the vertex in world space
    /// * `u` - U texture coordinate
    /// * `v` - V texture coordinate
    pub fn new(pos: Point3<f32>, u: f32, v: f32) -> Self {
        Vertex {
            position: [pos.x, pos.y, pos.z],
            tex_coords: [u, v],
        }
    }
}
