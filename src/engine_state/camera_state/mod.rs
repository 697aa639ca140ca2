//! # Camera State Management
//!
//! This module handles all camera-related functionality including:
//! - Camera position and orientation tracking
//! - View and projection matrix calculations
//! - Frustum extraction for chunk visibility
//!
//! ## Core Components
//! - `Camera`: Represents the camera's position and orientation in 3D space
//! - `Projection`: Manages the camera's projection matrix
//! - `Frustum`: Clipping planes consumed by the world traversal
//!
//! The frustum is only re-extracted when the camera pose or the projection changed
//! since the previous frame.

use cgmath::Matrix4;
use log::trace;

pub mod camera;
pub mod frustum;

use camera::{Camera, Projection};
use frustum::Frustum;

/// Projection plus the frustum derived from it and the current camera pose.
pub struct CameraState {
    /// Perspective settings
    pub projection: Projection,
    /// Clipping planes for the last refreshed pose
    frustum: Frustum,
    /// Set when the projection changed and the frustum must be rebuilt
    projection_dirty: bool,
}

impl CameraState {
    /// Creates the camera state and extracts the initial frustum.
    ///
    /// # Arguments
    /// * `projection` - The initial camera projection settings
    /// * `camera` - The camera whose pose defines the initial frustum
    pub fn new(projection: Projection, camera: &Camera) -> Self {
        let frustum = Frustum::from_matrix(Self::view_proj(&projection, camera));
        CameraState {
            projection,
            frustum,
            projection_dirty: false,
        }
    }

    fn view_proj(projection: &Projection, camera: &Camera) -> Matrix4<f32> {
        projection.calc_matrix() * camera.calc_matrix()
    }

    /// Updates the projection's aspect ratio for viewport resizing.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.projection.resize(width, height);
        self.projection_dirty = true;
    }

    /// Re-extracts the frustum if the camera moved or the projection changed.
    ///
    /// # Returns
    /// The up-to-date frustum
    pub fn refresh_frustum(&mut self, camera: &mut Camera) -> &Frustum {
        let camera_moved = camera.take_updated();
        if camera_moved || self.projection_dirty {
            trace!("Refreshing frustum");
            self.frustum = Frustum::from_matrix(Self::view_proj(&self.projection, camera));
            self.projection_dirty = false;
        }
        &self.frustum
    }

    /// The frustum as of the last refresh.
    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }
}
