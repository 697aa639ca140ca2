//! # Camera Implementation
//!
//! This module contains the core camera implementation including:
//! - Camera pose (position, yaw and pitch in degrees) and movement
//! - View matrix calculation
//! - Perspective projection settings
//!
//! ## Conventions
//! - Right-handed, Y up
//! - Yaw 0 looks down -Z; positive yaw turns towards +X
//! - Positive pitch looks down; pitch is clamped to ±90°
//! - Yaw is kept within ±360°

use cgmath::*;
use log::info;
use serde::{Deserialize, Serialize};

/// Pitch limit in degrees.
pub const MAX_PITCH: f32 = 90.0;

/// Represents a first-person camera in 3D space.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// The camera's position in world space
    pub position: Point3<f32>,
    /// Horizontal rotation (around Y axis)
    pub yaw: Deg<f32>,
    /// Vertical rotation (around X axis)
    pub pitch: Deg<f32>,
    /// Set by every pose change, cleared by [`Camera::take_updated`]
    updated: bool,
}

impl Camera {
    /// Creates a new camera with the specified position and orientation.
    ///
    /// # Arguments
    /// * `position` - Initial position of the camera in world space. Can be any type that converts to `Point3<f32>`.
    /// * `yaw` - Initial yaw. Can be any type that converts to `Deg<f32>`.
    /// * `pitch` - Initial pitch. Can be any type that converts to `Deg<f32>`.
    ///
    /// # Returns
    /// A new `Camera` instance, flagged as updated so the first frustum refresh runs.
    pub fn new<V: Into<Point3<f32>>, Y: Into<Deg<f32>>, P: Into<Deg<f32>>>(
        position: V,
        yaw: Y,
        pitch: P,
    ) -> Self {
        let mut camera = Self {
            position: position.into(),
            yaw: Deg(0.0),
            pitch: Deg(0.0),
            updated: true,
        };
        camera.turn(yaw.into().0);
        camera.look(pitch.into().0);
        camera
    }

    /// Moves the camera to an absolute position.
    pub fn teleport(&mut self, position: Point3<f32>) {
        self.position = position;
        self.updated = true;
    }

    /// Moves along the horizontal facing direction; negative amounts walk backwards.
    pub fn walk(&mut self, amount: f32) {
        self.position += self.forward() * amount;
        self.updated = true;
    }

    /// Moves sideways; positive amounts go to the camera's right.
    pub fn strafe(&mut self, amount: f32) {
        self.position += self.right() * amount;
        self.updated = true;
    }

    /// Moves straight up (or down for negative amounts).
    pub fn ascend(&mut self, amount: f32) {
        self.position.y += amount;
        self.updated = true;
    }

    /// Adds to the yaw, wrapping it back into ±360°.
    ///
    /// Non-finite turns are ignored.
    pub fn turn(&mut self, degrees: f32) {
        let yaw = self.yaw.0 + degrees;
        if !yaw.is_finite() {
            return;
        }
        self.yaw = Deg(yaw % 360.0);
        self.updated = true;
    }

    /// Adds to the pitch, clamping it to ±90°.
    pub fn look(&mut self, degrees: f32) {
        self.pitch = Deg((self.pitch.0 + degrees).clamp(-MAX_PITCH, MAX_PITCH));
        self.updated = true;
    }

    /// Unit vector of the horizontal facing direction.
    pub fn forward(&self) -> Vector3<f32> {
        let (sin, cos) = Rad::from(self.yaw).0.sin_cos();
        Vector3::new(sin, 0.0, -cos)
    }

    /// Unit vector to the camera's right, in the horizontal plane.
    pub fn right(&self) -> Vector3<f32> {
        let (sin, cos) = Rad::from(self.yaw + Deg(90.0)).0.sin_cos();
        Vector3::new(sin, 0.0, -cos)
    }

    /// Calculates the view matrix for this camera.
    ///
    /// Pitch is applied after yaw, and both after moving the world so that the
    /// camera sits at the origin.
    ///
    /// # Returns
    /// A 4x4 view matrix
    pub fn calc_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_angle_x(self.pitch)
            * Matrix4::from_angle_y(self.yaw)
            * Matrix4::from_translation(-self.position.to_vec())
    }

    /// Returns whether the pose changed since the last call, and clears the flag.
    pub fn take_updated(&mut self) -> bool {
        std::mem::replace(&mut self.updated, false)
    }

    /// Logs the current pose.
    pub fn inspect(&self) {
        info!(
            "PLAYER {:.3} {:.3} {:.3} pitch {:.1} yaw {:.1}",
            self.position.x, self.position.y, self.position.z, self.pitch.0, self.yaw.0
        );
    }
}

/// Perspective projection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Projection {
    /// Aspect ratio (width / height)
    pub aspect: f32,
    /// Vertical field of view in degrees
    pub fovy: f32,
    /// Near clipping plane distance
    pub znear: f32,
    /// Far clipping plane distance
    pub zfar: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Projection {
            aspect: 640.0 / 480.0,
            fovy: 45.0,
            znear: 0.1,
            zfar: 500.0,
        }
    }
}

impl Projection {
    /// Creates a new projection.
    ///
    /// # Arguments
    /// * `width` - Viewport width in pixels
    /// * `height` - Viewport height in pixels
    /// * `fovy` - Vertical field of view (can be any type convertible to `Deg<f32>`)
    /// * `znear` - Near clipping plane distance
    /// * `zfar` - Far clipping plane distance
    pub fn new<F: Into<Deg<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: width as f32 / height.max(1) as f32,
            fovy: fovy.into().0,
            znear,
            zfar,
        }
    }

    /// Updates the projection's aspect ratio for viewport resizing.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    /// Calculates the projection matrix (OpenGL clip conventions, z in [-1, 1]).
    pub fn calc_matrix(&self) -> Matrix4<f32> {
        perspective(Deg(self.fovy), self.aspect, self.znear, self.zfar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use test_case::test_case;

    fn assert_close(actual: Point3<f32>, expected: Point3<f32>) {
        assert_relative_eq!(actual.x, expected.x, epsilon = 1e-4);
        assert_relative_eq!(actual.y, expected.y, epsilon = 1e-4);
        assert_relative_eq!(actual.z, expected.z, epsilon = 1e-4);
    }

    #[test_case(0.0, Vector3::new(0.0, 0.0, -1.0) ; "yaw 0 faces -z")]
    #[test_case(90.0, Vector3::new(1.0, 0.0, 0.0) ; "yaw 90 faces +x")]
    #[test_case(180.0, Vector3::new(0.0, 0.0, 1.0) ; "yaw 180 faces +z")]
    fn test_walk_follows_yaw(yaw: f32, expected: Vector3<f32>) {
        let mut camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Deg(yaw), Deg(0.0));
        camera.walk(2.0);
        assert_close(camera.position, Point3::from_vec(expected * 2.0));
    }

    #[test]
    fn test_strafe_goes_right() {
        let mut camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Deg(0.0), Deg(0.0));
        camera.strafe(1.0);
        assert_close(camera.position, Point3::new(1.0, 0.0, 0.0));
        camera.strafe(-1.0);
        camera.ascend(3.0);
        assert_close(camera.position, Point3::new(0.0, 3.0, 0.0));
    }

    #[test]
    fn test_turn_wraps_and_look_clamps() {
        let mut camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Deg(350.0), Deg(80.0));
        camera.turn(20.0);
        assert_relative_eq!(camera.yaw.0, 10.0, epsilon = 1e-4);
        camera.turn(-400.0);
        assert_relative_eq!(camera.yaw.0, -30.0, epsilon = 1e-4);

        camera.look(25.0);
        assert_eq!(camera.pitch, Deg(MAX_PITCH));
        camera.look(-500.0);
        assert_eq!(camera.pitch, Deg(-MAX_PITCH));
    }

    #[test]
    fn test_turn_wraps_huge_and_ignores_infinite_angles() {
        let mut camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Deg(1.0e10), Deg(0.0));
        assert!(camera.yaw.0.abs() < 360.0);

        let yaw = camera.yaw;
        camera.turn(f32::INFINITY);
        assert_eq!(camera.yaw, yaw);
        camera.turn(f32::NAN);
        assert_eq!(camera.yaw, yaw);

        camera.turn(-3.0e9);
        assert!(camera.yaw.0.abs() < 360.0);
    }

    #[test]
    fn test_view_matrix_puts_forward_in_front() {
        let camera = Camera::new(Point3::new(5.0, 2.0, 5.0), Deg(90.0), Deg(0.0));
        let ahead = camera.position + camera.forward() * 10.0;
        let view_space = camera.calc_matrix().transform_point(ahead);
        assert_close(view_space, Point3::new(0.0, 0.0, -10.0));
    }

    #[test]
    fn test_updated_flag_is_taken_once() {
        let mut camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Deg(0.0), Deg(0.0));
        assert!(camera.take_updated());
        assert!(!camera.take_updated());
        camera.teleport(Point3::new(1.0, 1.0, 1.0));
        assert!(camera.take_updated());
    }
}
