//! # View Frustum
//!
//! The six clipping planes of a view-projection matrix, extracted with the
//! Gribb/Hartmann method, and the containment tests the world traversal uses to
//! decide whether a chunk is worth visiting.

use cgmath::{InnerSpace, Matrix, Matrix4, Point3, Vector4};

/// Decides whether an axis-aligned cube could be visible.
///
/// `false` means the cube is certainly outside and may be skipped; `true` means it
/// should be considered.
pub trait VisibilityTest {
    /// Tests the cube spanning `origin ..= origin + size` on every axis.
    fn contains_cube(&self, origin: Point3<f32>, size: f32) -> bool;
}

impl<F> VisibilityTest for F
where
    F: Fn(Point3<f32>, f32) -> bool,
{
    fn contains_cube(&self, origin: Point3<f32>, size: f32) -> bool {
        self(origin, size)
    }
}

/// Plane order inside [`Frustum::planes`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum FrustumPlane {
    RIGHT = 0,
    LEFT = 1,
    BOTTOM = 2,
    TOP = 3,
    FAR = 4,
    NEAR = 5,
}

/// Six planes `(a, b, c, d)` with `a·x + b·y + c·z + d > 0` on the inside.
///
/// Planes are normalised so the plane function yields true signed distances,
/// which the sphere test relies on.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Frustum {
    /// Indexed by [`FrustumPlane`]
    pub planes: [Vector4<f32>; 6],
}

impl Frustum {
    /// Extracts the planes from a combined `projection * view` matrix.
    pub fn from_matrix(clip: Matrix4<f32>) -> Self {
        let x = clip.row(0);
        let y = clip.row(1);
        let z = clip.row(2);
        let w = clip.row(3);

        let planes = [w - x, w + x, w + y, w - y, w - z, w + z].map(|plane| {
            let length = plane.truncate().magnitude();
            if length > 0.0 {
                plane / length
            } else {
                plane
            }
        });

        Frustum { planes }
    }

    /// Signed distance from one plane to a point.
    #[inline]
    pub fn distance(&self, plane: FrustumPlane, point: Point3<f32>) -> f32 {
        let p = self.planes[plane as usize];
        p.x * point.x + p.y * point.y + p.z * point.z + p.w
    }

    fn distances(&self, point: Point3<f32>) -> impl Iterator<Item = f32> + '_ {
        self.planes
            .iter()
            .map(move |p| p.x * point.x + p.y * point.y + p.z * point.z + p.w)
    }

    /// `true` if the point is strictly inside all six planes.
    pub fn contains_point(&self, point: Point3<f32>) -> bool {
        self.distances(point).all(|d| d > 0.0)
    }

    /// `true` unless the sphere lies entirely behind some plane.
    pub fn contains_sphere(&self, center: Point3<f32>, radius: f32) -> bool {
        self.distances(center).all(|d| d > -radius)
    }

    /// `true` unless all eight corners of the cube lie behind the same plane.
    ///
    /// Conservative: a large cube straddling two planes near a frustum corner can
    /// pass without actually intersecting the frustum.
    pub fn contains_cube(&self, origin: Point3<f32>, size: f32) -> bool {
        let corners = [
            Point3::new(origin.x, origin.y, origin.z),
            Point3::new(origin.x + size, origin.y, origin.z),
            Point3::new(origin.x, origin.y + size, origin.z),
            Point3::new(origin.x + size, origin.y + size, origin.z),
            Point3::new(origin.x, origin.y, origin.z + size),
            Point3::new(origin.x + size, origin.y, origin.z + size),
            Point3::new(origin.x, origin.y + size, origin.z + size),
            Point3::new(origin.x + size, origin.y + size, origin.z + size),
        ];

        self.planes.iter().all(|p| {
            corners
                .iter()
                .any(|c| p.x * c.x + p.y * c.y + p.z * c.z + p.w > 0.0)
        })
    }
}

impl VisibilityTest for Frustum {
    fn contains_cube(&self, origin: Point3<f32>, size: f32) -> bool {
        Frustum::contains_cube(self, origin, size)
    }
}
