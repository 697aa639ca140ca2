//! # Player Physics
//!
//! The player is a camera with a body: an axis-aligned box hung around the eye
//! point that falls under gravity, lands on solid voxels, bumps its head on
//! ceilings and cannot walk through walls.
//!
//! ## Collision Box
//!
//! ```text
//!            +-----+  eye.y + head_offset
//!            |  o  |  eye
//!            |     |
//!            +-----+  eye.y - feet_offset
//!        eye.x - waist .. eye.x + waist  (same on z)
//! ```
//!
//! Motion is resolved one axis at a time: X, then Z, then Y. Each axis moves the
//! box, samples the voxel cells under the face that moved, and if any is solid
//! snaps the box flush against that cell and (for Y) zeroes the vertical velocity.

use cgmath::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use super::{
    camera_state::camera::Camera,
    voxels::world::VoxelLookup,
};

/// Tolerance used for grounding, alignment and face sampling.
pub const PHYSICS_EPSILON: f32 = 1e-3;

/// Largest vertical move resolved in one go, in blocks.
pub const MAX_VERTICAL_STEP: f32 = 0.5;

/// Tunables for the player body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Downward acceleration in blocks/s²
    pub gravity: f32,
    /// Most negative vertical velocity in blocks/s
    pub terminal_velocity: f32,
    /// Distance from the eye down to the feet
    pub feet_offset: f32,
    /// Distance from the eye up to the top of the head
    pub head_offset: f32,
    /// Half the body width on X and Z
    pub waist_half_width: f32,
    /// Horizontal speed in blocks/s
    pub walk_speed: f32,
    /// Degrees of rotation per unit of mouse motion
    pub look_speed: f32,
    /// Upward velocity given by a jump
    pub jump_velocity: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        PhysicsConfig {
            gravity: 12.0,
            terminal_velocity: -30.0,
            feet_offset: 1.5,
            head_offset: 0.2,
            waist_half_width: 0.3,
            walk_speed: 4.0,
            look_speed: 0.1,
            jump_velocity: 5.5,
        }
    }
}

/// Input sampled once per frame.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PlayerInput {
    /// Walk towards the facing direction
    pub forward: bool,
    /// Walk away from the facing direction
    pub backward: bool,
    /// Strafe left
    pub left: bool,
    /// Strafe right
    pub right: bool,
    /// Jump if grounded
    pub jump: bool,
    /// Relative mouse motion on X since the last frame
    pub mouse_dx: f32,
    /// Relative mouse motion on Y since the last frame
    pub mouse_dy: f32,
}

/// Axis-aligned box in world space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb {
    /// Minimum corner
    pub min: Point3<f32>,
    /// Maximum corner
    pub max: Point3<f32>,
}

impl Aabb {
    /// Integer cell range covered by `[lo, hi)` on one axis.
    fn cells(lo: f32, hi: f32) -> std::ops::RangeInclusive<i32> {
        (lo.floor() as i32)..=((hi - PHYSICS_EPSILON).floor() as i32)
    }
}

/// The camera-carrying physics body.
pub struct Player {
    /// Eye pose
    pub camera: Camera,
    /// Vertical velocity in blocks/s, positive up
    pub velocity_y: f32,
    config: PhysicsConfig,
}

impl Player {
    /// Creates a player at rest.
    pub fn new(camera: Camera, config: PhysicsConfig) -> Self {
        Player {
            camera,
            velocity_y: 0.0,
            config,
        }
    }

    /// The physics settings in use.
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// The eye position.
    pub fn position(&self) -> Point3<f32> {
        self.camera.position
    }

    /// Height of the bottom of the collision box.
    pub fn feet(&self) -> f32 {
        self.camera.position.y - self.config.feet_offset
    }

    /// The current collision box.
    pub fn bounding_box(&self) -> Aabb {
        let p = self.camera.position;
        let w = self.config.waist_half_width;
        Aabb {
            min: Point3::new(p.x - w, p.y - self.config.feet_offset, p.z - w),
            max: Point3::new(p.x + w, p.y + self.config.head_offset, p.z + w),
        }
    }

    /// Whether the feet rest on a solid voxel or on the world floor.
    pub fn is_grounded(&self, world: &impl VoxelLookup) -> bool {
        let feet = self.feet();
        if feet <= PHYSICS_EPSILON {
            return true;
        }
        let p = self.camera.position;
        let below = Point3::new(
            p.x.floor() as i32,
            (feet - PHYSICS_EPSILON).floor() as i32,
            p.z.floor() as i32,
        );
        world.voxel(below).is_solid()
    }

    /// Starts a jump if standing still on a voxel-aligned surface.
    ///
    /// # Returns
    /// `true` if the jump took effect.
    pub fn jump(&mut self, velocity: f32) -> bool {
        let feet = self.feet();
        let aligned = (feet - feet.round()).abs() < PHYSICS_EPSILON;
        if !aligned || self.velocity_y.abs() >= PHYSICS_EPSILON {
            return false;
        }
        self.velocity_y = velocity;
        true
    }

    /// Advances the body by one frame.
    ///
    /// # Arguments
    /// * `dt` - Frame time in seconds
    /// * `input` - Held keys and mouse motion for this frame
    /// * `world` - Voxels to collide against
    pub fn update(&mut self, dt: f32, input: &PlayerInput, world: &impl VoxelLookup) {
        let look_speed = self.config.look_speed;
        self.camera.turn(input.mouse_dx * look_speed);
        self.camera.look(input.mouse_dy * look_speed);

        let axis = |positive: bool, negative: bool| positive as i32 as f32 - negative as i32 as f32;
        let step = self.config.walk_speed * dt;
        let displacement = self.camera.forward() * axis(input.forward, input.backward) * step
            + self.camera.right() * axis(input.right, input.left) * step;

        if displacement.x != 0.0 {
            self.camera.position.x += displacement.x;
            self.solve_x(displacement.x, world);
        }
        if displacement.z != 0.0 {
            self.camera.position.z += displacement.z;
            self.solve_z(displacement.z, world);
        }

        if input.jump {
            self.jump(self.config.jump_velocity);
        }

        if !self.is_grounded(world) {
            self.velocity_y =
                (self.velocity_y - self.config.gravity * dt).max(self.config.terminal_velocity);
        }

        // Sub-step so a long frame cannot carry the box across a whole voxel.
        let dy = self.velocity_y * dt;
        let steps = (dy.abs() / MAX_VERTICAL_STEP).ceil() as u32;
        let step = dy / steps.max(1) as f32;
        for _ in 0..steps {
            self.camera.teleport(self.camera.position + Vector3::new(0.0, step, 0.0));
            self.solve_y(step, world);
            if self.velocity_y == 0.0 {
                break;
            }
        }
    }

    fn any_solid(
        world: &impl VoxelLookup,
        xs: std::ops::RangeInclusive<i32>,
        ys: std::ops::RangeInclusive<i32>,
        zs: std::ops::RangeInclusive<i32>,
    ) -> bool {
        xs.into_iter().any(|x| {
            ys.clone()
                .any(|y| zs.clone().any(|z| world.voxel(Point3::new(x, y, z)).is_solid()))
        })
    }

    /// Pushes the body out of any wall it moved into along X.
    pub fn solve_x(&mut self, dx: f32, world: &impl VoxelLookup) {
        let b = self.bounding_box();
        let w = self.config.waist_half_width;
        let ys = Aabb::cells(b.min.y, b.max.y);
        let zs = Aabb::cells(b.min.z, b.max.z);

        if dx > 0.0 {
            let cell = (b.max.x - PHYSICS_EPSILON).floor() as i32;
            if Self::any_solid(world, cell..=cell, ys, zs) {
                self.camera.position.x = cell as f32 - w;
            }
        } else if dx < 0.0 {
            let cell = b.min.x.floor() as i32;
            if Self::any_solid(world, cell..=cell, ys, zs) {
                self.camera.position.x = cell as f32 + 1.0 + w;
            }
        }
    }

    /// Pushes the body out of any wall it moved into along Z.
    pub fn solve_z(&mut self, dz: f32, world: &impl VoxelLookup) {
        let b = self.bounding_box();
        let w = self.config.waist_half_width;
        let xs = Aabb::cells(b.min.x, b.max.x);
        let ys = Aabb::cells(b.min.y, b.max.y);

        if dz > 0.0 {
            let cell = (b.max.z - PHYSICS_EPSILON).floor() as i32;
            if Self::any_solid(world, xs, ys, cell..=cell) {
                self.camera.position.z = cell as f32 - w;
            }
        } else if dz < 0.0 {
            let cell = b.min.z.floor() as i32;
            if Self::any_solid(world, xs, ys, cell..=cell) {
                self.camera.position.z = cell as f32 + 1.0 + w;
            }
        }
    }

    /// Lands on floors, bumps into ceilings and enforces the world floor at Y = 0.
    pub fn solve_y(&mut self, dy: f32, world: &impl VoxelLookup) {
        let b = self.bounding_box();
        let xs = Aabb::cells(b.min.x, b.max.x);
        let zs = Aabb::cells(b.min.z, b.max.z);

        if dy < 0.0 {
            let cell = b.min.y.floor() as i32;
            if Self::any_solid(world, xs, cell..=cell, zs) {
                self.camera.position.y = cell as f32 + 1.0 + self.config.feet_offset;
                self.velocity_y = 0.0;
            }
        } else if dy > 0.0 {
            let cell = (b.max.y - PHYSICS_EPSILON).floor() as i32;
            if Self::any_solid(world, xs, cell..=cell, zs) {
                self.camera.position.y = cell as f32 - self.config.head_offset;
                self.velocity_y = 0.0;
            }
        }

        if self.feet() < 0.0 {
            self.camera.position.y = self.config.feet_offset;
            self.velocity_y = self.velocity_y.max(0.0);
        }
    }
}
