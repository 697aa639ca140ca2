//! # Engine State Module
//!
//! The core engine module that owns the simulation: the streamed voxel world, the
//! player body carrying the camera, and the camera's projection and frustum.
//!
//! ## Key Components
//!
//! * `EngineState` - The main state container for the engine
//! * `camera_state` - Camera pose, projection and frustum extraction
//! * `player` - Gravity and collision for the camera-carrying body
//! * `rendering` - Face quads, the texture atlas and the [`QuadSink`] seam
//! * `voxels` - Voxel data, chunks, terrain generation and the world traversal
//!
//! ## Frame
//!
//! Every frame runs the same phases in order: translated input moves the player,
//! the world streams in a bounded number of queued chunks, the frustum is refreshed
//! for the new pose, and the world is drawn from the eye outwards.

use log::info;

use camera_state::CameraState;
use player::{Player, PlayerInput};
use rendering::QuadSink;
use voxels::world::{TraversalStats, World};

use crate::application_state::{
    config::EngineConfig,
    input_state::{KeyCode, ProcessedInputState},
};

pub mod camera_state;
pub mod player;
pub mod rendering;
pub mod voxels;

/// The main state container for the voxel engine.
///
/// Input is handed over once per frame with [`EngineState::set_input_commands`]
/// and consumed by the next [`EngineState::process_frame`].
pub struct EngineState {
    /// Projection and frustum
    pub camera_state: CameraState,
    /// The camera-carrying physics body
    pub player: Player,
    /// The voxel world containing all chunk data
    pub world: World,
    /// Current player actions derived from input
    pub player_actions: PlayerAction,
    /// Set once a quit key was pressed
    exit_requested: bool,
}

impl EngineState {
    /// Creates a new engine state with all subsystems initialized.
    ///
    /// # Arguments
    /// * `config` - A validated engine configuration
    ///
    /// # Returns
    /// An engine with an empty world; chunks stream in around the spawn point
    /// over the following frames.
    pub fn new(config: &EngineConfig) -> Self {
        let camera = config.camera.spawn_camera();
        let camera_state = CameraState::new(config.camera.projection(), &camera);
        let player = Player::new(camera, config.physics.clone());
        let world = World::new(config.world.clone(), &config.generation);

        info!(
            "Engine created: bounds {}, {:?} terrain, spawn {:?}",
            world.bounds(),
            config.generation.method,
            config.camera.spawn
        );

        Self {
            camera_state,
            player,
            world,
            player_actions: PlayerAction::default(),
            exit_requested: false,
        }
    }

    /// Whether a quit key has been pressed.
    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// Sets the input commands for the engine state.
    ///
    /// # Arguments
    /// * `input` - The processed input state to use for setting commands
    pub fn set_input_commands(&mut self, input: ProcessedInputState) {
        self.player_actions = Self::translate_processed_input(&input);

        if self.player_actions.quit {
            info!("Exit requested");
            self.exit_requested = true;
        }
    }

    /// Translates the processed input state into player actions.
    ///
    /// # Arguments
    /// * `input` - The processed input state to translate
    ///
    /// # Returns
    /// A PlayerAction struct with the appropriate actions set
    fn translate_processed_input(input: &ProcessedInputState) -> PlayerAction {
        // Movement actions - active if key is pressed or held
        // One-shot actions - only trigger on press, not hold
        PlayerAction {
            move_forward: input.get_key_state(KeyCode::KeyW).is_active(),
            move_backward: input.get_key_state(KeyCode::KeyS).is_active(),
            move_left: input.get_key_state(KeyCode::KeyA).is_active(),
            move_right: input.get_key_state(KeyCode::KeyD).is_active(),
            jump: input.get_key_state(KeyCode::Space).is_active(),
            rotate_view: input.get_mouse_delta(),
            inspect: input.get_key_state(KeyCode::F3).is_just_pressed(),
            teleport_to_center: input.get_key_state(KeyCode::F6).is_just_pressed(),
            quit: input.get_key_state(KeyCode::F10).is_just_pressed()
                || input.get_key_state(KeyCode::Escape).is_just_pressed(),
        }
    }

    /// Runs one frame.
    ///
    /// # Arguments
    /// * `dt` - Frame time in seconds
    /// * `sink` - Receives the quads of every drawn chunk
    ///
    /// # Returns
    /// What the world traversal drew and queued
    pub fn process_frame(&mut self, dt: f32, sink: &mut impl QuadSink) -> TraversalStats {
        let actions = std::mem::take(&mut self.player_actions);

        if actions.teleport_to_center {
            let center = self.world.bounds().center();
            info!("Teleporting to world centre {:?}", center);
            self.player.camera.teleport(center);
            self.player.velocity_y = 0.0;
        }
        if actions.inspect {
            self.player.camera.inspect();
        }

        self.player.update(dt, &actions.to_player_input(), &self.world);
        self.world.update();

        let eye = self.player.position();
        let frustum = self.camera_state.refresh_frustum(&mut self.player.camera);
        self.world.draw(eye, frustum, sink)
    }
}

/// Represents player actions derived from input.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PlayerAction {
    /// Movement actions - true if key is pressed or held
    pub move_forward: bool,
    /// See `move_forward`
    pub move_backward: bool,
    /// See `move_forward`
    pub move_left: bool,
    /// See `move_forward`
    pub move_right: bool,
    /// Jump while the key is held (only takes effect when grounded)
    pub jump: bool,

    /// View rotation - Some if the mouse moved this frame
    pub rotate_view: Option<(f64, f64)>,

    /// Log the player pose
    pub inspect: bool,
    /// Move the player to the centre of the world
    pub teleport_to_center: bool,
    /// Stop the engine
    pub quit: bool,
}

impl PlayerAction {
    /// The continuous part of the actions, as physics input.
    pub fn to_player_input(&self) -> PlayerInput {
        let (mouse_dx, mouse_dy) = self.rotate_view.unwrap_or((0.0, 0.0));
        PlayerInput {
            forward: self.move_forward,
            backward: self.move_backward,
            left: self.move_left,
            right: self.move_right,
            jump: self.jump,
            mouse_dx: mouse_dx as f32,
            mouse_dy: mouse_dy as f32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application_state::input_manager::InputManager;
    use crate::engine_state::{
        rendering::DrawRecorder,
        voxels::{chunk::chunk_generation::GenerationMethod, world::chunk_key::ChunkKey},
    };

    const STEP: f32 = 1.0 / 60.0;

    fn small_config(method: GenerationMethod) -> EngineConfig {
        let mut config = EngineConfig::default();
        config.world.bounds.min = ChunkKey::new(-2, 0, -2);
        config.world.bounds.max = ChunkKey::new(1, 1, 1);
        config.world.loads_per_update = 8;
        config.generation.method = method;
        config.camera.spawn = [0.5, 20.0, 0.5];
        config
    }

    fn press(keys: &[KeyCode]) -> ProcessedInputState {
        let mut input = InputManager::new();
        for key in keys {
            input.intake_key(*key, true);
        }
        input.get_and_reset_processed_input()
    }

    #[test]
    fn test_translates_movement_and_one_shot_keys() {
        let input = press(&[KeyCode::KeyW, KeyCode::KeyD, KeyCode::F3]);
        let actions = EngineState::translate_processed_input(&input);

        assert!(actions.move_forward && actions.move_right);
        assert!(!actions.move_backward && !actions.move_left && !actions.jump);
        assert!(actions.inspect);
        assert!(!actions.teleport_to_center && !actions.quit);
    }

    #[test]
    fn test_one_shot_keys_ignore_hold() {
        let mut input = InputManager::new();
        input.intake_key(KeyCode::F6, true);
        input.get_and_reset_processed_input();
        let held = input.get_and_reset_processed_input();

        let actions = EngineState::translate_processed_input(&held);
        assert!(!actions.teleport_to_center);
    }

    #[test]
    fn test_mouse_delta_becomes_player_input() {
        let actions = PlayerAction {
            rotate_view: Some((10.0, -4.0)),
            jump: true,
            ..Default::default()
        };
        let input = actions.to_player_input();
        assert_eq!(input.mouse_dx, 10.0);
        assert_eq!(input.mouse_dy, -4.0);
        assert!(input.jump);
    }

    #[test]
    fn test_quit_keys_request_exit() {
        let mut engine = EngineState::new(&small_config(GenerationMethod::Empty));
        assert!(!engine.exit_requested());
        engine.set_input_commands(press(&[KeyCode::Escape]));
        assert!(engine.exit_requested());

        let mut engine = EngineState::new(&small_config(GenerationMethod::Empty));
        engine.set_input_commands(press(&[KeyCode::F10]));
        assert!(engine.exit_requested());
    }

    #[test]
    fn test_frames_stream_and_draw_the_world() {
        let mut engine = EngineState::new(&small_config(GenerationMethod::Solid));
        let mut sink = DrawRecorder::new();

        let first = engine.process_frame(STEP, &mut sink);
        assert!(first.drawn.is_empty());
        assert_eq!(first.queued, vec![ChunkKey::new(0, 1, 0)]);

        let mut drawn = 0;
        for _ in 0..20 {
            drawn = engine.process_frame(STEP, &mut sink).drawn.len();
        }
        assert!(drawn > 0);
        assert!(sink.total_quads > 0);
        assert!(engine.world.loaded_count() > 1);
    }

    #[test]
    fn test_player_falls_onto_world_floor() {
        let mut engine = EngineState::new(&small_config(GenerationMethod::Empty));
        let mut sink = DrawRecorder::new();

        for _ in 0..240 {
            engine.process_frame(STEP, &mut sink);
        }
        let feet_offset = engine.player.config().feet_offset;
        assert!((engine.player.position().y - feet_offset).abs() < 1e-3);
        assert_eq!(engine.player.velocity_y, 0.0);
    }

    #[test]
    fn test_teleport_moves_to_world_center() {
        let mut engine = EngineState::new(&small_config(GenerationMethod::Empty));
        let mut sink = DrawRecorder::new();
        engine.set_input_commands(press(&[KeyCode::F6]));
        engine.process_frame(STEP, &mut sink);

        let center = engine.world.bounds().center();
        let position = engine.player.position();
        assert_eq!(position.x, center.x);
        assert_eq!(position.z, center.z);
        // One frame of gravity at most.
        assert!(position.y <= center.y && position.y > center.y - 0.1);
    }

    #[test]
    fn test_walking_moves_forward() {
        let mut engine = EngineState::new(&small_config(GenerationMethod::Empty));
        let mut sink = DrawRecorder::new();
        let start = engine.player.position();

        engine.set_input_commands(press(&[KeyCode::KeyW]));
        engine.process_frame(STEP, &mut sink);

        let position = engine.player.position();
        assert!(position.z < start.z);
        assert!((position.x - start.x).abs() < 1e-5);
    }

    #[test]
    fn test_actions_are_consumed_by_the_frame() {
        let mut engine = EngineState::new(&small_config(GenerationMethod::Empty));
        let mut sink = DrawRecorder::new();
        engine.set_input_commands(press(&[KeyCode::KeyW]));
        engine.process_frame(STEP, &mut sink);
        assert_eq!(engine.player_actions, PlayerAction::default());
    }
}
