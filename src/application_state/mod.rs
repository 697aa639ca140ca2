//! # Application State Management
//!
//! This module drives the engine from the outside:
//! - Configuration loading
//! - Input collection and per-frame processing
//! - Frame timing
//! - The frame loop itself
//!
//! The driver here is headless. Input comes from a [`InputScript`] instead of a
//! window, and geometry goes to a [`DrawRecorder`] instead of a GPU; an embedding
//! application replaces both and keeps the same loop.

pub mod clock;
pub mod config;
pub mod input_manager;
pub mod input_state;

use log::{debug, info};

use clock::FrameClock;
use config::EngineConfig;
use input_manager::InputManager;
use input_state::KeyCode;

use crate::engine_state::{rendering::DrawRecorder, EngineState};

/// Scripted input for the headless driver: walk forward while slowly turning,
/// with a short pause every few seconds.
pub struct InputScript {
    /// Mouse motion fed every frame
    pub turn_per_frame: f64,
    /// Length of one walk/pause cycle in frames
    pub cycle: u32,
    /// Frames at the end of each cycle spent standing still
    pub pause: u32,
}

impl Default for InputScript {
    fn default() -> Self {
        InputScript {
            turn_per_frame: 2.0,
            cycle: 240,
            pause: 60,
        }
    }
}

impl InputScript {
    /// Feeds the input for one frame into the manager.
    pub fn drive(&self, frame: u32, input: &mut InputManager) {
        let walking = frame % self.cycle.max(1) < self.cycle.saturating_sub(self.pause);
        input.intake_key(KeyCode::KeyW, walking);
        input.intake_mouse_motion((self.turn_per_frame, 0.0));
    }
}

/// What a run of the frame loop did.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RunSummary {
    /// Frames processed
    pub frames: u32,
    /// Quads submitted over all frames
    pub total_quads: u64,
    /// Chunk submissions over all frames
    pub total_submissions: u64,
    /// Chunks loaded when the loop ended
    pub loaded_chunks: usize,
    /// Quads submitted in the last frame
    pub last_frame_quads: usize,
}

/// The engine plus everything the frame loop needs around it.
pub struct ApplicationState {
    /// The core engine state and logic
    pub engine_state: EngineState,
    /// Manages input state and event processing
    pub input_manager: InputManager,
    /// Frame timing
    pub clock: FrameClock,
    /// Geometry sink
    pub recorder: DrawRecorder,
    /// Input source
    pub script: InputScript,
    config: EngineConfig,
}

impl ApplicationState {
    /// Builds the engine for a configuration.
    pub fn new(config: EngineConfig) -> Self {
        ApplicationState {
            engine_state: EngineState::new(&config),
            input_manager: InputManager::new(),
            clock: FrameClock::new(),
            recorder: DrawRecorder::new(),
            script: InputScript::default(),
            config,
        }
    }

    /// Runs a single frame with the configured fixed time step, timing it on the
    /// wall clock.
    pub fn step(&mut self, frame: u32) {
        self.script.drive(frame, &mut self.input_manager);
        self.engine_state
            .set_input_commands(self.input_manager.get_and_reset_processed_input());

        let dt = self.config.simulation.time_step;
        self.recorder.begin_frame();
        let stats = self.engine_state.process_frame(dt, &mut self.recorder);

        let elapsed = self.clock.update();
        debug!(
            "Frame {}: {} chunks, {} quads, {} queued in {:?}",
            frame,
            stats.drawn.len(),
            self.recorder.frame_quads(),
            stats.queued.len(),
            elapsed
        );
    }

    /// Runs the configured number of frames, or until a quit key is pressed.
    pub fn run(&mut self) -> RunSummary {
        let mut frames = 0;
        while frames < self.config.simulation.frames && !self.engine_state.exit_requested() {
            self.step(frames);
            frames += 1;
        }

        let summary = RunSummary {
            frames,
            total_quads: self.recorder.total_quads,
            total_submissions: self.recorder.total_submissions,
            loaded_chunks: self.engine_state.world.loaded_count(),
            last_frame_quads: self.recorder.frame_quads(),
        };
        info!(
            "Ran {} frames ({:.1} fps wall clock): {} quads in {} chunk submissions, {} chunks loaded",
            summary.frames,
            self.clock.fps(),
            summary.total_quads,
            summary.total_submissions,
            summary.loaded_chunks
        );
        self.engine_state.player.camera.inspect();
        summary
    }
}
