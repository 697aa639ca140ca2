#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Streamer
//!
//! A chunked voxel world that streams itself in around a first-person camera.
//!
//! The world is split into 16³ chunks inside fixed bounds. Each frame a
//! breadth-first flood from the camera's chunk draws every visible loaded chunk
//! and queues the visible unloaded ones; a bounded number of queued chunks is
//! generated per frame, face-culled against their neighbours and, once a chunk
//! budget is reached, the least recently drawn chunks are evicted. A player body
//! carries the camera with gravity and axis-separated voxel collision.
//!
//! ## Key Modules
//!
//! * `application_state` - Configuration, input, frame timing and the frame loop
//! * `engine_state` - The world, the player, the camera and the rendering seam
//!
//! ## Usage
//!
//! ```text
//! VOXEL_STREAMER_CONFIG=world.json RUST_LOG=info cargo run --release
//! ```

use log::{info, warn};

use application_state::{config::EngineConfig, ApplicationState};

pub mod application_state;
pub mod engine_state;

/// Initialises logging, loads the configuration and runs the headless frame loop.
///
/// An unreadable or invalid configuration is reported and replaced by the defaults.
pub fn run() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let config = EngineConfig::load().unwrap_or_else(|error| {
        warn!("{}; falling back to the default configuration", error);
        EngineConfig::default()
    });

    let mut state = ApplicationState::new(config);
    state.run();
}
