//! # Voxel Streamer Entry Point
//!
//! Calls into the library's `run()`. Set `VOXEL_STREAMER_CONFIG` to a JSON file to
//! override the defaults and `RUST_LOG` to choose the log level.

fn main() {
    voxel_streamer::run();
}
