//! # Engine Configuration
//!
//! Every tunable of the engine in one serde document. A missing file, a missing
//! section or a missing field all fall back to the defaults, so a config file only
//! needs to name what it changes:
//!
//! ```text
//! {
//!     "world": { "loads_per_update": 4, "view_distance": 64.0 },
//!     "generation": { "method": "perlin", "seed": 7 }
//! }
//! ```

use std::path::{Path, PathBuf};

use cgmath::{Deg, Point3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine_state::{
    camera_state::camera::{Camera, Projection},
    player::PhysicsConfig,
    voxels::{
        chunk::chunk_generation::GenerationConfig,
        world::{chunk_key::MAX_CHUNK_COORDINATE, WorldConfig},
    },
};

/// Environment variable naming the JSON config file.
pub const CONFIG_ENV: &str = "VOXEL_STREAMER_CONFIG";

/// Errors raised while loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("could not read config file {path}: {source}")]
    Io {
        /// File that was requested
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
    /// The file is not a valid config document
    #[error("could not parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// The document parsed but describes an unusable engine
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Camera lens and spawn pose.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fovy: f32,
    /// Near clipping plane
    pub znear: f32,
    /// Far clipping plane
    pub zfar: f32,
    /// Viewport width / height
    pub aspect: f32,
    /// Eye position at start-up
    pub spawn: [f32; 3],
    /// Initial yaw in degrees
    pub yaw: f32,
    /// Initial pitch in degrees
    pub pitch: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        let projection = Projection::default();
        CameraConfig {
            fovy: projection.fovy,
            znear: projection.znear,
            zfar: projection.zfar,
            aspect: projection.aspect,
            spawn: [0.5, 40.0, 0.5],
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

impl CameraConfig {
    /// The projection these settings describe.
    pub fn projection(&self) -> Projection {
        Projection {
            aspect: self.aspect,
            fovy: self.fovy,
            znear: self.znear,
            zfar: self.zfar,
        }
    }

    /// A camera at the spawn pose.
    pub fn spawn_camera(&self) -> Camera {
        Camera::new(Point3::from(self.spawn), Deg(self.yaw), Deg(self.pitch))
    }
}

/// Settings for the headless frame loop.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of frames to run
    pub frames: u32,
    /// Fixed frame time in seconds
    pub time_step: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            frames: 600,
            time_step: 1.0 / 60.0,
        }
    }
}

/// The complete engine configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Chunk map and streaming
    pub world: WorldConfig,
    /// Terrain generation
    pub generation: GenerationConfig,
    /// Player body
    pub physics: PhysicsConfig,
    /// Lens and spawn
    pub camera: CameraConfig,
    /// Headless driver
    pub simulation: SimulationConfig,
}

impl EngineConfig {
    /// Loads the file named by [`CONFIG_ENV`], or the defaults when it is unset.
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_path(path),
            None => Ok(Self::default()),
        }
    }

    /// Reads and validates a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// Parses and validates a JSON config document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let bounds = &self.world.bounds;
        if !bounds.is_well_formed() {
            return Err(ConfigError::Invalid(format!("world bounds {} are inverted", bounds)));
        }
        if !bounds.is_supported() {
            return Err(ConfigError::Invalid(format!(
                "world bounds {} exceed the supported chunk range ±{}",
                bounds, MAX_CHUNK_COORDINATE
            )));
        }
        if self.world.loads_per_update == 0 {
            return Err(ConfigError::Invalid("loads_per_update must be at least 1".into()));
        }
        if self.world.max_loaded_chunks == 0 {
            return Err(ConfigError::Invalid("max_loaded_chunks must be at least 1".into()));
        }
        if self.simulation.time_step <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "time_step must be positive, got {}",
                self.simulation.time_step
            )));
        }
        if self.camera.znear <= 0.0 || self.camera.zfar <= self.camera.znear {
            return Err(ConfigError::Invalid(format!(
                "clip planes {}..{} are unusable",
                self.camera.znear, self.camera.zfar
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::{
        chunk::chunk_generation::GenerationMethod, world::chunk_key::ChunkKey,
    };
    use test_case::test_case;

    #[test]
    fn test_empty_document_is_default() {
        let config = EngineConfig::from_json_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config = EngineConfig::from_json_str(
            r#"{
                "world": { "loads_per_update": 4 },
                "generation": { "method": "perlin" },
                "camera": { "spawn": [1.0, 2.0, 3.0] }
            }"#,
        )
        .unwrap();

        assert_eq!(config.world.loads_per_update, 4);
        assert_eq!(config.world.max_loaded_chunks, WorldConfig::default().max_loaded_chunks);
        assert_eq!(config.generation.method, GenerationMethod::Perlin);
        assert_eq!(config.generation.seed, GenerationConfig::default().seed);
        assert_eq!(config.camera.spawn_camera().position, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(config.physics, PhysicsConfig::default());
    }

    #[test]
    fn test_default_camera_matches_default_projection() {
        assert_eq!(CameraConfig::default().projection(), Projection::default());
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let mut config = EngineConfig::default();
        config.world.bounds.min = ChunkKey::new(1, 0, 0);
        config.world.bounds.max = ChunkKey::new(0, 0, 0);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test_case(
        r#"{ "world": { "bounds": { "min": { "x": 200000000, "y": 0, "z": 0 }, "max": { "x": 200000001, "y": 0, "z": 0 } } } }"#
        ; "bounds beyond block coordinate range"
    )]
    #[test_case(r#"{ "world": { "loads_per_update": 0 } }"# ; "zero loads per update")]
    #[test_case(r#"{ "world": { "max_loaded_chunks": 0 } }"# ; "zero chunk budget")]
    #[test_case(r#"{ "simulation": { "time_step": 0.0 } }"# ; "zero time step")]
    #[test_case(r#"{ "simulation": { "time_step": -0.5 } }"# ; "negative time step")]
    #[test_case(r#"{ "camera": { "znear": 10.0, "zfar": 5.0 } }"# ; "inverted clip planes")]
    fn test_unusable_settings_rejected(json: &str) {
        assert!(matches!(
            EngineConfig::from_json_str(json),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        assert!(matches!(
            EngineConfig::from_json_str("{ world: "),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = EngineConfig::from_path("/nonexistent/voxel-streamer.json");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_generation_method_serializes_lowercase() {
        let json = serde_json::to_string(&EngineConfig::default()).unwrap();
        assert!(json.contains(r#""method":"radial""#));
    }
}
