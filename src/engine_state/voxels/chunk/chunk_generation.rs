//! # Chunk Generation Module
//!
//! Procedural population of freshly created chunks.
//!
//! Several strategies are supported:
//! - `radial`: flat ground below the world's mid-height plus a random scatter of
//!   blocks whose density grows with distance from the world centre
//! - `perlin`: 3-D Perlin noise biased towards a ground plane
//! - `solid`: every block filled (testing)
//! - `empty`: every block air (testing)
//!
//! Every strategy is deterministic for a given seed and chunk key, so a chunk that
//! is evicted and later reloaded comes back identical.

use cgmath::Point3;
use noise::{NoiseFn, Perlin};
use serde::{Deserialize, Serialize};

use crate::engine_state::voxels::{
    block::block_type::BlockType,
    world::chunk_key::{ChunkKey, WorldBounds},
};

use super::CHUNK_DIMENSION;

/// Scaling factor applied to world coordinates when sampling Perlin noise.
pub const PERLIN_SCALE_FACTOR: f64 = 0.02;
/// Vertical distance over which the Perlin ground bias goes from +1 to -1.
pub const PERLIN_GROUND_FALLOFF: f64 = 24.0;
/// Radius (in blocks) of the random scatter around the world centre.
pub const RADIAL_SCATTER_RADIUS: f32 = 48.0;
/// Depth below the surface at which generated terrain turns to stone.
pub const STONE_DEPTH: i32 = 4;

/// The method used to generate new chunks.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMethod {
    /// Ground plane plus a centre-distance driven random scatter
    Radial,
    /// Ground-biased 3-D Perlin noise
    Perlin,
    /// Completely solid chunks
    Solid,
    /// Completely empty chunks
    Empty,
}

/// Settings for the terrain generator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Which generation strategy to run
    pub method: GenerationMethod,
    /// Seed shared by every strategy
    pub seed: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        GenerationConfig {
            method: GenerationMethod::Radial,
            seed: 0x5eed,
        }
    }
}

/// Deterministic terrain source consulted whenever a chunk is created.
pub struct TerrainGenerator {
    method: GenerationMethod,
    seed: u64,
    perlin: Perlin,
    /// Block-space centre of the world bounds
    center: Point3<f32>,
}

impl TerrainGenerator {
    /// Creates a generator for a world with the given bounds.
    ///
    /// The bounds are only used to locate the world centre, which anchors the
    /// radial strategy and the Perlin ground plane.
    pub fn new(config: &GenerationConfig, bounds: &WorldBounds) -> Self {
        TerrainGenerator {
            method: config.method,
            seed: config.seed,
            perlin: Perlin::new(config.seed as u32),
            center: bounds.center(),
        }
    }

    /// The strategy this generator runs.
    pub fn method(&self) -> GenerationMethod {
        self.method
    }

    /// Produces the block types for one chunk, in chunk storage order
    /// (x fastest, then y, then z).
    pub fn generate(&self, key: ChunkKey) -> Vec<BlockType> {
        let mut rng = fastrand::Rng::with_seed(self.chunk_seed(key));
        let origin = key.origin();
        let mut blocks = Vec::with_capacity(super::CHUNK_SIZE);

        for k in 0..CHUNK_DIMENSION {
            for j in 0..CHUNK_DIMENSION {
                for i in 0..CHUNK_DIMENSION {
                    let position = Point3::new(origin.x + i, origin.y + j, origin.z + k);
                    blocks.push(self.block_at(position, &mut rng));
                }
            }
        }

        blocks
    }

    fn block_at(&self, position: Point3<i32>, rng: &mut fastrand::Rng) -> BlockType {
        match self.method {
            GenerationMethod::Radial => self.radial(position, rng),
            GenerationMethod::Perlin => self.perlin(position),
            GenerationMethod::Solid => BlockType::DIRT,
            GenerationMethod::Empty => BlockType::AIR,
        }
    }

    fn radial(&self, position: Point3<i32>, rng: &mut fastrand::Rng) -> BlockType {
        let xp = position.x as f32 + 0.5;
        let yp = position.y as f32 + 0.5;
        let zp = position.z as f32 + 0.5;

        let ground = self.center.y - 1.0;
        if yp <= ground {
            return if yp <= ground - STONE_DEPTH as f32 {
                BlockType::STONE
            } else if yp > ground - 1.0 {
                BlockType::GRASS
            } else {
                BlockType::DIRT
            };
        }

        let dx = xp - self.center.x;
        let dy = yp - self.center.y;
        let dz = zp - self.center.z;
        let dist = dx * dx + dy * dy + dz * dz;
        let radius_sq = RADIAL_SCATTER_RADIUS * RADIAL_SCATTER_RADIUS;
        if dist >= radius_sq {
            return BlockType::AIR;
        }

        // Denser towards the rim of the scatter sphere.
        let value = (dist / radius_sq * 1000.0) as u32;
        if rng.u32(0..1000) < value / 4 {
            BlockType::random_solid(rng)
        } else {
            BlockType::AIR
        }
    }

    fn perlin(&self, position: Point3<i32>) -> BlockType {
        if self.perlin_density(position) <= 0.0 {
            return BlockType::AIR;
        }

        let above = Point3::new(position.x, position.y + 1, position.z);
        if self.perlin_density(above) <= 0.0 {
            return BlockType::GRASS;
        }

        let deep = Point3::new(position.x, position.y + STONE_DEPTH, position.z);
        if self.perlin_density(deep) > 0.0 {
            BlockType::STONE
        } else {
            BlockType::DIRT
        }
    }

    fn perlin_density(&self, position: Point3<i32>) -> f64 {
        let sample = self.perlin.get([
            position.x as f64 * PERLIN_SCALE_FACTOR,
            position.y as f64 * PERLIN_SCALE_FACTOR,
            position.z as f64 * PERLIN_SCALE_FACTOR,
        ]);
        let height_bias = (self.center.y as f64 - position.y as f64) / PERLIN_GROUND_FALLOFF;
        sample + height_bias
    }

    /// Mixes the world seed with the chunk key (splitmix64 finaliser).
    fn chunk_seed(&self, key: ChunkKey) -> u64 {
        let mut h = self.seed
            ^ (key.x as u32 as u64)
            ^ ((key.y as u32 as u64) << 21)
            ^ ((key.z as u32 as u64) << 42);
        h = (h ^ (h >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        h = (h ^ (h >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        h ^ (h >> 31)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn generator(method: GenerationMethod) -> TerrainGenerator {
        TerrainGenerator::new(
            &GenerationConfig { method, seed: 42 },
            &WorldBounds::new(ChunkKey::new(-2, 0, -2), ChunkKey::new(1, 3, 1)),
        )
    }

    #[test_case(GenerationMethod::Radial)]
    #[test_case(GenerationMethod::Perlin)]
    fn test_generation_is_deterministic(method: GenerationMethod) {
        let generator = generator(method);
        let key = ChunkKey::new(-1, 1, 0);
        assert_eq!(generator.generate(key), generator.generate(key));
    }

    #[test_case(GenerationMethod::Radial)]
    #[test_case(GenerationMethod::Perlin)]
    fn test_generation_mixes_solid_and_air(method: GenerationMethod) {
        let generator = generator(method);
        // The world centre sits at block y = 32, so chunk y = 1 straddles the ground.
        let mut solid = 0;
        let mut air = 0;
        for key in [ChunkKey::new(-1, 1, -1), ChunkKey::new(0, 1, 0), ChunkKey::new(0, 2, 0)] {
            for block in generator.generate(key) {
                if block.is_transparent() {
                    air += 1;
                } else {
                    solid += 1;
                }
            }
        }
        assert!(solid > 0, "expected some solid blocks");
        assert!(air > 0, "expected some air blocks");
    }

    #[test]
    fn test_radial_ground_is_planar() {
        let generator = generator(GenerationMethod::Radial);
        let blocks = generator.generate(ChunkKey::new(0, 0, 0));
        // Chunk 0 lies entirely below the ground plane at y = 31.
        assert!(blocks.iter().all(|b| !b.is_transparent()));
    }

    #[test]
    fn test_solid_and_empty_methods() {
        let key = ChunkKey::new(0, 0, 0);
        assert!(generator(GenerationMethod::Solid)
            .generate(key)
            .iter()
            .all(|b| *b == BlockType::DIRT));
        assert!(generator(GenerationMethod::Empty)
            .generate(key)
            .iter()
            .all(|b| b.is_transparent()));
    }

    #[test]
    fn test_different_chunks_get_different_seeds() {
        let generator = generator(GenerationMethod::Radial);
        assert_ne!(
            generator.chunk_seed(ChunkKey::new(0, 0, 0)),
            generator.chunk_seed(ChunkKey::new(1, 0, 0))
        );
    }
}
