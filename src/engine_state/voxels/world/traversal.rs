//! Breadth-first visibility traversal.
//!
//! Drawing starts at the chunk containing the eye and floods outwards through
//! axis neighbours. Only loaded, visible chunks propagate the flood; visible keys
//! that are not loaded yet are queued for streaming and stop there, so the set of
//! loaded chunks grows outwards from the camera a few chunks per frame.

use std::collections::VecDeque;

use cgmath::{MetricSpace, Point3};
use log::trace;

use crate::engine_state::{camera_state::frustum::VisibilityTest, rendering::QuadSink};

use super::{chunk_key::ChunkKey, World};
use crate::engine_state::voxels::chunk::CHUNK_DIMENSION;

/// What one call to [`World::draw`] did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TraversalStats {
    /// Chunks submitted to the sink, in visiting order
    pub drawn: Vec<ChunkKey>,
    /// Keys newly added to the load queue
    pub queued: Vec<ChunkKey>,
    /// Number of visibility tests performed
    pub visibility_tests: usize,
}

impl World {
    /// Draws every reachable visible chunk and queues reachable unloaded ones.
    ///
    /// # Arguments
    /// * `eye` - World-space camera position, where the flood starts
    /// * `visibility` - Cube test (usually the camera frustum)
    /// * `sink` - Receives the quads of each drawn chunk
    ///
    /// Each chunk is submitted at most once per call. The chunk map itself is never
    /// changed here; drawing only rebuilds stale meshes and promotes recency.
    pub fn draw(
        &mut self,
        eye: Point3<f32>,
        visibility: &impl VisibilityTest,
        sink: &mut impl QuadSink,
    ) -> TraversalStats {
        self.generation += 1;
        let generation = self.generation;

        let mut stats = TraversalStats::default();
        let mut frontier = VecDeque::new();
        frontier.push_back(ChunkKey::containing_point(eye));

        while let Some(key) = frontier.pop_front() {
            let drawn_already = self
                .chunks
                .peek(&key)
                .is_some_and(|chunk| chunk.last_drawn() == generation);
            if drawn_already || !self.config.bounds.contains(key) {
                continue;
            }

            stats.visibility_tests += 1;
            if !self.is_visible(key, eye, visibility) {
                continue;
            }

            match self.chunks.get_mut(&key) {
                Some(chunk) => {
                    if chunk.draw(generation, sink) {
                        stats.drawn.push(key);
                        frontier.extend(key.neighbours());
                    }
                }
                None => {
                    if self.request_load(key) {
                        stats.queued.push(key);
                    }
                }
            }
        }

        trace!(
            "Draw {}: {} chunks drawn, {} queued, {} visibility tests",
            generation,
            stats.drawn.len(),
            stats.queued.len(),
            stats.visibility_tests
        );
        stats
    }

    fn is_visible(&self, key: ChunkKey, eye: Point3<f32>, visibility: &impl VisibilityTest) -> bool {
        if key.center().distance(eye) > self.config.view_distance {
            return false;
        }

        let origin = key.origin();
        visibility.contains_cube(
            Point3::new(origin.x as f32, origin.y as f32, origin.z as f32),
            CHUNK_DIMENSION as f32,
        )
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::BTreeSet;

    use super::*;
    use crate::engine_state::{
        rendering::DrawRecorder,
        voxels::{block::block_type::BlockType, chunk::Chunk, world::tests::empty_world},
    };

    fn everything(_origin: Point3<f32>, _size: f32) -> bool {
        true
    }

    fn stream_everything(world: &mut World, eye: Point3<f32>) {
        let mut sink = DrawRecorder::new();
        for _ in 0..32 {
            world.draw(eye, &everything, &mut sink);
            world.update();
        }
    }

    #[test]
    fn test_first_draw_only_queues_the_eye_chunk() {
        let mut world = empty_world(ChunkKey::new(-2, 0, -2), ChunkKey::new(2, 1, 2));
        let mut sink = DrawRecorder::new();
        let stats = world.draw(Point3::new(1.0, 1.0, 1.0), &everything, &mut sink);

        assert!(stats.drawn.is_empty());
        assert_eq!(stats.queued, vec![ChunkKey::new(0, 0, 0)]);
        assert_eq!(stats.visibility_tests, 1);
        assert_eq!(world.loaded_count(), 0);
    }

    #[test]
    fn test_streaming_fills_the_bounds() {
        let mut world = empty_world(ChunkKey::new(-1, 0, -1), ChunkKey::new(1, 1, 1));
        stream_everything(&mut world, Point3::new(8.0, 8.0, 8.0));
        assert_eq!(world.loaded_count() as u64, world.bounds().volume());
        assert_eq!(world.pending().count(), 0);
    }

    #[test]
    fn test_drawing_twice_is_idempotent() {
        let mut world = empty_world(ChunkKey::new(-1, 0, -1), ChunkKey::new(1, 1, 1));
        let eye = Point3::new(8.0, 8.0, 8.0);
        stream_everything(&mut world, eye);
        let before: BTreeSet<_> = world.loaded_keys().collect();

        let mut sink = DrawRecorder::new();
        let first = world.draw(eye, &everything, &mut sink);
        let second = world.draw(eye, &everything, &mut sink);

        assert_eq!(
            first.drawn.iter().collect::<BTreeSet<_>>(),
            second.drawn.iter().collect::<BTreeSet<_>>()
        );
        assert_eq!(first.drawn.len(), before.len());
        // No chunk submitted twice in one draw.
        assert_eq!(
            first.drawn.iter().collect::<BTreeSet<_>>().len(),
            first.drawn.len()
        );
        assert!(second.queued.is_empty());
        assert_eq!(world.loaded_keys().collect::<BTreeSet<_>>(), before);
        assert_eq!(sink.total_submissions, 2 * before.len() as u64);
    }

    #[test]
    fn test_traversal_stops_at_invisible_chunks() {
        let mut world = empty_world(ChunkKey::new(-3, 0, 0), ChunkKey::new(3, 0, 0));
        for x in -3..=3 {
            world.insert_chunk(Chunk::filled(ChunkKey::new(x, 0, 0), BlockType::STONE));
        }

        let tested = RefCell::new(Vec::new());
        let left_half = |origin: Point3<f32>, _size: f32| {
            tested.borrow_mut().push(origin.x as i32 / CHUNK_DIMENSION);
            origin.x < 0.0
        };

        let mut sink = DrawRecorder::new();
        let stats = world.draw(Point3::new(-8.0, 8.0, 8.0), &left_half, &mut sink);

        let drawn: BTreeSet<_> = stats.drawn.iter().map(|key| key.x).collect();
        assert_eq!(drawn, BTreeSet::from([-3, -2, -1]));
        // Chunk 0 was tested and rejected; nothing beyond it was ever considered.
        let tested = tested.into_inner();
        assert!(tested.contains(&0));
        assert!(tested.iter().all(|x| *x <= 0));
        assert_eq!(sink.frame.len(), 3);
    }

    #[test]
    fn test_traversal_does_not_expand_from_unloaded_chunks() {
        let mut world = empty_world(ChunkKey::new(0, 0, 0), ChunkKey::new(3, 0, 0));
        world.insert_chunk(Chunk::empty(ChunkKey::new(0, 0, 0)));
        // Chunk 2 is loaded, but only reachable through the unloaded chunk 1.
        world.insert_chunk(Chunk::empty(ChunkKey::new(2, 0, 0)));

        let mut sink = DrawRecorder::new();
        let stats = world.draw(Point3::new(8.0, 8.0, 8.0), &everything, &mut sink);

        assert_eq!(stats.drawn, vec![ChunkKey::new(0, 0, 0)]);
        assert_eq!(stats.queued, vec![ChunkKey::new(1, 0, 0)]);
        assert!(!world.is_queued(ChunkKey::new(3, 0, 0)));
    }

    #[test]
    fn test_view_distance_limits_the_flood() {
        let mut world = empty_world(ChunkKey::new(0, 0, 0), ChunkKey::new(9, 0, 0));
        for x in 0..=9 {
            world.insert_chunk(Chunk::empty(ChunkKey::new(x, 0, 0)));
        }

        let mut sink = DrawRecorder::new();
        let stats = world.draw(Point3::new(8.0, 8.0, 8.0), &everything, &mut sink);

        // Chunk centres are 16 apart; 80 units reach chunk 5.
        let furthest = stats.drawn.iter().map(|key| key.x).max();
        assert_eq!(furthest, Some(5));
    }
}
