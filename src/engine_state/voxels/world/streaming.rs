//! Incremental chunk loading.
//!
//! [`World::update`] turns a bounded number of queued keys into generated, culled
//! chunks per call, so discovering many chunks at once never stalls a frame.

use log::debug;

use super::World;
use crate::engine_state::voxels::chunk::Chunk;

impl World {
    /// Loads up to `loads_per_update` queued chunks.
    ///
    /// Out-of-bounds and already-loaded keys are dropped from the queue without
    /// counting against the budget. When the loaded-chunk budget is reached the
    /// least recently drawn chunk is evicted (if enabled and if it was not drawn in
    /// the latest draw); otherwise loading stops and the remaining keys stay queued.
    ///
    /// # Returns
    /// The number of chunks loaded
    pub fn update(&mut self) -> usize {
        let mut loaded = 0;

        while loaded < self.config.loads_per_update {
            let Some(&key) = self.pending.front() else {
                break;
            };

            if !self.config.bounds.contains(key) || self.chunks.contains(&key) {
                self.pending.pop_front();
                self.queued.remove(&key);
                continue;
            }

            if !self.make_room() {
                debug!(
                    "Chunk budget of {} reached, {} loads deferred",
                    self.config.max_loaded_chunks,
                    self.pending.len()
                );
                break;
            }

            self.pending.pop_front();
            self.queued.remove(&key);

            let chunk = Chunk::generate(key, &self.generator);
            debug!("Loaded chunk {} ({} solid voxels)", key, chunk.solid_count());
            self.insert_chunk(chunk);
            loaded += 1;
        }

        loaded
    }

    /// Ensures there is space for one more chunk, evicting if allowed.
    fn make_room(&mut self) -> bool {
        if self.chunks.len() < self.config.max_loaded_chunks {
            return true;
        }
        if !self.config.evict_when_full {
            return false;
        }

        let generation = self.generation;
        let victim = match self.chunks.peek_lru() {
            Some((key, chunk)) if generation == 0 || chunk.last_drawn() != generation => *key,
            _ => return false,
        };

        debug!("Evicting chunk {}", victim);
        self.unload_chunk(victim).is_some()
    }
}
