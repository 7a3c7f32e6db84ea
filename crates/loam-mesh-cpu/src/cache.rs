//! Per-chunk layer geometry cache.
//!
//! Shared between the render thread and whichever worker is rebuilding the
//! chunk; the single mutex covers the whole check-build-store span of a
//! rebuild, so racing rebuild requests reduce to sequential execution and a
//! reader can never observe a half-written layer slot.

use std::sync::{Mutex, MutexGuard};

use crate::mesh_buf::MeshBuf;

#[derive(Default, Clone, Debug)]
pub struct LayerSlot {
    pub mesh: Option<MeshBuf>,
    pub dirty: bool,
}

#[derive(Default)]
pub struct ChunkMeshCache {
    slots: Mutex<Vec<LayerSlot>>,
}

impl ChunkMeshCache {
    pub fn new(layers: usize) -> Self {
        Self {
            slots: Mutex::new(vec![LayerSlot::default(); layers]),
        }
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, Vec<LayerSlot>> {
        self.slots.lock().unwrap()
    }

    /// Invalidate one layer; the next build recomputes it.
    pub fn mark_dirty(&self, layer: usize) {
        let mut slots = self.lock();
        if let Some(slot) = slots.get_mut(layer) {
            slot.dirty = true;
        }
    }

    /// Invalidate a voxel change at `layer`: slope and lighting reach one
    /// layer up and down, so the adjacent layers go stale too.
    pub fn mark_dirty_around(&self, layer: usize) {
        let mut slots = self.lock();
        let lo = layer.saturating_sub(1);
        for l in lo..=layer + 1 {
            if let Some(slot) = slots.get_mut(l) {
                slot.dirty = true;
            }
        }
    }

    pub fn mark_all_dirty(&self) {
        for slot in self.lock().iter_mut() {
            slot.dirty = true;
        }
    }

    /// Cached-layer count, for stats/tests.
    pub fn cached_layers(&self) -> usize {
        self.lock().iter().filter(|s| s.mesh.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dirty_marks_are_clamped_to_the_slot_range() {
        let cache = ChunkMeshCache::new(4);
        cache.mark_dirty(99);
        cache.mark_dirty_around(0);
        cache.mark_dirty_around(3);
        let slots = cache.lock();
        assert!(slots[0].dirty && slots[1].dirty && slots[2].dirty && slots[3].dirty);
    }

    #[test]
    fn mark_all_dirty_leaves_cached_blobs_in_place() {
        let cache = ChunkMeshCache::new(3);
        cache.lock()[1].mesh = Some(MeshBuf::default());
        assert_eq!(cache.cached_layers(), 1);
        cache.mark_all_dirty();
        assert_eq!(cache.cached_layers(), 1);
        assert!(cache.lock().iter().all(|s| s.dirty));
    }
}
