//! Per-layer memo tables keyed by canonical vertex lattice keys.
//!
//! One instance lives for a single chunk build pass. The light and explored
//! maps persist for the whole layer (up to four voxels share each
//! vertical-edge vertex); the slope results are only meaningful for the voxel
//! currently being emitted and are reset per voxel.

use std::collections::HashMap;

/// Aggregated light at one lattice point, before the per-vertex ambience
/// boost is applied.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct LightSample {
    pub ambient: u8,
    pub sun: u8,
    pub dynamic: u8,
}

#[derive(Default)]
pub struct SliceCache {
    light: HashMap<u64, LightSample>,
    explored: HashMap<u64, bool>,
    slope: [Option<bool>; 8],
    pub light_hits: u64,
    pub light_misses: u64,
}

impl SliceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset between layers, keeping the per-layer working set small and the
    /// output of a single-layer rebuild identical to the same layer of a full
    /// build.
    pub fn clear_layer(&mut self) {
        self.light.clear();
        self.explored.clear();
        self.slope = [None; 8];
    }

    /// Reset between voxels: slope results depend on which voxel owns the
    /// vertex, not just on the lattice point.
    #[inline]
    pub fn clear_voxel(&mut self) {
        self.slope = [None; 8];
    }

    #[inline]
    pub fn light_get(&mut self, key: u64) -> Option<LightSample> {
        let hit = self.light.get(&key).copied();
        if hit.is_some() {
            self.light_hits += 1;
        } else {
            self.light_misses += 1;
        }
        hit
    }

    #[inline]
    pub fn light_put(&mut self, key: u64, sample: LightSample) {
        self.light.insert(key, sample);
    }

    #[inline]
    pub fn explored_get(&self, key: u64) -> Option<bool> {
        self.explored.get(&key).copied()
    }

    #[inline]
    pub fn explored_put(&mut self, key: u64, any: bool) {
        self.explored.insert(key, any);
    }

    #[inline]
    pub fn slope_get(&self, lv_bits: u8) -> Option<bool> {
        self.slope[lv_bits as usize]
    }

    #[inline]
    pub fn slope_put(&mut self, lv_bits: u8, result: bool) {
        self.slope[lv_bits as usize] = Some(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_counts_hits_and_misses() {
        let mut c = SliceCache::new();
        assert_eq!(c.light_get(7), None);
        c.light_put(
            7,
            LightSample {
                ambient: 200,
                sun: 100,
                dynamic: 0,
            },
        );
        assert!(c.light_get(7).is_some());
        assert_eq!(c.light_hits, 1);
        assert_eq!(c.light_misses, 1);
    }

    #[test]
    fn clearing_a_voxel_keeps_layer_maps() {
        let mut c = SliceCache::new();
        c.explored_put(3, true);
        c.slope_put(5, true);
        c.clear_voxel();
        assert_eq!(c.slope_get(5), None);
        assert_eq!(c.explored_get(3), Some(true));
        c.clear_layer();
        assert_eq!(c.explored_get(3), None);
    }
}
