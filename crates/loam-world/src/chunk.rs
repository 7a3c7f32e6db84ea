use crate::voxel::{Voxel, VoxelFlags};

/// Horizontal chunk footprint in voxels. Chunks span the full world height.
pub const CHUNK_SIZE: usize = 16;

/// Horizontal chunk address; `cy` does not exist because a chunk is a full
/// column of layers.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cz: i32,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(cx: i32, cz: i32) -> Self {
        Self { cx, cz }
    }

    #[inline]
    pub fn from_world(wx: i32, wz: i32) -> Self {
        Self {
            cx: wx.div_euclid(CHUNK_SIZE as i32),
            cz: wz.div_euclid(CHUNK_SIZE as i32),
        }
    }

    #[inline]
    pub fn base_x(self) -> i32 {
        self.cx * CHUNK_SIZE as i32
    }

    #[inline]
    pub fn base_z(self) -> i32 {
        self.cz * CHUNK_SIZE as i32
    }
}

/// Dense voxel storage for one chunk column.
#[derive(Clone, Debug)]
pub struct ChunkVoxels {
    pub coord: ChunkCoord,
    pub sy: usize,
    voxels: Vec<Voxel>,
}

impl ChunkVoxels {
    pub fn new(coord: ChunkCoord, sy: usize) -> Self {
        Self {
            coord,
            sy,
            voxels: vec![Voxel::EMPTY; CHUNK_SIZE * sy * CHUNK_SIZE],
        }
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize, z: usize) -> usize {
        (y * CHUNK_SIZE + z) * CHUNK_SIZE + x
    }

    #[inline]
    pub fn get_local(&self, x: usize, y: usize, z: usize) -> Voxel {
        self.voxels[self.idx(x, y, z)]
    }

    #[inline]
    pub fn set_local(&mut self, x: usize, y: usize, z: usize, v: Voxel) {
        let i = self.idx(x, y, z);
        self.voxels[i] = v;
    }

    #[inline]
    pub fn get_mut(&mut self, x: usize, y: usize, z: usize) -> &mut Voxel {
        let i = self.idx(x, y, z);
        &mut self.voxels[i]
    }

    /// Recompute the SUNLIT bit: an empty voxel is sunlit while nothing
    /// non-empty sits above it in its own column.
    pub fn recompute_sunlight(&mut self) {
        for z in 0..CHUNK_SIZE {
            for x in 0..CHUNK_SIZE {
                let mut open = true;
                for y in (0..self.sy).rev() {
                    let v = self.get_mut(x, y, z);
                    if v.is_empty() && open {
                        v.flags.insert(VoxelFlags::SUNLIT);
                    } else {
                        v.flags.remove(VoxelFlags::SUNLIT);
                    }
                    if !v.is_empty() {
                        open = false;
                    }
                }
            }
        }
    }

    /// Recompute the VISIBLE bit against the viewing cutaway: non-empty
    /// voxels at or below `max_layer` are visible.
    pub fn recompute_visibility(&mut self, max_layer: usize) {
        for y in 0..self.sy {
            for z in 0..CHUNK_SIZE {
                for x in 0..CHUNK_SIZE {
                    let v = self.get_mut(x, y, z);
                    if !v.is_empty() && y <= max_layer {
                        v.flags.insert(VoxelFlags::VISIBLE);
                    } else {
                        v.flags.remove(VoxelFlags::VISIBLE);
                    }
                }
            }
        }
    }

    pub fn mark_all_explored(&mut self) {
        for v in &mut self.voxels {
            v.flags.insert(VoxelFlags::EXPLORED);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loam_voxels::VoxelTypeId;

    #[test]
    fn idx_roundtrip() {
        let c = ChunkVoxels::new(ChunkCoord::new(0, 0), 8);
        let mut seen = std::collections::HashSet::new();
        for y in 0..8 {
            for z in 0..CHUNK_SIZE {
                for x in 0..CHUNK_SIZE {
                    assert!(seen.insert(c.idx(x, y, z)));
                }
            }
        }
    }

    #[test]
    fn sunlight_stops_at_first_solid() {
        let mut c = ChunkVoxels::new(ChunkCoord::new(0, 0), 8);
        c.set_local(3, 4, 3, Voxel::solid(VoxelTypeId(1)));
        c.recompute_sunlight();
        assert!(c.get_local(3, 5, 3).is_sunlit());
        assert!(!c.get_local(3, 4, 3).is_sunlit());
        assert!(!c.get_local(3, 3, 3).is_sunlit());
        // Neighboring open column is sunlit all the way down.
        assert!(c.get_local(4, 0, 3).is_sunlit());
    }

    #[test]
    fn visibility_honors_cutaway() {
        let mut c = ChunkVoxels::new(ChunkCoord::new(0, 0), 8);
        c.set_local(0, 2, 0, Voxel::solid(VoxelTypeId(1)));
        c.set_local(0, 6, 0, Voxel::solid(VoxelTypeId(1)));
        c.recompute_visibility(4);
        assert!(c.get_local(0, 2, 0).is_visible());
        assert!(!c.get_local(0, 6, 0).is_visible());
        assert!(!c.get_local(0, 3, 0).is_visible());
    }
}
