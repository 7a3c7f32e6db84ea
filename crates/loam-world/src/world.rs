use hashbrown::HashMap;

use crate::chunk::{ChunkCoord, ChunkVoxels};
use crate::voxel::Voxel;

/// Flat world-space voxel lookup over the loaded chunk set. The mesher only
/// ever reads through this; mutation happens between builds.
#[derive(Default)]
pub struct WorldVoxels {
    pub sy: usize,
    chunks: HashMap<ChunkCoord, ChunkVoxels>,
}

impl WorldVoxels {
    pub fn new(sy: usize) -> Self {
        Self {
            sy,
            chunks: HashMap::new(),
        }
    }

    pub fn insert_chunk(&mut self, chunk: ChunkVoxels) {
        self.chunks.insert(chunk.coord, chunk);
    }

    pub fn chunk(&self, coord: ChunkCoord) -> Option<&ChunkVoxels> {
        self.chunks.get(&coord)
    }

    pub fn chunk_mut(&mut self, coord: ChunkCoord) -> Option<&mut ChunkVoxels> {
        self.chunks.get_mut(&coord)
    }

    pub fn ensure_chunk(&mut self, coord: ChunkCoord) -> &mut ChunkVoxels {
        let sy = self.sy;
        self.chunks
            .entry(coord)
            .or_insert_with(|| ChunkVoxels::new(coord, sy))
    }

    pub fn coords(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.chunks.keys().copied()
    }

    /// World-space point lookup. `None` means the position is outside the
    /// loaded world (unloaded chunk or out of the vertical range).
    #[inline]
    pub fn voxel(&self, wx: i32, wy: i32, wz: i32) -> Option<Voxel> {
        if wy < 0 || wy >= self.sy as i32 {
            return None;
        }
        let coord = ChunkCoord::from_world(wx, wz);
        let chunk = self.chunks.get(&coord)?;
        let lx = (wx - coord.base_x()) as usize;
        let lz = (wz - coord.base_z()) as usize;
        Some(chunk.get_local(lx, wy as usize, lz))
    }

    /// Convenience for tests and the demo filler.
    pub fn set_voxel(&mut self, wx: i32, wy: i32, wz: i32, v: Voxel) {
        if wy < 0 || wy >= self.sy as i32 {
            return;
        }
        let coord = ChunkCoord::from_world(wx, wz);
        let chunk = self.ensure_chunk(coord);
        let lx = (wx - coord.base_x()) as usize;
        let lz = (wz - coord.base_z()) as usize;
        chunk.set_local(lx, wy as usize, lz, v);
    }
}

/// Cheap copyable locator for one voxel position. A handle may point outside
/// the loaded world; `resolve` returns `None` in that case and callers must
/// treat that as "invalid", never as empty.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct VoxelHandle {
    pub wx: i32,
    pub wy: i32,
    pub wz: i32,
}

impl VoxelHandle {
    #[inline]
    pub const fn new(wx: i32, wy: i32, wz: i32) -> Self {
        Self { wx, wy, wz }
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> VoxelHandle {
        VoxelHandle::new(self.wx + dx, self.wy + dy, self.wz + dz)
    }

    #[inline]
    pub fn above(self) -> VoxelHandle {
        self.offset(0, 1, 0)
    }

    #[inline]
    pub fn below(self) -> VoxelHandle {
        self.offset(0, -1, 0)
    }

    #[inline]
    pub fn resolve(self, world: &WorldVoxels) -> Option<Voxel> {
        world.voxel(self.wx, self.wy, self.wz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::CHUNK_SIZE;
    use crate::voxel::Voxel;
    use loam_voxels::VoxelTypeId;

    #[test]
    fn lookup_crosses_chunk_borders() {
        let mut w = WorldVoxels::new(8);
        w.ensure_chunk(ChunkCoord::new(0, 0));
        w.ensure_chunk(ChunkCoord::new(-1, 0));
        w.set_voxel(-1, 3, 5, Voxel::solid(VoxelTypeId(2)));
        assert_eq!(w.voxel(-1, 3, 5).map(|v| v.ty), Some(VoxelTypeId(2)));
        assert_eq!(w.voxel(0, 3, 5), Some(Voxel::EMPTY));
        // Unloaded chunk and out-of-height reads are invalid, not empty.
        assert_eq!(w.voxel(CHUNK_SIZE as i32, 3, 5), None);
        assert_eq!(w.voxel(0, 8, 0), None);
        assert_eq!(w.voxel(0, -1, 0), None);
    }

    #[test]
    fn handle_offsets_resolve() {
        let mut w = WorldVoxels::new(8);
        w.ensure_chunk(ChunkCoord::new(0, 0));
        w.set_voxel(4, 4, 4, Voxel::solid(VoxelTypeId(1)));
        let h = VoxelHandle::new(4, 3, 4);
        assert_eq!(h.above().resolve(&w).map(|v| v.ty), Some(VoxelTypeId(1)));
        assert_eq!(h.resolve(&w), Some(Voxel::EMPTY));
        assert_eq!(h.below().below().below().below().resolve(&w), None);
    }
}
