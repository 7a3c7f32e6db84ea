//! Noise-driven terrain filler used by the dev harness and integration
//! tests. Not a real worldgen; just enough variety to exercise the mesher.

use fastnoise_lite::{FastNoiseLite, NoiseType};
use loam_voxels::{Corner, GrassId, RampDirs, VoxelTypeId};

use crate::chunk::{CHUNK_SIZE, ChunkCoord};
use crate::voxel::{Voxel, VoxelFlags};
use crate::world::WorldVoxels;

/// Type ids the filler stamps into the ground.
#[derive(Clone, Copy, Debug)]
pub struct DemoTypes {
    pub stone: VoxelTypeId,
    pub soil: VoxelTypeId,
    pub grass: GrassId,
}

fn height_noise(seed: i32) -> FastNoiseLite {
    let mut n = FastNoiseLite::with_seed(seed);
    n.set_noise_type(Some(NoiseType::OpenSimplex2));
    n.set_frequency(Some(0.035));
    n
}

#[inline]
fn column_height(noise: &FastNoiseLite, sy: usize, wx: i32, wz: i32) -> i32 {
    let n = noise.get_noise_2d(wx as f32, wz as f32); // -1..1
    let span = (sy as f32 - 4.0).max(1.0);
    (2.0 + (n * 0.5 + 0.5) * span * 0.5) as i32
}

/// Fill one chunk with a rolling heightfield: stone body, soil surface with
/// grass, ramps leaning toward higher neighboring columns. Marks everything
/// explored and recomputes the derived flags.
pub fn fill_demo_chunk(
    world: &mut WorldVoxels,
    coord: ChunkCoord,
    seed: i32,
    types: DemoTypes,
    max_layer: usize,
) {
    let sy = world.sy;
    let noise = height_noise(seed);
    world.ensure_chunk(coord);
    let base_x = coord.base_x();
    let base_z = coord.base_z();
    for lz in 0..CHUNK_SIZE {
        for lx in 0..CHUNK_SIZE {
            let wx = base_x + lx as i32;
            let wz = base_z + lz as i32;
            let h = column_height(&noise, sy, wx, wz);
            for y in 0..h.min(sy as i32) {
                let v = if y + 1 == h {
                    Voxel {
                        ty: types.soil,
                        grass: types.grass,
                        ramp: surface_ramp(&noise, sy, wx, wz, h),
                        flags: VoxelFlags::NONE,
                    }
                } else {
                    Voxel::solid(types.stone)
                };
                world.set_voxel(wx, y, wz, v);
            }
        }
    }
    if let Some(chunk) = world.chunk_mut(coord) {
        chunk.mark_all_explored();
        chunk.recompute_sunlight();
        chunk.recompute_visibility(max_layer);
    }
}

/// Lower the corners that face strictly downhill terrain on all touching
/// columns; a flat neighborhood yields no ramp.
fn surface_ramp(noise: &FastNoiseLite, sy: usize, wx: i32, wz: i32, h: i32) -> RampDirs {
    let hh = |dx: i32, dz: i32| column_height(noise, sy, wx + dx, wz + dz);
    let mut ramp = RampDirs::ALL;
    let mut any_lowered = false;
    // Corner offsets: front is +z, left is -x.
    let corner_dirs = [
        (Corner::FrontLeft, -1, 1),
        (Corner::FrontRight, 1, 1),
        (Corner::BackLeft, -1, -1),
        (Corner::BackRight, 1, -1),
    ];
    for (corner, dx, dz) in corner_dirs {
        let downhill =
            hh(dx, 0) < h && hh(0, dz) < h && hh(dx, dz) < h;
        if downhill {
            ramp = RampDirs(ramp.0 & !corner.bit());
            any_lowered = true;
        }
    }
    if any_lowered { ramp } else { RampDirs::NONE }
}
