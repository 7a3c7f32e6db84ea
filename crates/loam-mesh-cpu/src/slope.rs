//! Ramp displacement rule for top-edge vertices.

use loam_voxels::VoxelTypeRegistry;
use loam_world::{Voxel, VoxelHandle, WorldVoxels};

use crate::slice_cache::SliceCache;
use crate::vertex::LogicalVertex;

/// How far a sloped vertex drops, in cell heights.
pub const SLOPE_DROP: f32 = 0.5;

/// Whether this vertex of the voxel at `h` should drop. Only called for
/// template vertices flagged slope-eligible whose ramp corner is lowered;
/// results are memoized per voxel.
pub fn should_slope(
    world: &WorldVoxels,
    types: &VoxelTypeRegistry,
    cache: &mut SliceCache,
    h: VoxelHandle,
    v: Voxel,
    lv: LogicalVertex,
) -> bool {
    if let Some(r) = cache.slope_get(lv.bits()) {
        return r;
    }
    let r = evaluate(world, types, h, v, lv);
    cache.slope_put(lv.bits(), r);
    r
}

fn evaluate(
    world: &WorldVoxels,
    types: &VoxelTypeRegistry,
    h: VoxelHandle,
    v: Voxel,
    lv: LogicalVertex,
) -> bool {
    if v.is_empty() || !v.is_explored() || !v.is_visible() {
        return false;
    }
    if !types.get(v.ty).is_some_and(|t| t.can_ramp) {
        return false;
    }
    // A ramp only forms under open space.
    if h.above().resolve(world).is_some_and(|a| !a.is_empty()) {
        return false;
    }
    let mut any_empty = false;
    for nb_h in lv.cells_2d(h) {
        if nb_h == h {
            continue;
        }
        let Some(n) = nb_h.resolve(world) else {
            return false;
        };
        if !n.is_explored() {
            return false;
        }
        if !n.is_empty() && !types.get(n.ty).is_some_and(|t| t.can_ramp) {
            return false;
        }
        if nb_h.above().resolve(world).is_some_and(|a| !a.is_empty()) {
            return false;
        }
        if n.is_empty() {
            any_empty = true;
        }
    }
    any_empty
}
