//! Per-vertex light aggregation over the 2x2x2 corner neighborhood.
//!
//! The scan excludes the owning cell, so every solid voxel sharing a lattice
//! point computes the same aggregate and the result can be memoized per
//! lattice key. The small per-vertex ambience boost is applied after the
//! cache read for the same reason.

use loam_voxels::VoxelTypeRegistry;
use loam_world::{VoxelHandle, WorldVoxels};

use crate::slice_cache::{LightSample, SliceCache};
use crate::vertex::LogicalVertex;

/// Extra sun applied to naturally exposed corners: the four top vertices get
/// a full step, the two front-bottom vertices a sliver.
#[inline]
pub fn ambience_boost(lv: LogicalVertex) -> u8 {
    if lv.is_top() {
        51
    } else if matches!(
        lv,
        LogicalVertex::FrontBottomLeft | LogicalVertex::FrontBottomRight
    ) {
        13
    } else {
        0
    }
}

/// Computes (or recalls) the light package for one logical vertex of the
/// voxel at `h`. Channels are 0-255: analytic ambient occlusion, averaged
/// sunlight, and a dynamic-light flag.
pub fn vertex_light(
    world: &WorldVoxels,
    types: &VoxelTypeRegistry,
    cache: &mut SliceCache,
    h: VoxelHandle,
    lv: LogicalVertex,
) -> LightSample {
    let key = lv.lattice_key(h);
    let base = match cache.light_get(key) {
        Some(s) => s,
        None => {
            let s = scan_corner(world, types, h, lv);
            cache.light_put(key, s);
            s
        }
    };
    LightSample {
        ambient: base.ambient,
        sun: (base.sun as u16 + ambience_boost(lv) as u16).min(255) as u8,
        dynamic: base.dynamic,
    }
}

fn scan_corner(
    world: &WorldVoxels,
    types: &VoxelTypeRegistry,
    h: VoxelHandle,
    lv: LogicalVertex,
) -> LightSample {
    let mut checked = 0u32;
    let mut occluded = 0u32;
    let mut sun_accum = 0u32;
    let mut dynamic = 0u8;
    for cell in lv.cells_3d(h) {
        if cell == h {
            continue;
        }
        let Some(n) = cell.resolve(world) else {
            continue;
        };
        checked += 1;
        if n.is_sunlit() {
            sun_accum += 255;
        }
        if !n.is_empty() || !n.is_explored() {
            occluded += 1;
            if types.get(n.ty).is_some_and(|t| t.emits_light) {
                dynamic = 255;
            }
        }
    }
    if checked == 0 {
        return LightSample {
            ambient: 0,
            sun: 0,
            dynamic: 0,
        };
    }
    LightSample {
        ambient: ((checked - occluded) * 255 / checked) as u8,
        sun: (sun_accum / checked) as u8,
        dynamic,
    }
}

/// Whether any revealed terrain voxel touches this vertex's lattice point;
/// memoized per lattice key. A face whose four vertices all fail this check
/// has no revealed terrain to blend against and renders as the reserved
/// black filler. Explored air does not count: a fog wall standing free in a
/// revealed pit stays black.
pub fn any_neighbor_explored(
    world: &WorldVoxels,
    cache: &mut SliceCache,
    h: VoxelHandle,
    lv: LogicalVertex,
) -> bool {
    let key = lv.lattice_key(h);
    if let Some(v) = cache.explored_get(key) {
        return v;
    }
    let any = lv
        .cells_3d(h)
        .iter()
        .any(|c| {
            c.resolve(world)
                .is_some_and(|n| n.is_explored() && !n.is_empty())
        });
    cache.explored_put(key, any);
    any
}
