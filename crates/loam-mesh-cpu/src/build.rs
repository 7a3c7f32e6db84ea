//! Chunk mesh assembly: walks layers bottom-up, reuses cached layer blobs,
//! and stitches the rest together with rebased indices.

use loam_geom::Vec3;
use loam_voxels::{GrassRegistry, Tile, VoxelTypeRegistry};
use loam_world::{CHUNK_SIZE, ChunkCoord, Voxel, VoxelHandle, WorldVoxels};

use crate::cache::ChunkMeshCache;
use crate::face::Face;
use crate::fringe::{self, TopFace};
use crate::lighting::{any_neighbor_explored, vertex_light};
use crate::mesh_buf::MeshBuf;
use crate::slice_cache::SliceCache;
use crate::slope::{SLOPE_DROP, should_slope};
use crate::templates;
use crate::tiles::{tile_for, uv_at, uv_clamp};
use crate::visibility::face_visible;

/// Externally owned per-build toggles.
#[derive(Clone, Copy, Debug)]
pub struct BuildOptions {
    pub apply_lighting: bool,
    /// Highest layer index to mesh (the viewing cutaway).
    pub max_layer: usize,
    pub grass_fringe: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            apply_lighting: true,
            max_layer: usize::MAX,
            grass_fringe: true,
        }
    }
}

#[derive(Default, Clone, Copy, Debug)]
pub struct BuildStats {
    pub layers_built: usize,
    pub layers_reused: usize,
    pub faces: usize,
    pub fringe_quads: usize,
    pub light_hits: u64,
    pub light_misses: u64,
}

/// Rebuilds the mesh for one chunk. Layers whose cached blob is still clean
/// are reused verbatim; everything else is recomputed and stored back. The
/// cache lock is held for the whole pass, so concurrent rebuild requests for
/// the same chunk serialize.
pub fn build_chunk_mesh(
    world: &WorldVoxels,
    types: &VoxelTypeRegistry,
    grasses: &GrassRegistry,
    coord: ChunkCoord,
    cache: &ChunkMeshCache,
    opts: &BuildOptions,
) -> Option<(MeshBuf, BuildStats)> {
    let chunk = world.chunk(coord)?;
    let top = opts.max_layer.min(chunk.sy.saturating_sub(1));
    let mut slice = SliceCache::new();
    let mut stats = BuildStats::default();
    let mut out = MeshBuf::default();

    let mut slots = cache.lock();
    if slots.len() < chunk.sy {
        slots.resize(chunk.sy, Default::default());
    }
    for y in 0..=top {
        let slot = &mut slots[y];
        if let Some(mesh) = slot.mesh.as_ref()
            && !slot.dirty
        {
            stats.layers_reused += 1;
            out.append(mesh);
            continue;
        }
        slice.clear_layer();
        let layer = build_layer(world, types, grasses, coord, y as i32, &mut slice, opts, &mut stats);
        out.append(&layer);
        slot.mesh = Some(layer);
        slot.dirty = false;
        stats.layers_built += 1;
    }
    drop(slots);

    stats.light_hits = slice.light_hits;
    stats.light_misses = slice.light_misses;
    log::debug!(
        "meshed chunk ({}, {}): {} faces, {} fringe quads, {} layers built, {} reused",
        coord.cx,
        coord.cz,
        stats.faces,
        stats.fringe_quads,
        stats.layers_built,
        stats.layers_reused
    );
    Some((out, stats))
}

#[allow(clippy::too_many_arguments)]
fn build_layer(
    world: &WorldVoxels,
    types: &VoxelTypeRegistry,
    grasses: &GrassRegistry,
    coord: ChunkCoord,
    y: i32,
    slice: &mut SliceCache,
    opts: &BuildOptions,
    stats: &mut BuildStats,
) -> MeshBuf {
    let mut buf = MeshBuf::default();
    for lz in 0..CHUNK_SIZE as i32 {
        for lx in 0..CHUNK_SIZE as i32 {
            let h = VoxelHandle::new(coord.base_x() + lx, y, coord.base_z() + lz);
            let Some(v) = h.resolve(world) else {
                continue;
            };
            // Explored air is the only cell that emits nothing at all;
            // unexplored air still becomes black filler.
            if v.is_empty() && v.is_explored() {
                continue;
            }
            slice.clear_voxel();
            emit_voxel(world, types, grasses, h, v, slice, opts, &mut buf, stats);
        }
    }
    buf
}

#[allow(clippy::too_many_arguments)]
fn emit_voxel(
    world: &WorldVoxels,
    types: &VoxelTypeRegistry,
    grasses: &GrassRegistry,
    h: VoxelHandle,
    v: Voxel,
    slice: &mut SliceCache,
    opts: &BuildOptions,
    buf: &mut MeshBuf,
    stats: &mut BuildStats,
) {
    let Some(ty) = types.get(v.ty) else {
        return;
    };
    // Unexplored voxels always fill their whole cell, whatever their type.
    let tpl = if v.is_explored() {
        templates::for_shape(ty.shape)
    } else {
        &templates::CUBE
    };
    let origin = Vec3::new(h.wx as f32, h.wy as f32, h.wz as f32);

    for face in Face::ALL {
        if !face_visible(world, types, h, face) {
            continue;
        }
        stats.faces += 1;
        let ft = tpl.face(face);
        let black = ft
            .verts
            .iter()
            .all(|tv| !any_neighbor_explored(world, slice, h, tv.lv));
        let tile = if black {
            Tile::BLACK
        } else {
            tile_for(ty, face.role())
        };
        let clamp = uv_clamp(tile);

        let base = buf.vertex_count();
        let mut top_face = TopFace {
            pos: [Vec3::ZERO; 4],
            col0: [[0; 4]; 4],
            col1: [[0; 4]; 4],
        };
        for (i, tv) in ft.verts.iter().enumerate() {
            let mut pos = origin + Vec3::new(tv.pos[0], tv.pos[1], tv.pos[2]);
            if tv.apply_slope
                && v.ramp.lowered(tv.lv.corner())
                && should_slope(world, types, slice, h, v, tv.lv)
            {
                pos.y -= SLOPE_DROP;
            }
            let (col0, col1) = vertex_colors(world, types, slice, h, tv.lv, black, opts);
            if face == Face::PosY {
                top_face.pos[i] = pos;
                top_face.col0[i] = col0;
                top_face.col1[i] = col1;
            }
            buf.push_vertex(pos, col0, col1, uv_at(tile, tv.uv), clamp);
        }
        buf.push_quad_indices(base);

        if face == Face::PosY
            && opts.grass_fringe
            && !black
            && v.is_explored()
            && !v.grass.is_none()
        {
            stats.fringe_quads += fringe::emit_fringe(world, grasses, h, &top_face, buf);
        }
    }
}

fn vertex_colors(
    world: &WorldVoxels,
    types: &VoxelTypeRegistry,
    slice: &mut SliceCache,
    h: VoxelHandle,
    lv: crate::vertex::LogicalVertex,
    black: bool,
    opts: &BuildOptions,
) -> ([u8; 4], [u8; 4]) {
    if black {
        return ([0, 0, 0, 255], [0, 0, 0, 255]);
    }
    let col0 = if opts.apply_lighting {
        let l = vertex_light(world, types, slice, h, lv);
        [l.ambient, l.sun, l.dynamic, 255]
    } else {
        [255, 255, 0, 255]
    };
    (col0, [255, 255, 255, 255])
}
