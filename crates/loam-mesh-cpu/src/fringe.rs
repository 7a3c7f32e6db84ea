//! Grass fringe: skirt quads decorating the exposed edges and corners of a
//! grass-covered top face.
//!
//! Corner quads reuse the outer endpoints already computed for their two
//! adjacent edges, which is what keeps the skirt watertight where an edge
//! meets a corner.

use loam_geom::Vec3;
use loam_voxels::{GrassRegistry, GrassType, Tile};
use loam_world::{VoxelHandle, WorldVoxels};

use crate::mesh_buf::MeshBuf;
use crate::tiles::{uv_at, uv_clamp};

/// How far a skirt reaches past the face edge, in cell widths.
pub const FRINGE_REACH: f32 = 0.5;
/// Drop of the outer edge when hanging over open space.
pub const FRINGE_SAG: f32 = 0.35;
/// Upward nudge when draped over a neighbor's own top face, enough to beat
/// z-fighting without a visible step.
pub const FRINGE_LIFT: f32 = 0.02;

/// The emitted top face, in template order (back-left, front-left,
/// front-right, back-right), with slope displacement already applied.
pub struct TopFace {
    pub pos: [Vec3; 4],
    pub col0: [[u8; 4]; 4],
    pub col1: [[u8; 4]; 4],
}

/// Edges as (first vertex, second vertex, outward dx, outward dz), walking
/// the top face counter-clockwise from above.
const EDGES: [(usize, usize, i32, i32); 4] = [
    (0, 1, -1, 0), // west
    (1, 2, 0, 1),  // front
    (2, 3, 1, 0),  // east
    (3, 0, 0, -1), // back
];

/// Emits the fringe for one grass-topped voxel; returns the quad count.
pub fn emit_fringe(
    world: &WorldVoxels,
    grasses: &GrassRegistry,
    h: VoxelHandle,
    top: &TopFace,
    buf: &mut MeshBuf,
) -> usize {
    let Some(own) = h.resolve(world).and_then(|v| grasses.get(v.grass)) else {
        return 0;
    };
    let mut quads = 0;
    // Outer endpoints per emitted edge, in (first, second) vertex order.
    let mut edge_outer: [Option<(Vec3, Vec3)>; 4] = [None; 4];

    for (e, &(a, b, dx, dz)) in EDGES.iter().enumerate() {
        let Some(dy) = skirt_drop(world, grasses, own, h.offset(dx, 0, dz)) else {
            continue;
        };
        let reach = Vec3::new(dx as f32 * FRINGE_REACH, dy, dz as f32 * FRINGE_REACH);
        let outer_a = top.pos[a] + reach;
        let outer_b = top.pos[b] + reach;
        edge_outer[e] = Some((outer_a, outer_b));
        emit_skirt_quad(
            buf,
            own.tile_edge,
            [top.pos[b], top.pos[a], outer_a, outer_b],
            [top.col0[b], top.col0[a], top.col0[a], top.col0[b]],
            [top.col1[b], top.col1[a], top.col1[a], top.col1[b]],
        );
        quads += 1;
    }

    // Corner at vertex `i` sits between the edge ending there and the edge
    // starting there; both must have emitted so their endpoints can be
    // reused seam-free.
    for i in 0..4 {
        let next = i;
        let prev = (i + 3) % 4;
        let (Some((next_a, _)), Some((_, prev_b))) = (edge_outer[next], edge_outer[prev]) else {
            continue;
        };
        let (_, _, ndx, ndz) = EDGES[next];
        let (_, _, pdx, pdz) = EDGES[prev];
        let (dx, dz) = (ndx + pdx, ndz + pdz);
        let Some(dy) = skirt_drop(world, grasses, own, h.offset(dx, 0, dz)) else {
            continue;
        };
        let diag = top.pos[i]
            + Vec3::new(dx as f32 * FRINGE_REACH, dy, dz as f32 * FRINGE_REACH);
        emit_skirt_quad(
            buf,
            own.tile_corner,
            [top.pos[i], prev_b, diag, next_a],
            [top.col0[i]; 4],
            [top.col1[i]; 4],
        );
        quads += 1;
    }
    quads
}

/// Vertical offset for a skirt toward this neighbor, or `None` when no
/// fringe may be drawn there.
fn skirt_drop(
    world: &WorldVoxels,
    grasses: &GrassRegistry,
    own: &GrassType,
    nb_h: VoxelHandle,
) -> Option<f32> {
    let nb = nb_h.resolve(world)?;
    // Unexplored filler must stay fully covered.
    if !nb.is_explored() {
        return None;
    }
    if nb.is_empty() {
        return Some(-FRINGE_SAG);
    }
    // Capped: the skirt would be buried under the neighbor's own stack.
    if nb_h.above().resolve(world).is_some_and(|a| !a.is_empty()) {
        return None;
    }
    match grasses.get(nb.grass) {
        None => Some(FRINGE_LIFT),
        Some(other) if other.id != own.id && other.precedence < own.precedence => {
            Some(FRINGE_LIFT)
        }
        Some(_) => None,
    }
}

fn emit_skirt_quad(
    buf: &mut MeshBuf,
    tile: Tile,
    pos: [Vec3; 4],
    col0: [[u8; 4]; 4],
    col1: [[u8; 4]; 4],
) {
    const UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
    let clamp = uv_clamp(tile);
    let base = buf.vertex_count();
    for i in 0..4 {
        buf.push_vertex(pos[i], col0[i], col1[i], uv_at(tile, UVS[i]), clamp);
    }
    buf.push_quad_indices(base);
}
