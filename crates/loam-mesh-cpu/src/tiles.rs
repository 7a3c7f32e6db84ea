//! Atlas tile selection and UV math.

use loam_voxels::{Tile, VoxelType};

use crate::face::FaceRole;

/// Tiles per atlas row/column.
pub const ATLAS_TILES: u32 = 16;
/// One tile's span in normalized atlas UVs.
pub const TILE_UV: f32 = 1.0 / ATLAS_TILES as f32;
/// Half-texel clamp inset (16px tiles on a 256px atlas), keeps sampling off
/// the neighboring tile when mipping.
pub const UV_INSET: f32 = TILE_UV / 32.0;

#[inline]
pub fn tile_for(ty: &VoxelType, role: FaceRole) -> Tile {
    match role {
        FaceRole::Top => ty.tile_top,
        FaceRole::Bottom => ty.tile_bottom,
        FaceRole::Side => ty.tile_side,
    }
}

/// Clamp rectangle `[u0, v0, u1, v1]` for this tile, inset by half a texel.
#[inline]
pub fn uv_clamp(tile: Tile) -> [f32; 4] {
    let u0 = tile.col as f32 * TILE_UV;
    let v0 = tile.row as f32 * TILE_UV;
    [
        u0 + UV_INSET,
        v0 + UV_INSET,
        u0 + TILE_UV - UV_INSET,
        v0 + TILE_UV - UV_INSET,
    ]
}

/// Absolute atlas UV for an anchor inside the tile.
#[inline]
pub fn uv_at(tile: Tile, anchor: [f32; 2]) -> [f32; 2] {
    [
        (tile.col as f32 + anchor[0]) * TILE_UV,
        (tile.row as f32 + anchor[1]) * TILE_UV,
    ]
}
