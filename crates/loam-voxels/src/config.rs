//! Serde views of the voxel/grass TOML files. These are transient; the
//! registries compile them into the flat runtime tables.

use serde::Deserialize;

#[derive(Deserialize)]
pub struct VoxelsConfig {
    pub voxels: Vec<VoxelDef>,
}

#[derive(Deserialize)]
pub struct VoxelDef {
    /// Explicit id; defaults to the next free slot.
    pub id: Option<u16>,
    pub name: String,
    /// "cube" (default) or "lower_slab".
    pub shape: Option<String>,
    pub tiles: Option<TilesDef>,
    #[serde(default)]
    pub can_ramp: bool,
    #[serde(default)]
    pub is_soil: bool,
    #[serde(default)]
    pub transparent: bool,
    #[serde(default)]
    pub emits_light: bool,
    #[serde(default)]
    pub invincible: bool,
}

/// Per-role atlas tiles as `[col, row]`. `all` is the fallback for any role
/// left unset.
#[derive(Deserialize, Default)]
pub struct TilesDef {
    pub all: Option<[u16; 2]>,
    pub top: Option<[u16; 2]>,
    pub bottom: Option<[u16; 2]>,
    pub side: Option<[u16; 2]>,
}

#[derive(Deserialize)]
pub struct GrassConfig {
    pub grasses: Vec<GrassDef>,
}

#[derive(Deserialize)]
pub struct GrassDef {
    pub id: Option<u16>,
    pub name: String,
    pub tile: [u16; 2],
    pub fringe_edge: Option<[u16; 2]>,
    pub fringe_corner: Option<[u16; 2]>,
    #[serde(default)]
    pub precedence: u8,
    /// Name of the grass this one decays into.
    pub becomes: Option<String>,
}
