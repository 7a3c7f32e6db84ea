use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;

use super::config::{GrassConfig, GrassDef, VoxelDef, VoxelsConfig};
use super::types::{GrassId, GrassType, ShapeKind, Tile, VoxelType, VoxelTypeId};

#[derive(Default, Clone, Debug)]
pub struct VoxelTypeRegistry {
    pub types: Vec<VoxelType>,
    pub by_name: HashMap<String, VoxelTypeId>,
}

impl VoxelTypeRegistry {
    #[inline]
    pub fn get(&self, id: VoxelTypeId) -> Option<&VoxelType> {
        self.types.get(id.0 as usize)
    }

    pub fn id_by_name(&self, name: &str) -> Option<VoxelTypeId> {
        self.by_name.get(name).copied()
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: VoxelsConfig = toml::from_str(toml_str)?;
        let mut reg = VoxelTypeRegistry::default();
        for def in cfg.voxels.into_iter() {
            let ty = compile_voxel(&reg, def)?;
            let idx = ty.id.0 as usize;
            while reg.types.len() <= idx {
                let slot = VoxelTypeId(reg.types.len() as u16);
                reg.types.push(VoxelType::placeholder(slot));
            }
            reg.types[idx] = ty;
        }
        if reg.types.first().map(|t| t.name.as_str()) != Some("empty") {
            return Err("voxel id 0 must be the \"empty\" type".into());
        }
        reg.by_name = reg
            .types
            .iter()
            .filter(|t| !t.name.is_empty())
            .map(|t| (t.name.clone(), t.id))
            .collect();
        Ok(reg)
    }
}

fn compile_voxel(reg: &VoxelTypeRegistry, def: VoxelDef) -> Result<VoxelType, Box<dyn Error>> {
    let id = VoxelTypeId(def.id.unwrap_or(reg.types.len() as u16));
    let shape = match def.shape.as_deref() {
        None | Some("cube") => ShapeKind::Cube,
        Some("lower_slab") => ShapeKind::LowerSlab,
        Some(other) => return Err(format!("voxel {:?}: unknown shape {other:?}", def.name).into()),
    };
    let tiles = def.tiles.unwrap_or_default();
    let pick = |role: Option<[u16; 2]>| -> Tile {
        role.or(tiles.all)
            .map(|[c, r]| Tile::new(c, r))
            .unwrap_or(Tile::BLACK)
    };
    Ok(VoxelType {
        id,
        name: def.name,
        shape,
        tile_top: pick(tiles.top),
        tile_bottom: pick(tiles.bottom),
        tile_side: pick(tiles.side),
        can_ramp: def.can_ramp,
        is_soil: def.is_soil,
        is_transparent: def.transparent,
        emits_light: def.emits_light,
        is_invincible: def.invincible,
    })
}

#[derive(Default, Clone, Debug)]
pub struct GrassRegistry {
    pub grasses: Vec<GrassType>,
    pub by_name: HashMap<String, GrassId>,
}

impl GrassRegistry {
    #[inline]
    pub fn get(&self, id: GrassId) -> Option<&GrassType> {
        if id.is_none() {
            return None;
        }
        self.grasses.get(id.0 as usize)
    }

    pub fn id_by_name(&self, name: &str) -> Option<GrassId> {
        self.by_name.get(name).copied()
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: GrassConfig = toml::from_str(toml_str)?;
        let mut reg = GrassRegistry::default();
        // Slot 0 is the "no grass" sentinel; real entries start at 1.
        reg.grasses.push(GrassType {
            id: GrassId::NONE,
            name: String::new(),
            tile_base: Tile::BLACK,
            tile_edge: Tile::BLACK,
            tile_corner: Tile::BLACK,
            precedence: 0,
            becomes: None,
        });
        let mut becomes_names: Vec<(GrassId, String)> = Vec::new();
        for def in cfg.grasses.into_iter() {
            let g = compile_grass(&reg, def, &mut becomes_names)?;
            let idx = g.id.0 as usize;
            if idx == 0 {
                return Err(format!("grass {:?}: id 0 is reserved", g.name).into());
            }
            if reg.grasses.len() <= idx {
                reg.grasses.resize_with(idx + 1, || GrassType {
                    id: GrassId::NONE,
                    name: String::new(),
                    tile_base: Tile::BLACK,
                    tile_edge: Tile::BLACK,
                    tile_corner: Tile::BLACK,
                    precedence: 0,
                    becomes: None,
                });
            }
            reg.grasses[idx] = g;
        }
        reg.by_name = reg
            .grasses
            .iter()
            .filter(|g| !g.name.is_empty())
            .map(|g| (g.name.clone(), g.id))
            .collect();
        // Resolve `becomes` names now that every grass has an id.
        for (id, target) in becomes_names {
            let Some(target_id) = reg.id_by_name(&target) else {
                return Err(format!("grass id {}: unknown becomes target {target:?}", id.0).into());
            };
            reg.grasses[id.0 as usize].becomes = Some(target_id);
        }
        Ok(reg)
    }
}

fn compile_grass(
    reg: &GrassRegistry,
    def: GrassDef,
    becomes_names: &mut Vec<(GrassId, String)>,
) -> Result<GrassType, Box<dyn Error>> {
    let id = GrassId(def.id.unwrap_or(reg.grasses.len() as u16));
    if let Some(target) = def.becomes {
        becomes_names.push((id, target));
    }
    let tile = |t: Option<[u16; 2]>| t.map(|[c, r]| Tile::new(c, r));
    let base = Tile::new(def.tile[0], def.tile[1]);
    Ok(GrassType {
        id,
        name: def.name,
        tile_base: base,
        tile_edge: tile(def.fringe_edge).unwrap_or(base),
        tile_corner: tile(def.fringe_corner).unwrap_or(base),
        precedence: def.precedence,
        becomes: None,
    })
}
