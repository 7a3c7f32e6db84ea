use loam_voxels::{GrassId, GrassRegistry, ShapeKind, Tile, VoxelTypeId, VoxelTypeRegistry};

const VOXELS_TOML: &str = r#"
[[voxels]]
id = 0
name = "empty"

[[voxels]]
name = "stone"
tiles = { all = [1, 0] }

[[voxels]]
name = "soil"
shape = "cube"
tiles = { top = [2, 0], side = [3, 0], bottom = [4, 0] }
can_ramp = true
is_soil = true

[[voxels]]
name = "step"
shape = "lower_slab"
tiles = { all = [5, 0] }
"#;

const GRASS_TOML: &str = r#"
[[grasses]]
name = "lush"
tile = [0, 1]
fringe_edge = [1, 1]
fringe_corner = [2, 1]
precedence = 5
becomes = "dry"

[[grasses]]
name = "dry"
tile = [3, 1]
precedence = 2
"#;

#[test]
fn voxel_registry_compiles_roles_and_ids() {
    let reg = VoxelTypeRegistry::from_toml_str(VOXELS_TOML).expect("parse voxels");
    assert_eq!(reg.id_by_name("empty"), Some(VoxelTypeId::EMPTY));
    let soil = reg.get(reg.id_by_name("soil").expect("soil id")).expect("soil type");
    assert_eq!(soil.tile_top, Tile::new(2, 0));
    assert_eq!(soil.tile_side, Tile::new(3, 0));
    assert_eq!(soil.tile_bottom, Tile::new(4, 0));
    assert!(soil.can_ramp && soil.is_soil);
    assert!(!soil.is_transparent && !soil.emits_light);

    // `all` fans out to every role.
    let stone = reg.get(reg.id_by_name("stone").expect("stone id")).expect("stone type");
    assert_eq!(stone.tile_top, Tile::new(1, 0));
    assert_eq!(stone.tile_bottom, Tile::new(1, 0));
    assert_eq!(stone.shape, ShapeKind::Cube);

    let step = reg.get(reg.id_by_name("step").expect("step id")).expect("step type");
    assert_eq!(step.shape, ShapeKind::LowerSlab);
}

#[test]
fn voxel_registry_rejects_missing_empty() {
    let err = VoxelTypeRegistry::from_toml_str(
        r#"
        [[voxels]]
        name = "stone"
        "#,
    );
    assert!(err.is_err());
}

#[test]
fn grass_registry_resolves_becomes_and_reserves_zero() {
    let reg = GrassRegistry::from_toml_str(GRASS_TOML).expect("parse grass");
    assert!(reg.get(GrassId::NONE).is_none());
    let lush_id = reg.id_by_name("lush").expect("lush id");
    let dry_id = reg.id_by_name("dry").expect("dry id");
    let lush = reg.get(lush_id).expect("lush");
    assert_eq!(lush.becomes, Some(dry_id));
    assert_eq!(lush.precedence, 5);
    // Fringe tiles fall back to the base tile when unset.
    let dry = reg.get(dry_id).expect("dry");
    assert_eq!(dry.tile_edge, dry.tile_base);
    assert_eq!(dry.becomes, None);
}

#[test]
fn grass_registry_rejects_unknown_becomes() {
    let err = GrassRegistry::from_toml_str(
        r#"
        [[grasses]]
        name = "lush"
        tile = [0, 1]
        becomes = "nope"
        "#,
    );
    assert!(err.is_err());
}
