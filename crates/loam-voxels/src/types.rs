use serde::Deserialize;

/// Index into `VoxelTypeRegistry::types`. Id 0 is always the empty type.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, PartialOrd, Ord, Deserialize)]
pub struct VoxelTypeId(pub u16);

impl VoxelTypeId {
    pub const EMPTY: VoxelTypeId = VoxelTypeId(0);
}

/// Index into `GrassRegistry::grasses`. Id 0 means "no grass decal".
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, PartialOrd, Ord, Deserialize)]
pub struct GrassId(pub u16);

impl GrassId {
    pub const NONE: GrassId = GrassId(0);

    #[inline]
    pub fn is_none(self) -> bool {
        self == GrassId::NONE
    }
}

/// Column/row coordinate into the texture atlas.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Tile {
    pub col: u16,
    pub row: u16,
}

impl Tile {
    /// Reserved solid-black tile used for unexplored filler geometry.
    pub const BLACK: Tile = Tile { col: 15, row: 15 };

    #[inline]
    pub const fn new(col: u16, row: u16) -> Self {
        Self { col, row }
    }
}

/// Base geometry class of a voxel type, fixed at load time.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ShapeKind {
    #[default]
    Cube,
    /// Half-height cube occupying the lower half of the cell.
    LowerSlab,
}

/// Compiled voxel type. Tiles are resolved per face role at load time so the
/// mesher never touches config strings.
#[derive(Clone, Debug)]
pub struct VoxelType {
    pub id: VoxelTypeId,
    pub name: String,
    pub shape: ShapeKind,
    pub tile_top: Tile,
    pub tile_bottom: Tile,
    pub tile_side: Tile,
    pub can_ramp: bool,
    pub is_soil: bool,
    pub is_transparent: bool,
    pub emits_light: bool,
    pub is_invincible: bool,
}

impl VoxelType {
    pub(crate) fn placeholder(id: VoxelTypeId) -> Self {
        VoxelType {
            id,
            name: String::new(),
            shape: ShapeKind::Cube,
            tile_top: Tile::BLACK,
            tile_bottom: Tile::BLACK,
            tile_side: Tile::BLACK,
            can_ramp: false,
            is_soil: false,
            is_transparent: false,
            emits_light: false,
            is_invincible: false,
        }
    }
}

/// Compiled grass decal definition.
#[derive(Clone, Debug)]
pub struct GrassType {
    pub id: GrassId,
    pub name: String,
    /// Tile drawn on the owning top face.
    pub tile_base: Tile,
    /// Straight-edge skirt tile.
    pub tile_edge: Tile,
    /// Hanging-corner skirt tile.
    pub tile_corner: Tile,
    /// Arbitrates which of two adjacent grass types draws the shared fringe;
    /// higher wins.
    pub precedence: u8,
    /// Optional decay transition target (e.g. lush -> dry).
    pub becomes: Option<GrassId>,
}
