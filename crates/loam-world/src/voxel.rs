use loam_voxels::{GrassId, RampDirs, VoxelTypeId};

/// Derived per-voxel state bits, recomputed outside the mesher.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct VoxelFlags(pub u8);

impl VoxelFlags {
    pub const NONE: VoxelFlags = VoxelFlags(0);
    /// Revealed to the player; unexplored voxels render as black filler.
    pub const EXPLORED: VoxelFlags = VoxelFlags(1 << 0);
    /// Open to the sky down this voxel's column.
    pub const SUNLIT: VoxelFlags = VoxelFlags(1 << 1);
    /// Within the current viewing cutaway (non-empty and at or below the
    /// max viewing layer).
    pub const VISIBLE: VoxelFlags = VoxelFlags(1 << 2);

    #[inline]
    pub fn contains(self, other: VoxelFlags) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub fn insert(&mut self, other: VoxelFlags) {
        self.0 |= other.0;
    }

    #[inline]
    pub fn remove(&mut self, other: VoxelFlags) {
        self.0 &= !other.0;
    }
}

impl std::ops::BitOr for VoxelFlags {
    type Output = VoxelFlags;
    #[inline]
    fn bitor(self, rhs: VoxelFlags) -> VoxelFlags {
        VoxelFlags(self.0 | rhs.0)
    }
}

/// One cell of the world grid. Copyable; six bytes.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Voxel {
    pub ty: VoxelTypeId,
    pub grass: GrassId,
    pub ramp: RampDirs,
    pub flags: VoxelFlags,
}

impl Voxel {
    pub const EMPTY: Voxel = Voxel {
        ty: VoxelTypeId::EMPTY,
        grass: GrassId::NONE,
        ramp: RampDirs::NONE,
        flags: VoxelFlags::NONE,
    };

    #[inline]
    pub fn solid(ty: VoxelTypeId) -> Voxel {
        Voxel {
            ty,
            ..Voxel::EMPTY
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.ty == VoxelTypeId::EMPTY
    }

    #[inline]
    pub fn is_explored(self) -> bool {
        self.flags.contains(VoxelFlags::EXPLORED)
    }

    #[inline]
    pub fn is_sunlit(self) -> bool {
        self.flags.contains(VoxelFlags::SUNLIT)
    }

    #[inline]
    pub fn is_visible(self) -> bool {
        self.flags.contains(VoxelFlags::VISIBLE)
    }

    #[inline]
    pub fn is_ramped(self) -> bool {
        !self.ramp.is_none()
    }
}
