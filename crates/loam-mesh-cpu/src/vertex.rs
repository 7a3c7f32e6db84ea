//! Logical vertex identities and their canonical lattice keys.
//!
//! Every cube corner is named by its octant inside the cell: bit 0 is east
//! (+x, "right"), bit 1 is up (+y, "top"), bit 2 is front (+z). The world
//! position of a vertex (its lattice point) is shared by up to 8 cells, which
//! is what makes it usable as a layer-wide cache key.

use loam_voxels::Corner;
use loam_world::VoxelHandle;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum LogicalVertex {
    BackBottomLeft = 0,
    BackBottomRight = 1,
    BackTopLeft = 2,
    BackTopRight = 3,
    FrontBottomLeft = 4,
    FrontBottomRight = 5,
    FrontTopLeft = 6,
    FrontTopRight = 7,
}

impl LogicalVertex {
    pub const ALL: [LogicalVertex; 8] = [
        LogicalVertex::BackBottomLeft,
        LogicalVertex::BackBottomRight,
        LogicalVertex::BackTopLeft,
        LogicalVertex::BackTopRight,
        LogicalVertex::FrontBottomLeft,
        LogicalVertex::FrontBottomRight,
        LogicalVertex::FrontTopLeft,
        LogicalVertex::FrontTopRight,
    ];

    #[inline]
    pub fn bits(self) -> u8 {
        self as u8
    }

    /// Cell-local offset of the vertex, each component 0 or 1.
    #[inline]
    pub fn offset(self) -> (i32, i32, i32) {
        let b = self.bits();
        ((b & 1) as i32, ((b >> 1) & 1) as i32, ((b >> 2) & 1) as i32)
    }

    #[inline]
    pub fn is_top(self) -> bool {
        self.bits() & 0b010 != 0
    }

    /// Ramp corner for a top vertex; bottom vertices map to the corner
    /// directly above them.
    #[inline]
    pub fn corner(self) -> Corner {
        match (self.bits() & 0b100 != 0, self.bits() & 1 != 0) {
            (true, false) => Corner::FrontLeft,
            (true, true) => Corner::FrontRight,
            (false, false) => Corner::BackLeft,
            (false, true) => Corner::BackRight,
        }
    }

    /// World lattice point of this vertex of the cell at `h`.
    #[inline]
    pub fn lattice(self, h: VoxelHandle) -> (i32, i32, i32) {
        let (ox, oy, oz) = self.offset();
        (h.wx + ox, h.wy + oy, h.wz + oz)
    }

    /// Canonical cache key for the lattice point: three biased 21-bit fields.
    #[inline]
    pub fn lattice_key(self, h: VoxelHandle) -> u64 {
        let (x, y, z) = self.lattice(h);
        pack_lattice(x, y, z)
    }

    /// The 8 cells of the 2x2x2 neighborhood around this vertex's lattice
    /// point, the cell at `h` included.
    #[inline]
    pub fn cells_3d(self, h: VoxelHandle) -> [VoxelHandle; 8] {
        let (x, y, z) = self.lattice(h);
        let mut out = [VoxelHandle::new(0, 0, 0); 8];
        let mut i = 0;
        for dy in [-1, 0] {
            for dz in [-1, 0] {
                for dx in [-1, 0] {
                    out[i] = VoxelHandle::new(x + dx, y + dy, z + dz);
                    i += 1;
                }
            }
        }
        out
    }

    /// The 4 cells in `h`'s own layer that touch this vertex horizontally,
    /// the cell at `h` included.
    #[inline]
    pub fn cells_2d(self, h: VoxelHandle) -> [VoxelHandle; 4] {
        let (x, _, z) = self.lattice(h);
        [
            VoxelHandle::new(x - 1, h.wy, z - 1),
            VoxelHandle::new(x, h.wy, z - 1),
            VoxelHandle::new(x - 1, h.wy, z),
            VoxelHandle::new(x, h.wy, z),
        ]
    }
}

const LATTICE_BIAS: i64 = 1 << 20;

#[inline]
pub fn pack_lattice(x: i32, y: i32, z: i32) -> u64 {
    let bx = (x as i64 + LATTICE_BIAS) as u64 & 0x1F_FFFF;
    let by = (y as i64 + LATTICE_BIAS) as u64 & 0x1F_FFFF;
    let bz = (z as i64 + LATTICE_BIAS) as u64 & 0x1F_FFFF;
    (bx << 42) | (by << 21) | bz
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_vertices_share_keys() {
        // The top-front-right vertex of the origin cell is the same lattice
        // point as the top-back-left vertex of the cell at (1, 0, 1).
        let a = LogicalVertex::FrontTopRight.lattice_key(VoxelHandle::new(0, 0, 0));
        let b = LogicalVertex::BackTopLeft.lattice_key(VoxelHandle::new(1, 0, 1));
        assert_eq!(a, b);
        // And the bottom-front-right of the cell directly above.
        let c = LogicalVertex::FrontBottomRight.lattice_key(VoxelHandle::new(0, 1, 0));
        assert_eq!(a, c);
    }

    #[test]
    fn distinct_points_get_distinct_keys() {
        let h = VoxelHandle::new(-3, 5, 7);
        let mut keys = std::collections::HashSet::new();
        for lv in LogicalVertex::ALL {
            assert!(keys.insert(lv.lattice_key(h)));
        }
        // Negative coordinates stay distinct from their mirrored positives.
        assert_ne!(pack_lattice(-1, 0, 0), pack_lattice(1, 0, 0));
    }

    #[test]
    fn cells_3d_cover_the_corner_neighborhood() {
        let h = VoxelHandle::new(0, 0, 0);
        let cells = LogicalVertex::FrontTopRight.cells_3d(h);
        assert!(cells.contains(&h));
        assert!(cells.contains(&VoxelHandle::new(1, 1, 1)));
        assert!(cells.contains(&VoxelHandle::new(0, 1, 0)));
        let unique: std::collections::HashSet<_> = cells.iter().collect();
        assert_eq!(unique.len(), 8);
    }

    #[test]
    fn top_corners_map_to_ramp_corners() {
        assert_eq!(LogicalVertex::FrontTopLeft.corner(), Corner::FrontLeft);
        assert_eq!(LogicalVertex::FrontTopRight.corner(), Corner::FrontRight);
        assert_eq!(LogicalVertex::BackTopLeft.corner(), Corner::BackLeft);
        assert_eq!(LogicalVertex::BackTopRight.corner(), Corner::BackRight);
    }
}
