/// One corner of a voxel's top face, looking down +z ("front" is +z).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Corner {
    FrontLeft = 0,
    FrontRight = 1,
    BackLeft = 2,
    BackRight = 3,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::FrontLeft,
        Corner::FrontRight,
        Corner::BackLeft,
        Corner::BackRight,
    ];

    #[inline]
    pub fn bit(self) -> u8 {
        1u8 << (self as u8)
    }
}

/// 4-bit set of *raised* top-face corners. `NONE` means the voxel is not
/// ramped at all; a ramped voxel keeps the set bits at full height and drops
/// the unset corners.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct RampDirs(pub u8);

impl RampDirs {
    pub const NONE: RampDirs = RampDirs(0);
    pub const ALL: RampDirs = RampDirs(0b1111);

    #[inline]
    pub fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Whether this corner stays at full height.
    #[inline]
    pub fn raised(self, corner: Corner) -> bool {
        // Unramped voxels have flat, full-height tops.
        self.is_none() || self.0 & corner.bit() != 0
    }

    /// Whether this corner is a candidate for slope displacement.
    #[inline]
    pub fn lowered(self, corner: Corner) -> bool {
        !self.is_none() && self.0 & corner.bit() == 0
    }

    #[inline]
    pub fn with(self, corner: Corner) -> RampDirs {
        RampDirs(self.0 | corner.bit())
    }

    /// Ramp keeping every corner raised except `corner`.
    #[inline]
    pub fn all_but(corner: Corner) -> RampDirs {
        RampDirs(Self::ALL.0 & !corner.bit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_counts_as_all_raised() {
        for c in Corner::ALL {
            assert!(RampDirs::NONE.raised(c));
            assert!(!RampDirs::NONE.lowered(c));
        }
    }

    #[test]
    fn set_bits_are_raised_rest_lowered() {
        let r = RampDirs::NONE.with(Corner::BackLeft).with(Corner::BackRight);
        assert!(r.raised(Corner::BackLeft));
        assert!(r.raised(Corner::BackRight));
        assert!(r.lowered(Corner::FrontLeft));
        assert!(r.lowered(Corner::FrontRight));
    }
}
