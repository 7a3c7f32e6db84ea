//! Face culling. Two tiers: unexplored voxels render as opaque filler and
//! only open up toward revealed open space, while explored voxels cull against
//! their neighbors' contents, transparency, cutaway visibility, and ramps.

use loam_voxels::{Corner, RampDirs, VoxelTypeRegistry};
use loam_world::{Voxel, VoxelHandle, WorldVoxels};

use crate::face::Face;

/// Shared vertical edges of a side face: (self corner, neighbor corner)
/// pairs. A neighbor's ramp exposes the face when the neighbor drops a
/// corner that we keep raised on the same edge.
fn edge_pairs(face: Face) -> Option<[(Corner, Corner); 2]> {
    use Corner::*;
    match face {
        Face::PosX => Some([(FrontRight, FrontLeft), (BackRight, BackLeft)]),
        Face::NegX => Some([(FrontLeft, FrontRight), (BackLeft, BackRight)]),
        Face::PosZ => Some([(FrontLeft, BackLeft), (FrontRight, BackRight)]),
        Face::NegZ => Some([(BackLeft, FrontLeft), (BackRight, FrontRight)]),
        Face::PosY | Face::NegY => None,
    }
}

/// Whether `neighbor_ramp` leaves part of this side face uncovered.
pub fn ramp_exposes(face: Face, neighbor_ramp: RampDirs, self_ramp: RampDirs) -> bool {
    let Some(pairs) = edge_pairs(face) else {
        return false;
    };
    pairs
        .iter()
        .any(|&(own, nb)| neighbor_ramp.lowered(nb) && self_ramp.raised(own))
}

/// The culling decision for one face of the voxel at `h`.
pub fn face_visible(
    world: &WorldVoxels,
    types: &VoxelTypeRegistry,
    h: VoxelHandle,
    face: Face,
) -> bool {
    let Some(v) = h.resolve(world) else {
        return false;
    };
    // Explored air produces nothing; unexplored air still renders as filler.
    if v.is_explored() && v.is_empty() {
        return false;
    }
    let (dx, dy, dz) = face.delta();
    let neighbor = h.offset(dx, dy, dz).resolve(world);

    let Some(n) = neighbor else {
        // World edge: solid explored voxels and all unexplored voxels close
        // the hole, explored air was handled above.
        return true;
    };

    if !v.is_explored() {
        // Filler opens up only toward revealed open space, or where a
        // revealed ramp next door leaves the side uncovered.
        if n.is_explored() && n.is_empty() {
            return true;
        }
        return face.is_side()
            && n.is_explored()
            && n.is_ramped()
            && ramp_exposes(face, n.ramp, v.ramp);
    }

    if n.is_explored() && n.is_empty() {
        return true;
    }
    // Thin roof: the voxel above exists but is cut away from view.
    if face == Face::PosY && !n.is_visible() {
        return true;
    }
    if n.is_explored() && is_transparent(types, n) && !is_transparent(types, v) {
        return true;
    }
    if n.is_explored() && n.is_ramped() && ramp_exposes(face, n.ramp, v.ramp) {
        return true;
    }
    false
}

#[inline]
fn is_transparent(types: &VoxelTypeRegistry, v: Voxel) -> bool {
    types.get(v.ty).is_some_and(|t| t.is_transparent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use loam_voxels::Corner::*;

    fn ramp(corners: &[Corner]) -> RampDirs {
        corners.iter().fold(RampDirs::NONE, |r, &c| r.with(c))
    }

    #[test]
    fn flat_neighbor_exposes_nothing() {
        for face in Face::ALL {
            assert!(!ramp_exposes(face, RampDirs::NONE, RampDirs::NONE));
        }
    }

    #[test]
    fn lowered_edge_corner_exposes_the_shared_face() {
        // East neighbor keeps only its back corners: the shared edge drops
        // at the neighbor's front-left, which meets our front-right.
        let nb = ramp(&[BackLeft, BackRight]);
        assert!(ramp_exposes(Face::PosX, nb, RampDirs::NONE));
        // The mirror face against the same ramp from the other side: our
        // NegX face faces the neighbor's right edge, which stays raised at
        // the back and drops at the front.
        assert!(ramp_exposes(Face::NegX, nb, RampDirs::NONE));
        // Top and bottom never participate.
        assert!(!ramp_exposes(Face::PosY, nb, RampDirs::NONE));
        assert!(!ramp_exposes(Face::NegY, nb, RampDirs::NONE));
    }

    #[test]
    fn matching_slopes_do_not_expose() {
        // Both voxels drop their front corners: the shared east/west edge
        // drops on both sides, nothing is uncovered.
        let both = ramp(&[BackLeft, BackRight]);
        assert!(!ramp_exposes(Face::PosX, both, both));
        assert!(!ramp_exposes(Face::NegX, both, both));
    }

    #[test]
    fn self_slope_covers_the_exposure() {
        // Neighbor drops toward us but we drop the same edge ourselves.
        let nb = ramp(&[BackLeft, BackRight]);
        let own = ramp(&[BackLeft, BackRight]);
        assert!(!ramp_exposes(Face::PosX, nb, own));
        // If we keep even one shared-edge corner raised, it shows.
        let own_partial = ramp(&[BackLeft, BackRight, FrontRight]);
        assert!(ramp_exposes(Face::PosX, nb, own_partial));
    }
}
