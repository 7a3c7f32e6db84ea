//! Static per-shape face templates: unit-cell vertex positions, logical
//! vertex identity for cache/neighbor lookups, UV anchors, and the slope
//! eligibility flag. Shared by every voxel of the same shape.

use loam_voxels::ShapeKind;

use crate::face::Face;
use crate::vertex::LogicalVertex;

#[derive(Copy, Clone, Debug)]
pub struct TemplateVertex {
    pub lv: LogicalVertex,
    /// Position in unit-cell space.
    pub pos: [f32; 3],
    /// UV anchor inside the face's atlas tile.
    pub uv: [f32; 2],
    /// Whether the slope evaluator may displace this vertex downward.
    pub apply_slope: bool,
}

#[derive(Copy, Clone, Debug)]
pub struct FaceTemplate {
    pub face: Face,
    /// Quad corners; triangles are (0,1,2) and (0,2,3), wound outward.
    pub verts: [TemplateVertex; 4],
}

#[derive(Copy, Clone, Debug)]
pub struct ShapeTemplate {
    pub faces: [FaceTemplate; 6],
}

impl ShapeTemplate {
    #[inline]
    pub fn face(&self, face: Face) -> &FaceTemplate {
        &self.faces[face.index()]
    }
}

const fn tv(
    lv: LogicalVertex,
    pos: [f32; 3],
    uv: [f32; 2],
    apply_slope: bool,
) -> TemplateVertex {
    TemplateVertex {
        lv,
        pos,
        uv,
        apply_slope,
    }
}

/// Full-height cube; every top-edge vertex follows the ramp so side faces
/// stay stitched to a sloped top.
pub const CUBE: ShapeTemplate = cell_template(1.0, true);

/// Half-height step; never sloped.
pub const LOWER_SLAB: ShapeTemplate = cell_template(0.5, false);

const fn cell_template(h: f32, slope_top: bool) -> ShapeTemplate {
    use LogicalVertex::*;
    ShapeTemplate {
        faces: [
            FaceTemplate {
                face: Face::PosY,
                verts: [
                    tv(BackTopLeft, [0.0, h, 0.0], [0.0, 0.0], slope_top),
                    tv(FrontTopLeft, [0.0, h, 1.0], [0.0, 1.0], slope_top),
                    tv(FrontTopRight, [1.0, h, 1.0], [1.0, 1.0], slope_top),
                    tv(BackTopRight, [1.0, h, 0.0], [1.0, 0.0], slope_top),
                ],
            },
            FaceTemplate {
                face: Face::NegY,
                verts: [
                    tv(BackBottomLeft, [0.0, 0.0, 0.0], [0.0, 0.0], false),
                    tv(BackBottomRight, [1.0, 0.0, 0.0], [1.0, 0.0], false),
                    tv(FrontBottomRight, [1.0, 0.0, 1.0], [1.0, 1.0], false),
                    tv(FrontBottomLeft, [0.0, 0.0, 1.0], [0.0, 1.0], false),
                ],
            },
            FaceTemplate {
                face: Face::PosX,
                verts: [
                    tv(BackBottomRight, [1.0, 0.0, 0.0], [0.0, 1.0], false),
                    tv(BackTopRight, [1.0, h, 0.0], [0.0, 0.0], slope_top),
                    tv(FrontTopRight, [1.0, h, 1.0], [1.0, 0.0], slope_top),
                    tv(FrontBottomRight, [1.0, 0.0, 1.0], [1.0, 1.0], false),
                ],
            },
            FaceTemplate {
                face: Face::NegX,
                verts: [
                    tv(FrontBottomLeft, [0.0, 0.0, 1.0], [0.0, 1.0], false),
                    tv(FrontTopLeft, [0.0, h, 1.0], [0.0, 0.0], slope_top),
                    tv(BackTopLeft, [0.0, h, 0.0], [1.0, 0.0], slope_top),
                    tv(BackBottomLeft, [0.0, 0.0, 0.0], [1.0, 1.0], false),
                ],
            },
            FaceTemplate {
                face: Face::PosZ,
                verts: [
                    tv(FrontBottomRight, [1.0, 0.0, 1.0], [0.0, 1.0], false),
                    tv(FrontTopRight, [1.0, h, 1.0], [0.0, 0.0], slope_top),
                    tv(FrontTopLeft, [0.0, h, 1.0], [1.0, 0.0], slope_top),
                    tv(FrontBottomLeft, [0.0, 0.0, 1.0], [1.0, 1.0], false),
                ],
            },
            FaceTemplate {
                face: Face::NegZ,
                verts: [
                    tv(BackBottomLeft, [0.0, 0.0, 0.0], [0.0, 1.0], false),
                    tv(BackTopLeft, [0.0, h, 0.0], [0.0, 0.0], slope_top),
                    tv(BackTopRight, [1.0, h, 0.0], [1.0, 0.0], slope_top),
                    tv(BackBottomRight, [1.0, 0.0, 0.0], [1.0, 1.0], false),
                ],
            },
        ],
    }
}

#[inline]
pub fn for_shape(kind: ShapeKind) -> &'static ShapeTemplate {
    match kind {
        ShapeKind::Cube => &CUBE,
        ShapeKind::LowerSlab => &LOWER_SLAB,
    }
}
