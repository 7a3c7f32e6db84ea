use loam_geom::Vec3;

/// Render-ready vertex/index accumulator. Streams are parallel arrays:
/// position (3 floats), two RGBA color packs (light channels and tint), UV,
/// and the per-vertex atlas clamp rectangle. Indices are `u32`, rebased when
/// layer blobs are concatenated.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct MeshBuf {
    pub pos: Vec<f32>,
    pub col0: Vec<u8>,
    pub col1: Vec<u8>,
    pub uv: Vec<f32>,
    pub uv_clamp: Vec<f32>,
    pub idx: Vec<u32>,
}

impl MeshBuf {
    #[inline]
    pub fn vertex_count(&self) -> u32 {
        (self.pos.len() / 3) as u32
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.idx.is_empty()
    }

    /// Clears all arrays but retains capacity for reuse.
    #[inline]
    pub fn clear_keep_capacity(&mut self) {
        self.pos.clear();
        self.col0.clear();
        self.col1.clear();
        self.uv.clear();
        self.uv_clamp.clear();
        self.idx.clear();
    }

    /// Pre-reserve approximately `n_quads` quads worth of data.
    #[inline]
    pub fn reserve_quads(&mut self, n_quads: usize) {
        self.pos.reserve(n_quads * 4 * 3);
        self.col0.reserve(n_quads * 4 * 4);
        self.col1.reserve(n_quads * 4 * 4);
        self.uv.reserve(n_quads * 4 * 2);
        self.uv_clamp.reserve(n_quads * 4 * 4);
        self.idx.reserve(n_quads * 6);
    }

    #[inline]
    pub fn push_vertex(
        &mut self,
        pos: Vec3,
        col0: [u8; 4],
        col1: [u8; 4],
        uv: [f32; 2],
        clamp: [f32; 4],
    ) {
        self.pos.extend_from_slice(&[pos.x, pos.y, pos.z]);
        self.col0.extend_from_slice(&col0);
        self.col1.extend_from_slice(&col1);
        self.uv.extend_from_slice(&uv);
        self.uv_clamp.extend_from_slice(&clamp);
    }

    /// Two triangles over the quad whose first vertex is `base`.
    #[inline]
    pub fn push_quad_indices(&mut self, base: u32) {
        self.idx
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    /// Appends `other` wholesale, rebasing its indices by the running vertex
    /// count. This is what lets each layer blob be cached independently.
    pub fn append(&mut self, other: &MeshBuf) {
        let base = self.vertex_count();
        self.pos.extend_from_slice(&other.pos);
        self.col0.extend_from_slice(&other.col0);
        self.col1.extend_from_slice(&other.col1);
        self.uv.extend_from_slice(&other.uv);
        self.uv_clamp.extend_from_slice(&other.uv_clamp);
        self.idx.extend(other.idx.iter().map(|i| i + base));
    }
}
