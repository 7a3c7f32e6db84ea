//! CPU chunk mesher: face culling, per-vertex lighting, ramp displacement,
//! grass fringe decals, and per-layer geometry caching.
#![forbid(unsafe_code)]

pub mod build;
pub mod cache;
pub mod face;
pub mod fringe;
pub mod lighting;
pub mod mesh_buf;
pub mod slice_cache;
pub mod slope;
pub mod templates;
pub mod tiles;
pub mod vertex;
pub mod visibility;

pub use build::{BuildOptions, BuildStats, build_chunk_mesh};
pub use cache::ChunkMeshCache;
pub use face::{Face, FaceRole};
pub use mesh_buf::MeshBuf;
pub use slice_cache::{LightSample, SliceCache};
pub use vertex::LogicalVertex;
