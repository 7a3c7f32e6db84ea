//! Read-only voxel query surface consumed by the mesher, plus the chunk
//! storage behind it and a small demo terrain filler for tests and the dev
//! harness.
#![forbid(unsafe_code)]

pub mod chunk;
pub mod demo;
pub mod voxel;
pub mod world;

pub use chunk::{CHUNK_SIZE, ChunkCoord, ChunkVoxels};
pub use voxel::{Voxel, VoxelFlags};
pub use world::{VoxelHandle, WorldVoxels};
