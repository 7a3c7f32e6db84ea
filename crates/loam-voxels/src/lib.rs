//! Voxel-type and grass-type tables.
//!
//! Both registries are loaded once from TOML at startup, compiled into flat
//! `Vec`s indexed by id, and passed around by shared reference. Nothing here
//! is mutated after load.
#![forbid(unsafe_code)]

pub mod config;
pub mod ramp;
pub mod registry;
pub mod types;

pub use ramp::{Corner, RampDirs};
pub use registry::{GrassRegistry, VoxelTypeRegistry};
pub use types::{GrassId, GrassType, ShapeKind, Tile, VoxelType, VoxelTypeId};
