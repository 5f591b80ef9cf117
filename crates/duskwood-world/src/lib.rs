//! Camera-relative ground streaming and decoration placement.
#![forbid(unsafe_code)]

pub mod config;
pub mod decor;
pub mod ground;
pub mod registry;
pub mod streaming;
pub mod tile;

pub use config::{WorldConfig, WorldParams, load_config_from_path};
pub use decor::{Decoration, DecorationPlacer};
pub use ground::GroundGenerator;
pub use registry::{BlockRegistry, DecorationRegistry, GroundBlock};
pub use streaming::{
    Axis, AxisTrigger, DecorationRetention, LookBehind, PruneMode, StreamReport, StreamStats,
    StreamingController, StreamingPolicy, StreamingState,
};
pub use tile::TileKey;

/// Edge length of one ground block.
pub const BLOCK_SIZE: f32 = 1.0;
/// Edge length of a tile, in blocks.
pub const WORLD_SIZE: u32 = 50;
pub const TREES_PER_TILE: usize = 20;
pub const ROCKS_PER_TILE: usize = 10;
pub const WOLVES_PER_TILE: usize = 5;
pub const TRUNK_HEIGHT_MIN: f32 = 5.0;
pub const TRUNK_HEIGHT_MAX: f32 = 10.0;
