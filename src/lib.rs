//! Blockmap - top-down map tiles for block worlds
//!
//! Chunks are rendered through named render modes picked from a fixed
//! catalog. Configuration lists the modes by name; each one decides how a
//! visible block ends up in the tile.

pub mod config;
pub mod render;
pub mod rendermode;
pub mod world;

// Re-export commonly used types
pub use config::{ConfigError, RenderConfig, WorldConfig};
pub use render::{render_tile, render_world, BatchOptions, BlockTextures, RenderError, TileBuffer};
pub use rendermode::{RenderMode, RenderModeDescriptor, RenderModeError, RenderModeInfo};
pub use world::{BlockType, Chunk};

