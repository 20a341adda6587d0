//! World module
//!
//! Contains block and chunk data structures, lighting and demo terrain.

pub mod block;
pub mod chunk;
pub mod terrain;

pub use block::BlockType;
pub use chunk::Chunk;
pub use terrain::{generate_chunk, generate_world, SEA_LEVEL};

/// Blocks along the x axis of a chunk
pub const CHUNK_WIDTH: usize = 16;
/// Blocks along the z axis of a chunk
pub const CHUNK_DEPTH: usize = 16;
/// Blocks along the y (vertical) axis of a chunk
pub const CHUNK_HEIGHT: usize = 128;
/// Brightest light level
pub const MAX_LIGHT: u8 = 15;
