//! Render modes
//!
//! A render mode is a named strategy for turning a chunk into a map tile.
//! Every mode implements [`RenderMode`]; the fixed catalog of modes lives in
//! [`registry`] and is looked up by name from configuration.
//!
//! Modes shipped:
//! - normal: plain block textures
//! - lighting: textures shaded by sky and block light
//! - night: lighting with the sun down
//! - spawn: night, with monster spawn spots marked in red
//! - cave: only what lies underground, tinted by depth

pub mod registry;
mod normal;
mod lighting;
mod night;
mod spawn;
mod cave;

pub use registry::{
    describe, descriptors, find, list_names, resolve, Catalog, RenderModeDescriptor,
    RenderModeError, RenderModeInfo,
};
pub use normal::NormalMode;
pub use lighting::{LightingMode, ShadeTable};
pub use night::NightMode;
pub use spawn::SpawnMode;
pub use cave::{CaveMode, DepthRange};

use crate::render::{BlockTextures, TileBuffer};
use crate::world::{BlockType, Chunk};

/// What a mode can see while drawing one tile
#[derive(Clone, Copy)]
pub struct TileContext<'a> {
    pub chunk: &'a Chunk,
    pub textures: &'a BlockTextures,
}

impl<'a> TileContext<'a> {
    pub fn new(chunk: &'a Chunk, textures: &'a BlockTextures) -> Self {
        Self { chunk, textures }
    }

    /// Sky and block light on the top face of a block
    pub fn light_above(&self, view: &BlockView) -> (u8, u8) {
        (
            self.chunk.sky_light(view.x, view.y + 1, view.z),
            self.chunk.block_light(view.x, view.y + 1, view.z),
        )
    }
}

/// A visible block handed to [`RenderMode::draw`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockView {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub block: BlockType,
}

/// Tile-scoped scratch data.
///
/// Owned by whoever walks the tile: created fresh for every tile, filled in
/// by [`RenderMode::start`] and handed to every other entry point.
#[derive(Debug, Clone, Default)]
pub struct ModeState {
    /// Light level to shadow lookup
    pub shade: Option<ShadeTable>,
    /// Vertical extent used for depth tinting
    pub depth: Option<DepthRange>,
    /// Blocks a mode flagged while drawing
    pub marked: usize,
}

/// Capability contract every render mode implements.
///
/// Only [`draw`](RenderMode::draw) is required. The other entry points
/// default to doing nothing, which is always correct; `occludes` only lets
/// the block walk skip work.
pub trait RenderMode: Send + Sync {
    /// Called once per tile before any block is drawn
    fn start(&self, _tile: &TileContext<'_>, _state: &mut ModeState) {}

    /// Called once per tile after every block has been drawn
    fn finish(&self, _tile: &TileContext<'_>, _state: &mut ModeState) {}

    /// Whether this block fully hides the blocks below it in its column.
    /// Returning `true` stops the walk from visiting them at all.
    fn occludes(&self, _tile: &TileContext<'_>, _state: &ModeState, _view: &BlockView) -> bool {
        false
    }

    /// Draw one visible block into the tile
    fn draw(
        &self,
        tile: &TileContext<'_>,
        state: &mut ModeState,
        view: &BlockView,
        buf: &mut TileBuffer,
    );
}
