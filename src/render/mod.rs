//! Tile rendering
//!
//! Turns chunks into top-down map tiles:
//! - textures: one sprite per block type
//! - tile: the pixel buffer a mode draws into
//! - pipeline: the per-tile block walk driving a render mode
//! - batch: every chunk in every mode, on worker threads

pub mod textures;
pub mod tile;
pub mod pipeline;
pub mod batch;

pub use textures::{BlockSprite, BlockTextures, SHEET_COLUMNS};
pub use tile::{blend, TileBuffer};
pub use pipeline::{render_tile, RenderedTile, TileRenderer};
pub use batch::{render_world, tile_path, BatchOptions, RenderError, RenderSummary, TileSummary};
