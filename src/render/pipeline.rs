//! Tile rendering pipeline
//!
//! Walks a chunk column by column and hands every visible block to the
//! capabilities of a resolved render mode.

use super::{BlockTextures, TileBuffer};
use crate::rendermode::{self, BlockView, ModeState, RenderModeDescriptor, RenderModeError, TileContext};
use crate::world::{Chunk, CHUNK_DEPTH, CHUNK_HEIGHT, CHUNK_WIDTH};

/// A finished tile
#[derive(Debug, Clone)]
pub struct RenderedTile {
    pub buffer: TileBuffer,
    /// Blocks handed to the mode's draw entry point
    pub blocks_drawn: usize,
    /// Blocks the mode flagged (spawn spots, ...)
    pub marked: usize,
}

/// Renders chunks with one render mode
pub struct TileRenderer<'t> {
    mode: &'static RenderModeDescriptor,
    textures: &'t BlockTextures,
}

impl<'t> TileRenderer<'t> {
    pub fn new(mode: &'static RenderModeDescriptor, textures: &'t BlockTextures) -> Self {
        Self { mode, textures }
    }

    /// Build a renderer from a configured mode name. Unknown names fail
    /// here, before any block is drawn.
    pub fn for_mode(name: &str, textures: &'t BlockTextures) -> Result<Self, RenderModeError> {
        Ok(Self::new(rendermode::resolve(name)?, textures))
    }

    pub fn mode(&self) -> &'static RenderModeDescriptor {
        self.mode
    }

    /// Render one chunk into a tile
    pub fn render(&self, chunk: &Chunk) -> RenderedTile {
        render_tile(self.mode, chunk, self.textures)
    }
}

/// Render one chunk with a resolved mode.
///
/// Each column is scanned top-down, collecting non-air blocks until the
/// mode reports one as occluding, then drawn bottom-up so upper blocks
/// cover lower ones.
pub fn render_tile(mode: &RenderModeDescriptor, chunk: &Chunk, textures: &BlockTextures) -> RenderedTile {
    let caps = mode.capabilities;
    let tile = TileContext::new(chunk, textures);
    let mut state = ModeState::default();
    let mut buffer = TileBuffer::new(textures.block_px());
    let mut column: Vec<BlockView> = Vec::with_capacity(CHUNK_HEIGHT);
    let mut blocks_drawn = 0;

    caps.start(&tile, &mut state);

    for x in 0..CHUNK_WIDTH as i32 {
        for z in 0..CHUNK_DEPTH as i32 {
            column.clear();
            for y in (0..CHUNK_HEIGHT as i32).rev() {
                let block = chunk.block(x, y, z);
                if block.is_air() {
                    continue;
                }

                let view = BlockView { x, y, z, block };
                column.push(view);
                if caps.occludes(&tile, &state, &view) {
                    break;
                }
            }

            for view in column.iter().rev() {
                caps.draw(&tile, &mut state, view, &mut buffer);
            }
            blocks_drawn += column.len();
        }
    }

    caps.finish(&tile, &mut state);

    log::debug!(
        "Rendered chunk ({}, {}) in {} mode: {} blocks drawn",
        chunk.cx,
        chunk.cz,
        mode.name,
        blocks_drawn
    );

    RenderedTile {
        buffer,
        blocks_drawn,
        marked: state.marked,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendermode::{NormalMode, RenderMode};
    use crate::world::BlockType;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Records every entry point call; never occludes
    #[derive(Default)]
    struct Recorder {
        starts: AtomicUsize,
        finishes: AtomicUsize,
        draws: AtomicUsize,
    }

    impl RenderMode for Recorder {
        fn start(&self, _tile: &TileContext<'_>, _state: &mut ModeState) {
            self.starts.fetch_add(1, Ordering::SeqCst);
        }

        fn finish(&self, _tile: &TileContext<'_>, _state: &mut ModeState) {
            self.finishes.fetch_add(1, Ordering::SeqCst);
        }

        fn draw(&self, _tile: &TileContext<'_>, _state: &mut ModeState, _view: &BlockView, _buf: &mut TileBuffer) {
            self.draws.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn layered_chunk() -> Chunk {
        let mut chunk = Chunk::new(0, 0);
        for x in 0..CHUNK_WIDTH as i32 {
            for z in 0..CHUNK_DEPTH as i32 {
                chunk.set_block(x, 0, z, BlockType::Bedrock);
                chunk.set_block(x, 1, z, BlockType::Stone);
                chunk.set_block(x, 2, z, BlockType::Water);
            }
        }
        chunk.compute_lighting();
        chunk
    }

    fn recorder_mode() -> (&'static Recorder, &'static RenderModeDescriptor) {
        let caps: &'static Recorder = Box::leak(Box::new(Recorder::default()));
        let mode = Box::leak(Box::new(RenderModeDescriptor {
            name: "recorder",
            description: "counts calls",
            capabilities: caps,
        }));
        (caps, mode)
    }

    #[test]
    fn test_walk_without_occlusion_visits_everything() {
        let chunk = layered_chunk();
        let textures = BlockTextures::generated(1);
        let (_, mode) = recorder_mode();

        let tile = render_tile(mode, &chunk, &textures);

        assert_eq!(tile.blocks_drawn, CHUNK_WIDTH * CHUNK_DEPTH * 3);
    }

    #[test]
    fn test_setup_and_teardown_once_per_tile() {
        let chunk = layered_chunk();
        let textures = BlockTextures::generated(1);
        let (caps, mode) = recorder_mode();

        render_tile(mode, &chunk, &textures);
        render_tile(mode, &chunk, &textures);

        assert_eq!(caps.starts.load(Ordering::SeqCst), 2);
        assert_eq!(caps.finishes.load(Ordering::SeqCst), 2);
        assert_eq!(caps.draws.load(Ordering::SeqCst), 2 * CHUNK_WIDTH * CHUNK_DEPTH * 3);
    }

    #[test]
    fn test_occlusion_stops_column_walk() {
        let chunk = layered_chunk();
        let textures = BlockTextures::generated(1);
        let renderer = TileRenderer::for_mode("normal", &textures).unwrap();

        let tile = renderer.render(&chunk);

        // Water is see-through, stone is not: bedrock is never visited
        assert_eq!(tile.blocks_drawn, CHUNK_WIDTH * CHUNK_DEPTH * 2);
        assert!(!tile.buffer.is_blank());
    }

    #[test]
    fn test_occlusion_does_not_change_pixels() {
        let chunk = layered_chunk();
        let textures = BlockTextures::generated(2);
        let normal = rendermode::resolve("normal").unwrap();
        let everything = RenderModeDescriptor {
            name: "normal-no-occlusion",
            description: "normal without the early exit",
            capabilities: &NoOcclusion,
        };

        let fast = render_tile(normal, &chunk, &textures);
        let slow = render_tile(&everything, &chunk, &textures);

        assert!(slow.blocks_drawn > fast.blocks_drawn);
        assert_eq!(fast.buffer.image(), slow.buffer.image());
    }

    struct NoOcclusion;

    impl RenderMode for NoOcclusion {
        fn draw(&self, tile: &TileContext<'_>, state: &mut ModeState, view: &BlockView, buf: &mut TileBuffer) {
            NormalMode.draw(tile, state, view, buf);
        }
    }

    #[test]
    fn test_unknown_mode_fails_fast() {
        let textures = BlockTextures::generated(1);
        let err = TileRenderer::for_mode("daylight", &textures).err().unwrap();
        assert_eq!(err.to_string(), "unknown render mode: daylight");
    }
}
