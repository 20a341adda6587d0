//! Plain block textures, no shading

use super::{BlockView, ModeState, RenderMode, TileContext};
use crate::render::TileBuffer;

/// Draws each block's texture and nothing else
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalMode;

impl RenderMode for NormalMode {
    fn occludes(&self, _tile: &TileContext<'_>, _state: &ModeState, view: &BlockView) -> bool {
        view.block.is_opaque()
    }

    fn draw(
        &self,
        tile: &TileContext<'_>,
        _state: &mut ModeState,
        view: &BlockView,
        buf: &mut TileBuffer,
    ) {
        paint_texture(tile, view, buf);
    }
}

/// Paint the block's texture into its cell. Blocks without a texture are skipped.
pub(crate) fn paint_texture(tile: &TileContext<'_>, view: &BlockView, buf: &mut TileBuffer) {
    if let Some(sprite) = tile.textures.get(view.block) {
        buf.paint(view.x, view.z, sprite);
    }
}
