//! Spawn mode
//!
//! Night mode, with every block a monster could spawn on painted red.

use image::Rgba;

use super::{BlockView, ModeState, NightMode, RenderMode, TileContext};
use crate::render::TileBuffer;

/// Monsters spawn at this light level or below
pub const SPAWN_LIGHT_LIMIT: u8 = 7;

const SPAWN_MARK: Rgba<u8> = Rgba([229, 36, 38, 150]);

#[derive(Debug, Clone, Copy)]
pub struct SpawnMode {
    night: NightMode,
}

impl SpawnMode {
    pub const AT_NIGHT: SpawnMode = SpawnMode {
        night: NightMode::DEFAULT,
    };

    /// A mob needs a solid floor, two blocks of air and darkness
    fn can_spawn(tile: &TileContext<'_>, state: &ModeState, view: &BlockView) -> bool {
        let Some(shade) = state.shade else {
            return false;
        };
        if !view.block.is_spawnable_surface() {
            return false;
        }

        let chunk = tile.chunk;
        let headroom = chunk.block(view.x, view.y + 1, view.z).is_air()
            && chunk.block(view.x, view.y + 2, view.z).is_air();
        let (sky, block) = tile.light_above(view);

        headroom && shade.level(sky, block) <= SPAWN_LIGHT_LIMIT
    }
}

impl Default for SpawnMode {
    fn default() -> Self {
        Self::AT_NIGHT
    }
}

impl RenderMode for SpawnMode {
    fn start(&self, tile: &TileContext<'_>, state: &mut ModeState) {
        self.night.start(tile, state);
        state.marked = 0;
    }

    fn finish(&self, tile: &TileContext<'_>, state: &mut ModeState) {
        log::debug!(
            "Chunk ({}, {}): {} spawnable blocks",
            tile.chunk.cx,
            tile.chunk.cz,
            state.marked
        );
    }

    fn occludes(&self, tile: &TileContext<'_>, state: &ModeState, view: &BlockView) -> bool {
        self.night.occludes(tile, state, view)
    }

    fn draw(
        &self,
        tile: &TileContext<'_>,
        state: &mut ModeState,
        view: &BlockView,
        buf: &mut TileBuffer,
    ) {
        self.night.draw(tile, state, view, buf);

        if Self::can_spawn(tile, state, view) {
            buf.overlay(view.x, view.z, SPAWN_MARK);
            state.marked += 1;
        }
    }
}
