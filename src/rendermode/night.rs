//! Night mode: lighting with the sun down and a blue cast

use image::Rgba;

use super::{BlockView, LightingMode, ModeState, RenderMode, TileContext};
use crate::render::TileBuffer;

/// Sky light levels lost at night
pub const NIGHT_SKY_OFFSET: u8 = 11;

const NIGHT_TINT: Rgba<u8> = Rgba([8, 16, 64, 48]);

#[derive(Debug, Clone, Copy)]
pub struct NightMode {
    lighting: LightingMode,
}

impl NightMode {
    pub const DEFAULT: NightMode = NightMode {
        lighting: LightingMode::with_sky_offset(NIGHT_SKY_OFFSET),
    };
}

impl Default for NightMode {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl RenderMode for NightMode {
    fn start(&self, tile: &TileContext<'_>, state: &mut ModeState) {
        self.lighting.start(tile, state);
    }

    fn occludes(&self, tile: &TileContext<'_>, state: &ModeState, view: &BlockView) -> bool {
        self.lighting.occludes(tile, state, view)
    }

    fn draw(
        &self,
        tile: &TileContext<'_>,
        state: &mut ModeState,
        view: &BlockView,
        buf: &mut TileBuffer,
    ) {
        self.lighting.draw(tile, state, view, buf);
        buf.overlay(view.x, view.z, NIGHT_TINT);
    }
}
