//! Cave mode
//!
//! Strips away everything the sky can reach, plus fluids, and colours the
//! remaining blocks by height so cave systems read at a glance.

use image::Rgba;

use super::normal::paint_texture;
use super::{BlockView, ModeState, RenderMode, TileContext};
use crate::render::TileBuffer;
use crate::world::{CHUNK_DEPTH, CHUNK_HEIGHT, CHUNK_WIDTH};

const DEEP_TINT: (f32, f32, f32) = (40.0, 60.0, 200.0);
const HIGH_TINT: (f32, f32, f32) = (230.0, 80.0, 30.0);
const TINT_ALPHA: u8 = 110;

/// Lowest and highest visible block of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthRange {
    pub min: i32,
    pub max: i32,
}

impl DepthRange {
    /// Position of `y` within the range, 0 at the bottom and 1 at the top
    pub fn fraction(&self, y: i32) -> f32 {
        if self.max <= self.min {
            return 0.0;
        }
        ((y - self.min) as f32 / (self.max - self.min) as f32).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CaveMode;

impl CaveMode {
    pub const DEFAULT: CaveMode = CaveMode;

    /// Sky-lit blocks and fluids are not part of a cave
    fn hidden(tile: &TileContext<'_>, view: &BlockView) -> bool {
        view.block.is_fluid() || tile.chunk.sky_light(view.x, view.y + 1, view.z) > 0
    }

    fn depth_range(tile: &TileContext<'_>) -> Option<DepthRange> {
        let mut range: Option<DepthRange> = None;
        for x in 0..CHUNK_WIDTH as i32 {
            for z in 0..CHUNK_DEPTH as i32 {
                for y in 0..CHUNK_HEIGHT as i32 {
                    let block = tile.chunk.block(x, y, z);
                    if block.is_air() || Self::hidden(tile, &BlockView { x, y, z, block }) {
                        continue;
                    }
                    range = Some(match range {
                        Some(r) => DepthRange { min: r.min.min(y), max: r.max.max(y) },
                        None => DepthRange { min: y, max: y },
                    });
                }
            }
        }
        range
    }
}

impl RenderMode for CaveMode {
    fn start(&self, tile: &TileContext<'_>, state: &mut ModeState) {
        state.depth = Self::depth_range(tile);
    }

    /// Hidden blocks never occlude, so the walk keeps looking beneath them
    fn occludes(&self, tile: &TileContext<'_>, _state: &ModeState, view: &BlockView) -> bool {
        view.block.is_opaque() && !Self::hidden(tile, view)
    }

    fn draw(
        &self,
        tile: &TileContext<'_>,
        state: &mut ModeState,
        view: &BlockView,
        buf: &mut TileBuffer,
    ) {
        if Self::hidden(tile, view) {
            return;
        }

        paint_texture(tile, view, buf);

        if let Some(range) = state.depth {
            let t = range.fraction(view.y);
            let lerp = |deep: f32, high: f32| (deep + (high - deep) * t).round() as u8;
            let tint = Rgba([
                lerp(DEEP_TINT.0, HIGH_TINT.0),
                lerp(DEEP_TINT.1, HIGH_TINT.1),
                lerp(DEEP_TINT.2, HIGH_TINT.2),
                TINT_ALPHA,
            ]);
            buf.overlay(view.x, view.z, tint);
        }
    }
}
