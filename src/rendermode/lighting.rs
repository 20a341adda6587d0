//! Lighting mode
//!
//! Draws block textures, then darkens each block by the light falling on
//! its top face.

use image::Rgba;

use super::normal::paint_texture;
use super::{BlockView, ModeState, RenderMode, TileContext};
use crate::render::TileBuffer;
use crate::world::MAX_LIGHT;

/// Each light level below full is this much darker than the one above it
const FALLOFF: f32 = 0.8;

/// Light level to shadow strength, computed once per tile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadeTable {
    brightness: [f32; MAX_LIGHT as usize + 1],
    sky_offset: u8,
}

impl ShadeTable {
    /// Build a table. `sky_offset` levels are taken off sky light first,
    /// which is how night is modelled.
    pub fn new(sky_offset: u8) -> Self {
        let mut brightness = [0.0; MAX_LIGHT as usize + 1];
        for (level, value) in brightness.iter_mut().enumerate() {
            *value = FALLOFF.powi(MAX_LIGHT as i32 - level as i32);
        }
        Self { brightness, sky_offset }
    }

    /// Effective light level from sky and block light
    pub fn level(&self, sky: u8, block: u8) -> u8 {
        sky.saturating_sub(self.sky_offset).max(block).min(MAX_LIGHT)
    }

    /// Brightness in 0..=1
    pub fn brightness(&self, sky: u8, block: u8) -> f32 {
        self.brightness[self.level(sky, block) as usize]
    }

    /// Alpha of the black overlay that produces this brightness
    pub fn shadow_alpha(&self, sky: u8, block: u8) -> u8 {
        ((1.0 - self.brightness(sky, block)) * 255.0).round() as u8
    }
}

/// Textures shaded by sky and block light
#[derive(Debug, Clone, Copy)]
pub struct LightingMode {
    sky_offset: u8,
}

impl LightingMode {
    /// Full daylight
    pub const DAY: LightingMode = LightingMode { sky_offset: 0 };

    /// Lighting with sky light reduced by `sky_offset` levels
    pub const fn with_sky_offset(sky_offset: u8) -> Self {
        Self { sky_offset }
    }

    pub fn sky_offset(&self) -> u8 {
        self.sky_offset
    }
}

impl RenderMode for LightingMode {
    fn start(&self, _tile: &TileContext<'_>, state: &mut ModeState) {
        state.shade = Some(ShadeTable::new(self.sky_offset));
    }

    fn occludes(&self, _tile: &TileContext<'_>, _state: &ModeState, view: &BlockView) -> bool {
        view.block.is_opaque()
    }

    fn draw(
        &self,
        tile: &TileContext<'_>,
        state: &mut ModeState,
        view: &BlockView,
        buf: &mut TileBuffer,
    ) {
        paint_texture(tile, view, buf);
        apply_shade(tile, state, view, buf);
    }
}

/// Darken a drawn block. Does nothing until `start` has built the table.
pub(crate) fn apply_shade(tile: &TileContext<'_>, state: &ModeState, view: &BlockView, buf: &mut TileBuffer) {
    let Some(shade) = state.shade else {
        return;
    };

    let (sky, block) = tile.light_above(view);
    let alpha = shade.shadow_alpha(sky, block);
    if alpha > 0 {
        buf.overlay(view.x, view.z, Rgba([0, 0, 0, alpha]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::BlockTextures;
    use crate::world::{BlockType, Chunk};

    #[test]
    fn test_shade_table() {
        let day = ShadeTable::new(0);
        assert_eq!(day.brightness(15, 0), 1.0);
        assert_eq!(day.shadow_alpha(15, 0), 0);
        assert!(day.brightness(0, 0) < day.brightness(7, 0));

        let night = ShadeTable::new(11);
        assert_eq!(night.level(15, 0), 4);
        assert_eq!(night.level(15, 12), 12);
        assert!(night.shadow_alpha(15, 0) > day.shadow_alpha(15, 0));
    }

    #[test]
    fn test_lit_block_matches_texture() {
        let mut chunk = Chunk::new(0, 0);
        chunk.set_block(2, 0, 2, BlockType::Grass);
        chunk.compute_lighting();

        let textures = BlockTextures::generated(2);
        let tile = TileContext::new(&chunk, &textures);
        let mut state = ModeState::default();
        let mut buf = TileBuffer::new(2);
        let view = BlockView { x: 2, y: 0, z: 2, block: BlockType::Grass };

        LightingMode::DAY.start(&tile, &mut state);
        LightingMode::DAY.draw(&tile, &mut state, &view, &mut buf);

        let sprite = textures.get(BlockType::Grass).unwrap();
        assert_eq!(buf.cell_pixel(2, 2, 1, 1), *sprite.image.get_pixel(1, 1));
    }

    #[test]
    fn test_dark_block_is_shaded() {
        let mut chunk = Chunk::new(0, 0);
        chunk.set_block(2, 0, 2, BlockType::Grass);
        chunk.set_block(2, 2, 2, BlockType::Stone);
        chunk.compute_lighting();

        let textures = BlockTextures::generated(2);
        let tile = TileContext::new(&chunk, &textures);
        let mut state = ModeState::default();
        let mut buf = TileBuffer::new(2);
        let view = BlockView { x: 2, y: 0, z: 2, block: BlockType::Grass };

        LightingMode::DAY.start(&tile, &mut state);
        LightingMode::DAY.draw(&tile, &mut state, &view, &mut buf);

        let sprite = textures.get(BlockType::Grass).unwrap();
        let lit = sprite.image.get_pixel(1, 1);
        let shaded = buf.cell_pixel(2, 2, 1, 1);
        assert!(shaded.0[1] < lit.0[1]);
    }
}
