//! Block textures
//!
//! One square sprite per block type, either generated from the block's base
//! colour or cut from a sprite sheet.

use std::collections::HashMap;
use std::path::Path;

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};

use crate::world::BlockType;

/// Sprite sheets are a grid this many cells wide, filled left-to-right,
/// top-to-bottom in `BlockType::ALL` order
pub const SHEET_COLUMNS: u32 = 4;

/// A single block texture, `block_px` square
#[derive(Debug, Clone)]
pub struct BlockSprite {
    pub image: RgbaImage,
}

impl BlockSprite {
    /// A solid coloured sprite
    pub fn solid_color(size: u32, r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            image: RgbaImage::from_pixel(size, size, Rgba([r, g, b, a])),
        }
    }

    /// A solid sprite with a darker bottom-right edge, so neighbouring
    /// blocks of the same type stay distinguishable
    pub fn bevelled(size: u32, (r, g, b, a): (u8, u8, u8, u8)) -> Self {
        let mut sprite = Self::solid_color(size, r, g, b, a);
        if size < 4 {
            return sprite;
        }

        let edge = Rgba([scale(r, 0.8), scale(g, 0.8), scale(b, 0.8), a]);
        for i in 0..size {
            sprite.image.put_pixel(size - 1, i, edge);
            sprite.image.put_pixel(i, size - 1, edge);
        }
        sprite
    }

    /// Scale an arbitrary image to a sprite
    pub fn from_image(image: &DynamicImage, size: u32) -> Self {
        let image = if image.dimensions() == (size, size) {
            image.to_rgba8()
        } else {
            image.resize_exact(size, size, FilterType::Nearest).to_rgba8()
        };
        Self { image }
    }
}

fn scale(channel: u8, factor: f32) -> u8 {
    (channel as f32 * factor).round() as u8
}

/// Textures for every visible block type
#[derive(Debug, Clone)]
pub struct BlockTextures {
    sprites: HashMap<BlockType, BlockSprite>,
    block_px: u32,
}

impl BlockTextures {
    /// Textures generated from each block's base colour
    pub fn generated(block_px: u32) -> Self {
        let sprites = BlockType::ALL
            .iter()
            .filter(|block| !block.is_air())
            .map(|&block| (block, BlockSprite::bevelled(block_px, block.color())))
            .collect();

        Self { sprites, block_px }
    }

    /// Load textures from a sprite sheet file
    pub fn from_sheet<P: AsRef<Path>>(path: P, block_px: u32) -> Result<Self, image::ImageError> {
        let img = image::open(path)?;
        Ok(Self::from_sheet_image(&img, block_px))
    }

    /// Cut textures out of an already-loaded sprite sheet. Blocks the sheet
    /// has no cell for keep their generated texture.
    pub fn from_sheet_image(image: &DynamicImage, block_px: u32) -> Self {
        let mut textures = Self::generated(block_px);

        let (img_width, img_height) = image.dimensions();
        let cell = img_width / SHEET_COLUMNS;
        if cell == 0 {
            log::warn!("Sprite sheet is narrower than {} pixels, ignoring it", SHEET_COLUMNS);
            return textures;
        }

        let mut extracted = 0;
        for (i, block) in BlockType::ALL.iter().enumerate() {
            let x = (i as u32 % SHEET_COLUMNS) * cell;
            let y = (i as u32 / SHEET_COLUMNS) * cell;
            if block.is_air() || y + cell > img_height {
                continue;
            }

            let cell_img = image.crop_imm(x, y, cell, cell);
            textures.sprites.insert(*block, BlockSprite::from_image(&cell_img, block_px));
            extracted += 1;
        }

        log::info!("Extracted {} block textures ({}px cells) from sprite sheet", extracted, cell);
        textures
    }

    /// Sheet textures if a sheet is given and loads, generated ones otherwise
    pub fn load(sheet: Option<&Path>, block_px: u32) -> Self {
        match sheet {
            Some(path) => Self::from_sheet(path, block_px).unwrap_or_else(|e| {
                log::warn!("Failed to load sprite sheet {}: {}. Using generated textures.", path.display(), e);
                Self::generated(block_px)
            }),
            None => Self::generated(block_px),
        }
    }

    /// Texture for a block; air has none
    pub fn get(&self, block: BlockType) -> Option<&BlockSprite> {
        self.sprites.get(&block)
    }

    pub fn block_px(&self) -> u32 {
        self.block_px
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_covers_all_but_air() {
        let textures = BlockTextures::generated(4);
        assert_eq!(textures.len(), BlockType::ALL.len() - 1);
        assert!(textures.get(BlockType::Air).is_none());
        assert_eq!(textures.get(BlockType::Stone).unwrap().image.dimensions(), (4, 4));
    }

    #[test]
    fn test_bevel_edge_is_darker() {
        let sprite = BlockSprite::bevelled(4, (100, 100, 100, 255));
        assert_eq!(sprite.image.get_pixel(0, 0).0, [100, 100, 100, 255]);
        assert_eq!(sprite.image.get_pixel(3, 0).0, [80, 80, 80, 255]);
    }

    #[test]
    fn test_sheet_extraction() {
        // 4x2 grid of 8px cells: only the first eight block types get cells
        let mut sheet = RgbaImage::new(32, 16);
        for (x, y, pixel) in sheet.enumerate_pixels_mut() {
            let cell = (y / 8) * SHEET_COLUMNS + x / 8;
            *pixel = Rgba([cell as u8 * 10, 0, 0, 255]);
        }

        let textures = BlockTextures::from_sheet_image(&DynamicImage::ImageRgba8(sheet), 2);
        let stone = textures.get(BlockType::Stone).unwrap();
        assert_eq!(stone.image.dimensions(), (2, 2));
        assert_eq!(stone.image.get_pixel(0, 0).0, [10, 0, 0, 255]);

        // Snow is cell 7, the last one present; water (cell 9) falls back
        assert_eq!(textures.get(BlockType::Snow).unwrap().image.get_pixel(1, 1).0, [70, 0, 0, 255]);
        let water = textures.get(BlockType::Water).unwrap();
        assert_eq!(water.image.get_pixel(0, 0).0, [47, 67, 244, 160]);
    }

    #[test]
    fn test_missing_sheet_falls_back() {
        let textures = BlockTextures::load(Some(Path::new("/nonexistent/sheet.png")), 3);
        assert_eq!(textures.block_px(), 3);
        assert!(textures.get(BlockType::Grass).is_some());
    }
}
