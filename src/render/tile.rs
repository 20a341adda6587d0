//! Tile pixel buffer
//!
//! One chunk seen from above. Block (x, z) owns the `block_px` square cell
//! whose top-left pixel is (x * block_px, z * block_px).

use std::path::Path;

use image::{Rgba, RgbaImage};

use super::textures::BlockSprite;
use crate::world::{CHUNK_DEPTH, CHUNK_WIDTH};

/// The pixels of a single map tile
#[derive(Debug, Clone)]
pub struct TileBuffer {
    image: RgbaImage,
    block_px: u32,
}

impl TileBuffer {
    /// A fully transparent tile
    pub fn new(block_px: u32) -> Self {
        Self {
            image: RgbaImage::new(CHUNK_WIDTH as u32 * block_px, CHUNK_DEPTH as u32 * block_px),
            block_px,
        }
    }

    pub fn block_px(&self) -> u32 {
        self.block_px
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Top-left pixel of a block's cell, if the block is inside the tile
    fn cell_origin(&self, x: i32, z: i32) -> Option<(u32, u32)> {
        if x < 0 || z < 0 || x as usize >= CHUNK_WIDTH || z as usize >= CHUNK_DEPTH {
            return None;
        }
        Some((x as u32 * self.block_px, z as u32 * self.block_px))
    }

    /// Composite a sprite over a block's cell
    pub fn paint(&mut self, x: i32, z: i32, sprite: &BlockSprite) {
        let Some((ox, oy)) = self.cell_origin(x, z) else {
            return;
        };

        for (px, py, src) in sprite.image.enumerate_pixels() {
            if px >= self.block_px || py >= self.block_px {
                continue;
            }
            let dst = self.image.get_pixel_mut(ox + px, oy + py);
            *dst = blend(*dst, *src);
        }
    }

    /// Mix a colour into the already drawn pixels of a cell. The colour's
    /// alpha is the mix strength; coverage is left unchanged, so empty
    /// pixels stay empty.
    pub fn overlay(&mut self, x: i32, z: i32, color: Rgba<u8>) {
        let Some((ox, oy)) = self.cell_origin(x, z) else {
            return;
        };

        let strength = color.0[3] as f32 / 255.0;
        for py in oy..oy + self.block_px {
            for px in ox..ox + self.block_px {
                let dst = self.image.get_pixel_mut(px, py);
                if dst.0[3] == 0 {
                    continue;
                }
                for c in 0..3 {
                    let mixed = dst.0[c] as f32 + (color.0[c] as f32 - dst.0[c] as f32) * strength;
                    dst.0[c] = mixed.round() as u8;
                }
            }
        }
    }

    /// A pixel inside a block's cell
    pub fn cell_pixel(&self, x: i32, z: i32, px: u32, py: u32) -> Rgba<u8> {
        match self.cell_origin(x, z) {
            Some((ox, oy)) if px < self.block_px && py < self.block_px => {
                *self.image.get_pixel(ox + px, oy + py)
            }
            _ => Rgba([0, 0, 0, 0]),
        }
    }

    /// True if nothing has been drawn
    pub fn is_blank(&self) -> bool {
        self.image.pixels().all(|p| p.0[3] == 0)
    }

    /// Write the tile as an image; format follows the extension
    pub fn save<P: AsRef<Path>>(&self, path: P) -> image::ImageResult<()> {
        self.image.save(path)
    }
}

/// Source-over alpha compositing
pub fn blend(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    match src.0[3] {
        255 => return src,
        0 => return dst,
        _ => {}
    }

    let sa = src.0[3] as f32 / 255.0;
    let da = dst.0[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);

    let mut out = [0u8; 4];
    for c in 0..3 {
        let value = (src.0[c] as f32 * sa + dst.0[c] as f32 * da * (1.0 - sa)) / out_a;
        out[c] = value.round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (out_a * 255.0).round() as u8;
    Rgba(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_size() {
        let buf = TileBuffer::new(4);
        assert_eq!(buf.image().dimensions(), (64, 64));
        assert!(buf.is_blank());
    }

    #[test]
    fn test_blend() {
        let red = Rgba([255, 0, 0, 255]);
        let clear = Rgba([0, 0, 0, 0]);
        assert_eq!(blend(clear, red), red);
        assert_eq!(blend(red, clear), red);

        let half_blue = Rgba([0, 0, 255, 128]);
        let mixed = blend(red, half_blue);
        assert_eq!(mixed.0[3], 255);
        assert!(mixed.0[0] > 100 && mixed.0[0] < 155);
        assert!(mixed.0[2] > 100 && mixed.0[2] < 155);

        // Translucent over nothing keeps its colour
        assert_eq!(blend(clear, half_blue), half_blue);
    }

    #[test]
    fn test_paint_stays_in_cell() {
        let mut buf = TileBuffer::new(2);
        buf.paint(1, 0, &BlockSprite::solid_color(2, 9, 9, 9, 255));

        assert_eq!(buf.cell_pixel(1, 0, 1, 1).0, [9, 9, 9, 255]);
        assert_eq!(buf.cell_pixel(0, 0, 1, 1).0[3], 0);
        assert_eq!(buf.cell_pixel(2, 0, 0, 0).0[3], 0);

        // Outside the tile is ignored
        buf.paint(-1, 0, &BlockSprite::solid_color(2, 9, 9, 9, 255));
        buf.paint(16, 0, &BlockSprite::solid_color(2, 9, 9, 9, 255));
    }

    #[test]
    fn test_overlay_keeps_coverage() {
        let mut buf = TileBuffer::new(1);
        buf.paint(0, 0, &BlockSprite::solid_color(1, 200, 200, 200, 255));
        buf.overlay(0, 0, Rgba([0, 0, 0, 255]));
        buf.overlay(1, 0, Rgba([0, 0, 0, 255]));

        assert_eq!(buf.cell_pixel(0, 0, 0, 0).0, [0, 0, 0, 255]);
        assert_eq!(buf.cell_pixel(1, 0, 0, 0).0[3], 0);
    }
}
