//! Chunk data structure
//!
//! A fixed-size column of blocks with sky and block light. One chunk is
//! rendered into one map tile.

use std::collections::VecDeque;

use super::block::BlockType;
use super::{CHUNK_DEPTH, CHUNK_HEIGHT, CHUNK_WIDTH, MAX_LIGHT};

const NEIGHBORS: [(i32, i32, i32); 6] = [
    (1, 0, 0),
    (-1, 0, 0),
    (0, 1, 0),
    (0, -1, 0),
    (0, 0, 1),
    (0, 0, -1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LightKind {
    Sky,
    Block,
}

/// A 16x16 column of blocks, `CHUNK_HEIGHT` tall
#[derive(Debug, Clone)]
pub struct Chunk {
    /// Chunk coordinates in chunk units
    pub cx: i32,
    pub cz: i32,
    blocks: Vec<BlockType>,
    skylight: Vec<u8>,
    blocklight: Vec<u8>,
}

impl Chunk {
    /// Create an empty chunk filled with air and full sky light
    pub fn new(cx: i32, cz: i32) -> Self {
        let volume = CHUNK_WIDTH * CHUNK_DEPTH * CHUNK_HEIGHT;
        Self {
            cx,
            cz,
            blocks: vec![BlockType::Air; volume],
            skylight: vec![MAX_LIGHT; volume],
            blocklight: vec![0; volume],
        }
    }

    /// Convert 3D coordinates to a flat index
    #[inline]
    fn idx(x: i32, y: i32, z: i32) -> usize {
        ((x as usize * CHUNK_DEPTH + z as usize) * CHUNK_HEIGHT) + y as usize
    }

    /// Check if coordinates are within the chunk
    #[inline]
    pub fn in_bounds(x: i32, y: i32, z: i32) -> bool {
        x >= 0
            && z >= 0
            && y >= 0
            && (x as usize) < CHUNK_WIDTH
            && (z as usize) < CHUNK_DEPTH
            && (y as usize) < CHUNK_HEIGHT
    }

    /// Block at a position; air outside the chunk
    pub fn block(&self, x: i32, y: i32, z: i32) -> BlockType {
        if Self::in_bounds(x, y, z) {
            self.blocks[Self::idx(x, y, z)]
        } else {
            BlockType::Air
        }
    }

    /// Set a block. Out-of-bounds writes are ignored.
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, block: BlockType) {
        if Self::in_bounds(x, y, z) {
            let idx = Self::idx(x, y, z);
            self.blocks[idx] = block;
        }
    }

    /// Sky light at a position. Above the chunk is open sky, below is dark.
    pub fn sky_light(&self, x: i32, y: i32, z: i32) -> u8 {
        if y >= CHUNK_HEIGHT as i32 {
            MAX_LIGHT
        } else if Self::in_bounds(x, y, z) {
            self.skylight[Self::idx(x, y, z)]
        } else {
            0
        }
    }

    /// Block (emitted) light at a position; 0 outside the chunk
    pub fn block_light(&self, x: i32, y: i32, z: i32) -> u8 {
        if Self::in_bounds(x, y, z) {
            self.blocklight[Self::idx(x, y, z)]
        } else {
            0
        }
    }

    /// Height of the topmost non-air block in a column
    pub fn highest_block(&self, x: i32, z: i32) -> Option<i32> {
        (0..CHUNK_HEIGHT as i32)
            .rev()
            .find(|&y| !self.block(x, y, z).is_air())
    }

    /// Recompute sky and block light for the whole chunk
    pub fn compute_lighting(&mut self) {
        self.skylight.fill(0);
        self.blocklight.fill(0);

        // Sky light falls straight down each column until something stops it
        let mut queue = VecDeque::new();
        for x in 0..CHUNK_WIDTH as i32 {
            for z in 0..CHUNK_DEPTH as i32 {
                let mut level = MAX_LIGHT;
                for y in (0..CHUNK_HEIGHT as i32).rev() {
                    let block = self.block(x, y, z);
                    if block.is_opaque() {
                        break;
                    }
                    level = level.saturating_sub(block.light_filter());
                    if level == 0 {
                        break;
                    }
                    self.set_light(LightKind::Sky, x, y, z, level);
                    queue.push_back((x, y, z));
                }
            }
        }
        self.flood_light(LightKind::Sky, &mut queue);

        for x in 0..CHUNK_WIDTH as i32 {
            for z in 0..CHUNK_DEPTH as i32 {
                for y in 0..CHUNK_HEIGHT as i32 {
                    let emission = self.block(x, y, z).light_emission();
                    if emission > 0 {
                        self.set_light(LightKind::Block, x, y, z, emission);
                        queue.push_back((x, y, z));
                    }
                }
            }
        }
        self.flood_light(LightKind::Block, &mut queue);
    }

    fn light(&self, kind: LightKind, x: i32, y: i32, z: i32) -> u8 {
        let idx = Self::idx(x, y, z);
        match kind {
            LightKind::Sky => self.skylight[idx],
            LightKind::Block => self.blocklight[idx],
        }
    }

    fn set_light(&mut self, kind: LightKind, x: i32, y: i32, z: i32, level: u8) {
        let idx = Self::idx(x, y, z);
        match kind {
            LightKind::Sky => self.skylight[idx] = level,
            LightKind::Block => self.blocklight[idx] = level,
        }
    }

    /// Breadth-first spread of seeded light levels through non-opaque blocks
    fn flood_light(&mut self, kind: LightKind, queue: &mut VecDeque<(i32, i32, i32)>) {
        while let Some((x, y, z)) = queue.pop_front() {
            let level = self.light(kind, x, y, z);
            if level <= 1 {
                continue;
            }

            for (dx, dy, dz) in NEIGHBORS {
                let (nx, ny, nz) = (x + dx, y + dy, z + dz);
                if !Self::in_bounds(nx, ny, nz) {
                    continue;
                }
                let neighbor = self.block(nx, ny, nz);
                if neighbor.is_opaque() {
                    continue;
                }
                let spread = level.saturating_sub(1 + neighbor.light_filter());
                if spread > self.light(kind, nx, ny, nz) {
                    self.set_light(kind, nx, ny, nz, spread);
                    queue.push_back((nx, ny, nz));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_chunk(height: i32) -> Chunk {
        let mut chunk = Chunk::new(0, 0);
        for x in 0..CHUNK_WIDTH as i32 {
            for z in 0..CHUNK_DEPTH as i32 {
                for y in 0..height {
                    chunk.set_block(x, y, z, BlockType::Stone);
                }
            }
        }
        chunk.compute_lighting();
        chunk
    }

    #[test]
    fn test_out_of_bounds_reads() {
        let chunk = Chunk::new(0, 0);
        assert_eq!(chunk.block(-1, 0, 0), BlockType::Air);
        assert_eq!(chunk.block(0, CHUNK_HEIGHT as i32, 0), BlockType::Air);
        assert_eq!(chunk.sky_light(0, CHUNK_HEIGHT as i32, 0), MAX_LIGHT);
        assert_eq!(chunk.sky_light(0, -1, 0), 0);
    }

    #[test]
    fn test_highest_block() {
        let chunk = flat_chunk(10);
        assert_eq!(chunk.highest_block(3, 3), Some(9));
        assert_eq!(Chunk::new(0, 0).highest_block(3, 3), None);
    }

    #[test]
    fn test_sky_light_stops_at_ground() {
        let chunk = flat_chunk(10);
        assert_eq!(chunk.sky_light(5, 10, 5), MAX_LIGHT);
        assert_eq!(chunk.sky_light(5, 5, 5), 0);
    }

    #[test]
    fn test_torch_light_falls_off() {
        let mut chunk = flat_chunk(10);
        // Roof the chunk so only the torch lights the gap
        for x in 0..CHUNK_WIDTH as i32 {
            for z in 0..CHUNK_DEPTH as i32 {
                chunk.set_block(x, 12, z, BlockType::Stone);
            }
        }
        chunk.set_block(8, 10, 8, BlockType::Torch);
        chunk.compute_lighting();

        assert_eq!(chunk.sky_light(8, 11, 8), 0);
        assert_eq!(chunk.block_light(8, 10, 8), 14);
        assert_eq!(chunk.block_light(9, 10, 8), 13);
        assert_eq!(chunk.block_light(8, 10, 11), 11);
    }

    #[test]
    fn test_water_filters_sky_light() {
        let mut chunk = flat_chunk(10);
        chunk.set_block(4, 10, 4, BlockType::Water);
        chunk.compute_lighting();
        assert!(chunk.sky_light(4, 10, 4) < MAX_LIGHT);
    }
}
