//! Procedural terrain
//!
//! Builds demo chunks from Perlin noise so the renderer has something to
//! draw: rolling hills, a sea, noise caves, ore, trees and cave torches.

use noise::{NoiseFn, Perlin};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{BlockType, Chunk, CHUNK_DEPTH, CHUNK_HEIGHT, CHUNK_WIDTH};
use crate::config::WorldConfig;

/// Water fills every column up to this height
pub const SEA_LEVEL: i32 = 48;

const BASE_HEIGHT: f64 = 52.0;
const HEIGHT_VARIATION: f64 = 18.0;
const SNOW_LINE: i32 = 66;
const CAVE_THRESHOLD: f64 = 0.45;

/// Generate every chunk of the configured world, row by row
pub fn generate_world(config: &WorldConfig) -> Vec<Chunk> {
    let mut chunks = Vec::with_capacity((config.chunks_x.max(0) * config.chunks_z.max(0)) as usize);
    for cz in 0..config.chunks_z {
        for cx in 0..config.chunks_x {
            chunks.push(generate_chunk(config.seed, cx, cz));
        }
    }

    log::info!("Generated {} chunks (seed {})", chunks.len(), config.seed);
    chunks
}

/// Generate a single chunk. The same seed and coordinates always produce
/// the same chunk.
pub fn generate_chunk(seed: u32, cx: i32, cz: i32) -> Chunk {
    let height_noise = Perlin::new(seed);
    let cave_noise = Perlin::new(seed.wrapping_add(1));
    let mut rng = StdRng::seed_from_u64(chunk_seed(seed, cx, cz));
    let mut chunk = Chunk::new(cx, cz);

    let mut heights = [[0i32; CHUNK_DEPTH]; CHUNK_WIDTH];
    for x in 0..CHUNK_WIDTH as i32 {
        for z in 0..CHUNK_DEPTH as i32 {
            let wx = (cx * CHUNK_WIDTH as i32 + x) as f64;
            let wz = (cz * CHUNK_DEPTH as i32 + z) as f64;
            let n = height_noise.get([wx / 64.0, wz / 64.0]);
            let height = (BASE_HEIGHT + n * HEIGHT_VARIATION).round() as i32;
            let height = height.clamp(8, CHUNK_HEIGHT as i32 - 16);

            fill_column(&mut chunk, x, z, height);
            carve_caves(&mut chunk, &cave_noise, x, z, wx, wz, height);
            heights[x as usize][z as usize] = height;
        }
    }

    place_ore(&mut chunk, &mut rng, &heights);
    plant_trees(&mut chunk, &mut rng, &heights);
    place_cave_torches(&mut chunk, &mut rng, &heights);

    chunk.compute_lighting();
    chunk
}

fn chunk_seed(seed: u32, cx: i32, cz: i32) -> u64 {
    let x = (cx as u32 as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    let z = (cz as u32 as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F);
    ((seed as u64) << 32) ^ x ^ z.rotate_left(17)
}

/// Lay down bedrock, stone, dirt, the surface block and sea water
fn fill_column(chunk: &mut Chunk, x: i32, z: i32, height: i32) {
    chunk.set_block(x, 0, z, BlockType::Bedrock);
    for y in 1..height - 3 {
        chunk.set_block(x, y, z, BlockType::Stone);
    }
    for y in (height - 3).max(1)..height {
        let block = if height <= SEA_LEVEL { BlockType::Sand } else { BlockType::Dirt };
        chunk.set_block(x, y, z, block);
    }

    let surface = if height <= SEA_LEVEL + 1 {
        BlockType::Sand
    } else if height >= SNOW_LINE {
        BlockType::Snow
    } else {
        BlockType::Grass
    };
    chunk.set_block(x, height, z, surface);

    for y in height + 1..=SEA_LEVEL {
        chunk.set_block(x, y, z, BlockType::Water);
    }
}

/// Hollow out caves under the surface crust
fn carve_caves(chunk: &mut Chunk, noise: &Perlin, x: i32, z: i32, wx: f64, wz: f64, height: i32) {
    for y in 2..height - 4 {
        let density = noise.get([wx / 16.0, y as f64 / 12.0, wz / 16.0]);
        if density > CAVE_THRESHOLD {
            chunk.set_block(x, y, z, BlockType::Air);
        }
    }
}

fn place_ore(chunk: &mut Chunk, rng: &mut StdRng, heights: &[[i32; CHUNK_DEPTH]; CHUNK_WIDTH]) {
    for x in 0..CHUNK_WIDTH as i32 {
        for z in 0..CHUNK_DEPTH as i32 {
            for y in 1..heights[x as usize][z as usize] {
                if chunk.block(x, y, z) == BlockType::Stone && rng.gen_bool(0.02) {
                    chunk.set_block(x, y, z, BlockType::CoalOre);
                }
            }
        }
    }
}

/// Trees only grow on grass away from the chunk edges
fn plant_trees(chunk: &mut Chunk, rng: &mut StdRng, heights: &[[i32; CHUNK_DEPTH]; CHUNK_WIDTH]) {
    for x in 2..CHUNK_WIDTH as i32 - 2 {
        for z in 2..CHUNK_DEPTH as i32 - 2 {
            let ground = heights[x as usize][z as usize];
            if chunk.block(x, ground, z) != BlockType::Grass || !rng.gen_bool(0.02) {
                continue;
            }

            let trunk = rng.gen_range(4..=6);
            let top = ground + trunk;
            for y in ground + 1..=top {
                chunk.set_block(x, y, z, BlockType::Log);
            }

            for dx in -2..=2 {
                for dz in -2..=2 {
                    for dy in -1..=1 {
                        if dx * dx + dz * dz + dy * dy > 5 {
                            continue;
                        }
                        let (lx, ly, lz) = (x + dx, top + dy, z + dz);
                        if chunk.block(lx, ly, lz).is_air() {
                            chunk.set_block(lx, ly, lz, BlockType::Leaves);
                        }
                    }
                }
            }
            chunk.set_block(x, top + 2, z, BlockType::Leaves);
        }
    }
}

/// Scatter a few torches on cave floors
fn place_cave_torches(chunk: &mut Chunk, rng: &mut StdRng, heights: &[[i32; CHUNK_DEPTH]; CHUNK_WIDTH]) {
    for _ in 0..48 {
        let x = rng.gen_range(0..CHUNK_WIDTH as i32);
        let z = rng.gen_range(0..CHUNK_DEPTH as i32);
        let ceiling = heights[x as usize][z as usize] - 4;
        if ceiling <= 2 {
            continue;
        }
        let y = rng.gen_range(2..ceiling);
        if chunk.block(x, y, z).is_air() && chunk.block(x, y - 1, z).is_opaque() {
            chunk.set_block(x, y, z, BlockType::Torch);
        }
    }
}
