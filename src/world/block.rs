//! Block definitions
//!
//! Block types and the material properties the renderer and the light
//! solver depend on.

use serde::{Deserialize, Serialize};

/// Types of blocks in a chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BlockType {
    #[default]
    Air,

    // Terrain
    Stone,
    Dirt,
    Grass,
    Sand,
    Gravel,
    Bedrock,
    Snow,
    CoalOre,

    // Fluids
    Water,
    Lava,

    // Vegetation
    Log,
    Leaves,

    // Placed
    Glass,
    Torch,
}

impl BlockType {
    /// Every block type, in sprite-sheet order
    pub const ALL: [BlockType; 15] = [
        BlockType::Air,
        BlockType::Stone,
        BlockType::Dirt,
        BlockType::Grass,
        BlockType::Sand,
        BlockType::Gravel,
        BlockType::Bedrock,
        BlockType::Snow,
        BlockType::CoalOre,
        BlockType::Water,
        BlockType::Lava,
        BlockType::Log,
        BlockType::Leaves,
        BlockType::Glass,
        BlockType::Torch,
    ];

    pub fn is_air(&self) -> bool {
        matches!(self, BlockType::Air)
    }

    pub fn is_fluid(&self) -> bool {
        matches!(self, BlockType::Water | BlockType::Lava)
    }

    /// Fully hides whatever lies below it when seen from above
    pub fn is_opaque(&self) -> bool {
        !matches!(
            self,
            BlockType::Air | BlockType::Water | BlockType::Leaves | BlockType::Glass | BlockType::Torch
        )
    }

    /// How many light levels are lost when light passes through this block.
    /// Opaque blocks stop light entirely.
    pub fn light_filter(&self) -> u8 {
        match self {
            BlockType::Air | BlockType::Glass | BlockType::Torch => 0,
            BlockType::Leaves => 1,
            BlockType::Water => 2,
            _ => super::MAX_LIGHT,
        }
    }

    /// Light level emitted by this block
    pub fn light_emission(&self) -> u8 {
        match self {
            BlockType::Torch => 14,
            BlockType::Lava => 15,
            _ => 0,
        }
    }

    /// Can a mob stand on top of this block?
    pub fn is_spawnable_surface(&self) -> bool {
        self.is_opaque() && !matches!(self, BlockType::Bedrock | BlockType::Lava)
    }

    /// Base RGBA colour used for generated textures
    pub fn color(&self) -> (u8, u8, u8, u8) {
        match self {
            BlockType::Air => (0, 0, 0, 0),
            BlockType::Stone => (125, 125, 125, 255),
            BlockType::Dirt => (134, 96, 67, 255),
            BlockType::Grass => (95, 159, 53, 255),
            BlockType::Sand => (219, 207, 163, 255),
            BlockType::Gravel => (136, 126, 126, 255),
            BlockType::Bedrock => (60, 60, 60, 255),
            BlockType::Snow => (240, 251, 251, 255),
            BlockType::CoalOre => (90, 90, 90, 255),
            BlockType::Water => (47, 67, 244, 160),
            BlockType::Lava => (207, 92, 15, 255),
            BlockType::Log => (102, 81, 51, 255),
            BlockType::Leaves => (60, 120, 30, 200),
            BlockType::Glass => (200, 230, 240, 70),
            BlockType::Torch => (255, 216, 0, 255),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opacity() {
        assert!(BlockType::Stone.is_opaque());
        assert!(BlockType::Lava.is_opaque());
        assert!(!BlockType::Water.is_opaque());
        assert!(!BlockType::Air.is_opaque());
        assert!(!BlockType::Glass.is_opaque());
    }

    #[test]
    fn test_spawnable_surface() {
        assert!(BlockType::Grass.is_spawnable_surface());
        assert!(!BlockType::Bedrock.is_spawnable_surface());
        assert!(!BlockType::Water.is_spawnable_surface());
        assert!(!BlockType::Lava.is_spawnable_surface());
    }

    #[test]
    fn test_light_filter() {
        assert_eq!(BlockType::Air.light_filter(), 0);
        assert_eq!(BlockType::Stone.light_filter(), crate::world::MAX_LIGHT);
        assert!(BlockType::Water.light_filter() > BlockType::Leaves.light_filter());
    }
}
