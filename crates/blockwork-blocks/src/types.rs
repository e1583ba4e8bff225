use std::fmt;
use std::str::FromStr;

use blockwork_geom::Rgba;
use serde::{Deserialize, Serialize};

/// Block kinds, ordered so that ordinal comparisons carry meaning:
/// everything from `Dirt` upward is opaque and fully collidable,
/// everything from `Ice` upward takes part in physics shapes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(i32)]
pub enum BlockType {
    #[default]
    Empty = 0,
    Water = 1,
    Ice = 2,
    Glass = 3,
    Leaves = 4,
    Grass = 5,
    Dirt = 6,
    Sand = 7,
    Wood = 8,
    Stone = 9,
    Brick = 10,
    Metal = 11,
}

impl BlockType {
    pub const ALL: [BlockType; 12] = [
        BlockType::Empty,
        BlockType::Water,
        BlockType::Ice,
        BlockType::Glass,
        BlockType::Leaves,
        BlockType::Grass,
        BlockType::Dirt,
        BlockType::Sand,
        BlockType::Wood,
        BlockType::Stone,
        BlockType::Brick,
        BlockType::Metal,
    ];

    #[inline]
    pub fn ordinal(self) -> i32 {
        self as i32
    }

    #[inline]
    pub fn from_ordinal(v: i32) -> Option<BlockType> {
        usize::try_from(v)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    /// Opaque and fully collidable (ordinal >= `Dirt`).
    #[inline]
    pub fn is_solid(self) -> bool {
        self >= BlockType::Dirt
    }

    /// Takes part in physics shapes (ordinal >= `Ice`).
    #[inline]
    pub fn is_physical(self) -> bool {
        self >= BlockType::Ice
    }

    /// Between `Empty` and `Dirt`: partially transparent.
    #[inline]
    pub fn is_translucent(self) -> bool {
        self > BlockType::Empty && self < BlockType::Dirt
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self == BlockType::Empty
    }

    /// Specular intensity written into render vertices.
    pub fn specular(self) -> f32 {
        match self {
            BlockType::Water => 0.8,
            BlockType::Glass => 0.9,
            BlockType::Ice => 0.6,
            BlockType::Metal => 0.7,
            BlockType::Stone | BlockType::Brick => 0.1,
            _ => 0.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BlockType::Empty => "empty",
            BlockType::Water => "water",
            BlockType::Ice => "ice",
            BlockType::Glass => "glass",
            BlockType::Leaves => "leaves",
            BlockType::Grass => "grass",
            BlockType::Dirt => "dirt",
            BlockType::Sand => "sand",
            BlockType::Wood => "wood",
            BlockType::Stone => "stone",
            BlockType::Brick => "brick",
            BlockType::Metal => "metal",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownBlockType(pub String);

impl fmt::Display for UnknownBlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown block type '{}'", self.0)
    }
}

impl std::error::Error for UnknownBlockType {}

impl FromStr for BlockType {
    type Err = UnknownBlockType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.name() == lower)
            .ok_or(UnknownBlockType(s.to_string()))
    }
}

/// One grid cell. Plain value: copied freely, no identity.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Block {
    pub kind: BlockType,
    pub color: Rgba,
}

impl Block {
    pub const EMPTY: Block = Block {
        kind: BlockType::Empty,
        color: Rgba::NONE,
    };

    #[inline]
    pub const fn new(kind: BlockType, color: Rgba) -> Self {
        Self { kind, color }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.kind.is_empty()
    }

    /// Same kind and bit-identical color.
    #[inline]
    pub fn same_material(&self, other: &Block) -> bool {
        self.kind == other.kind && self.color.bits_eq(other.color)
    }
}
