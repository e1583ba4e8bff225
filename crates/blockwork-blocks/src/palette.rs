use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;

use blockwork_geom::Rgba;
use serde::Deserialize;

use super::types::{Block, BlockType};

/// Default color per block type, used when editing by type alone.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    colors: [Rgba; BlockType::ALL.len()],
}

impl Default for Palette {
    fn default() -> Self {
        let mut colors = [Rgba::NONE; BlockType::ALL.len()];
        for t in BlockType::ALL {
            colors[t.ordinal() as usize] = match t {
                BlockType::Empty => Rgba::NONE,
                BlockType::Water => Rgba::new(0.15, 0.35, 0.8, 0.6),
                BlockType::Ice => Rgba::new(0.75, 0.9, 1.0, 0.8),
                BlockType::Glass => Rgba::new(0.9, 0.95, 1.0, 0.3),
                BlockType::Leaves => Rgba::new(0.2, 0.55, 0.15, 0.9),
                BlockType::Grass => Rgba::new(0.35, 0.7, 0.2, 0.95),
                BlockType::Dirt => Rgba::rgb(0.45, 0.3, 0.18),
                BlockType::Sand => Rgba::rgb(0.86, 0.8, 0.55),
                BlockType::Wood => Rgba::rgb(0.4, 0.26, 0.13),
                BlockType::Stone => Rgba::rgb(0.5, 0.5, 0.52),
                BlockType::Brick => Rgba::rgb(0.62, 0.25, 0.2),
                BlockType::Metal => Rgba::rgb(0.7, 0.72, 0.75),
            };
        }
        Self { colors }
    }
}

impl Palette {
    #[inline]
    pub fn color(&self, kind: BlockType) -> Rgba {
        self.colors[kind.ordinal() as usize]
    }

    #[inline]
    pub fn block(&self, kind: BlockType) -> Block {
        Block::new(kind, self.color(kind))
    }

    pub fn set_color(&mut self, kind: BlockType, color: Rgba) {
        self.colors[kind.ordinal() as usize] = color;
    }

    /// Starts from the defaults and overrides every listed entry.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: PaletteConfig = toml::from_str(toml_str)?;
        let mut palette = Palette::default();
        // HashMap order is arbitrary; sort so the first unknown key reported is stable.
        let mut entries: Vec<(String, ColorEntry)> = cfg.colors.into_iter().collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        for (key, entry) in entries {
            let kind: BlockType = key.parse()?;
            let color = match entry {
                ColorEntry::Rgb([r, g, b]) => Rgba::rgb(r, g, b),
                ColorEntry::Rgba(c) => Rgba::from_array(c),
            };
            palette.set_color(kind, color);
        }
        Ok(palette)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }
}

// --- Config ---

#[derive(Deserialize)]
pub struct PaletteConfig {
    #[serde(default)]
    pub colors: HashMap<String, ColorEntry>,
}

#[derive(Deserialize)]
#[serde(untagged)]
pub enum ColorEntry {
    // stone = [0.5, 0.5, 0.5]
    Rgb([f32; 3]),
    // water = [0.1, 0.3, 0.8, 0.6]
    Rgba([f32; 4]),
}
