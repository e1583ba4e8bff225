use std::error::Error;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GenParams {
    #[serde(default)]
    pub tree: TreeParams,
    #[serde(default)]
    pub grass: GrassParams,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TreeParams {
    /// Starting trunk radius in cells.
    #[serde(default = "default_trunk_radius")]
    pub trunk_radius: f32,
    /// Steps the trunk grows straight up before it may bend, shrink, or split.
    #[serde(default = "default_trunk_steps")]
    pub trunk_steps: u32,
    #[serde(default = "default_step_length")]
    pub step_length: f32,
    /// Hard cap on steps along any root-to-tip path.
    #[serde(default = "default_max_steps")]
    pub max_steps: u32,
    /// Hard cap on branches, trunk included.
    #[serde(default = "default_max_branches")]
    pub max_branches: u32,
    #[serde(default = "default_shrink_chance")]
    pub shrink_chance: f32,
    #[serde(default = "default_shrink_factor")]
    pub shrink_factor: f32,
    /// A branch ends once its radius falls below this.
    #[serde(default = "default_min_radius")]
    pub min_radius: f32,
    #[serde(default = "default_split_chance")]
    pub split_chance: f32,
    /// Largest per-step random course change, in direction units.
    #[serde(default = "default_deviation")]
    pub deviation: f32,
    /// Radii above this stamp a sphere per step; at or below, a single cell.
    #[serde(default = "default_solid_threshold")]
    pub solid_threshold: f32,
    #[serde(default = "default_foliage_radius")]
    pub foliage_radius: f32,
}
fn default_trunk_radius() -> f32 {
    1.5
}
fn default_trunk_steps() -> u32 {
    4
}
fn default_step_length() -> f32 {
    1.0
}
fn default_max_steps() -> u32 {
    24
}
fn default_max_branches() -> u32 {
    9
}
fn default_shrink_chance() -> f32 {
    0.35
}
fn default_shrink_factor() -> f32 {
    0.85
}
fn default_min_radius() -> f32 {
    0.3
}
fn default_split_chance() -> f32 {
    0.15
}
fn default_deviation() -> f32 {
    0.35
}
fn default_solid_threshold() -> f32 {
    0.75
}
fn default_foliage_radius() -> f32 {
    2.5
}
impl Default for TreeParams {
    fn default() -> Self {
        Self {
            trunk_radius: default_trunk_radius(),
            trunk_steps: default_trunk_steps(),
            step_length: default_step_length(),
            max_steps: default_max_steps(),
            max_branches: default_max_branches(),
            shrink_chance: default_shrink_chance(),
            shrink_factor: default_shrink_factor(),
            min_radius: default_min_radius(),
            split_chance: default_split_chance(),
            deviation: default_deviation(),
            solid_threshold: default_solid_threshold(),
            foliage_radius: default_foliage_radius(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GrassParams {
    #[serde(default = "default_grass_frequency")]
    pub frequency: f32,
    /// Column height range in cells, counted up from the grid floor.
    #[serde(default = "default_grass_min_height")]
    pub min_height: u32,
    #[serde(default = "default_grass_max_height")]
    pub max_height: u32,
}
fn default_grass_frequency() -> f32 {
    0.12
}
fn default_grass_min_height() -> u32 {
    0
}
fn default_grass_max_height() -> u32 {
    3
}
impl Default for GrassParams {
    fn default() -> Self {
        Self {
            frequency: default_grass_frequency(),
            min_height: default_grass_min_height(),
            max_height: default_grass_max_height(),
        }
    }
}

impl GenParams {
    pub fn from_toml_str(s: &str) -> Result<Self, Box<dyn Error>> {
        Ok(toml::from_str(s)?)
    }
}

pub fn load_params_from_path(path: &Path) -> Result<GenParams, Box<dyn Error>> {
    let s = fs::read_to_string(path)?;
    GenParams::from_toml_str(&s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_tables_and_keys_fall_back_to_defaults() {
        let p = GenParams::from_toml_str("[tree]\nmax_branches = 3\n").unwrap();
        assert_eq!(p.tree.max_branches, 3);
        assert_eq!(p.tree.trunk_steps, default_trunk_steps());
        assert_eq!(p.grass, GrassParams::default());
        assert_eq!(GenParams::from_toml_str("").unwrap(), GenParams::default());
    }

    #[test]
    fn loads_from_file_and_reports_missing_file() {
        let name = format!("blockwork-gen-{}.toml", std::process::id());
        let path = std::env::temp_dir().join(name);
        fs::write(&path, "[grass]\nmax_height = 7\n").unwrap();
        let p = load_params_from_path(&path).unwrap();
        assert_eq!(p.grass.max_height, 7);
        assert_eq!(p.tree, TreeParams::default());
        let _ = fs::remove_file(&path);
        assert!(load_params_from_path(&path).is_err());
    }

    #[test]
    fn bad_types_are_errors() {
        assert!(GenParams::from_toml_str("[grass]\nmax_height = \"tall\"\n").is_err());
    }
}
