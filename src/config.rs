use std::error::Error;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use blockwork_blocks::Palette;
use blockwork_gen::GenParams;
use blockwork_mesh::MeshOptions;
use blockwork_physics::PhysicsMode;
use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = "blockwork.toml";

/// Contents of `blockwork.toml`. Every table is optional.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub mesh: MeshOptions,
    #[serde(default)]
    pub physics: PhysicsConfig,
    /// `[tree]` and `[grass]` tables.
    #[serde(flatten)]
    pub generator: GenParams,
    /// Filled from the `[colors]` table after parsing.
    #[serde(skip)]
    pub palette: Palette,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_width_bits")]
    pub width_bits: u32,
    #[serde(default = "default_height_bits")]
    pub height_bits: u32,
}
fn default_width_bits() -> u32 {
    4
}
fn default_height_bits() -> u32 {
    4
}
impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width_bits: default_width_bits(),
            height_bits: default_height_bits(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct PhysicsConfig {
    #[serde(default)]
    pub mode: PhysicsMode,
}

#[derive(Debug)]
pub enum ConfigError {
    Read { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, source: toml::de::Error },
    Palette { path: PathBuf, source: Box<dyn Error> },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "cannot read {}: {}", path.display(), source)
            }
            ConfigError::Parse { path, source } => {
                write!(f, "{} parse error: {}", path.display(), source)
            }
            ConfigError::Palette { path, source } => {
                write!(f, "{} [colors]: {}", path.display(), source)
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
            ConfigError::Palette { source, .. } => Some(source.as_ref()),
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(s: &str, path: &Path) -> Result<Self, ConfigError> {
        let mut cfg: AppConfig = toml::from_str(s).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        cfg.palette = Palette::from_toml_str(s).map_err(|source| ConfigError::Palette {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(cfg)
    }

    /// Reads `path`, or returns the defaults when it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("config {} not found; using defaults", path.display());
            return Ok(Self::default());
        }
        let s = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg = Self::from_toml_str(&s, path)?;
        log::info!("config loaded from {}", path.display());
        Ok(cfg)
    }
}
