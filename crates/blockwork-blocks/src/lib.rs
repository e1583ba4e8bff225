//! Block kinds, cells, and default palette.
#![forbid(unsafe_code)]

pub mod palette;
pub mod types;

pub use palette::Palette;
pub use types::{Block, BlockType, UnknownBlockType};
