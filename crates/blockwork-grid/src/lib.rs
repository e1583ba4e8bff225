//! Block grid storage, neighbor resolution, visibility rules, and the face sweep.
#![forbid(unsafe_code)]

pub mod face;
pub mod grid;
pub mod neighbors;
pub mod sweep;
mod visibility;

pub use face::Face;
pub use grid::{BLOCK_RADIUS, BLOCK_SIZE, BlockGrid, MAX_BITS, MIN_BITS, SharedGrid, link_pair};
pub use neighbors::{Direction, Lookup, NeighborLinks, Resolution};
pub use sweep::{AO_STEP, FaceRun, SweepOptions, corner_ao, sweep_face, sweep_faces};
