//! Cell-pair occlusion predicates shared by meshing and physics.
//!
//! Out-of-range defaults differ per predicate:
//!
//! | query                  | above/below grid | unlinked neighbor |
//! |------------------------|------------------|-------------------|
//! | `is_opaque_neighbor`   | not occluding    | not occluding     |
//! | `is_blocked_for_render`| blocked          | blocked           |
//! | `is_blocked_for_physics`| not blocked     | not blocked       |
//!
//! Render and physics disagree at the top and bottom of a grid; both callers
//! rely on their own default, so the two predicates stay separate.

use blockwork_blocks::BlockType;

use crate::grid::BlockGrid;
use crate::neighbors::Lookup;

impl BlockGrid {
    /// True when the cell at `(x, y, z)` is solid (`>= Dirt`). Used for AO weights.
    pub fn is_opaque_neighbor(&self, x: i32, y: i32, z: i32) -> bool {
        match self.lookup(x, y, z) {
            Lookup::Cell(b) => b.kind.is_solid(),
            Lookup::VerticalOverflow | Lookup::Unresolved => false,
        }
    }

    /// Whether a face of a `query`-typed cell looking into `(x, y, z)` is hidden.
    pub fn is_blocked_for_render(&self, x: i32, y: i32, z: i32, query: BlockType) -> bool {
        let neighbor = match self.lookup(x, y, z) {
            // never draw at the world ceiling/floor
            Lookup::VerticalOverflow => return true,
            Lookup::Unresolved => return true,
            Lookup::Cell(b) => b.kind,
        };
        if neighbor.is_solid() {
            return true;
        }
        if query == BlockType::Empty {
            return true;
        }
        if neighbor == BlockType::Empty {
            return false;
        }
        if query == BlockType::Water {
            return neighbor != BlockType::Water;
        }
        neighbor == query
    }

    /// Whether collision geometry facing `(x, y, z)` is hidden: any non-empty cell blocks.
    pub fn is_blocked_for_physics(&self, x: i32, y: i32, z: i32) -> bool {
        match self.lookup(x, y, z) {
            Lookup::Cell(b) => !b.is_empty(),
            Lookup::VerticalOverflow | Lookup::Unresolved => false,
        }
    }

    /// True when all six face neighbors of an in-grid cell are solid.
    pub fn is_enclosed(&self, x: usize, y: usize, z: usize) -> bool {
        let (x, y, z) = (x as i32, y as i32, z as i32);
        [(1, 0, 0), (-1, 0, 0), (0, 1, 0), (0, -1, 0), (0, 0, 1), (0, 0, -1)]
            .iter()
            .all(|(dx, dy, dz)| self.is_opaque_neighbor(x + dx, y + dy, z + dz))
    }
}
