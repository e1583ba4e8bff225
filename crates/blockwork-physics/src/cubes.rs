use blockwork_geom::Vec3;
use blockwork_grid::{BLOCK_RADIUS, BlockGrid};

use crate::BoxCollider;

/// Unit boxes for every solid cell that is not sealed in by six solid neighbors.
pub fn build_cube_colliders(grid: &BlockGrid) -> Vec<BoxCollider> {
    let mut out = Vec::new();
    for (i, b) in grid.blocks().iter().enumerate() {
        if !b.kind.is_solid() {
            continue;
        }
        let (x, y, z) = grid.index_to_coord(i);
        if grid.is_enclosed(x, y, z) {
            continue;
        }
        out.push(BoxCollider {
            center: grid.cell_center(x, y, z),
            half_extents: Vec3::splat(BLOCK_RADIUS),
        });
    }
    out
}
