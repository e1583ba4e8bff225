use blockwork_geom::Vec3;
use blockwork_grid::{BLOCK_SIZE, BlockGrid};
use hashbrown::HashSet;

/// Corner points of every exposed solid cell, each lattice corner once, in
/// first-seen order.
pub fn build_hull_points(grid: &BlockGrid) -> Vec<Vec3> {
    let mut seen: HashSet<(usize, usize, usize)> = HashSet::new();
    let mut out = Vec::new();
    for (i, b) in grid.blocks().iter().enumerate() {
        if !b.kind.is_solid() {
            continue;
        }
        let (x, y, z) = grid.index_to_coord(i);
        if grid.is_enclosed(x, y, z) {
            continue;
        }
        let min = grid.cell_min(x, y, z);
        for c in 0..8usize {
            let (dx, dy, dz) = (c & 1, (c >> 1) & 1, (c >> 2) & 1);
            if !seen.insert((x + dx, y + dy, z + dz)) {
                continue;
            }
            out.push(min + Vec3::new(dx as f32, dy as f32, dz as f32) * BLOCK_SIZE);
        }
    }
    out
}
