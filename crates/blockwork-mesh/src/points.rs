use blockwork_grid::{BLOCK_RADIUS, BlockGrid};

/// Low-detail point sprite: one per occupied cell.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[repr(C)]
pub struct PointVertex {
    pub position: [f32; 3],
    pub radius: f32,
    pub color: [f32; 4],
}

/// Emits a point at the center of every non-empty cell. Hidden cells are not culled.
pub fn build_points(grid: &BlockGrid) -> Vec<PointVertex> {
    let mut out = Vec::with_capacity(grid.count_where(|b| !b.is_empty()));
    build_points_into(grid, &mut out);
    out
}

pub fn build_points_into(grid: &BlockGrid, out: &mut Vec<PointVertex>) {
    for (i, b) in grid.blocks().iter().enumerate() {
        if b.is_empty() {
            continue;
        }
        let (x, y, z) = grid.index_to_coord(i);
        out.push(PointVertex {
            position: grid.cell_center(x, y, z).to_array(),
            radius: BLOCK_RADIUS,
            color: b.color.to_array(),
        });
    }
}

#[cfg(test)]
mod tests {
    use blockwork_blocks::{Block, BlockType};
    use blockwork_geom::Rgba;

    use super::*;

    #[test]
    fn one_point_per_cell_including_interior() {
        let mut g = BlockGrid::new(2, 2);
        for x in 0..3 {
            for y in 0..3 {
                for z in 0..3 {
                    g.set_at(x, y, z, Block::new(BlockType::Stone, Rgba::WHITE));
                }
            }
        }
        let pts = build_points(&g);
        assert_eq!(pts.len(), 27);
        assert!(pts.iter().all(|p| p.radius == BLOCK_RADIUS));
        // 4x4x4 grid centered on the origin: cell (0,0,0) spans [-2,-1)
        assert!(pts.iter().any(|p| p.position == [-1.5, -1.5, -1.5]));
    }
}
