use blockwork_blocks::{Block, BlockType};
use blockwork_geom::Vec3;
use blockwork_grid::BlockGrid;

use crate::ProceduralGenerator;
use crate::params::TreeParams;

// Branches never point further down than this after a course change.
const MIN_RISE: f32 = 0.15;
// Child branches start thinner than the parent tip.
const CHILD_RADIUS_SCALE: f32 = 0.8;

#[derive(Copy, Clone, Debug)]
struct Branch {
    pos: Vec3,
    dir: Vec3,
    radius: f32,
    steps: u32,
}

/// Result of one [`ProceduralGenerator::generate_tree`] call.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeReport {
    pub branches: usize,
    pub foliage_clusters: usize,
}

impl ProceduralGenerator {
    fn deviate(&mut self, dir: Vec3, amount: f32) -> Vec3 {
        let wobble = Vec3::new(
            self.jitter(amount),
            self.jitter(amount * 0.5),
            self.jitter(amount),
        );
        let mut d = dir + wobble;
        d.y = d.y.max(MIN_RISE);
        d.normalized()
    }

    /// Grows a tree whose trunk base sits at world position `origin`.
    ///
    /// Branches are kept on an explicit stack. Every branch either splits into
    /// two children or ends with a leaf cluster, and the step and branch caps
    /// bound the total work.
    pub fn generate_tree(
        &mut self,
        grid: &mut BlockGrid,
        origin: Vec3,
        params: &TreeParams,
    ) -> TreeReport {
        let wood = self.palette.block(BlockType::Wood);
        let leaves = self.palette.block(BlockType::Leaves);
        let mut report = TreeReport { branches: 1, ..Default::default() };
        let mut stack = vec![Branch {
            pos: origin,
            dir: Vec3::UP,
            radius: params.trunk_radius,
            steps: 0,
        }];
        while let Some(mut b) = stack.pop() {
            let mut split = false;
            loop {
                if b.radius > params.solid_threshold {
                    self.stamp_sphere(grid, b.pos, Vec3::splat(b.radius), wood, true);
                } else {
                    self.set_cell(grid, b.pos, wood);
                }
                b.steps += 1;
                if b.steps >= params.max_steps || b.radius < params.min_radius {
                    break;
                }
                if b.steps > params.trunk_steps {
                    if self.rng.f32() < params.shrink_chance {
                        b.radius *= params.shrink_factor;
                    }
                    if report.branches + 2 <= params.max_branches as usize
                        && self.rng.f32() < params.split_chance
                    {
                        for _ in 0..2 {
                            let dir = self.deviate(b.dir, params.deviation * 2.0);
                            stack.push(Branch {
                                pos: b.pos + dir * params.step_length,
                                dir,
                                radius: b.radius * CHILD_RADIUS_SCALE,
                                steps: b.steps,
                            });
                        }
                        report.branches += 2;
                        split = true;
                        break;
                    }
                    b.dir = self.deviate(b.dir, params.deviation);
                }
                b.pos += b.dir * params.step_length;
            }
            if !split {
                let r = Vec3::splat(params.foliage_radius);
                self.stamp_sphere(grid, b.pos, r, leaves, false);
                report.foliage_clusters += 1;
            }
        }
        self.stats.branches += report.branches;
        self.stats.foliage_clusters += report.foliage_clusters;
        log::debug!(
            "tree at {:?}: {} branches, {} foliage clusters",
            origin,
            report.branches,
            report.foliage_clusters
        );
        report
    }

    fn set_cell(&mut self, grid: &mut BlockGrid, pos: Vec3, block: Block) {
        match grid.pos_to_coord(pos) {
            Some((x, y, z)) => {
                grid.set_at(x as i32, y as i32, z as i32, block);
                self.stats.cells_written += 1;
            }
            None => self.stats.cells_skipped += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(grid: &BlockGrid) -> Vec3 {
        grid.cell_center(grid.width() / 2, 0, grid.width() / 2)
    }

    #[test]
    fn trunk_starts_at_origin_and_foliage_exists() {
        for seed in 0..16 {
            // wide enough that no tip can leave the grid sideways
            let mut g = BlockGrid::new(6, 5);
            let mut pg = ProceduralGenerator::new(seed);
            let origin = base(&g);
            let report = pg.generate_tree(&mut g, origin, &TreeParams::default());
            let (x, y, z) = g.pos_to_coord(origin).unwrap();
            assert_eq!(g.get(x, y, z).kind, BlockType::Wood, "seed {seed}");
            // straight trunk section directly above the origin
            for dy in 1..TreeParams::default().trunk_steps as usize {
                assert_eq!(g.get(x, y + dy, z).kind, BlockType::Wood, "seed {seed}");
            }
            assert!(report.foliage_clusters >= 1);
            assert!(g.count_where(|b| b.kind == BlockType::Leaves) > 0, "seed {seed}");
        }
    }

    #[test]
    fn branch_cap_holds_and_every_tip_gets_foliage() {
        let params = TreeParams {
            split_chance: 1.0,
            max_branches: 7,
            ..TreeParams::default()
        };
        let mut g = BlockGrid::new(5, 5);
        let mut pg = ProceduralGenerator::new(42);
        let origin = base(&g);
        let report = pg.generate_tree(&mut g, origin, &params);
        assert_eq!(report.branches, 7);
        // a binary split tree with 7 nodes has 4 leaves
        assert_eq!(report.foliage_clusters, 4);
        assert_eq!(pg.stats().branches, 7);
    }

    #[test]
    fn same_seed_same_tree() {
        let grow = |seed| {
            let mut g = BlockGrid::new(5, 5);
            let origin = base(&g);
            ProceduralGenerator::new(seed).generate_tree(&mut g, origin, &TreeParams::default());
            g.blocks().to_vec()
        };
        assert_eq!(grow(9), grow(9));
    }

    #[test]
    fn thin_trunk_sets_single_cells() {
        let params = TreeParams {
            trunk_radius: 0.5,
            split_chance: 0.0,
            shrink_chance: 0.0,
            foliage_radius: 0.1,
            max_steps: 6,
            deviation: 0.0,
            ..TreeParams::default()
        };
        let mut g = BlockGrid::new(4, 4);
        let mut pg = ProceduralGenerator::new(5);
        let origin = base(&g);
        pg.generate_tree(&mut g, origin, &params);
        assert_eq!(g.count_where(|b| b.kind == BlockType::Wood), 6);
        // tip cell already holds wood, replace is off for leaves
        assert_eq!(g.count_where(|b| b.kind == BlockType::Leaves), 0);
    }
}
