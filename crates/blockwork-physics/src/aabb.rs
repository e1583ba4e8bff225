//! Three-pass greedy box merge.
//!
//! 1. Z runs: consecutive cells of one kind along Z in an `(x, y)` column form a box.
//! 2. Y rows: each new run absorbs a box of the previous row in the same X slice
//!    with identical X/Z extents whose top touches its bottom.
//! 3. X slices: each slice box absorbs a box of the previous slice with identical
//!    Y/Z extents whose right face touches its left face.
//!
//! Merges follow strict sweep order and each box absorbs at most one
//! predecessor per pass.

use blockwork_blocks::BlockType;
use blockwork_geom::{Aabb, Vec3};
use blockwork_grid::{BLOCK_RADIUS, BLOCK_SIZE, BlockGrid};

use crate::BoxCollider;

const EPS: f32 = BLOCK_RADIUS * 0.1;

/// Merge intermediate and final compound-shape element.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VoxelAabb {
    pub min: Vec3,
    pub max: Vec3,
    pub kind: BlockType,
}

impl VoxelAabb {
    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.min, self.max)
    }

    #[inline]
    pub fn collider(&self) -> BoxCollider {
        BoxCollider::from_aabb(&self.aabb())
    }

    #[inline]
    fn same_span(&self, other: &VoxelAabb, axis: usize) -> bool {
        (self.min.axis(axis) - other.min.axis(axis)).abs() < EPS
            && (self.max.axis(axis) - other.max.axis(axis)).abs() < EPS
    }

    /// True when `below` can be folded into `self` along `axis`.
    #[inline]
    fn stacks_on(&self, below: &VoxelAabb, axis: usize) -> bool {
        self.kind == below.kind
            && (below.max.axis(axis) - self.min.axis(axis)).abs() < EPS
            && (0..3).filter(|&a| a != axis).all(|a| self.same_span(below, a))
    }
}

// Absorbs the first live candidate `self` stacks on; the absorbed box is removed.
fn absorb_one(
    b: &mut VoxelAabb,
    pool: &mut [Option<VoxelAabb>],
    candidates: &[usize],
    axis: usize,
) {
    for &j in candidates {
        let Some(prev) = pool[j] else { continue };
        if b.stacks_on(&prev, axis) {
            *b.min.axis_mut(axis) = prev.min.axis(axis);
            pool[j] = None;
            return;
        }
    }
}

pub fn build_merged_aabbs(grid: &BlockGrid) -> Vec<VoxelAabb> {
    let (w, h) = (grid.width(), grid.height());
    let mut out: Vec<VoxelAabb> = Vec::new();
    let mut prev_slice: Vec<Option<VoxelAabb>> = Vec::new();

    for x in 0..w {
        let mut slice: Vec<Option<VoxelAabb>> = Vec::new();
        let mut prev_row: Vec<usize> = Vec::new();
        for y in 0..h {
            let mut row: Vec<usize> = Vec::new();
            let mut run: Option<VoxelAabb> = None;
            let mut flush = |run: Option<VoxelAabb>, slice: &mut Vec<Option<VoxelAabb>>| {
                if let Some(mut b) = run {
                    absorb_one(&mut b, slice, &prev_row, 1);
                    row.push(slice.len());
                    slice.push(Some(b));
                }
            };
            for z in 0..w {
                let cell = grid.get(x, y, z);
                if !cell.kind.is_physical() {
                    flush(run.take(), &mut slice);
                    continue;
                }
                if let Some(r) = run.as_mut() {
                    if r.kind == cell.kind {
                        r.max.z += BLOCK_SIZE;
                        continue;
                    }
                }
                flush(run.take(), &mut slice);
                let min = grid.cell_min(x, y, z);
                run = Some(VoxelAabb {
                    min,
                    max: min + Vec3::splat(BLOCK_SIZE),
                    kind: cell.kind,
                });
            }
            flush(run.take(), &mut slice);
            prev_row = row;
        }

        let candidates: Vec<usize> = (0..prev_slice.len()).collect();
        for b in slice.iter_mut().flatten() {
            absorb_one(b, &mut prev_slice, &candidates, 0);
        }
        out.extend(prev_slice.drain(..).flatten());
        prev_slice = slice;
    }
    out.extend(prev_slice.into_iter().flatten());
    out
}
