//! Collision shapes for an external rigid-body engine, built from a block grid.
#![forbid(unsafe_code)]

mod aabb;
mod cubes;
mod hull;
mod quads;

use std::time::Instant;

use blockwork_geom::{Aabb, Vec3};
use blockwork_grid::BlockGrid;
use serde::{Deserialize, Serialize};

pub use aabb::{VoxelAabb, build_merged_aabbs};
pub use cubes::build_cube_colliders;
pub use hull::build_hull_points;
pub use quads::build_reduced_triangles;

/// Axis-aligned box collider.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoxCollider {
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl BoxCollider {
    #[inline]
    pub fn from_aabb(b: &Aabb) -> Self {
        Self {
            center: b.center(),
            half_extents: b.half_extents(),
        }
    }

    #[inline]
    pub fn to_aabb(&self) -> Aabb {
        Aabb::new(self.center - self.half_extents, self.center + self.half_extents)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhysicsMode {
    /// One unit box per exposed solid cell.
    Cubes,
    /// Merged-face triangle soup for a static mesh collider.
    ReducedQuads,
    /// Corner point cloud for a convex-hull solver.
    ConvexHull,
    /// Greedy-merged boxes for a compound shape.
    #[default]
    MergedAabbs,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PhysicsShape {
    Boxes(Vec<BoxCollider>),
    /// Three vertices per triangle.
    TriangleMesh(Vec<Vec3>),
    ConvexHull(Vec<Vec3>),
    Compound(Vec<VoxelAabb>),
}

impl PhysicsShape {
    /// Boxes, triangles, or points depending on the variant.
    pub fn primitive_count(&self) -> usize {
        match self {
            PhysicsShape::Boxes(b) => b.len(),
            PhysicsShape::TriangleMesh(v) => v.len() / 3,
            PhysicsShape::ConvexHull(p) => p.len(),
            PhysicsShape::Compound(b) => b.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.primitive_count() == 0
    }

    pub fn mode(&self) -> PhysicsMode {
        match self {
            PhysicsShape::Boxes(_) => PhysicsMode::Cubes,
            PhysicsShape::TriangleMesh(_) => PhysicsMode::ReducedQuads,
            PhysicsShape::ConvexHull(_) => PhysicsMode::ConvexHull,
            PhysicsShape::Compound(_) => PhysicsMode::MergedAabbs,
        }
    }
}

pub fn build(grid: &BlockGrid, mode: PhysicsMode) -> PhysicsShape {
    let t0 = Instant::now();
    let shape = match mode {
        PhysicsMode::Cubes => PhysicsShape::Boxes(build_cube_colliders(grid)),
        PhysicsMode::ReducedQuads => PhysicsShape::TriangleMesh(build_reduced_triangles(grid)),
        PhysicsMode::ConvexHull => PhysicsShape::ConvexHull(build_hull_points(grid)),
        PhysicsMode::MergedAabbs => PhysicsShape::Compound(build_merged_aabbs(grid)),
    };
    log::debug!(
        target: "perf",
        "ms={} physics_build mode={:?} primitives={} dims=({}, {}, {})",
        t0.elapsed().as_millis(),
        mode,
        shape.primitive_count(),
        grid.width(),
        grid.height(),
        grid.width()
    );
    shape
}

#[cfg(test)]
mod tests {
    use blockwork_blocks::{Block, BlockType};
    use blockwork_geom::Rgba;

    use super::*;

    #[test]
    fn collider_and_aabb_convert_both_ways() {
        let b = Aabb::new(Vec3::new(-1.0, 0.0, 2.0), Vec3::new(3.0, 1.0, 4.0));
        let c = BoxCollider::from_aabb(&b);
        assert_eq!(c.center, Vec3::new(1.0, 0.5, 3.0));
        assert_eq!(c.half_extents, Vec3::new(2.0, 0.5, 1.0));
        assert_eq!(c.to_aabb(), b);
    }

    #[test]
    fn merged_boxes_map_back_to_cell_bounds() {
        let mut g = BlockGrid::new(2, 2);
        for z in 0..3 {
            g.set_at(1, 2, z, Block::new(BlockType::Metal, Rgba::WHITE));
        }
        let PhysicsShape::Compound(boxes) = build(&g, PhysicsMode::MergedAabbs) else {
            panic!("expected compound shape");
        };
        assert_eq!(boxes.len(), 1);
        let aabb = boxes[0].collider().to_aabb();
        assert_eq!(aabb.min, g.cell_min(1, 2, 0));
        assert_eq!(aabb.max, g.cell_min(2, 3, 3));
    }
}
