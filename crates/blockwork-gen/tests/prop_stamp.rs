use blockwork_blocks::{Block, BlockType};
use blockwork_geom::{Rgba, Vec3};
use blockwork_gen::{GenParams, ProceduralGenerator, StampShape};
use blockwork_grid::BlockGrid;
use proptest::prelude::*;

fn shape() -> impl Strategy<Value = StampShape> {
    prop_oneof![
        Just(StampShape::Sphere),
        Just(StampShape::CylinderY),
        Just(StampShape::Box),
    ]
}

fn prefilled() -> BlockGrid {
    let mut g = BlockGrid::new(3, 3);
    let b = Block::new(BlockType::Brick, Rgba::rgb(0.6, 0.2, 0.2));
    for x in 2..6 {
        for y in 0..8 {
            for z in 1..4 {
                g.set_at(x, y, z, b);
            }
        }
    }
    g
}

proptest! {
    // replace=false never touches occupied cells; replace=true owns the whole overlap
    #[test]
    fn replace_semantics(
        shape in shape(),
        cx in -5.0f32..5.0, cy in -5.0f32..5.0, cz in -5.0f32..5.0,
        rx in 0.2f32..4.0, ry in 0.2f32..4.0, rz in 0.2f32..4.0,
    ) {
        let sand = Block::new(BlockType::Sand, Rgba::rgb(0.9, 0.8, 0.5));
        let center = Vec3::new(cx, cy, cz);
        let radii = Vec3::new(rx, ry, rz);

        let before = prefilled();
        let mut kept = before.clone();
        let mut pg = ProceduralGenerator::new(1);
        let n_kept = pg.stamp(&mut kept, shape, center, radii, sand, false);
        let mut replaced = before.clone();
        let n_replaced = pg.stamp(&mut replaced, shape, center, radii, sand, true);

        prop_assert!(n_kept <= n_replaced);
        for i in 0..before.len() {
            let (b, k, r) = (before.blocks()[i], kept.blocks()[i], replaced.blocks()[i]);
            if !b.is_empty() {
                prop_assert_eq!(k, b);
            }
            // every cell the keeping stamp wrote, the replacing one wrote too
            if k != b {
                prop_assert_eq!(k, sand);
                prop_assert_eq!(r, sand);
            }
            if r != b {
                prop_assert_eq!(r, sand);
            }
        }
        prop_assert_eq!(
            replaced.count_where(|c| c.kind == BlockType::Sand),
            n_replaced
        );
    }

    // the tree never escapes its step budget: every wood cell is within reach of the origin
    #[test]
    fn tree_stays_within_step_budget(seed in any::<u64>()) {
        let params = GenParams::default().tree;
        let mut g = BlockGrid::new(6, 5);
        let origin = g.cell_center(32, 0, 32);
        let mut pg = ProceduralGenerator::new(seed);
        let report = pg.generate_tree(&mut g, origin, &params);
        prop_assert!(report.branches <= params.max_branches as usize);
        let reach = params.max_steps as f32 * params.step_length
            + params.trunk_radius.max(params.foliage_radius)
            + 1.0;
        for (i, b) in g.blocks().iter().enumerate() {
            if b.is_empty() {
                continue;
            }
            let (x, y, z) = g.index_to_coord(i);
            prop_assert!((g.cell_center(x, y, z) - origin).length() <= reach);
        }
    }
}
