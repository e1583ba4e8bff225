use blockwork_geom::Vec3;
use blockwork_grid::{BlockGrid, SweepOptions, sweep_faces};

/// Merged exposed faces of every cell from `Ice` upward, as a flat triangle list.
pub fn build_reduced_triangles(grid: &BlockGrid) -> Vec<Vec3> {
    let mut out = Vec::new();
    let opts = SweepOptions {
        merge: true,
        ambient_occlusion: false,
    };
    sweep_faces(
        grid,
        opts,
        |b| b.kind.is_physical(),
        |g, _, x, y, z| !g.is_blocked_for_physics(x, y, z),
        |run| out.extend(run.triangles(grid).iter().map(|(p, _)| *p)),
    );
    out
}
