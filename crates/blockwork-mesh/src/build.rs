use std::time::Instant;

use blockwork_blocks::Block;
use blockwork_grid::{BlockGrid, FaceRun, SweepOptions, sweep_faces};
use serde::{Deserialize, Serialize};

use crate::emit::{BuildSink, emit_run};
use crate::mesh_build::{MeshBuffers, VERTS_PER_QUAD};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeshStrategy {
    /// One quad per exposed cell face.
    Linear,
    /// Consecutive matching faces along each sweep are folded into strips.
    #[default]
    Reduced,
}

/// Which neighbor rule hides a face.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaceCull {
    /// Type-aware translucency rules; grid top/bottom and unlinked sides are hidden.
    Render,
    /// Any non-empty neighbor hides the face; grid borders are exposed.
    Physics,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshOptions {
    pub strategy: MeshStrategy,
    pub cull: FaceCull,
    pub ambient_occlusion: bool,
}

impl MeshOptions {
    pub fn linear() -> Self {
        Self {
            strategy: MeshStrategy::Linear,
            cull: FaceCull::Physics,
            ambient_occlusion: true,
        }
    }

    pub fn reduced() -> Self {
        Self {
            strategy: MeshStrategy::Reduced,
            cull: FaceCull::Render,
            ambient_occlusion: true,
        }
    }

    #[inline]
    pub fn with_cull(mut self, cull: FaceCull) -> Self {
        self.cull = cull;
        self
    }

    fn sweep(&self) -> SweepOptions {
        SweepOptions {
            merge: self.strategy == MeshStrategy::Reduced,
            ambient_occlusion: self.ambient_occlusion,
        }
    }
}

impl Default for MeshOptions {
    fn default() -> Self {
        Self::reduced()
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MeshStats {
    pub quads: usize,
    pub opaque_vertices: usize,
    pub translucent_vertices: usize,
}

impl MeshStats {
    #[inline]
    pub fn vertices(&self) -> usize {
        self.opaque_vertices + self.translucent_vertices
    }
}

#[inline]
fn exposed(cull: FaceCull) -> impl Fn(&BlockGrid, &Block, i32, i32, i32) -> bool {
    move |g, b, x, y, z| match cull {
        FaceCull::Render => !g.is_blocked_for_render(x, y, z, b.kind),
        FaceCull::Physics => !g.is_blocked_for_physics(x, y, z),
    }
}

fn sweep_mesh(grid: &BlockGrid, opts: &MeshOptions, emit: impl FnMut(&FaceRun)) {
    sweep_faces(grid, opts.sweep(), |b| !b.is_empty(), exposed(opts.cull), emit);
}

/// Sizing pass: the exact number of quads `build_mesh_into` would append.
pub fn count_faces(grid: &BlockGrid, opts: &MeshOptions) -> usize {
    let mut n = 0usize;
    sweep_mesh(grid, opts, |_| n += 1);
    n
}

/// Appends the grid's surface to `sink`. Existing contents are kept.
pub fn build_mesh_into(grid: &BlockGrid, opts: &MeshOptions, sink: &mut impl BuildSink) -> usize {
    let mut quads = 0usize;
    sweep_mesh(grid, opts, |run| {
        emit_run(sink, grid, run);
        quads += 1;
    });
    quads
}

/// Builds fresh opaque/translucent buffers sized by a counting pass.
pub fn build_mesh(grid: &BlockGrid, opts: &MeshOptions) -> (MeshBuffers, MeshStats) {
    let t0 = Instant::now();
    let mut out = MeshBuffers::default();
    out.reserve_quads(count_faces(grid, opts));
    let stats = build_mesh_stats(grid, opts, &mut out);
    log::debug!(
        target: "perf",
        "ms={} mesh_build strategy={:?} quads={} opaque={} translucent={} dims=({}, {}, {})",
        t0.elapsed().as_millis(),
        opts.strategy,
        stats.quads,
        stats.opaque_vertices,
        stats.translucent_vertices,
        grid.width(),
        grid.height(),
        grid.width()
    );
    (out, stats)
}

/// Clears `out` and rebuilds into it, reusing its allocation.
pub fn rebuild_mesh(grid: &BlockGrid, opts: &MeshOptions, out: &mut MeshBuffers) -> MeshStats {
    out.clear_keep_capacity();
    build_mesh_stats(grid, opts, out)
}

fn build_mesh_stats(grid: &BlockGrid, opts: &MeshOptions, out: &mut MeshBuffers) -> MeshStats {
    let (o0, t0) = (out.opaque.len(), out.translucent.len());
    let quads = build_mesh_into(grid, opts, out);
    let stats = MeshStats {
        quads,
        opaque_vertices: out.opaque.len() - o0,
        translucent_vertices: out.translucent.len() - t0,
    };
    debug_assert_eq!(stats.vertices(), quads * VERTS_PER_QUAD);
    stats
}
