//! Directional face sweep shared by the mesh and physics builders.
//!
//! Each of the six faces is scanned with its merge axis (`Face::axes().2`)
//! innermost. Exposed faces of consecutive cells along that axis are folded
//! into one [`FaceRun`] when merging is enabled and their material and
//! corner occlusion agree.

use blockwork_blocks::Block;
use blockwork_geom::Vec3;

use crate::face::Face;
use crate::grid::{BLOCK_SIZE, BlockGrid};

/// Darkening added per occupied neighbor at a quad corner.
pub const AO_STEP: f32 = 0.25;

#[derive(Copy, Clone, Debug)]
pub struct SweepOptions {
    pub merge: bool,
    pub ambient_occlusion: bool,
}

/// A run of `len` exposed faces starting at cell `start`, extending along the
/// face's merge axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FaceRun {
    pub face: Face,
    pub start: [usize; 3],
    pub len: usize,
    pub block: Block,
    /// Corner weights in `corners()` order.
    pub ao: [f32; 4],
}

impl FaceRun {
    /// World-space corners `[c00, c10, c11, c01]` in `(u, v)` order; winding is
    /// counter-clockwise around the outward normal.
    pub fn corners(&self, grid: &BlockGrid) -> [Vec3; 4] {
        let (n, u, v) = self.face.axes();
        let mut base = grid.cell_min(self.start[0], self.start[1], self.start[2]);
        if self.face.is_positive() {
            *base.axis_mut(n) += BLOCK_SIZE;
        }
        let mut du = Vec3::ZERO;
        *du.axis_mut(u) = BLOCK_SIZE;
        let mut dv = Vec3::ZERO;
        *dv.axis_mut(v) = BLOCK_SIZE * self.len as f32;
        [base, base + du, base + du + dv, base + dv]
    }

    /// Two triangles `(c00, c10, c11)`, `(c00, c11, c01)` with matching corner indices.
    pub fn triangles(&self, grid: &BlockGrid) -> [(Vec3, usize); 6] {
        let c = self.corners(grid);
        [(c[0], 0), (c[1], 1), (c[2], 2), (c[0], 0), (c[2], 2), (c[3], 3)]
    }

    #[inline]
    fn end(&self) -> usize {
        let (_, _, v) = self.face.axes();
        self.start[v] + self.len
    }
}

/// Occlusion weights for the four corners of `face` on cell `(x, y, z)`.
///
/// Each corner counts the two edge neighbors and the diagonal neighbor in the
/// layer in front of the face.
pub fn corner_ao(grid: &BlockGrid, face: Face, x: usize, y: usize, z: usize) -> [f32; 4] {
    let (_, u, v) = face.axes();
    let (dx, dy, dz) = face.delta();
    let front = [x as i32 + dx, y as i32 + dy, z as i32 + dz];
    let at = |su: i32, sv: i32| {
        let mut p = front;
        p[u] += su;
        p[v] += sv;
        grid.is_opaque_neighbor(p[0], p[1], p[2]) as u8
    };
    let mut out = [0.0f32; 4];
    for (i, (su, sv)) in [(-1, -1), (1, -1), (1, 1), (-1, 1)].into_iter().enumerate() {
        let count = at(su, 0) + at(0, sv) + at(su, sv);
        out[i] = count as f32 * AO_STEP;
    }
    out
}

#[inline]
fn ao_bits_eq(a: &[f32; 4], b: &[f32; 4]) -> bool {
    a.iter().zip(b).all(|(x, y)| x.to_bits() == y.to_bits())
}

#[inline]
fn extent(grid: &BlockGrid, axis: usize) -> usize {
    if axis == 1 { grid.height() } else { grid.width() }
}

/// Sweeps one face direction.
///
/// `include` selects source cells; `exposed(grid, block, nx, ny, nz)` decides
/// whether the face looking into the neighbor coordinate is emitted.
pub fn sweep_face<I, E, F>(
    grid: &BlockGrid,
    face: Face,
    opts: SweepOptions,
    include: &I,
    exposed: &E,
    emit: &mut F,
) where
    I: Fn(&Block) -> bool,
    E: Fn(&BlockGrid, &Block, i32, i32, i32) -> bool,
    F: FnMut(&FaceRun),
{
    let (n, u, v) = face.axes();
    let (dx, dy, dz) = face.delta();
    for a in 0..extent(grid, n) {
        for b in 0..extent(grid, u) {
            // A run never survives past the end of its column.
            let mut run: Option<FaceRun> = None;
            for c in 0..extent(grid, v) {
                let mut p = [0usize; 3];
                p[n] = a;
                p[u] = b;
                p[v] = c;
                let block = grid.get(p[0], p[1], p[2]);
                let (nx, ny, nz) = (p[0] as i32 + dx, p[1] as i32 + dy, p[2] as i32 + dz);
                if !include(&block) || !exposed(grid, &block, nx, ny, nz) {
                    if let Some(r) = run.take() {
                        emit(&r);
                    }
                    continue;
                }
                let ao = if opts.ambient_occlusion {
                    corner_ao(grid, face, p[0], p[1], p[2])
                } else {
                    [0.0; 4]
                };
                if let Some(r) = run.as_mut() {
                    if opts.merge
                        && r.end() == c
                        && r.block.same_material(&block)
                        && ao_bits_eq(&r.ao, &ao)
                    {
                        r.len += 1;
                        continue;
                    }
                }
                if let Some(r) = run.replace(FaceRun {
                    face,
                    start: p,
                    len: 1,
                    block,
                    ao,
                }) {
                    emit(&r);
                }
            }
            if let Some(r) = run.take() {
                emit(&r);
            }
        }
    }
}

/// Runs [`sweep_face`] over all six faces.
pub fn sweep_faces<I, E, F>(
    grid: &BlockGrid,
    opts: SweepOptions,
    include: I,
    exposed: E,
    mut emit: F,
) where
    I: Fn(&Block) -> bool,
    E: Fn(&BlockGrid, &Block, i32, i32, i32) -> bool,
    F: FnMut(&FaceRun),
{
    for face in Face::ALL {
        sweep_face(grid, face, opts, &include, &exposed, &mut emit);
    }
}
