use blockwork_blocks::Block;
use blockwork_geom::Vec3;
use blockwork_grid::{BLOCK_RADIUS, BLOCK_SIZE, BlockGrid};

use crate::ProceduralGenerator;

const MIN_RADIUS: f32 = 1e-4;

/// Region tests, all scaled per axis by the stamp radii.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StampShape {
    /// Ellipsoid.
    Sphere,
    /// Elliptic cylinder along Y; `radii.y` is the half height.
    CylinderY,
    /// Axis-aligned box with half extents `radii`.
    Box,
}

impl StampShape {
    /// `d` is the offset from the stamp center divided by the radii.
    #[inline]
    fn contains(self, d: Vec3) -> bool {
        match self {
            StampShape::Sphere => d.dot(d) <= 1.0,
            StampShape::CylinderY => d.x * d.x + d.z * d.z <= 1.0 && d.y.abs() <= 1.0,
            StampShape::Box => d.x.abs() <= 1.0 && d.y.abs() <= 1.0 && d.z.abs() <= 1.0,
        }
    }
}

// Grid axis extents in cells and the centered-origin offset.
fn axis_layout(grid: &BlockGrid, axis: usize) -> (i64, f32) {
    let n = if axis == 1 { grid.height() } else { grid.width() };
    (n as i64, n as f32 * BLOCK_RADIUS)
}

impl ProceduralGenerator {
    pub fn stamp_sphere(
        &mut self,
        grid: &mut BlockGrid,
        center: Vec3,
        radii: Vec3,
        block: Block,
        replace: bool,
    ) -> usize {
        self.stamp(grid, StampShape::Sphere, center, radii, block, replace)
    }

    pub fn stamp_cylinder_y(
        &mut self,
        grid: &mut BlockGrid,
        center: Vec3,
        radii: Vec3,
        block: Block,
        replace: bool,
    ) -> usize {
        self.stamp(grid, StampShape::CylinderY, center, radii, block, replace)
    }

    pub fn stamp_volume(
        &mut self,
        grid: &mut BlockGrid,
        center: Vec3,
        radii: Vec3,
        block: Block,
        replace: bool,
    ) -> usize {
        self.stamp(grid, StampShape::Box, center, radii, block, replace)
    }

    /// Writes `block` into every cell whose center lies inside the shape.
    /// With `replace` off, occupied cells are kept. Returns cells written.
    pub fn stamp(
        &mut self,
        grid: &mut BlockGrid,
        shape: StampShape,
        center: Vec3,
        radii: Vec3,
        block: Block,
        replace: bool,
    ) -> usize {
        let radii = radii.max(Vec3::splat(MIN_RADIUS));
        let mut lo = [0i64; 3];
        let mut hi = [0i64; 3];
        let mut half = [0f32; 3];
        for axis in 0..3 {
            let (n, h) = axis_layout(grid, axis);
            let c = center.axis(axis) + h;
            let r = radii.axis(axis);
            // Candidates more than one grid-width out can never land; keep the loop bounded.
            lo[axis] = ((c - r) / BLOCK_SIZE).floor().max(-(n as f32)) as i64;
            hi[axis] = ((c + r) / BLOCK_SIZE).floor().min(2.0 * n as f32) as i64;
            half[axis] = h;
        }
        let (mut written, mut preserved, mut skipped) = (0usize, 0usize, 0usize);
        for x in lo[0]..=hi[0] {
            for y in lo[1]..=hi[1] {
                for z in lo[2]..=hi[2] {
                    let cell = Vec3::new(
                        (x as f32 + 0.5) * BLOCK_SIZE - half[0],
                        (y as f32 + 0.5) * BLOCK_SIZE - half[1],
                        (z as f32 + 0.5) * BLOCK_SIZE - half[2],
                    );
                    let d = cell - center;
                    let d = Vec3::new(d.x / radii.x, d.y / radii.y, d.z / radii.z);
                    if !shape.contains(d) {
                        continue;
                    }
                    let (x, y, z) = (x as i32, y as i32, z as i32);
                    match grid.try_get(x, y, z) {
                        None => skipped += 1,
                        Some(existing) if !replace && !existing.is_empty() => preserved += 1,
                        Some(_) => {
                            grid.set_at(x, y, z, block);
                            written += 1;
                        }
                    }
                }
            }
        }
        if written == 0 && preserved == 0 {
            log::warn!("{shape:?} stamp at {center:?} r={radii:?} hit no cells ({skipped} outside)");
        }
        self.stats.cells_written += written;
        self.stats.cells_preserved += preserved;
        self.stats.cells_skipped += skipped;
        written
    }
}
