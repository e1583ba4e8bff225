use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use blockwork_blocks::{Block, BlockType};
use blockwork_geom::{Rgba, Vec3};

use crate::neighbors::{Direction, NeighborLinks};

pub const MIN_BITS: u32 = 1;
pub const MAX_BITS: u32 = 8;

/// Edge length of one cell in world units.
pub const BLOCK_SIZE: f32 = 1.0;
/// Half the edge length of one cell.
pub const BLOCK_RADIUS: f32 = BLOCK_SIZE * 0.5;

/// Grids are linked to their neighbors through `Weak` handles into this shared form.
pub type SharedGrid = Rc<RefCell<BlockGrid>>;

/// Dense `width x height x width` block volume addressed by a bit-packed index.
///
/// Index layout: `z | (y | (x << height_bits)) << width_bits`, i.e. X in the high
/// bits, Y in the middle, Z low. The grid is centered on the world origin.
#[derive(Clone)]
pub struct BlockGrid {
    width_bits: u32,
    height_bits: u32,
    blocks: Vec<Block>,
    changed: bool,
    neighbors: NeighborLinks,
}

impl Default for BlockGrid {
    fn default() -> Self {
        Self::new(4, 4)
    }
}

impl fmt::Debug for BlockGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockGrid")
            .field("width_bits", &self.width_bits)
            .field("height_bits", &self.height_bits)
            .field("cells", &self.blocks.len())
            .field("changed", &self.changed)
            .field("neighbors", &self.neighbors.linked_count())
            .finish()
    }
}

#[inline]
fn clamp_bits(bits: u32) -> u32 {
    bits.clamp(MIN_BITS, MAX_BITS)
}

#[inline]
fn cell_count(width_bits: u32, height_bits: u32) -> usize {
    1usize << (2 * width_bits + height_bits)
}

impl BlockGrid {
    /// Empty grid; bits are clamped to `[MIN_BITS, MAX_BITS]`.
    pub fn new(width_bits: u32, height_bits: u32) -> Self {
        let width_bits = clamp_bits(width_bits);
        let height_bits = clamp_bits(height_bits);
        Self {
            width_bits,
            height_bits,
            blocks: vec![Block::EMPTY; cell_count(width_bits, height_bits)],
            changed: true,
            neighbors: NeighborLinks::default(),
        }
    }

    pub fn into_shared(self) -> SharedGrid {
        Rc::new(RefCell::new(self))
    }

    #[inline]
    pub fn width_bits(&self) -> u32 {
        self.width_bits
    }

    #[inline]
    pub fn height_bits(&self) -> u32 {
        self.height_bits
    }

    #[inline]
    pub fn width(&self) -> usize {
        1 << self.width_bits
    }

    #[inline]
    pub fn height(&self) -> usize {
        1 << self.height_bits
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocks.iter().all(Block::is_empty)
    }

    #[inline]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    // --- change tracking ---

    #[inline]
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    #[inline]
    pub fn mark_changed(&mut self) {
        self.changed = true;
    }

    /// Returns whether cached mesh/physics data is stale and clears the flag.
    #[inline]
    pub fn take_changed(&mut self) -> bool {
        std::mem::replace(&mut self.changed, false)
    }

    // --- addressing ---

    #[inline]
    pub fn coord_to_index(&self, x: usize, y: usize, z: usize) -> usize {
        z | (y | (x << self.height_bits)) << self.width_bits
    }

    #[inline]
    pub fn index_to_coord(&self, index: usize) -> (usize, usize, usize) {
        let z = index & (self.width() - 1);
        let y = (index >> self.width_bits) & (self.height() - 1);
        let x = index >> (self.width_bits + self.height_bits);
        (x, y, z)
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32, z: i32) -> bool {
        let (w, h) = (self.width() as i32, self.height() as i32);
        x >= 0 && z >= 0 && y >= 0 && x < w && z < w && y < h
    }

    /// Maps a world position to a grid coordinate, or `None` outside the grid.
    pub fn pos_to_coord(&self, pos: Vec3) -> Option<(usize, usize, usize)> {
        let half = Vec3::new(
            self.width() as f32 * BLOCK_RADIUS,
            self.height() as f32 * BLOCK_RADIUS,
            self.width() as f32 * BLOCK_RADIUS,
        );
        let g = (pos + half) / BLOCK_SIZE;
        let (fx, fy, fz) = (g.x.floor(), g.y.floor(), g.z.floor());
        let (w, h) = (self.width() as f32, self.height() as f32);
        // NaN fails every comparison and lands here too.
        if !(fx >= 0.0 && fz >= 0.0 && fy >= 0.0 && fx < w && fz < w && fy < h) {
            return None;
        }
        Some((fx as usize, fy as usize, fz as usize))
    }

    #[inline]
    pub fn pos_to_index(&self, pos: Vec3) -> Option<usize> {
        self.pos_to_coord(pos)
            .map(|(x, y, z)| self.coord_to_index(x, y, z))
    }

    /// World-space minimum corner of a cell.
    #[inline]
    pub fn cell_min(&self, x: usize, y: usize, z: usize) -> Vec3 {
        let w2 = self.width() as f32 * 0.5;
        let h2 = self.height() as f32 * 0.5;
        Vec3::new(
            (x as f32 - w2) * BLOCK_SIZE,
            (y as f32 - h2) * BLOCK_SIZE,
            (z as f32 - w2) * BLOCK_SIZE,
        )
    }

    #[inline]
    pub fn cell_center(&self, x: usize, y: usize, z: usize) -> Vec3 {
        self.cell_min(x, y, z) + Vec3::splat(BLOCK_RADIUS)
    }

    // --- access ---

    /// Unchecked-by-contract read for sweep loops. Panics when out of range.
    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> Block {
        self.blocks[self.coord_to_index(x, y, z)]
    }

    /// Checked read: `None` for coordinates outside the grid.
    #[inline]
    pub fn try_get(&self, x: i32, y: i32, z: i32) -> Option<Block> {
        if !self.in_bounds(x, y, z) {
            return None;
        }
        Some(self.get(x as usize, y as usize, z as usize))
    }

    /// Writes a cell by world position. Positions outside the grid are dropped.
    pub fn set(&mut self, pos: Vec3, color: Rgba, kind: BlockType) {
        if let Some(i) = self.pos_to_index(pos) {
            self.blocks[i] = Block::new(kind, color);
            self.changed = true;
        }
    }

    /// Checked write by grid coordinate; returns whether the cell was inside.
    pub fn set_at(&mut self, x: i32, y: i32, z: i32, block: Block) -> bool {
        if !self.in_bounds(x, y, z) {
            return false;
        }
        let i = self.coord_to_index(x as usize, y as usize, z as usize);
        self.blocks[i] = block;
        self.changed = true;
        true
    }

    // --- structural edits ---

    /// Reallocates at the new size. Contents are not carried over.
    pub fn resize(&mut self, width_bits: u32, height_bits: u32) {
        let width_bits = clamp_bits(width_bits);
        let height_bits = clamp_bits(height_bits);
        if width_bits == self.width_bits && height_bits == self.height_bits {
            return;
        }
        log::debug!(
            "grid resize {}x{} -> {}x{} bits; contents dropped",
            self.width_bits,
            self.height_bits,
            width_bits,
            height_bits
        );
        self.width_bits = width_bits;
        self.height_bits = height_bits;
        self.blocks = vec![Block::EMPTY; cell_count(width_bits, height_bits)];
        self.changed = true;
    }

    pub fn clear(&mut self) {
        self.blocks.fill(Block::EMPTY);
        self.changed = true;
    }

    /// Quarter turn around the vertical axis.
    /// `ccw`: `(x, z) -> (z, w-1-x)`; otherwise the inverse `(x, z) -> (w-1-z, x)`.
    pub fn rotate_y(&mut self, ccw: bool) {
        let last = self.width() - 1;
        let mut rotated = vec![Block::EMPTY; self.blocks.len()];
        for (i, b) in self.blocks.iter().enumerate() {
            let (x, y, z) = self.index_to_coord(i);
            let (nx, nz) = if ccw { (z, last - x) } else { (last - z, x) };
            rotated[self.coord_to_index(nx, y, nz)] = *b;
        }
        self.blocks = rotated;
        self.changed = true;
    }

    /// Circularly shifts the flat cell array by each axis' index stride.
    ///
    /// X wraps cleanly within the grid; Y and Z carry into the next-higher axis
    /// at the end of a row since the shift is applied to linear memory.
    pub fn move_contents(&mut self, dx: i32, dy: i32, dz: i32) {
        let len = self.blocks.len() as i64;
        let strides = [
            (dx, 1i64 << (self.width_bits + self.height_bits)),
            (dy, 1i64 << self.width_bits),
            (dz, 1i64),
        ];
        for (d, stride) in strides {
            if d == 0 {
                continue;
            }
            let shift = (d as i64 * stride).rem_euclid(len) as usize;
            self.blocks.rotate_right(shift);
        }
        self.changed = true;
    }

    /// Recolors every cell whose color equals `old`. Returns how many changed.
    pub fn replace_color(&mut self, old: Rgba, new: Rgba) -> usize {
        let mut n = 0;
        for b in self.blocks.iter_mut().filter(|b| b.color == old) {
            b.color = new;
            n += 1;
        }
        if n > 0 {
            self.changed = true;
        }
        n
    }

    /// Retypes every cell of kind `old`, keeping its color. Returns how many changed.
    pub fn replace_type(&mut self, old: BlockType, new: BlockType) -> usize {
        let mut n = 0;
        for b in self.blocks.iter_mut().filter(|b| b.kind == old) {
            b.kind = new;
            n += 1;
        }
        if n > 0 {
            self.changed = true;
        }
        n
    }

    // --- statistics ---

    pub fn count_where(&self, pred: impl Fn(&Block) -> bool) -> usize {
        self.blocks.iter().filter(|b| pred(b)).count()
    }

    /// Inclusive coordinate bounds of all non-empty cells.
    pub fn occupied_bounds(&self) -> Option<((usize, usize, usize), (usize, usize, usize))> {
        let mut out: Option<((usize, usize, usize), (usize, usize, usize))> = None;
        for (i, b) in self.blocks.iter().enumerate() {
            if b.is_empty() {
                continue;
            }
            let c = self.index_to_coord(i);
            out = Some(match out {
                None => (c, c),
                Some((lo, hi)) => (
                    (lo.0.min(c.0), lo.1.min(c.1), lo.2.min(c.2)),
                    (hi.0.max(c.0), hi.1.max(c.1), hi.2.max(c.2)),
                ),
            });
        }
        out
    }

    // --- neighbor links ---

    pub fn link_neighbor(&mut self, dir: Direction, other: &SharedGrid) {
        self.neighbors.set(dir, Some(Rc::downgrade(other)));
    }

    pub fn unlink_neighbor(&mut self, dir: Direction) {
        self.neighbors.set(dir, None);
    }

    /// Live neighbor in `dir`, if linked and not yet dropped.
    pub fn neighbor(&self, dir: Direction) -> Option<SharedGrid> {
        self.neighbors.get(dir).and_then(Weak::upgrade)
    }
}

/// Links `a -> b` in `dir` and `b -> a` in the opposite direction.
pub fn link_pair(a: &SharedGrid, dir: Direction, b: &SharedGrid) {
    a.borrow_mut().link_neighbor(dir, b);
    b.borrow_mut().link_neighbor(dir.opposite(), a);
}
