use std::cell::RefCell;
use std::rc::Weak;

use blockwork_blocks::Block;

use crate::grid::{BlockGrid, SharedGrid};

/// Horizontal neighbor directions. Left/Right step along X, Back/Front along Z.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Direction {
    Left = 0,
    Right = 1,
    Back = 2,
    Front = 3,
    LeftBack = 4,
    LeftFront = 5,
    RightBack = 6,
    RightFront = 7,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::Left,
        Direction::Right,
        Direction::Back,
        Direction::Front,
        Direction::LeftBack,
        Direction::LeftFront,
        Direction::RightBack,
        Direction::RightFront,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Grid steps `(x_move, z_move)`, each in `{-1, 0, 1}`.
    #[inline]
    pub fn moves(self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Back => (0, -1),
            Direction::Front => (0, 1),
            Direction::LeftBack => (-1, -1),
            Direction::LeftFront => (-1, 1),
            Direction::RightBack => (1, -1),
            Direction::RightFront => (1, 1),
        }
    }

    /// Inverse of [`Direction::moves`]; `None` for `(0, 0)`.
    #[inline]
    pub fn from_moves(x_move: i32, z_move: i32) -> Option<Direction> {
        Some(match (x_move.signum(), z_move.signum()) {
            (-1, 0) => Direction::Left,
            (1, 0) => Direction::Right,
            (0, -1) => Direction::Back,
            (0, 1) => Direction::Front,
            (-1, -1) => Direction::LeftBack,
            (-1, 1) => Direction::LeftFront,
            (1, -1) => Direction::RightBack,
            (1, 1) => Direction::RightFront,
            _ => return None,
        })
    }

    #[inline]
    pub fn opposite(self) -> Direction {
        let (x, z) = self.moves();
        // moves() is never (0, 0)
        Direction::from_moves(-x, -z).unwrap_or(self)
    }
}

/// Eight optional weak links. Never owning; a dropped neighbor reads as unlinked.
#[derive(Clone, Default)]
pub struct NeighborLinks {
    links: [Option<Weak<RefCell<BlockGrid>>>; 8],
}

impl NeighborLinks {
    #[inline]
    pub fn get(&self, dir: Direction) -> Option<&Weak<RefCell<BlockGrid>>> {
        self.links[dir.index()].as_ref()
    }

    #[inline]
    pub fn set(&mut self, dir: Direction, link: Option<Weak<RefCell<BlockGrid>>>) {
        self.links[dir.index()] = link;
    }

    pub fn linked_count(&self) -> usize {
        self.links
            .iter()
            .filter(|l| l.as_ref().is_some_and(|w| w.strong_count() > 0))
            .count()
    }
}

/// Where a possibly out-of-range coordinate lives.
#[derive(Clone, Debug)]
pub enum Resolution {
    /// Inside this grid.
    Local { x: usize, y: usize, z: usize },
    /// Inside the linked neighbor in `dir`, at its local coordinate.
    Neighbor { dir: Direction, grid: SharedGrid, x: i32, y: i32, z: i32 },
    /// Above or below the grid. There are no vertical neighbors.
    VerticalOverflow,
    /// Horizontal overflow without a live link in that direction.
    Unlinked(Direction),
}

/// Outcome of reading a cell through [`BlockGrid::lookup`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Lookup {
    Cell(Block),
    VerticalOverflow,
    /// No data: unlinked neighbor, dropped neighbor, busy neighbor, or a
    /// coordinate more than one grid-width away.
    Unresolved,
}

impl BlockGrid {
    /// Splits `(x, y, z)` into a grid and a local coordinate. Only single
    /// grid-width steps are modeled; larger overflows stay out of range locally.
    pub fn resolve(&self, x: i32, y: i32, z: i32) -> Resolution {
        let w = self.width() as i32;
        if y < 0 || y >= self.height() as i32 {
            return Resolution::VerticalOverflow;
        }
        let x_move = if x < 0 { -1 } else if x >= w { 1 } else { 0 };
        let z_move = if z < 0 { -1 } else if z >= w { 1 } else { 0 };
        let Some(dir) = Direction::from_moves(x_move, z_move) else {
            return Resolution::Local {
                x: x as usize,
                y: y as usize,
                z: z as usize,
            };
        };
        match self.neighbor(dir) {
            Some(grid) => Resolution::Neighbor {
                dir,
                grid,
                x: x - w * x_move,
                y,
                z: z - w * z_move,
            },
            None => Resolution::Unlinked(dir),
        }
    }

    /// Reads a cell that may sit in a neighboring grid.
    pub fn lookup(&self, x: i32, y: i32, z: i32) -> Lookup {
        match self.resolve(x, y, z) {
            Resolution::Local { x, y, z } => Lookup::Cell(self.get(x, y, z)),
            Resolution::Neighbor { grid, x, y, z, .. } => {
                // A neighbor currently borrowed for writing is treated as unlinked.
                let Ok(n) = grid.try_borrow() else {
                    return Lookup::Unresolved;
                };
                n.try_get(x, y, z).map_or(Lookup::Unresolved, Lookup::Cell)
            }
            Resolution::VerticalOverflow => Lookup::VerticalOverflow,
            Resolution::Unlinked(_) => Lookup::Unresolved,
        }
    }
}
