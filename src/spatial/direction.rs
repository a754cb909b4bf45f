//! Cardinal directions and neighbor lookup on a bounded or toroidal grid
//!
//! Rows grow downward, so `Up` is row - 1. Directions are indexed so that
//! `opposite(d) == 3 - d`, which keeps the compatibility table compact.

/// One of the four grid directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Row - 1
    Up,
    /// Column - 1
    Left,
    /// Column + 1
    Right,
    /// Row + 1
    Down,
}

impl Direction {
    /// All directions in index order
    pub const ALL: [Self; 4] = [Self::Up, Self::Left, Self::Right, Self::Down];

    /// Number of directions on a 2D grid
    pub const COUNT: usize = 4;

    /// Dense index used by per-direction tables
    pub const fn index(self) -> usize {
        match self {
            Self::Up => 0,
            Self::Left => 1,
            Self::Right => 2,
            Self::Down => 3,
        }
    }

    /// Direction pointing the other way
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
        }
    }

    /// Offset as (row delta, column delta)
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Self::Up => (-1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
            Self::Down => (1, 0),
        }
    }

    /// Where this direction points after a counter-clockwise quarter turn
    #[must_use]
    pub const fn rotated(self) -> Self {
        match self {
            Self::Right => Self::Up,
            Self::Up => Self::Left,
            Self::Left => Self::Down,
            Self::Down => Self::Right,
        }
    }

    /// Where this direction points after a left-right mirror
    #[must_use]
    pub const fn reflected(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            other => other,
        }
    }
}

/// Grid extent plus boundary behaviour for neighbor lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Topology {
    /// Number of rows
    pub height: usize,
    /// Number of columns
    pub width: usize,
    /// Whether lookups wrap around the edges
    pub periodic: bool,
}

impl Topology {
    /// Create a topology for a `height` x `width` grid
    pub const fn new(height: usize, width: usize, periodic: bool) -> Self {
        Self {
            height,
            width,
            periodic,
        }
    }

    /// Total number of cells
    pub const fn cell_count(&self) -> usize {
        self.height * self.width
    }

    /// Flat index of a (row, col) position
    pub const fn index_of(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// (row, col) position of a flat index
    pub const fn position_of(&self, index: usize) -> [usize; 2] {
        [index / self.width, index % self.width]
    }

    /// Flat index of the neighbor of `index` in `direction`
    ///
    /// Wraps modulo the grid size when periodic; otherwise returns `None`
    /// for neighbors outside the grid.
    pub fn neighbor(&self, index: usize, direction: Direction) -> Option<usize> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        let [row, col] = self.position_of(index);
        let (dr, dc) = direction.offset();
        let next_row = Self::step(row, dr, self.height, self.periodic)?;
        let next_col = Self::step(col, dc, self.width, self.periodic)?;
        Some(self.index_of(next_row, next_col))
    }

    const fn step(value: usize, delta: isize, extent: usize, periodic: bool) -> Option<usize> {
        let moved = value as isize + delta;
        if periodic {
            Some(moved.rem_euclid(extent as isize) as usize)
        } else if moved < 0 || moved >= extent as isize {
            None
        } else {
            Some(moved as usize)
        }
    }
}
