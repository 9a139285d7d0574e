//! Grid geometry: cells, the eight straight-line directions, and the letter grid.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One grid position, `0 <= row, col < size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    #[must_use]
    pub fn in_bounds(self, size: usize) -> bool {
        self.row < size && self.col < size
    }

    /// The cell `n` steps away along `direction`, or `None` once that leaves `[0, size)`.
    #[must_use]
    pub fn step(self, direction: Direction, n: usize, size: usize) -> Option<Cell> {
        let (dr, dc) = direction.delta();
        let n = isize::try_from(n).ok()?;
        let row = offset(self.row, dr.checked_mul(n)?)?;
        let col = offset(self.col, dc.checked_mul(n)?)?;
        let cell = Cell::new(row, col);
        cell.in_bounds(size).then_some(cell)
    }
}

fn offset(base: usize, delta: isize) -> Option<usize> {
    base.checked_add_signed(delta)
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Cell::new(row, col)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// One of the 8 unit steps `(dr, dc) ∈ {-1,0,1}² \ {(0,0)}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    East,
    West,
    South,
    North,
    SouthEast,
    SouthWest,
    NorthEast,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::East,
        Direction::West,
        Direction::South,
        Direction::North,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::NorthEast,
        Direction::NorthWest,
    ];

    /// `(dr, dc)`: rows grow downwards, columns grow to the right.
    #[must_use]
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::East => (0, 1),
            Direction::West => (0, -1),
            Direction::South => (1, 0),
            Direction::North => (-1, 0),
            Direction::SouthEast => (1, 1),
            Direction::SouthWest => (1, -1),
            Direction::NorthEast => (-1, 1),
            Direction::NorthWest => (-1, -1),
        }
    }

    #[must_use]
    pub fn from_delta(dr: isize, dc: isize) -> Option<Direction> {
        Direction::ALL.into_iter().find(|d| d.delta() == (dr, dc))
    }

    #[must_use]
    pub fn reversed(self) -> Direction {
        let (dr, dc) = self.delta();
        match Direction::from_delta(-dr, -dc) {
            Some(d) => d,
            None => unreachable!("every direction has an opposite"),
        }
    }

    /// Direction from `from` towards `to`, taking the sign of each axis.
    ///
    /// Returns `None` when the two cells coincide.
    #[must_use]
    pub fn toward(from: Cell, to: Cell) -> Option<Direction> {
        let dr = signum_diff(from.row, to.row);
        let dc = signum_diff(from.col, to.col);
        Direction::from_delta(dr, dc)
    }
}

fn signum_diff(from: usize, to: usize) -> isize {
    match to.cmp(&from) {
        std::cmp::Ordering::Less => -1,
        std::cmp::Ordering::Equal => 0,
        std::cmp::Ordering::Greater => 1,
    }
}

/// A fully populated `size x size` letter grid, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    size: usize,
    letters: Vec<char>,
}

/// Unchecked wire form; deserialization goes through [`Grid::from_letters`].
#[derive(Deserialize)]
struct RawGrid {
    size: usize,
    letters: Vec<char>,
}

impl TryFrom<RawGrid> for Grid {
    type Error = String;

    fn try_from(raw: RawGrid) -> Result<Self, Self::Error> {
        let len = raw.letters.len();
        Grid::from_letters(raw.size, raw.letters)
            .ok_or_else(|| format!("grid of size {} needs {} letters, got {len}", raw.size, raw.size.saturating_mul(raw.size)))
    }
}

impl Grid {
    /// Build a grid from row-major letters.
    ///
    /// Returns `None` unless `letters.len() == size * size`.
    #[must_use]
    pub fn from_letters(size: usize, letters: Vec<char>) -> Option<Grid> {
        (size.checked_mul(size)? == letters.len()).then_some(Grid { size, letters })
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    #[must_use]
    pub fn get(&self, cell: Cell) -> Option<char> {
        if cell.in_bounds(self.size) {
            self.letters.get(cell.row * self.size + cell.col).copied()
        } else {
            None
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        // chunks(0) panics; an empty grid has no rows anyway
        self.letters.chunks(self.size.max(1))
    }

    /// Letters read along `cells`; out-of-range cells are skipped.
    #[must_use]
    pub fn letters_at(&self, cells: &[Cell]) -> String {
        cells.iter().filter_map(|c| self.get(*c)).collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let line: Vec<String> = row.iter().map(char::to_string).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
