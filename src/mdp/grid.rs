//! Immutable description of a maze: its dimensions and the kind of every cell.
//!
//! Coordinates are `(x, y)` with `x` the column and `y` the row; row 0 is the
//! top of the maze. Internally cells are stored in an `ndarray::Array2`
//! indexed `[[y, x]]`.

use ndarray::Array2;
use std::fmt;
use std::str::FromStr;

use crate::error::{MazeError, Result};

/// Classification of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    Free,
    Wall,
    Goal,
}

impl CellKind {
    /// Decodes the integer form used for maze tables: 0 = free, 1 = wall, 2 = goal.
    pub fn from_code(code: u8) -> Option<CellKind> {
        match code {
            0 => Some(CellKind::Free),
            1 => Some(CellKind::Wall),
            2 => Some(CellKind::Goal),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            CellKind::Free => 0,
            CellKind::Wall => 1,
            CellKind::Goal => 2,
        }
    }
}

/// A rectangular maze with at least one free cell and at least one goal.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cells: Array2<CellKind>,
}

impl Grid {
    /// Builds a grid from rows of cell codes (0 = free, 1 = wall, 2 = goal).
    ///
    /// # Errors
    /// Fails if the table is empty or ragged, contains an unknown code, or lacks
    /// a free cell or a goal cell.
    ///
    /// # Examples
    ///
    /// ```
    /// use maze_policy::mdp::{CellKind, Grid};
    ///
    /// let grid = Grid::new(vec![vec![0, 0, 2], vec![0, 1, 0]]).unwrap();
    /// assert_eq!((grid.width(), grid.height()), (3, 2));
    /// assert_eq!(grid.cell_kind(1, 1), CellKind::Wall);
    /// ```
    pub fn new(rows: Vec<Vec<u8>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(MazeError::EmptyGrid);
        }

        let mut kinds = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(MazeError::RaggedGrid {
                    row: y,
                    expected: width,
                    found: row.len(),
                });
            }
            for (x, &code) in row.iter().enumerate() {
                let kind = CellKind::from_code(code).ok_or(MazeError::UnknownCell { x, y, code })?;
                kinds.push(kind);
            }
        }

        if !kinds.contains(&CellKind::Goal) {
            return Err(MazeError::NoGoal);
        }
        if !kinds.contains(&CellKind::Free) {
            return Err(MazeError::NoFreeCell);
        }

        let cells = Array2::from_shape_vec((height, width), kinds)
            .map_err(|e| MazeError::parse(e.to_string()))?;
        Ok(Self { cells })
    }

    /// Same as [`Grid::new`] for borrowed row slices.
    pub fn from_rows(rows: &[&[u8]]) -> Result<Self> {
        Self::new(rows.iter().map(|row| row.to_vec()).collect())
    }

    /// The 5x5 maze with its goal in the top-right corner.
    pub fn reference() -> Self {
        let rows: &[&[u8]] = &[
            &[0, 1, 0, 1, 2],
            &[0, 1, 0, 1, 0],
            &[0, 0, 0, 1, 0],
            &[0, 1, 0, 1, 0],
            &[0, 1, 0, 0, 0],
        ];
        match Self::from_rows(rows) {
            Ok(grid) => grid,
            Err(e) => unreachable!("reference maze is well formed: {e}"),
        }
    }

    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// `(height, width)`, matching the shape of value and policy tables.
    pub fn shape(&self) -> (usize, usize) {
        (self.height(), self.width())
    }

    /// Kind of the cell at `(x, y)`.
    ///
    /// # Panics
    /// Panics if the coordinates are outside the grid; check with [`Grid::in_bounds`].
    pub fn cell_kind(&self, x: usize, y: usize) -> CellKind {
        self.cells[[y, x]]
    }

    /// Whether signed coordinates fall inside the grid.
    pub fn in_bounds(&self, x: isize, y: isize) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width() && (y as usize) < self.height()
    }

    pub fn is_free(&self, x: usize, y: usize) -> bool {
        self.cell_kind(x, y) == CellKind::Free
    }

    pub fn is_goal(&self, x: usize, y: usize) -> bool {
        self.cell_kind(x, y) == CellKind::Goal
    }

    /// Free cells in row-major order (y outer, x inner).
    pub fn free_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .indexed_iter()
            .filter(|(_, kind)| **kind == CellKind::Free)
            .map(|((y, x), _)| (x, y))
    }

    pub fn goals(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .indexed_iter()
            .filter(|(_, kind)| **kind == CellKind::Goal)
            .map(|((y, x), _)| (x, y))
    }
}

impl FromStr for Grid {
    type Err = MazeError;

    /// Parses whitespace separated cell codes, one row per line. Blank lines are skipped.
    fn from_str(s: &str) -> Result<Self> {
        let mut rows = Vec::new();
        for line in s.lines().map(str::trim).filter(|line| !line.is_empty()) {
            let row = line
                .split_whitespace()
                .map(|token| {
                    token
                        .parse::<u8>()
                        .map_err(|_| MazeError::parse(format!("bad cell code '{token}'")))
                })
                .collect::<Result<Vec<u8>>>()?;
            rows.push(row);
        }
        Self::new(rows)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.rows() {
            let line: Vec<String> = row.iter().map(|kind| kind.code().to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
