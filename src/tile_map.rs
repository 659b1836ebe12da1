//! The immutable static grid.

use crate::{EnvError, Position, Result, Tile};

/// Static grid of tile kinds plus the goal position.
///
/// Cells under the start and goal are stored as `Air`. Trap positions are
/// stored as [`Tile::TrapSlot`] and never change; their current solidity is a
/// property of the state, not of the map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileMap {
    rows: usize,
    cols: usize,
    tiles: Vec<Tile>,
    goal: Position,
}

impl TileMap {
    /// Builds a map from row-major rows.
    ///
    /// # Errors
    ///
    /// Returns `EnvError::InvalidWorld` if the grid is empty, rows have
    /// differing lengths, or the goal lies outside the grid.
    pub fn new(grid: Vec<Vec<Tile>>, goal: Position) -> Result<Self> {
        let rows = grid.len();
        let cols = grid.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 {
            return Err(EnvError::InvalidWorld("grid is empty".to_string()));
        }
        if let Some(row) = grid.iter().position(|row| row.len() != cols) {
            return Err(EnvError::InvalidWorld(format!(
                "row {} has length {}, expected {}",
                row,
                grid[row].len(),
                cols
            )));
        }
        if goal.row >= rows || goal.col >= cols {
            return Err(EnvError::InvalidWorld(format!(
                "goal {} lies outside the {}x{} grid",
                goal, rows, cols
            )));
        }

        Ok(Self {
            rows,
            cols,
            tiles: grid.into_iter().flatten().collect(),
            goal,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn goal(&self) -> Position {
        self.goal
    }

    pub fn contains(&self, position: Position) -> bool {
        position.row < self.rows && position.col < self.cols
    }

    /// The stored tile at `position`, or `None` outside the grid.
    pub fn get(&self, position: Position) -> Option<Tile> {
        if self.contains(position) {
            Some(self.tiles[position.row * self.cols + position.col])
        } else {
            None
        }
    }

    /// Iterates over one row of stored tiles.
    pub fn row(&self, row: usize) -> impl Iterator<Item = Tile> + '_ {
        let start = row.min(self.rows) * self.cols;
        let end = (row + 1).min(self.rows) * self.cols;
        self.tiles[start..end].iter().copied()
    }
}
