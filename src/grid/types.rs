//! Type definitions for the city grid.
//!
//! Contains the cell state enum, grid coordinates, tower records, and the
//! fixed tower catalog consumed by the optimizer.

use serde::{Deserialize, Serialize};

/// State of a single grid position. Exactly one state per cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CellState {
    #[default]
    Free,
    Blocked,
    /// Within range of at least one placed tower. Never reverts.
    Covered,
}

impl CellState {
    /// Numeric code used by the text dump (0 free, 1 blocked, 2 covered).
    pub fn code(self) -> u8 {
        match self {
            CellState::Free => 0,
            CellState::Blocked => 1,
            CellState::Covered => 2,
        }
    }
}

/// Grid coordinate. Ordering is row-major: row first, then column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "[usize; 2]", into = "[usize; 2]")]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<[usize; 2]> for Cell {
    fn from([row, col]: [usize; 2]) -> Self {
        Self { row, col }
    }
}

impl From<Cell> for [usize; 2] {
    fn from(c: Cell) -> Self {
        [c.row, c.col]
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A placed tower. Created only through `CityGrid::place_tower`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tower {
    pub position: Cell,
    /// Chebyshev radius of the covered square.
    pub range: usize,
    pub cost: u32,
}

/// One purchasable tower option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TowerType {
    pub range: usize,
    pub cost: u32,
}

/// Default tower options in ascending cost order.
///
/// The optimizer takes the first affordable entry, so with this ordering only
/// the range-1 tower is ever bought while the budget covers it.
pub const TOWER_CATALOG: [TowerType; 3] = [
    TowerType { range: 1, cost: 10 },
    TowerType { range: 2, cost: 20 },
    TowerType { range: 3, cost: 30 },
];
