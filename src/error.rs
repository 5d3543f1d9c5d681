//! Error type shared by the grid, optimizer, and path finder.

use crate::grid::Cell;

/// Errors raised by the simulation core.
///
/// Every variant is detected by an upfront parameter check; once an operation
/// passes its checks it runs to completion without further failure points.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// Grid rows and columns must both be positive.
    InvalidDimensions { rows: usize, cols: usize },
    /// Blocking probability must be a finite value in `[0, 1]`.
    InvalidThreshold(f64),
    /// Optimization budget must be non-negative.
    NegativeBudget(i64),
    /// A path endpoint lies outside the grid.
    OutOfBounds { cell: Cell, rows: usize, cols: usize },
    /// Path search requested between a cell and itself.
    SameEndpoints(Cell),
}

impl std::fmt::Display for SimulationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulationError::InvalidDimensions { rows, cols } => {
                write!(f, "Invalid grid dimensions {}x{}, both must be positive", rows, cols)
            }
            SimulationError::InvalidThreshold(p) => {
                write!(f, "Invalid blocked coverage threshold {}, must be within 0-1", p)
            }
            SimulationError::NegativeBudget(budget) => {
                write!(f, "Invalid budget {}, must be non-negative", budget)
            }
            SimulationError::OutOfBounds { cell, rows, cols } => {
                write!(f, "Cell {} is outside the {}x{} grid", cell, rows, cols)
            }
            SimulationError::SameEndpoints(cell) => {
                write!(f, "Path start and end are the same cell {}", cell)
            }
        }
    }
}

impl std::error::Error for SimulationError {}
