//! City grid model.
//!
//! Owns the cell-state matrix and the list of placed towers. The optimizer and
//! the path finder borrow a grid; neither keeps its own copy.
//!
//! ## Module Organization
//!
//! - `types`: Cell state, coordinates, towers, and the tower catalog
//! - `city_grid`: The grid itself with its bounds-clipped mutators

pub mod city_grid;
pub mod types;

pub use city_grid::{CityGrid, DEFAULT_BLOCKED_COVERAGE_THRESHOLD};
pub use types::{Cell, CellState, TOWER_CATALOG, Tower, TowerType};
