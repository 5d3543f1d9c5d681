//! Cell-state matrix and tower bookkeeping.

use crate::error::SimulationError;

use super::types::{Cell, CellState, Tower};

/// Default probability used by the random blocker when none is configured.
pub const DEFAULT_BLOCKED_COVERAGE_THRESHOLD: f64 = 0.3;

/// A fixed-size grid of cells plus the towers placed on it.
///
/// Dimensions are immutable after construction. Coverage marks and the tower
/// list are not kept in sync: resetting the towers leaves covered cells covered.
#[derive(Debug, Clone)]
pub struct CityGrid {
    rows: usize,
    cols: usize,
    cells: Vec<Vec<CellState>>,
    towers: Vec<Tower>,
    blocked_coverage_threshold: f64,
}

impl CityGrid {
    /// Create an all-free grid.
    ///
    /// # Errors
    ///
    /// `InvalidDimensions` when either dimension is zero, `InvalidThreshold`
    /// when the blocking probability is not a finite value in `[0, 1]`.
    pub fn new(rows: usize, cols: usize, blocked_coverage_threshold: f64) -> Result<Self, SimulationError> {
        if rows == 0 || cols == 0 {
            return Err(SimulationError::InvalidDimensions { rows, cols });
        }
        if !blocked_coverage_threshold.is_finite() || !(0.0..=1.0).contains(&blocked_coverage_threshold) {
            return Err(SimulationError::InvalidThreshold(blocked_coverage_threshold));
        }
        Ok(Self {
            rows,
            cols,
            cells: vec![vec![CellState::Free; cols]; rows],
            towers: Vec::new(),
            blocked_coverage_threshold,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn blocked_coverage_threshold(&self) -> f64 {
        self.blocked_coverage_threshold
    }

    /// Towers in placement order.
    pub fn towers(&self) -> &[Tower] {
        &self.towers
    }

    /// Row slices of the state matrix, top row first.
    pub fn cells(&self) -> impl Iterator<Item = &[CellState]> {
        self.cells.iter().map(Vec::as_slice)
    }

    /// State at `(row, col)`, or `None` outside the grid.
    pub fn state_at(&self, row: usize, col: usize) -> Option<CellState> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// Mark every cell within Chebyshev distance `range` of `(row, col)` as
    /// covered and record the tower.
    ///
    /// The square is clipped to the grid; a centre outside the grid only covers
    /// whatever part of its square overlaps. Blocked cells are overwritten.
    pub fn place_tower(&mut self, row: usize, col: usize, range: usize, cost: u32) {
        let row_end = row.saturating_add(range).saturating_add(1).min(self.rows);
        let col_end = col.saturating_add(range).saturating_add(1).min(self.cols);
        for r in row.saturating_sub(range)..row_end {
            for c in col.saturating_sub(range)..col_end {
                self.cells[r][c] = CellState::Covered;
            }
        }
        self.towers.push(Tower {
            position: Cell::new(row, col),
            range,
            cost,
        });
    }

    /// Block a free cell. Covered and already blocked cells are left alone.
    /// Returns whether the cell changed.
    pub fn block_cell(&mut self, row: usize, col: usize) -> bool {
        match self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            Some(state) if *state == CellState::Free => {
                *state = CellState::Blocked;
                true
            }
            _ => false,
        }
    }

    /// Drop all tower records. Coverage marks stay as they are.
    pub fn clear_towers(&mut self) {
        self.towers.clear();
    }

    /// All free cells in row-major order.
    pub fn free_cells(&self) -> Vec<Cell> {
        self.cells_in_state(CellState::Free)
    }

    pub fn cells_in_state(&self, state: CellState) -> Vec<Cell> {
        let mut out = Vec::new();
        for (r, row) in self.cells.iter().enumerate() {
            for (c, s) in row.iter().enumerate() {
                if *s == state {
                    out.push(Cell::new(r, c));
                }
            }
        }
        out
    }

    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().flatten().filter(|s| **s == state).count()
    }

    /// In-bounds Moore neighbours of `cell`, row-major, excluding `cell` itself.
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        let rows = cell.row.saturating_sub(1)..cell.row.saturating_add(2).min(self.rows);
        rows.flat_map(move |r| {
            let cols = cell.col.saturating_sub(1)..cell.col.saturating_add(2).min(self.cols);
            cols.map(move |c| Cell::new(r, c))
        })
        .filter(move |n| *n != cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: usize, cols: usize) -> CityGrid {
        CityGrid::new(rows, cols, DEFAULT_BLOCKED_COVERAGE_THRESHOLD).unwrap()
    }

    #[test]
    fn rejects_empty_dimensions() {
        assert_eq!(
            CityGrid::new(0, 3, 0.3).unwrap_err(),
            SimulationError::InvalidDimensions { rows: 0, cols: 3 }
        );
        assert!(CityGrid::new(3, 0, 0.3).is_err());
    }

    #[test]
    fn rejects_bad_threshold() {
        assert!(matches!(CityGrid::new(2, 2, 1.5), Err(SimulationError::InvalidThreshold(_))));
        assert!(matches!(CityGrid::new(2, 2, f64::NAN), Err(SimulationError::InvalidThreshold(_))));
        assert!(CityGrid::new(2, 2, 0.0).is_ok());
        assert!(CityGrid::new(2, 2, 1.0).is_ok());
    }

    #[test]
    fn new_grid_is_all_free() {
        let g = grid(3, 4);
        assert_eq!(g.count(CellState::Free), 12);
        assert!(g.towers().is_empty());
        assert_eq!(g.state_at(2, 3), Some(CellState::Free));
        assert_eq!(g.state_at(3, 0), None);
    }

    #[test]
    fn place_tower_covers_full_square_and_overwrites_blocked() {
        let mut g = grid(7, 7);
        g.block_cell(2, 2);
        g.block_cell(0, 0);
        g.place_tower(3, 3, 1, 10);

        for r in 0..7 {
            for c in 0..7 {
                let inside = (2..=4).contains(&r) && (2..=4).contains(&c);
                let expected = if inside {
                    CellState::Covered
                } else if (r, c) == (0, 0) {
                    CellState::Blocked
                } else {
                    CellState::Free
                };
                assert_eq!(g.state_at(r, c), Some(expected), "cell ({}, {})", r, c);
            }
        }
        assert_eq!(g.count(CellState::Covered), 9);
        assert_eq!(
            g.towers(),
            &[Tower {
                position: Cell::new(3, 3),
                range: 1,
                cost: 10
            }]
        );
    }

    #[test]
    fn place_tower_clips_at_edges() {
        let mut g = grid(5, 5);
        g.place_tower(0, 4, 2, 20);
        // rows 0..=2, cols 2..=4
        assert_eq!(g.count(CellState::Covered), 9);
        assert_eq!(g.state_at(2, 2), Some(CellState::Covered));
        assert_eq!(g.state_at(3, 4), Some(CellState::Free));
    }

    #[test]
    fn place_tower_outside_grid_is_clipped_silently() {
        let mut g = grid(3, 3);
        g.place_tower(3, 1, 1, 10);
        assert_eq!(g.cells_in_state(CellState::Covered), vec![Cell::new(2, 0), Cell::new(2, 1), Cell::new(2, 2)]);

        g.place_tower(usize::MAX, usize::MAX, usize::MAX, 10);
        assert_eq!(g.count(CellState::Covered), 9);
        assert_eq!(g.towers().len(), 2);
    }

    #[test]
    fn clearing_towers_keeps_coverage() {
        let mut g = grid(3, 3);
        g.place_tower(1, 1, 0, 10);
        g.clear_towers();
        assert!(g.towers().is_empty());
        assert_eq!(g.state_at(1, 1), Some(CellState::Covered));
    }

    #[test]
    fn block_cell_never_uncovers() {
        let mut g = grid(2, 2);
        g.place_tower(0, 0, 0, 10);
        assert!(!g.block_cell(0, 0));
        assert!(g.block_cell(1, 1));
        assert!(!g.block_cell(1, 1));
        assert!(!g.block_cell(5, 5));
        assert_eq!(g.state_at(0, 0), Some(CellState::Covered));
    }

    #[test]
    fn neighbors_are_moore_and_clipped() {
        let g = grid(3, 3);
        let centre: Vec<_> = g.neighbors(Cell::new(1, 1)).collect();
        assert_eq!(centre.len(), 8);
        assert!(!centre.contains(&Cell::new(1, 1)));

        let corner: Vec<_> = g.neighbors(Cell::new(0, 0)).collect();
        assert_eq!(corner, vec![Cell::new(0, 1), Cell::new(1, 0), Cell::new(1, 1)]);
    }

    #[test]
    fn free_cells_are_row_major() {
        let mut g = grid(2, 2);
        g.block_cell(0, 1);
        assert_eq!(g.free_cells(), vec![Cell::new(0, 0), Cell::new(1, 0), Cell::new(1, 1)]);
    }
}
