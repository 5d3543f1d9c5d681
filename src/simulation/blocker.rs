//! Random pre-blocking of grid cells.
//!
//! The generator is injected so runs can be reproduced from a seed; the core
//! never draws randomness on its own.

use rand::Rng;

use crate::grid::CityGrid;

pub struct RandomBlocker<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomBlocker<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Block each cell independently with the grid's blocking probability.
    ///
    /// One draw is made per cell in row-major order whatever its state, so the
    /// outcome for a given seed depends only on the grid size. Only free cells
    /// change. Returns how many cells were blocked.
    pub fn block_cells(&mut self, grid: &mut CityGrid) -> usize {
        let p = grid.blocked_coverage_threshold();
        let mut blocked = 0;
        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                if self.rng.gen_bool(p) && grid.block_cell(row, col) {
                    blocked += 1;
                }
            }
        }
        log::info!("Blocked {} of {} cells (p = {})", blocked, grid.rows() * grid.cols(), p);
        blocked
    }
}
