//! Budget-bounded greedy tower placement.
//!
//! Candidates are the free cells in row-major order, consumed from the back
//! (so the bottom-right free cell is visited first). For each candidate the
//! first catalog entry whose cost fits the remaining budget is placed. A
//! candidate with no affordable entry is dropped without a second attempt.
//!
//! With the default ascending catalog the cheapest tower always wins while it
//! is affordable, so ranges 2 and 3 are never chosen. That selection rule is
//! kept as is.

use serde::Serialize;

use crate::error::SimulationError;
use crate::grid::{CityGrid, TOWER_CATALOG, TowerType};

/// Outcome of one optimization pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlacementSummary {
    pub towers_placed: usize,
    pub spent: i64,
    pub remaining_budget: i64,
    /// Candidates popped, with or without a tower.
    pub cells_consumed: usize,
}

/// Greedy placer working on a borrowed grid.
pub struct CoverageOptimizer<'a> {
    grid: &'a mut CityGrid,
    catalog: &'a [TowerType],
}

impl<'a> CoverageOptimizer<'a> {
    pub fn new(grid: &'a mut CityGrid) -> Self {
        Self::with_catalog(grid, &TOWER_CATALOG)
    }

    /// Use a custom catalog. Entries are tried in the given order.
    pub fn with_catalog(grid: &'a mut CityGrid, catalog: &'a [TowerType]) -> Self {
        Self { grid, catalog }
    }

    /// Place towers on free cells until the budget or the candidates run out.
    ///
    /// Previously recorded towers are discarded first; cells they covered stay
    /// covered and are therefore not candidates again.
    ///
    /// # Errors
    ///
    /// `NegativeBudget` if `budget < 0`. The grid is untouched in that case.
    pub fn optimize(&mut self, budget: i64) -> Result<PlacementSummary, SimulationError> {
        if budget < 0 {
            return Err(SimulationError::NegativeBudget(budget));
        }

        let mut candidates = self.grid.free_cells();
        self.grid.clear_towers();
        log::debug!("Optimizing placement over {} free cells with budget {}", candidates.len(), budget);

        let mut remaining = budget;
        let mut towers_placed = 0;
        let mut cells_consumed = 0;

        while remaining > 0 {
            let Some(cell) = candidates.pop() else {
                break;
            };
            cells_consumed += 1;

            match self.catalog.iter().find(|t| i64::from(t.cost) <= remaining) {
                Some(tower_type) => {
                    self.grid.place_tower(cell.row, cell.col, tower_type.range, tower_type.cost);
                    remaining -= i64::from(tower_type.cost);
                    towers_placed += 1;
                    log::debug!(
                        "Placed range {} tower at {} for {}, remaining budget {}",
                        tower_type.range,
                        cell,
                        tower_type.cost,
                        remaining
                    );
                }
                None => log::trace!("No affordable tower for {} with budget {}", cell, remaining),
            }
        }

        let summary = PlacementSummary {
            towers_placed,
            spent: budget - remaining,
            remaining_budget: remaining,
            cells_consumed,
        };
        log::info!(
            "Placed {} towers, spent {} of {} (remaining {})",
            summary.towers_placed,
            summary.spent,
            budget,
            summary.remaining_budget
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Cell, CellState, Tower};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn grid(rows: usize, cols: usize) -> CityGrid {
        CityGrid::new(rows, cols, 0.3).unwrap()
    }

    fn tower(row: usize, col: usize) -> Tower {
        Tower {
            position: Cell::new(row, col),
            range: 1,
            cost: 10,
        }
    }

    #[test]
    fn five_by_five_budget_forty_places_four_cheap_towers_from_the_back() {
        let mut g = grid(5, 5);
        let summary = CoverageOptimizer::new(&mut g).optimize(40).unwrap();

        assert_eq!(g.towers(), &[tower(4, 4), tower(4, 3), tower(4, 2), tower(4, 1)]);
        assert_eq!(
            summary,
            PlacementSummary {
                towers_placed: 4,
                spent: 40,
                remaining_budget: 0,
                cells_consumed: 4,
            }
        );
        // rows 3..=4 fully covered by the four range-1 towers
        assert_eq!(g.count(CellState::Covered), 10);
        assert_eq!(g.state_at(2, 4), Some(CellState::Free));
    }

    #[test]
    fn zero_budget_changes_nothing() {
        let mut g = grid(4, 4);
        g.block_cell(1, 1);
        let before = g.clone();
        let summary = CoverageOptimizer::new(&mut g).optimize(0).unwrap();

        assert_eq!(summary.towers_placed, 0);
        assert_eq!(summary.cells_consumed, 0);
        assert!(g.towers().is_empty());
        assert!(g.cells().eq(before.cells()));
    }

    #[test]
    fn negative_budget_is_rejected_before_mutation() {
        let mut g = grid(3, 3);
        g.place_tower(0, 0, 0, 10);
        let err = CoverageOptimizer::new(&mut g).optimize(-1).unwrap_err();
        assert_eq!(err, SimulationError::NegativeBudget(-1));
        // tower list was not reset
        assert_eq!(g.towers().len(), 1);
    }

    #[test]
    fn unaffordable_budget_consumes_every_candidate() {
        let mut g = grid(2, 3);
        let summary = CoverageOptimizer::new(&mut g).optimize(5).unwrap();
        assert_eq!(summary.towers_placed, 0);
        assert_eq!(summary.cells_consumed, 6);
        assert_eq!(summary.remaining_budget, 5);
        assert_eq!(g.count(CellState::Free), 6);
    }

    #[test]
    fn leftover_budget_below_cheapest_tower_stops_placing() {
        let mut g = grid(3, 3);
        let summary = CoverageOptimizer::new(&mut g).optimize(25).unwrap();
        assert_eq!(g.towers(), &[tower(2, 2), tower(2, 1)]);
        assert_eq!(summary.spent, 20);
        assert_eq!(summary.remaining_budget, 5);
        assert_eq!(summary.cells_consumed, 9);
    }

    #[test]
    fn larger_towers_are_never_chosen_with_default_catalog() {
        let mut g = grid(6, 6);
        CoverageOptimizer::new(&mut g).optimize(300).unwrap();
        assert!(g.towers().iter().all(|t| t.range == 1 && t.cost == 10));
    }

    #[test]
    fn blocked_cells_are_skipped_as_candidates() {
        let mut g = grid(2, 2);
        g.block_cell(1, 1);
        CoverageOptimizer::new(&mut g).optimize(10).unwrap();
        assert_eq!(g.towers(), &[tower(1, 0)]);
        // the tower square overwrites the blocked cell
        assert_eq!(g.state_at(1, 1), Some(CellState::Covered));
    }

    #[test]
    fn custom_catalog_is_tried_in_order() {
        let catalog = [TowerType { range: 2, cost: 20 }, TowerType { range: 0, cost: 5 }];
        let mut g = grid(5, 5);
        let summary = CoverageOptimizer::with_catalog(&mut g, &catalog).optimize(25).unwrap();
        assert_eq!(
            g.towers(),
            &[
                Tower {
                    position: Cell::new(4, 4),
                    range: 2,
                    cost: 20
                },
                Tower {
                    position: Cell::new(4, 3),
                    range: 0,
                    cost: 5
                },
            ]
        );
        assert_eq!(summary.remaining_budget, 0);
    }

    #[test]
    fn second_pass_resets_towers_but_keeps_coverage() {
        let mut g = grid(5, 5);
        CoverageOptimizer::new(&mut g).optimize(40).unwrap();
        let covered = g.count(CellState::Covered);

        CoverageOptimizer::new(&mut g).optimize(10).unwrap();
        // last free cell is now (2, 4)
        assert_eq!(g.towers(), &[tower(2, 4)]);
        assert!(g.count(CellState::Covered) >= covered);
        assert_eq!(g.state_at(4, 1), Some(CellState::Covered));
    }

    #[test]
    fn same_layout_and_budget_give_identical_results() {
        let mut a = grid(6, 7);
        for (r, c) in [(0, 0), (2, 5), (5, 6), (3, 3)] {
            a.block_cell(r, c);
        }
        let mut b = a.clone();

        CoverageOptimizer::new(&mut a).optimize(70).unwrap();
        CoverageOptimizer::new(&mut b).optimize(70).unwrap();
        assert_eq!(a.towers(), b.towers());
        assert!(a.cells().eq(b.cells()));
    }

    #[test]
    fn spend_never_exceeds_budget() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let rows = rng.gen_range(1..8);
            let cols = rng.gen_range(1..8);
            let mut g = grid(rows, cols);
            for r in 0..rows {
                for c in 0..cols {
                    if rng.gen_bool(0.3) {
                        g.block_cell(r, c);
                    }
                }
            }
            let free = g.free_cells().len();
            let budget = rng.gen_range(0..200);

            let summary = CoverageOptimizer::new(&mut g).optimize(budget).unwrap();
            let cost: i64 = g.towers().iter().map(|t| i64::from(t.cost)).sum();
            assert!(cost <= budget);
            assert_eq!(cost, summary.spent);
            assert!(g.towers().len() <= free);
        }
    }
}
