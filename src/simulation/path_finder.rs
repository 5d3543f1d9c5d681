//! Hop metric between two cells over the covered-cell graph.
//!
//! Cells are connected to their eight in-bounds neighbours when the neighbour
//! is covered. The search is Dijkstra-shaped: a min-priority frontier plus a
//! visited set of finalized cells. The frontier key, however, is the
//! reciprocal of the accumulated hop count, so the smallest key belongs to the
//! longest walk so far and deeper walks are expanded before shallower ones.
//! The returned metric is the reciprocal of the matching key, i.e. the hop
//! count of whichever walk reached `end` first, not necessarily the shortest.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use crate::error::SimulationError;
use crate::grid::{Cell, CellState, CityGrid};

/// Result of a path search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathMetric {
    /// End reached; the value is the hop count of the walk that reached it.
    Reached(f64),
    /// No chain of covered cells joins the endpoints.
    NoPath,
}

impl PathMetric {
    /// Numeric form, with `f64::INFINITY` standing for `NoPath`.
    pub fn value(self) -> f64 {
        match self {
            PathMetric::Reached(hops) => hops,
            PathMetric::NoPath => f64::INFINITY,
        }
    }

    /// `None` for `NoPath`, used where infinity cannot be represented.
    pub fn hops(self) -> Option<f64> {
        match self {
            PathMetric::Reached(hops) => Some(hops),
            PathMetric::NoPath => None,
        }
    }
}

/// Frontier entry ordered so that `BinaryHeap` pops the smallest key first.
#[derive(Clone, Copy, Debug)]
struct FrontierEntry {
    key: f64,
    node: Cell,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.node == other.node
    }
}

impl Eq for FrontierEntry {}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap; equal keys pop the row-major smaller cell
        other
            .key
            .partial_cmp(&self.key)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Read-only search over a borrowed grid.
pub struct ReliabilityPathFinder<'a> {
    grid: &'a CityGrid,
}

impl<'a> ReliabilityPathFinder<'a> {
    pub fn new(grid: &'a CityGrid) -> Self {
        Self { grid }
    }

    /// Search from `start` to `end` through covered cells.
    ///
    /// # Errors
    ///
    /// `OutOfBounds` if either endpoint lies outside the grid, `SameEndpoints`
    /// if `start == end` (the metric would be the reciprocal of zero).
    ///
    /// An endpoint that is not covered is not an error; the result is
    /// `PathMetric::NoPath`.
    pub fn find_path_metric(&self, start: Cell, end: Cell) -> Result<PathMetric, SimulationError> {
        for cell in [start, end] {
            if !self.grid.contains(cell) {
                return Err(SimulationError::OutOfBounds {
                    cell,
                    rows: self.grid.rows(),
                    cols: self.grid.cols(),
                });
            }
        }
        if start == end {
            return Err(SimulationError::SameEndpoints(start));
        }
        if !self.is_covered(start) || !self.is_covered(end) {
            log::debug!("Endpoint not covered, no path from {} to {}", start, end);
            return Ok(PathMetric::NoPath);
        }

        let mut frontier = BinaryHeap::new();
        frontier.push(FrontierEntry { key: 0.0, node: start });
        let mut visited: HashSet<Cell> = HashSet::new();

        while let Some(FrontierEntry { key, node }) = frontier.pop() {
            if node == end {
                if key == 0.0 {
                    return Err(SimulationError::SameEndpoints(end));
                }
                let hops = key.recip();
                log::debug!("Reached {} from {} after {} hops ({} cells finalized)", end, start, hops, visited.len());
                return Ok(PathMetric::Reached(hops));
            }

            if !visited.insert(node) {
                continue;
            }

            // The seed key 0 stands for zero hops
            let hops = if key == 0.0 { 0.0 } else { key.recip() };
            let neighbor_key = (hops + 1.0).recip();
            for neighbor in self.grid.neighbors(node).filter(|n| self.is_covered(*n)) {
                frontier.push(FrontierEntry {
                    key: neighbor_key,
                    node: neighbor,
                });
            }
        }

        log::debug!("Frontier exhausted, no path from {} to {} ({} cells finalized)", start, end, visited.len());
        Ok(PathMetric::NoPath)
    }

    fn is_covered(&self, cell: Cell) -> bool {
        self.grid.state_at(cell.row, cell.col) == Some(CellState::Covered)
    }
}
