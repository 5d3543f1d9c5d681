//! JSON run report.

use serde::Serialize;

use crate::grid::{Cell, CellState, CityGrid, Tower};
use crate::simulation::{PathMetric, PlacementSummary};

use super::text::render_text;

/// Path search request and outcome. `hops` is `null` when unreachable.
#[derive(Debug, Clone, Serialize)]
pub struct RouteReport {
    pub start: Cell,
    pub end: Cell,
    pub hops: Option<f64>,
}

impl RouteReport {
    pub fn new(start: Cell, end: Cell, metric: PathMetric) -> Self {
        Self {
            start,
            end,
            hops: metric.hops(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SimulationReport<'a> {
    pub rows: usize,
    pub cols: usize,
    pub budget: i64,
    pub blocked_cells: usize,
    pub covered_cells: usize,
    pub placement: PlacementSummary,
    pub towers: &'a [Tower],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<RouteReport>,
    /// Text dump rows, same format as the console output.
    pub grid: Vec<String>,
}

impl<'a> SimulationReport<'a> {
    pub fn new(grid: &'a CityGrid, budget: i64, placement: PlacementSummary, route: Option<RouteReport>) -> Self {
        Self {
            rows: grid.rows(),
            cols: grid.cols(),
            budget,
            blocked_cells: grid.count(CellState::Blocked),
            covered_cells: grid.count(CellState::Covered),
            placement,
            towers: grid.towers(),
            route,
            grid: render_text(grid).lines().map(str::to_string).collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
