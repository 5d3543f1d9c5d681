//! Scenario loading, parsing, and validation.
//!
//! A scenario is a TOML file describing one run: grid size, blocking
//! probability, budget, an optional seed, an optional route to measure, and
//! an optional replacement tower catalog.

use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::grid::{Cell, DEFAULT_BLOCKED_COVERAGE_THRESHOLD, TowerType};

/// Error type for scenario loading failures.
#[derive(Debug)]
pub enum ScenarioLoadError {
    FileReadError(String),
    ParseError(String),
    ValidationError(String),
}

impl std::fmt::Display for ScenarioLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScenarioLoadError::FileReadError(msg) => write!(f, "Failed to read file: {}", msg),
            ScenarioLoadError::ParseError(msg) => write!(f, "Failed to parse TOML: {}", msg),
            ScenarioLoadError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for ScenarioLoadError {}

/// Path query endpoints.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct RouteConfig {
    pub start: Cell,
    pub end: Cell,
}

/// One simulation run.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ScenarioConfig {
    pub rows: usize,
    pub cols: usize,
    /// Per-cell blocking probability, used only when `randomly_block` is set.
    #[serde(default = "default_threshold")]
    pub blocked_coverage_threshold: f64,
    pub budget: i64,
    #[serde(default)]
    pub randomly_block: bool,
    /// Seed for the blocker; entropy is used when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub route: Option<RouteConfig>,
    /// Replacement catalog, tried in the given order.
    #[serde(default)]
    pub tower_types: Option<Vec<TowerType>>,
}

fn default_threshold() -> f64 {
    DEFAULT_BLOCKED_COVERAGE_THRESHOLD
}

impl ScenarioConfig {
    /// Load and validate a scenario file.
    pub fn load(path: &Path) -> Result<Self, ScenarioLoadError> {
        let data = fs::read_to_string(path)
            .with_context(|| path.display().to_string())
            .map_err(|e| ScenarioLoadError::FileReadError(format!("{:#}", e)))?;
        let scenario = Self::from_toml_str(&data)?;
        log::info!("Loaded scenario {}: {}x{} grid, budget {}", path.display(), scenario.rows, scenario.cols, scenario.budget);
        Ok(scenario)
    }

    /// Parse and validate scenario text.
    pub fn from_toml_str(data: &str) -> Result<Self, ScenarioLoadError> {
        let scenario: ScenarioConfig = toml::from_str(data)
            .context("Invalid TOML format")
            .map_err(|e| ScenarioLoadError::ParseError(format!("{:#}", e)))?;
        validate_scenario(&scenario).map_err(ScenarioLoadError::ValidationError)?;
        Ok(scenario)
    }
}

/// Validate a scenario before any grid is built.
///
/// # Returns
///
/// `Ok(())` if validation passes, `Err(String)` with error description otherwise.
pub fn validate_scenario(scenario: &ScenarioConfig) -> Result<(), String> {
    const MAX_CELLS: usize = 1_000_000;

    if scenario.rows == 0 || scenario.cols == 0 {
        return Err(format!("Grid dimensions {}x{} must both be positive", scenario.rows, scenario.cols));
    }
    match scenario.rows.checked_mul(scenario.cols) {
        Some(cells) if cells <= MAX_CELLS => {}
        _ => {
            return Err(format!(
                "Grid {}x{} exceeds maximum of {} cells",
                scenario.rows, scenario.cols, MAX_CELLS
            ));
        }
    }

    let p = scenario.blocked_coverage_threshold;
    if !p.is_finite() || !(0.0..=1.0).contains(&p) {
        return Err(format!("Invalid blocked-coverage-threshold {}, must be within 0-1", p));
    }

    if scenario.budget < 0 {
        return Err(format!("Invalid budget {}, must be non-negative", scenario.budget));
    }

    if let Some(route) = &scenario.route {
        for (name, cell) in [("start", route.start), ("end", route.end)] {
            if cell.row >= scenario.rows || cell.col >= scenario.cols {
                return Err(format!(
                    "Route {} {} is outside the {}x{} grid",
                    name, cell, scenario.rows, scenario.cols
                ));
            }
        }
        if route.start == route.end {
            return Err(format!("Route start and end are the same cell {}", route.start));
        }
    }

    if let Some(types) = &scenario.tower_types {
        if types.is_empty() {
            return Err("tower-types must contain at least one entry".to_string());
        }
        for (idx, t) in types.iter().enumerate() {
            if t.cost == 0 {
                return Err(format!("Tower type {} has zero cost", idx));
            }
        }
        if types.windows(2).any(|w| w[0].cost >= w[1].cost) {
            return Err("tower-types must be strictly ascending by cost".to_string());
        }
    }

    Ok(())
}
