use anyhow::{Context, Result, anyhow};
use clap::Parser;
use env_logger::Builder;
use log::{LevelFilter, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs;
use std::path::PathBuf;

use crate::common::ScenarioConfig;
use crate::common::scenario::{RouteConfig, validate_scenario};
use crate::grid::{Cell, CityGrid, DEFAULT_BLOCKED_COVERAGE_THRESHOLD};
use crate::render::{DEFAULT_CELL_SIZE, MAX_CELL_SIZE, RouteReport, SimulationReport, render_png, render_text};
use crate::simulation::{CoverageOptimizer, PathMetric, RandomBlocker, ReliabilityPathFinder};

mod common;
mod error;
mod grid;
mod render;
mod simulation;

#[derive(Parser, Debug)]
#[command(
    name = "tower-coverage-simulator",
    about = "Place coverage towers on a city grid under a budget and measure hop connectivity",
    version
)]
struct Cli {
    /// Scenario TOML file (replaces the grid, budget, and route options)
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    /// Grid rows
    #[arg(long, default_value_t = 5)]
    rows: usize,

    /// Grid columns
    #[arg(long, default_value_t = 5)]
    cols: usize,

    /// Tower budget
    #[arg(short, long, default_value_t = 40, allow_negative_numbers = true)]
    budget: i64,

    /// Per-cell blocking probability (0.0-1.0)
    #[arg(long, default_value_t = DEFAULT_BLOCKED_COVERAGE_THRESHOLD)]
    threshold: f64,

    /// Randomly block cells before placing towers
    #[arg(long)]
    randomly_block: bool,

    /// Seed for random blocking
    #[arg(long)]
    seed: Option<u64>,

    /// Route start as "row,col"
    #[arg(long, value_parser = parse_cell, requires = "end")]
    start: Option<Cell>,

    /// Route end as "row,col"
    #[arg(long, value_parser = parse_cell, requires = "start")]
    end: Option<Cell>,

    /// Write a PNG rendering of the final grid
    #[arg(long)]
    png: Option<PathBuf>,

    /// Pixels per cell in the PNG rendering
    #[arg(long, default_value_t = DEFAULT_CELL_SIZE, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_CELL_SIZE)))]
    cell_size: u32,

    /// Write a JSON report of the run
    #[arg(long)]
    json: Option<PathBuf>,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    /// Scenario from file, or assembled from the inline options.
    fn scenario(&self) -> Result<ScenarioConfig> {
        if let Some(path) = &self.scenario {
            return Ok(ScenarioConfig::load(path)?);
        }
        let scenario = ScenarioConfig {
            rows: self.rows,
            cols: self.cols,
            blocked_coverage_threshold: self.threshold,
            budget: self.budget,
            randomly_block: self.randomly_block,
            seed: self.seed,
            route: self.start.zip(self.end).map(|(start, end)| RouteConfig { start, end }),
            tower_types: None,
        };
        validate_scenario(&scenario).map_err(|e| anyhow!("Invalid options: {}", e))?;
        Ok(scenario)
    }
}

fn parse_cell(s: &str) -> Result<Cell, String> {
    let (row, col) = s.split_once(',').ok_or_else(|| format!("expected \"row,col\", got {:?}", s))?;
    let row = row.trim().parse::<usize>().map_err(|e| format!("invalid row {:?}: {}", row, e))?;
    let col = col.trim().parse::<usize>().map_err(|e| format!("invalid column {:?}: {}", col, e))?;
    Ok(Cell::new(row, col))
}

fn run(cli: &Cli) -> Result<()> {
    let scenario = cli.scenario()?;
    let mut grid = CityGrid::new(scenario.rows, scenario.cols, scenario.blocked_coverage_threshold)?;

    if scenario.randomly_block {
        let rng = match scenario.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        RandomBlocker::new(rng).block_cells(&mut grid);
    }

    println!("{}", render_text(&grid));
    println!("\nOptimizing tower placement with budget {}\n", scenario.budget);

    let placement = match &scenario.tower_types {
        Some(catalog) => CoverageOptimizer::with_catalog(&mut grid, catalog).optimize(scenario.budget)?,
        None => CoverageOptimizer::new(&mut grid).optimize(scenario.budget)?,
    };
    println!("{}", render_text(&grid));

    let route = match scenario.route {
        Some(RouteConfig { start, end }) => {
            let metric = ReliabilityPathFinder::new(&grid).find_path_metric(start, end)?;
            match metric {
                PathMetric::Reached(hops) => println!("\nHop metric {} -> {}: {}", start, end, hops),
                PathMetric::NoPath => println!("\nNo covered path {} -> {}", start, end),
            }
            info!("Path metric {} -> {}: {}", start, end, metric.value());
            Some(RouteReport::new(start, end, metric))
        }
        None => None,
    };

    if let Some(path) = &cli.png {
        render_png(&grid, cli.cell_size, path).with_context(|| format!("Failed to write image {}", path.display()))?;
        info!("Wrote grid image to {}", path.display());
    }

    if let Some(path) = &cli.json {
        let report = SimulationReport::new(&grid, scenario.budget, placement, route);
        fs::write(path, report.to_json()?).with_context(|| format!("Failed to write report {}", path.display()))?;
        info!("Wrote report to {}", path.display());
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging setup
    let crate_level = if cli.quiet { LevelFilter::Warn } else { LevelFilter::Debug };
    Builder::new()
        .filter_level(if cli.quiet { LevelFilter::Warn } else { LevelFilter::Info })
        .filter(Some("tower_coverage_simulator"), crate_level)
        .parse_default_env()
        .init();

    info!("Starting up");
    run(&cli)
}
