//! Output of a finished grid.
//!
//! None of these feed back into the simulation; they only read the grid.
//!
//! - `text`: Plain 0/1/2 dump, one grid row per line
//! - `png`: Raster image with blocked, covered, and tower cells
//! - `report`: JSON summary of a run

pub mod png;
pub mod report;
pub mod text;

pub use png::{DEFAULT_CELL_SIZE, MAX_CELL_SIZE, render_png};
pub use report::{RouteReport, SimulationReport};
pub use text::render_text;
