//! Coverage simulation core.
//!
//! - `blocker`: Seeded random blocking of cells before optimization
//! - `optimizer`: Greedy budget-bounded tower placement
//! - `path_finder`: Hop metric over the covered-cell adjacency graph
//!
//! Everything here is synchronous and borrows the grid from the caller.

pub mod blocker;
pub mod optimizer;
pub mod path_finder;

pub use blocker::RandomBlocker;
pub use optimizer::{CoverageOptimizer, PlacementSummary};
pub use path_finder::{PathMetric, ReliabilityPathFinder};
