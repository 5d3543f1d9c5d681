//! Run configuration shared by the command line driver.

pub mod scenario;

pub use scenario::ScenarioConfig;
