pub mod config;
pub mod constants;
pub mod grass;
pub mod grid;
pub mod habitat;
pub mod metrics;
pub mod rabbit;
pub mod rng;
pub mod world;

pub use config::{ReplacementPolicy, SimConfig, SimConfigError};
pub use metrics::{PopulationStats, RunSummary, TickMetrics};
pub use world::{RunError, TickReport, World};
