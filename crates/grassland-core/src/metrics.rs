use crate::rabbit::Rabbit;
use serde::{Deserialize, Serialize};

/// Aggregate observations for one tick, sampled by `World::run`.
///
/// These are pure read-only views; plotting and rendering collaborators
/// consume them after the tick completes.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TickMetrics {
    pub tick: usize,
    pub alive_count: usize,
    pub grass_total: u64,
    pub birth_count: usize,
    pub death_count: usize,
    pub energy_mean: f64,
    pub energy_std: f64,
    pub energy_min: i64,
    pub energy_max: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct PopulationStats {
    pub alive_count: usize,
    pub total_births: usize,
    pub total_deaths: usize,
}

fn default_schema_version() -> u32 {
    1
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunSummary {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub steps: usize,
    pub sample_every: usize,
    pub final_alive_count: usize,
    pub samples: Vec<TickMetrics>,
}

pub fn collect_tick_metrics(
    tick: usize,
    grass_total: u64,
    birth_count: usize,
    death_count: usize,
    rabbits: &[Rabbit],
) -> TickMetrics {
    let energies: Vec<i64> = rabbits.iter().map(|r| r.energy).collect();
    let alive_count = energies.len();
    let denom = alive_count.max(1) as f64;
    let energy_mean = energies.iter().map(|&e| e as f64).sum::<f64>() / denom;
    let energy_std = if alive_count < 2 {
        0.0
    } else {
        let var = energies
            .iter()
            .map(|&e| (e as f64 - energy_mean).powi(2))
            .sum::<f64>()
            / (alive_count - 1) as f64;
        var.sqrt()
    };
    TickMetrics {
        tick,
        alive_count,
        grass_total,
        birth_count,
        death_count,
        energy_mean,
        energy_std,
        energy_min: energies.iter().copied().min().unwrap_or(0),
        energy_max: energies.iter().copied().max().unwrap_or(0),
    }
}
