use crate::config::{SimConfig, SimConfigError};
use crate::habitat::Habitat;
use crate::metrics::{PopulationStats, RunSummary, collect_tick_metrics};
use crate::rabbit::Rabbit;
use crate::rng;
use rand_chacha::ChaCha12Rng;
use std::{error::Error, fmt};

/// What happened during one tick, for callers that drive the loop directly
/// instead of going through [`World::run`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Offspring placed during the reproduce phase.
    pub births: usize,
    /// Rabbits removed during the reap phase.
    pub deaths: usize,
    /// Fresh rabbits placed under `ReplacementPolicy::ReplaceDeaths`.
    pub replacements: usize,
    /// Grass units scattered during the regrow phase (0 on off-interval ticks).
    pub grass_spread: u32,
}

/// The simulation: the rabbit population, the habitat they graze, and the
/// single RNG every random draw routes through.
///
/// Invariant: the set of occupied habitat cells is exactly the set of
/// positions of rabbits in `rabbits` — a strict bijection maintained across
/// placement, movement, reaping, and reproduction.
pub struct World {
    rabbits: Vec<Rabbit>,
    habitat: Habitat,
    config: SimConfig,
    rng: ChaCha12Rng,
    next_rabbit_id: u64,
    tick_index: usize,
    births_last_tick: usize,
    deaths_last_tick: usize,
    total_births: usize,
    total_deaths: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    InvalidSampleEvery,
    TooManySteps { max: usize, actual: usize },
    TooManySamples { max: usize, actual: usize },
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::InvalidSampleEvery => write!(f, "sample_every must be positive"),
            RunError::TooManySteps { max, actual } => {
                write!(f, "steps ({actual}) exceed supported maximum ({max})")
            }
            RunError::TooManySamples { max, actual } => {
                write!(
                    f,
                    "sample count ({actual}) exceeds supported maximum ({max})"
                )
            }
        }
    }
}

impl Error for RunError {}

impl World {
    pub const MAX_RUN_STEPS: usize = 1_000_000;
    pub const MAX_RUN_SAMPLES: usize = 50_000;

    /// Build a world from a validated config: scatter the initial grass,
    /// then seed the initial population.
    ///
    /// Config problems are fatal; a failed placement during seeding is not —
    /// on a saturated grid the rabbit is silently skipped, matching the
    /// recoverable-saturation contract of [`World::place_rabbit`].
    pub fn new(config: SimConfig) -> Result<Self, SimConfigError> {
        config.validate()?;
        let mut rng = rng::create_rng(config.seed);
        let mut habitat = Habitat::new(config.width, config.height);
        habitat
            .grass_mut()
            .distribute(config.initial_grass, &mut rng);
        let initial_rabbits = config.initial_rabbits;
        let mut world = Self {
            rabbits: Vec::with_capacity(initial_rabbits),
            habitat,
            config,
            rng,
            next_rabbit_id: 0,
            tick_index: 0,
            births_last_tick: 0,
            deaths_last_tick: 0,
            total_births: 0,
            total_deaths: 0,
        };
        for _ in 0..initial_rabbits {
            let rabbit = world.spawn_rabbit();
            world.place_rabbit(rabbit);
        }
        Ok(world)
    }

    /// Create a fresh unplaced rabbit with the next unused identity.
    pub(crate) fn spawn_rabbit(&mut self) -> Rabbit {
        let id = self.next_rabbit_id;
        self.next_rabbit_id += 1;
        Rabbit::new(id, &self.config, &mut self.rng)
    }

    /// Place an unplaced rabbit on a random free cell and adopt it into the
    /// population. Returns `false` (discarding the rabbit) only when the
    /// bounded retry budget finds no free cell — saturation, not a fault.
    pub fn place_rabbit(&mut self, mut rabbit: Rabbit) -> bool {
        match self.habitat.find_free_cell(&mut self.rng) {
            Some((x, y)) => {
                self.habitat.occupy(x, y, rabbit.id);
                rabbit.set_position(x, y);
                self.rabbits.push(rabbit);
                true
            }
            None => false,
        }
    }

    /// Relocate whichever rabbit sits at `from` to `to`, keeping the
    /// occupancy grid and the rabbit's stored position in lockstep. Fails
    /// without mutation iff the destination is occupied.
    pub fn move_rabbit(&mut self, from: (i64, i64), to: (i64, i64)) -> bool {
        let from = self.habitat.wrap(from.0, from.1);
        let to = self.habitat.wrap(to.0, to.1);
        if !self.habitat.move_rabbit(from, to) {
            return false;
        }
        if let Some(rabbit) = self.rabbits.iter_mut().find(|r| r.position() == Some(from)) {
            rabbit.set_position(to.0, to.1);
        }
        true
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn habitat(&self) -> &Habitat {
        &self.habitat
    }

    pub fn rabbits(&self) -> &[Rabbit] {
        &self.rabbits
    }

    /// Ticks completed so far.
    pub fn tick_index(&self) -> usize {
        self.tick_index
    }

    pub fn total_grass(&self) -> u64 {
        self.habitat.grass().total()
    }

    pub fn living_rabbit_count(&self) -> usize {
        self.rabbits.iter().filter(|r| r.is_alive()).count()
    }

    /// Per-rabbit energy samples, the source for wealth histograms.
    pub fn rabbit_energies(&self) -> impl Iterator<Item = i64> + '_ {
        self.rabbits.iter().map(|r| r.energy)
    }

    /// Occupied cells for rendering collaborators.
    pub fn occupied_cells(&self) -> Vec<(i64, i64)> {
        self.habitat.occupied_cells()
    }

    pub fn population_stats(&self) -> PopulationStats {
        PopulationStats {
            alive_count: self.living_rabbit_count(),
            total_births: self.total_births,
            total_deaths: self.total_deaths,
        }
    }

    pub fn births_last_tick(&self) -> usize {
        self.births_last_tick
    }

    pub fn deaths_last_tick(&self) -> usize {
        self.deaths_last_tick
    }

    /// Drive `tick` for `steps` ticks, sampling metrics every
    /// `sample_every`-th tick (and on the final one).
    pub fn run(&mut self, steps: usize, sample_every: usize) -> Result<RunSummary, RunError> {
        if sample_every == 0 {
            return Err(RunError::InvalidSampleEvery);
        }
        if steps > Self::MAX_RUN_STEPS {
            return Err(RunError::TooManySteps {
                max: Self::MAX_RUN_STEPS,
                actual: steps,
            });
        }
        let estimated_samples = if steps == 0 {
            0
        } else {
            ((steps - 1) / sample_every) + 1
        };
        if estimated_samples > Self::MAX_RUN_SAMPLES {
            return Err(RunError::TooManySamples {
                max: Self::MAX_RUN_SAMPLES,
                actual: estimated_samples,
            });
        }

        let mut samples = Vec::with_capacity(estimated_samples);
        for step in 1..=steps {
            self.tick();
            if step % sample_every == 0 || step == steps {
                samples.push(collect_tick_metrics(
                    self.tick_index,
                    self.total_grass(),
                    self.births_last_tick,
                    self.deaths_last_tick,
                    &self.rabbits,
                ));
            }
        }
        Ok(RunSummary {
            schema_version: 1,
            steps,
            sample_every,
            final_alive_count: self.living_rabbit_count(),
            samples,
        })
    }
}

mod phases;
#[cfg(test)]
mod tests;
