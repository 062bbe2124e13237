use serde::{Deserialize, Serialize};
use std::{error::Error, fmt};

/// Policy for what happens to the population when rabbits die.
///
/// The historical rule set replaced every death with a fresh rabbit, keeping
/// the population constant; the current canonical rule relies purely on
/// threshold reproduction, so the population may shrink to zero. The choice
/// is explicit rather than implied by other parameters.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReplacementPolicy {
    #[default]
    ReproductionOnly,
    ReplaceDeaths,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SimConfig {
    /// Deterministic seed for reproducible simulation runs.
    pub seed: u64,
    /// Width of the toroidal grid in cells.
    pub width: usize,
    /// Height of the toroidal grid in cells.
    pub height: usize,
    /// Number of rabbits seeded at world construction.
    pub initial_rabbits: usize,
    /// Grass units scattered over the field at world construction.
    pub initial_grass: u32,
    /// Grass units scattered on each regrowth event.
    pub grass_growth_rate: u32,
    /// Ticks between regrowth events (regrowth fires every Nth tick, not
    /// every tick). Must be positive.
    pub grass_growth_interval: usize,
    /// Lower bound (inclusive) of the initial-energy draw.
    pub min_lifespan: u32,
    /// Upper bound (exclusive) of the initial-energy draw. `min == max`
    /// degenerates to a fixed initial energy of `min`.
    pub max_lifespan: u32,
    /// Energy a rabbit must exceed to reproduce during the reproduce phase.
    pub birth_threshold: u32,
    /// Energy charged to a parent for each reproduction, whether or not the
    /// offspring finds a free cell.
    pub reproduction_cost: u32,
    /// Energy charged after each successful consuming move.
    pub metabolic_cost: u32,
    /// Population policy applied after the reap phase.
    pub replacement_policy: ReplacementPolicy,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            width: 50,
            height: 50,
            initial_rabbits: 100,
            initial_grass: 1000,
            grass_growth_rate: 100,
            grass_growth_interval: 20,
            min_lifespan: 60,
            max_lifespan: 100,
            birth_threshold: 100,
            reproduction_cost: 60,
            metabolic_cost: 1,
            replacement_policy: ReplacementPolicy::ReproductionOnly,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimConfigError {
    InvalidWidth,
    InvalidHeight,
    CellCountOverflow,
    TooManyCells { max: usize, actual: usize },
    LifespanBoundsReversed { min: u32, max: u32 },
    InvalidGrowthInterval,
}

impl fmt::Display for SimConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimConfigError::InvalidWidth => write!(f, "width must be at least 1"),
            SimConfigError::InvalidHeight => write!(f, "height must be at least 1"),
            SimConfigError::CellCountOverflow => {
                write!(f, "width * height overflows usize")
            }
            SimConfigError::TooManyCells { max, actual } => {
                write!(f, "cell count ({actual}) exceeds supported maximum ({max})")
            }
            SimConfigError::LifespanBoundsReversed { min, max } => write!(
                f,
                "min_lifespan ({min}) must not exceed max_lifespan ({max})"
            ),
            SimConfigError::InvalidGrowthInterval => {
                write!(f, "grass_growth_interval must be positive")
            }
        }
    }
}

impl Error for SimConfigError {}

impl SimConfig {
    pub const MAX_CELLS: usize = crate::constants::MAX_CELLS;

    pub fn validate(&self) -> Result<(), SimConfigError> {
        if self.width == 0 {
            return Err(SimConfigError::InvalidWidth);
        }
        if self.height == 0 {
            return Err(SimConfigError::InvalidHeight);
        }
        let cells = self
            .width
            .checked_mul(self.height)
            .ok_or(SimConfigError::CellCountOverflow)?;
        if cells > Self::MAX_CELLS {
            return Err(SimConfigError::TooManyCells {
                max: Self::MAX_CELLS,
                actual: cells,
            });
        }
        if self.min_lifespan > self.max_lifespan {
            return Err(SimConfigError::LifespanBoundsReversed {
                min: self.min_lifespan,
                max: self.max_lifespan,
            });
        }
        if self.grass_growth_interval == 0 {
            return Err(SimConfigError::InvalidGrowthInterval);
        }
        Ok(())
    }
}
