use crate::config::SimConfig;
use crate::habitat::Habitat;
use rand::Rng;

/// A single grazing agent.
///
/// A rabbit is unplaced (`position == None`) between creation and the
/// world's placement routine, then alive until the reap phase removes it.
/// Energy may dip below 1 transiently; the world, not the rabbit, decides
/// death once per tick.
#[derive(Clone, Debug)]
pub struct Rabbit {
    pub id: u64,
    position: Option<(i64, i64)>,
    heading: (i64, i64),
    pub energy: i64,
}

impl Rabbit {
    /// Create an unplaced rabbit with a random heading and an initial energy
    /// drawn uniformly from `[min_lifespan, max_lifespan)`.
    pub fn new(id: u64, config: &SimConfig, rng: &mut impl Rng) -> Self {
        let energy = if config.min_lifespan == config.max_lifespan {
            i64::from(config.min_lifespan)
        } else {
            i64::from(rng.random_range(config.min_lifespan..config.max_lifespan))
        };
        Self {
            id,
            position: None,
            heading: random_heading(rng),
            energy,
        }
    }

    pub fn position(&self) -> Option<(i64, i64)> {
        self.position
    }

    pub(crate) fn set_position(&mut self, x: i64, y: i64) {
        self.position = Some((x, y));
    }

    pub fn heading(&self) -> (i64, i64) {
        self.heading
    }

    pub fn is_alive(&self) -> bool {
        self.energy >= 1
    }

    /// One activation: try to move one cell along the heading, graze on
    /// success, and redraw the heading.
    ///
    /// On a successful move the rabbit consumes all grass at the new cell,
    /// then pays the metabolic cost if its energy is still at least 1. A
    /// blocked move is a no-op (no grazing, no metabolic cost). The heading
    /// is redrawn unconditionally: direction is never kept across ticks.
    pub fn step(&mut self, habitat: &mut Habitat, config: &SimConfig, rng: &mut impl Rng) {
        if let Some((x, y)) = self.position {
            let (vx, vy) = self.heading;
            let (nx, ny) = habitat.wrap(x + vx, y + vy);
            if habitat.move_rabbit((x, y), (nx, ny)) {
                self.position = Some((nx, ny));
                self.energy += i64::from(habitat.take_grass_at(nx, ny));
                if self.energy >= 1 {
                    self.energy -= i64::from(config.metabolic_cost);
                }
            }
        }
        self.heading = random_heading(rng);
    }
}

/// Draw one of the 8 unit headings: both components in {-1, 0, 1}, never
/// both zero.
fn random_heading(rng: &mut impl Rng) -> (i64, i64) {
    loop {
        let vx = rng.random_range(-1i64..=1);
        let vy = rng.random_range(-1i64..=1);
        if vx != 0 || vy != 0 {
            return (vx, vy);
        }
    }
}
