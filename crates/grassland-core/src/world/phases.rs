use super::{TickReport, World};
use crate::config::ReplacementPolicy;
use rand::seq::SliceRandom;

impl World {
    /// Advance the simulation by one full tick.
    ///
    /// The phase order is fixed and order-sensitive: shuffle, step, reap,
    /// reproduce, regrow. A tick always runs to completion; nothing in here
    /// can fail.
    pub fn tick(&mut self) -> TickReport {
        self.tick_index += 1;
        self.births_last_tick = 0;
        self.deaths_last_tick = 0;

        self.shuffle_phase();
        self.step_phase();
        let deaths = self.reap_phase();
        let replacements = match self.config.replacement_policy {
            ReplacementPolicy::ReplaceDeaths => self.replace_phase(deaths),
            ReplacementPolicy::ReproductionOnly => 0,
        };
        self.reproduce_phase();
        let grass_spread = self.regrow_phase();

        TickReport {
            births: self.births_last_tick,
            deaths,
            replacements,
            grass_spread,
        }
    }

    /// Re-randomize activation order so list position carries no bias.
    fn shuffle_phase(&mut self) {
        self.rabbits.shuffle(&mut self.rng);
    }

    /// Step every rabbit sequentially in shuffled order. Later rabbits see
    /// the grid and grass state already updated by earlier ones.
    fn step_phase(&mut self) {
        // Snapshot the length: rabbits appended mid-tick wait until the next
        // tick's shuffle to act.
        let count = self.rabbits.len();
        for i in 0..count {
            let rabbit = &mut self.rabbits[i];
            rabbit.step(&mut self.habitat, &self.config, &mut self.rng);
        }
    }

    /// Remove every rabbit whose energy fell below 1, from both the list and
    /// the occupancy grid. Returns the number reaped.
    fn reap_phase(&mut self) -> usize {
        let mut reaped = 0;
        let mut i = self.rabbits.len();
        while i > 0 {
            i -= 1;
            if self.rabbits[i].energy < 1 {
                if let Some((x, y)) = self.rabbits[i].position() {
                    self.habitat.remove_rabbit_at(x, y);
                }
                self.rabbits.remove(i);
                reaped += 1;
            }
        }
        self.deaths_last_tick += reaped;
        self.total_deaths += reaped;
        reaped
    }

    /// Historical-variant refill: one fresh rabbit per death, each subject
    /// to the usual placement budget. Returns how many were actually placed.
    fn replace_phase(&mut self, deaths: usize) -> usize {
        let mut placed = 0;
        for _ in 0..deaths {
            let newborn = self.spawn_rabbit();
            if self.place_rabbit(newborn) {
                placed += 1;
            }
        }
        placed
    }

    /// Single pass over the post-reap population: any rabbit above the birth
    /// threshold pays the reproduction cost and spawns one offspring. The
    /// cost is charged even when the offspring finds no free cell, and a
    /// parent reproduces at most once per tick regardless of remaining
    /// energy. Offspring are appended and therefore never re-scanned.
    fn reproduce_phase(&mut self) {
        let count = self.rabbits.len();
        let threshold = i64::from(self.config.birth_threshold);
        let cost = i64::from(self.config.reproduction_cost);
        for i in 0..count {
            if self.rabbits[i].energy > threshold {
                self.rabbits[i].energy -= cost;
                let offspring = self.spawn_rabbit();
                if self.place_rabbit(offspring) {
                    self.births_last_tick += 1;
                    self.total_births += 1;
                }
            }
        }
    }

    /// Scatter fresh grass on every `grass_growth_interval`-th tick.
    fn regrow_phase(&mut self) -> u32 {
        if !self.tick_index.is_multiple_of(self.config.grass_growth_interval) {
            return 0;
        }
        self.habitat
            .grass_mut()
            .distribute(self.config.grass_growth_rate, &mut self.rng);
        self.config.grass_growth_rate
    }
}
