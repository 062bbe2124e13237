use crate::grid::Grid;
use rand::Rng;

/// Per-cell grass counters over a toroidal grid.
///
/// Keeps an O(1) running total alongside the grid; the total must stay
/// exactly equal to the sum over all cells at all times.
#[derive(Clone, Debug)]
pub struct GrassField {
    grid: Grid<u32>,
    total: u64,
}

impl GrassField {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid: Grid::new(width, height),
            total: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Scatter `units` grass units over the field, one uniformly random cell
    /// per unit. Units stack freely on the same cell (placement with
    /// replacement, not an even spread).
    pub fn distribute(&mut self, units: u32, rng: &mut impl Rng) {
        let (width, height) = self.grid.size();
        for _ in 0..units {
            let x = rng.random_range(0..width) as i64;
            let y = rng.random_range(0..height) as i64;
            let current = self.amount_at(x, y);
            self.grid.set(x, y, current + 1);
            self.total += 1;
        }
    }

    /// Grass at the addressed cell; 0 for a never-visited cell.
    pub fn amount_at(&self, x: i64, y: i64) -> u32 {
        self.grid.get(x, y).copied().unwrap_or(0)
    }

    /// Remove and return all grass at the addressed cell.
    pub fn take_all(&mut self, x: i64, y: i64) -> u32 {
        let amount = self.grid.take(x, y).unwrap_or(0);
        self.total -= u64::from(amount);
        amount
    }

    /// Total grass across the whole field.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Test seam: put a known amount on a known cell.
    #[cfg(test)]
    pub(crate) fn deposit(&mut self, x: i64, y: i64, amount: u32) {
        let current = self.amount_at(x, y);
        self.grid.set(x, y, current + amount);
        self.total += u64::from(amount);
    }
}
