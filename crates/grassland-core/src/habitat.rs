use crate::constants::PLACEMENT_RETRY_FACTOR;
use crate::grass::GrassField;
use crate::grid::Grid;
use rand::Rng;

/// The shared terrain a rabbit acts on during its step: the occupancy grid
/// and the grass field, both over the same toroidal dimensions.
///
/// The occupancy grid stores rabbit ids, not rabbits; the `World` owns the
/// rabbit list and keeps the two structures in lockstep. Splitting the
/// habitat out of the `World` lets a rabbit mutate the terrain while the
/// world still holds the rabbit itself.
#[derive(Clone, Debug)]
pub struct Habitat {
    occupancy: Grid<u64>,
    grass: GrassField,
}

impl Habitat {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            occupancy: Grid::new(width, height),
            grass: GrassField::new(width, height),
        }
    }

    pub fn width(&self) -> usize {
        self.occupancy.width()
    }

    pub fn height(&self) -> usize {
        self.occupancy.height()
    }

    /// Normalize a coordinate pair into grid bounds.
    pub fn wrap(&self, x: i64, y: i64) -> (i64, i64) {
        self.occupancy.wrap(x, y)
    }

    pub fn is_occupied(&self, x: i64, y: i64) -> bool {
        self.occupancy.is_occupied(x, y)
    }

    /// Id of the rabbit occupying the addressed cell, if any.
    pub fn rabbit_at(&self, x: i64, y: i64) -> Option<u64> {
        self.occupancy.get(x, y).copied()
    }

    /// Move an occupant between cells. Fails without mutating anything iff
    /// the destination is occupied. An empty source cell still "succeeds":
    /// callers are responsible for passing the occupant's true position.
    pub fn move_rabbit(&mut self, from: (i64, i64), to: (i64, i64)) -> bool {
        if self.occupancy.is_occupied(to.0, to.1) {
            return false;
        }
        if let Some(id) = self.occupancy.take(from.0, from.1) {
            self.occupancy.set(to.0, to.1, id);
        }
        true
    }

    pub(crate) fn occupy(&mut self, x: i64, y: i64, id: u64) {
        self.occupancy.set(x, y, id);
    }

    pub(crate) fn remove_rabbit_at(&mut self, x: i64, y: i64) -> Option<u64> {
        self.occupancy.take(x, y)
    }

    /// Draw random cells until an unoccupied one turns up, within the
    /// bounded retry budget. `None` signals saturation, not a fault: on a
    /// full (or nearly full) grid the budget can run out legitimately.
    pub fn find_free_cell(&self, rng: &mut impl Rng) -> Option<(i64, i64)> {
        let (width, height) = self.occupancy.size();
        let budget = PLACEMENT_RETRY_FACTOR * width * height;
        for _ in 0..budget {
            let x = rng.random_range(0..width) as i64;
            let y = rng.random_range(0..height) as i64;
            if !self.occupancy.is_occupied(x, y) {
                return Some((x, y));
            }
        }
        None
    }

    /// Harvest all grass at the addressed cell.
    pub fn take_grass_at(&mut self, x: i64, y: i64) -> u32 {
        self.grass.take_all(x, y)
    }

    pub fn grass(&self) -> &GrassField {
        &self.grass
    }

    pub(crate) fn grass_mut(&mut self) -> &mut GrassField {
        &mut self.grass
    }

    pub fn occupied_cell_count(&self) -> usize {
        self.occupancy.occupied_count()
    }

    /// Snapshot of occupied cells for rendering collaborators.
    pub fn occupied_cells(&self) -> Vec<(i64, i64)> {
        self.occupancy.iter_occupied().map(|(pos, _)| pos).collect()
    }
}
