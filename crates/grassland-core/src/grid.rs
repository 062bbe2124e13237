/// Fixed-size 2D toroidal lattice holding at most one value per cell.
///
/// Coordinates are taken modulo the grid dimensions on every access, so any
/// `i64` pair addresses a valid cell; out-of-range input is wrapped, never
/// rejected. Used once for the grass counters and once for the rabbit
/// occupancy handles.
#[derive(Clone, Debug)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<Option<T>>,
}

impl<T> Grid<T> {
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0, "grid width must be positive");
        assert!(height > 0, "grid height must be positive");
        let cells = (0..width * height).map(|_| None).collect();
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Normalize a coordinate pair into `[0,width) x [0,height)`.
    pub fn wrap(&self, x: i64, y: i64) -> (i64, i64) {
        (
            x.rem_euclid(self.width as i64),
            y.rem_euclid(self.height as i64),
        )
    }

    fn index(&self, x: i64, y: i64) -> usize {
        let (cx, cy) = self.wrap(x, y);
        cy as usize * self.width + cx as usize
    }

    pub fn get(&self, x: i64, y: i64) -> Option<&T> {
        self.cells[self.index(x, y)].as_ref()
    }

    /// Place a value at the addressed cell, returning the displaced occupant.
    pub fn set(&mut self, x: i64, y: i64, value: T) -> Option<T> {
        let idx = self.index(x, y);
        self.cells[idx].replace(value)
    }

    /// Remove and return the occupant of the addressed cell.
    pub fn take(&mut self, x: i64, y: i64) -> Option<T> {
        let idx = self.index(x, y);
        self.cells[idx].take()
    }

    pub fn is_occupied(&self, x: i64, y: i64) -> bool {
        self.cells[self.index(x, y)].is_some()
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Iterate occupied cells as (normalized coordinates, value).
    pub fn iter_occupied(&self) -> impl Iterator<Item = ((i64, i64), &T)> + '_ {
        self.cells.iter().enumerate().filter_map(move |(idx, cell)| {
            cell.as_ref()
                .map(|v| (((idx % self.width) as i64, (idx / self.width) as i64), v))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Grid;

    #[test]
    fn wraps_negative_and_overflowing_coordinates() {
        let mut grid: Grid<u32> = Grid::new(7, 5);
        grid.set(6, 0, 11);
        grid.set(0, 0, 22);
        assert_eq!(grid.get(-1, 0), Some(&11));
        assert_eq!(grid.get(7, 0), Some(&22));
        assert_eq!(grid.get(-8, 0), Some(&11));
    }

    #[test]
    fn wraps_by_any_multiple_of_dimension() {
        let mut grid: Grid<u32> = Grid::new(7, 5);
        grid.set(3, 2, 9);
        for k in -3i64..=3 {
            assert_eq!(grid.get(3 + k * 7, 2), Some(&9));
            assert_eq!(grid.get(3, 2 + k * 5), Some(&9));
        }
    }

    #[test]
    fn set_returns_displaced_value() {
        let mut grid: Grid<u32> = Grid::new(3, 3);
        assert_eq!(grid.set(1, 1, 5), None);
        assert_eq!(grid.set(1, 1, 6), Some(5));
        assert_eq!(grid.get(1, 1), Some(&6));
    }

    #[test]
    fn take_empties_the_cell() {
        let mut grid: Grid<u32> = Grid::new(3, 3);
        grid.set(2, 2, 7);
        assert!(grid.is_occupied(2, 2));
        assert_eq!(grid.take(2, 2), Some(7));
        assert!(!grid.is_occupied(2, 2));
        assert_eq!(grid.take(2, 2), None);
    }

    #[test]
    fn occupied_iteration_reports_normalized_coordinates() {
        let mut grid: Grid<u32> = Grid::new(4, 4);
        grid.set(-1, -1, 1);
        grid.set(0, 0, 2);
        let mut cells: Vec<((i64, i64), u32)> =
            grid.iter_occupied().map(|(pos, v)| (pos, *v)).collect();
        cells.sort();
        assert_eq!(cells, vec![((0, 0), 2), ((3, 3), 1)]);
        assert_eq!(grid.occupied_count(), 2);
    }

    #[test]
    #[should_panic(expected = "grid width must be positive")]
    fn zero_width_panics() {
        let _: Grid<u32> = Grid::new(0, 5);
    }
}
