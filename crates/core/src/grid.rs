//! Grid module - fixed-size 2D container with world-space placement
//!
//! Cells live in a flat vector addressed `[x][y]` with `x` as the slow-varying
//! axis (`x * height + y`). The grid knows nothing about items or matches; it
//! only stores cells and converts between coordinates and world positions.
//!
//! Out-of-range indexing through [`Grid::get`] / [`Grid::get_mut`] panics: range
//! checks belong to the caller (see [`Grid::contains`]).

/// World-space point (x, y)
pub type WorldPos = (f32, f32);

/// Fixed-size 2D grid of `T`
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cell_size: f32,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    /// Build a `width * height` grid, creating each cell with `factory(x, y)`
    pub fn new(
        width: usize,
        height: usize,
        cell_size: f32,
        mut factory: impl FnMut(usize, usize) -> T,
    ) -> Self {
        let mut cells = Vec::with_capacity(width * height);
        for x in 0..width {
            for y in 0..height {
                cells.push(factory(x, y));
            }
        }
        Self {
            width,
            height,
            cell_size,
            cells,
        }
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height);
        x * self.height + y
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Check signed coordinates against the grid bounds
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && (x as usize) < self.width && y >= 0 && (y as usize) < self.height
    }

    pub fn get(&self, x: usize, y: usize) -> &T {
        &self.cells[self.index(x, y)]
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> &mut T {
        let idx = self.index(x, y);
        &mut self.cells[idx]
    }

    /// Bounds-checked lookup on signed coordinates
    pub fn try_get(&self, x: i32, y: i32) -> Option<&T> {
        if self.contains(x, y) {
            Some(self.get(x as usize, y as usize))
        } else {
            None
        }
    }

    /// Lower-left corner of cell (x, y) in world space
    pub fn position_of(&self, x: i32, y: i32) -> WorldPos {
        (x as f32 * self.cell_size, y as f32 * self.cell_size)
    }

    /// Center of cell (x, y) in world space
    pub fn center_of(&self, x: i32, y: i32) -> WorldPos {
        let (px, py) = self.position_of(x, y);
        let half = self.cell_size / 2.0;
        (px + half, py + half)
    }

    /// Inverse of [`Grid::position_of`]: floor-divide a world position by the cell size.
    ///
    /// The result may lie outside the grid (e.g. a drag that ends off the board).
    pub fn coordinates_of(&self, world: WorldPos) -> (i32, i32) {
        (
            (world.0 / self.cell_size).floor() as i32,
            (world.1 / self.cell_size).floor() as i32,
        )
    }

    /// All coordinates in storage order (x-major)
    pub fn coords(&self) -> impl Iterator<Item = (usize, usize)> {
        let height = self.height;
        (0..self.width).flat_map(move |x| (0..height).map(move |y| (x, y)))
    }

    pub fn cells(&self) -> &[T] {
        &self.cells
    }
}
