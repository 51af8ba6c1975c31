//! Uniform grid used to narrow perception candidates.
//!
//! Cells are wider than the perception range, so any boid within
//! range of a position lies in that position's cell or one of its eight
//! neighbours. Positions outside the covered area are clamped to edge cells;
//! clamping never moves two positions further apart in cell space, so the
//! property still holds.
//!
//! Cells only ever grow beyond that width. Very large worlds or tiny ranges
//! get coarser cells so the cell count stays within [`MAX_CELLS`].

use alloc::vec;
use alloc::vec::Vec;

use crate::config::WorldBounds;
use crate::entity::Boid;
use crate::math;
use crate::vector::Vector2D;

/// Upper bound on the number of cells a grid allocates.
pub const MAX_CELLS: usize = 1 << 14;

pub struct SpatialGrid {
    cell_size: f32,
    origin: f32,
    columns: usize,
    rows: usize,
    cells: Vec<Vec<usize>>,
}

impl SpatialGrid {
    /// Grid covering `[-slop, bound + slop)` on both axes.
    pub fn new(bounds: &WorldBounds, range: f32) -> Self {
        let width = bounds.width() + 2.0 * bounds.slop();
        let height = bounds.height() + 2.0 * bounds.slop();
        // strictly wider than the range so float rounding cannot skip a cell
        let mut cell_size = range.max(0.0) + 1.0;
        let (columns, rows) = loop {
            let columns = Self::cells_along(width, cell_size);
            let rows = Self::cells_along(height, cell_size);
            match columns.checked_mul(rows) {
                Some(count) if count <= MAX_CELLS => break (columns, rows),
                // an infinite cell size ends the loop with a single cell
                _ => cell_size *= 2.0,
            }
        };
        let origin = -bounds.slop();
        Self {
            cell_size,
            origin,
            columns,
            rows,
            cells: vec![Vec::new(); columns * rows],
        }
    }

    /// Builds a grid and inserts every boid.
    pub fn build(bounds: &WorldBounds, range: f32, boids: &[Boid]) -> Self {
        let mut grid = Self::new(bounds, range);
        for (index, boid) in boids.iter().enumerate() {
            grid.insert(index, boid.position);
        }
        grid
    }

    fn cells_along(extent: f32, cell_size: f32) -> usize {
        // float-to-int casts saturate, and NaN becomes 0
        (math::ceil(extent / cell_size) as usize).max(1)
    }

    fn cell_coord(&self, value: f32, count: usize) -> usize {
        let cell = math::floor((value - self.origin) / self.cell_size);
        // max() also maps NaN to 0
        (cell.max(0.0) as usize).min(count - 1)
    }

    fn cell_of(&self, position: Vector2D) -> (usize, usize) {
        (
            self.cell_coord(position.x, self.columns),
            self.cell_coord(position.y, self.rows),
        )
    }

    fn insert(&mut self, index: usize, position: Vector2D) {
        let (cx, cy) = self.cell_of(position);
        self.cells[cy * self.columns + cx].push(index);
    }

    /// Indices in the 3x3 block of cells around `position`, ascending.
    pub fn candidates(&self, position: Vector2D) -> Vec<usize> {
        let (cx, cy) = self.cell_of(position);
        let mut result = Vec::new();
        for y in cy.saturating_sub(1)..=(cy + 1).min(self.rows - 1) {
            for x in cx.saturating_sub(1)..=(cx + 1).min(self.columns - 1) {
                result.extend_from_slice(&self.cells[y * self.columns + x]);
            }
        }
        result.sort_unstable();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> WorldBounds {
        WorldBounds::new(1000.0, 1000.0, 50.0).unwrap()
    }

    fn at(x: f32, y: f32) -> Boid {
        Boid::new(Vector2D::new(x, y), Vector2D::new(1.0, 0.0))
    }

    #[test]
    fn test_grid_dimensions_cover_slop() {
        let grid = SpatialGrid::new(&bounds(), 250.0);
        // 1100 / 251 rounded up
        assert_eq!(grid.columns, 5);
        assert_eq!(grid.rows, 5);
    }

    #[test]
    fn test_candidates_include_adjacent_cells_only() {
        let boids = [at(0.0, 0.0), at(200.0, 0.0), at(900.0, 900.0)];
        let grid = SpatialGrid::build(&bounds(), 250.0, &boids);
        assert_eq!(grid.candidates(Vector2D::new(10.0, 10.0)), [0, 1]);
    }

    #[test]
    fn test_out_of_range_positions_are_clamped() {
        let boids = [at(-500.0, -500.0), at(-40.0, -40.0)];
        let grid = SpatialGrid::build(&bounds(), 250.0, &boids);
        assert_eq!(grid.candidates(Vector2D::new(-45.0, -45.0)), [0, 1]);
        assert_eq!(grid.candidates(Vector2D::new(f32::NAN, 0.0)), [0, 1]);
    }

    #[test]
    fn test_zero_range_caps_cell_count() {
        let grid = SpatialGrid::new(&bounds(), 0.0);
        assert!(grid.columns * grid.rows <= MAX_CELLS);
        assert!(grid.cell_size >= 1.0);
    }

    #[test]
    fn test_huge_bounds_cap_cell_count() {
        let huge = WorldBounds::new(1e12, 1e12, 50.0).unwrap();
        let boids = [at(0.0, 0.0), at(100.0, 0.0), at(9e11, 9e11)];
        let grid = SpatialGrid::build(&huge, 250.0, &boids);
        assert!(grid.columns * grid.rows <= MAX_CELLS);
        assert_eq!(grid.candidates(Vector2D::new(50.0, 0.0)), [0, 1]);
    }

    #[test]
    fn test_extreme_bounds_collapse_to_one_cell() {
        let extreme = WorldBounds::new(f32::MAX, f32::MAX, 0.0).unwrap();
        let boids = [at(0.0, 0.0), at(3e38, 3e38)];
        let grid = SpatialGrid::build(&extreme, 250.0, &boids);
        assert!(grid.columns * grid.rows <= MAX_CELLS);
        assert_eq!(grid.candidates(Vector2D::new(0.0, 0.0)), [0]);
    }
}
