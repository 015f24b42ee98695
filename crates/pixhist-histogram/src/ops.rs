//! Post-processing of finished count grids

use crate::types::Grid;

/// Operations that turn a count grid into renderable values
///
/// None of these mutate the counts; each returns a new grid.
pub trait GridOps {
    /// Counts as `f64` values, unchanged
    fn to_values(&self) -> Grid<f64>;

    /// `ln(1 + count)` per cell, compressing the dynamic range so a few hot
    /// cells do not dominate a color map
    fn log_compress(&self) -> Grid<f64>;

    /// Apply log compression if `apply_log` is set
    fn finalize(&self, apply_log: bool) -> Grid<f64> {
        if apply_log {
            self.log_compress()
        } else {
            self.to_values()
        }
    }
}

impl GridOps for Grid<u64> {
    fn to_values(&self) -> Grid<f64> {
        self.map(|c| c as f64)
    }

    fn log_compress(&self) -> Grid<f64> {
        // ln_1p(0) is exactly 0, so empty cells stay empty
        self.map(|c| (c as f64).ln_1p())
    }
}

/// Finalize a count grid for rendering; see [`GridOps::finalize`]
pub fn finalize(grid: &Grid<u64>, apply_log: bool) -> Grid<f64> {
    grid.finalize(apply_log)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;
    use approx::assert_relative_eq;

    fn sample_grid() -> Grid<u64> {
        let mut grid: Grid<u64> = Grid::zeros(3, 2).unwrap();
        for _ in 0..9 {
            grid.increment(Cell::new(0, 1));
        }
        grid.increment(Cell::new(1, 2));
        grid
    }

    #[test]
    fn test_finalize_without_log_is_elementwise_equal() {
        let grid = sample_grid();
        let values = finalize(&grid, false);
        assert_eq!(values.width(), 3);
        assert_eq!(values.height(), 2);
        for (v, c) in values.cells().iter().zip(grid.cells()) {
            assert_eq!(*v, *c as f64);
        }
    }

    #[test]
    fn test_log_compress() {
        let grid = sample_grid();
        let values = grid.finalize(true);
        assert_eq!(values.get(Cell::new(0, 0)), Some(0.0));
        assert_relative_eq!(values.get(Cell::new(0, 1)).unwrap(), 10.0_f64.ln());
        assert_relative_eq!(values.get(Cell::new(1, 2)).unwrap(), 2.0_f64.ln());
        // Raw counts are untouched
        assert_eq!(grid.get(Cell::new(0, 1)), Some(9));
    }

    #[test]
    fn test_log_of_zero_grid_is_zero() {
        let grid: Grid<u64> = Grid::zeros(4, 4).unwrap();
        let values = finalize(&grid, true);
        assert!(values.cells().iter().all(|&v| v == 0.0));
        assert_eq!(values.max_value(), 0.0);
    }
}
