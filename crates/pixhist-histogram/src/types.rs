//! Core types for density map representation

use std::fmt;

use num_traits::Float;
use pixhist_core::{Error, Result};

use crate::bbox::BoundingBox;

/// A grid cell address
///
/// `row` indexes the y axis (row 0 holds the lowest y values) and `col`
/// indexes the x axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// A fixed-size, row-major 2-D grid
///
/// Count grids use `u64` cells so that hundreds of millions of samples piled
/// into a handful of cells cannot overflow. Finalized grids use `f64`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<C = u64> {
    width: usize,
    height: usize,
    cells: Vec<C>,
}

impl<C: Copy + Default> Grid<C> {
    /// Create a zero-initialized grid
    pub fn zeros(width: usize, height: usize) -> Result<Self> {
        validate_dimensions(width, height)?;
        let len = width
            .checked_mul(height)
            .ok_or_else(|| Error::InvalidArgument(format!("grid of {width}x{height} cells is too large")))?;

        Ok(Self {
            width,
            height,
            cells: vec![C::default(); len],
        })
    }
}

impl<C: Copy> Grid<C> {
    /// Number of columns (x bins)
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows (y bins)
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the value of a cell, or `None` outside the grid
    pub fn get(&self, cell: Cell) -> Option<C> {
        if cell.row < self.height && cell.col < self.width {
            Some(self.cells[cell.row * self.width + cell.col])
        } else {
            None
        }
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[C] {
        &self.cells
    }

    /// Iterate over rows, lowest y first
    pub fn rows(&self) -> impl Iterator<Item = &[C]> {
        self.cells.chunks_exact(self.width)
    }

    /// Apply `f` to every cell, producing a new grid of the same shape
    pub fn map<D, F>(&self, f: F) -> Grid<D>
    where
        F: Fn(C) -> D,
    {
        Grid {
            width: self.width,
            height: self.height,
            cells: self.cells.iter().map(|&c| f(c)).collect(),
        }
    }

    pub fn into_cells(self) -> Vec<C> {
        self.cells
    }
}

impl Grid<u64> {
    /// Add one to a cell; the caller guarantees the cell is inside the grid
    #[inline]
    pub(crate) fn increment(&mut self, cell: Cell) {
        self.cells[cell.row * self.width + cell.col] += 1;
    }

    /// Sum of all cell counts
    pub fn total(&self) -> u64 {
        self.cells.iter().sum()
    }

    /// Largest count in any cell
    pub fn max_count(&self) -> u64 {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// Add another grid of the same shape elementwise
    pub fn merge(&mut self, other: &Grid<u64>) -> Result<()> {
        if self.width != other.width || self.height != other.height {
            return Err(Error::InvalidArgument(format!(
                "cannot merge {}x{} grid into {}x{} grid",
                other.width, other.height, self.width, self.height
            )));
        }
        for (a, b) in self.cells.iter_mut().zip(&other.cells) {
            *a += b;
        }
        Ok(())
    }
}

impl Grid<f64> {
    /// Largest value in any cell
    pub fn max_value(&self) -> f64 {
        self.cells.iter().copied().fold(0.0, f64::max)
    }

    /// Sum of all cell values
    pub fn total(&self) -> f64 {
        self.cells.iter().sum()
    }
}

impl<C> fmt::Display for Grid<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grid({}x{})", self.width, self.height)
    }
}

/// Reject zero grid dimensions
pub(crate) fn validate_dimensions(width: usize, height: usize) -> Result<()> {
    if width == 0 {
        return Err(Error::non_positive("width", width));
    }
    if height == 0 {
        return Err(Error::non_positive("height", height));
    }
    Ok(())
}

/// Bookkeeping for one accumulation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccumulationStats {
    /// Samples pulled from the source
    pub drawn: u64,
    /// Samples that landed in a cell
    pub binned: u64,
}

impl AccumulationStats {
    /// Samples that were out of bounds or non-finite
    pub fn dropped(&self) -> u64 {
        self.drawn - self.binned
    }

    pub(crate) fn combine(self, other: Self) -> Self {
        Self {
            drawn: self.drawn + other.drawn,
            binned: self.binned + other.binned,
        }
    }
}

/// A finished density map, ready to hand to a renderer
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramResult<F: Float = f64> {
    grid: Grid<f64>,
    range: BoundingBox<F>,
    log_applied: bool,
    stats: AccumulationStats,
}

impl<F: Float> HistogramResult<F> {
    pub fn new(grid: Grid<f64>, range: BoundingBox<F>, log_applied: bool, stats: AccumulationStats) -> Self {
        Self {
            grid,
            range,
            log_applied,
            stats,
        }
    }

    /// The finalized grid values
    pub fn grid(&self) -> &Grid<f64> {
        &self.grid
    }

    /// The bounding box the grid covers
    pub fn range(&self) -> &BoundingBox<F> {
        &self.range
    }

    /// Whether `ln(1 + count)` was applied to the counts
    pub fn log_applied(&self) -> bool {
        self.log_applied
    }

    pub fn stats(&self) -> AccumulationStats {
        self.stats
    }

    /// Largest value in the grid, useful for color scaling
    pub fn max_value(&self) -> f64 {
        self.grid.max_value()
    }

    /// Sum of all grid values
    pub fn total(&self) -> f64 {
        self.grid.total()
    }

    /// Rows of the grid, lowest y first
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.grid.rows()
    }

    pub fn into_grid(self) -> Grid<f64> {
        self.grid
    }
}

impl<F: Float + fmt::Display> fmt::Display for HistogramResult<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HistogramResult({}x{}, binned={}/{}, range={}, log={})",
            self.grid.width(),
            self.grid.height(),
            self.stats.binned,
            self.stats.drawn,
            self.range,
            self.log_applied
        )
    }
}
