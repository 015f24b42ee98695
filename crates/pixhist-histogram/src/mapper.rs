//! Mapping continuous samples onto grid cells

use num_traits::Float;
use pixhist_core::{Axis, Error, Result};

use crate::bbox::to_f64;

use crate::bbox::{from_usize, BoundingBox};
use crate::types::{validate_dimensions, Cell};

/// Maps (x, y) samples to cells of a `width x height` grid
///
/// Both axes use half-open intervals: `x` in `[x_min, x_max)` maps to columns
/// `0..width` and `y` in `[y_min, y_max)` maps to rows `0..height`. A sample
/// exactly on a max edge is out of bounds.
#[derive(Debug, Clone, Copy)]
pub struct BinMapper<F: Float = f64> {
    x_min: F,
    x_max: F,
    y_min: F,
    y_max: F,
    x_scale: F,
    y_scale: F,
    width: usize,
    height: usize,
}

impl<F: Float> BinMapper<F> {
    pub fn new(range: &BoundingBox<F>, width: usize, height: usize) -> Result<Self> {
        validate_dimensions(width, height)?;
        let x_scale = from_usize::<F>(width) / range.x_span();
        let y_scale = from_usize::<F>(height) / range.y_span();
        // A span too small to split into bins cannot be mapped
        if !x_scale.is_finite() {
            return Err(Error::degenerate(Axis::X, to_f64(range.x_min()), to_f64(range.x_max())));
        }
        if !y_scale.is_finite() {
            return Err(Error::degenerate(Axis::Y, to_f64(range.y_min()), to_f64(range.y_max())));
        }
        Ok(Self {
            x_min: range.x_min(),
            x_max: range.x_max(),
            y_min: range.y_min(),
            y_max: range.y_max(),
            x_scale,
            y_scale,
            width,
            height,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The cell holding `(x, y)`, or `None` if the sample is out of bounds
    ///
    /// NaN and infinite coordinates fail the range comparisons and are
    /// reported as out of bounds.
    #[inline]
    pub fn map(&self, x: F, y: F) -> Option<Cell> {
        if !(x >= self.x_min && x < self.x_max && y >= self.y_min && y < self.y_max) {
            return None;
        }
        // Rounding can push a value just below the max edge up to `width`
        let col = ((x - self.x_min) * self.x_scale).to_usize()?.min(self.width - 1);
        let row = ((y - self.y_min) * self.y_scale).to_usize()?.min(self.height - 1);
        Some(Cell { row, col })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper(w: usize, h: usize) -> BinMapper {
        let range = BoundingBox::new(0.0, 2.0, 0.0, 2.0).unwrap();
        BinMapper::new(&range, w, h).unwrap()
    }

    #[test]
    fn test_map_basic() {
        let m = mapper(2, 2);
        assert_eq!(m.map(0.0, 0.0), Some(Cell::new(0, 0)));
        assert_eq!(m.map(1.0, 1.0), Some(Cell::new(1, 1)));
        assert_eq!(m.map(1.5, 0.2), Some(Cell::new(0, 1)));
        assert_eq!(m.map(0.2, 1.5), Some(Cell::new(1, 0)));
    }

    #[test]
    fn test_max_edge_is_out_of_bounds() {
        let m = mapper(2, 2);
        assert_eq!(m.map(2.0, 2.0), None);
        assert_eq!(m.map(2.0, 0.5), None);
        assert_eq!(m.map(0.5, 2.0), None);
        assert_eq!(m.map(-1e-12, 0.5), None);
    }

    #[test]
    fn test_just_below_max_edge_stays_in_last_cell() {
        let range = BoundingBox::new(0.1, 0.7, 0.1, 0.7).unwrap();
        let m = BinMapper::new(&range, 3, 7).unwrap();
        let below = f64::from_bits(0.7_f64.to_bits() - 1);
        let cell = m.map(below, below).unwrap();
        assert_eq!(cell, Cell::new(6, 2));
    }

    #[test]
    fn test_non_finite_is_out_of_bounds() {
        let m = mapper(4, 4);
        assert_eq!(m.map(f64::NAN, 1.0), None);
        assert_eq!(m.map(1.0, f64::NAN), None);
        assert_eq!(m.map(f64::INFINITY, 1.0), None);
        assert_eq!(m.map(1.0, f64::NEG_INFINITY), None);
    }

    #[test]
    fn test_rejects_zero_dimensions() {
        let range = BoundingBox::new(0.0, 1.0, 0.0, 1.0).unwrap();
        assert!(matches!(BinMapper::new(&range, 0, 1), Err(Error::InvalidArgument(_))));
        assert!(matches!(BinMapper::new(&range, 1, 0), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_rejects_unsplittable_span() {
        let tiny = BoundingBox::new(0.0, 1e-310, 0.0, 1.0).unwrap();
        assert!(matches!(
            BinMapper::new(&tiny, 10, 1),
            Err(Error::DegenerateRange { axis: Axis::X, .. })
        ));
        let tiny_y = BoundingBox::new(0.0, 1.0, 0.0, 1e-310).unwrap();
        assert!(matches!(
            BinMapper::new(&tiny_y, 1, 10),
            Err(Error::DegenerateRange { axis: Axis::Y, .. })
        ));
    }

    #[test]
    fn test_extreme_spans_map_in_bounds_samples() {
        let small = BoundingBox::new(0.0, 1e-300, 0.0, 1.0).unwrap();
        let m = BinMapper::new(&small, 10, 1).unwrap();
        assert_eq!(m.map(0.0, 0.5), Some(Cell::new(0, 0)));
        assert_eq!(m.map(5.5e-301, 0.5), Some(Cell::new(0, 5)));

        let huge = BoundingBox::new(-8e307, 8e307, 0.0, 1.0).unwrap();
        let m = BinMapper::new(&huge, 10, 1).unwrap();
        assert_eq!(m.map(-8e307, 0.0), Some(Cell::new(0, 0)));
        assert_eq!(m.map(7.9e307, 0.0), Some(Cell::new(0, 9)));
        assert_eq!(m.map(1e307, 0.0), Some(Cell::new(0, 5)));
    }

    #[test]
    fn test_single_cell_grid() {
        let m = mapper(1, 1);
        assert_eq!(m.map(0.0, 0.0), Some(Cell::new(0, 0)));
        assert_eq!(m.map(1.999, 1.999), Some(Cell::new(0, 0)));
    }

    #[test]
    fn test_f32_coordinates() {
        let range = BoundingBox::<f32>::new(-1.0, 1.0, -1.0, 1.0).unwrap();
        let m = BinMapper::new(&range, 4, 4).unwrap();
        assert_eq!(m.map(-1.0f32, 0.99f32), Some(Cell::new(3, 0)));
        assert_eq!(m.map(0.0f32, 0.0f32), Some(Cell::new(2, 2)));
    }
}
