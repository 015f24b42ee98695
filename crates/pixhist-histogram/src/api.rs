//! One-call density map construction
//!
//! Each function runs the whole pipeline: fix the range (optionally
//! widening it to the grid's aspect ratio), accumulate the samples, and
//! finalize the counts. Validation errors are raised before any grid is
//! allocated.

use num_traits::Float;
use pixhist_core::execution::sequential;
use pixhist_core::{Error, ExecutionEngine, Result};
use tracing::{debug, instrument};

use crate::accumulator::{accumulate_arrays_with, accumulate_partitioned, HistogramAccumulator};
use crate::bbox::BoundingBox;
use crate::ops::GridOps;
use crate::range::estimate_range;
use crate::traits::{ArraySource, SampleSource};
use crate::types::{validate_dimensions, HistogramResult};

/// Build a density map from `n_iter` samples of a generator
///
/// # Arguments
/// * `source` - Zero-argument callable (or other [`SampleSource`]) yielding `(x, y)`
/// * `n_iter` - Number of samples to pull; a stream that ends sooner is fine
/// * `width`, `height` - Number of bins on the x and y axes
/// * `range` - Region of (x, y) space mapped onto the grid
/// * `make_xy_proportional` - Widen `range` so x and y share one scale
/// * `log` - Return `ln(1 + count)` instead of raw counts
///
/// # Example
///
/// ```rust
/// use pixhist_histogram::{from_gen, BoundingBox};
///
/// let circle = || (0..).map(|i| {
///     let t = i as f64 * 0.01;
///     (t.cos(), t.sin())
/// });
/// let range = BoundingBox::new(-1.1, 1.1, -1.1, 1.1).unwrap();
/// let result = from_gen(&circle, 10_000, 64, 64, &range, false, true).unwrap();
/// assert_eq!(result.stats().binned, 10_000);
/// ```
#[instrument(level = "debug", skip(source, range))]
pub fn from_gen<F, S>(
    source: &S,
    n_iter: usize,
    width: usize,
    height: usize,
    range: &BoundingBox<F>,
    make_xy_proportional: bool,
    log: bool,
) -> Result<HistogramResult<F>>
where
    F: Float,
    S: SampleSource<F> + ?Sized,
{
    let (result, _) = from_gen_final(source, n_iter, width, height, range, make_xy_proportional, log)?;
    Ok(result)
}

/// Same as [`from_gen`] but also returns the last `(x, y)` pulled
///
/// Seeding a new generator with that pair continues the orbit, which lets a
/// long run be split into several calls.
#[instrument(level = "debug", skip(source, range))]
pub fn from_gen_final<F, S>(
    source: &S,
    n_iter: usize,
    width: usize,
    height: usize,
    range: &BoundingBox<F>,
    make_xy_proportional: bool,
    log: bool,
) -> Result<(HistogramResult<F>, Option<(F, F)>)>
where
    F: Float,
    S: SampleSource<F> + ?Sized,
{
    if n_iter == 0 {
        return Err(Error::non_positive("sample count", n_iter));
    }
    let range = resolve_range(*range, width, height, make_xy_proportional)?;

    let mut acc = HistogramAccumulator::new(range, width, height)?;
    acc.extend_from(source.samples(), n_iter);
    let last = acc.last_sample();
    Ok((into_result(acc, log), last))
}

/// Build a density map from index-aligned coordinate slices
///
/// When `range` is `None` the box is the min/max of the finite values. Note
/// that the max edges are exclusive, so samples sitting exactly on them are
/// not counted.
#[instrument(level = "debug", skip(x_vals, y_vals, range), fields(n = x_vals.len()))]
pub fn from_arrays<F>(
    x_vals: &[F],
    y_vals: &[F],
    width: usize,
    height: usize,
    range: Option<&BoundingBox<F>>,
    make_xy_proportional: bool,
    log: bool,
) -> Result<HistogramResult<F>>
where
    F: Float + Send + Sync,
{
    from_arrays_with(&sequential(), x_vals, y_vals, width, height, range, make_xy_proportional, log)
}

/// [`from_arrays`] with the arrays split into chunks across `engine`
#[allow(clippy::too_many_arguments)]
pub fn from_arrays_with<F, E>(
    engine: &E,
    x_vals: &[F],
    y_vals: &[F],
    width: usize,
    height: usize,
    range: Option<&BoundingBox<F>>,
    make_xy_proportional: bool,
    log: bool,
) -> Result<HistogramResult<F>>
where
    F: Float + Send + Sync,
    E: ExecutionEngine,
{
    let source = ArraySource::new(x_vals, y_vals)?;
    validate_dimensions(width, height)?;

    let range = match range {
        Some(range) => *range,
        // Estimating over at least one sample turns empty arrays into EmptySample
        None => estimate_range(&source, source.len().max(1))?,
    };
    let range = resolve_range(range, width, height, make_xy_proportional)?;

    let acc = accumulate_arrays_with(engine, &source, source.len(), width, height, &range)?;
    Ok(into_result(acc, log))
}

/// Build a density map from `partitions` independently seeded generators
///
/// `factory(i)` returns the stream for partition `i`; the `n_iter` budget is
/// split evenly across partitions and the partial grids are summed.
#[allow(clippy::too_many_arguments)]
pub fn from_gen_partitioned<F, E, G, I>(
    engine: &E,
    factory: G,
    partitions: usize,
    n_iter: usize,
    width: usize,
    height: usize,
    range: &BoundingBox<F>,
    make_xy_proportional: bool,
    log: bool,
) -> Result<HistogramResult<F>>
where
    F: Float + Send + Sync,
    E: ExecutionEngine,
    G: Fn(usize) -> I + Sync + Send,
    I: IntoIterator<Item = (F, F)>,
{
    let range = resolve_range(*range, width, height, make_xy_proportional)?;
    let acc = accumulate_partitioned(engine, factory, partitions, n_iter, width, height, &range)?;
    Ok(into_result(acc, log))
}

/// Validate the grid and apply the proportional adjustment if requested
pub(crate) fn resolve_range<F: Float>(
    range: BoundingBox<F>,
    width: usize,
    height: usize,
    make_xy_proportional: bool,
) -> Result<BoundingBox<F>> {
    validate_dimensions(width, height)?;
    if !make_xy_proportional {
        return Ok(range);
    }
    let adjusted = range.make_proportional(width, height)?;
    debug!(
        x_span = crate::bbox::to_f64(adjusted.x_span()),
        y_span = crate::bbox::to_f64(adjusted.y_span()),
        "range made proportional to grid"
    );
    Ok(adjusted)
}

fn into_result<F: Float>(acc: HistogramAccumulator<F>, log: bool) -> HistogramResult<F> {
    let range = *acc.range();
    let (counts, stats) = acc.finish();
    HistogramResult::new(counts.finalize(log), range, log, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_arrays_half_open_edges() {
        let result = from_arrays(&[0.0, 1.0, 2.0], &[0.0, 1.0, 2.0], 2, 2, None, false, false).unwrap();
        assert_eq!(result.range().to_array(), [[0.0, 2.0], [0.0, 2.0]]);

        let grid = result.grid();
        assert_eq!(grid.get(Cell::new(0, 0)), Some(1.0));
        assert_eq!(grid.get(Cell::new(1, 1)), Some(1.0));
        assert_eq!(grid.total(), 2.0);
        assert_eq!(result.stats().drawn, 3);
        assert_eq!(result.stats().dropped(), 1);
        assert!(!result.log_applied());
    }

    #[test]
    fn test_from_arrays_length_mismatch() {
        let result = from_arrays(&[0.0, 1.0, 2.0], &[0.0, 1.0, 2.0, 3.0], 2, 2, None, false, false);
        assert!(matches!(result, Err(Error::LengthMismatch { x_len: 3, y_len: 4 })));
    }

    #[test]
    fn test_from_arrays_validates_before_estimating() {
        let result = from_arrays::<f64>(&[], &[], 0, 2, None, false, false);
        assert!(matches!(result, Err(Error::InvalidArgument(_))));

        let result = from_arrays::<f64>(&[], &[], 2, 2, None, false, false);
        assert!(matches!(result, Err(Error::EmptySample { drawn: 0 })));
    }

    #[test]
    fn test_from_arrays_with_explicit_range() {
        let range = BoundingBox::new(0.0, 4.0, 0.0, 4.0).unwrap();
        let result = from_arrays(&[0.0, 1.0, 2.0], &[0.0, 1.0, 2.0], 2, 2, Some(&range), false, true).unwrap();
        assert!(result.log_applied());
        assert_relative_eq!(result.grid().get(Cell::new(0, 0)).unwrap(), 3.0_f64.ln());
        // (2, 2) lands in the top-right cell of a [0, 4) box
        assert_relative_eq!(result.grid().get(Cell::new(1, 1)).unwrap(), 2.0_f64.ln());
        assert_eq!(result.grid().get(Cell::new(0, 1)), Some(0.0));
        assert_eq!(result.grid().get(Cell::new(1, 0)), Some(0.0));
    }

    #[test]
    fn test_from_arrays_proportional() {
        let xs = [0.0, 4.0, 2.0];
        let ys = [0.0, 1.0, 0.5];
        let result = from_arrays(&xs, &ys, 10, 10, None, true, false).unwrap();
        let r = result.range();
        assert_relative_eq!(r.x_span(), r.y_span());
        assert_relative_eq!(r.y_min(), -1.5);
    }

    #[test]
    fn test_from_gen_short_stream() {
        let source = || (0..5).map(|i| (i as f64, i as f64));
        let range = BoundingBox::new(0.0, 10.0, 0.0, 10.0).unwrap();
        let result = from_gen(&source, 1000, 8, 8, &range, false, false).unwrap();
        assert!(result.grid().total() <= 5.0);
        assert_eq!(result.stats().drawn, 5);
    }

    #[test]
    fn test_from_gen_final_returns_last_sample() {
        let source = || (0..).map(|i| (i as f64, 0.5));
        let range = BoundingBox::new(0.0, 100.0, 0.0, 1.0).unwrap();
        let (result, last) = from_gen_final(&source, 42, 10, 1, &range, false, false).unwrap();
        assert_eq!(last, Some((41.0, 0.5)));
        assert_eq!(result.grid().total(), 42.0);
    }

    #[test]
    fn test_from_gen_rejects_invalid_arguments() {
        let source = || std::iter::repeat((0.5, 0.5));
        let range = BoundingBox::new(0.0, 1.0, 0.0, 1.0).unwrap();
        assert!(matches!(
            from_gen(&source, 0, 4, 4, &range, false, false),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            from_gen(&source, 10, 0, 4, &range, false, false),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            from_gen(&source, 10, 4, 0, &range, true, false),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_from_gen_partitioned() {
        let range = BoundingBox::new(0.0, 2.0, 0.0, 1.0).unwrap();
        let result = from_gen_partitioned(
            &sequential(),
            |i| std::iter::repeat((i as f64 + 0.5, 0.5)),
            2,
            7,
            2,
            1,
            &range,
            false,
            false,
        )
        .unwrap();
        assert_eq!(result.grid().cells(), &[4.0, 3.0]);
    }
}
