//! Streaming accumulation of samples into a count grid
//!
//! [`HistogramAccumulator`] is the hot loop of the crate: every sample costs
//! one bounds check, two multiplies and at most one counter increment, with no
//! allocation. Sample budgets can also be split across independent
//! accumulators through an [`ExecutionEngine`] and merged afterwards, since
//! cell increments commute.

use num_traits::Float;
use pixhist_core::{Error, ExecutionEngine, Result};
use tracing::debug;

use crate::bbox::BoundingBox;
use crate::mapper::BinMapper;
use crate::traits::{ArraySource, SampleSource};
use crate::types::{AccumulationStats, Grid};

/// Owns a count grid and fills it one sample at a time
#[derive(Debug, Clone)]
pub struct HistogramAccumulator<F: Float = f64> {
    range: BoundingBox<F>,
    mapper: BinMapper<F>,
    grid: Grid<u64>,
    stats: AccumulationStats,
    last: Option<(F, F)>,
}

impl<F: Float> HistogramAccumulator<F> {
    /// Create an accumulator with a zeroed `width x height` grid over `range`
    pub fn new(range: BoundingBox<F>, width: usize, height: usize) -> Result<Self> {
        let mapper = BinMapper::new(&range, width, height)?;
        Ok(Self {
            range,
            mapper,
            grid: Grid::zeros(width, height)?,
            stats: AccumulationStats::default(),
            last: None,
        })
    }

    /// Bin a single sample, returning whether it landed in a cell
    #[inline]
    pub fn push(&mut self, x: F, y: F) -> bool {
        self.stats.drawn += 1;
        self.last = Some((x, y));
        match self.mapper.map(x, y) {
            Some(cell) => {
                self.grid.increment(cell);
                self.stats.binned += 1;
                true
            }
            None => false,
        }
    }

    /// Pull up to `n_samples` samples from `samples`
    ///
    /// An iterator that ends early is not an error. Returns the number of
    /// samples pulled.
    pub fn extend_from<I>(&mut self, samples: I, n_samples: usize) -> usize
    where
        I: IntoIterator<Item = (F, F)>,
    {
        let before = self.stats.drawn;
        for (x, y) in samples.into_iter().take(n_samples) {
            self.push(x, y);
        }
        (self.stats.drawn - before) as usize
    }

    /// Bin index-aligned coordinate slices, up to `n_samples` pairs
    pub fn extend_from_arrays(&mut self, x_vals: &[F], y_vals: &[F], n_samples: usize) -> Result<usize> {
        let source = ArraySource::new(x_vals, y_vals)?;
        Ok(self.extend_from(source.samples(), n_samples))
    }

    /// Fold a partial accumulator over the same range and grid into this one
    pub fn merge(&mut self, other: &HistogramAccumulator<F>) -> Result<()> {
        if self.range != other.range {
            return Err(Error::InvalidArgument(
                "cannot merge accumulators over different ranges".to_string(),
            ));
        }
        self.grid.merge(&other.grid)?;
        self.stats = self.stats.combine(other.stats);
        if other.last.is_some() {
            self.last = other.last;
        }
        Ok(())
    }

    pub fn range(&self) -> &BoundingBox<F> {
        &self.range
    }

    pub fn grid(&self) -> &Grid<u64> {
        &self.grid
    }

    pub fn stats(&self) -> AccumulationStats {
        self.stats
    }

    /// The most recent sample pulled, in bounds or not
    pub fn last_sample(&self) -> Option<(F, F)> {
        self.last
    }

    /// Hand the finished grid to the caller
    pub fn finish(self) -> (Grid<u64>, AccumulationStats) {
        debug!(
            drawn = self.stats.drawn,
            binned = self.stats.binned,
            dropped = self.stats.dropped(),
            "accumulation finished"
        );
        (self.grid, self.stats)
    }
}

/// Accumulate up to `n_samples` samples of `source` into a fresh grid
pub fn accumulate<F, S>(
    source: &S,
    n_samples: usize,
    width: usize,
    height: usize,
    range: &BoundingBox<F>,
) -> Result<(Grid<u64>, AccumulationStats)>
where
    F: Float,
    S: SampleSource<F> + ?Sized,
{
    if n_samples == 0 {
        return Err(Error::non_positive("sample count", n_samples));
    }
    let mut acc = HistogramAccumulator::new(*range, width, height)?;
    acc.extend_from(source.samples(), n_samples);
    Ok(acc.finish())
}

/// Accumulate array pairs by splitting them into contiguous chunks, one
/// accumulator per chunk, and summing the partial grids
pub fn accumulate_arrays_with<F, E>(
    engine: &E,
    source: &ArraySource<'_, F>,
    n_samples: usize,
    width: usize,
    height: usize,
    range: &BoundingBox<F>,
) -> Result<HistogramAccumulator<F>>
where
    F: Float + Send + Sync,
    E: ExecutionEngine,
{
    let mut total = HistogramAccumulator::new(*range, width, height)?;
    let n = n_samples.min(source.len());
    if E::IS_SEQUENTIAL || n == 0 {
        total.extend_from(source.samples(), n);
        return Ok(total);
    }

    let chunk = E::chunk_size(n, engine.num_threads());
    let n_chunks = n.div_ceil(chunk);
    let partials: Vec<Result<HistogramAccumulator<F>>> = engine.execute_batch(n_chunks, |i| {
        let start = i * chunk;
        let end = (start + chunk).min(n);
        let mut acc = HistogramAccumulator::new(*range, width, height)?;
        acc.extend_from(source.slice(start, end).samples(), end - start);
        Ok(acc)
    });

    for partial in partials {
        total.merge(&partial?)?;
    }
    debug!(strategy = ?engine.strategy(), n_chunks, chunk, "merged partial grids");
    Ok(total)
}

/// Accumulate `n_samples` samples spread over `partitions` independent streams
///
/// `factory(i)` must return the stream for partition `i`; callers typically
/// seed a generator with `i` so that partitions do not replay the same
/// samples. The budget is split as evenly as possible, earlier partitions
/// taking the remainder.
pub fn accumulate_partitioned<F, E, G, I>(
    engine: &E,
    factory: G,
    partitions: usize,
    n_samples: usize,
    width: usize,
    height: usize,
    range: &BoundingBox<F>,
) -> Result<HistogramAccumulator<F>>
where
    F: Float + Send + Sync,
    E: ExecutionEngine,
    G: Fn(usize) -> I + Sync + Send,
    I: IntoIterator<Item = (F, F)>,
{
    if partitions == 0 {
        return Err(Error::non_positive("partition count", partitions));
    }
    if n_samples == 0 {
        return Err(Error::non_positive("sample count", n_samples));
    }

    let base = n_samples / partitions;
    let remainder = n_samples % partitions;
    let partials: Vec<Result<HistogramAccumulator<F>>> = engine.execute_batch(partitions, |i| {
        let budget = base + usize::from(i < remainder);
        let mut acc = HistogramAccumulator::new(*range, width, height)?;
        acc.extend_from(factory(i), budget);
        Ok(acc)
    });

    let mut total = HistogramAccumulator::new(*range, width, height)?;
    for partial in partials {
        total.merge(&partial?)?;
    }
    debug!(strategy = ?engine.strategy(), partitions, "merged partition grids");
    Ok(total)
}
