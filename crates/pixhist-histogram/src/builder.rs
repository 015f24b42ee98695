//! Reusable density map configuration
//!
//! [`HistogramParams`] is the plain, serializable description of a density
//! map. [`DensityMapBuilder`] fills it in fluently and validates it once, and
//! the resulting [`DensityMap`] can then be run against any number of sources.

use num_traits::Float;
use pixhist_core::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api;
use crate::bbox::{to_f64, BoundingBox};
use crate::range::{estimate_range, DEFAULT_ESTIMATE_SAMPLES};
use crate::render::{GridRenderer, NullRenderer, DEFAULT_COLORMAP};
use crate::traits::{ArraySource, SampleSource};
use crate::types::{validate_dimensions, HistogramResult};

/// How the bounding box of a density map is chosen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeSpec<F: Float = f64> {
    /// Estimate from the first `n_samples` samples, then scale by `scale`
    Auto { n_samples: usize, scale: F },
    /// Use the given box as is
    Fixed(BoundingBox<F>),
}

impl<F: Float> Default for RangeSpec<F> {
    fn default() -> Self {
        RangeSpec::Auto {
            n_samples: DEFAULT_ESTIMATE_SAMPLES,
            scale: F::one(),
        }
    }
}

/// Parameters of a density map
///
/// Missing fields take their default when deserializing, so a config file
/// only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistogramParams<F: Float = f64> {
    pub width: usize,
    pub height: usize,
    pub range: RangeSpec<F>,
    pub make_xy_proportional: bool,
    pub log: bool,
    /// Color map name passed through to the renderer
    pub colormap: String,
}

impl<F: Float> Default for HistogramParams<F> {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 1000,
            range: RangeSpec::default(),
            make_xy_proportional: false,
            log: false,
            colormap: DEFAULT_COLORMAP.to_string(),
        }
    }
}

impl<F: Float> HistogramParams<F> {
    /// Check the parameters without running anything
    pub fn validate(&self) -> Result<()> {
        validate_dimensions(self.width, self.height)?;
        if let RangeSpec::Auto { n_samples, scale } = self.range {
            if n_samples == 0 {
                return Err(Error::non_positive("range estimation sample count", n_samples));
            }
            if !scale.is_finite() || scale <= F::zero() {
                return Err(Error::non_positive("range scale", to_f64(scale)));
            }
        }
        if self.colormap.is_empty() {
            return Err(Error::InvalidArgument("colormap name is empty".to_string()));
        }
        Ok(())
    }
}

/// Builder for configuring and creating density maps
///
/// # Example
///
/// ```rust
/// use pixhist_histogram::{BoundingBox, DensityMap, DensityMapBuilder};
///
/// let map: DensityMap = DensityMapBuilder::new()
///     .size(200, 100)
///     .range(BoundingBox::new(-1.0, 1.0, -1.0, 1.0).unwrap())
///     .proportional(true)
///     .log(true)
///     .build()
///     .unwrap();
///
/// let source = || (0..).map(|i| ((i as f64 * 0.1).sin(), (i as f64 * 0.3).cos()));
/// let result = map.from_gen(&source, 5_000).unwrap();
/// assert_eq!(result.grid().width(), 200);
/// ```
#[derive(Debug, Clone)]
pub struct DensityMapBuilder<F: Float = f64, V = NullRenderer> {
    params: HistogramParams<F>,
    renderer: V,
}

impl<F: Float> DensityMapBuilder<F, NullRenderer> {
    /// Creates a builder with default parameters and no renderer
    pub fn new() -> Self {
        Self::from_params(HistogramParams::default())
    }

    /// Start from existing parameters, e.g. loaded from a config file
    pub fn from_params(params: HistogramParams<F>) -> Self {
        Self {
            params,
            renderer: NullRenderer,
        }
    }
}

impl<F: Float> Default for DensityMapBuilder<F, NullRenderer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float, V> DensityMapBuilder<F, V> {
    /// Sets the grid size in bins
    pub fn size(mut self, width: usize, height: usize) -> Self {
        self.params.width = width;
        self.params.height = height;
        self
    }

    pub fn width(mut self, width: usize) -> Self {
        self.params.width = width;
        self
    }

    pub fn height(mut self, height: usize) -> Self {
        self.params.height = height;
        self
    }

    /// Uses a fixed bounding box
    pub fn range(mut self, range: BoundingBox<F>) -> Self {
        self.params.range = RangeSpec::Fixed(range);
        self
    }

    /// Estimates the box from the first `n_samples` samples of each source
    pub fn auto_range(self, n_samples: usize) -> Self {
        self.auto_range_scaled(n_samples, F::one())
    }

    /// Estimates the box, then scales it about its center by `scale`
    pub fn auto_range_scaled(mut self, n_samples: usize, scale: F) -> Self {
        self.params.range = RangeSpec::Auto { n_samples, scale };
        self
    }

    /// Widens the box so that x and y share one scale on the grid
    pub fn proportional(mut self, make_xy_proportional: bool) -> Self {
        self.params.make_xy_proportional = make_xy_proportional;
        self
    }

    /// Applies `ln(1 + count)` to the finished grid
    pub fn log(mut self, log: bool) -> Self {
        self.params.log = log;
        self
    }

    pub fn colormap(mut self, colormap: impl Into<String>) -> Self {
        self.params.colormap = colormap.into();
        self
    }

    /// Replaces the renderer used by [`DensityMap::render`]
    pub fn renderer<R: GridRenderer<F>>(self, renderer: R) -> DensityMapBuilder<F, R> {
        DensityMapBuilder {
            params: self.params,
            renderer,
        }
    }

    /// Validates the parameters and builds the density map
    pub fn build(self) -> Result<DensityMap<F, V>> {
        self.params.validate()?;
        Ok(DensityMap {
            params: self.params,
            renderer: self.renderer,
        })
    }
}

/// A validated density map configuration
#[derive(Debug, Clone)]
pub struct DensityMap<F: Float = f64, V = NullRenderer> {
    params: HistogramParams<F>,
    renderer: V,
}

impl<F: Float, V> DensityMap<F, V> {
    pub fn params(&self) -> &HistogramParams<F> {
        &self.params
    }

    pub fn renderer(&self) -> &V {
        &self.renderer
    }

    /// The bounding box this map would use for `source`
    ///
    /// Automatic ranges fail with `DegenerateRange` when the estimation
    /// prefix is constant on an axis.
    pub fn resolve_range<S>(&self, source: &S) -> Result<BoundingBox<F>>
    where
        S: SampleSource<F> + ?Sized,
    {
        match self.params.range {
            RangeSpec::Fixed(range) => Ok(range),
            RangeSpec::Auto { n_samples, scale } => {
                let range = estimate_range(source, n_samples)?.scale(scale)?;
                debug!(
                    x_min = to_f64(range.x_min()),
                    x_max = to_f64(range.x_max()),
                    y_min = to_f64(range.y_min()),
                    y_max = to_f64(range.y_max()),
                    "resolved automatic range"
                );
                Ok(range)
            }
        }
    }

    /// Run `n_iter` samples of `source` through this map
    pub fn from_gen<S>(&self, source: &S, n_iter: usize) -> Result<HistogramResult<F>>
    where
        S: SampleSource<F> + ?Sized,
    {
        if n_iter == 0 {
            return Err(Error::non_positive("sample count", n_iter));
        }
        let range = self.resolve_range(source)?;
        api::from_gen(
            source,
            n_iter,
            self.params.width,
            self.params.height,
            &range,
            self.params.make_xy_proportional,
            self.params.log,
        )
    }

    /// Run every pair of `x_vals`/`y_vals` through this map
    ///
    /// An automatic range is estimated over the whole arrays; its sample
    /// count is ignored.
    pub fn from_arrays(&self, x_vals: &[F], y_vals: &[F]) -> Result<HistogramResult<F>>
    where
        F: Send + Sync,
    {
        let range = match self.params.range {
            RangeSpec::Fixed(range) => range,
            RangeSpec::Auto { scale, .. } => {
                let source = ArraySource::new(x_vals, y_vals)?;
                estimate_range(&source, source.len().max(1))?.scale(scale)?
            }
        };
        api::from_arrays(
            x_vals,
            y_vals,
            self.params.width,
            self.params.height,
            Some(&range),
            self.params.make_xy_proportional,
            self.params.log,
        )
    }
}

impl<F: Float, V: GridRenderer<F>> DensityMap<F, V> {
    /// Hand `result` to the configured renderer; a no-op if it is disabled
    pub fn render(&self, result: &HistogramResult<F>) -> Result<()> {
        if !self.renderer.is_enabled() {
            return Ok(());
        }
        self.renderer.render(result, &self.params.colormap)
    }
}
