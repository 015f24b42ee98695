//! Streaming 2-D pixel histograms ("density maps")
//!
//! Point samples `(x, y)` drawn from a generator or from a pair of arrays are
//! binned into a `width x height` grid of counts, optionally log-compressed,
//! and handed to a renderer. Typical inputs are attractor orbits and other
//! iterated maps where millions of samples are reduced to one image.
//!
//! # Key Features
//!
//! - **Streaming**: samples are pulled lazily and never buffered
//! - **Automatic ranges**: estimate a bounding box from a sample prefix, then
//!   scale, pad or shift it
//! - **Aspect-correct output**: widen the box so x and y share one scale
//! - **Log compression**: `ln(1 + count)` to tame hot cells
//! - **Parallel accumulation**: chunked arrays or partitioned generators merged
//!   across an execution engine (`parallel` feature)
//!
//! # Binning convention
//!
//! Bins are half-open on both axes: a sample is counted when
//! `x_min <= x < x_max` and `y_min <= y < y_max`. Row 0 of the grid holds the
//! lowest y values and column 0 the lowest x values.
//!
//! # Examples
//!
//! ## Density map of a generator
//!
//! ```rust
//! use pixhist_histogram::{estimate_range, from_gen, scale_range};
//!
//! // Clifford attractor
//! let (a, b, c, d) = (-2.3, 1.9, 2.3, 1.2);
//! let clifford = move || {
//!     let (mut x, mut y) = (0.0_f64, 0.0_f64);
//!     std::iter::from_fn(move || {
//!         let next = ((a * y).sin() + c * (a * x).cos(), (b * x).sin() + d * (b * y).cos());
//!         (x, y) = next;
//!         Some(next)
//!     })
//! };
//!
//! let range = estimate_range(&clifford, 10_000).unwrap();
//! let range = scale_range(&range, 1.05).unwrap();
//! let result = from_gen(&clifford, 100_000, 128, 128, &range, true, true).unwrap();
//!
//! assert_eq!(result.grid().width(), 128);
//! assert!(result.max_value() > 0.0);
//! ```
//!
//! ## Density map of arrays
//!
//! ```rust
//! use pixhist_histogram::{from_arrays, Cell};
//!
//! let xs = [0.0, 1.0, 2.0];
//! let ys = [0.0, 1.0, 2.0];
//! let result = from_arrays(&xs, &ys, 2, 2, None, false, false).unwrap();
//!
//! // The sample at (2, 2) sits on the exclusive max edge
//! assert_eq!(result.grid().get(Cell::new(0, 0)), Some(1.0));
//! assert_eq!(result.grid().get(Cell::new(1, 1)), Some(1.0));
//! assert_eq!(result.total(), 2.0);
//! ```

pub mod accumulator;
pub mod api;
pub mod bbox;
pub mod builder;
pub mod mapper;
pub mod ops;
pub mod range;
pub mod render;
pub mod traits;
pub mod types;

pub use accumulator::{accumulate, accumulate_arrays_with, accumulate_partitioned, HistogramAccumulator};
pub use api::{from_arrays, from_arrays_with, from_gen, from_gen_final, from_gen_partitioned};
pub use bbox::{make_proportional, pad_range, scale_range, shift_range, Amount, BoundingBox, Extent};
pub use builder::{DensityMap, DensityMapBuilder, HistogramParams, RangeSpec};
pub use mapper::BinMapper;
pub use ops::{finalize, GridOps};
pub use range::{estimate_extent, estimate_range, DEFAULT_ESTIMATE_SAMPLES};
pub use render::{GridRenderer, NullRenderer, DEFAULT_COLORMAP};
pub use traits::{ArraySource, SampleSource};
pub use types::{AccumulationStats, Cell, Grid, HistogramResult};

pub use pixhist_core::{Axis, Error, Result};
