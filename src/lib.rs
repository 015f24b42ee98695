//! Streaming 2-D pixel histograms for dense point clouds and attractors
//!
//! This crate re-exports the pixhist workspace:
//!
//! - [`pixhist_core`]: error type and execution engines
//! - [`pixhist_histogram`]: bounding boxes, accumulation, range estimation and the
//!   density map API
//!
//! # Example
//!
//! ```rust
//! use pixhist::{from_gen, BoundingBox};
//!
//! let spiral = || (1..).map(|i| {
//!     let t = i as f64 * 0.05;
//!     (t.cos() / t.sqrt(), t.sin() / t.sqrt())
//! });
//! let range = BoundingBox::new(-1.0, 1.0, -1.0, 1.0)?;
//! let result = from_gen(&spiral, 50_000, 256, 256, &range, false, true)?;
//! assert!(result.max_value() > 0.0);
//! # Ok::<(), pixhist::Error>(())
//! ```

pub use pixhist_core;
pub use pixhist_histogram;

pub use pixhist_core::{Axis, Error, ExecutionEngine, Result};
#[cfg(feature = "parallel")]
pub use pixhist_core::{parallel, ParallelEngine};
pub use pixhist_core::{sequential, SequentialEngine};
pub use pixhist_histogram::{
    estimate_extent, estimate_range, from_arrays, from_arrays_with, from_gen, from_gen_final,
    from_gen_partitioned, make_proportional, pad_range, scale_range, shift_range, AccumulationStats,
    Amount, BoundingBox, Cell, DensityMap, DensityMapBuilder, Extent, Grid, GridRenderer,
    HistogramParams, HistogramResult, NullRenderer, RangeSpec, SampleSource,
};
