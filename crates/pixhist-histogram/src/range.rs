//! Range estimation from a prefix of a sample source

use num_traits::Float;
use pixhist_core::{Error, Result};
use tracing::debug;

use crate::bbox::{BoundingBox, Extent, ExtentTracker};
use crate::traits::SampleSource;

/// Number of samples drawn when estimating a range, unless told otherwise
pub const DEFAULT_ESTIMATE_SAMPLES: usize = 10_000;

/// Min/max of the first `n_samples` samples of `source`
///
/// Stops early if the source runs out. Non-finite pairs are counted as drawn
/// but do not contribute to the extent. Fails with `EmptySample` if no finite
/// pair was drawn.
pub fn estimate_extent<F, S>(source: &S, n_samples: usize) -> Result<Extent<F>>
where
    F: Float,
    S: SampleSource<F> + ?Sized,
{
    if n_samples == 0 {
        return Err(Error::non_positive("sample count", n_samples));
    }

    let mut tracker = ExtentTracker::new();
    for (x, y) in source.samples().take(n_samples) {
        tracker.observe(x, y);
    }
    let extent = tracker.finish()?;

    debug!(
        drawn = extent.drawn,
        finite = extent.finite,
        "estimated extent from sample prefix"
    );
    Ok(extent)
}

/// Bounding box of the first `n_samples` samples of `source`
///
/// A stream that is constant on either axis has no usable box and fails
/// with `DegenerateRange`; use [`estimate_extent`] with
/// [`Extent::padded`] to recover one.
pub fn estimate_range<F, S>(source: &S, n_samples: usize) -> Result<BoundingBox<F>>
where
    F: Float,
    S: SampleSource<F> + ?Sized,
{
    estimate_extent(source, n_samples)?.to_box()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::ArraySource;
    use pixhist_core::Axis;

    #[test]
    fn test_estimate_range_stream() {
        let source = || {
            let mut x = -499.0;
            std::iter::from_fn(move || {
                let v = x;
                x += 1.0;
                Some((v, v))
            })
        };
        let range = estimate_range(&source, 1000).unwrap();
        assert_eq!(range.to_array(), [[-499.0, 500.0], [-499.0, 500.0]]);
    }

    #[test]
    fn test_estimate_range_truncates_arrays() {
        let xs = [0.0, 1.0, 2.0, 100.0];
        let ys = [5.0, 6.0, 7.0, -100.0];
        let source = ArraySource::new(&xs, &ys).unwrap();
        let range = estimate_range(&source, 3).unwrap();
        assert_eq!(range.to_array(), [[0.0, 2.0], [5.0, 7.0]]);
    }

    #[test]
    fn test_estimate_range_short_stream() {
        let source = || vec![(0.0, 0.0), (3.0, -1.0)];
        let extent = estimate_extent(&source, 1000).unwrap();
        assert_eq!(extent.drawn, 2);
        assert_eq!(extent.to_box().unwrap().to_array(), [[0.0, 3.0], [-1.0, 0.0]]);
    }

    #[test]
    fn test_non_finite_samples_are_skipped() {
        let source = || {
            vec![
                (f64::NAN, 1.0),
                (1.0, 1.0),
                (f64::INFINITY, 0.0),
                (2.0, 3.0),
            ]
        };
        let extent = estimate_extent(&source, 10).unwrap();
        assert_eq!(extent.drawn, 4);
        assert_eq!(extent.finite, 2);
        assert_eq!(extent.to_box().unwrap().to_array(), [[1.0, 2.0], [1.0, 3.0]]);
    }

    #[test]
    fn test_all_non_finite_is_empty_sample() {
        let source = || std::iter::repeat((f64::NAN, 0.0)).take(5);
        assert!(matches!(
            estimate_range(&source, 100),
            Err(Error::EmptySample { drawn: 5 })
        ));

        let empty = || std::iter::empty::<(f64, f64)>();
        assert!(matches!(
            estimate_range(&empty, 100),
            Err(Error::EmptySample { drawn: 0 })
        ));
    }

    #[test]
    fn test_constant_stream_is_degenerate() {
        let source = || std::iter::repeat((1.5, -2.0));
        assert!(matches!(
            estimate_range(&source, 50),
            Err(Error::DegenerateRange { axis: Axis::X, .. })
        ));

        let extent = estimate_extent(&source, 50).unwrap();
        assert_eq!((extent.x_min, extent.x_max), (1.5, 1.5));
        let rescued = extent.padded(1.0).unwrap();
        assert_eq!(rescued.to_array(), [[1.0, 2.0], [-2.5, -1.5]]);
    }

    #[test]
    fn test_zero_samples_is_invalid() {
        let source = || std::iter::repeat((0.0, 1.0));
        assert!(matches!(
            estimate_range(&source, 0),
            Err(Error::InvalidArgument(_))
        ));
    }
}
