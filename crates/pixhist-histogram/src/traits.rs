//! Core traits for sample sources

use std::iter::{Copied, Zip};
use std::slice::Iter;

use pixhist_core::{Error, Result};

/// A source of (x, y) samples
///
/// Each call to [`samples`](SampleSource::samples) starts a fresh pass over
/// the source. Streams may be infinite; consumers only pull as many samples
/// as they need.
///
/// Any zero-argument closure returning an iterator of pairs is a source:
///
/// ```rust
/// use pixhist_histogram::SampleSource;
///
/// let diagonal = || (0..).map(|i| (i as f64, i as f64));
/// let first: Vec<(f64, f64)> = diagonal.samples().take(2).collect();
/// assert_eq!(first, vec![(0.0, 0.0), (1.0, 1.0)]);
/// ```
pub trait SampleSource<F> {
    /// Iterator type produced by one pass
    type Samples: Iterator<Item = (F, F)>;

    /// Start a new pass over the samples
    fn samples(&self) -> Self::Samples;
}

impl<F, G, I> SampleSource<F> for G
where
    G: Fn() -> I,
    I: IntoIterator<Item = (F, F)>,
{
    type Samples = I::IntoIter;

    fn samples(&self) -> Self::Samples {
        self().into_iter()
    }
}

/// Two index-aligned slices of coordinates
#[derive(Debug, Clone, Copy)]
pub struct ArraySource<'a, F> {
    x_vals: &'a [F],
    y_vals: &'a [F],
}

impl<'a, F: Copy> ArraySource<'a, F> {
    /// Pair up `x_vals` and `y_vals`, which must have the same length
    pub fn new(x_vals: &'a [F], y_vals: &'a [F]) -> Result<Self> {
        if x_vals.len() != y_vals.len() {
            return Err(Error::length_mismatch(x_vals.len(), y_vals.len()));
        }
        Ok(Self { x_vals, y_vals })
    }

    pub fn len(&self) -> usize {
        self.x_vals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x_vals.is_empty()
    }

    /// The sub-source covering `start..end`
    pub(crate) fn slice(&self, start: usize, end: usize) -> Self {
        Self {
            x_vals: &self.x_vals[start..end],
            y_vals: &self.y_vals[start..end],
        }
    }
}

impl<'a, F: Copy> SampleSource<F> for ArraySource<'a, F> {
    type Samples = Zip<Copied<Iter<'a, F>>, Copied<Iter<'a, F>>>;

    fn samples(&self) -> Self::Samples {
        self.x_vals.iter().copied().zip(self.y_vals.iter().copied())
    }
}
