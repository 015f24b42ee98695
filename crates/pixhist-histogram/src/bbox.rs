//! Bounding boxes and the transforms that adjust them
//!
//! A [`BoundingBox`] is the rectangle of (x, y) space that gets mapped onto
//! the grid. It is validated on construction (finite, `min < max` on both
//! axes) and every transform returns a fresh, re-validated box.
//!
//! [`Extent`] is the raw min/max observed while estimating a range. It may be
//! degenerate (a constant stream has zero extent), which is why it is a
//! separate type.

use std::fmt;

use num_traits::Float;
use pixhist_core::{Axis, Error, Result};
use serde::{Deserialize, Serialize};

/// Rectangular region of (x, y) space covered by a grid
///
/// Serialized as `[[x_min, x_max], [y_min, y_max]]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "[[F; 2]; 2]",
    into = "[[F; 2]; 2]",
    bound(serialize = "F: Serialize", deserialize = "F: Deserialize<'de>")
)]
pub struct BoundingBox<F: Float = f64> {
    x_min: F,
    x_max: F,
    y_min: F,
    y_max: F,
}

impl<F: Float> BoundingBox<F> {
    /// Create a bounding box, rejecting non-finite or collapsed axes
    pub fn new(x_min: F, x_max: F, y_min: F, y_max: F) -> Result<Self> {
        if ![x_min, x_max, y_min, y_max].iter().all(|v| v.is_finite()) {
            return Err(Error::non_finite("bounding box"));
        }
        if x_min >= x_max {
            return Err(Error::degenerate(Axis::X, to_f64(x_min), to_f64(x_max)));
        }
        if y_min >= y_max {
            return Err(Error::degenerate(Axis::Y, to_f64(y_min), to_f64(y_max)));
        }
        if !(x_max - x_min).is_finite() || !(y_max - y_min).is_finite() {
            return Err(Error::InvalidArgument(
                "bounding box span overflows the float range".to_string(),
            ));
        }
        Ok(Self {
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }

    pub fn x_min(&self) -> F {
        self.x_min
    }

    pub fn x_max(&self) -> F {
        self.x_max
    }

    pub fn y_min(&self) -> F {
        self.y_min
    }

    pub fn y_max(&self) -> F {
        self.y_max
    }

    /// Extent of the x range
    pub fn x_span(&self) -> F {
        self.x_max - self.x_min
    }

    /// Extent of the y range
    pub fn y_span(&self) -> F {
        self.y_max - self.y_min
    }

    /// Center point of the box
    pub fn center(&self) -> (F, F) {
        let two = F::one() + F::one();
        (
            self.x_min + self.x_span() / two,
            self.y_min + self.y_span() / two,
        )
    }

    /// Half-open containment: the max edges are outside
    pub fn contains(&self, x: F, y: F) -> bool {
        x >= self.x_min && x < self.x_max && y >= self.y_min && y < self.y_max
    }

    /// Scale both ranges about the center
    ///
    /// `amount = 2` doubles the extent of an axis, `0.5` halves it.
    pub fn scale(&self, amount: impl Into<Amount<F>>) -> Result<Self> {
        let (ax, ay) = amount.into().per_axis();
        for a in [ax, ay] {
            if !a.is_finite() || a <= F::zero() {
                return Err(Error::non_positive("scale factor", to_f64(a)));
            }
        }
        let two = F::one() + F::one();
        // Padding form keeps `amount = 1` an exact identity
        let px = (ax - F::one()) * self.x_span() / two;
        let py = (ay - F::one()) * self.y_span() / two;
        Self::new(self.x_min - px, self.x_max + px, self.y_min - py, self.y_max + py)
    }

    /// Widen each range by `amount` in total, half on each side
    ///
    /// Negative padding narrows the box and fails once an axis collapses.
    pub fn pad(&self, amount: impl Into<Amount<F>>) -> Result<Self> {
        let (ax, ay) = finite_amount(amount.into(), "padding")?;
        let two = F::one() + F::one();
        let (px, py) = (ax / two, ay / two);
        Self::new(self.x_min - px, self.x_max + px, self.y_min - py, self.y_max + py)
    }

    /// Translate the box
    pub fn shift(&self, amount: impl Into<Amount<F>>) -> Result<Self> {
        let (ax, ay) = finite_amount(amount.into(), "shift")?;
        Self::new(self.x_min + ax, self.x_max + ax, self.y_min + ay, self.y_max + ay)
    }

    /// Widen the narrower axis so that x:y extents match `width:height`
    ///
    /// The wider axis is left untouched and the padded axis stays centered.
    /// Applying this twice with the same dimensions is a no-op.
    pub fn make_proportional(&self, width: usize, height: usize) -> Result<Self> {
        crate::types::validate_dimensions(width, height)?;
        let w = from_usize::<F>(width);
        let h = from_usize::<F>(height);
        let dx = self.x_span();
        let dy = self.y_span();
        let two = F::one() + F::one();

        // Cross-multiplied ratio gap, with a tolerance proportional to the
        // coordinate magnitudes so a previously adjusted box is left alone
        let gap = dy * w - dx * h;
        let mag_x = self.x_min.abs().max(self.x_max.abs());
        let mag_y = self.y_min.abs().max(self.y_max.abs());
        let tolerance = F::epsilon() * from_usize::<F>(16) * (mag_y * w + mag_x * h);
        if gap.abs() <= tolerance {
            return Ok(*self);
        }

        if gap < F::zero() {
            // y is too narrow for the window
            let k = (dx * h / w - dy) / two;
            Self::new(self.x_min, self.x_max, self.y_min - k, self.y_max + k)
        } else {
            let k = (dy * w / h - dx) / two;
            Self::new(self.x_min - k, self.x_max + k, self.y_min, self.y_max)
        }
    }

    /// The box as `[[x_min, x_max], [y_min, y_max]]`
    pub fn to_array(&self) -> [[F; 2]; 2] {
        [[self.x_min, self.x_max], [self.y_min, self.y_max]]
    }
}

impl<F: Float> TryFrom<[[F; 2]; 2]> for BoundingBox<F> {
    type Error = Error;

    fn try_from(value: [[F; 2]; 2]) -> Result<Self> {
        let [[x_min, x_max], [y_min, y_max]] = value;
        Self::new(x_min, x_max, y_min, y_max)
    }
}

impl<F: Float> From<BoundingBox<F>> for [[F; 2]; 2] {
    fn from(value: BoundingBox<F>) -> Self {
        value.to_array()
    }
}

impl<F: Float + fmt::Display> fmt::Display for BoundingBox<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.4}, {:.4}) x [{:.4}, {:.4})",
            self.x_min, self.x_max, self.y_min, self.y_max
        )
    }
}

/// A transform amount, shared by both axes or given per axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Amount<F> {
    Uniform(F),
    PerAxis(F, F),
}

impl<F: Copy> Amount<F> {
    /// The `(x, y)` amounts
    pub fn per_axis(&self) -> (F, F) {
        match *self {
            Amount::Uniform(a) => (a, a),
            Amount::PerAxis(ax, ay) => (ax, ay),
        }
    }
}

impl<F> From<F> for Amount<F> {
    fn from(value: F) -> Self {
        Amount::Uniform(value)
    }
}

impl<F> From<(F, F)> for Amount<F> {
    fn from((ax, ay): (F, F)) -> Self {
        Amount::PerAxis(ax, ay)
    }
}

/// Raw min/max of a set of samples, possibly degenerate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent<F: Float = f64> {
    pub x_min: F,
    pub x_max: F,
    pub y_min: F,
    pub y_max: F,
    /// Samples drawn from the source
    pub drawn: usize,
    /// Drawn samples with both coordinates finite
    pub finite: usize,
}

impl<F: Float> Extent<F> {
    /// Convert to a bounding box, failing on a zero-extent axis
    pub fn to_box(&self) -> Result<BoundingBox<F>> {
        BoundingBox::new(self.x_min, self.x_max, self.y_min, self.y_max)
    }

    /// Pad the raw extent before validating it
    ///
    /// This rescues constant or near-constant streams whose extent collapses
    /// on an axis.
    pub fn padded(&self, amount: impl Into<Amount<F>>) -> Result<BoundingBox<F>> {
        let (ax, ay) = finite_amount(amount.into(), "padding")?;
        let two = F::one() + F::one();
        BoundingBox::new(
            self.x_min - ax / two,
            self.x_max + ax / two,
            self.y_min - ay / two,
            self.y_max + ay / two,
        )
    }
}

/// Running min/max over a stream of samples, skipping non-finite pairs
#[derive(Debug, Clone, Copy)]
pub(crate) struct ExtentTracker<F: Float> {
    extent: Extent<F>,
}

impl<F: Float> ExtentTracker<F> {
    pub(crate) fn new() -> Self {
        Self {
            extent: Extent {
                x_min: F::infinity(),
                x_max: F::neg_infinity(),
                y_min: F::infinity(),
                y_max: F::neg_infinity(),
                drawn: 0,
                finite: 0,
            },
        }
    }

    #[inline]
    pub(crate) fn observe(&mut self, x: F, y: F) {
        let e = &mut self.extent;
        e.drawn += 1;
        if !(x.is_finite() && y.is_finite()) {
            return;
        }
        e.finite += 1;
        e.x_min = e.x_min.min(x);
        e.x_max = e.x_max.max(x);
        e.y_min = e.y_min.min(y);
        e.y_max = e.y_max.max(y);
    }

    /// The observed extent, or `EmptySample` if nothing finite was seen
    pub(crate) fn finish(self) -> Result<Extent<F>> {
        if self.extent.finite == 0 {
            return Err(Error::EmptySample {
                drawn: self.extent.drawn,
            });
        }
        Ok(self.extent)
    }
}

/// Scale a box about its center; see [`BoundingBox::scale`]
pub fn scale_range<F: Float>(range: &BoundingBox<F>, amount: impl Into<Amount<F>>) -> Result<BoundingBox<F>> {
    range.scale(amount)
}

/// Pad a box; see [`BoundingBox::pad`]
pub fn pad_range<F: Float>(range: &BoundingBox<F>, amount: impl Into<Amount<F>>) -> Result<BoundingBox<F>> {
    range.pad(amount)
}

/// Shift a box; see [`BoundingBox::shift`]
pub fn shift_range<F: Float>(range: &BoundingBox<F>, amount: impl Into<Amount<F>>) -> Result<BoundingBox<F>> {
    range.shift(amount)
}

/// Match a box's aspect ratio to the grid; see [`BoundingBox::make_proportional`]
pub fn make_proportional<F: Float>(range: &BoundingBox<F>, width: usize, height: usize) -> Result<BoundingBox<F>> {
    range.make_proportional(width, height)
}

fn finite_amount<F: Float>(amount: Amount<F>, what: &str) -> Result<(F, F)> {
    let (ax, ay) = amount.per_axis();
    if !(ax.is_finite() && ay.is_finite()) {
        return Err(Error::non_finite(what));
    }
    Ok((ax, ay))
}

pub(crate) fn to_f64<F: Float>(value: F) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

pub(crate) fn from_usize<F: Float>(value: usize) -> F {
    F::from(value).unwrap_or_else(F::infinity)
}
