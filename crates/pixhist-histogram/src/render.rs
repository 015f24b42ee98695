//! Rendering interface for finished density maps
//!
//! This crate never draws anything itself. A renderer receives the finished
//! grid, its range and a color map name, and is free to plot, encode or
//! display it.

use num_traits::Float;
use pixhist_core::Result;

use crate::types::HistogramResult;

/// Color map handed to renderers when the caller does not pick one
pub const DEFAULT_COLORMAP: &str = "inferno";

/// Consumer of finished density maps
pub trait GridRenderer<F: Float = f64> {
    /// Render `result` using the named color map
    fn render(&self, result: &HistogramResult<F>, colormap: &str) -> Result<()>;

    /// Check if this renderer actually produces output
    fn is_enabled(&self) -> bool {
        true
    }
}

/// Renderer that does nothing (for when rendering is disabled)
#[derive(Debug, Default)]
pub struct NullRenderer;

impl<F: Float> GridRenderer<F> for NullRenderer {
    fn render(&self, _result: &HistogramResult<F>, _colormap: &str) -> Result<()> {
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        false
    }
}
