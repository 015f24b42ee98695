//! Density map of a Clifford attractor
//!
//! Run with `RUST_LOG=debug cargo run --example clifford_demo` to see the
//! pipeline's diagnostics.

use anyhow::Result;
use pixhist_histogram::{
    estimate_range, from_gen, scale_range, DensityMap, DensityMapBuilder, GridRenderer, HistogramResult,
};
use tracing_subscriber::EnvFilter;

/// Clifford attractor orbit
#[derive(Debug, Clone, Copy)]
struct Clifford {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    x: f64,
    y: f64,
}

impl Clifford {
    fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self { a, b, c, d, x: 0.0, y: 0.0 }
    }
}

impl Iterator for Clifford {
    type Item = (f64, f64);

    fn next(&mut self) -> Option<Self::Item> {
        let x = (self.a * self.y).sin() + self.c * (self.a * self.x).cos();
        let y = (self.b * self.x).sin() + self.d * (self.b * self.y).cos();
        self.x = x;
        self.y = y;
        Some((x, y))
    }
}

/// Prints the grid as shaded characters, top row first
struct AsciiRenderer;

impl GridRenderer for AsciiRenderer {
    fn render(&self, result: &HistogramResult, colormap: &str) -> pixhist_histogram::Result<()> {
        const SHADES: &[u8] = b" .:-=+*#%@";
        let max = result.max_value();
        println!("{} ({})", result, colormap);
        let rows: Vec<&[f64]> = result.rows().collect();
        for row in rows.iter().rev() {
            let line: String = row
                .iter()
                .map(|&v| {
                    let level = if max > 0.0 { v / max } else { 0.0 };
                    SHADES[((level * (SHADES.len() - 1) as f64).round() as usize).min(SHADES.len() - 1)] as char
                })
                .collect();
            println!("{}", line);
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let source = || Clifford::new(-2.3, 1.9, 2.3, 1.2);

    // One-call API: estimate, widen by 5%, accumulate
    let range = scale_range(&estimate_range(&source, 10_000)?, 1.05)?;
    let result = from_gen(&source, 1_000_000, 400, 300, &range, true, true)?;
    println!("{}", result);
    println!(
        "drawn={} binned={} dropped={}",
        result.stats().drawn,
        result.stats().binned,
        result.stats().dropped()
    );

    // Same pipeline through a reusable configuration
    let map: DensityMap<f64, AsciiRenderer> = DensityMapBuilder::new()
        .size(96, 40)
        .auto_range_scaled(10_000, 1.05)
        .proportional(true)
        .log(true)
        .renderer(AsciiRenderer)
        .build()?;
    let preview = map.from_gen(&source, 500_000)?;
    map.render(&preview)?;

    Ok(())
}
