//! Core types shared by the pixhist crates
//!
//! This crate holds the pieces that every stage of density map construction
//! relies on:
//!
//! - **Errors**: a single [`Error`] enum covering argument validation
//!   (invalid arguments, mismatched arrays, empty samples, degenerate ranges)
//! - **Execution engines**: sequential or Rayon-backed execution of
//!   independent work items, used to split a sample budget across
//!   accumulators
//!
//! # Example
//!
//! ```rust
//! use pixhist_core::execution::{sequential, ExecutionEngine};
//!
//! let engine = sequential();
//! let partial_sums = engine.execute_batch(4, |i| i * 10);
//! assert_eq!(partial_sums, vec![0, 10, 20, 30]);
//! ```

pub mod error;
pub mod execution;

pub use error::{Axis, Error, Result};

pub use execution::{sequential, ExecutionEngine, ExecutionMode, ExecutionStrategy, SequentialEngine};
#[cfg(feature = "parallel")]
pub use execution::{parallel, ParallelEngine};
