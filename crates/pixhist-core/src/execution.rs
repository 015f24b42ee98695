//! Execution engines for controlling computation strategy
//!
//! An engine decides whether independent pieces of work (chunks of an array
//! source, partitions of a sample budget) run one after another on the
//! calling thread or fan out over a Rayon thread pool. Algorithms are written
//! once against [`ExecutionEngine`] and stay agnostic of the strategy.

#[cfg(feature = "parallel")]
use crate::Result;

/// Execution strategy for batch operations
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ExecutionStrategy {
    /// Process items sequentially
    Sequential,
    /// Process items in parallel
    Parallel,
}

/// Marker trait for execution engine mode properties
pub trait ExecutionMode {
    /// Whether this engine executes tasks sequentially
    const IS_SEQUENTIAL: bool;

    /// Optimal chunk size for this execution mode
    fn chunk_size(n_items: usize, n_threads: usize) -> usize;
}

/// Trait for execution engines that control how computations are performed
pub trait ExecutionEngine: Clone + Send + Sync + ExecutionMode {
    /// Execute `f(i)` for every `i` in `0..count`
    fn execute_batch<F, R>(&self, count: usize, f: F) -> Vec<R>
    where
        F: Fn(usize) -> R + Sync + Send,
        R: Send;

    /// Get the execution strategy
    fn strategy(&self) -> ExecutionStrategy;

    /// Check if parallel execution is available
    fn is_parallel(&self) -> bool {
        matches!(self.strategy(), ExecutionStrategy::Parallel)
    }

    /// Get the number of threads available
    fn num_threads(&self) -> usize;
}

/// Sequential execution engine
///
/// Executes all operations sequentially in the current thread.
#[derive(Clone, Copy, Debug, Default)]
pub struct SequentialEngine;

impl SequentialEngine {
    pub fn new() -> Self {
        Self
    }
}

impl ExecutionMode for SequentialEngine {
    const IS_SEQUENTIAL: bool = true;

    fn chunk_size(_n_items: usize, _n_threads: usize) -> usize {
        // Process all items in one "chunk" for sequential
        usize::MAX
    }
}

impl ExecutionEngine for SequentialEngine {
    fn execute_batch<F, R>(&self, count: usize, f: F) -> Vec<R>
    where
        F: Fn(usize) -> R + Sync + Send,
        R: Send,
    {
        (0..count).map(f).collect()
    }

    fn strategy(&self) -> ExecutionStrategy {
        ExecutionStrategy::Sequential
    }

    fn num_threads(&self) -> usize {
        1
    }
}

/// Parallel execution engine using Rayon
///
/// Executes operations in parallel using Rayon's global pool or a dedicated one.
#[cfg(feature = "parallel")]
#[derive(Clone, Debug, Default)]
pub struct ParallelEngine {
    thread_pool: Option<std::sync::Arc<rayon::ThreadPool>>,
}

#[cfg(feature = "parallel")]
impl ParallelEngine {
    /// Create a new parallel engine with the global thread pool
    pub fn new() -> Self {
        Self { thread_pool: None }
    }

    /// Create a new parallel engine with a custom thread pool
    pub fn with_thread_pool(pool: std::sync::Arc<rayon::ThreadPool>) -> Self {
        Self {
            thread_pool: Some(pool),
        }
    }

    /// Create with a specific number of threads
    pub fn with_num_threads(num_threads: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()
            .map_err(|e| crate::Error::Execution(format!("Failed to create thread pool: {e}")))?;

        tracing::debug!(num_threads, "created dedicated thread pool");

        Ok(Self {
            thread_pool: Some(std::sync::Arc::new(pool)),
        })
    }
}

#[cfg(feature = "parallel")]
impl ExecutionMode for ParallelEngine {
    const IS_SEQUENTIAL: bool = false;

    fn chunk_size(n_items: usize, n_threads: usize) -> usize {
        // A few chunks per thread keeps the pool busy when chunks finish unevenly
        let target_chunks = n_threads.max(1) * 4;
        n_items.div_ceil(target_chunks).max(1)
    }
}

#[cfg(feature = "parallel")]
impl ExecutionEngine for ParallelEngine {
    fn execute_batch<F, R>(&self, count: usize, f: F) -> Vec<R>
    where
        F: Fn(usize) -> R + Sync + Send,
        R: Send,
    {
        use rayon::prelude::*;

        if let Some(pool) = &self.thread_pool {
            pool.install(|| (0..count).into_par_iter().map(f).collect())
        } else {
            (0..count).into_par_iter().map(f).collect()
        }
    }

    fn strategy(&self) -> ExecutionStrategy {
        ExecutionStrategy::Parallel
    }

    fn num_threads(&self) -> usize {
        if let Some(pool) = &self.thread_pool {
            pool.current_num_threads()
        } else {
            rayon::current_num_threads()
        }
    }
}

/// Create a sequential engine
pub fn sequential() -> SequentialEngine {
    SequentialEngine::new()
}

/// Create a parallel engine on Rayon's global pool
#[cfg(feature = "parallel")]
pub fn parallel() -> ParallelEngine {
    ParallelEngine::new()
}
