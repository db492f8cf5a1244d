//! Processing strategies for independent work items

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// How a batch distributes its files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcessingMode {
    /// One file at a time, in order
    #[default]
    Sequential,
    /// Files spread over the global Rayon pool
    Parallel,
    /// Files spread over a dedicated pool of this many threads
    ParallelWith(usize),
}

impl ProcessingMode {
    /// Map `f` over `items`, returning results in the order of `items`.
    ///
    /// Every mode produces the same output; only scheduling differs.
    /// Without the `parallel` feature all modes run sequentially.
    pub fn map_ordered<T, U, F>(&self, items: &[T], f: F) -> Vec<U>
    where
        T: Sync,
        U: Send,
        F: Fn(&T) -> U + Sync + Send,
    {
        match self {
            ProcessingMode::Sequential => items.iter().map(f).collect(),
            #[cfg(feature = "parallel")]
            ProcessingMode::Parallel => items.par_iter().map(f).collect(),
            #[cfg(feature = "parallel")]
            ProcessingMode::ParallelWith(threads) => {
                match rayon::ThreadPoolBuilder::new().num_threads(*threads).build() {
                    Ok(pool) => pool.install(|| items.par_iter().map(&f).collect()),
                    Err(e) => {
                        tracing::warn!("Cannot build a {}-thread pool ({}); running sequentially", threads, e);
                        items.iter().map(f).collect()
                    }
                }
            }
            #[cfg(not(feature = "parallel"))]
            ProcessingMode::Parallel | ProcessingMode::ParallelWith(_) => {
                items.iter().map(f).collect()
            }
        }
    }
}

/// Number of threads in the global Rayon pool (1 without `parallel`)
pub fn num_threads() -> usize {
    #[cfg(feature = "parallel")]
    {
        rayon::current_num_threads()
    }
    #[cfg(not(feature = "parallel"))]
    {
        1
    }
}
