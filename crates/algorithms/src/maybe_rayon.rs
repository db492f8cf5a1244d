//! Row iteration that is parallel when the `parallel` feature is on.
//!
//! With the feature, rayon's prelude is re-exported unchanged. Without it
//! (for example a single-threaded embedding), `into_par_iter()` becomes a
//! plain `into_iter()`, so `.flat_map()` and `.collect()` resolve to the
//! standard `Iterator` methods and results are identical.
#[cfg(feature = "parallel")]
pub use rayon::prelude::*;

#[cfg(not(feature = "parallel"))]
mod sequential {
    pub trait IntoParallelIterator {
        type Iter;
        fn into_par_iter(self) -> Self::Iter;
    }

    impl<I: IntoIterator> IntoParallelIterator for I {
        type Iter = I::IntoIter;
        fn into_par_iter(self) -> Self::Iter {
            self.into_iter()
        }
    }
}

#[cfg(not(feature = "parallel"))]
pub use sequential::*;
