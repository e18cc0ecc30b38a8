//! Shared building blocks for the `xfilter` crate: the error type and a small
//! set of numpy-flavoured array helpers.

extern crate alloc;

mod error;
pub use error::*;

/// Numpy-like routines operating on [ndarray] arrays.
pub mod num_rs;
